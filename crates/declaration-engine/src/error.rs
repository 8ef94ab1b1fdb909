//! Error types for document loading, rendered-text fetching and configuration

use std::path::PathBuf;
use thiserror::Error;

/// Failure to load the page under analysis. Fatal to one analysis call.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Document not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Network error while loading {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} while loading {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Malformed document: {0}")]
    Malformed(String),
}

impl LoadError {
    /// Stable code for logs
    pub fn kind(&self) -> &'static str {
        match self {
            LoadError::NotFound(_) => "NOT_FOUND",
            LoadError::Io { .. } => "IO_ERROR",
            LoadError::Network { .. } => "NETWORK_ERROR",
            LoadError::HttpStatus { .. } => "HTTP_STATUS",
            LoadError::Malformed(_) => "MALFORMED_DOCUMENT",
        }
    }
}

/// Failure to retrieve the rendered declaration page. Never fatal.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Failed to start fetch helper `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Fetch helper failed ({status}): {stderr}")]
    ExitStatus { status: String, stderr: String },

    #[error("Fetch timeout after {0}ms")]
    Timeout(u64),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl FetchError {
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Spawn { .. } => "SPAWN_FAILED",
            FetchError::ExitStatus { .. } => "EXIT_STATUS",
            FetchError::Timeout(_) => "TIMEOUT",
            FetchError::Network(_) => "NETWORK_ERROR",
        }
    }
}

/// Invalid engine configuration value
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?} ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    pub fn kind(&self) -> &'static str {
        match self {
            ConfigError::InvalidValue { .. } => "INVALID_CONFIG",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_error_kinds_are_distinct() {
        let not_found = LoadError::NotFound(PathBuf::from("/missing.html"));
        let malformed = LoadError::Malformed("not UTF-8".to_string());
        assert_eq!(not_found.kind(), "NOT_FOUND");
        assert_eq!(malformed.kind(), "MALFORMED_DOCUMENT");
        assert_eq!(not_found.to_string(), "Document not found: /missing.html");
    }

    #[test]
    fn test_exit_status_message() {
        let err = FetchError::ExitStatus {
            status: "exit status: 1".to_string(),
            stderr: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "Fetch helper failed (exit status: 1): boom");
        assert_eq!(err.kind(), "EXIT_STATUS");
    }
}
