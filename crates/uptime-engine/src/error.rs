//! Error types for the monitoring API client

use thiserror::Error;

#[derive(Error, Debug)]
pub enum UptrendsError {
    #[error("Request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP Error Response: {status} {reason}")]
    Status { status: u16, reason: String },

    #[error("Unexpected response body from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Missing API credentials: set UPTRENDS_API_SECRETS as login:password")]
    MissingCredentials,
}

impl UptrendsError {
    pub fn kind(&self) -> &'static str {
        match self {
            UptrendsError::Http { .. } => "NETWORK_ERROR",
            UptrendsError::Status { .. } => "HTTP_STATUS",
            UptrendsError::Decode { .. } => "DECODE_ERROR",
            UptrendsError::MissingCredentials => "MISSING_CREDENTIALS",
        }
    }
}
