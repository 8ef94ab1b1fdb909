//! Engine configuration
//!
//! Defaults reproduce the reference behavior: a 0.9 confidence floor, the
//! generic "Accessibilité" fallback needle, and `npx @socialgouv/get-html`
//! run with `LANGUAGE=fr` and no timeout.

use std::time::Duration;

use crate::error::ConfigError;
use crate::patterns::{CONFIDENCE_THRESHOLD, GENERIC_NEEDLE};

const DEFAULT_FETCH_PROGRAM: &str = "npx";
const DEFAULT_FETCH_ARGS: &[&str] = &["@socialgouv/get-html"];
const DEFAULT_FETCH_LANGUAGE: &str = "fr";
const DEFAULT_USER_AGENT: &str = concat!("declaration-engine/", env!("CARGO_PKG_VERSION"));

/// Tunables for one [`DeclarationEngine`](crate::DeclarationEngine)
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Scores must be strictly greater than this to count as a match
    pub confidence_threshold: f64,
    /// Anchor text looked for when no anchor carries the detected phrase
    pub generic_needle: String,
    /// Program that prints the rendered markup of a URL on stdout
    pub fetch_program: String,
    /// Arguments placed before the URL
    pub fetch_args: Vec<String>,
    /// Value of `LANGUAGE` for the fetch helper
    pub fetch_language: String,
    /// Upper bound on one fetch; `None` waits for the helper indefinitely
    pub fetch_timeout: Option<Duration>,
    /// User agent for live page loads
    pub user_agent: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: CONFIDENCE_THRESHOLD,
            generic_needle: GENERIC_NEEDLE.to_string(),
            fetch_program: DEFAULT_FETCH_PROGRAM.to_string(),
            fetch_args: DEFAULT_FETCH_ARGS.iter().map(|s| s.to_string()).collect(),
            fetch_language: DEFAULT_FETCH_LANGUAGE.to_string(),
            fetch_timeout: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl EngineConfig {
    /// Build a configuration from the process environment.
    ///
    /// Reads (all optional):
    /// - `DECLARATION_CONFIDENCE_THRESHOLD`: float in `0.0..=1.0`
    /// - `DECLARATION_FETCH_COMMAND`: program and leading arguments, split on whitespace
    /// - `DECLARATION_FETCH_LANGUAGE`
    /// - `DECLARATION_FETCH_TIMEOUT_MS`: positive integer
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup("DECLARATION_CONFIDENCE_THRESHOLD") {
            config.confidence_threshold = parse_threshold(&raw)?;
        }

        if let Some(raw) = lookup("DECLARATION_FETCH_COMMAND") {
            let mut parts = raw.split_whitespace().map(str::to_string);
            config.fetch_program = parts.next().ok_or_else(|| ConfigError::InvalidValue {
                key: "DECLARATION_FETCH_COMMAND",
                value: raw.clone(),
                reason: "command is empty".to_string(),
            })?;
            config.fetch_args = parts.collect();
        }

        if let Some(language) = lookup("DECLARATION_FETCH_LANGUAGE") {
            config.fetch_language = language;
        }

        if let Some(raw) = lookup("DECLARATION_FETCH_TIMEOUT_MS") {
            let ms = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|ms| *ms > 0)
                .ok_or_else(|| ConfigError::InvalidValue {
                    key: "DECLARATION_FETCH_TIMEOUT_MS",
                    value: raw.clone(),
                    reason: "expected a positive number of milliseconds".to_string(),
                })?;
            config.fetch_timeout = Some(Duration::from_millis(ms));
        }

        Ok(config)
    }

    /// Set a fetch timeout
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = Some(timeout);
        self
    }
}

fn parse_threshold(raw: &str) -> Result<f64, ConfigError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| (0.0..=1.0).contains(value))
        .ok_or_else(|| ConfigError::InvalidValue {
            key: "DECLARATION_CONFIDENCE_THRESHOLD",
            value: raw.to_string(),
            reason: "expected a number between 0 and 1".to_string(),
        })
}
