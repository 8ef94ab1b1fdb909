//! Uptrends v4 API client
//!
//! Two endpoints are used: the monitor list, to map a site to its monitor
//! GUID, and per-monitor statistics for a preset period. Requests carry the
//! `login:password` secret as HTTP Basic credentials.
//!
//! # Configuration
//!
//! ```ignore
//! let config = UptrendsConfig::from_env()?;
//! let client = UptrendsClient::new(config);
//! ```

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::aggregate::{StatisticsRecord, StatisticsResponse};
use crate::error::UptrendsError;
use crate::monitor::Monitor;

/// Base URL of the public API
pub const DEFAULT_API_URL: &str = "https://api.uptrends.com/v4";

/// Reporting windows the statistics endpoint understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetPeriod {
    CurrentYear,
    Last30Days,
}

impl PresetPeriod {
    pub fn as_str(self) -> &'static str {
        match self {
            PresetPeriod::CurrentYear => "CurrentYear",
            PresetPeriod::Last30Days => "Last30Days",
        }
    }
}

/// Read access to monitors and their statistics
#[async_trait]
pub trait MonitorApi: Send + Sync {
    async fn list_monitors(&self) -> Result<Vec<Monitor>, UptrendsError>;

    async fn monitor_statistics(
        &self,
        monitor_guid: &str,
        period: PresetPeriod,
    ) -> Result<Vec<StatisticsRecord>, UptrendsError>;
}

/// API credentials and endpoint
#[derive(Clone)]
pub struct UptrendsConfig {
    /// `login:password`
    api_secret: String,
    api_base_url: String,
}

impl UptrendsConfig {
    pub fn new(api_secret: impl Into<String>) -> Self {
        Self {
            api_secret: api_secret.into(),
            api_base_url: DEFAULT_API_URL.to_string(),
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Reads:
    /// - `UPTRENDS_API_SECRETS` (`login:password`)
    /// - `UPTRENDS_API_URL` (optional, defaults to the public API)
    pub fn from_env() -> Result<Self, UptrendsError> {
        let api_secret = std::env::var("UPTRENDS_API_SECRETS")
            .ok()
            .filter(|secret| !secret.trim().is_empty())
            .ok_or(UptrendsError::MissingCredentials)?;
        let mut config = Self::new(api_secret);
        if let Ok(url) = std::env::var("UPTRENDS_API_URL") {
            config = config.with_base_url(url);
        }
        Ok(config)
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn base_url(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }

    fn authorization(&self) -> String {
        format!("Basic {}", STANDARD.encode(self.api_secret.as_bytes()))
    }
}

impl std::fmt::Debug for UptrendsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UptrendsConfig")
            .field("api_secret", &"[REDACTED]")
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}

/// HTTP implementation of [`MonitorApi`]
pub struct UptrendsClient {
    config: UptrendsConfig,
    http_client: reqwest::Client,
}

impl UptrendsClient {
    pub fn new(config: UptrendsConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, UptrendsError> {
        let url = format!("{}{}", self.config.base_url(), path);
        debug!(url = %url, "Calling Uptrends API");

        let http = |source| UptrendsError::Http {
            url: url.clone(),
            source,
        };

        let response = self
            .http_client
            .get(&url)
            .query(query)
            .header(reqwest::header::AUTHORIZATION, self.config.authorization())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(http)?;

        let status = response.status();
        if !status.is_success() {
            return Err(UptrendsError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let body = response.bytes().await.map_err(http)?;
        serde_json::from_slice(&body).map_err(|source| UptrendsError::Decode {
            url: url.clone(),
            source,
        })
    }
}

#[async_trait]
impl MonitorApi for UptrendsClient {
    async fn list_monitors(&self) -> Result<Vec<Monitor>, UptrendsError> {
        self.get_json("/Monitor", &[]).await
    }

    async fn monitor_statistics(
        &self,
        monitor_guid: &str,
        period: PresetPeriod,
    ) -> Result<Vec<StatisticsRecord>, UptrendsError> {
        let path = format!("/Statistics/Monitor/{}", monitor_guid);
        let response: StatisticsResponse = self
            .get_json(&path, &[("PresetPeriod", period.as_str())])
            .await?;
        Ok(response.data)
    }
}
