//! Retrieval of a declaration page's rendered markup
//!
//! The default fetcher shells out to a headless-browser helper so that
//! client-rendered declarations come back with their text. Tests and hosts
//! without Node can swap in any other [`RenderedTextFetcher`].

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::config::EngineConfig;
use crate::error::FetchError;

/// Capability to turn a URL into the page's rendered markup
#[async_trait]
pub trait RenderedTextFetcher: Send + Sync {
    async fn fetch_rendered_text(&self, url: &str) -> Result<String, FetchError>;
}

/// Runs an external program with the URL as last argument and reads stdout
#[derive(Debug, Clone)]
pub struct CommandFetcher {
    program: String,
    args: Vec<String>,
    language: String,
    timeout: Option<Duration>,
}

impl CommandFetcher {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            language: "fr".to_string(),
            timeout: None,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            program: config.fetch_program.clone(),
            args: config.fetch_args.clone(),
            language: config.fetch_language.clone(),
            timeout: config.fetch_timeout,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    async fn run(&self, url: &str) -> Result<String, FetchError> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(url)
            .env("LANGUAGE", &self.language)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| FetchError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(FetchError::ExitStatus {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl RenderedTextFetcher for CommandFetcher {
    async fn fetch_rendered_text(&self, url: &str) -> Result<String, FetchError> {
        debug!(program = %self.program, url, "Running fetch helper");
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.run(url))
                .await
                .map_err(|_| FetchError::Timeout(limit.as_millis() as u64))?,
            None => self.run(url).await,
        }
    }
}

/// Plain HTTP GET. Sees static markup only.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RenderedTextFetcher for HttpFetcher {
    async fn fetch_rendered_text(&self, url: &str) -> Result<String, FetchError> {
        debug!(url, "Fetching declaration over HTTP");
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}
