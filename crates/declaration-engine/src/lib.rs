//! Accessibility declaration analysis
//!
//! Finds which RGAA conformance statement a page makes ("Accessibilité :
//! non / partiellement / totalement conforme"), where its detailed
//! declaration lives, and the conformance rate that declaration announces.
//!
//! Stages run in order and each one only runs when the previous one found
//! something:
//!
//! 1. [`rules::conformance`]: approximate match of the three canonical phrases
//! 2. [`rules::declaration_link`]: anchor lookup and URL resolution
//! 3. [`extractors::percentage`]: rate extraction from the rendered declaration
//!
//! Only loading the page itself can fail; every later miss degrades the
//! [`AnalysisResult`] instead.

pub mod config;
pub mod document;
pub mod error;
pub mod extractors;
pub mod fetch;
pub mod matcher;
pub mod patterns;
pub mod rules;

use std::path::Path;
use std::sync::Arc;

use tracing::debug;

pub use config::EngineConfig;
pub use document::{Anchor, PageDocument};
pub use error::{ConfigError, FetchError, LoadError};
pub use fetch::{CommandFetcher, HttpFetcher, RenderedTextFetcher};
pub use shared_types::{AnalysisResult, ConformanceLevel, DeclarationLink};

/// DeclarationEngine entry point
pub struct DeclarationEngine {
    config: EngineConfig,
    fetcher: Arc<dyn RenderedTextFetcher>,
    http: reqwest::Client,
}

impl DeclarationEngine {
    /// Engine with default settings and the external fetch helper
    pub fn new() -> Self {
        Self::from_config(EngineConfig::default())
    }

    pub fn from_config(config: EngineConfig) -> Self {
        let fetcher = Arc::new(CommandFetcher::from_config(&config));
        Self::with_fetcher(config, fetcher)
    }

    /// Engine using a custom rendered-text fetcher
    pub fn with_fetcher(config: EngineConfig, fetcher: Arc<dyn RenderedTextFetcher>) -> Self {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .unwrap_or_default();
        Self {
            config,
            fetcher,
            http,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Analyze a page saved on disk. `base_url` is the address the page was
    /// served from; without it relative links stay relative.
    pub async fn analyze_file(
        &self,
        path: impl AsRef<Path>,
        base_url: Option<&str>,
    ) -> Result<AnalysisResult, LoadError> {
        let document = PageDocument::from_file(path.as_ref(), base_url).await?;
        Ok(self.analyze_document(&document).await)
    }

    /// Analyze a live page. Only static markup is seen: content rendered by
    /// client-side scripts is invisible here.
    pub async fn analyze_url(&self, url: &str) -> Result<AnalysisResult, LoadError> {
        let document = PageDocument::from_url(&self.http, url).await?;
        Ok(self.analyze_document(&document).await)
    }

    /// Analyze markup already in memory
    pub async fn analyze_html(&self, html: &str, page_url: &str) -> AnalysisResult {
        self.analyze_document(&PageDocument::parse(html, page_url)).await
    }

    /// Run every stage over a loaded page
    pub async fn analyze_document(&self, document: &PageDocument) -> AnalysisResult {
        let threshold = self.config.confidence_threshold;
        let mut result = AnalysisResult::default();

        let Some(best) = rules::conformance::detect_conformance(&document.body_text, threshold)
        else {
            debug!(url = %document.url, "No conformance statement found");
            return result;
        };
        debug!(level = ?best.level, score = best.score, "Conformance statement detected");
        result.mention = Some(best.level);

        result.declaration_url = rules::declaration_link::find_declaration_link(
            &document.anchors,
            best.level.phrase(),
            &self.config.generic_needle,
            &document.url,
            threshold,
        );
        debug!(link = ?result.declaration_url, "Declaration link resolved");

        if let Some(url) = result.declaration_url.as_url() {
            result.percentage =
                extractors::percentage::fetch_percentage(self.fetcher.as_ref(), url).await;
        }

        result
    }
}

impl Default for DeclarationEngine {
    fn default() -> Self {
        Self::new()
    }
}
