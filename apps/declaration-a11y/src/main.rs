//! declaration-a11y
//!
//! Analyzes a homepage saved on disk and prints one JSON line on stdout:
//!
//! ```text
//! declaration-a11y https://www.example.gouv.fr ./homepage.html
//! {"mention":"Accessibilité : partiellement conforme","declarationUrl":"https://www.example.gouv.fr/accessibilite","percentage":"64,3%"}
//! ```
//!
//! Any failure prints `{}` instead. The exit code is always 0; diagnostics
//! go to stderr through `RUST_LOG`.

use std::path::PathBuf;

use anyhow::Context;
use clap::error::ErrorKind;
use clap::Parser;
use declaration_engine::{ConfigError, DeclarationEngine, EngineConfig, LoadError};
use tracing::{debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[cfg(test)]
mod tests;

/// Printed whenever no analysis result can be produced
const FALLBACK_LINE: &str = "{}";

#[derive(Parser, Debug)]
#[command(name = "declaration-a11y")]
#[command(version, about = "Find the RGAA accessibility declaration of a saved homepage")]
struct Args {
    /// Address the page was served from, used to resolve relative links
    base_url: String,

    /// Saved HTML of the homepage
    file_path: PathBuf,
}

impl Args {
    fn base_url(&self) -> Option<&str> {
        Some(self.base_url.trim()).filter(|url| !url.is_empty())
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // stdout carries the JSON line, logs go to stderr
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            eprintln!("{}", err);
            println!("{}", FALLBACK_LINE);
            return;
        }
    };

    let outcome = match EngineConfig::from_env().context("Invalid engine configuration") {
        Ok(config) => run(&DeclarationEngine::from_config(config), &args).await,
        Err(err) => Err(err),
    };

    println!("{}", render(outcome));
}

async fn run(engine: &DeclarationEngine, args: &Args) -> anyhow::Result<String> {
    debug!(file = %args.file_path.display(), base_url = ?args.base_url(), "Analyzing");

    let result = engine
        .analyze_file(&args.file_path, args.base_url())
        .await
        .with_context(|| format!("Failed to analyze {}", args.file_path.display()))?;

    result.to_json_line().context("Failed to serialize analysis result")
}

/// Collapse the outcome to the single stdout line
fn render(outcome: anyhow::Result<String>) -> String {
    match outcome {
        Ok(line) => line,
        Err(err) => {
            let kind = if let Some(load) = err.downcast_ref::<LoadError>() {
                load.kind()
            } else if let Some(config) = err.downcast_ref::<ConfigError>() {
                config.kind()
            } else {
                "INTERNAL_ERROR"
            };
            error!(kind, "{:#}", err);
            FALLBACK_LINE.to_string()
        }
    }
}
