//! uptrends-report
//!
//! Prints the availability report of a site as JSON:
//!
//! ```text
//! uptrends-report https://www.example.gouv.fr login:password
//! {"url":"https://www.example.gouv.fr","monitorGuid":"…","currentYear":{…},"last30Days":{…}}
//! ```
//!
//! Credentials come from the second argument or `UPTRENDS_API_SECRETS`.
//! An invalid URL or missing credentials exit non-zero; API failures print
//! `{}` and exit 0.

use anyhow::{bail, Context, Result};
use clap::Parser;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uptime_engine::{
    collect_report, probe_dashboard_url, summarize, UptimeReport, UptrendsClient, UptrendsConfig,
};

const FALLBACK_LINE: &str = "{}";

lazy_static! {
    static ref ABSOLUTE_URL: Regex = Regex::new(r"^https?://\S+$").unwrap();
}

#[derive(Parser, Debug)]
#[command(name = "uptrends-report")]
#[command(version, about = "Uptime statistics of a site monitored on Uptrends")]
struct Args {
    /// Site URL, with scheme
    url: String,

    /// API secret as login:password (defaults to UPTRENDS_API_SECRETS)
    api_key: Option<String>,

    /// API base URL
    #[arg(long, env = "UPTRENDS_API_URL")]
    api_url: Option<String>,

    /// Print only the current-year uptime and grade
    #[arg(long)]
    summary: bool,
}

impl Args {
    fn config(&self) -> Result<UptrendsConfig> {
        let mut config = match self.api_key.as_deref().filter(|key| !key.trim().is_empty()) {
            Some(key) => UptrendsConfig::new(key),
            None => UptrendsConfig::from_env().context("No API secret given")?,
        };
        if let Some(url) = &self.api_url {
            config = config.with_base_url(url.as_str());
        }
        Ok(config)
    }
}

fn validate_url(url: &str) -> Result<()> {
    if !ABSOLUTE_URL.is_match(url) {
        bail!("Invalid URL {:?}: expected an absolute http(s) URL", url);
    }
    Ok(())
}

fn render(report: &UptimeReport, summary_only: bool) -> Result<String> {
    let line = if summary_only {
        serde_json::to_string(&summarize(Some(report)))?
    } else {
        serde_json::to_string(report)?
    };
    Ok(line)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    validate_url(&args.url)?;
    let client = UptrendsClient::new(args.config()?);

    match collect_report(&client, &args.url).await {
        Ok(report) => {
            if let Some(guid) = &report.monitor_guid {
                info!(dashboard = %probe_dashboard_url(guid), "Monitor found");
            }
            println!("{}", render(&report, args.summary)?);
        }
        Err(err) => {
            error!(kind = err.kind(), "{}", err);
            println!("{}", FALLBACK_LINE);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use uptime_engine::{Grade, PeriodSummary};

    #[test]
    fn test_validate_url() {
        assert!(validate_url("https://www.example.gouv.fr").is_ok());
        assert!(validate_url("http://example.fr/page").is_ok());
        assert!(validate_url("www.example.gouv.fr").is_err());
        assert!(validate_url("ftp://example.fr").is_err());
        assert!(validate_url("https://").is_err());
    }

    #[test]
    fn test_api_key_argument_wins() {
        let args = Args::try_parse_from([
            "uptrends-report",
            "https://example.fr",
            "login:password",
            "--api-url",
            "http://127.0.0.1:8080/v4/",
        ])
        .unwrap();
        let config = args.config().unwrap();
        assert_eq!(config.base_url(), "http://127.0.0.1:8080/v4");
    }

    #[test]
    fn test_render_report_and_summary() {
        let report = UptimeReport {
            url: "https://example.fr".to_string(),
            monitor_guid: Some("g".to_string()),
            current_year: Some(PeriodSummary {
                uptime: "0.9850".to_string(),
                uptime_grade: Grade::B,
                average_time: "0.420".to_string(),
            }),
            last30_days: None,
        };

        assert_eq!(
            render(&report, true).unwrap(),
            r#"{"uptrendsUptime":"0.9850","uptrendsUptimeGrade":"B"}"#
        );
        assert!(render(&report, false).unwrap().starts_with(r#"{"url":"https://example.fr","monitorGuid":"g""#));
        assert_eq!(
            render(&UptimeReport::unmonitored("https://example.fr"), true).unwrap(),
            "null"
        );
    }
}
