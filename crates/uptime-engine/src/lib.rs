//! Availability reports for sites monitored on Uptrends
//!
//! A site is mapped to its monitor by URL containment, then the monitor's
//! statistics for the current year and the last 30 days are folded into an
//! [`UptimeReport`]. Sites without a monitor get an empty report rather
//! than an error.

pub mod aggregate;
pub mod client;
pub mod error;
pub mod monitor;
pub mod summary;

use tracing::{debug, info};

pub use aggregate::{summarize_period, StatisticsAttributes, StatisticsRecord};
pub use client::{MonitorApi, PresetPeriod, UptrendsClient, UptrendsConfig};
pub use error::UptrendsError;
pub use monitor::{find_monitor_guid, Monitor};
pub use shared_types::{Grade, PeriodSummary, UptimeReport, UptimeSummary};
pub use summary::{probe_dashboard_url, summarize};

/// Build the availability report of `url`.
///
/// Statistics are only requested once a monitor matches.
pub async fn collect_report(api: &dyn MonitorApi, url: &str) -> Result<UptimeReport, UptrendsError> {
    let monitors = api.list_monitors().await?;
    debug!(count = monitors.len(), "Monitors listed");

    let Some(guid) = find_monitor_guid(url, &monitors) else {
        info!(url = %url, "No monitor registered for site");
        return Ok(UptimeReport::unmonitored(url));
    };

    let current_year = api.monitor_statistics(guid, PresetPeriod::CurrentYear).await?;
    let last30_days = api.monitor_statistics(guid, PresetPeriod::Last30Days).await?;

    Ok(UptimeReport {
        url: url.to_string(),
        monitor_guid: Some(guid.to_string()),
        current_year: summarize_period(&current_year),
        last30_days: summarize_period(&last30_days),
    })
}
