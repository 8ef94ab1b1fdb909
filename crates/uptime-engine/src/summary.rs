// Condensed view of a report for dashboards
use shared_types::{UptimeReport, UptimeSummary};

const PROBE_DASHBOARD: &str = "https://app.uptrends.com/Report/ProbeDashboardGeneric";

/// Current-year uptime and grade of a monitored site.
///
/// `None` when the site has no monitor or no usable current-year statistics.
pub fn summarize(report: Option<&UptimeReport>) -> Option<UptimeSummary> {
    let report = report?;
    report.monitor_guid.as_ref()?;
    let current_year = report.current_year.as_ref()?;
    Some(UptimeSummary {
        uptrends_uptime: current_year.uptime.clone(),
        uptrends_uptime_grade: current_year.uptime_grade,
    })
}

/// Public dashboard of a monitor
pub fn probe_dashboard_url(monitor_guid: &str) -> String {
    format!("{}?probeGuids={}", PROBE_DASHBOARD, monitor_guid)
}
