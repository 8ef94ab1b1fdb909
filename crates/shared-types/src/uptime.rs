//! Availability report types for monitored sites

use serde::{Deserialize, Serialize};

/// Letter grade derived from an uptime ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    E,
    F,
}

impl Grade {
    /// Grade an uptime ratio in `0.0..=1.0`. Thresholds are exclusive.
    pub fn from_uptime(uptime: f64) -> Self {
        if uptime > 0.99 {
            Grade::A
        } else if uptime > 0.98 {
            Grade::B
        } else if uptime > 0.97 {
            Grade::C
        } else if uptime > 0.96 {
            Grade::D
        } else if uptime > 0.95 {
            Grade::E
        } else {
            Grade::F
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let letter = match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::E => "E",
            Grade::F => "F",
        };
        f.write_str(letter)
    }
}

/// Aggregated statistics over one reporting period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodSummary {
    pub uptime: String,       // ratio, 4 decimals
    pub uptime_grade: Grade,
    pub average_time: String, // 3 decimals
}

/// Availability report for one site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UptimeReport {
    pub url: String,
    pub monitor_guid: Option<String>,
    pub current_year: Option<PeriodSummary>,
    pub last30_days: Option<PeriodSummary>,
}

impl UptimeReport {
    /// Report for a site with no registered monitor
    pub fn unmonitored(url: &str) -> Self {
        Self {
            url: url.to_string(),
            monitor_guid: None,
            current_year: None,
            last30_days: None,
        }
    }
}

/// Headline figures kept when a report is folded into a site summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UptimeSummary {
    pub uptrends_uptime: String,
    pub uptrends_uptime_grade: Grade,
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: a higher uptime never earns a worse grade
        #[test]
        fn grade_is_monotonic(a in 0.0f64..=1.0, b in 0.0f64..=1.0) {
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(Grade::from_uptime(high) <= Grade::from_uptime(low));
        }
    }
}
