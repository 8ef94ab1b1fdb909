// Summing per-period statistics into uptime, grade and average response time
use serde::Deserialize;
use shared_types::{Grade, PeriodSummary};

/// Cumulative counters for one day or month, as returned by the statistics API
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StatisticsAttributes {
    pub uptime: f64,
    pub downtime: f64,
    pub total_time: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StatisticsRecord {
    pub attributes: StatisticsAttributes,
}

/// Body of `GET /Statistics/Monitor/{guid}`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StatisticsResponse {
    pub data: Vec<StatisticsRecord>,
}

/// Aggregate a period's records.
///
/// `uptime = up / (up + down)` rounded to 4 decimals, `averageTime = total / n`
/// rounded to 3 decimals. Returns `None` when there is nothing to divide by:
/// no records, or neither uptime nor downtime recorded.
pub fn summarize_period(records: &[StatisticsRecord]) -> Option<PeriodSummary> {
    if records.is_empty() {
        return None;
    }

    let (up, down, total) = records.iter().fold((0.0, 0.0, 0.0), |(up, down, total), r| {
        (
            up + r.attributes.uptime,
            down + r.attributes.downtime,
            total + r.attributes.total_time,
        )
    });

    if up + down <= 0.0 {
        return None;
    }

    let uptime = up / (up + down);
    let average_time = total / records.len() as f64;

    Some(PeriodSummary {
        uptime: format!("{:.4}", uptime),
        uptime_grade: Grade::from_uptime(uptime),
        average_time: format!("{:.3}", average_time),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(uptime: f64, downtime: f64, total_time: f64) -> StatisticsRecord {
        StatisticsRecord {
            attributes: StatisticsAttributes {
                uptime,
                downtime,
                total_time,
            },
        }
    }

    #[test]
    fn test_sums_across_records() {
        let records = vec![
            record(86_000.0, 400.0, 0.25),
            record(86_400.0, 0.0, 0.35),
            record(85_000.0, 1_400.0, 0.30),
        ];
        let summary = summarize_period(&records).unwrap();
        // 257400 / 259200 = 0.993055...
        assert_eq!(summary.uptime, "0.9931");
        assert_eq!(summary.uptime_grade, Grade::A);
        assert_eq!(summary.average_time, "0.300");
    }

    #[test]
    fn test_grade_uses_unrounded_ratio() {
        // 0.99 exactly is not above the A threshold
        let summary = summarize_period(&[record(99.0, 1.0, 1.0)]).unwrap();
        assert_eq!(summary.uptime, "0.9900");
        assert_eq!(summary.uptime_grade, Grade::B);
    }

    #[test]
    fn test_poor_availability_is_graded_f() {
        let summary = summarize_period(&[record(90.0, 10.0, 2.0)]).unwrap();
        assert_eq!(summary.uptime, "0.9000");
        assert_eq!(summary.uptime_grade, Grade::F);
        assert_eq!(summary.average_time, "2.000");
    }

    #[test]
    fn test_nothing_to_aggregate() {
        assert!(summarize_period(&[]).is_none());
        assert!(summarize_period(&[record(0.0, 0.0, 0.0)]).is_none());
    }

    #[test]
    fn test_parses_api_payload() {
        let body = r#"{"Data":[{"Type":"MonitorStatistics","Id":"2024-01","Attributes":{"Uptime":2678400,"Downtime":0,"TotalTime":0.412,"Alerts":0}}]}"#;
        let response: StatisticsResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.data, vec![record(2_678_400.0, 0.0, 0.412)]);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: uptime stays a ratio and average times are never negative
        #[test]
        fn uptime_is_a_ratio(
            samples in prop::collection::vec((0.0f64..1e6, 0.0f64..1e6, 0.0f64..10.0), 1..40)
        ) {
            let records: Vec<_> = samples
                .iter()
                .map(|&(up, down, total)| StatisticsRecord {
                    attributes: StatisticsAttributes { uptime: up, downtime: down, total_time: total },
                })
                .collect();
            if let Some(summary) = summarize_period(&records) {
                let uptime: f64 = summary.uptime.parse().unwrap();
                prop_assert!((0.0..=1.0).contains(&uptime));
                let average: f64 = summary.average_time.parse().unwrap();
                prop_assert!(average >= 0.0);
            }
        }
    }
}
