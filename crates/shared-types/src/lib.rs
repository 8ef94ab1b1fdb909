pub mod types;
pub mod uptime;

pub use types::{AnalysisResult, ConformanceLevel, DeclarationLink, MatchCandidate};
pub use uptime::{Grade, PeriodSummary, UptimeReport, UptimeSummary};
