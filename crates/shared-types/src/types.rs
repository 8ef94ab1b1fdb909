//! Result types for accessibility declaration analysis

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Conformance level declared by a site, ordered by severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConformanceLevel {
    NonCompliant,
    PartiallyCompliant,
    FullyCompliant,
}

impl ConformanceLevel {
    /// Every level, in declaration order
    pub const ALL: [ConformanceLevel; 3] = [
        ConformanceLevel::NonCompliant,
        ConformanceLevel::PartiallyCompliant,
        ConformanceLevel::FullyCompliant,
    ];

    /// Canonical French phrase a site uses to declare this level
    pub const fn phrase(self) -> &'static str {
        match self {
            ConformanceLevel::NonCompliant => "Accessibilité : non conforme",
            ConformanceLevel::PartiallyCompliant => "Accessibilité : partiellement conforme",
            ConformanceLevel::FullyCompliant => "Accessibilité : totalement conforme",
        }
    }

    /// Look up a level from its exact canonical phrase
    pub fn from_phrase(phrase: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.phrase() == phrase)
    }
}

impl std::fmt::Display for ConformanceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.phrase())
    }
}

impl Serialize for ConformanceLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.phrase())
    }
}

impl<'de> Deserialize<'de> for ConformanceLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let phrase = String::deserialize(deserializer)?;
        Self::from_phrase(&phrase).ok_or_else(|| {
            serde::de::Error::custom(format!("unknown conformance phrase: {}", phrase))
        })
    }
}

/// Similarity of one canonical phrase against a page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchCandidate {
    pub level: ConformanceLevel,
    pub score: f64, // 0.0..=1.0
}

/// Outcome of the declaration link search
///
/// `NotFound` is omitted from serialized output, `Missing` serializes as
/// `null` and `Url` as a string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DeclarationLink {
    /// No anchor matched at all
    #[default]
    NotFound,
    /// An anchor matched but carries no navigable target
    Missing,
    /// Absolute (or best-effort) URL of the declaration
    Url(String),
}

impl DeclarationLink {
    pub fn is_not_found(&self) -> bool {
        matches!(self, DeclarationLink::NotFound)
    }

    pub fn as_url(&self) -> Option<&str> {
        match self {
            DeclarationLink::Url(url) => Some(url),
            _ => None,
        }
    }
}

impl Serialize for DeclarationLink {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DeclarationLink::Url(url) => serializer.serialize_str(url),
            DeclarationLink::NotFound | DeclarationLink::Missing => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for DeclarationLink {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<String>::deserialize(deserializer)? {
            Some(url) => DeclarationLink::Url(url),
            None => DeclarationLink::Missing,
        })
    }
}

/// Everything extracted from one page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub mention: Option<ConformanceLevel>,
    #[serde(default, skip_serializing_if = "DeclarationLink::is_not_found")]
    pub declaration_url: DeclarationLink,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<String>, // e.g. "87%" or "92,5%"
}

impl AnalysisResult {
    pub fn to_json_line(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
