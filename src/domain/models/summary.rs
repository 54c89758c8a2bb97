use std::convert::Infallible;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier of a test summary within one batch.
///
/// The service may send ids as JSON numbers or strings. Both forms are kept
/// verbatim on the wire and compared by their text, so `1` and `"1"` name the
/// same summary. Numbers outside `i64` arrive as `Unsigned` or `Float`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SummaryId {
    Number(i64),
    Unsigned(u64),
    Float(f64),
    Text(String),
}

impl SummaryId {
    fn canonical(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SummaryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Unsigned(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl PartialEq for SummaryId {
    fn eq(&self, other: &Self) -> bool {
        self.canonical() == other.canonical()
    }
}

impl Eq for SummaryId {}

impl Hash for SummaryId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical().hash(state);
    }
}

impl FromStr for SummaryId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Ok(trimmed
            .parse::<i64>()
            .map_or_else(|_| Self::Text(trimmed.to_string()), Self::Number))
    }
}

impl From<i64> for SummaryId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for SummaryId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// A proposed test case, described in prose by the Generation Service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestSummary {
    pub id: SummaryId,
    pub summary: String,
}

impl TestSummary {
    pub fn new(id: impl Into<SummaryId>, summary: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            summary: summary.into(),
        }
    }
}
