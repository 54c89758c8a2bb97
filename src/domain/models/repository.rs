use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of the source repository, usually its URL.
///
/// Always trimmed and non-empty; construct through [`RepositoryReference::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepositoryReference(String);

impl RepositoryReference {
    /// Parse user input. Returns `None` for empty or whitespace-only input.
    pub fn parse(raw: impl AsRef<str>) -> Option<Self> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RepositoryReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RepositoryReference {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
