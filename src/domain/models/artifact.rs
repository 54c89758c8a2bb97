use serde::{Deserialize, Serialize};

use super::repository::RepositoryReference;

/// Test code generated for one summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GeneratedCode {
    pub code: String,
}

impl GeneratedCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.code
    }

    /// True when there is nothing worth submitting.
    pub fn is_blank(&self) -> bool {
        self.code.trim().is_empty()
    }
}

/// Everything the service needs to open a pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeSubmission {
    pub repository: RepositoryReference,
    pub code: GeneratedCode,
    pub file_name: String,
}

/// Outcome of a successful submission. Reported to the user, not kept by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRequestResult {
    /// Link to the opened pull request.
    pub url: String,
    /// File name the generated code was proposed under.
    pub file_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_only_code_is_blank() {
        assert!(GeneratedCode::new("").is_blank());
        assert!(GeneratedCode::new(" \n\t").is_blank());
        assert!(!GeneratedCode::new("test('x', () => {});").is_blank());
    }
}
