//! Error taxonomy for the test case generation workflow.
//!
//! Two layers:
//! - [`ServiceError`] is what a [`GenerationService`](crate::domain::ports::GenerationService)
//!   adapter reports. It keeps HTTP-status failures apart from transport failures
//!   so diagnostics can tell them apart.
//! - [`WorkflowError`] is what the engine reports to its caller. Every variant is
//!   either a validation failure (a local precondition, no remote call was made)
//!   or a remote-operation failure naming the stage that failed.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Failures reported by a Generation Service adapter.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// The service answered with a non-success status.
    #[error("service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The request never produced a response (connection refused, timeout, I/O).
    #[error("transport failure: {0}")]
    Transport(String),

    /// The service answered successfully but the body did not match the contract.
    #[error("malformed response: {0}")]
    Decode(String),
}

impl ServiceError {
    /// Returns true if the failure happened below the HTTP layer.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// HTTP status code, if the service produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for Generation Service calls.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Engine operations that carry an in-flight guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    LoadListing,
    GenerateSummaries,
    GenerateCode,
    SubmitChange,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::LoadListing => "Loading the file listing",
            Self::GenerateSummaries => "Generating test case summaries",
            Self::GenerateCode => "Generating test case code",
            Self::SubmitChange => "Submitting the pull request",
        };
        f.write_str(name)
    }
}

/// The remote stage a failure happened in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum Stage {
    Listing,
    ContentFetch { path: String },
    Summaries,
    Code,
    Submission,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Listing => f.write_str("Fetching files from the repository"),
            Self::ContentFetch { path } => write!(f, "Fetching content of '{path}'"),
            Self::Summaries => f.write_str("Generating test case summaries"),
            Self::Code => f.write_str("Generating test case code"),
            Self::Submission => f.write_str("Creating the pull request"),
        }
    }
}

/// Coarse classification of a [`WorkflowError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A local precondition failed. Nothing was sent, nothing changed.
    Validation,
    /// A remote call failed. Engine state is as it was before the call.
    RemoteOperation,
}

/// Errors surfaced by engine operations.
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("Please enter a repository URL")]
    EmptyRepository,

    #[error("Please select at least one file to generate summaries")]
    EmptySelection,

    #[error("Please generate test case code first")]
    NoGeneratedCode,

    #[error("{0} is already in progress")]
    OperationInFlight(Operation),

    #[error("{0} was superseded by newer workflow state; the result was discarded")]
    Superseded(Operation),

    #[error("{stage} failed: {source}")]
    RemoteOperation {
        stage: Stage,
        #[source]
        source: ServiceError,
    },
}

impl WorkflowError {
    /// Wrap a service failure with the stage it happened in.
    pub fn remote(stage: Stage, source: ServiceError) -> Self {
        Self::RemoteOperation { stage, source }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::RemoteOperation { .. } => ErrorKind::RemoteOperation,
            _ => ErrorKind::Validation,
        }
    }

    /// The failing stage, for remote-operation failures.
    pub fn stage(&self) -> Option<&Stage> {
        match self {
            Self::RemoteOperation { stage, .. } => Some(stage),
            _ => None,
        }
    }

    /// The underlying service failure, for remote-operation failures.
    pub fn service_error(&self) -> Option<&ServiceError> {
        match self {
            Self::RemoteOperation { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Result type for engine operations.
pub type WorkflowResult<T> = Result<T, WorkflowError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_kinds() {
        assert_eq!(WorkflowError::EmptyRepository.kind(), ErrorKind::Validation);
        assert_eq!(WorkflowError::EmptySelection.kind(), ErrorKind::Validation);
        assert_eq!(WorkflowError::NoGeneratedCode.kind(), ErrorKind::Validation);
        assert_eq!(
            WorkflowError::OperationInFlight(Operation::GenerateSummaries).kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            WorkflowError::Superseded(Operation::GenerateCode).kind(),
            ErrorKind::Validation
        );
    }

    #[test]
    fn test_remote_error_names_stage_and_path() {
        let err = WorkflowError::remote(
            Stage::ContentFetch {
                path: "src/b.js".to_string(),
            },
            ServiceError::Status {
                status: 500,
                body: "boom".to_string(),
            },
        );

        assert_eq!(err.kind(), ErrorKind::RemoteOperation);
        let message = err.to_string();
        assert!(message.contains("src/b.js"), "got: {message}");
        assert!(message.contains("500"), "got: {message}");
        assert_eq!(err.service_error().and_then(ServiceError::status), Some(500));
    }

    #[test]
    fn test_service_error_classification() {
        let transport = ServiceError::Transport("connection refused".to_string());
        assert!(transport.is_transport());
        assert_eq!(transport.status(), None);

        let status = ServiceError::Status {
            status: 404,
            body: String::new(),
        };
        assert!(!status.is_transport());
        assert_eq!(status.status(), Some(404));

        assert!(!ServiceError::Decode("eof".to_string()).is_transport());
    }

    #[test]
    fn test_stage_serializes_with_tag() {
        let value = serde_json::to_value(Stage::ContentFetch {
            path: "a.js".to_string(),
        })
        .unwrap();
        assert_eq!(value["stage"], "content_fetch");
        assert_eq!(value["path"], "a.js");
    }
}
