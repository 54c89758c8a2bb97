pub mod artifact;
pub mod config;
pub mod file;
pub mod repository;
pub mod selection;
pub mod summary;

pub use artifact::{ChangeRequestResult, ChangeSubmission, GeneratedCode};
pub use config::{Config, LoggingConfig, ServiceConfig, WorkflowConfig};
pub use file::{FileContent, FileEntry};
pub use repository::RepositoryReference;
pub use selection::SelectionSet;
pub use summary::{SummaryId, TestSummary};
