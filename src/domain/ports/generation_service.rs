use async_trait::async_trait;

use crate::domain::errors::ServiceResult;
use crate::domain::models::{ChangeSubmission, FileContent, RepositoryReference, TestSummary};

/// Port trait for the Generation Service backend
///
/// One method per remote stage. The service is stateless from the engine's
/// point of view: no call relies on an earlier one having been made.
///
/// # Error Handling
///
/// Adapters report [`ServiceError::Status`](crate::domain::errors::ServiceError::Status)
/// for non-success responses and
/// [`ServiceError::Transport`](crate::domain::errors::ServiceError::Transport) when no
/// response arrived. They must not retry; retry is the caller's decision.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`. The engine issues content fetches
/// concurrently through a shared reference.
#[async_trait]
pub trait GenerationService: Send + Sync {
    /// List the file paths of a repository, in the service's order.
    ///
    /// An empty listing is valid.
    async fn list_files(&self, repository: &RepositoryReference) -> ServiceResult<Vec<String>>;

    /// Fetch the content of one file.
    async fn fetch_content(
        &self,
        repository: &RepositoryReference,
        path: &str,
    ) -> ServiceResult<String>;

    /// Derive test case summaries from an ordered batch of file contents.
    async fn generate_summaries(&self, files: &[FileContent]) -> ServiceResult<Vec<TestSummary>>;

    /// Generate test code for one summary against the same kind of batch.
    async fn generate_code(&self, summary: &str, files: &[FileContent]) -> ServiceResult<String>;

    /// Open a pull request with the generated code. Returns its URL.
    ///
    /// Not idempotent: every call opens a new pull request.
    async fn submit_change(&self, submission: &ChangeSubmission) -> ServiceResult<String>;
}
