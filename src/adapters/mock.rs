//! Mock Generation Service for testing.
//!
//! Every response is scripted up front with the `with_*` builders (or changed
//! later with the async `set_*` methods), and every call is recorded so tests
//! can assert on what the engine sent and how often.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::errors::{ServiceError, ServiceResult};
use crate::domain::models::{ChangeSubmission, FileContent, RepositoryReference, TestSummary};
use crate::domain::ports::GenerationService;

/// A call received by the mock, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    ListFiles { repository: String },
    FetchContent { repository: String, path: String },
    GenerateSummaries { files: Vec<FileContent> },
    GenerateCode { summary: String, files: Vec<FileContent> },
    SubmitChange(ChangeSubmission),
}

#[derive(Debug, Clone)]
struct MockContent {
    result: ServiceResult<String>,
    delay: Duration,
}

impl MockContent {
    fn missing(path: &str) -> Self {
        Self {
            result: Err(ServiceError::Status {
                status: 404,
                body: format!("no content scripted for {path}"),
            }),
            delay: Duration::ZERO,
        }
    }
}

#[derive(Debug, Clone)]
struct MockState {
    listing: ServiceResult<Vec<String>>,
    contents: HashMap<String, MockContent>,
    summaries: ServiceResult<Vec<TestSummary>>,
    summaries_delay: Duration,
    code: ServiceResult<String>,
    change_url: ServiceResult<String>,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            listing: Ok(Vec::new()),
            contents: HashMap::new(),
            summaries: Ok(Vec::new()),
            summaries_delay: Duration::ZERO,
            code: Ok("test('generated', () => {});".to_string()),
            change_url: Ok("https://example.com/pull/1".to_string()),
        }
    }
}

/// Scriptable in-memory Generation Service.
#[derive(Debug, Default)]
pub struct MockGenerationService {
    state: RwLock<MockState>,
    calls: RwLock<Vec<RecordedCall>>,
}

impl MockGenerationService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_listing<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        self.state.get_mut().listing = Ok(paths.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_failing_listing(mut self, error: ServiceError) -> Self {
        self.state.get_mut().listing = Err(error);
        self
    }

    pub fn with_content(mut self, path: &str, content: &str) -> Self {
        Self::script_content(self.state.get_mut(), path, Ok(content.to_string()));
        self
    }

    pub fn with_failing_content(mut self, path: &str, error: ServiceError) -> Self {
        Self::script_content(self.state.get_mut(), path, Err(error));
        self
    }

    /// Delay the content response for `path`.
    pub fn with_content_delay(mut self, path: &str, delay: Duration) -> Self {
        Self::script_delay(self.state.get_mut(), path, delay);
        self
    }

    pub fn with_summaries(mut self, summaries: Vec<TestSummary>) -> Self {
        self.state.get_mut().summaries = Ok(summaries);
        self
    }

    pub fn with_failing_summaries(mut self, error: ServiceError) -> Self {
        self.state.get_mut().summaries = Err(error);
        self
    }

    pub fn with_summaries_delay(mut self, delay: Duration) -> Self {
        self.state.get_mut().summaries_delay = delay;
        self
    }

    pub fn with_code(mut self, code: &str) -> Self {
        self.state.get_mut().code = Ok(code.to_string());
        self
    }

    pub fn with_failing_code(mut self, error: ServiceError) -> Self {
        self.state.get_mut().code = Err(error);
        self
    }

    pub fn with_change_url(mut self, url: &str) -> Self {
        self.state.get_mut().change_url = Ok(url.to_string());
        self
    }

    pub fn with_failing_change(mut self, error: ServiceError) -> Self {
        self.state.get_mut().change_url = Err(error);
        self
    }

    pub async fn set_listing(&self, paths: &[&str]) {
        self.state.write().await.listing = Ok(paths.iter().map(ToString::to_string).collect());
    }

    pub async fn set_failing_listing(&self, error: ServiceError) {
        self.state.write().await.listing = Err(error);
    }

    pub async fn set_content(&self, path: &str, content: &str) {
        Self::script_content(&mut *self.state.write().await, path, Ok(content.to_string()));
    }

    pub async fn set_failing_content(&self, path: &str, error: ServiceError) {
        Self::script_content(&mut *self.state.write().await, path, Err(error));
    }

    pub async fn set_content_delay(&self, path: &str, delay: Duration) {
        Self::script_delay(&mut *self.state.write().await, path, delay);
    }

    pub async fn set_summaries(&self, summaries: Vec<TestSummary>) {
        self.state.write().await.summaries = Ok(summaries);
    }

    pub async fn set_failing_summaries(&self, error: ServiceError) {
        self.state.write().await.summaries = Err(error);
    }

    pub async fn set_failing_code(&self, error: ServiceError) {
        self.state.write().await.code = Err(error);
    }

    /// All calls received so far.
    pub async fn calls(&self) -> Vec<RecordedCall> {
        self.calls.read().await.clone()
    }

    /// Batches sent to the summary endpoint, oldest first.
    pub async fn summary_requests(&self) -> Vec<Vec<FileContent>> {
        self.calls
            .read()
            .await
            .iter()
            .filter_map(|call| match call {
                RecordedCall::GenerateSummaries { files } => Some(files.clone()),
                _ => None,
            })
            .collect()
    }

    /// Clear the call log.
    pub async fn clear_calls(&self) {
        self.calls.write().await.clear();
    }

    fn script_content(state: &mut MockState, path: &str, result: ServiceResult<String>) {
        state
            .contents
            .entry(path.to_string())
            .or_insert_with(|| MockContent::missing(path))
            .result = result;
    }

    fn script_delay(state: &mut MockState, path: &str, delay: Duration) {
        state
            .contents
            .entry(path.to_string())
            .or_insert_with(|| MockContent::missing(path))
            .delay = delay;
    }

    async fn record(&self, call: RecordedCall) {
        self.calls.write().await.push(call);
    }
}

#[async_trait]
impl GenerationService for MockGenerationService {
    async fn list_files(&self, repository: &RepositoryReference) -> ServiceResult<Vec<String>> {
        self.record(RecordedCall::ListFiles {
            repository: repository.to_string(),
        })
        .await;
        self.state.read().await.listing.clone()
    }

    async fn fetch_content(
        &self,
        repository: &RepositoryReference,
        path: &str,
    ) -> ServiceResult<String> {
        self.record(RecordedCall::FetchContent {
            repository: repository.to_string(),
            path: path.to_string(),
        })
        .await;

        let scripted = self
            .state
            .read()
            .await
            .contents
            .get(path)
            .cloned()
            .unwrap_or_else(|| MockContent::missing(path));

        if !scripted.delay.is_zero() {
            tokio::time::sleep(scripted.delay).await;
        }
        scripted.result
    }

    async fn generate_summaries(&self, files: &[FileContent]) -> ServiceResult<Vec<TestSummary>> {
        self.record(RecordedCall::GenerateSummaries {
            files: files.to_vec(),
        })
        .await;

        let (result, delay) = {
            let state = self.state.read().await;
            (state.summaries.clone(), state.summaries_delay)
        };
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        result
    }

    async fn generate_code(&self, summary: &str, files: &[FileContent]) -> ServiceResult<String> {
        self.record(RecordedCall::GenerateCode {
            summary: summary.to_string(),
            files: files.to_vec(),
        })
        .await;
        self.state.read().await.code.clone()
    }

    async fn submit_change(&self, submission: &ChangeSubmission) -> ServiceResult<String> {
        self.record(RecordedCall::SubmitChange(submission.clone()))
            .await;
        self.state.read().await.change_url.clone()
    }
}
