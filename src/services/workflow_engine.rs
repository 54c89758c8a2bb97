//! Workflow state machine for human-in-the-loop test case generation.
//!
//! The `WorkflowEngine` owns every piece of workflow state and is the only
//! thing that mutates it. Each operation either replaces the state it produces
//! wholesale or leaves everything untouched:
//!
//! ```text
//! load_listing ──► toggle_selection* ──► generate_summaries ──► generate_code ──► submit_change
//!      │                                        │
//!      └─ resets selection, summaries, code     └─ clears generated code
//! ```
//!
//! State sits behind a `RwLock` that is never held across a remote call.
//! Operations copy their inputs out, release the lock, talk to the
//! Generation Service, then re-acquire the lock to commit. A listing revision
//! and a summary revision detect commits that would install results derived
//! from state that has since been replaced.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use indexmap::IndexSet;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use crate::domain::errors::{Operation, Stage, WorkflowError, WorkflowResult};
use crate::domain::models::{
    ChangeRequestResult, ChangeSubmission, FileContent, FileEntry, GeneratedCode,
    RepositoryReference, SelectionSet, SummaryId, TestSummary, WorkflowConfig,
};
use crate::domain::ports::GenerationService;
use crate::services::content_barrier;
use crate::services::file_naming::generated_file_name;
use crate::services::in_flight::InFlightFlags;

#[derive(Debug, Default)]
struct EngineState {
    repository: Option<RepositoryReference>,
    files: Vec<FileEntry>,
    selection: SelectionSet,
    summaries: Vec<TestSummary>,
    generated_code: Option<GeneratedCode>,
    listing_revision: u64,
    summary_revision: u64,
}

/// Point-in-time copy of the workflow state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkflowSnapshot {
    pub repository: Option<RepositoryReference>,
    pub files: Vec<FileEntry>,
    /// Selected paths in selection order.
    pub selection: Vec<String>,
    pub summaries: Vec<TestSummary>,
    pub generated_code: Option<GeneratedCode>,
}

impl WorkflowSnapshot {
    /// Whether a summary generation request would pass validation.
    pub fn can_generate_summaries(&self) -> bool {
        !self.selection.is_empty()
    }

    /// Whether a submission would pass validation.
    pub fn can_submit(&self) -> bool {
        self.generated_code.is_some()
    }
}

/// The workflow engine.
pub struct WorkflowEngine<S: GenerationService + ?Sized> {
    service: Arc<S>,
    settings: WorkflowConfig,
    state: RwLock<EngineState>,
    in_flight: InFlightFlags,
}

impl<S: GenerationService + ?Sized> WorkflowEngine<S> {
    pub fn new(service: Arc<S>, settings: WorkflowConfig) -> Self {
        Self {
            service,
            settings,
            state: RwLock::new(EngineState::default()),
            in_flight: InFlightFlags::new(),
        }
    }

    pub fn settings(&self) -> &WorkflowConfig {
        &self.settings
    }

    /// Whether `operation` is currently running.
    pub fn is_in_flight(&self, operation: Operation) -> bool {
        self.in_flight.is_active(operation)
    }

    pub async fn snapshot(&self) -> WorkflowSnapshot {
        let state = self.state.read().await;
        WorkflowSnapshot {
            repository: state.repository.clone(),
            files: state.files.clone(),
            selection: state.selection.to_vec(),
            summaries: state.summaries.clone(),
            generated_code: state.generated_code.clone(),
        }
    }

    // ========================================================================
    // Operations
    // ========================================================================

    /// Load the file listing of `repository`.
    ///
    /// On success the listing is replaced and everything downstream of it
    /// (selection, summaries, generated code) is reset. On failure nothing
    /// changes, including the recorded repository reference.
    #[instrument(skip(self))]
    pub async fn load_listing(&self, repository: &str) -> WorkflowResult<Vec<FileEntry>> {
        let repository =
            RepositoryReference::parse(repository).ok_or(WorkflowError::EmptyRepository)?;
        let _guard = self.in_flight.try_begin(Operation::LoadListing)?;

        let paths = self.service.list_files(&repository).await.map_err(|source| {
            warn!(repository = %repository, error = %source, "file listing failed");
            WorkflowError::remote(Stage::Listing, source)
        })?;
        let files = dedupe_listing(paths);

        let mut state = self.state.write().await;
        info!(repository = %repository, files = files.len(), "file listing loaded");
        state.repository = Some(repository);
        state.files.clone_from(&files);
        state.selection.clear();
        state.summaries.clear();
        state.generated_code = None;
        state.listing_revision += 1;

        Ok(files)
    }

    /// Add `path` to the selection, or remove it if already selected.
    ///
    /// The path does not have to be in the current listing. Returns `true`
    /// if the path is selected afterwards.
    #[instrument(skip(self))]
    pub async fn toggle_selection(&self, path: &str) -> bool {
        let mut state = self.state.write().await;
        if !state.files.iter().any(|entry| entry.path == path) {
            debug!(path, "toggling a path that is not in the current listing");
        }
        let selected = state.selection.toggle(path);
        debug!(path, selected, selected_count = state.selection.len(), "selection toggled");
        selected
    }

    /// Fetch content for the current selection without touching any state.
    ///
    /// Meant for previews; callers may ignore the result or its failure.
    pub async fn preview_selection(&self) -> WorkflowResult<Vec<FileContent>> {
        let (repository, paths) = {
            let state = self.state.read().await;
            if state.selection.is_empty() {
                return Ok(Vec::new());
            }
            let repository = state
                .repository
                .clone()
                .ok_or(WorkflowError::EmptyRepository)?;
            (repository, state.selection.to_vec())
        };

        content_barrier::fetch_all(&*self.service, &repository, &paths).await
    }

    /// Fetch every selected file and derive a new batch of test summaries.
    ///
    /// On success the summary batch is replaced and generated code is
    /// cleared. Any failed fetch, or a failed summary call, leaves both as
    /// they were.
    #[instrument(skip(self))]
    pub async fn generate_summaries(&self) -> WorkflowResult<Vec<TestSummary>> {
        let _guard = self.in_flight.try_begin(Operation::GenerateSummaries)?;

        let (repository, paths, listing_revision) = {
            let state = self.state.read().await;
            if state.selection.is_empty() {
                return Err(WorkflowError::EmptySelection);
            }
            let repository = state
                .repository
                .clone()
                .ok_or(WorkflowError::EmptyRepository)?;
            (repository, state.selection.to_vec(), state.listing_revision)
        };

        let contents = content_barrier::fetch_all(&*self.service, &repository, &paths).await?;
        let summaries = self
            .service
            .generate_summaries(&contents)
            .await
            .map_err(|source| {
                warn!(error = %source, "summary generation failed");
                WorkflowError::remote(Stage::Summaries, source)
            })?;
        warn_on_duplicate_ids(&summaries);

        let mut state = self.state.write().await;
        if state.listing_revision != listing_revision {
            warn!("listing replaced while summaries were generated; discarding batch");
            return Err(WorkflowError::Superseded(Operation::GenerateSummaries));
        }
        state.summaries.clone_from(&summaries);
        state.generated_code = None;
        state.summary_revision += 1;
        info!(summaries = summaries.len(), files = paths.len(), "summary batch installed");

        Ok(summaries)
    }

    /// Generate test code for the summary identified by `summary_id`.
    ///
    /// Content is re-fetched for the current selection, which may differ
    /// from the one the summaries were generated from. An id that is not in
    /// the current batch is a no-op returning `Ok(None)` without any remote
    /// call, even while another code generation is running.
    #[instrument(skip(self, summary_id), fields(summary_id = %summary_id))]
    pub async fn generate_code(
        &self,
        summary_id: &SummaryId,
    ) -> WorkflowResult<Option<GeneratedCode>> {
        if !self.has_summary(summary_id).await {
            debug!("summary id not in current batch; nothing to generate");
            return Ok(None);
        }
        let _guard = self.in_flight.try_begin(Operation::GenerateCode)?;

        let (repository, paths, summary, revisions) = {
            let state = self.state.read().await;
            let Some(summary) = state.summaries.iter().find(|s| &s.id == summary_id) else {
                debug!("summary id not in current batch; nothing to generate");
                return Ok(None);
            };
            let repository = state
                .repository
                .clone()
                .ok_or(WorkflowError::EmptyRepository)?;
            (
                repository,
                state.selection.to_vec(),
                summary.summary.clone(),
                (state.listing_revision, state.summary_revision),
            )
        };

        let contents = content_barrier::fetch_all(&*self.service, &repository, &paths).await?;
        let code = self
            .service
            .generate_code(&summary, &contents)
            .await
            .map_err(|source| {
                warn!(error = %source, "code generation failed");
                WorkflowError::remote(Stage::Code, source)
            })?;
        let code = GeneratedCode::new(code);

        let mut state = self.state.write().await;
        if (state.listing_revision, state.summary_revision) != revisions {
            warn!("summaries or listing replaced while code was generated; discarding code");
            return Err(WorkflowError::Superseded(Operation::GenerateCode));
        }
        state.generated_code = Some(code.clone());
        info!(bytes = code.as_str().len(), "generated code installed");

        Ok(Some(code))
    }

    async fn has_summary(&self, summary_id: &SummaryId) -> bool {
        self.state
            .read()
            .await
            .summaries
            .iter()
            .any(|s| &s.id == summary_id)
    }

    /// Submit the current generated code as a pull request.
    ///
    /// Blank code counts as no code. Engine state is not changed, on success or failure.
    #[instrument(skip(self))]
    pub async fn submit_change(&self) -> WorkflowResult<ChangeRequestResult> {
        let _guard = self.in_flight.try_begin(Operation::SubmitChange)?;

        let submission = {
            let state = self.state.read().await;
            let code = state
                .generated_code
                .clone()
                .filter(|code| !code.is_blank())
                .ok_or(WorkflowError::NoGeneratedCode)?;
            let repository = state
                .repository
                .clone()
                .ok_or(WorkflowError::EmptyRepository)?;
            ChangeSubmission {
                repository,
                code,
                file_name: generated_file_name(
                    &self.settings.file_name_prefix,
                    &self.settings.file_extension,
                    Utc::now(),
                ),
            }
        };

        let url = self
            .service
            .submit_change(&submission)
            .await
            .map_err(|source| {
                warn!(error = %source, "pull request creation failed");
                WorkflowError::remote(Stage::Submission, source)
            })?;
        info!(url = %url, file_name = %submission.file_name, "pull request created");

        Ok(ChangeRequestResult {
            url,
            file_name: submission.file_name,
        })
    }
}

/// Collapse duplicate paths to their first occurrence.
fn dedupe_listing(paths: Vec<String>) -> Vec<FileEntry> {
    let total = paths.len();
    let unique: IndexSet<String> = paths.into_iter().collect();
    if unique.len() != total {
        warn!(
            duplicates = total - unique.len(),
            "listing contained duplicate paths; keeping first occurrence"
        );
    }
    unique.into_iter().map(FileEntry::new).collect()
}

fn warn_on_duplicate_ids(summaries: &[TestSummary]) {
    let unique: HashSet<&SummaryId> = summaries.iter().map(|s| &s.id).collect();
    if unique.len() != summaries.len() {
        warn!("summary batch contains duplicate ids; code generation uses the first match");
    }
}
