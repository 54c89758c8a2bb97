//! Display models shared by the CLI commands.

use serde::Serialize;

use crate::cli::display::{
    action_success, list_table, readiness, render_list, selection_marker, truncate, CommandOutput,
};
use crate::domain::models::{ChangeRequestResult, FileEntry, GeneratedCode, TestSummary};
use crate::services::WorkflowSnapshot;

const SUMMARY_WIDTH: usize = 96;

/// One row of a file listing.
#[derive(Debug, Clone, Serialize)]
pub struct ListingRow {
    pub path: String,
    pub selected: bool,
}

/// A repository's file listing with selection markers.
#[derive(Debug, Clone, Serialize)]
pub struct ListingView {
    pub repository: String,
    pub files: Vec<ListingRow>,
}

impl ListingView {
    pub fn new(repository: impl Into<String>, files: &[FileEntry], selection: &[String]) -> Self {
        Self {
            repository: repository.into(),
            files: files
                .iter()
                .map(|entry| ListingRow {
                    path: entry.path.clone(),
                    selected: selection.contains(&entry.path),
                })
                .collect(),
        }
    }
}

impl CommandOutput for ListingView {
    fn to_human(&self) -> String {
        let mut table = list_table(&["", "path"]);
        for row in &self.files {
            table.add_row(vec![
                selection_marker(row.selected).to_string(),
                row.path.clone(),
            ]);
        }
        format!(
            "{}\n{}",
            self.repository,
            render_list("file", &table, self.files.len())
        )
    }
}

/// The current summary batch.
#[derive(Debug, Clone, Serialize)]
pub struct SummariesView {
    pub summaries: Vec<TestSummary>,
}

impl CommandOutput for SummariesView {
    fn to_human(&self) -> String {
        let mut table = list_table(&["id", "summary"]);
        for summary in &self.summaries {
            table.add_row(vec![
                summary.id.to_string(),
                truncate(&summary.summary, SUMMARY_WIDTH),
            ]);
        }
        render_list("summary", &table, self.summaries.len())
    }
}

/// Generated test code for one summary.
#[derive(Debug, Clone, Serialize)]
pub struct CodeView {
    pub summary_id: String,
    pub code: String,
}

impl CodeView {
    pub fn new(summary_id: impl Into<String>, code: &GeneratedCode) -> Self {
        Self {
            summary_id: summary_id.into(),
            code: code.as_str().to_string(),
        }
    }
}

impl CommandOutput for CodeView {
    fn to_human(&self) -> String {
        format!("Test case code for summary {}:\n\n{}", self.summary_id, self.code)
    }
}

/// An opened pull request.
#[derive(Debug, Clone, Serialize)]
pub struct ChangeRequestView {
    pub url: String,
    pub file_name: String,
}

impl From<ChangeRequestResult> for ChangeRequestView {
    fn from(result: ChangeRequestResult) -> Self {
        Self {
            url: result.url,
            file_name: result.file_name,
        }
    }
}

impl CommandOutput for ChangeRequestView {
    fn to_human(&self) -> String {
        action_success(&format!(
            "Pull request created: {} ({})",
            self.url, self.file_name
        ))
    }
}

/// Where the workflow currently stands.
#[derive(Debug, Clone, Serialize)]
pub struct StatusView {
    pub repository: Option<String>,
    pub files: usize,
    pub selection: Vec<String>,
    pub summaries: usize,
    pub has_code: bool,
    pub can_generate_summaries: bool,
    pub can_submit: bool,
}

impl From<&WorkflowSnapshot> for StatusView {
    fn from(snapshot: &WorkflowSnapshot) -> Self {
        Self {
            repository: snapshot.repository.as_ref().map(ToString::to_string),
            files: snapshot.files.len(),
            selection: snapshot.selection.clone(),
            summaries: snapshot.summaries.len(),
            has_code: snapshot
                .generated_code
                .as_ref()
                .is_some_and(|code| !code.is_blank()),
            can_generate_summaries: snapshot.can_generate_summaries(),
            can_submit: snapshot.can_submit(),
        }
    }
}

impl CommandOutput for StatusView {
    fn to_human(&self) -> String {
        let mut lines = vec![
            format!(
                "Repository:  {}",
                self.repository.as_deref().unwrap_or("(none)")
            ),
            format!("Files:       {}", self.files),
            format!("Selected:    {}", self.selection.len()),
        ];
        for path in &self.selection {
            lines.push(format!("  - {path}"));
        }
        lines.push(format!("Summaries:   {}", self.summaries));
        lines.push(format!(
            "Code:        {}",
            if self.has_code { "generated" } else { "(none)" }
        ));
        lines.push(format!(
            "Generate:    {}",
            readiness(self.can_generate_summaries)
        ));
        lines.push(format!("Submit:      {}", readiness(self.can_submit)));
        lines.join("\n")
    }
}
