//! `casegen run`: the whole workflow in one non-interactive pass.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use crate::cli::display::{output, CommandOutput};
use crate::cli::models::{ChangeRequestView, CodeView, ListingView, SummariesView};
use crate::cli::output::with_spinner;
use crate::domain::models::{Config, SummaryId};

use super::build_engine;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Repository URL
    pub repository: String,

    /// File to include in the selection (repeatable, order is kept)
    #[arg(short, long = "select", value_name = "PATH", required = true)]
    pub select: Vec<String>,

    /// Summary id to generate test code for
    #[arg(short = 'S', long, value_name = "ID")]
    pub summary: Option<String>,

    /// Open a pull request with the generated code
    #[arg(long, requires = "summary")]
    pub submit: bool,
}

/// Everything a run produced, stage by stage.
#[derive(Debug, Serialize)]
pub struct RunOutput {
    pub listing: ListingView,
    pub summaries: SummariesView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<CodeView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_request: Option<ChangeRequestView>,
}

impl CommandOutput for RunOutput {
    fn to_human(&self) -> String {
        let mut sections = vec![self.listing.to_human(), self.summaries.to_human()];
        if let Some(code) = &self.code {
            sections.push(code.to_human());
        }
        if let Some(change) = &self.change_request {
            sections.push(change.to_human());
        }
        sections.join("\n\n")
    }
}

pub async fn execute(args: RunArgs, config: &Config, json_mode: bool) -> Result<()> {
    let engine = build_engine(config)?;
    let spin = !json_mode;

    let files = with_spinner(
        "Fetching files from the repository...",
        spin,
        engine.load_listing(&args.repository),
    )
    .await?;

    for path in &args.select {
        if !files.iter().any(|entry| &entry.path == path) {
            tracing::warn!(path = %path, "selected path is not in the repository listing");
        }
        // A path given twice would toggle back off.
        if !engine.toggle_selection(path).await {
            engine.toggle_selection(path).await;
        }
    }

    let summaries = with_spinner(
        "Generating test case summaries...",
        spin,
        engine.generate_summaries(),
    )
    .await?;

    let snapshot = engine.snapshot().await;
    let mut result = RunOutput {
        listing: ListingView::new(args.repository.trim(), &snapshot.files, &snapshot.selection),
        summaries: SummariesView { summaries },
        code: None,
        change_request: None,
    };

    if let Some(raw_id) = args.summary.as_deref() {
        let summary_id: SummaryId = raw_id.parse()?;
        let code = with_spinner(
            "Generating test case code...",
            spin,
            engine.generate_code(&summary_id),
        )
        .await?
        .with_context(|| format!("No summary with id '{raw_id}' in the generated batch"))?;
        result.code = Some(CodeView::new(raw_id.trim(), &code));

        if args.submit {
            let change = with_spinner(
                "Creating the pull request...",
                spin,
                engine.submit_change(),
            )
            .await?;
            result.change_request = Some(change.into());
        }
    }

    output(&result, json_mode);
    Ok(())
}
