//! `casegen session`: interactive, line-oriented workflow over stdin.
//!
//! Every engine operation is one command. Failures are reported and the
//! session keeps going; only `quit` or end of input ends it.

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::cli::display::{action_success, output, CommandOutput};
use crate::cli::models::{ChangeRequestView, CodeView, ListingView, StatusView, SummariesView};
use crate::cli::output::with_spinner;
use crate::cli::report_error;
use crate::domain::models::{Config, SummaryId};
use crate::domain::ports::GenerationService;
use crate::services::WorkflowEngine;

use super::build_engine;

const HELP: &str = "\
Commands:
  load <repository>   Fetch the repository's file listing (resets everything)
  files               Show the listing with the current selection
  toggle <path>       Select or deselect a file
  summaries           Generate test case summaries for the selected files
  code <id>           Generate test code for a summary
  submit              Open a pull request with the generated code
  status              Show where the workflow stands
  help                Show this help
  quit                Leave the session";

#[derive(Args, Debug)]
pub struct SessionArgs {
    /// Repository URL to load when the session starts
    pub repository: Option<String>,
}

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Load(String),
    Files,
    Toggle(String),
    Summaries,
    Code(String),
    Submit,
    Status,
    Help,
    Quit,
    Empty,
}

impl SessionCommand {
    /// Parse one line of input.
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim();
        let (verb, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(verb, rest)| (verb, rest.trim()));

        let command = match verb.to_lowercase().as_str() {
            "" => Self::Empty,
            "load" if !rest.is_empty() => Self::Load(rest.to_string()),
            "load" => anyhow::bail!("Usage: load <repository>"),
            "files" | "ls" => Self::Files,
            "toggle" | "t" if !rest.is_empty() => Self::Toggle(rest.to_string()),
            "toggle" | "t" => anyhow::bail!("Usage: toggle <path>"),
            "summaries" => Self::Summaries,
            "code" if !rest.is_empty() => Self::Code(rest.to_string()),
            "code" => anyhow::bail!("Usage: code <id>"),
            "submit" => Self::Submit,
            "status" => Self::Status,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => anyhow::bail!("Unknown command '{other}'. Type 'help' for the command list."),
        };
        Ok(command)
    }
}

/// Outcome of a toggle.
#[derive(Debug, Serialize)]
struct ToggleOutput {
    path: String,
    selected: bool,
    selection: Vec<String>,
}

impl CommandOutput for ToggleOutput {
    fn to_human(&self) -> String {
        let verb = if self.selected { "Selected" } else { "Deselected" };
        action_success(&format!(
            "{verb} {} ({} selected)",
            self.path,
            self.selection.len()
        ))
    }
}

/// A running session around one engine.
pub struct Session<S: GenerationService + 'static> {
    engine: Arc<WorkflowEngine<S>>,
    json_mode: bool,
    preview: Mutex<Option<JoinHandle<()>>>,
}

impl<S: GenerationService + 'static> Session<S> {
    pub fn new(engine: Arc<WorkflowEngine<S>>, json_mode: bool) -> Self {
        Self {
            engine,
            json_mode,
            preview: Mutex::new(None),
        }
    }

    /// Run one command, printing its result.
    pub async fn dispatch(&self, command: SessionCommand) -> Result<()> {
        let spin = !self.json_mode;
        match command {
            SessionCommand::Empty | SessionCommand::Quit => {}
            SessionCommand::Help => println!("{HELP}"),
            SessionCommand::Load(repository) => {
                self.cancel_preview().await;
                let files = with_spinner(
                    "Fetching files from the repository...",
                    spin,
                    self.engine.load_listing(&repository),
                )
                .await?;
                output(
                    &ListingView::new(repository.trim(), &files, &[]),
                    self.json_mode,
                );
            }
            SessionCommand::Files => {
                let snapshot = self.engine.snapshot().await;
                let repository = snapshot
                    .repository
                    .as_ref()
                    .map(ToString::to_string)
                    .context("No repository loaded yet. Use 'load <repository>' first.")?;
                output(
                    &ListingView::new(repository, &snapshot.files, &snapshot.selection),
                    self.json_mode,
                );
            }
            SessionCommand::Toggle(path) => {
                let selected = self.engine.toggle_selection(&path).await;
                if self.engine.settings().preview_on_toggle {
                    self.start_preview().await;
                }
                let selection = self.engine.snapshot().await.selection;
                output(
                    &ToggleOutput {
                        path,
                        selected,
                        selection,
                    },
                    self.json_mode,
                );
            }
            SessionCommand::Summaries => {
                let summaries = with_spinner(
                    "Generating test case summaries...",
                    spin,
                    self.engine.generate_summaries(),
                )
                .await?;
                output(&SummariesView { summaries }, self.json_mode);
            }
            SessionCommand::Code(raw_id) => {
                let summary_id: SummaryId = raw_id.parse()?;
                let code = with_spinner(
                    "Generating test case code...",
                    spin,
                    self.engine.generate_code(&summary_id),
                )
                .await?
                .with_context(|| format!("No summary with id '{raw_id}' in the current batch"))?;
                output(&CodeView::new(raw_id, &code), self.json_mode);
            }
            SessionCommand::Submit => {
                let change = with_spinner(
                    "Creating the pull request...",
                    spin,
                    self.engine.submit_change(),
                )
                .await?;
                output(&ChangeRequestView::from(change), self.json_mode);
            }
            SessionCommand::Status => {
                let snapshot = self.engine.snapshot().await;
                output(&StatusView::from(&snapshot), self.json_mode);
            }
        }
        Ok(())
    }

    /// Fetch the current selection's content in the background.
    ///
    /// A newer preview replaces an unfinished older one.
    async fn start_preview(&self) {
        let engine = Arc::clone(&self.engine);
        let handle = tokio::spawn(async move {
            match engine.preview_selection().await {
                Ok(contents) => debug!(files = contents.len(), "selection preview fetched"),
                Err(err) => warn!(error = %err, "selection preview failed"),
            }
        });
        if let Some(previous) = self.preview.lock().await.replace(handle) {
            previous.abort();
        }
    }

    async fn cancel_preview(&self) {
        if let Some(previous) = self.preview.lock().await.take() {
            previous.abort();
        }
    }

    /// Wait for the background preview, if one is running.
    pub async fn settle_preview(&self) {
        let handle = self.preview.lock().await.take();
        if let Some(handle) = handle {
            if let Err(err) = handle.await {
                if !err.is_cancelled() {
                    warn!(error = %err, "selection preview task failed");
                }
            }
        }
    }

    fn notify(&self, err: &anyhow::Error) {
        if self.json_mode {
            println!("{}", report_error(err));
        } else {
            eprintln!("{} {err:#}", style("\u{2717}").red().bold());
        }
    }

    fn prompt(&self) {
        if !self.json_mode {
            print!("{} ", style("casegen>").cyan().bold());
            let _ = std::io::stdout().flush();
        }
    }
}

pub async fn execute(args: SessionArgs, config: &Config, json_mode: bool) -> Result<()> {
    let session = Session::new(build_engine(config)?, json_mode);

    if let Some(repository) = args.repository {
        if let Err(err) = session.dispatch(SessionCommand::Load(repository)).await {
            session.notify(&err);
        }
    }
    if !json_mode {
        println!("Type 'help' for the command list.");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        session.prompt();
        let Some(line) = lines.next_line().await.context("Failed to read from stdin")? else {
            break;
        };

        match SessionCommand::parse(&line) {
            Ok(SessionCommand::Quit) => break,
            Ok(command) => {
                if let Err(err) = session.dispatch(command).await {
                    session.notify(&err);
                }
            }
            Err(err) => session.notify(&err),
        }
    }

    session.cancel_preview().await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockGenerationService, RecordedCall};
    use crate::domain::errors::WorkflowError;
    use crate::domain::models::WorkflowConfig;

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            SessionCommand::parse("load https://example.com/r").unwrap(),
            SessionCommand::Load("https://example.com/r".to_string())
        );
        assert_eq!(
            SessionCommand::parse("  toggle   src/a b.js ").unwrap(),
            SessionCommand::Toggle("src/a b.js".to_string())
        );
        assert_eq!(
            SessionCommand::parse("code 3").unwrap(),
            SessionCommand::Code("3".to_string())
        );
        assert_eq!(SessionCommand::parse("SUBMIT").unwrap(), SessionCommand::Submit);
        assert_eq!(SessionCommand::parse("").unwrap(), SessionCommand::Empty);
        assert_eq!(SessionCommand::parse("q").unwrap(), SessionCommand::Quit);
    }

    #[test]
    fn test_parse_rejects_missing_arguments() {
        assert!(SessionCommand::parse("load").is_err());
        assert!(SessionCommand::parse("toggle").is_err());
        assert!(SessionCommand::parse("code").is_err());
        assert!(SessionCommand::parse("frobnicate").is_err());
    }

    fn session(service: &Arc<MockGenerationService>, preview: bool) -> Session<MockGenerationService> {
        let settings = WorkflowConfig {
            preview_on_toggle: preview,
            ..WorkflowConfig::default()
        };
        Session::new(
            Arc::new(WorkflowEngine::new(Arc::clone(service), settings)),
            true,
        )
    }

    #[tokio::test]
    async fn test_toggle_starts_background_preview() {
        let service = Arc::new(
            MockGenerationService::new()
                .with_listing(["a.js"])
                .with_content("a.js", "A"),
        );
        let session = session(&service, true);

        session
            .dispatch(SessionCommand::Load("https://example.com/r".to_string()))
            .await
            .unwrap();
        session
            .dispatch(SessionCommand::Toggle("a.js".to_string()))
            .await
            .unwrap();
        session.settle_preview().await;

        assert!(service.calls().await.contains(&RecordedCall::FetchContent {
            repository: "https://example.com/r".to_string(),
            path: "a.js".to_string(),
        }));
    }

    #[tokio::test]
    async fn test_toggle_without_preview_makes_no_calls() {
        let service = Arc::new(MockGenerationService::new().with_listing(["a.js"]));
        let session = session(&service, false);

        session
            .dispatch(SessionCommand::Load("https://example.com/r".to_string()))
            .await
            .unwrap();
        service.clear_calls().await;
        session
            .dispatch(SessionCommand::Toggle("a.js".to_string()))
            .await
            .unwrap();
        session.settle_preview().await;

        assert!(service.calls().await.is_empty());
    }

    #[tokio::test]
    async fn test_settle_preview_absorbs_panicked_task() {
        let service = Arc::new(MockGenerationService::new());
        let session = session(&service, true);
        *session.preview.lock().await = Some(tokio::spawn(async {
            panic!("preview blew up");
        }));

        session.settle_preview().await;

        assert!(session.preview.lock().await.is_none());
    }

    #[tokio::test]
    async fn test_submit_without_code_is_reported_not_fatal() {
        let service = Arc::new(MockGenerationService::new());
        let session = session(&service, false);

        let err = session.dispatch(SessionCommand::Submit).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<WorkflowError>(),
            Some(WorkflowError::NoGeneratedCode)
        ));

        session.dispatch(SessionCommand::Status).await.unwrap();
    }
}
