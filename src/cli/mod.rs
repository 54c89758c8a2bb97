//! Command-line interface.

pub mod commands;
pub mod display;
pub mod models;
pub mod output;
pub mod types;

use console::style;
use serde_json::json;

use crate::domain::errors::WorkflowError;

pub use types::{Cli, Commands};

/// Structured form of an error for JSON output.
///
/// Workflow failures carry their kind and, for remote failures, the stage
/// and HTTP status.
pub fn report_error(err: &anyhow::Error) -> serde_json::Value {
    let mut report = json!({ "error": format!("{err:#}") });
    if let Some(workflow) = err.downcast_ref::<WorkflowError>() {
        report["kind"] = json!(workflow.kind());
        if let Some(stage) = workflow.stage() {
            report["stage"] = json!(stage);
        }
        if let Some(status) = workflow.service_error().and_then(|e| e.status()) {
            report["status"] = json!(status);
        }
    }
    report
}

/// Print `err` and exit with status 1.
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    if json_mode {
        eprintln!(
            "{}",
            serde_json::to_string_pretty(&report_error(&err)).unwrap_or_default()
        );
    } else {
        eprintln!("{} {err:#}", style("Error:").red().bold());
    }
    std::process::exit(1)
}
