//! Spinner utilities using indicatif for long remote operations.

use std::future::Future;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

const SPINNER_TEMPLATE: &str = "{spinner:.green} {msg} [{elapsed}]";
const SPINNER_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ";

/// Create a spinner for an indeterminate operation.
///
/// Draws to stderr. A hidden bar is returned when `enabled` is false, so
/// callers in JSON mode can use the same code path.
pub fn create_spinner(message: impl Into<String>, enabled: bool) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }

    let style = ProgressStyle::default_spinner()
        .template(SPINNER_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars(SPINNER_CHARS);
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(style);
    spinner.set_message(message.into());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

/// Await `fut` behind a spinner, clearing it once the future resolves.
pub async fn with_spinner<F, T>(message: &str, enabled: bool, fut: F) -> T
where
    F: Future<Output = T>,
{
    let spinner = create_spinner(message, enabled);
    let result = fut.await;
    spinner.finish_and_clear();
    result
}
