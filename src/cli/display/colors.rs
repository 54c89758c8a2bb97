//! Status markers for CLI output.
//!
//! Styling goes through `console`, which drops colors when stdout is not a
//! terminal or `NO_COLOR` is set.

use console::{style, StyledObject};

/// Green check mark.
pub fn success_marker() -> StyledObject<&'static str> {
    style("\u{2713}").green().bold()
}

/// Red cross.
pub fn failure_marker() -> StyledObject<&'static str> {
    style("\u{2717}").red().bold()
}

/// Selection checkbox for a listing row.
pub fn selection_marker(selected: bool) -> StyledObject<&'static str> {
    if selected {
        style("[x]").green().bold()
    } else {
        style("[ ]").dim()
    }
}

/// Yes/no flag used by the status view.
pub fn readiness(ready: bool) -> StyledObject<&'static str> {
    if ready {
        style("ready").green()
    } else {
        style("not ready").dim()
    }
}
