//! File name proposed for submitted test code.

use chrono::{DateTime, Utc};

/// `<prefix>-<unix millis>.<extension>`.
///
/// Uniqueness is best effort. Two submissions in the same millisecond collide,
/// and resolving that is left to the service.
pub fn generated_file_name(prefix: &str, extension: &str, now: DateTime<Utc>) -> String {
    let extension = extension.trim_start_matches('.');
    format!("{prefix}-{}.{extension}", now.timestamp_millis())
}
