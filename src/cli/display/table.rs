//! Table builder wrapper around comfy-table for consistent list display.

use comfy_table::{presets, Cell, CellAlignment, ContentArrangement, Table};
use console::style;

/// Create a standard list table with the given headers.
///
/// Uses the NOTHING preset (no borders) for a clean CLI aesthetic.
pub fn list_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::NOTHING)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            headers
                .iter()
                .map(|h| Cell::new(h.to_uppercase()).set_alignment(CellAlignment::Left)),
        );
    table
}

/// Render the table to string with a count header.
pub fn render_list(entity_name: &str, table: &Table, total: usize) -> String {
    if total == 0 {
        return format!("No {} found.", plural(entity_name));
    }
    let noun = if total == 1 {
        entity_name.to_string()
    } else {
        plural(entity_name)
    };
    format!("{} {}:\n{}", style(total).bold(), noun, table)
}

fn plural(noun: &str) -> String {
    noun.strip_suffix('y')
        .map_or_else(|| format!("{noun}s"), |stem| format!("{stem}ies"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_empty_list() {
        let table = list_table(&["path"]);
        assert_eq!(render_list("file", &table, 0), "No files found.");
    }

    #[test]
    fn test_plural() {
        assert_eq!(plural("file"), "files");
        assert_eq!(plural("summary"), "summaries");
    }

    #[test]
    fn test_render_list_includes_rows() {
        let mut table = list_table(&["path"]);
        table.add_row(vec!["src/a.js"]);
        let rendered = render_list("file", &table, 1);
        assert!(rendered.contains("file:"));
        assert!(rendered.contains("src/a.js"));
        assert!(rendered.contains("PATH"));
    }
}
