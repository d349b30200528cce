//! CSS selectors for the rendered data table
//!
//! A browser-backed [`GridQuery`](crate::core::GridQuery) uses these to find
//! the elements behind a coordinate.

use crate::types::PhysicalCoordinate;

pub const DATA_TABLE: &str = "table.data-table";

/// Header cell carrying `column_name` as its title
pub fn header(column_name: &str) -> String {
    format!(
        "{} thead th[title=\"{}\"]",
        DATA_TABLE,
        escape_attribute(column_name)
    )
}

/// Body cell at `at`.
///
/// `nth-child` counts from 1. The header row lives in `thead`, so physical
/// row `r` is already the `r`-th body row; the column needs the shift.
pub fn cell(at: PhysicalCoordinate) -> String {
    format!(
        "{} tbody tr:nth-child({}) td:nth-child({})",
        DATA_TABLE,
        at.row,
        at.column + 1
    )
}

/// The span holding the displayed value of the cell at `at`
pub fn cell_content(at: PhysicalCoordinate) -> String {
    format!("{} div.data-table-cell-content > span", cell(at))
}

/// Marker present when the cell at `at` holds a non-string value
pub fn non_string_marker(at: PhysicalCoordinate) -> String {
    format!("{} .data-table-value-nonstring", cell(at))
}

fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if c == '"' || c == '\\' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
