//! Table cell locator tests
//!
//! Address arithmetic, the null display rule and exact comparison, checked
//! against in-memory rendered tables.

use gridprobe::core::{GridQuery, PollPolicy, RenderedCell, RenderedTable, TableCellLocator};
use gridprobe::types::{CellValue, Grid, Layout, PhysicalCoordinate};
use gridprobe::ProbeError;
use pretty_assertions::assert_eq;

fn grid(headers: &[&str]) -> Grid {
    Grid::new(headers.iter().map(|h| h.to_string()).collect())
}

fn people() -> Grid {
    grid(&["Name", "Age", "City"])
        .with_row(vec![
            CellValue::text("Alice"),
            CellValue::non_string("30"),
            CellValue::text("Oslo"),
        ])
        .with_row(vec![
            CellValue::text("Bob"),
            CellValue::Null,
            CellValue::text("Lima"),
        ])
}

fn locator(table: &RenderedTable) -> TableCellLocator<&RenderedTable> {
    TableCellLocator::new(table).with_poll(PollPolicy::immediate())
}

// ═══════════════════════════════════════════════════════════════════════════
// RESOLVE
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_resolve_age_example() {
    let table = RenderedTable::render(&people(), Layout::default());
    assert_eq!(
        locator(&table).resolve(0, "Age").unwrap(),
        PhysicalCoordinate::new(1, 4)
    );
}

#[test]
fn test_resolve_every_header_and_row() {
    let headers = ["a", "b", "c", "d", "e", "f"];
    let table = RenderedTable::render(&grid(&headers), Layout::default());
    let locator = locator(&table);

    for (index, header) in headers.iter().enumerate() {
        for row in [0usize, 1, 9, 250] {
            let at = locator.resolve(row, header).unwrap();
            assert_eq!(at.row, row + 1);
            assert_eq!(at.column, index + 3);
        }
    }
}

#[test]
fn test_resolve_missing_column_for_any_row() {
    let table = RenderedTable::render(&people(), Layout::default());
    let locator = locator(&table);
    for row in [0usize, 1, 100] {
        assert!(matches!(
            locator.resolve(row, "Country"),
            Err(ProbeError::Lookup { .. })
        ));
    }
}

#[test]
fn test_resolve_on_empty_header_list() {
    let table = RenderedTable::render(&Grid::default(), Layout::default());
    match locator(&table).resolve(0, "Name") {
        Err(ProbeError::Lookup { available, .. }) => assert!(available.is_empty()),
        other => panic!("expected lookup error, got {other:?}"),
    }
}

#[test]
fn test_resolve_twice_is_identical() {
    let table = RenderedTable::render(&people(), Layout::default());
    let locator = locator(&table);
    assert_eq!(
        locator.resolve(3, "City").unwrap(),
        locator.resolve(3, "City").unwrap()
    );
}

#[test]
fn test_lookup_error_message_lists_headers() {
    let table = RenderedTable::render(&people(), Layout::default());
    let err = locator(&table).resolve(0, "Country").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Column 'Country' not found (available: Name, Age, City)"
    );
}

// ═══════════════════════════════════════════════════════════════════════════
// GET / ASSERT
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_null_cell_reads_and_asserts_as_null() {
    let table = RenderedTable::render(&people(), Layout::default());
    let locator = locator(&table);
    assert_eq!(locator.get_value(1, "Age").unwrap(), "null");
    assert!(locator.assert_value(1, "Age", None).is_ok());
}

#[test]
fn test_null_expectation_only_matches_literal_null() {
    let grid = grid(&["A"])
        .with_row(vec![CellValue::text("")])
        .with_row(vec![CellValue::text("null")])
        .with_row(vec![CellValue::text("NULL")]);
    let table = RenderedTable::render(&grid, Layout::default());
    let locator = locator(&table);

    assert!(locator.assert_value(0, "A", None).is_err());
    assert!(locator.assert_value(1, "A", None).is_ok());
    assert!(locator.assert_value(2, "A", None).is_err());
}

#[test]
fn test_text_expectation_is_exact() {
    let grid = grid(&["A"]).with_row(vec![CellValue::text("foo")]);
    let table = RenderedTable::render(&grid, Layout::default());
    let locator = locator(&table);

    assert!(locator.assert_value(0, "A", Some("foo")).is_ok());
    for wrong in ["Foo", "foo ", " foo", "fo", ""] {
        assert!(
            locator.assert_value(0, "A", Some(wrong)).is_err(),
            "{wrong:?} should not match"
        );
    }
}

#[test]
fn test_assertion_error_message_shows_both_values() {
    let table = RenderedTable::render(&people(), Layout::default());
    let err = locator(&table)
        .assert_value(0, "Name", Some("Alicia"))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Assertion failed at (1, 3): expected \"Alicia\", got \"Alice\""
    );
}

#[test]
fn test_layout_drives_the_offset() {
    let layout = Layout::with_leading_columns(5);
    let table = RenderedTable::render(&people(), layout);
    let locator = locator(&table).with_layout(layout);
    assert_eq!(locator.resolve(0, "Name").unwrap(), PhysicalCoordinate::new(1, 5));
    assert_eq!(locator.get_value(1, "City").unwrap(), "Lima");
}

// ═══════════════════════════════════════════════════════════════════════════
// CUSTOM QUERIES
// ═══════════════════════════════════════════════════════════════════════════

/// A query answering from fixed headers and a single rendered cell
struct OneCell {
    headers: Vec<String>,
    at: PhysicalCoordinate,
    cell: RenderedCell,
}

impl GridQuery for OneCell {
    fn header_titles(&self) -> gridprobe::ProbeResult<Vec<String>> {
        Ok(self.headers.clone())
    }

    fn cell(&self, at: PhysicalCoordinate) -> gridprobe::ProbeResult<Option<RenderedCell>> {
        Ok((at == self.at).then(|| self.cell.clone()))
    }
}

#[test]
fn test_locator_over_custom_query() {
    let query = OneCell {
        headers: vec!["x".into(), "y".into()],
        at: PhysicalCoordinate::new(3, 4),
        cell: RenderedCell::non_string("12"),
    };
    let locator = TableCellLocator::new(&query).with_poll(PollPolicy::immediate());

    assert_eq!(locator.get_value(2, "y").unwrap(), "12");
    assert!(locator.assert_not_string(2, "y").is_ok());
    assert!(matches!(
        locator.get_value(0, "y"),
        Err(ProbeError::Timeout { .. })
    ));
}
