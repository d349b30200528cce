//! Table Cell Locator
//!
//! Translates a logical cell address (row index, column name) into a
//! physical position in the rendered table and reads or asserts the text
//! displayed there.
//!
//! # Example
//!
//! ```
//! use gridprobe::core::{RenderedTable, TableCellLocator};
//! use gridprobe::types::{CellValue, Grid, Layout, PhysicalCoordinate};
//!
//! let grid = Grid::new(vec!["Name".into(), "Age".into(), "City".into()])
//!     .with_row(vec![CellValue::text("Alice"), CellValue::Null, CellValue::text("Oslo")]);
//! let table = RenderedTable::render(&grid, Layout::default());
//! let locator = TableCellLocator::new(&table);
//!
//! assert_eq!(locator.resolve(0, "Age")?, PhysicalCoordinate::new(1, 4));
//! assert_eq!(locator.get_value(0, "Age")?, "null");
//! locator.assert_value(0, "Age", None)?;
//! # Ok::<(), gridprobe::ProbeError>(())
//! ```

use tracing::{debug, warn};

use crate::core::poll::PollPolicy;
use crate::core::query::{GridQuery, RenderedCell};
use crate::error::{ProbeError, ProbeResult};
use crate::types::{Layout, LogicalCoordinate, PhysicalCoordinate, NULL_DISPLAY_TEXT};

/// Stateless locator over an injected [`GridQuery`]
#[derive(Debug, Clone)]
pub struct TableCellLocator<Q> {
    query: Q,
    layout: Layout,
    poll: PollPolicy,
}

impl<Q: GridQuery> TableCellLocator<Q> {
    /// Takes the layout from `query` when it reports one, the default otherwise
    pub fn new(query: Q) -> Self {
        let layout = query.layout().unwrap_or_default();
        Self {
            query,
            layout,
            poll: PollPolicy::default(),
        }
    }

    /// Override the layout. A query that reports its own layout keeps it.
    #[must_use]
    pub fn with_layout(mut self, layout: Layout) -> Self {
        match self.query.layout() {
            Some(rendered) if rendered != layout => {
                warn!(
                    requested = layout.leading_column_count,
                    rendered = rendered.leading_column_count,
                    "layout differs from the rendered table, keeping the table's"
                );
                self.layout = rendered;
            }
            _ => self.layout = layout,
        }
        self
    }

    #[must_use]
    pub fn with_poll(mut self, poll: PollPolicy) -> Self {
        self.poll = poll;
        self
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn query(&self) -> &Q {
        &self.query
    }

    pub fn headers(&self) -> ProbeResult<Vec<String>> {
        self.query.header_titles()
    }

    /// Physical position of `column_name` in row `row_index`.
    ///
    /// Header titles match exactly; with duplicate titles the first wins.
    /// Row bounds are not checked here.
    pub fn resolve(&self, row_index: usize, column_name: &str) -> ProbeResult<PhysicalCoordinate> {
        let logical = LogicalCoordinate::new(row_index, column_name);
        let headers = self.query.header_titles()?;

        let mut positions = headers
            .iter()
            .enumerate()
            .filter(|(_, title)| title.as_str() == logical.column_name)
            .map(|(index, _)| index);
        let first = positions.next();
        let duplicates = positions.count();

        let Some(header_index) = first else {
            return Err(ProbeError::Lookup {
                column: column_name.to_string(),
                available: headers,
            });
        };

        if duplicates > 0 {
            warn!(
                column = column_name,
                matches = duplicates + 1,
                "duplicate header titles, using the first"
            );
        }

        let at = PhysicalCoordinate::new(
            logical.row_index + 1,
            header_index + self.layout.leading_column_count,
        );
        debug!("resolved {} to {}", logical, at);
        Ok(at)
    }

    /// Displayed text of a cell; a null cell reads as `"null"`
    pub fn get_value(&self, row_index: usize, column_name: &str) -> ProbeResult<String> {
        let at = self.resolve(row_index, column_name)?;
        Ok(self.wait_for_cell(at)?.text)
    }

    /// Check the displayed text of a cell.
    ///
    /// `None` expects the literal text `"null"`. Comparison is exact.
    pub fn assert_value(
        &self,
        row_index: usize,
        column_name: &str,
        expected: Option<&str>,
    ) -> ProbeResult<()> {
        let at = self.resolve(row_index, column_name)?;
        let expected = expected.unwrap_or(NULL_DISPLAY_TEXT);

        self.poll.until(&format!("cell {at}"), || {
            let Some(cell) = self.query.cell(at)? else {
                return Ok(None);
            };
            if cell.text == expected {
                Ok(Some(()))
            } else {
                Err(ProbeError::assertion_at(at, expected, &cell.text))
            }
        })
    }

    /// Check that a cell holds a non-string value (number, boolean, date)
    pub fn assert_not_string(&self, row_index: usize, column_name: &str) -> ProbeResult<()> {
        let at = self.resolve(row_index, column_name)?;

        self.poll.until(&format!("cell {at}"), || {
            let Some(cell) = self.query.cell(at)? else {
                return Ok(None);
            };
            if cell.non_string {
                Ok(Some(()))
            } else {
                Err(ProbeError::assertion_at(
                    at,
                    "a non-string value",
                    &format!("string {:?}", cell.text),
                ))
            }
        })
    }

    fn wait_for_cell(&self, at: PhysicalCoordinate) -> ProbeResult<RenderedCell> {
        self.poll
            .until(&format!("cell {at}"), || self.query.cell(at))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RenderedTable;
    use crate::types::{CellValue, Grid};
    use pretty_assertions::assert_eq;
    use std::cell::Cell;
    use std::time::Duration;

    fn people() -> Grid {
        Grid::new(vec!["Name".into(), "Age".into(), "City".into()])
            .with_row(vec![
                CellValue::text("Alice"),
                CellValue::non_string("30"),
                CellValue::text("Oslo"),
            ])
            .with_row(vec![
                CellValue::text("Bob"),
                CellValue::Null,
                CellValue::text(" Lima "),
            ])
    }

    fn locator(table: &RenderedTable) -> TableCellLocator<&RenderedTable> {
        TableCellLocator::new(table).with_poll(PollPolicy::immediate())
    }

    #[test]
    fn test_resolve_adds_leading_columns_and_header_row() {
        let table = RenderedTable::render(&people(), Layout::default());
        let locator = locator(&table);
        assert_eq!(locator.resolve(0, "Age").unwrap(), PhysicalCoordinate::new(1, 4));
        assert_eq!(locator.resolve(0, "Name").unwrap(), PhysicalCoordinate::new(1, 3));
        assert_eq!(locator.resolve(5, "City").unwrap(), PhysicalCoordinate::new(6, 5));
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let table = RenderedTable::render(&people(), Layout::default());
        let locator = locator(&table);
        let first = locator.resolve(1, "City").unwrap();
        let second = locator.resolve(1, "City").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_resolve_unknown_column() {
        let table = RenderedTable::render(&people(), Layout::default());
        let err = locator(&table).resolve(0, "Country").unwrap_err();
        match err {
            ProbeError::Lookup { column, available } => {
                assert_eq!(column, "Country");
                assert_eq!(available, vec!["Name", "Age", "City"]);
            }
            other => panic!("expected lookup error, got {other:?}"),
        }
    }

    #[test]
    fn test_resolve_is_case_sensitive() {
        let table = RenderedTable::render(&people(), Layout::default());
        assert!(matches!(
            locator(&table).resolve(0, "age"),
            Err(ProbeError::Lookup { .. })
        ));
    }

    #[test]
    fn test_resolve_duplicate_headers_first_wins() {
        let grid = Grid::new(vec!["A".into(), "B".into(), "A".into()]);
        let table = RenderedTable::render(&grid, Layout::default());
        assert_eq!(locator(&table).resolve(0, "A").unwrap(), PhysicalCoordinate::new(1, 3));
    }

    #[test]
    fn test_resolve_with_custom_layout() {
        let table = RenderedTable::render(&people(), Layout::with_leading_columns(1));
        let locator = locator(&table).with_layout(Layout::with_leading_columns(1));
        assert_eq!(locator.resolve(0, "Age").unwrap(), PhysicalCoordinate::new(1, 2));
        assert_eq!(locator.get_value(0, "Age").unwrap(), "30");
    }

    #[test]
    fn test_locator_follows_table_layout() {
        let table = RenderedTable::render(&people(), Layout::with_leading_columns(1));
        let locator = locator(&table);
        assert_eq!(locator.layout(), Layout::with_leading_columns(1));
        assert_eq!(locator.get_value(0, "Name").unwrap(), "Alice");
    }

    #[test]
    fn test_conflicting_layout_keeps_table_layout() {
        let table = RenderedTable::render(&people(), Layout::with_leading_columns(1));
        let locator = locator(&table).with_layout(Layout::default());
        assert_eq!(locator.layout(), Layout::with_leading_columns(1));
        assert_eq!(locator.resolve(0, "Age").unwrap(), PhysicalCoordinate::new(1, 2));
        assert_eq!(locator.get_value(0, "Age").unwrap(), "30");
    }

    #[test]
    fn test_layout_applies_to_queries_without_one() {
        let slow = SlowTable {
            inner: RenderedTable::render(&people(), Layout::with_leading_columns(1)),
            reads_before_ready: 0,
            reads: Cell::new(0),
        };
        let locator = TableCellLocator::new(&slow)
            .with_poll(PollPolicy::immediate())
            .with_layout(Layout::with_leading_columns(1));
        assert_eq!(locator.get_value(0, "City").unwrap(), "Oslo");
    }

    #[test]
    fn test_get_value() {
        let table = RenderedTable::render(&people(), Layout::default());
        let locator = locator(&table);
        assert_eq!(locator.get_value(0, "Name").unwrap(), "Alice");
        assert_eq!(locator.get_value(1, "City").unwrap(), " Lima ");
    }

    #[test]
    fn test_get_value_null_reads_literal_null() {
        let table = RenderedTable::render(&people(), Layout::default());
        assert_eq!(locator(&table).get_value(1, "Age").unwrap(), "null");
    }

    #[test]
    fn test_get_value_missing_row_times_out() {
        let table = RenderedTable::render(&people(), Layout::default());
        assert!(matches!(
            locator(&table).get_value(7, "Name"),
            Err(ProbeError::Timeout { .. })
        ));
    }

    #[test]
    fn test_assert_value_null_expects_literal_null() {
        let table = RenderedTable::render(&people(), Layout::default());
        let locator = locator(&table);
        assert!(locator.assert_value(1, "Age", None).is_ok());
        assert!(locator.assert_value(1, "Age", Some("null")).is_ok());
        assert!(locator.assert_value(1, "Age", Some("")).is_err());
        assert!(locator.assert_value(0, "Age", None).is_err());
    }

    #[test]
    fn test_assert_value_is_exact() {
        let table = RenderedTable::render(&people(), Layout::default());
        let locator = locator(&table);
        assert!(locator.assert_value(0, "Name", Some("Alice")).is_ok());
        assert!(locator.assert_value(0, "Name", Some("alice")).is_err());
        assert!(locator.assert_value(1, "City", Some("Lima")).is_err());
        assert!(locator.assert_value(1, "City", Some(" Lima ")).is_ok());
    }

    #[test]
    fn test_assert_value_reports_expected_and_actual() {
        let table = RenderedTable::render(&people(), Layout::default());
        let err = locator(&table).assert_value(0, "City", Some("Bergen")).unwrap_err();
        match err {
            ProbeError::Assertion { at, expected, actual } => {
                assert_eq!(at, "(1, 5)");
                assert_eq!(expected, "Bergen");
                assert_eq!(actual, "Oslo");
            }
            other => panic!("expected assertion error, got {other:?}"),
        }
    }

    #[test]
    fn test_assert_value_unknown_column_is_lookup_error() {
        let table = RenderedTable::render(&people(), Layout::default());
        assert!(matches!(
            locator(&table).assert_value(0, "Country", Some("x")),
            Err(ProbeError::Lookup { .. })
        ));
    }

    #[test]
    fn test_assert_not_string() {
        let table = RenderedTable::render(&people(), Layout::default());
        let locator = locator(&table);
        assert!(locator.assert_not_string(0, "Age").is_ok());
        assert!(matches!(
            locator.assert_not_string(0, "Name"),
            Err(ProbeError::Assertion { .. })
        ));
        // null is not a non-string value
        assert!(locator.assert_not_string(1, "Age").is_err());
    }

    /// Renders its cells only after a few reads, like a table still loading
    struct SlowTable {
        inner: RenderedTable,
        reads_before_ready: usize,
        reads: Cell<usize>,
    }

    impl GridQuery for SlowTable {
        fn header_titles(&self) -> ProbeResult<Vec<String>> {
            self.inner.header_titles()
        }

        fn cell(&self, at: PhysicalCoordinate) -> ProbeResult<Option<RenderedCell>> {
            self.reads.set(self.reads.get() + 1);
            if self.reads.get() <= self.reads_before_ready {
                return Ok(None);
            }
            self.inner.cell(at)
        }
    }

    #[test]
    fn test_polls_until_cell_renders() {
        let slow = SlowTable {
            inner: RenderedTable::render(&people(), Layout::default()),
            reads_before_ready: 3,
            reads: Cell::new(0),
        };
        let locator = TableCellLocator::new(&slow)
            .with_poll(PollPolicy::new(Duration::from_secs(2), Duration::from_millis(1)));
        assert_eq!(locator.get_value(0, "City").unwrap(), "Oslo");
        assert_eq!(slow.reads.get(), 4);
    }

    #[test]
    fn test_never_rendered_cell_times_out() {
        let slow = SlowTable {
            inner: RenderedTable::render(&people(), Layout::default()),
            reads_before_ready: usize::MAX,
            reads: Cell::new(0),
        };
        let locator = TableCellLocator::new(&slow)
            .with_poll(PollPolicy::new(Duration::from_millis(15), Duration::from_millis(1)));
        assert!(matches!(
            locator.assert_value(0, "City", Some("Oslo")),
            Err(ProbeError::Timeout { .. })
        ));
    }
}
