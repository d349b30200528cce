//! In-memory rendering of a [`Grid`] with its structural columns

use crate::core::query::{GridQuery, RenderedCell};
use crate::error::ProbeResult;
use crate::types::{Grid, Layout, PhysicalCoordinate};

/// A grid laid out the way the data table renders it.
///
/// Row 0 is the header row. Every row starts with `leading_column_count`
/// structural cells; in data rows the last of them shows the row number.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedTable {
    layout: Layout,
    rows: Vec<Vec<RenderedCell>>,
}

impl RenderedTable {
    pub fn render(grid: &Grid, layout: Layout) -> Self {
        let leading = layout.leading_column_count;
        let width = leading + grid.headers.len();

        let mut rows = Vec::with_capacity(grid.rows.len() + 1);

        let mut header_row = vec![RenderedCell::new(""); leading];
        header_row.extend(grid.headers.iter().map(RenderedCell::new));
        rows.push(header_row);

        for (index, values) in grid.rows.iter().enumerate() {
            let mut row = Vec::with_capacity(width);
            row.extend(structural_cells(leading, index));
            for column in 0..grid.headers.len() {
                let cell = match values.get(column) {
                    Some(value) if value.is_non_string() => {
                        RenderedCell::non_string(value.display_text())
                    }
                    Some(value) => RenderedCell::new(value.display_text()),
                    None => RenderedCell::new(""),
                };
                row.push(cell);
            }
            rows.push(row);
        }

        Self { layout, rows }
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Number of rendered rows, header row included
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Vec<RenderedCell>] {
        &self.rows
    }
}

fn structural_cells(leading: usize, row_index: usize) -> Vec<RenderedCell> {
    (0..leading)
        .map(|position| {
            if position + 1 == leading {
                RenderedCell::new(format!("{}.", row_index + 1))
            } else {
                RenderedCell::new("")
            }
        })
        .collect()
}

impl GridQuery for RenderedTable {
    fn header_titles(&self) -> ProbeResult<Vec<String>> {
        Ok(self
            .rows
            .first()
            .map(|row| {
                row.iter()
                    .skip(self.layout.leading_column_count)
                    .map(|cell| cell.text.clone())
                    .collect()
            })
            .unwrap_or_default())
    }

    fn cell(&self, at: PhysicalCoordinate) -> ProbeResult<Option<RenderedCell>> {
        Ok(self
            .rows
            .get(at.row)
            .and_then(|row| row.get(at.column))
            .cloned())
    }

    fn layout(&self) -> Option<Layout> {
        Some(self.layout)
    }
}
