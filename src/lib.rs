//! gridprobe - end-to-end test helpers for data-table web UIs
//!
//! The core is a table cell locator: it maps a logical cell address
//! (row index, column name) to a physical position in the rendered table and
//! reads or asserts the text displayed there, through an injected
//! [`GridQuery`](core::GridQuery).
//!
//! # Features
//!
//! - Header-driven column lookup with a configurable count of leading
//!   structural columns
//! - Null cells asserted against the literal text `"null"`
//! - In-memory rendering of CSV, YAML and JSON fixtures
//! - YAML scenarios composing locator steps
//!
//! # Example
//!
//! ```no_run
//! use gridprobe::core::{RenderedTable, TableCellLocator};
//! use gridprobe::fixture;
//! use gridprobe::types::Layout;
//! use std::path::Path;
//!
//! let grid = fixture::load(Path::new("people.csv"))?;
//! let table = RenderedTable::render(&grid, Layout::default());
//! let locator = TableCellLocator::new(&table);
//!
//! let at = locator.resolve(0, "Age")?;
//! println!("Age of row 0 lives at {at}");
//! locator.assert_value(0, "Age", Some("30"))?;
//! # Ok::<(), gridprobe::ProbeError>(())
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod fixture;
pub mod navigation;
pub mod scenario;
pub mod selectors;
pub mod types;

// Re-export commonly used types
pub use error::{ProbeError, ProbeResult};
pub use types::{CellValue, Grid, Layout, PhysicalCoordinate};
