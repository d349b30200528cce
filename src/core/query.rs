//! The read capability the locator needs from a rendered table
//!
//! A browser driver, a recorded DOM snapshot or an in-memory [`RenderedTable`]
//! can all stand behind this trait.
//!
//! [`RenderedTable`]: crate::core::RenderedTable

use crate::error::ProbeResult;
use crate::types::{Layout, PhysicalCoordinate};

/// What a rendered cell shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedCell {
    pub text: String,
    /// Carries the non-string value marker (numbers, booleans, dates)
    pub non_string: bool,
}

impl RenderedCell {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            non_string: false,
        }
    }

    pub fn non_string(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            non_string: true,
        }
    }
}

pub trait GridQuery {
    /// Titles of the data column headers, in display order
    fn header_titles(&self) -> ProbeResult<Vec<String>>;

    /// The cell at `at`, or `None` if it is not rendered (yet)
    fn cell(&self, at: PhysicalCoordinate) -> ProbeResult<Option<RenderedCell>>;

    /// The layout the table was rendered with, when the query knows it
    fn layout(&self) -> Option<Layout> {
        None
    }
}

impl<T: GridQuery + ?Sized> GridQuery for &T {
    fn header_titles(&self) -> ProbeResult<Vec<String>> {
        (**self).header_titles()
    }

    fn cell(&self, at: PhysicalCoordinate) -> ProbeResult<Option<RenderedCell>> {
        (**self).cell(at)
    }

    fn layout(&self) -> Option<Layout> {
        (**self).layout()
    }
}
