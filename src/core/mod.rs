//! Cell addressing, rendering and polling

pub mod assertions;
pub mod locator;
pub mod poll;
pub mod query;
pub mod render;

pub use locator::TableCellLocator;
pub use poll::PollPolicy;
pub use query::{GridQuery, RenderedCell};
pub use render::RenderedTable;
