//! Module: page
//! Responsibility: fixed-size pages over one row, navigable in both
//! directions, plus stateless request/response page windows.
//! Does not own: exhaustive traversal (see `db::cursor`).
//!
//! Every page fetch asks for `page_size + 2` columns: one extra proves a
//! following page exists, the other proves a preceding one does.

mod column_page;
mod error;
mod navigate;

#[cfg(test)]
mod tests;

pub use column_page::ColumnPage;
pub use error::PageError;
pub use navigate::{PageWindow, next_page, previous_page};

/// Columns requested for one page view.
pub(crate) const fn overfetch(page_size: usize) -> usize {
    page_size.saturating_add(2)
}
