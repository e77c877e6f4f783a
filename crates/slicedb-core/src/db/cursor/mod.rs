//! Module: cursor
//! Responsibility: exhaustive, resumable traversal of one row's columns.
//! Does not own: page boundaries (see `db::page`) or store retries policy
//! beyond what `CursorOptions` carries.

mod error;
mod options;
mod prefetch;
mod sequential;


pub use error::CursorError;
pub use options::CursorOptions;
pub use prefetch::PrefetchCursor;
pub use sequential::SequentialCursor;

use crate::db::column::Column;

///
/// ColumnCursor
///
/// Restartable, finite column source. `next_column` returns `Ok(None)` once
/// the row is done and keeps returning it until `rewind`.
///

pub trait ColumnCursor {
    type Key;
    type Value;

    fn next_column(&mut self) -> Result<Option<Column<Self::Key, Self::Value>>, CursorError>;

    /// Reset to the initial offset and clear exhaustion.
    fn rewind(&mut self);

    fn is_exhausted(&self) -> bool;

    /// Borrow the cursor as a lazy iterator of fallible columns.
    fn columns(&mut self) -> Columns<'_, Self>
    where
        Self: Sized,
    {
        Columns { cursor: self }
    }

    /// Drain every remaining column.
    fn collect_remaining(&mut self) -> Result<Vec<Column<Self::Key, Self::Value>>, CursorError>
    where
        Self: Sized,
    {
        self.columns().collect()
    }
}

///
/// Columns
///
/// Iterator view over a borrowed cursor. A store failure is yielded as
/// `Some(Err(_))`; pulling again retries from the same boundary.
///

pub struct Columns<'a, C> {
    cursor: &'a mut C,
}

impl<C: ColumnCursor> Iterator for Columns<'_, C> {
    type Item = Result<Column<C::Key, C::Value>, CursorError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.cursor.next_column().transpose()
    }
}
