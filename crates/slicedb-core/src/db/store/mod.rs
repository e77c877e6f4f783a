//! Module: store
//! Responsibility: the column store boundary consumed by cursors and pages.
//! Does not own: pagination semantics, retry budgets exposed to callers.
//! Boundary: `ColumnStore::fetch_slice` is the only store primitive the engine uses.

mod error;
mod fetch;
mod memory;
mod slice;


pub use error::StoreError;
pub(crate) use fetch::{RetryPolicy, fetch_slice};
pub use memory::MemoryColumnStore;
pub use slice::Slice;

use crate::db::{column::ColumnBound, direction::Direction};
use std::{fmt, sync::Arc};

///
/// SliceRequest
///
/// One `fetch_slice` call: up to `max_count` columns starting at `from`
/// (inclusive when it names an existing column), walking in `direction`.
///

pub struct SliceRequest<'a, K> {
    pub from: ColumnBound<&'a K>,
    pub max_count: usize,
    pub direction: Direction,
}

impl<'a, K> SliceRequest<'a, K> {
    #[must_use]
    pub const fn new(from: ColumnBound<&'a K>, max_count: usize, direction: Direction) -> Self {
        Self {
            from,
            max_count,
            direction,
        }
    }

    #[must_use]
    pub const fn is_reversed(&self) -> bool {
        self.direction.is_reversed()
    }
}

impl<K> Clone for SliceRequest<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for SliceRequest<'_, K> {}

impl<K: fmt::Debug> fmt::Debug for SliceRequest<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SliceRequest")
            .field("from", &self.from)
            .field("max_count", &self.max_count)
            .field("direction", &self.direction)
            .finish()
    }
}

///
/// ColumnStore
///
/// Adapter over a wide-column store.
///
/// Contract:
/// - returns at most `request.max_count` columns, ordered ascending by the
///   store comparator (descending when reversed)
/// - the first column is `request.from` itself when that column exists
/// - reversed from `ColumnBound::Start`, or ascending from `ColumnBound::End`,
///   is empty
/// - equal keys always mean the same position in the row
///
/// A missing row should be reported as [`StoreError::RowNotFound`]; the
/// engine treats it as an empty row.
///

pub trait ColumnStore {
    type Row;
    type Key: Clone + PartialEq;
    type Value: Clone;

    fn fetch_slice(
        &self,
        row: &Self::Row,
        request: SliceRequest<'_, Self::Key>,
    ) -> Result<Slice<Self::Key, Self::Value>, StoreError>;
}

impl<S: ColumnStore + ?Sized> ColumnStore for &S {
    type Row = S::Row;
    type Key = S::Key;
    type Value = S::Value;

    fn fetch_slice(
        &self,
        row: &Self::Row,
        request: SliceRequest<'_, Self::Key>,
    ) -> Result<Slice<Self::Key, Self::Value>, StoreError> {
        (**self).fetch_slice(row, request)
    }
}

impl<S: ColumnStore + ?Sized> ColumnStore for Arc<S> {
    type Row = S::Row;
    type Key = S::Key;
    type Value = S::Value;

    fn fetch_slice(
        &self,
        row: &Self::Row,
        request: SliceRequest<'_, Self::Key>,
    ) -> Result<Slice<Self::Key, Self::Value>, StoreError> {
        (**self).fetch_slice(row, request)
    }
}
