//! Core runtime for SliceDB: the column store boundary, sequential and
//! prefetching cursors, bidirectional column pages, and the stateless page
//! navigation helpers built on top of them.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod db;
pub mod error;
pub mod obs;

// test
#[cfg(test)]
pub(crate) mod test_support;

///
/// CONSTANTS
///

/// Default number of columns requested per cursor batch.
pub const DEFAULT_MAX_COLUMN_COUNT: usize = 10_000;

/// Default number of times a transient fetch failure is retried.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Structured log target shared by every event the engine emits.
pub(crate) const LOG_TARGET: &str = "slicedb";

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, metrics, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::db::{
        column::{Column, ColumnBound},
        cursor::{ColumnCursor, CursorOptions, PrefetchCursor, SequentialCursor},
        direction::Direction,
        page::{ColumnPage, PageWindow},
        store::{ColumnStore, MemoryColumnStore, Slice, SliceRequest},
    };
}
