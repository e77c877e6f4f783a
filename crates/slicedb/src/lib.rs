//! ## Crate layout
//! - `core`: store boundary, cursors, pages, and observability.
//! - `error`: the public error type every engine failure converts into.
//!
//! The `prelude` module mirrors the surface used by application code.

pub use slicedb_core as core;

pub mod error;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use crate::core::{DEFAULT_MAX_COLUMN_COUNT, DEFAULT_MAX_RETRIES, db, obs};
pub use error::Error;

///
/// Prelude
/// using _ brings traits into scope and avoids name conflicts
///

pub mod prelude {
    pub use crate::core::{
        db::{
            column::{Column, ColumnBound},
            cursor::{ColumnCursor as _, CursorOptions, PrefetchCursor, SequentialCursor},
            direction::Direction,
            page::{ColumnPage, PageWindow, next_page, previous_page},
            store::{ColumnStore, MemoryColumnStore, Slice, SliceRequest},
        },
        obs::{metrics_report, metrics_reset_all},
    };
    pub use crate::error::Error;
}
