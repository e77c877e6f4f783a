use crate::{db::store::StoreError, error::ErrorClass};
use thiserror::Error as ThisError;

///
/// CursorError
///
/// Cursor construction and iteration failures. Exhaustion is not an error;
/// it is `Ok(None)` from `next_column`.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum CursorError {
    /// Store failure, passed through unchanged once retries are spent.
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("invalid cursor options: {reason}")]
    InvalidOptions { reason: String },

    #[error("failed to start prefetch worker: {reason}")]
    WorkerSpawn { reason: String },
}

impl CursorError {
    pub(crate) fn invalid_options(reason: impl Into<String>) -> Self {
        Self::InvalidOptions {
            reason: reason.into(),
        }
    }

    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::Store(err) => err.class(),
            Self::InvalidOptions { .. } => ErrorClass::InvalidArgument,
            Self::WorkerSpawn { .. } => ErrorClass::Internal,
        }
    }

    /// Borrow the underlying store error, if this is one.
    #[must_use]
    pub const fn as_store_error(&self) -> Option<&StoreError> {
        match self {
            Self::Store(err) => Some(err),
            Self::InvalidOptions { .. } | Self::WorkerSpawn { .. } => None,
        }
    }
}
