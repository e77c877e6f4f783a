use crate::error::ErrorClass;
use thiserror::Error as ThisError;

///
/// StoreError
///
/// Failures reported by a column store adapter.
/// The engine retries transient variants and otherwise passes them through
/// untouched.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum StoreError {
    #[error("row not found: {row}")]
    RowNotFound { row: String },

    #[error("store request timed out: {message}")]
    Timeout { message: String },

    #[error("store transport failure: {message}")]
    Transport { message: String },

    #[error("no store connection available: {message}")]
    Unavailable { message: String },

    #[error("invalid slice request: {message}")]
    InvalidRequest { message: String },

    #[error("store backend failure: {message}")]
    Backend { message: String },
}

impl StoreError {
    pub fn row_not_found(row: impl Into<String>) -> Self {
        Self::RowNotFound { row: row.into() }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::RowNotFound { .. } => ErrorClass::NotFound,
            Self::Timeout { .. } | Self::Transport { .. } | Self::Unavailable { .. } => {
                ErrorClass::Transient
            }
            Self::InvalidRequest { .. } => ErrorClass::InvalidArgument,
            Self::Backend { .. } => ErrorClass::Internal,
        }
    }

    #[must_use]
    pub const fn is_transient(&self) -> bool {
        self.class().is_retryable()
    }

    #[must_use]
    pub const fn is_row_not_found(&self) -> bool {
        matches!(self, Self::RowNotFound { .. })
    }
}
