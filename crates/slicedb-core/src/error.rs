use serde::{Deserialize, Serialize};
use std::fmt;

///
/// ErrorClass
/// Error taxonomy shared by store, cursor, and page failures.
/// Drives retry decisions and the public error kind.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ErrorClass {
    /// The addressed row does not exist.
    NotFound,

    /// Timeouts and transport failures; safe to retry an idempotent read.
    Transient,

    /// Caller supplied a malformed request (zero page size, bad options).
    InvalidArgument,

    /// Anything else the adapter reports.
    Internal,
}

impl ErrorClass {
    #[must_use]
    pub const fn is_retryable(self) -> bool {
        matches!(self, Self::Transient)
    }
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::NotFound => "not_found",
            Self::Transient => "transient",
            Self::InvalidArgument => "invalid_argument",
            Self::Internal => "internal",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
/// Which engine layer raised an error.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ErrorOrigin {
    Store,
    Cursor,
    Page,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Store => "store",
            Self::Cursor => "cursor",
            Self::Page => "page",
        };
        write!(f, "{label}")
    }
}
