use serde::{Deserialize, Serialize};
use slicedb_core::{
    db::{cursor::CursorError, page::PageError, store::StoreError},
    error::{ErrorClass, ErrorOrigin as CoreErrorOrigin},
};
use std::fmt;
use thiserror::Error as ThisError;

///
/// Error
/// Public error type with a stable kind + origin taxonomy.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, ThisError)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            kind,
            origin,
            message: message.into(),
        }
    }

    /// Whether repeating the same call may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self.kind, ErrorKind::Store(StoreErrorKind::Unavailable))
    }

    fn from_store(err: &StoreError, origin: ErrorOrigin) -> Self {
        let kind = match err {
            StoreError::InvalidRequest { .. } => ErrorKind::Request(RequestErrorKind::Rejected),
            _ => ErrorKind::from(err.class()),
        };

        Self::new(kind, origin, err.to_string())
    }
}

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        Self::from_store(&err, ErrorOrigin::Store)
    }
}

impl From<CursorError> for Error {
    fn from(err: CursorError) -> Self {
        match &err {
            CursorError::Store(inner) => Self::from_store(inner, ErrorOrigin::Cursor),

            CursorError::InvalidOptions { .. } => Self::new(
                ErrorKind::Request(RequestErrorKind::InvalidCursorOptions),
                ErrorOrigin::Cursor,
                err.to_string(),
            ),

            CursorError::WorkerSpawn { .. } => {
                Self::new(ErrorKind::Internal, ErrorOrigin::Cursor, err.to_string())
            }
        }
    }
}

impl From<PageError> for Error {
    fn from(err: PageError) -> Self {
        match &err {
            PageError::Store(inner) => Self::from_store(inner, ErrorOrigin::Page),

            PageError::InvalidPageSize { .. } => Self::new(
                ErrorKind::Request(RequestErrorKind::InvalidPageSize),
                ErrorOrigin::Page,
                err.to_string(),
            ),
        }
    }
}

///
/// ErrorKind
/// Public error taxonomy for callers and service interfaces.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ErrorKind {
    Request(RequestErrorKind),
    Store(StoreErrorKind),

    /// The caller cannot remediate this.
    Internal,
}

impl From<ErrorClass> for ErrorKind {
    fn from(class: ErrorClass) -> Self {
        match class {
            ErrorClass::NotFound => Self::Store(StoreErrorKind::NotFound),
            ErrorClass::Transient => Self::Store(StoreErrorKind::Unavailable),
            ErrorClass::InvalidArgument => Self::Request(RequestErrorKind::Rejected),
            ErrorClass::Internal => Self::Internal,
        }
    }
}

///
/// RequestErrorKind
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum RequestErrorKind {
    /// Page size was zero.
    InvalidPageSize,

    /// Cursor options failed validation.
    InvalidCursorOptions,

    /// The store refused the request as malformed.
    Rejected,
}

///
/// StoreErrorKind
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum StoreErrorKind {
    NotFound,

    /// Timeout or transport failure that outlived the retry budget.
    Unavailable,
}

///
/// ErrorOrigin
/// Public origin taxonomy for callers and service interfaces.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ErrorOrigin {
    Store,
    Cursor,
    Page,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", CoreErrorOrigin::from(*self))
    }
}

impl From<CoreErrorOrigin> for ErrorOrigin {
    fn from(origin: CoreErrorOrigin) -> Self {
        match origin {
            CoreErrorOrigin::Store => Self::Store,
            CoreErrorOrigin::Cursor => Self::Cursor,
            CoreErrorOrigin::Page => Self::Page,
        }
    }
}

impl From<ErrorOrigin> for CoreErrorOrigin {
    fn from(origin: ErrorOrigin) -> Self {
        match origin {
            ErrorOrigin::Store => Self::Store,
            ErrorOrigin::Cursor => Self::Cursor,
            ErrorOrigin::Page => Self::Page,
        }
    }
}
