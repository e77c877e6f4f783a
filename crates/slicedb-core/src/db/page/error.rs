use crate::{db::store::StoreError, error::ErrorClass};
use thiserror::Error as ThisError;

///
/// PageError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum PageError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("page size must be greater than zero, got {page_size}")]
    InvalidPageSize { page_size: usize },
}

impl PageError {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::Store(err) => err.class(),
            Self::InvalidPageSize { .. } => ErrorClass::InvalidArgument,
        }
    }
}

// Reject malformed page sizes before any store call.
pub(crate) const fn validate_page_size(page_size: usize) -> Result<(), PageError> {
    if page_size == 0 {
        return Err(PageError::InvalidPageSize { page_size });
    }

    Ok(())
}
