use crate::{
    DEFAULT_MAX_COLUMN_COUNT, DEFAULT_MAX_RETRIES,
    db::{
        column::ColumnBound,
        cursor::CursorError,
        direction::Direction,
        store::RetryPolicy,
    },
};
use serde::{Deserialize, Serialize};

///
/// CursorOptions
///
/// Configuration shared by sequential and prefetching cursors.
/// Deserializes with every field optional.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CursorOptions<K> {
    /// New columns requested per store round trip.
    pub max_column_count: usize,

    /// Retries for a transient fetch failure before it is surfaced.
    pub max_retries: u32,

    pub direction: Direction,

    /// Start strictly after this column instead of at the row edge.
    pub start_beyond: Option<K>,

    /// Prefetch queue bound; `None` means twice `max_column_count`.
    pub prefetch_capacity: Option<usize>,
}

impl<K> CursorOptions<K> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_column_count: DEFAULT_MAX_COLUMN_COUNT,
            max_retries: DEFAULT_MAX_RETRIES,
            direction: Direction::Asc,
            start_beyond: None,
            prefetch_capacity: None,
        }
    }

    #[must_use]
    pub const fn with_max_column_count(mut self, max_column_count: usize) -> Self {
        self.max_column_count = max_column_count;
        self
    }

    #[must_use]
    pub const fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    #[must_use]
    pub const fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    #[must_use]
    pub const fn reversed(self) -> Self {
        self.with_direction(Direction::Desc)
    }

    #[must_use]
    pub fn starting_beyond(mut self, key: K) -> Self {
        self.start_beyond = Some(key);
        self
    }

    #[must_use]
    pub const fn with_prefetch_capacity(mut self, capacity: usize) -> Self {
        self.prefetch_capacity = Some(capacity);
        self
    }

    /// Reject option sets that could never make progress.
    pub fn validate(&self) -> Result<(), CursorError> {
        if self.max_column_count == 0 {
            return Err(CursorError::invalid_options(
                "max_column_count must be greater than zero",
            ));
        }
        if self.prefetch_capacity == Some(0) {
            return Err(CursorError::invalid_options(
                "prefetch_capacity must be greater than zero",
            ));
        }

        Ok(())
    }

    #[must_use]
    pub fn prefetch_capacity(&self) -> usize {
        self.prefetch_capacity
            .unwrap_or_else(|| self.max_column_count.saturating_mul(2))
    }

    pub(crate) const fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_retries)
    }

    /// Offset a fresh or rewound cursor fetches from.
    pub(crate) fn initial_offset(&self) -> ColumnBound<K>
    where
        K: Clone,
    {
        self.start_beyond
            .clone()
            .map_or_else(|| self.direction.origin(), ColumnBound::Key)
    }
}

impl<K> Default for CursorOptions<K> {
    fn default() -> Self {
        Self::new()
    }
}
