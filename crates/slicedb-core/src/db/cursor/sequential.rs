use crate::{
    LOG_TARGET,
    db::{
        column::{Column, ColumnBound},
        cursor::{ColumnCursor, CursorError, CursorOptions},
        store::{ColumnStore, SliceRequest, fetch_slice},
    },
    obs::sink::{self, MetricsEvent},
};
use std::collections::VecDeque;
use tracing::debug;

///
/// SequentialCursor
///
/// Pull iterator over every column of one row, one store batch at a time.
///
/// Each fetch starts at the last key of the previous batch, so the store
/// hands that boundary back as the first column; it is dropped before
/// buffering. A batch holding nothing but the boundary ends the row.
///

pub struct SequentialCursor<S: ColumnStore> {
    store: S,
    row: S::Row,
    options: CursorOptions<S::Key>,
    offset: ColumnBound<S::Key>,
    buffer: VecDeque<Column<S::Key, S::Value>>,
    exhausted: bool,
}

impl<S: ColumnStore> SequentialCursor<S> {
    pub fn new(store: S, row: S::Row, options: CursorOptions<S::Key>) -> Result<Self, CursorError> {
        options.validate()?;
        let offset = options.initial_offset();

        Ok(Self {
            store,
            row,
            options,
            offset,
            buffer: VecDeque::new(),
            exhausted: false,
        })
    }

    #[must_use]
    pub const fn row(&self) -> &S::Row {
        &self.row
    }

    #[must_use]
    pub const fn options(&self) -> &CursorOptions<S::Key> {
        &self.options
    }

    /// Boundary the next store fetch will start from.
    #[must_use]
    pub const fn offset(&self) -> &ColumnBound<S::Key> {
        &self.offset
    }

    // A keyed offset comes back as the first column, so ask for one extra
    // to keep `max_column_count` new columns per round trip.
    const fn request_size(&self) -> usize {
        match self.offset {
            ColumnBound::Key(_) => self.options.max_column_count.saturating_add(1),
            ColumnBound::Start | ColumnBound::End => self.options.max_column_count,
        }
    }

    // Fetch the next batch into the buffer; returns false once the row is done.
    fn fill_buffer(&mut self) -> Result<bool, CursorError> {
        let request = SliceRequest::new(
            self.offset.borrowed(),
            self.request_size(),
            self.options.direction,
        );
        let slice = fetch_slice(&self.store, &self.row, request, self.options.retry_policy())?;

        let next_offset = match slice.last_key() {
            Some(last) if !self.offset.is_key(last) => ColumnBound::Key(last.clone()),
            _ => {
                self.exhausted = true;
                debug!(target: LOG_TARGET, "cursor exhausted");
                sink::record(MetricsEvent::CursorExhausted);

                return Ok(false);
            }
        };
        let skip = usize::from(slice.first_key().is_some_and(|first| self.offset.is_key(first)));

        self.buffer.extend(slice.into_iter().skip(skip));
        self.offset = next_offset;

        Ok(true)
    }
}

impl<S: ColumnStore> ColumnCursor for SequentialCursor<S> {
    type Key = S::Key;
    type Value = S::Value;

    fn next_column(&mut self) -> Result<Option<Column<S::Key, S::Value>>, CursorError> {
        if self.buffer.is_empty() && (self.exhausted || !self.fill_buffer()?) {
            return Ok(None);
        }

        Ok(self.buffer.pop_front())
    }

    fn rewind(&mut self) {
        self.offset = self.options.initial_offset();
        self.buffer.clear();
        self.exhausted = false;

        debug!(target: LOG_TARGET, "cursor rewound");
        sink::record(MetricsEvent::CursorRewound);
    }

    fn is_exhausted(&self) -> bool {
        self.exhausted && self.buffer.is_empty()
    }
}
