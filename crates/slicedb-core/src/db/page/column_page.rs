use crate::{
    LOG_TARGET,
    db::{
        column::{Column, ColumnBound},
        direction::Direction,
        page::{PageError, error::validate_page_size, overfetch},
        store::{ColumnStore, RetryPolicy, Slice, SliceRequest, fetch_slice},
    },
    obs::sink::{self, MetricsEvent},
};
use once_cell::unsync::OnceCell;
use tracing::trace;

///
/// ColumnPage
///
/// One page of a row, identified by `(row, page_size, offset)`.
///
/// Forward-born pages (`Direction::Asc`) start at their offset: the offset
/// column is the page's first column. Reverse-born pages (`Direction::Desc`)
/// end just before their offset: they hold the `page_size` columns preceding
/// it. The backing slice is fetched once, on first use; navigation always
/// builds a new page.
///

pub struct ColumnPage<'a, S: ColumnStore> {
    store: &'a S,
    row: S::Row,
    page_size: usize,
    offset: ColumnBound<S::Key>,
    direction: Direction,
    slice: OnceCell<Slice<S::Key, S::Value>>,
}

impl<'a, S: ColumnStore> ColumnPage<'a, S> {
    /// First page of the row.
    pub fn first(store: &'a S, row: S::Row, page_size: usize) -> Result<Self, PageError> {
        Self::build(store, row, page_size, ColumnBound::Start, Direction::Asc)
    }

    /// Last page of the row, aligned to the row end.
    pub fn last(store: &'a S, row: S::Row, page_size: usize) -> Result<Self, PageError> {
        Self::build(store, row, page_size, ColumnBound::End, Direction::Desc)
    }

    /// Forward page starting at `offset`.
    pub fn at(
        store: &'a S,
        row: S::Row,
        page_size: usize,
        offset: S::Key,
    ) -> Result<Self, PageError> {
        Self::build(store, row, page_size, ColumnBound::Key(offset), Direction::Asc)
    }

    /// Reverse page holding the columns just before `offset`.
    pub fn before(
        store: &'a S,
        row: S::Row,
        page_size: usize,
        offset: S::Key,
    ) -> Result<Self, PageError> {
        Self::build(store, row, page_size, ColumnBound::Key(offset), Direction::Desc)
    }

    fn build(
        store: &'a S,
        row: S::Row,
        page_size: usize,
        offset: ColumnBound<S::Key>,
        direction: Direction,
    ) -> Result<Self, PageError> {
        validate_page_size(page_size)?;

        Ok(Self {
            store,
            row,
            page_size,
            offset,
            direction,
            slice: OnceCell::new(),
        })
    }

    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    #[must_use]
    pub const fn row(&self) -> &S::Row {
        &self.row
    }

    #[must_use]
    pub const fn is_reverse(&self) -> bool {
        self.direction.is_reversed()
    }

    /// Offset this page was built with, sentinels included.
    #[must_use]
    pub const fn bound(&self) -> &ColumnBound<S::Key> {
        &self.offset
    }

    /// Resolved offset key. The first page resolves to the row's first
    /// column; the row-end page has none.
    pub fn offset(&self) -> Result<Option<&S::Key>, PageError> {
        match &self.offset {
            ColumnBound::Start => Ok(self.slice()?.first_key()),
            ColumnBound::End => Ok(None),
            ColumnBound::Key(key) => Ok(Some(key)),
        }
    }

    pub fn is_first(&self) -> Result<bool, PageError> {
        match self.direction {
            Direction::Asc => Ok(matches!(self.offset, ColumnBound::Start)),
            Direction::Desc => Ok(self.preceding_count()? <= self.page_size),
        }
    }

    pub fn is_last(&self) -> Result<bool, PageError> {
        match self.direction {
            Direction::Asc => Ok(self.slice()?.len() <= self.page_size),
            Direction::Desc => Ok(matches!(self.offset, ColumnBound::End)),
        }
    }

    /// The page's columns in ascending order, boundary extras trimmed.
    pub fn columns(&self) -> Result<Vec<Column<S::Key, S::Value>>, PageError> {
        let slice = self.slice()?;

        let columns = match self.direction {
            Direction::Asc => slice.iter().take(self.page_size).cloned().collect(),
            Direction::Desc => {
                // slice is descending: optional offset column, page, extra
                let preceding = self.preceding_count()?;
                let skip_earliest = preceding.saturating_sub(self.page_size);
                let mut columns: Vec<_> = slice
                    .iter()
                    .skip(self.offset_echo(slice))
                    .take(preceding - skip_earliest)
                    .cloned()
                    .collect();
                columns.reverse();

                columns
            }
        };

        Ok(columns)
    }

    /// Following page, or `None` on the last page.
    pub fn next_page(&self) -> Result<Option<Self>, PageError>
    where
        S::Row: Clone,
    {
        if self.is_last()? {
            return Ok(None);
        }

        let offset = match self.direction {
            // first column past this page
            Direction::Asc => self.slice()?.get(self.page_size).map(|column| column.key.clone()),
            Direction::Desc => self.offset.key().cloned(),
        };

        Ok(offset.map(|offset| self.sibling(offset, Direction::Asc)))
    }

    /// Preceding page, or `None` on the first page.
    pub fn prev_page(&self) -> Result<Option<Self>, PageError>
    where
        S::Row: Clone,
    {
        if self.is_first()? {
            return Ok(None);
        }

        let offset = match self.direction {
            Direction::Asc => self.offset.key().cloned(),
            // earliest column of this page
            Direction::Desc => self.columns()?.into_iter().next().map(|column| column.key),
        };

        Ok(offset.map(|offset| self.sibling(offset, Direction::Desc)))
    }

    fn sibling(&self, offset: S::Key, direction: Direction) -> Self
    where
        S::Row: Clone,
    {
        Self {
            store: self.store,
            row: self.row.clone(),
            page_size: self.page_size,
            offset: ColumnBound::Key(offset),
            direction,
            slice: OnceCell::new(),
        }
    }

    // 1 when a reversed slice opens with the offset column itself.
    fn offset_echo(&self, slice: &Slice<S::Key, S::Value>) -> usize {
        usize::from(slice.first_key().is_some_and(|first| self.offset.is_key(first)))
    }

    // Reverse pages: fetched columns strictly before the offset.
    fn preceding_count(&self) -> Result<usize, PageError> {
        let slice = self.slice()?;

        Ok(slice.len() - self.offset_echo(slice))
    }

    fn slice(&self) -> Result<&Slice<S::Key, S::Value>, PageError> {
        self.slice.get_or_try_init(|| {
            let request = SliceRequest::new(
                self.offset.borrowed(),
                overfetch(self.page_size),
                self.direction,
            );
            let slice = fetch_slice(self.store, &self.row, request, RetryPolicy::NONE)?;

            trace!(
                target: LOG_TARGET,
                page_size = self.page_size,
                reversed = self.direction.is_reversed(),
                fetched = slice.len(),
                "page slice fetched"
            );
            sink::record(MetricsEvent::PageFetched {
                direction: self.direction,
            });

            Ok(slice)
        })
    }
}
