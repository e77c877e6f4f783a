use crate::{
    LOG_TARGET,
    db::{
        column::{Column, ColumnBound},
        direction::Direction,
        page::{PageError, error::validate_page_size, overfetch},
        store::{ColumnStore, RetryPolicy, SliceRequest, fetch_slice},
    },
    obs::sink::{self, MetricsEvent},
};
use serde::{Deserialize, Serialize};
use tracing::debug;

///
/// PageWindow
///
/// One served page plus the ids needed to move from it.
///
/// `forward_id` is the reference for the next `next_page` call and is set
/// only when more columns follow. `backward_id` is the reference for the
/// next `previous_page` call; `None` means no earlier page.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PageWindow<K, V> {
    pub columns: Vec<Column<K, V>>,
    pub forward_id: Option<K>,
    pub backward_id: Option<K>,
}

impl<K, V> PageWindow<K, V> {
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            columns: Vec::new(),
            forward_id: None,
            backward_id: None,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.forward_id.is_some()
    }

    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.backward_id.is_some()
    }

    #[must_use]
    pub fn into_parts(self) -> (Vec<Column<K, V>>, Option<K>, Option<K>) {
        (self.columns, self.forward_id, self.backward_id)
    }
}

impl<K, V> Default for PageWindow<K, V> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Serve the page after `reference`, or the first page when `None`.
///
/// The reference column itself belongs to the page it came from and is
/// never repeated.
pub fn next_page<S: ColumnStore>(
    store: &S,
    row: &S::Row,
    page_size: usize,
    reference: Option<&S::Key>,
) -> Result<PageWindow<S::Key, S::Value>, PageError> {
    validate_page_size(page_size)?;

    let from = reference.map_or(ColumnBound::Start, ColumnBound::Key);
    let request = SliceRequest::new(from, overfetch(page_size), Direction::Asc);
    let slice = fetch_slice(store, row, request, RetryPolicy::NONE)?;

    if slice.is_empty() {
        return Ok(PageWindow::empty());
    }

    let skip = usize::from(reference.is_some_and(|key| slice.first_key() == Some(key)));
    let mut columns: Vec<_> = slice.into_iter().skip(skip).collect();

    let has_more = columns.len() > page_size;
    columns.truncate(page_size);

    let forward_id = if has_more {
        columns.last().map(|column| column.key.clone())
    } else {
        None
    };
    let window = PageWindow {
        columns,
        forward_id,
        backward_id: reference.cloned(),
    };

    served(&window, Direction::Asc);

    Ok(window)
}

/// Serve the page before `reference`, or the last page when `None`.
///
/// The reference column closes the served page; columns come back in
/// ascending order.
pub fn previous_page<S: ColumnStore>(
    store: &S,
    row: &S::Row,
    page_size: usize,
    reference: Option<&S::Key>,
) -> Result<PageWindow<S::Key, S::Value>, PageError> {
    validate_page_size(page_size)?;

    let from = reference.map_or(ColumnBound::End, ColumnBound::Key);
    let request = SliceRequest::new(from, page_size.saturating_add(1), Direction::Desc);
    let slice = fetch_slice(store, row, request, RetryPolicy::NONE)?;

    if slice.is_empty() {
        return Ok(PageWindow::empty());
    }

    // descending: the extra column (when present) is the earliest one
    let mut columns = slice.into_columns();
    let backward_id = if columns.len() > page_size {
        columns.pop().map(|column| column.key)
    } else {
        None
    };
    columns.reverse();

    let window = PageWindow {
        columns,
        forward_id: reference.cloned(),
        backward_id,
    };

    served(&window, Direction::Desc);

    Ok(window)
}

fn served<K, V>(window: &PageWindow<K, V>, direction: Direction) {
    debug!(
        target: LOG_TARGET,
        reversed = direction.is_reversed(),
        columns = window.columns.len(),
        has_next = window.has_next(),
        has_previous = window.has_previous(),
        "page window served"
    );
    sink::record(MetricsEvent::PageWindowServed);
}
