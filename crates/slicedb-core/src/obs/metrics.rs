use parking_lot::{Mutex, const_mutex};
use serde::{Deserialize, Serialize};

///
/// EventReport
/// Process-wide counters for slice fetches, cursors, and pages.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct EventReport {
    // Store traffic
    pub slice_fetches: u64,
    pub reversed_fetches: u64,
    pub columns_fetched: u64,
    pub fetch_retries: u64,
    pub fetch_failures: u64,
    pub rows_missing: u64,

    // Cursors
    pub cursors_exhausted: u64,
    pub cursor_rewinds: u64,
    pub prefetch_workers_started: u64,
    pub prefetch_workers_stopped: u64,

    // Pages
    pub pages_fetched: u64,
    pub page_windows_served: u64,
}

impl EventReport {
    const EMPTY: Self = Self {
        slice_fetches: 0,
        reversed_fetches: 0,
        columns_fetched: 0,
        fetch_retries: 0,
        fetch_failures: 0,
        rows_missing: 0,
        cursors_exhausted: 0,
        cursor_rewinds: 0,
        prefetch_workers_started: 0,
        prefetch_workers_stopped: 0,
        pages_fetched: 0,
        page_windows_served: 0,
    };
}

// Shared with prefetch workers, so not thread-local.
static EVENT_STATE: Mutex<EventReport> = const_mutex(EventReport::EMPTY);

/// Borrow metrics immutably.
pub(crate) fn with_state<R>(f: impl FnOnce(&EventReport) -> R) -> R {
    f(&EVENT_STATE.lock())
}

/// Borrow metrics mutably.
pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut EventReport) -> R) -> R {
    f(&mut EVENT_STATE.lock())
}

/// Reset all counters.
pub(crate) fn reset_all() {
    with_state_mut(|m| *m = EventReport::EMPTY);
}

/// Snapshot the current counters.
pub(crate) fn report() -> EventReport {
    with_state(Clone::clone)
}
