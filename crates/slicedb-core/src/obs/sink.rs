//! Metrics sink boundary.
//!
//! Engine code never touches `obs::metrics` directly; every counter update
//! flows through a `MetricsEvent` handed to `record`.
use crate::{db::direction::Direction, error::ErrorClass, obs::metrics};

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug)]
pub enum MetricsEvent {
    SliceFetched {
        direction: Direction,
        columns: u64,
    },
    FetchRetried {
        attempt: u32,
    },
    FetchFailed {
        class: ErrorClass,
    },
    RowMissing,
    CursorExhausted,
    CursorRewound,
    PrefetchStarted,
    PrefetchStopped,
    PageFetched {
        direction: Direction,
    },
    PageWindowServed,
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent);
}

/// GlobalMetricsSink
/// Process-wide sink that accumulates into the shared counters.

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        metrics::with_state_mut(|m| match event {
            MetricsEvent::SliceFetched { direction, columns } => {
                m.slice_fetches = m.slice_fetches.saturating_add(1);
                m.columns_fetched = m.columns_fetched.saturating_add(columns);
                if direction.is_reversed() {
                    m.reversed_fetches = m.reversed_fetches.saturating_add(1);
                }
            }
            MetricsEvent::FetchRetried { .. } => {
                m.fetch_retries = m.fetch_retries.saturating_add(1);
            }
            MetricsEvent::FetchFailed { .. } => {
                m.fetch_failures = m.fetch_failures.saturating_add(1);
            }
            MetricsEvent::RowMissing => m.rows_missing = m.rows_missing.saturating_add(1),
            MetricsEvent::CursorExhausted => {
                m.cursors_exhausted = m.cursors_exhausted.saturating_add(1);
            }
            MetricsEvent::CursorRewound => {
                m.cursor_rewinds = m.cursor_rewinds.saturating_add(1);
            }
            MetricsEvent::PrefetchStarted => {
                m.prefetch_workers_started = m.prefetch_workers_started.saturating_add(1);
            }
            MetricsEvent::PrefetchStopped => {
                m.prefetch_workers_stopped = m.prefetch_workers_stopped.saturating_add(1);
            }
            MetricsEvent::PageFetched { .. } => {
                m.pages_fetched = m.pages_fetched.saturating_add(1);
            }
            MetricsEvent::PageWindowServed => {
                m.page_windows_served = m.page_windows_served.saturating_add(1);
            }
        });
    }
}

pub(crate) const GLOBAL_METRICS_SINK: GlobalMetricsSink = GlobalMetricsSink;

pub(crate) fn record(event: MetricsEvent) {
    GLOBAL_METRICS_SINK.record(event);
}

/// Snapshot the current metrics state.
#[must_use]
pub fn metrics_report() -> metrics::EventReport {
    metrics::report()
}

/// Reset all metrics state.
pub fn metrics_reset_all() {
    metrics::reset_all();
}
