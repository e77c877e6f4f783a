use crate::{
    LOG_TARGET,
    db::store::{ColumnStore, Slice, SliceRequest, StoreError},
    obs::sink::{self, MetricsEvent},
};
use tracing::{debug, trace, warn};

///
/// RetryPolicy
///
/// How many times an idempotent slice read is re-issued after a transient
/// failure before the store error is surfaced.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct RetryPolicy {
    max_retries: u32,
}

impl RetryPolicy {
    pub(crate) const NONE: Self = Self { max_retries: 0 };

    pub(crate) const fn new(max_retries: u32) -> Self {
        Self { max_retries }
    }

    pub(crate) const fn max_retries(self) -> u32 {
        self.max_retries
    }
}

/// Issue one slice read through the store boundary.
///
/// Missing rows come back as an empty slice. Transient failures are retried
/// per `retry`; every other failure is returned unchanged.
pub(crate) fn fetch_slice<S: ColumnStore>(
    store: &S,
    row: &S::Row,
    request: SliceRequest<'_, S::Key>,
    retry: RetryPolicy,
) -> Result<Slice<S::Key, S::Value>, StoreError> {
    let mut attempt = 0u32;

    loop {
        match store.fetch_slice(row, request) {
            Ok(slice) => {
                trace!(
                    target: LOG_TARGET,
                    max_count = request.max_count,
                    reversed = request.is_reversed(),
                    returned = slice.len(),
                    "slice fetched"
                );
                sink::record(MetricsEvent::SliceFetched {
                    direction: request.direction,
                    columns: slice.len() as u64,
                });

                return Ok(slice);
            }

            Err(err) if err.is_row_not_found() => {
                debug!(target: LOG_TARGET, error = %err, "row missing, treating as empty");
                sink::record(MetricsEvent::RowMissing);

                return Ok(Slice::empty());
            }

            Err(err) if err.is_transient() && attempt < retry.max_retries() => {
                attempt += 1;
                warn!(
                    target: LOG_TARGET,
                    error = %err,
                    attempt,
                    max_retries = retry.max_retries(),
                    "transient slice fetch failure, retrying"
                );
                sink::record(MetricsEvent::FetchRetried { attempt });
            }

            Err(err) => {
                sink::record(MetricsEvent::FetchFailed { class: err.class() });

                return Err(err);
            }
        }
    }
}
