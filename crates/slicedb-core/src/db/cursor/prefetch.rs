use crate::{
    LOG_TARGET,
    db::{
        column::Column,
        cursor::{ColumnCursor, CursorError, CursorOptions, SequentialCursor},
        store::ColumnStore,
    },
    obs::sink::{self, MetricsEvent},
};
use crossbeam_channel::{self as xchan, Receiver, Sender};
use std::{
    panic,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread::{self, JoinHandle},
};
use tracing::debug;

const WORKER_THREAD_NAME: &str = "slicedb-prefetch";

///
/// Fetched
///
/// One queue message from the worker. `End` and `Failed` are always the
/// last message of a worker generation.
///

enum Fetched<K, V> {
    Column(Column<K, V>),
    End,
    Failed(CursorError),
}

///
/// Worker
///
/// A running prefetch generation. The join handle hands the sequential
/// cursor back so the next generation resumes from the same state.
///

struct Worker<S: ColumnStore> {
    receiver: Receiver<Fetched<S::Key, S::Value>>,
    stop: Arc<AtomicBool>,
    handle: JoinHandle<SequentialCursor<S>>,
}

impl<S: ColumnStore> Worker<S> {
    // Signal stop, drain until the worker hangs up, and take the cursor back.
    fn shutdown(self) -> thread::Result<SequentialCursor<S>> {
        self.stop.store(true, Ordering::Release);
        while self.receiver.recv().is_ok() {}

        self.handle.join()
    }
}

///
/// PrefetchCursor
///
/// Sequential cursor driven by one background thread that keeps a bounded
/// queue full while the caller consumes it. The worker starts on the first
/// `next_column`, blocks when the queue is full, and is drained and joined
/// by `rewind` and on drop.
///
/// A store failure stops the worker and surfaces on the following
/// `next_column`; calling again restarts a worker at the failed fetch.
///

pub struct PrefetchCursor<S: ColumnStore> {
    idle: Option<SequentialCursor<S>>,
    worker: Option<Worker<S>>,
    capacity: usize,
    exhausted: bool,
}

impl<S> PrefetchCursor<S>
where
    S: ColumnStore + Send + 'static,
    S::Row: Send + 'static,
    S::Key: Send + 'static,
    S::Value: Send + 'static,
{
    pub fn new(store: S, row: S::Row, options: CursorOptions<S::Key>) -> Result<Self, CursorError> {
        let capacity = options.prefetch_capacity();
        let cursor = SequentialCursor::new(store, row, options)?;

        Ok(Self {
            idle: Some(cursor),
            worker: None,
            capacity,
            exhausted: false,
        })
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// True while a worker generation is alive.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.worker.is_some()
    }

    fn ensure_worker(&mut self) -> Result<&Worker<S>, CursorError> {
        if self.worker.is_none() {
            let Some(cursor) = self.idle.take() else {
                return Err(CursorError::WorkerSpawn {
                    reason: "prefetch cursor lost its sequential cursor".to_string(),
                });
            };

            let (sender, receiver) = xchan::bounded(self.capacity);
            let stop = Arc::new(AtomicBool::new(false));
            let worker_stop = Arc::clone(&stop);

            // The closure owns the cursor; on spawn failure it is dropped
            // with the closure, so the error is terminal for this instance.
            let handle = thread::Builder::new()
                .name(WORKER_THREAD_NAME.to_string())
                .spawn(move || run_worker(cursor, &sender, &worker_stop))
                .map_err(|err| CursorError::WorkerSpawn {
                    reason: err.to_string(),
                })?;

            debug!(target: LOG_TARGET, capacity = self.capacity, "prefetch worker started");
            sink::record(MetricsEvent::PrefetchStarted);

            self.worker = Some(Worker {
                receiver,
                stop,
                handle,
            });
        }

        self.worker.as_ref().ok_or_else(|| CursorError::WorkerSpawn {
            reason: "prefetch worker missing after start".to_string(),
        })
    }

    // Stop the current generation and park its cursor back in `idle`.
    fn stop_worker(&mut self) {
        let Some(worker) = self.worker.take() else {
            return;
        };

        match worker.shutdown() {
            Ok(cursor) => self.idle = Some(cursor),
            Err(payload) => panic::resume_unwind(payload),
        }
    }
}

impl<S> ColumnCursor for PrefetchCursor<S>
where
    S: ColumnStore + Send + 'static,
    S::Row: Send + 'static,
    S::Key: Send + 'static,
    S::Value: Send + 'static,
{
    type Key = S::Key;
    type Value = S::Value;

    fn next_column(&mut self) -> Result<Option<Column<S::Key, S::Value>>, CursorError> {
        if self.exhausted {
            return Ok(None);
        }

        let message = self.ensure_worker()?.receiver.recv();
        match message {
            Ok(Fetched::Column(column)) => Ok(Some(column)),
            Ok(Fetched::End) => {
                self.stop_worker();
                self.exhausted = true;

                Ok(None)
            }
            Ok(Fetched::Failed(err)) => {
                self.stop_worker();

                Err(err)
            }
            // Hung up without a final message: the worker panicked.
            Err(_) => {
                self.stop_worker();

                Ok(None)
            }
        }
    }

    fn rewind(&mut self) {
        self.stop_worker();
        if let Some(cursor) = self.idle.as_mut() {
            cursor.rewind();
        }
        self.exhausted = false;
    }

    fn is_exhausted(&self) -> bool {
        self.exhausted
    }
}

impl<S: ColumnStore> Drop for PrefetchCursor<S> {
    fn drop(&mut self) {
        if let Some(worker) = self.worker.take() {
            // A worker panic has nowhere to go from here.
            let _ = worker.shutdown();
        }
    }
}

// Worker body: pull from the sequential cursor until the row ends, the
// store fails, or the consumer asks it to stop.
fn run_worker<S: ColumnStore>(
    mut cursor: SequentialCursor<S>,
    sender: &Sender<Fetched<S::Key, S::Value>>,
    stop: &AtomicBool,
) -> SequentialCursor<S> {
    loop {
        if stop.load(Ordering::Acquire) {
            debug!(target: LOG_TARGET, "prefetch worker stopped by consumer");
            let _ = sender.send(Fetched::End);
            break;
        }

        match cursor.next_column() {
            Ok(Some(column)) => {
                if sender.send(Fetched::Column(column)).is_err() {
                    break;
                }
            }
            Ok(None) => {
                let _ = sender.send(Fetched::End);
                break;
            }
            Err(err) => {
                debug!(target: LOG_TARGET, error = %err, "prefetch worker hit a store failure");
                let _ = sender.send(Fetched::Failed(err));
                break;
            }
        }
    }

    sink::record(MetricsEvent::PrefetchStopped);

    cursor
}
