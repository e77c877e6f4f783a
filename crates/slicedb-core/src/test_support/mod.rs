//! Shared fixtures for engine tests: seeded in-memory rows, a scripted store
//! that answers fixed requests, and a wrapper that injects failures/latency.

use crate::db::{
    column::{Column, ColumnBound},
    direction::Direction,
    store::{ColumnStore, MemoryColumnStore, Slice, SliceRequest, StoreError},
};
use parking_lot::Mutex;
use std::{
    collections::{BTreeMap, HashMap},
    sync::atomic::{AtomicUsize, Ordering},
    thread,
    time::Duration,
};

pub(crate) type LetterStore = MemoryColumnStore<&'static str, &'static str, u32>;
pub(crate) type NumericStore = MemoryColumnStore<u32, u32, u64>;

pub(crate) const LETTERS: [&str; 8] = ["a", "b", "c", "d", "e", "f", "g", "h"];

/// Rows: `xyz` = a..h, `the_row` = a..g, `SHORTROW` = A, B.
pub(crate) fn letter_store() -> LetterStore {
    let store = LetterStore::new();
    store.insert("xyz", LETTERS.iter().copied().zip(1_u32..));
    store.insert("the_row", LETTERS[..7].iter().copied().zip(1_u32..));
    store.insert("SHORTROW", [("A", 1_u32), ("B", 2)]);

    store
}

/// Row `0` with keys `0..len`, each holding `key * 10`.
pub(crate) fn numeric_store(len: u32) -> NumericStore {
    let store = NumericStore::new();
    store.insert(0, (0..len).map(|key| (key, u64::from(key) * 10)));

    store
}

/// Keys of a column list, for terse assertions.
pub(crate) fn keys<K: Clone, V>(columns: &[Column<K, V>]) -> Vec<K> {
    columns.iter().map(|column| column.key.clone()).collect()
}

///
/// ScriptedStore
///
/// Answers exact `(from, max_count, direction)` requests from a script and
/// records every request. Unscripted requests report a missing row.
///

#[derive(Default)]
pub(crate) struct ScriptedStore {
    script: HashMap<(ColumnBound<&'static str>, usize, bool), Vec<(&'static str, u32)>>,
    requests: Mutex<Vec<(ColumnBound<&'static str>, usize, Direction)>>,
}

impl ScriptedStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn answer(
        mut self,
        from: ColumnBound<&'static str>,
        max_count: usize,
        direction: Direction,
        columns: &[(&'static str, u32)],
    ) -> Self {
        self.script
            .insert((from, max_count, direction.is_reversed()), columns.to_vec());
        self
    }

    pub(crate) fn requests(&self) -> Vec<(ColumnBound<&'static str>, usize, Direction)> {
        self.requests.lock().clone()
    }
}

impl ColumnStore for ScriptedStore {
    type Row = &'static str;
    type Key = &'static str;
    type Value = u32;

    fn fetch_slice(
        &self,
        row: &&'static str,
        request: SliceRequest<'_, &'static str>,
    ) -> Result<Slice<&'static str, u32>, StoreError> {
        let from = request.from.cloned();
        self.requests
            .lock()
            .push((from.clone(), request.max_count, request.direction));

        self.script
            .get(&(from, request.max_count, request.is_reversed()))
            .map(|columns| columns.iter().copied().collect())
            .ok_or_else(|| StoreError::row_not_found(*row))
    }
}

///
/// FaultyStore
///
/// Wraps another store, failing chosen calls (0-based) and optionally
/// sleeping before every call.
///

pub(crate) struct FaultyStore<S> {
    inner: S,
    failures: Mutex<BTreeMap<usize, StoreError>>,
    delay: Duration,
    calls: AtomicUsize,
}

impl<S> FaultyStore<S> {
    pub(crate) fn new(inner: S) -> Self {
        Self {
            inner,
            failures: Mutex::new(BTreeMap::new()),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn failing_on(self, call: usize, err: StoreError) -> Self {
        self.failures.lock().insert(call, err);
        self
    }

    pub(crate) const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl<S: ColumnStore> ColumnStore for FaultyStore<S> {
    type Row = S::Row;
    type Key = S::Key;
    type Value = S::Value;

    fn fetch_slice(
        &self,
        row: &S::Row,
        request: SliceRequest<'_, S::Key>,
    ) -> Result<Slice<S::Key, S::Value>, StoreError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        if let Some(err) = self.failures.lock().remove(&call) {
            return Err(err);
        }

        self.inner.fetch_slice(row, request)
    }
}
