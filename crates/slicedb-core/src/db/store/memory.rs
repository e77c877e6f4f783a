use crate::db::{
    column::{Column, ColumnBound},
    direction::Direction,
    store::{ColumnStore, Slice, SliceRequest, StoreError},
};
use parking_lot::RwLock;
use std::{collections::BTreeMap, fmt::Debug};

type Row<K, V> = BTreeMap<K, V>;

///
/// MemoryColumnStore
///
/// In-process column store: every row is a sorted map of columns, ordered by
/// the key type's `Ord`. Rows with no columns do not exist.
///

#[derive(Debug)]
pub struct MemoryColumnStore<R, K, V> {
    rows: RwLock<BTreeMap<R, Row<K, V>>>,
}

impl<R: Ord, K: Ord, V> MemoryColumnStore<R, K, V> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
        }
    }

    /// Write columns into a row, replacing existing values.
    pub fn insert<I, C>(&self, row: R, columns: I)
    where
        I: IntoIterator<Item = C>,
        C: Into<Column<K, V>>,
    {
        let mut columns = columns.into_iter().map(Into::<Column<K, V>>::into).peekable();
        if columns.peek().is_none() {
            return;
        }

        let mut rows = self.rows.write();
        let entry = rows.entry(row).or_default();
        for Column { key, value } in columns {
            entry.insert(key, value);
        }
    }

    #[must_use]
    pub fn contains_row(&self, row: &R) -> bool {
        self.rows.read().contains_key(row)
    }

    #[must_use]
    pub fn column_count(&self, row: &R) -> usize {
        self.rows.read().get(row).map_or(0, BTreeMap::len)
    }

    #[must_use]
    pub fn get_column(&self, row: &R, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.rows.read().get(row)?.get(key).cloned()
    }

    /// Every column of a row in ascending order.
    #[must_use]
    pub fn get_row(&self, row: &R) -> Option<Vec<Column<K, V>>>
    where
        K: Clone,
        V: Clone,
    {
        let rows = self.rows.read();
        let columns = rows.get(row)?;

        Some(
            columns
                .iter()
                .map(|(key, value)| Column::new(key.clone(), value.clone()))
                .collect(),
        )
    }

    /// Remove a whole row; returns whether it existed.
    pub fn delete_row(&self, row: &R) -> bool {
        self.rows.write().remove(row).is_some()
    }

    /// Remove one column; returns whether it existed.
    pub fn delete_column(&self, row: &R, key: &K) -> bool {
        self.delete_columns(row, std::iter::once(key)) > 0
    }

    /// Remove several columns; returns how many existed.
    pub fn delete_columns<'k, I>(&self, row: &R, keys: I) -> usize
    where
        I: IntoIterator<Item = &'k K>,
        K: 'k,
    {
        let mut rows = self.rows.write();
        let Some(columns) = rows.get_mut(row) else {
            return 0;
        };

        let removed = keys
            .into_iter()
            .filter(|key| columns.remove(*key).is_some())
            .count();
        if columns.is_empty() {
            rows.remove(row);
        }

        removed
    }

    /// Drop every row.
    pub fn truncate(&self) {
        self.rows.write().clear();
    }
}

impl<R: Ord, K: Ord, V> Default for MemoryColumnStore<R, K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R, K, V> ColumnStore for MemoryColumnStore<R, K, V>
where
    R: Ord + Debug,
    K: Ord + Clone,
    V: Clone,
{
    type Row = R;
    type Key = K;
    type Value = V;

    fn fetch_slice(
        &self,
        row: &R,
        request: SliceRequest<'_, K>,
    ) -> Result<Slice<K, V>, StoreError> {
        let rows = self.rows.read();
        let columns = rows
            .get(row)
            .ok_or_else(|| StoreError::row_not_found(format!("{row:?}")))?;

        let pair = |(key, value): (&K, &V)| Column::new(key.clone(), value.clone());
        let limit = request.max_count;

        let slice = match (request.direction, request.from) {
            (Direction::Asc, ColumnBound::Start) => columns.iter().take(limit).map(pair).collect(),
            (Direction::Asc, ColumnBound::Key(from)) => {
                columns.range(from..).take(limit).map(pair).collect()
            }
            (Direction::Desc, ColumnBound::End) => {
                columns.iter().rev().take(limit).map(pair).collect()
            }
            (Direction::Desc, ColumnBound::Key(from)) => {
                columns.range(..=from).rev().take(limit).map(pair).collect()
            }
            (Direction::Asc, ColumnBound::End) | (Direction::Desc, ColumnBound::Start) => {
                Slice::empty()
            }
        };

        Ok(slice)
    }
}
