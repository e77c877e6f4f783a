use crate::db::column::Column;
use derive_more::{Deref, IntoIterator};

///
/// Slice
///
/// Ordered columns returned by one `fetch_slice` call, in store order
/// (descending for reversed requests).
///

#[derive(Clone, Debug, Deref, Eq, IntoIterator, PartialEq)]
#[into_iterator(owned, ref)]
pub struct Slice<K, V>(Vec<Column<K, V>>);

impl<K, V> Slice<K, V> {
    #[must_use]
    pub const fn new(columns: Vec<Column<K, V>>) -> Self {
        Self(columns)
    }

    #[must_use]
    pub const fn empty() -> Self {
        Self(Vec::new())
    }

    #[must_use]
    pub fn first_key(&self) -> Option<&K> {
        self.0.first().map(|column| &column.key)
    }

    #[must_use]
    pub fn last_key(&self) -> Option<&K> {
        self.0.last().map(|column| &column.key)
    }

    /// Key `n` positions from the end; `key_from_end(1)` is the last key.
    #[must_use]
    pub fn key_from_end(&self, n: usize) -> Option<&K> {
        self.0
            .len()
            .checked_sub(n)
            .and_then(|index| self.0.get(index))
            .map(|column| &column.key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.0.iter().map(|column| &column.key)
    }

    #[must_use]
    pub fn into_columns(self) -> Vec<Column<K, V>> {
        self.0
    }
}

impl<K, V> Default for Slice<K, V> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<K, V> FromIterator<Column<K, V>> for Slice<K, V> {
    fn from_iter<I: IntoIterator<Item = Column<K, V>>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<K, V> FromIterator<(K, V)> for Slice<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter().map(Column::from).collect()
    }
}

impl<K, V> From<Vec<Column<K, V>>> for Slice<K, V> {
    fn from(columns: Vec<Column<K, V>>) -> Self {
        Self::new(columns)
    }
}
