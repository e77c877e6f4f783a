use serde::{Deserialize, Serialize};

///
/// Column
///
/// One `(key, value)` pair inside a row. Keys are ordered by the store's
/// comparator; the engine never looks inside either half.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Column<K, V> {
    pub key: K,
    pub value: V,
}

impl<K, V> Column<K, V> {
    #[must_use]
    pub const fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    #[must_use]
    pub fn into_parts(self) -> (K, V) {
        (self.key, self.value)
    }
}

impl<K, V> From<(K, V)> for Column<K, V> {
    fn from((key, value): (K, V)) -> Self {
        Self::new(key, value)
    }
}

impl<K, V> From<Column<K, V>> for (K, V) {
    fn from(column: Column<K, V>) -> Self {
        column.into_parts()
    }
}

///
/// ColumnBound
///
/// Where a slice request starts: one of the two row sentinels, or a column
/// key previously observed in the row. Sentinels never compare equal to a
/// real key.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum ColumnBound<K> {
    #[default]
    Start,
    End,
    Key(K),
}

impl<K> ColumnBound<K> {
    #[must_use]
    pub const fn borrowed(&self) -> ColumnBound<&K> {
        match self {
            Self::Start => ColumnBound::Start,
            Self::End => ColumnBound::End,
            Self::Key(key) => ColumnBound::Key(key),
        }
    }

    #[must_use]
    pub const fn key(&self) -> Option<&K> {
        match self {
            Self::Key(key) => Some(key),
            Self::Start | Self::End => None,
        }
    }

    #[must_use]
    pub const fn is_sentinel(&self) -> bool {
        !matches!(self, Self::Key(_))
    }

    /// True when this bound names exactly `key`.
    pub fn is_key(&self, key: &K) -> bool
    where
        K: PartialEq,
    {
        self.key().is_some_and(|own| own == key)
    }
}

impl<K: Clone> ColumnBound<&K> {
    #[must_use]
    pub fn cloned(self) -> ColumnBound<K> {
        match self {
            ColumnBound::Start => ColumnBound::Start,
            ColumnBound::End => ColumnBound::End,
            ColumnBound::Key(key) => ColumnBound::Key(key.clone()),
        }
    }
}

impl<K> From<Option<K>> for ColumnBound<K> {
    fn from(key: Option<K>) -> Self {
        key.map_or(Self::Start, Self::Key)
    }
}
