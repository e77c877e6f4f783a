use crate::db::column::ColumnBound;
use serde::{Deserialize, Serialize};

///
/// Direction
///
/// Traversal direction of one slice request, cursor, or page.
/// `Desc` is the store's reversed fetch.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    #[must_use]
    pub const fn is_reversed(self) -> bool {
        matches!(self, Self::Desc)
    }

    /// Sentinel a full traversal in this direction starts from.
    #[must_use]
    pub const fn origin<K>(self) -> ColumnBound<K> {
        match self {
            Self::Asc => ColumnBound::Start,
            Self::Desc => ColumnBound::End,
        }
    }
}
