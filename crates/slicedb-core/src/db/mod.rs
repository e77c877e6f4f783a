//! Column pagination engine.
//!
//! `store` is the only boundary to the underlying wide-column store; every
//! cursor and page reaches it through [`store::ColumnStore::fetch_slice`].

pub mod column;
pub mod cursor;
pub mod direction;
pub mod page;
pub mod store;
