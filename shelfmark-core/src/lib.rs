//! Core library for Shelfmark — a single-user desktop book inventory tool.
//!
//! The primary entry point is [`Library`], which owns an open [`Catalog`]
//! (the SQLite-backed record store) and formats query results with the
//! display round-trip functions ([`render_books`] / [`parse_selection`]).
//! All catalog mutations are synchronous and durable before they return.
//!
//! Types are re-exported from their respective sub-modules for convenience;
//! consumers should import from the crate root rather than the `core` module.

pub mod core;

// Re-export commonly used types.
#[doc(inline)]
pub use crate::core::{
    book::{parse_quantity, Book},
    catalog::Catalog,
    display::{parse_selection, render_books, BookSelection, NO_BOOKS_MESSAGE},
    error::{Result, ShelfmarkError},
    library::Library,
    storage::Storage,
};
