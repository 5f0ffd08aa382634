//! Core data model for assembled books.
//!
//! This module contains:
//! - Chapter representation (ordinal id, title, classified lines)
//! - The finalized [`BookModel`] handed to exporters
//! - Cover and series metadata
//! - Style options and stylesheet rendering

mod book;
mod chapter;
mod style;

pub use book::{BookModel, Cover, Series};
pub use chapter::{Chapter, ChapterId};
pub use style::StyleOptions;
