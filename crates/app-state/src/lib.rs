//! Application state management for Recipe Explorer
//!
//! This crate keeps in-memory state in step with persisted storage and with
//! asynchronous catalog searches: the favorites mirror and the search
//! controller.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod favorites;
pub mod search;

pub use favorites::FavoritesSync;
pub use search::{SearchController, SearchState, SearchStatus};
