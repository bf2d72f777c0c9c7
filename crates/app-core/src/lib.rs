//! Core application logic for Recipe Explorer
//!
//! This crate contains the recipe model, the searchable recipe catalog and
//! the favorites store.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod favorites;
pub mod recipes;
pub mod search;

pub use favorites::{FavoritesStore, FAVORITES_KEY};
pub use recipes::Recipe;
pub use search::{CatalogConfig, RecipeCatalog, RecipeSource};
