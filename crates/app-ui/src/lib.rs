//! User interface for Recipe Explorer
//!
//! This crate provides the headless UI layer: theming, navigation,
//! components, screens and the application shell that ties them to the
//! storage, catalog and state crates.
//!
//! # Modules
//!
//! - [`theme`] - Light and dark themes and the persisted preference
//! - [`navigation`] - Routes, router, tabs and navigation state
//! - [`components`] - Search bar, recipe cards, grid, modal and bottom nav
//! - [`screens`] - Home, Favorites and Profile screens
//! - [`shell`] - One application instance
//!
//! # Example
//!
//! ```rust
//! use app_ui::navigation::{Route, Router};
//! use app_ui::theme::{ThemeName, ThemeState};
//!
//! let router = Router::new();
//! assert_eq!(router.resolve("/nowhere").route(), Route::Home);
//!
//! let mut theme = ThemeState::default();
//! assert_eq!(theme.toggle(), ThemeName::Dark);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod components;
pub mod navigation;
pub mod screens;
pub mod shell;
pub mod theme;

// Re-export commonly used types
pub use theme::{ParseThemeError, ThemeName, ThemePalette, ThemePreference, ThemeState, THEME_KEY};

pub use navigation::{
    ModalEntry, NavigationState, NavigationTab, Resolution, Route, Router, StackEntry,
};

pub use components::{
    BottomNav, ModalAction, ModalEvent, NavItem, RecipeCard, RecipeGrid, RecipeModal, SearchBar,
};

pub use screens::{FavoritesScreen, HomeScreen, ProfileScreen, Screen};

pub use shell::{AppShell, BRAND};
