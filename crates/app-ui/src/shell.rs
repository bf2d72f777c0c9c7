//! Application shell
//!
//! [`AppShell`] is one running instance of the explorer: it owns a storage
//! handle, the favorites mirror, the search controller, the theme and the
//! navigation state, and assembles the screen for the current route.

use std::fmt::Write as _;
use std::sync::Arc;
use tokio::task::JoinHandle;

use app_core::search::RecipeSource;
use app_core::{FavoritesStore, RecipeCatalog};
use app_state::{FavoritesSync, SearchController};
use storage::KvStore;

use crate::components::{BottomNav, ModalAction, ModalEvent, RecipeModal, SearchBar};
use crate::navigation::{NavigationState, NavigationTab, Route, Router};
use crate::screens::{FavoritesScreen, HomeScreen, ProfileScreen, Screen};
use crate::theme::{ThemeName, ThemePreference, ThemeState};

/// Brand shown in the header
pub const BRAND: &str = "Food Recipe Explorer";

/// One application instance
pub struct AppShell {
    catalog: Arc<RecipeCatalog>,
    favorites: FavoritesSync,
    search: SearchController,
    search_bar: SearchBar,
    theme: ThemeState,
    theme_pref: ThemePreference,
    router: Router,
    nav: NavigationState,
}

impl AppShell {
    /// Create a shell over `kv`, reading the saved theme and favorites
    ///
    /// Nothing runs until [`start`](Self::start) is called.
    pub fn new(kv: KvStore, catalog: RecipeCatalog) -> Self {
        let theme_pref = ThemePreference::new(kv.clone());
        let theme = ThemeState::new(theme_pref.load());
        let catalog = Arc::new(catalog);
        let source: Arc<dyn RecipeSource> = catalog.clone();

        Self {
            favorites: FavoritesSync::new(FavoritesStore::new(kv)),
            search: SearchController::new(source),
            search_bar: SearchBar::default(),
            catalog,
            theme,
            theme_pref,
            router: Router::new(),
            nav: NavigationState::default(),
        }
    }

    /// Follow other instances and run the initial search
    ///
    /// Returns the handle of the initial search.
    pub fn start(&self) -> JoinHandle<()> {
        self.favorites.listen();
        self.search.refresh()
    }

    /// Header brand
    pub fn brand(&self) -> &'static str {
        BRAND
    }

    /// The recipe catalog
    pub fn catalog(&self) -> &RecipeCatalog {
        &self.catalog
    }

    /// The favorites mirror
    pub fn favorites(&self) -> &FavoritesSync {
        &self.favorites
    }

    /// The search controller
    pub fn search(&self) -> &SearchController {
        &self.search
    }

    /// The search bar
    pub fn search_bar(&self) -> &SearchBar {
        &self.search_bar
    }

    // -------------------------------------------------------------------------
    // Theme
    // -------------------------------------------------------------------------

    /// Current theme state
    pub fn theme(&self) -> &ThemeState {
        &self.theme
    }

    /// Switch theme and persist the choice
    pub fn toggle_theme(&mut self) -> ThemeName {
        let next = self.theme.toggle();
        self.theme_pref.save(next);
        tracing::debug!(theme = next.as_str(), "theme toggled");
        next
    }

    // -------------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------------

    /// Current route
    pub fn current_route(&self) -> Route {
        self.nav.current_route()
    }

    /// Navigation state
    pub fn navigation(&self) -> &NavigationState {
        &self.nav
    }

    /// Navigate to `path`; unknown paths land on Home
    pub fn navigate(&mut self, path: &str) -> Route {
        self.nav.navigate_to_path(&self.router, path)
    }

    /// Follow a bottom navigation link
    pub fn switch_tab(&mut self, tab: NavigationTab) {
        self.nav.switch_tab(tab);
    }

    /// Close the modal, or go back in history
    pub fn go_back(&mut self) -> bool {
        self.nav.go_back()
    }

    /// Bottom navigation for the current route
    pub fn bottom_nav(&self) -> BottomNav {
        BottomNav::new(self.current_route())
    }

    // -------------------------------------------------------------------------
    // Search
    // -------------------------------------------------------------------------

    /// Type into the search bar without submitting
    pub fn type_query(&mut self, text: impl Into<String>) {
        self.search_bar.set_draft(text);
    }

    /// Submit the search bar
    ///
    /// Returns the handle of the issued search, or `None` if the query did
    /// not change.
    pub fn submit_search(&mut self) -> Option<JoinHandle<()>> {
        let handle = self.search.set_query(self.search_bar.submit());
        self.search_bar.sync(&self.search.query());
        handle
    }

    /// Type `text` and submit it
    pub fn search_for(&mut self, text: impl Into<String>) -> Option<JoinHandle<()>> {
        self.type_query(text);
        self.submit_search()
    }

    // -------------------------------------------------------------------------
    // Recipes and favorites
    // -------------------------------------------------------------------------

    /// Open a recipe over the current screen
    ///
    /// Returns false when the recipe is unknown or the screen shows no
    /// recipes.
    pub fn open_recipe(&mut self, id: &str) -> bool {
        if !self.current_route().supports_modal() || self.catalog.get(id).is_none() {
            return false;
        }
        self.nav.present_modal(id);
        true
    }

    /// Close the open recipe
    pub fn close_recipe(&mut self) -> bool {
        self.nav.dismiss_modal()
    }

    /// The open recipe's modal
    pub fn current_modal(&self) -> Option<RecipeModal> {
        let id = self.nav.open_recipe()?;
        let recipe = self.catalog.get(id)?.clone();
        let favorite = self.favorites.is_favorite(id);
        Some(RecipeModal::new(recipe, favorite))
    }

    /// Feed an input event to the open modal
    pub fn handle_modal_event(&mut self, event: ModalEvent) -> ModalAction {
        let Some(modal) = self.current_modal() else {
            return ModalAction::None;
        };

        let action = modal.handle(event);
        match action {
            ModalAction::Close => {
                self.close_recipe();
            }
            ModalAction::ToggleFavorite => {
                self.favorites.toggle_favorite(&modal.recipe.id);
            }
            ModalAction::None => {}
        }
        action
    }

    /// Toggle a recipe's favorite state
    pub fn toggle_favorite(&self, id: &str) -> Vec<String> {
        self.favorites.toggle_favorite(id)
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    /// Assemble the screen for the current route
    pub fn screen(&self) -> Screen {
        let favorites = self.favorites.favorites();
        match self.current_route() {
            Route::Home => Screen::Home(HomeScreen::new(
                self.search_bar.clone(),
                &self.search.state(),
                &favorites,
                self.current_modal(),
            )),
            Route::Favorites => Screen::Favorites(FavoritesScreen::new(
                &self.catalog.recipes_by_ids(&favorites),
                self.current_modal(),
            )),
            Route::Profile => Screen::Profile(ProfileScreen::new(favorites.len())),
        }
    }

    /// Plain-text rendering of the header, screen and bottom navigation
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{}  [{}]  data-theme={}",
            BRAND,
            self.theme.toggle_label(),
            self.theme.data_theme()
        );
        let _ = writeln!(out, "--- {} ---", self.current_route().title());
        let _ = write!(out, "{}", self.screen());

        let nav: Vec<String> = self
            .bottom_nav()
            .items
            .iter()
            .map(|item| {
                if item.active {
                    format!("*{}*", item.label)
                } else {
                    item.label.to_string()
                }
            })
            .collect();
        let _ = writeln!(out, "--- {} ---", nav.join(" | "));
        out
    }
}

impl std::fmt::Debug for AppShell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppShell")
            .field("route", &self.current_route())
            .field("theme", &self.theme.theme_name)
            .field("favorites", &self.favorites)
            .field("search", &self.search)
            .finish()
    }
}
