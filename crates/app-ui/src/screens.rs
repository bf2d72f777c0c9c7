//! Application screens
//!
//! Each screen is assembled from component view models and implements
//! [`Display`](std::fmt::Display) as a plain-text rendering.

use std::fmt;

use app_core::Recipe;
use app_state::SearchState;
use serde::Serialize;

use crate::components::{RecipeGrid, RecipeModal, SearchBar, SEARCH_PLACEHOLDER};

/// Shown on Home when a settled search has no results
pub const NO_RESULTS_MESSAGE: &str = "No recipes found. Try a different search.";

/// Shown on Favorites when nothing is saved
pub const NO_FAVORITES_MESSAGE: &str = "No favorites yet. Tap the heart on a recipe to save it.";

/// Profile display name
pub const GUEST_NAME: &str = "Guest";

/// Profile greeting
pub const WELCOME_MESSAGE: &str = "Welcome back! Explore tasty ideas.";

fn saved_recipes_text(count: usize) -> String {
    format!("Saved recipes: {}", count)
}

fn write_grid(f: &mut fmt::Formatter<'_>, grid: &RecipeGrid) -> fmt::Result {
    for card in &grid.cards {
        writeln!(f, "  {}. {}  [{}]", card.recipe_id, card.title, card.tags.join(", "))?;
    }
    Ok(())
}

fn write_modal(f: &mut fmt::Formatter<'_>, modal: &RecipeModal) -> fmt::Result {
    writeln!(f)?;
    writeln!(f, "== {} ==  ({})", modal.title(), modal.favorite_label())?;
    writeln!(f, "Ingredients")?;
    for item in &modal.recipe.ingredients {
        writeln!(f, "  - {}", item)?;
    }
    writeln!(f, "Steps")?;
    for (i, step) in modal.recipe.steps.iter().enumerate() {
        writeln!(f, "  {}. {}", i + 1, step)?;
    }
    if modal.shows_tags() {
        writeln!(f, "Tags")?;
        writeln!(f, "  {}", modal.recipe.tags.join(", "))?;
    }
    Ok(())
}

// =============================================================================
// Home
// =============================================================================

/// Home screen: search and browse recipes
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeScreen {
    /// Query input
    pub search_bar: SearchBar,
    /// Submit button label
    pub search_button: &'static str,
    /// Results
    pub grid: RecipeGrid,
    /// Opened recipe
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modal: Option<RecipeModal>,
    /// Empty-state message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<&'static str>,
    /// Number of saved recipes
    pub saved_count: usize,
}

impl HomeScreen {
    /// Build the screen from the search state and favorites
    pub fn new(
        search_bar: SearchBar,
        search: &SearchState,
        favorites: &[String],
        modal: Option<RecipeModal>,
    ) -> Self {
        let grid = RecipeGrid::new(&search.results, |id| favorites.iter().any(|f| f == id));
        Self {
            search_bar,
            search_button: SearchBar::button_label(search.loading),
            grid,
            modal,
            empty_message: search.is_empty_result().then_some(NO_RESULTS_MESSAGE),
            saved_count: favorites.len(),
        }
    }

    /// The saved-count line
    pub fn saved_text(&self) -> String {
        saved_recipes_text(self.saved_count)
    }
}

impl fmt::Display for HomeScreen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let draft = self.search_bar.draft();
        if draft.is_empty() {
            writeln!(f, "[ {} ] ({})", SEARCH_PLACEHOLDER, self.search_button)?;
        } else {
            writeln!(f, "[ {} ] ({})", draft, self.search_button)?;
        }
        write_grid(f, &self.grid)?;
        if let Some(message) = self.empty_message {
            writeln!(f, "{}", message)?;
        }
        writeln!(f, "{}", self.saved_text())?;
        if let Some(modal) = &self.modal {
            write_modal(f, modal)?;
        }
        Ok(())
    }
}

// =============================================================================
// Favorites
// =============================================================================

/// Favorites screen: saved recipes in catalog order
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoritesScreen {
    /// Saved recipes
    pub grid: RecipeGrid,
    /// Opened recipe
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modal: Option<RecipeModal>,
    /// Empty-state message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<&'static str>,
}

impl FavoritesScreen {
    /// Section heading
    pub const TITLE: &'static str = "Favorites";

    /// Build the screen from the saved recipes
    pub fn new(saved: &[Recipe], modal: Option<RecipeModal>) -> Self {
        Self {
            grid: RecipeGrid::new(saved, |_| true),
            modal,
            empty_message: saved.is_empty().then_some(NO_FAVORITES_MESSAGE),
        }
    }
}

impl fmt::Display for FavoritesScreen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", Self::TITLE)?;
        write_grid(f, &self.grid)?;
        if let Some(message) = self.empty_message {
            writeln!(f, "{}", message)?;
        }
        if let Some(modal) = &self.modal {
            write_modal(f, modal)?;
        }
        Ok(())
    }
}

// =============================================================================
// Profile
// =============================================================================

/// Profile placeholder with saved count and theme toggle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileScreen {
    /// Display name
    pub name: &'static str,
    /// Greeting
    pub welcome: &'static str,
    /// Number of saved recipes
    pub saved_count: usize,
}

impl ProfileScreen {
    /// Stats card heading
    pub const STATS_TITLE: &'static str = "Your Stats";

    /// Theme button label
    pub const TOGGLE_THEME_LABEL: &'static str = "Toggle Theme";

    /// Theme button accessible label
    pub const TOGGLE_THEME_ARIA_LABEL: &'static str = "Toggle theme";

    /// Build the screen
    pub fn new(saved_count: usize) -> Self {
        Self { name: GUEST_NAME, welcome: WELCOME_MESSAGE, saved_count }
    }

    /// The saved-count line
    pub fn saved_text(&self) -> String {
        saved_recipes_text(self.saved_count)
    }
}

impl fmt::Display for ProfileScreen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "{}", self.welcome)?;
        writeln!(f)?;
        writeln!(f, "{}", Self::STATS_TITLE)?;
        writeln!(f, "{}", self.saved_text())?;
        writeln!(f, "({})", Self::TOGGLE_THEME_LABEL)
    }
}

// =============================================================================
// Screen
// =============================================================================

/// The screen for the current route
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "screen", rename_all = "lowercase")]
pub enum Screen {
    /// Home
    Home(HomeScreen),
    /// Favorites
    Favorites(FavoritesScreen),
    /// Profile
    Profile(ProfileScreen),
}

impl Screen {
    /// Opened recipe, if the screen shows one
    pub fn modal(&self) -> Option<&RecipeModal> {
        match self {
            Screen::Home(home) => home.modal.as_ref(),
            Screen::Favorites(favorites) => favorites.modal.as_ref(),
            Screen::Profile(_) => None,
        }
    }

    /// Empty-state message, if shown
    pub fn empty_message(&self) -> Option<&'static str> {
        match self {
            Screen::Home(home) => home.empty_message,
            Screen::Favorites(favorites) => favorites.empty_message,
            Screen::Profile(_) => None,
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Screen::Home(home) => fmt::Display::fmt(home, f),
            Screen::Favorites(favorites) => fmt::Display::fmt(favorites, f),
            Screen::Profile(profile) => fmt::Display::fmt(profile, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use app_core::recipes::builtin_recipes;

    fn ids(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn settled(results: Vec<Recipe>) -> SearchState {
        SearchState { query: String::new(), results, loading: false }
    }

    #[test]
    fn test_home_lists_results_with_saved_count() {
        let results: Vec<Recipe> = builtin_recipes().iter().take(3).cloned().collect();
        let screen = HomeScreen::new(SearchBar::default(), &settled(results), &ids(&["2", "9"]), None);

        assert_eq!(screen.grid.len(), 3);
        assert!(screen.grid.cards[1].favorite);
        assert_eq!(screen.empty_message, None);
        assert_eq!(screen.saved_text(), "Saved recipes: 2");
        assert_eq!(screen.search_button, "Search");
    }

    #[test]
    fn test_home_empty_message_only_when_settled() {
        let screen = HomeScreen::new(SearchBar::new("zzz"), &settled(vec![]), &[], None);
        assert_eq!(screen.empty_message, Some(NO_RESULTS_MESSAGE));

        let loading = SearchState { query: "zzz".to_string(), results: vec![], loading: true };
        let screen = HomeScreen::new(SearchBar::new("zzz"), &loading, &[], None);
        assert_eq!(screen.empty_message, None);
        assert_eq!(screen.search_button, "Searching…");
    }

    #[test]
    fn test_favorites_screen() {
        let empty = FavoritesScreen::new(&[], None);
        assert_eq!(empty.empty_message, Some(NO_FAVORITES_MESSAGE));

        let saved: Vec<Recipe> = builtin_recipes().iter().take(2).cloned().collect();
        let screen = FavoritesScreen::new(&saved, None);
        assert_eq!(screen.empty_message, None);
        assert!(screen.grid.cards.iter().all(|c| c.favorite));
        assert_eq!(screen.grid.cards[0].title, "Spaghetti Bolognese ★");
    }

    #[test]
    fn test_profile_screen() {
        let screen = ProfileScreen::new(4);
        assert_eq!(screen.name, "Guest");
        assert_eq!(screen.saved_text(), "Saved recipes: 4");

        let text = screen.to_string();
        assert!(text.contains("Welcome back! Explore tasty ideas."));
        assert!(text.contains("Your Stats"));
        assert!(text.contains("Toggle Theme"));
    }

    #[test]
    fn test_home_render_includes_modal() {
        let recipe = builtin_recipes()[0].clone();
        let modal = RecipeModal::new(recipe.clone(), true);
        let screen = Screen::Home(HomeScreen::new(
            SearchBar::default(),
            &settled(vec![recipe]),
            &ids(&["1"]),
            Some(modal),
        ));

        assert!(screen.modal().is_some());
        let text = screen.to_string();
        assert!(text.contains(SEARCH_PLACEHOLDER));
        assert!(text.contains("== Spaghetti Bolognese ==  (★ Favorited)"));
        assert!(text.contains("  1. Boil pasta"));
        assert!(text.contains("Tags"));
    }

    #[test]
    fn test_screen_serialization_tag() {
        let json = serde_json::to_value(Screen::Profile(ProfileScreen::new(0))).unwrap();
        assert_eq!(json["screen"], "profile");
        assert_eq!(json["savedCount"], 0);
    }
}
