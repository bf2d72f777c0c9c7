//! UI components for the recipe explorer
//!
//! Components are plain view models: serializable props computed from
//! application state, plus the small amount of local interaction state a
//! widget owns (the search bar's draft text). A frontend renders them; tests
//! assert on them directly.
//!
//! # Available Components
//!
//! - [`SearchBar`] - Query input with submit button
//! - [`RecipeCard`] - Recipe preview
//! - [`RecipeGrid`] - List of cards
//! - [`RecipeModal`] - Recipe details with favorite toggle
//! - [`BottomNav`] - Primary navigation

use app_core::Recipe;
use serde::Serialize;

use crate::navigation::{NavigationTab, Route};

/// Number of tags shown on a card
pub const CARD_TAG_LIMIT: usize = 3;

// =============================================================================
// Search Bar
// =============================================================================

/// Search input placeholder
pub const SEARCH_PLACEHOLDER: &str = "Search recipes or tags e.g. pasta, vegan";

/// Search input and form accessible label
pub const SEARCH_ARIA_LABEL: &str = "Search recipes";

/// Query input with a submit button
///
/// The draft is local until submitted. Whenever the controlling query
/// changes, the draft is reset to it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchBar {
    draft: String,
    value: String,
}

impl SearchBar {
    /// Create a search bar showing `value`
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        Self { draft: value.clone(), value }
    }

    /// Text currently in the input
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Replace the input text
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Follow the controlling query
    pub fn sync(&mut self, value: &str) {
        if self.value != value {
            self.value = value.to_string();
            self.draft = value.to_string();
        }
    }

    /// Submit the form, returning the text to use as the query
    pub fn submit(&self) -> String {
        self.draft.clone()
    }

    /// Label of the submit button
    pub fn button_label(loading: bool) -> &'static str {
        if loading {
            "Searching…"
        } else {
            "Search"
        }
    }
}

// =============================================================================
// Recipe Card
// =============================================================================

/// Recipe preview card
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeCard {
    /// Recipe opened on press
    pub recipe_id: String,
    /// Title, with a star appended for favorites
    pub title: String,
    /// Leading tags
    pub tags: Vec<String>,
    /// Thumbnail, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Whether the recipe is a favorite
    pub favorite: bool,
    /// Accessible label
    pub aria_label: String,
}

impl RecipeCard {
    /// Build the card for `recipe`
    pub fn new(recipe: &Recipe, favorite: bool) -> Self {
        let title = if favorite {
            format!("{} ★", recipe.title)
        } else {
            recipe.title.clone()
        };

        Self {
            recipe_id: recipe.id.clone(),
            title,
            tags: recipe.tags.iter().take(CARD_TAG_LIMIT).cloned().collect(),
            image: recipe.has_image().then(|| recipe.image.clone()),
            favorite,
            aria_label: format!("Open {}", recipe.title),
        }
    }
}

// =============================================================================
// Recipe Grid
// =============================================================================

/// Grid of recipe cards
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecipeGrid {
    /// Cards in display order
    pub cards: Vec<RecipeCard>,
}

impl RecipeGrid {
    /// Build cards for `recipes`, marking favorites with `is_favorite`
    pub fn new<F>(recipes: &[Recipe], is_favorite: F) -> Self
    where
        F: Fn(&str) -> bool,
    {
        Self {
            cards: recipes
                .iter()
                .map(|recipe| RecipeCard::new(recipe, is_favorite(&recipe.id)))
                .collect(),
        }
    }

    /// Check if the grid has no cards
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of cards
    pub fn len(&self) -> usize {
        self.cards.len()
    }
}

// =============================================================================
// Recipe Modal
// =============================================================================

/// Input the modal reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalEvent {
    /// Escape key pressed
    Escape,
    /// Pointer down on the backdrop outside the dialog
    Backdrop,
    /// Pointer down inside the dialog
    Inside,
    /// Close button pressed
    CloseButton,
    /// Favorite button pressed
    FavoriteButton,
}

/// What the owner of the modal should do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalAction {
    /// Dismiss the modal
    Close,
    /// Toggle the recipe's favorite state
    ToggleFavorite,
    /// Nothing
    None,
}

/// Recipe details dialog
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeModal {
    /// Recipe shown
    pub recipe: Recipe,
    /// Whether the recipe is a favorite
    pub favorite: bool,
}

impl RecipeModal {
    /// Accessible label of the close button
    pub const CLOSE_ARIA_LABEL: &'static str = "Close details";

    /// Build the modal for `recipe`
    pub fn new(recipe: Recipe, favorite: bool) -> Self {
        Self { recipe, favorite }
    }

    /// Dialog title
    pub fn title(&self) -> &str {
        &self.recipe.title
    }

    /// Label of the favorite button
    pub fn favorite_label(&self) -> &'static str {
        if self.favorite {
            "★ Favorited"
        } else {
            "☆ Favorite"
        }
    }

    /// Accessible label of the favorite button
    pub fn favorite_aria_label(&self) -> &'static str {
        if self.favorite {
            "Remove from favorites"
        } else {
            "Add to favorites"
        }
    }

    /// Whether the tags section is shown
    pub fn shows_tags(&self) -> bool {
        !self.recipe.tags.is_empty()
    }

    /// Map an input event to an action
    pub fn handle(&self, event: ModalEvent) -> ModalAction {
        match event {
            ModalEvent::Escape | ModalEvent::Backdrop | ModalEvent::CloseButton => ModalAction::Close,
            ModalEvent::FavoriteButton => ModalAction::ToggleFavorite,
            ModalEvent::Inside => ModalAction::None,
        }
    }
}

// =============================================================================
// Bottom Navigation
// =============================================================================

/// One bottom navigation link
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavItem {
    /// Tab
    pub tab: NavigationTab,
    /// Link target
    pub path: &'static str,
    /// Visible label
    pub label: &'static str,
    /// Accessible label
    pub aria_label: String,
    /// Whether this link matches the current path
    pub active: bool,
}

/// Bottom navigation bar for primary routes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BottomNav {
    /// Links in display order
    pub items: Vec<NavItem>,
}

impl BottomNav {
    /// Accessible label of the nav landmark
    pub const ARIA_LABEL: &'static str = "Primary";

    /// Build the bar with the link for `current` marked active
    pub fn new(current: Route) -> Self {
        Self {
            items: NavigationTab::all()
                .into_iter()
                .map(|tab| NavItem {
                    tab,
                    path: tab.root_route().to_path(),
                    label: tab.label(),
                    aria_label: tab.aria_label(),
                    active: tab.root_route() == current,
                })
                .collect(),
        }
    }

    /// The active link, if any
    pub fn active(&self) -> Option<&NavItem> {
        self.items.iter().find(|item| item.active)
    }
}
