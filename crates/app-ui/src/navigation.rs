//! Navigation for the recipe explorer
//!
//! This module provides:
//! - Route definitions and a path router with a Home fallback
//! - Bottom navigation tabs
//! - Navigation state with a history stack and a modal layer

use serde::{Deserialize, Serialize};

// =============================================================================
// Route Definitions
// =============================================================================

/// All screens in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    /// Search and browse
    #[default]
    Home,
    /// Saved recipes
    Favorites,
    /// Guest profile
    Profile,
}

impl Route {
    /// Convert route to URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Favorites => "/favorites",
            Route::Profile => "/profile",
        }
    }

    /// Get screen title for this route
    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Favorites => "Favorites",
            Route::Profile => "Profile",
        }
    }

    /// Whether recipes can be opened in a modal on this screen
    pub fn supports_modal(&self) -> bool {
        matches!(self, Route::Home | Route::Favorites)
    }
}

// =============================================================================
// Navigation Tabs
// =============================================================================

/// Bottom navigation tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NavigationTab {
    /// Home tab
    #[default]
    Home,
    /// Favorites tab
    Favorites,
    /// Profile tab
    Profile,
}

impl NavigationTab {
    /// Get the root route for this tab
    pub fn root_route(&self) -> Route {
        match self {
            NavigationTab::Home => Route::Home,
            NavigationTab::Favorites => Route::Favorites,
            NavigationTab::Profile => Route::Profile,
        }
    }

    /// Get label for this tab
    pub fn label(&self) -> &'static str {
        self.root_route().title()
    }

    /// Accessible label, e.g. "Go to Favorites"
    pub fn aria_label(&self) -> String {
        format!("Go to {}", self.label())
    }

    /// Tab owning `route`
    pub fn for_route(route: Route) -> Self {
        match route {
            Route::Home => NavigationTab::Home,
            Route::Favorites => NavigationTab::Favorites,
            Route::Profile => NavigationTab::Profile,
        }
    }

    /// Get all tabs in order
    pub fn all() -> [NavigationTab; 3] {
        [NavigationTab::Home, NavigationTab::Favorites, NavigationTab::Profile]
    }
}

// =============================================================================
// Navigation State
// =============================================================================

/// A history entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackEntry {
    /// The route
    pub route: Route,
    /// Unique key for this entry
    pub key: String,
}

impl StackEntry {
    /// Create a new stack entry
    pub fn new(route: Route) -> Self {
        Self { route, key: uuid::Uuid::new_v4().to_string() }
    }
}

/// A recipe opened over the current screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModalEntry {
    /// Id of the recipe shown
    pub recipe_id: String,
    /// Unique key for this entry
    pub key: String,
}

impl ModalEntry {
    /// Create a new modal entry
    pub fn new(recipe_id: impl Into<String>) -> Self {
        Self { recipe_id: recipe_id.into(), key: uuid::Uuid::new_v4().to_string() }
    }
}

/// Complete navigation state
///
/// Serialize-only: the history stack is never empty, which a deserialized
/// value could not guarantee.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavigationState {
    /// History, bottom to top; never empty
    stack: Vec<StackEntry>,
    /// Modal stack (overlays on top of the current screen)
    pub modal_stack: Vec<ModalEntry>,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new(Route::Home)
    }
}

impl NavigationState {
    /// Create a navigation state rooted at `route`
    pub fn new(route: Route) -> Self {
        Self { stack: vec![StackEntry::new(route)], modal_stack: Vec::new() }
    }

    /// Get the current stack entry
    pub fn current_entry(&self) -> &StackEntry {
        self.stack.last().expect("Stack should never be empty")
    }

    /// Get the current route
    pub fn current_route(&self) -> Route {
        self.current_entry().route
    }

    /// Tab highlighted in the bottom navigation
    pub fn active_tab(&self) -> NavigationTab {
        NavigationTab::for_route(self.current_route())
    }

    /// Navigate to a route, closing any open modal
    ///
    /// Navigating to the current route only closes the modal.
    pub fn navigate(&mut self, route: Route) {
        self.modal_stack.clear();
        if self.current_route() != route {
            self.stack.push(StackEntry::new(route));
        }
    }

    /// Replace the current route without growing history
    pub fn replace(&mut self, route: Route) {
        self.modal_stack.clear();
        if let Some(last) = self.stack.last_mut() {
            *last = StackEntry::new(route);
        }
    }

    /// Switch to a tab
    pub fn switch_tab(&mut self, tab: NavigationTab) {
        self.navigate(tab.root_route());
    }

    /// Go back: dismiss the top modal first, then pop history
    pub fn go_back(&mut self) -> bool {
        if self.dismiss_modal() {
            return true;
        }
        if self.stack.len() > 1 {
            self.stack.pop();
            true
        } else {
            false
        }
    }

    /// Check if we can go back
    pub fn can_go_back(&self) -> bool {
        !self.modal_stack.is_empty() || self.stack.len() > 1
    }

    /// History depth
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Present a recipe modal
    pub fn present_modal(&mut self, recipe_id: impl Into<String>) {
        self.modal_stack.push(ModalEntry::new(recipe_id));
    }

    /// Dismiss the top modal
    pub fn dismiss_modal(&mut self) -> bool {
        self.modal_stack.pop().is_some()
    }

    /// Check if any modals are presented
    pub fn has_modals(&self) -> bool {
        !self.modal_stack.is_empty()
    }

    /// Recipe shown in the top modal
    pub fn open_recipe(&self) -> Option<&str> {
        self.modal_stack.last().map(|m| m.recipe_id.as_str())
    }
}

// =============================================================================
// Router
// =============================================================================

/// Route pattern for matching
struct RoutePattern {
    /// Literal path segments
    segments: Vec<String>,
    /// Route produced on match
    route: Route,
}

/// Outcome of resolving a path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The path names a screen
    Matched(Route),
    /// Unknown path; replace it with this route
    Redirect(Route),
}

impl Resolution {
    /// The route that ends up displayed
    pub fn route(&self) -> Route {
        match self {
            Resolution::Matched(route) | Resolution::Redirect(route) => *route,
        }
    }
}

/// URL Router for parsing paths to routes
pub struct Router {
    patterns: Vec<RoutePattern>,
    fallback: Route,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    /// Create a new router with all routes
    pub fn new() -> Self {
        let mut router = Self { patterns: Vec::new(), fallback: Route::Home };
        for tab in NavigationTab::all() {
            let route = tab.root_route();
            router.add_route(route.to_path(), route);
        }
        router
    }

    fn add_route(&mut self, pattern: &str, route: Route) {
        let segments = split_path(pattern).into_iter().map(str::to_string).collect();
        self.patterns.push(RoutePattern { segments, route });
    }

    /// Match a path to a route
    ///
    /// The query string and fragment are ignored; percent-encoded segments
    /// are decoded before comparison.
    pub fn match_path(&self, path: &str) -> Option<Route> {
        let pathname = path.split(['?', '#']).next().unwrap_or_default();

        let mut actual = Vec::new();
        for segment in split_path(pathname) {
            actual.push(urlencoding::decode(segment).ok()?.into_owned());
        }

        self.patterns
            .iter()
            .find(|pattern| pattern.segments == actual)
            .map(|pattern| pattern.route)
    }

    /// Resolve a path, redirecting unknown paths to Home
    pub fn resolve(&self, path: &str) -> Resolution {
        match self.match_path(path) {
            Some(route) => Resolution::Matched(route),
            None => {
                tracing::debug!(path, "unknown path, redirecting to {}", self.fallback.to_path());
                Resolution::Redirect(self.fallback)
            }
        }
    }
}

fn split_path(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

impl NavigationState {
    /// Navigate to a path through `router`
    ///
    /// Unknown paths replace the current entry with the fallback route
    /// instead of adding to history.
    pub fn navigate_to_path(&mut self, router: &Router, path: &str) -> Route {
        match router.resolve(path) {
            Resolution::Matched(route) => self.navigate(route),
            Resolution::Redirect(route) => self.replace(route),
        }
        self.current_route()
    }
}

// =============================================================================
// Tests
// =============================================================================
