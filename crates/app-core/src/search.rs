//! Recipe catalog search
//!
//! The catalog is a fixed in-memory list. Search is a case-insensitive
//! substring match over titles and tags, resolved after a configurable delay
//! that stands in for network latency. It cannot fail.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::recipes::{builtin_recipes, Recipe};

/// Default simulated search latency
pub const DEFAULT_SEARCH_LATENCY: Duration = Duration::from_millis(250);

/// Normalize a raw query for matching: trim whitespace and lowercase
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Anything the search controller can query for recipes
#[async_trait]
pub trait RecipeSource: Send + Sync {
    /// Resolve the recipes matching `query`
    async fn search(&self, query: &str) -> Vec<Recipe>;
}

/// Catalog configuration
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Delay before a search resolves
    pub latency: Duration,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self { latency: DEFAULT_SEARCH_LATENCY }
    }
}

impl CatalogConfig {
    /// Configuration with no simulated latency
    pub fn instant() -> Self {
        Self { latency: Duration::ZERO }
    }

    /// Set the simulated latency
    pub fn latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

/// Immutable recipe catalog
#[derive(Debug, Clone)]
pub struct RecipeCatalog {
    recipes: Arc<[Recipe]>,
    config: CatalogConfig,
}

impl Default for RecipeCatalog {
    fn default() -> Self {
        Self::builtin(CatalogConfig::default())
    }
}

impl RecipeCatalog {
    /// Catalog over the built-in mock recipes
    pub fn builtin(config: CatalogConfig) -> Self {
        Self { recipes: builtin_recipes(), config }
    }

    /// Catalog over caller-provided recipes
    pub fn with_recipes(recipes: Vec<Recipe>, config: CatalogConfig) -> Self {
        Self { recipes: recipes.into(), config }
    }

    /// Get the catalog configuration
    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// The full catalog, in catalog order
    pub fn all_recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    /// Look up a recipe by id
    pub fn get(&self, id: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == id)
    }

    /// Recipes whose id is in `ids`, in catalog order
    ///
    /// Ids unknown to the catalog are ignored.
    pub fn recipes_by_ids<S: AsRef<str>>(&self, ids: &[S]) -> Vec<Recipe> {
        self.recipes
            .iter()
            .filter(|r| ids.iter().any(|id| id.as_ref() == r.id))
            .cloned()
            .collect()
    }

    /// Match the catalog against `query` without any delay
    pub fn filter(&self, query: &str) -> Vec<Recipe> {
        let q = normalize_query(query);
        if q.is_empty() {
            return self.recipes.to_vec();
        }
        self.recipes.iter().filter(|r| r.matches(&q)).cloned().collect()
    }

    /// Search the catalog, resolving after the configured latency
    ///
    /// # Example
    ///
    /// ```
    /// # use app_core::search::{CatalogConfig, RecipeCatalog};
    /// # #[tokio::main(flavor = "current_thread")]
    /// # async fn main() {
    /// let catalog = RecipeCatalog::builtin(CatalogConfig::instant());
    /// let results = catalog.search_recipes("  VEGAN ").await;
    /// assert!(results.iter().any(|r| r.title == "Falafel Wrap"));
    /// # }
    /// ```
    pub async fn search_recipes(&self, query: &str) -> Vec<Recipe> {
        if !self.config.latency.is_zero() {
            tokio::time::sleep(self.config.latency).await;
        }
        let results = self.filter(query);
        tracing::debug!(query, count = results.len(), "catalog search resolved");
        results
    }
}

#[async_trait]
impl RecipeSource for RecipeCatalog {
    async fn search(&self, query: &str) -> Vec<Recipe> {
        self.search_recipes(query).await
    }
}
