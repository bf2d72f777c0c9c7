//! Favorite recipes persistence
//!
//! Favorites are stored as a JSON array of recipe ids under a single key.
//! Storage failures never reach the caller: unreadable data reads back as an
//! empty list and failed writes are dropped after a warning, so the persisted
//! list and a caller's in-memory copy may silently diverge.

use storage::{KvStore, StorageSubscription};

/// Storage key holding the favorite ids
pub const FAVORITES_KEY: &str = "favorites";

/// Decode a raw persisted favorites value
///
/// Returns `None` when the value is not a JSON array of strings. Duplicate
/// ids are collapsed, keeping the first occurrence.
pub fn parse_favorites(raw: &str) -> Option<Vec<String>> {
    let ids: Vec<String> = serde_json::from_str(raw).ok()?;
    Some(dedup_preserving_order(ids))
}

fn dedup_preserving_order(ids: Vec<String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(ids.len());
    for id in ids {
        if !unique.contains(&id) {
            unique.push(id);
        }
    }
    unique
}

/// Favorites store backed by a [`KvStore`]
#[derive(Debug, Clone)]
pub struct FavoritesStore {
    kv: KvStore,
}

impl FavoritesStore {
    /// Create a favorites store over `kv`
    pub fn new(kv: KvStore) -> Self {
        Self { kv }
    }

    /// The underlying key-value handle
    pub fn kv(&self) -> &KvStore {
        &self.kv
    }

    /// Subscribe to favorites (and other) writes made by other instances
    pub fn subscribe(&self) -> StorageSubscription {
        self.kv.subscribe()
    }

    /// Get the persisted favorite ids
    ///
    /// Missing or unreadable data yields an empty list.
    pub fn get_favorites(&self) -> Vec<String> {
        let raw = match self.kv.get_raw(FAVORITES_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read favorites: {}", e);
                return Vec::new();
            }
        };

        if raw.is_empty() {
            return Vec::new();
        }

        parse_favorites(&raw).unwrap_or_else(|| {
            tracing::warn!("Ignoring malformed favorites value");
            Vec::new()
        })
    }

    /// Persist `ids` as the favorites list, verbatim
    ///
    /// A failed write is logged and otherwise ignored.
    pub fn set_favorites(&self, ids: &[String]) {
        if let Err(e) = self.kv.set(FAVORITES_KEY, ids) {
            tracing::warn!("Failed to persist favorites: {}", e);
        }
    }

    /// Check if a recipe is a favorite
    pub fn is_favorite(&self, id: &str) -> bool {
        self.get_favorites().iter().any(|fav| fav == id)
    }

    /// Toggle a recipe's favorite state
    ///
    /// Removes `id` when present, appends it otherwise, persists the result
    /// and returns it so callers can update their own copy without a re-read.
    pub fn toggle_favorite(&self, id: &str) -> Vec<String> {
        let mut next = self.get_favorites();
        if let Some(pos) = next.iter().position(|fav| fav == id) {
            next.remove(pos);
        } else {
            next.push(id.to_string());
        }
        self.set_favorites(&next);
        next
    }
}
