//! Favorites mirror
//!
//! [`FavoritesSync`] holds an in-memory copy of the persisted favorites and
//! keeps it consistent with:
//! - local toggles, which go through the store and adopt its returned list
//! - writes made by other instances sharing the same storage, delivered as
//!   storage change events
//!
//! Change events only signal that favorites moved; the mirror always re-reads
//! the persisted list, so an event delivered after a newer local toggle cannot
//! roll the mirror back.
//!
//! Two instances toggling at about the same time race on last-write-wins;
//! nothing is merged.

use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use app_core::favorites::{FavoritesStore, FAVORITES_KEY};
use storage::{StorageEvent, StorageSubscription};

struct Shared {
    store: FavoritesStore,
    mirror: Mutex<Vec<String>>,
    updates: watch::Sender<Vec<String>>,
}

impl Shared {
    /// Run `write` under the mirror lock, adopt its list and publish it
    fn update<F>(&self, write: F) -> Vec<String>
    where
        F: FnOnce(&FavoritesStore) -> Vec<String>,
    {
        let mut mirror = self.mirror.lock();
        let next = write(&self.store);
        if *mirror != next {
            *mirror = next.clone();
            self.updates.send_replace(next.clone());
        }
        next
    }

    fn apply_event(&self, event: &StorageEvent) -> bool {
        if !event.concerns(FAVORITES_KEY) {
            return false;
        }

        let next = self.update(FavoritesStore::get_favorites);
        tracing::debug!(origin = %event.origin, count = next.len(), "favorites changed elsewhere");
        true
    }
}

/// In-memory favorites mirror for one application instance
pub struct FavoritesSync {
    shared: Arc<Shared>,
    subscription: Mutex<Option<StorageSubscription>>,
    listener: Mutex<Option<JoinHandle<()>>>,
}

impl FavoritesSync {
    /// Create a mirror initialised from the store
    ///
    /// Changes made by other instances from this point on are buffered until
    /// [`listen`](Self::listen) starts applying them.
    pub fn new(store: FavoritesStore) -> Self {
        let subscription = store.subscribe();
        let initial = store.get_favorites();
        let (updates, _rx) = watch::channel(initial.clone());

        Self {
            shared: Arc::new(Shared { store, mirror: Mutex::new(initial), updates }),
            subscription: Mutex::new(Some(subscription)),
            listener: Mutex::new(None),
        }
    }

    /// The store this mirror follows
    pub fn store(&self) -> &FavoritesStore {
        &self.shared.store
    }

    /// Start applying change events from other instances
    ///
    /// Spawns onto the current tokio runtime. Calling it again replaces the
    /// previous listener and resynchronises from storage. The listener stops
    /// when this value is dropped.
    pub fn listen(&self) {
        let pending = self.subscription.lock().take();
        let mut subscription = match pending {
            Some(subscription) => subscription,
            None => {
                let subscription = self.shared.store.subscribe();
                self.shared.update(FavoritesStore::get_favorites);
                subscription
            }
        };
        let shared = Arc::clone(&self.shared);

        let handle = tokio::spawn(async move {
            while let Some(event) = subscription.recv().await {
                shared.apply_event(&event);
            }
        });

        if let Some(previous) = self.listener.lock().replace(handle) {
            previous.abort();
        }
    }

    /// Whether a listener task is running
    pub fn is_listening(&self) -> bool {
        self.listener
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Apply one change event; returns whether it concerned favorites
    pub fn apply_event(&self, event: &StorageEvent) -> bool {
        self.shared.apply_event(event)
    }

    /// Current favorite ids
    pub fn favorites(&self) -> Vec<String> {
        self.shared.mirror.lock().clone()
    }

    /// Number of favorites
    pub fn count(&self) -> usize {
        self.shared.mirror.lock().len()
    }

    /// Check if a recipe is a favorite
    pub fn is_favorite(&self, id: &str) -> bool {
        self.shared.mirror.lock().iter().any(|fav| fav == id)
    }

    /// Toggle a favorite, persisting through the store
    ///
    /// Toggles on the same instance are serialized, so each performs exactly
    /// one read-modify-write against storage.
    pub fn toggle_favorite(&self, id: &str) -> Vec<String> {
        self.shared.update(|store| store.toggle_favorite(id))
    }

    /// Overwrite all favorites: persist, then mirror
    pub fn replace_all(&self, ids: Vec<String>) {
        self.shared.update(|store| {
            store.set_favorites(&ids);
            ids
        });
    }

    /// Receive a snapshot every time the mirror changes
    pub fn changes(&self) -> watch::Receiver<Vec<String>> {
        self.shared.updates.subscribe()
    }
}

impl Drop for FavoritesSync {
    fn drop(&mut self) {
        if let Some(handle) = self.listener.get_mut().take() {
            handle.abort();
        }
    }
}

impl std::fmt::Debug for FavoritesSync {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FavoritesSync")
            .field("favorites", &*self.shared.mirror.lock())
            .finish()
    }
}
