//! Search controller
//!
//! Holds the current query and its results. Each query change issues a
//! catalog search tagged with a monotonically increasing sequence number; a
//! resolving search is applied only if its number is still the latest one
//! issued. Slower, superseded searches run to completion and their results
//! are dropped.

use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use app_core::search::RecipeSource;
use app_core::Recipe;

/// Search lifecycle for the current query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    /// No request in flight for the current query
    Idle,

    /// A request for the current query is in flight
    Searching,
}

/// Snapshot of the search state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    /// Current query text, as typed
    pub query: String,

    /// Results of the latest resolved search, in catalog order
    pub results: Vec<Recipe>,

    /// Whether a search for the current query is in flight
    pub loading: bool,
}

impl SearchState {
    /// Lifecycle state of the current query
    pub fn status(&self) -> SearchStatus {
        if self.loading {
            SearchStatus::Searching
        } else {
            SearchStatus::Idle
        }
    }

    /// Settled with nothing to show
    pub fn is_empty_result(&self) -> bool {
        !self.loading && self.results.is_empty()
    }
}

struct Inner {
    state: SearchState,
    latest: u64,
}

struct Shared {
    inner: Mutex<Inner>,
    updates: watch::Sender<SearchState>,
}

impl Shared {
    fn resolve(&self, sequence: u64, results: Vec<Recipe>) -> bool {
        let snapshot = {
            let mut inner = self.inner.lock();
            if inner.latest != sequence {
                tracing::debug!(sequence, latest = inner.latest, "Discarding stale search results");
                return false;
            }
            inner.state.results = results;
            inner.state.loading = false;
            inner.state.clone()
        };
        self.updates.send_replace(snapshot);
        true
    }
}

/// Search controller over a [`RecipeSource`]
pub struct SearchController {
    source: Arc<dyn RecipeSource>,
    shared: Arc<Shared>,
}

impl SearchController {
    /// Create an idle controller with an empty query and no results
    pub fn new(source: Arc<dyn RecipeSource>) -> Self {
        let (updates, _rx) = watch::channel(SearchState::default());
        Self {
            source,
            shared: Arc::new(Shared {
                inner: Mutex::new(Inner { state: SearchState::default(), latest: 0 }),
                updates,
            }),
        }
    }

    /// Change the query, searching if it differs from the current one
    ///
    /// Returns the handle of the issued search, or `None` when the query is
    /// unchanged and a search was already issued for it. Must be called from
    /// within a tokio runtime.
    pub fn set_query(&self, query: impl Into<String>) -> Option<JoinHandle<()>> {
        let query = query.into();
        {
            let inner = self.shared.inner.lock();
            if inner.latest > 0 && inner.state.query == query {
                return None;
            }
        }
        Some(self.issue(query))
    }

    /// Re-run the search for the current query
    pub fn refresh(&self) -> JoinHandle<()> {
        let query = self.shared.inner.lock().state.query.clone();
        self.issue(query)
    }

    fn issue(&self, query: String) -> JoinHandle<()> {
        let (sequence, snapshot) = {
            let mut inner = self.shared.inner.lock();
            inner.latest += 1;
            inner.state.query = query.clone();
            inner.state.loading = true;
            (inner.latest, inner.state.clone())
        };
        self.shared.updates.send_replace(snapshot);
        tracing::debug!(sequence, query = %query, "issuing search");

        let source = Arc::clone(&self.source);
        let shared = Arc::clone(&self.shared);
        tokio::spawn(async move {
            let results = source.search(&query).await;
            shared.resolve(sequence, results);
        })
    }

    /// Current state snapshot
    pub fn state(&self) -> SearchState {
        self.shared.inner.lock().state.clone()
    }

    /// Lifecycle state of the current query
    pub fn status(&self) -> SearchStatus {
        self.shared.inner.lock().state.status()
    }

    /// Current query text
    pub fn query(&self) -> String {
        self.shared.inner.lock().state.query.clone()
    }

    /// Results of the latest applied search
    pub fn results(&self) -> Vec<Recipe> {
        self.shared.inner.lock().state.results.clone()
    }

    /// Whether a search for the current query is in flight
    pub fn is_loading(&self) -> bool {
        self.shared.inner.lock().state.loading
    }

    /// Sequence number of the most recently issued search (0 before any)
    pub fn latest_sequence(&self) -> u64 {
        self.shared.inner.lock().latest
    }

    /// Receive a snapshot on every state change
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.shared.updates.subscribe()
    }
}

impl std::fmt::Debug for SearchController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.shared.inner.lock();
        f.debug_struct("SearchController")
            .field("query", &inner.state.query)
            .field("results", &inner.state.results.len())
            .field("loading", &inner.state.loading)
            .field("latest", &inner.latest)
            .finish()
    }
}
