//! Cross-instance change notification
//!
//! Every write made through a [`KvStore`](crate::kv::KvStore) handle is
//! published on a shared [`ChangeBus`]. Handles attached to the same storage
//! subscribe to the bus and observe writes made by *other* instances, the way
//! a browser tab observes `storage` events fired by its siblings.
//!
//! There is no conflict detection: the last write to a key wins.

use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::{RecvError, TryRecvError};
use uuid::Uuid;

/// Default number of buffered events per subscriber
pub const DEFAULT_BUS_CAPACITY: usize = 64;

/// Identity of one application instance sharing storage with others
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstanceId(Uuid);

impl InstanceId {
    /// Generate a fresh instance id
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for InstanceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A change to one storage key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageEvent {
    /// The key that changed
    pub key: String,
    /// New raw value, `None` when the key was removed
    pub new_value: Option<String>,
    /// Instance that made the change
    pub origin: InstanceId,
}

impl StorageEvent {
    /// Check whether this event concerns `key`
    pub fn concerns(&self, key: &str) -> bool {
        self.key == key
    }
}

/// Broadcast channel shared by every instance attached to one storage
#[derive(Debug, Clone)]
pub struct ChangeBus {
    tx: broadcast::Sender<StorageEvent>,
}

impl Default for ChangeBus {
    fn default() -> Self {
        Self::new(DEFAULT_BUS_CAPACITY)
    }
}

impl ChangeBus {
    /// Create a bus buffering up to `capacity` events per subscriber
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Publish an event. Returns the number of live subscribers reached.
    pub fn publish(&self, event: StorageEvent) -> usize {
        tracing::debug!(key = %event.key, origin = %event.origin, "publishing storage event");
        // No subscribers is not an error
        self.tx.send(event).unwrap_or(0)
    }

    /// Subscribe on behalf of `instance`; its own events are filtered out
    pub fn subscribe(&self, instance: InstanceId) -> StorageSubscription {
        StorageSubscription { rx: self.tx.subscribe(), instance }
    }

    /// Number of live subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

/// Stream of storage events made by other instances
#[derive(Debug)]
pub struct StorageSubscription {
    rx: broadcast::Receiver<StorageEvent>,
    instance: InstanceId,
}

impl StorageSubscription {
    /// The instance this subscription belongs to
    pub fn instance(&self) -> InstanceId {
        self.instance
    }

    /// Wait for the next foreign event. Returns `None` once the bus is gone.
    pub async fn recv(&mut self) -> Option<StorageEvent> {
        loop {
            match self.rx.recv().await {
                Ok(event) if event.origin == self.instance => continue,
                Ok(event) => return Some(event),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, instance = %self.instance, "storage subscriber lagged");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Take the next foreign event if one is already queued
    pub fn try_recv(&mut self) -> Option<StorageEvent> {
        loop {
            match self.rx.try_recv() {
                Ok(event) if event.origin == self.instance => continue,
                Ok(event) => return Some(event),
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, instance = %self.instance, "storage subscriber lagged");
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return None,
            }
        }
    }
}
