//! Key-value store for persisted application state
//!
//! Values are stored as JSON strings under plain string keys. The raw
//! persistence is pluggable through [`KeyValueBackend`]: [`SledBackend`] keeps
//! data on disk, [`MemoryBackend`] keeps it in memory (optionally with a byte
//! quota, to exercise write failures).
//!
//! A [`KvStore`] is one application instance's handle onto that storage.
//! Sibling handles created with [`KvStore::attach_instance`] share the backend
//! and the change bus, so each observes the writes of the others.

use parking_lot::RwLock;
use serde::{de::DeserializeOwned, Serialize};
use sled::Db;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

use crate::sync::{ChangeBus, InstanceId, StorageEvent, StorageSubscription, DEFAULT_BUS_CAPACITY};

/// Key-value store error types
#[derive(Debug, Error)]
pub enum KvError {
    /// Sled database error
    #[error("Database error: {0}")]
    Database(#[from] sled::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Write rejected because the storage is full
    #[error("Quota exceeded writing {key}: limit is {limit} bytes")]
    QuotaExceeded {
        /// Key being written
        key: String,
        /// Configured quota in bytes
        limit: usize,
    },

    /// Stored bytes are not a UTF-8 string
    #[error("Invalid value for key: {0}")]
    InvalidValue(String),
}

/// Result type for key-value operations
pub type Result<T> = std::result::Result<T, KvError>;

/// Key-value store configuration
#[derive(Debug, Clone)]
pub struct KvConfig {
    /// Database path
    pub path: String,
    /// Cache capacity in bytes
    pub cache_capacity: u64,
    /// Enable compression
    pub use_compression: bool,
    /// Flush interval in milliseconds (None for immediate flush)
    pub flush_every_ms: Option<u64>,
    /// Events buffered per change subscriber
    pub bus_capacity: usize,
}

impl Default for KvConfig {
    fn default() -> Self {
        Self {
            path: "recipe_explorer.db".to_string(),
            cache_capacity: 8 * 1024 * 1024, // 8MB
            use_compression: true,
            flush_every_ms: Some(500),
            bus_capacity: DEFAULT_BUS_CAPACITY,
        }
    }
}

impl KvConfig {
    /// Create a new configuration with a custom path
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into(), ..Default::default() }
    }

    /// Set cache capacity in bytes
    pub fn cache_capacity(mut self, bytes: u64) -> Self {
        self.cache_capacity = bytes;
        self
    }

    /// Enable or disable compression
    pub fn use_compression(mut self, enabled: bool) -> Self {
        self.use_compression = enabled;
        self
    }

    /// Set flush interval in milliseconds
    pub fn flush_every_ms(mut self, ms: Option<u64>) -> Self {
        self.flush_every_ms = ms;
        self
    }

    /// Set how many change events each subscriber buffers
    pub fn bus_capacity(mut self, capacity: usize) -> Self {
        self.bus_capacity = capacity;
        self
    }
}

/// Raw string persistence
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueBackend: Send + Sync {
    /// Read the raw value stored under `key`
    fn get_raw(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set_raw(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`; returns whether it existed
    fn remove(&self, key: &str) -> Result<bool>;

    /// Remove every key; returns the keys that were present
    fn clear(&self) -> Result<Vec<String>>;

    /// Flush pending writes
    fn flush(&self) -> Result<()> {
        Ok(())
    }
}

/// Sled-backed persistence
pub struct SledBackend {
    db: Db,
}

impl SledBackend {
    /// Open (or create) the database described by `config`
    pub fn open(config: &KvConfig) -> Result<Self> {
        let mut db_config = sled::Config::new()
            .path(&config.path)
            .cache_capacity(config.cache_capacity)
            .use_compression(config.use_compression);

        if let Some(ms) = config.flush_every_ms {
            db_config = db_config.flush_every_ms(Some(ms));
        }

        Ok(Self { db: db_config.open()? })
    }

    /// Open a throwaway database removed on drop
    pub fn temporary() -> Result<Self> {
        let db = sled::Config::new().temporary(true).open()?;
        Ok(Self { db })
    }
}

impl KeyValueBackend for SledBackend {
    fn get_raw(&self, key: &str) -> Result<Option<String>> {
        match self.db.get(key.as_bytes())? {
            Some(bytes) => String::from_utf8(bytes.to_vec())
                .map(Some)
                .map_err(|_| KvError::InvalidValue(key.to_string())),
            None => Ok(None),
        }
    }

    fn set_raw(&self, key: &str, value: &str) -> Result<()> {
        self.db.insert(key.as_bytes(), value.as_bytes())?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool> {
        Ok(self.db.remove(key.as_bytes())?.is_some())
    }

    fn clear(&self) -> Result<Vec<String>> {
        let keys = self
            .db
            .iter()
            .keys()
            .map(|key| key.map(|k| String::from_utf8_lossy(&k).into_owned()))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        self.db.clear()?;
        Ok(keys)
    }

    fn flush(&self) -> Result<()> {
        self.db.flush()?;
        Ok(())
    }
}

/// In-memory persistence, mostly for tests
#[derive(Default)]
pub struct MemoryBackend {
    entries: RwLock<BTreeMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryBackend {
    /// Create an empty, unbounded backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend rejecting writes once keys plus values exceed `bytes`
    pub fn with_quota(bytes: usize) -> Self {
        Self { entries: RwLock::new(BTreeMap::new()), quota: Some(bytes) }
    }

    /// Total bytes used by keys and values
    pub fn used_bytes(&self) -> usize {
        self.entries
            .read()
            .iter()
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl KeyValueBackend for MemoryBackend {
    fn get_raw(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set_raw(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.write();

        if let Some(limit) = self.quota {
            let current: usize = entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            if current + key.len() + value.len() > limit {
                return Err(KvError::QuotaExceeded { key: key.to_string(), limit });
            }
        }

        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool> {
        Ok(self.entries.write().remove(key).is_some())
    }

    fn clear(&self) -> Result<Vec<String>> {
        let entries = std::mem::take(&mut *self.entries.write());
        Ok(entries.into_keys().collect())
    }
}

/// One instance's handle onto shared key-value storage
#[derive(Clone)]
pub struct KvStore {
    backend: Arc<dyn KeyValueBackend>,
    bus: ChangeBus,
    instance: InstanceId,
}

impl KvStore {
    /// Open a sled-backed store with configuration
    pub fn open(config: KvConfig) -> Result<Self> {
        let backend = SledBackend::open(&config)?;
        Ok(Self {
            backend: Arc::new(backend),
            bus: ChangeBus::new(config.bus_capacity),
            instance: InstanceId::new(),
        })
    }

    /// Create an in-memory key-value store (for testing)
    pub fn in_memory() -> Self {
        Self::with_backend(Arc::new(MemoryBackend::new()))
    }

    /// Create a store over an arbitrary backend
    pub fn with_backend(backend: Arc<dyn KeyValueBackend>) -> Self {
        Self { backend, bus: ChangeBus::default(), instance: InstanceId::new() }
    }

    /// Create a sibling instance sharing this store's backend and change bus
    pub fn attach_instance(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            bus: self.bus.clone(),
            instance: InstanceId::new(),
        }
    }

    /// Identity of this instance
    pub fn instance_id(&self) -> InstanceId {
        self.instance
    }

    /// Get the raw string stored under `key`
    pub fn get_raw(&self, key: &str) -> Result<Option<String>> {
        self.backend.get_raw(key)
    }

    /// Get a value by key, decoding it from JSON
    pub fn get<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        match self.backend.get_raw(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Store a raw string and notify other instances
    pub fn set_raw(&self, key: &str, value: &str) -> Result<()> {
        self.backend.set_raw(key, value)?;
        self.bus.publish(StorageEvent {
            key: key.to_string(),
            new_value: Some(value.to_string()),
            origin: self.instance,
        });
        Ok(())
    }

    /// Set a value by key, encoding it as JSON
    pub fn set<T>(&self, key: &str, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let raw = serde_json::to_string(value)?;
        self.set_raw(key, &raw)
    }

    /// Remove a value by key
    pub fn remove(&self, key: &str) -> Result<bool> {
        let existed = self.backend.remove(key)?;
        if existed {
            self.bus.publish(StorageEvent {
                key: key.to_string(),
                new_value: None,
                origin: self.instance,
            });
        }
        Ok(existed)
    }

    /// Remove every key, notifying other instances of each removal
    pub fn clear(&self) -> Result<usize> {
        let removed = self.backend.clear()?;
        for key in &removed {
            self.bus.publish(StorageEvent {
                key: key.clone(),
                new_value: None,
                origin: self.instance,
            });
        }
        Ok(removed.len())
    }

    /// Check if a key exists
    pub fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.backend.get_raw(key)?.is_some())
    }

    /// Flush pending writes to disk
    pub fn flush(&self) -> Result<()> {
        self.backend.flush()
    }

    /// Subscribe to writes made by other instances
    pub fn subscribe(&self) -> StorageSubscription {
        self.bus.subscribe(self.instance)
    }
}

impl std::fmt::Debug for KvStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KvStore")
            .field("instance", &self.instance)
            .field("subscribers", &self.bus.subscriber_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct TestData {
        name: String,
        count: i32,
    }

    #[test]
    fn test_set_and_get() {
        let kv = KvStore::in_memory();

        kv.set("test_key", "test_value").unwrap();

        let value: Option<String> = kv.get("test_key").unwrap();
        assert_eq!(value, Some("test_value".to_string()));
        assert_eq!(kv.get_raw("test_key").unwrap().as_deref(), Some("\"test_value\""));
    }

    #[test]
    fn test_set_and_get_struct() {
        let kv = KvStore::in_memory();

        let data = TestData { name: "Alice".to_string(), count: 42 };
        kv.set("user", &data).unwrap();

        let retrieved: Option<TestData> = kv.get("user").unwrap();
        assert_eq!(retrieved, Some(data));
    }

    #[test]
    fn test_get_nonexistent() {
        let kv = KvStore::in_memory();
        let value: Option<String> = kv.get("nonexistent").unwrap();
        assert_eq!(value, None);
    }

    #[test]
    fn test_get_malformed_json() {
        let kv = KvStore::in_memory();
        kv.set_raw("favorites", "not valid json").unwrap();

        let result: Result<Option<Vec<String>>> = kv.get("favorites");
        assert!(matches!(result, Err(KvError::Serialization(_))));
    }

    #[test]
    fn test_remove() {
        let kv = KvStore::in_memory();

        kv.set("key", "value").unwrap();
        assert!(kv.contains("key").unwrap());

        assert!(kv.remove("key").unwrap());
        assert!(!kv.contains("key").unwrap());
        assert!(!kv.remove("key").unwrap());
    }

    #[test]
    fn test_memory_quota() {
        let backend = MemoryBackend::with_quota(16);

        backend.set_raw("k", "0123456789").unwrap();
        assert_eq!(backend.used_bytes(), 11);

        // Replacing a value only counts the new size
        backend.set_raw("k", "9876543210").unwrap();

        let result = backend.set_raw("other", "0123456789");
        assert!(matches!(result, Err(KvError::QuotaExceeded { limit: 16, .. })));
        assert_eq!(backend.get_raw("other").unwrap(), None);
    }

    #[test]
    fn test_failed_write_publishes_nothing() {
        let kv = KvStore::with_backend(Arc::new(MemoryBackend::with_quota(4)));
        let other = kv.attach_instance();
        let mut sub = other.subscribe();

        assert!(kv.set_raw("favorites", "[\"1\",\"2\"]").is_err());
        assert!(sub.try_recv().is_none());
    }

    #[test]
    fn test_backend_error_propagates() {
        let mut mock = MockKeyValueBackend::new();
        mock.expect_set_raw()
            .returning(|key, _| Err(KvError::QuotaExceeded { key: key.to_string(), limit: 0 }));
        mock.expect_get_raw().returning(|_| Ok(None));

        let kv = KvStore::with_backend(Arc::new(mock));
        assert!(kv.set("theme", "dark").is_err());
        assert!(!kv.contains("theme").unwrap());
    }

    #[test]
    fn test_attached_instances_share_data() {
        let a = KvStore::in_memory();
        let b = a.attach_instance();
        assert_ne!(a.instance_id(), b.instance_id());

        a.set("theme", "dark").unwrap();
        let theme: Option<String> = b.get("theme").unwrap();
        assert_eq!(theme, Some("dark".to_string()));
    }

    #[test]
    fn test_writes_notify_other_instances() {
        let a = KvStore::in_memory();
        let b = a.attach_instance();
        let mut sub_a = a.subscribe();
        let mut sub_b = b.subscribe();

        a.set("favorites", &vec!["5".to_string()]).unwrap();

        let event = sub_b.try_recv().unwrap();
        assert_eq!(event.key, "favorites");
        assert_eq!(event.new_value.as_deref(), Some("[\"5\"]"));
        assert_eq!(event.origin, a.instance_id());

        // The writer does not hear its own change
        assert!(sub_a.try_recv().is_none());
    }

    #[test]
    fn test_remove_notifies_with_none() {
        let a = KvStore::in_memory();
        let b = a.attach_instance();
        a.set("favorites", &Vec::<String>::new()).unwrap();

        let mut sub = b.subscribe();
        a.remove("favorites").unwrap();

        let event = sub.try_recv().unwrap();
        assert_eq!(event.new_value, None);
    }

    #[test]
    fn test_clear_notifies_each_key() {
        let a = KvStore::in_memory();
        let b = a.attach_instance();
        a.set("favorites", &vec!["1".to_string()]).unwrap();
        a.set("theme", "dark").unwrap();

        let mut sub = b.subscribe();
        assert_eq!(a.clear().unwrap(), 2);
        assert!(!b.contains("favorites").unwrap());

        let mut keys = vec![sub.try_recv().unwrap().key, sub.try_recv().unwrap().key];
        keys.sort();
        assert_eq!(keys, vec!["favorites", "theme"]);
        assert!(sub.try_recv().is_none());
        assert_eq!(a.clear().unwrap(), 0);
    }

    #[test]
    fn test_sled_backend_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kv.db");
        let config = KvConfig::new(path.to_string_lossy()).flush_every_ms(None);

        {
            let kv = KvStore::open(config.clone()).unwrap();
            kv.set("favorites", &vec!["1".to_string(), "4".to_string()]).unwrap();
            kv.flush().unwrap();
        }

        let kv = KvStore::open(config).unwrap();
        let favorites: Option<Vec<String>> = kv.get("favorites").unwrap();
        assert_eq!(favorites, Some(vec!["1".to_string(), "4".to_string()]));
    }

    #[test]
    fn test_sled_temporary_backend() {
        let kv = KvStore::with_backend(Arc::new(SledBackend::temporary().unwrap()));
        kv.set_raw("theme", "\"light\"").unwrap();
        assert_eq!(kv.get_raw("theme").unwrap().as_deref(), Some("\"light\""));
        assert!(kv.remove("theme").unwrap());

        kv.set_raw("a", "1").unwrap();
        kv.set_raw("b", "2").unwrap();
        assert_eq!(kv.clear().unwrap(), 2);
        assert_eq!(kv.get_raw("a").unwrap(), None);
    }

    #[test]
    fn test_config_builder() {
        let config = KvConfig::new("test.db")
            .cache_capacity(32 * 1024 * 1024)
            .use_compression(false)
            .flush_every_ms(Some(1000))
            .bus_capacity(8);

        assert_eq!(config.path, "test.db");
        assert_eq!(config.cache_capacity, 32 * 1024 * 1024);
        assert!(!config.use_compression);
        assert_eq!(config.flush_every_ms, Some(1000));
        assert_eq!(config.bus_capacity, 8);
    }
}
