//! Command-line configuration

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use app_core::CatalogConfig;
use clap::Parser;
use storage::{KvConfig, KvStore};

/// Default on-disk database location
pub const DEFAULT_DATA_DIR: &str = "recipe_explorer.db";

/// Browse recipes, search by title or tag, and keep favorites
#[derive(Parser, Debug, Clone)]
#[command(name = "recipe-explorer", version, about)]
pub struct AppConfig {
    /// Directory of the on-disk store
    #[arg(long, default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// Keep everything in memory; nothing survives exit
    #[arg(long, conflicts_with = "data_dir")]
    pub in_memory: bool,

    /// Simulated search latency in milliseconds
    #[arg(long, default_value_t = 250)]
    pub latency_ms: u64,

    /// Initial route
    #[arg(long, default_value = "/")]
    pub path: String,
}

impl AppConfig {
    /// Storage configuration for the on-disk store
    pub fn kv_config(&self) -> KvConfig {
        KvConfig::new(self.data_dir.to_string_lossy())
    }

    /// Catalog configuration
    pub fn catalog_config(&self) -> CatalogConfig {
        CatalogConfig::default().latency(Duration::from_millis(self.latency_ms))
    }

    /// Open the configured store
    pub fn open_store(&self) -> Result<KvStore> {
        if self.in_memory {
            return Ok(KvStore::in_memory());
        }
        KvStore::open(self.kv_config())
            .with_context(|| format!("Failed to open database at {}", self.data_dir.display()))
    }
}
