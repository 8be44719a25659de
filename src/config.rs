//! Application configuration
//!
//! TOML file at `<config_dir>/vigil/config.toml`, with environment
//! overrides applied after loading. Every field is defaulted so a
//! missing file is not an error; an unreadable or invalid file is.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, VigilError};
use crate::store::LocalStore;

pub const DEFAULT_CONTROL_ADDRESS: &str = "127.0.0.1";
pub const DEFAULT_CONTROL_PORT: u16 = 9751;
pub const DEFAULT_REFRESH_MS: u64 = 1000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct VigilConfig {
    pub connection: ConnectionConfig,
    pub refresh: RefreshConfig,
    pub log: LogConfig,
    /// Option name -> sub-query key whose result mapping carries the value.
    pub aliases: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionConfig {
    pub address: String,
    pub port: u16,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_CONTROL_ADDRESS.to_string(),
            port: DEFAULT_CONTROL_PORT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefreshConfig {
    pub interval_ms: u64,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_REFRESH_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LogConfig {
    /// tracing filter directives, e.g. "vigil=debug". Empty means quiet.
    pub filter: String,
}

impl VigilConfig {
    /// Path to the config file: `<config_dir>/vigil/config.toml`
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("vigil").join("config.toml"))
    }

    /// Load from the default location. A missing file yields defaults.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::read(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load from an explicit path. Here a missing file is an error: the
    /// caller asked for this file specifically.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(VigilError::Config {
                path: path.display().to_string(),
                reason: "file not found".to_string(),
            });
        }
        Self::read(path)
    }

    fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| VigilError::Config {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| VigilError::Config {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Apply environment variable overrides.
    ///
    /// `VIGIL_CONTROL_ADDRESS`, `VIGIL_CONTROL_PORT`, `VIGIL_REFRESH_MS`,
    /// `VIGIL_LOG`. Malformed numeric values are ignored in favor of the
    /// file value.
    pub fn with_env(mut self) -> Self {
        if let Ok(address) = std::env::var("VIGIL_CONTROL_ADDRESS") {
            if !address.is_empty() {
                self.connection.address = address;
            }
        }
        if let Ok(port) = std::env::var("VIGIL_CONTROL_PORT") {
            if let Ok(port) = port.parse::<u16>() {
                self.connection.port = port;
            }
        }
        if let Ok(ms) = std::env::var("VIGIL_REFRESH_MS") {
            if let Ok(ms) = ms.parse::<u64>() {
                self.refresh.interval_ms = ms;
            }
        }
        if let Ok(filter) = std::env::var("VIGIL_LOG") {
            if !filter.is_empty() {
                self.log.filter = filter;
            }
        }
        self
    }

    /// Flatten the effective settings into a local-mode store, dotted
    /// keys in declaration order.
    pub fn local_store(&self) -> LocalStore {
        let mut store = LocalStore::new();
        store.set(
            "connection.address".to_string(),
            vec![self.connection.address.clone()],
        );
        store.set(
            "connection.port".to_string(),
            vec![self.connection.port.to_string()],
        );
        store.set(
            "refresh.interval_ms".to_string(),
            vec![self.refresh.interval_ms.to_string()],
        );
        let filter = if self.log.filter.is_empty() {
            Vec::new()
        } else {
            vec![self.log.filter.clone()]
        };
        store.set("log.filter".to_string(), filter);
        for (option, query) in &self.aliases {
            store.set(format!("aliases.{option}"), vec![query.clone()]);
        }
        store
    }
}

/// Immutable table mapping option names to the sub-query key whose
/// result mapping carries that option's current value.
#[derive(Debug, Clone, Default)]
pub struct Aliases {
    map: FxHashMap<String, String>,
}

impl Aliases {
    /// Built-in entries. Currently empty; kept as the merge base so the
    /// override direction stays pinned by tests.
    fn defaults() -> FxHashMap<String, String> {
        FxHashMap::default()
    }

    /// Build the table from config entries. Supplied entries override
    /// the built-in defaults on conflict.
    pub fn merged<I>(supplied: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self::merged_over(Self::defaults(), supplied)
    }

    fn merged_over<I>(mut base: FxHashMap<String, String>, supplied: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        base.extend(supplied);
        Self { map: base }
    }

    pub fn get(&self, option: &str) -> Option<&str> {
        self.map.get(option).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
