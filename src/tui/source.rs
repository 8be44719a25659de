//! Configuration sources feeding the panel
//!
//! One capability, `list_entries`, over two backends: the daemon's
//! typed option system and the app's own untyped settings store. The
//! panel never branches on which one it got.

use async_trait::async_trait;
use tracing::debug;

use crate::config::Aliases;
use crate::control::ControlPort;
use crate::error::{Result, VigilError};
use crate::store::LocalStore;
use crate::tui::entry::{display_value, ConfigEntry, OptionType};

/// Unformatted triple from a source: name, declared type tag, resolved
/// raw value. `None` means no resolvable value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    pub name: String,
    pub type_tag: String,
    pub value: Option<String>,
}

#[async_trait]
pub trait ConfigSource {
    /// Entries in source enumeration order.
    async fn list_entries(&mut self) -> Result<Vec<RawEntry>>;
}

/// Run the source once and format every triple into a display entry.
pub async fn load_snapshot<S: ConfigSource + Send>(source: &mut S) -> Result<Vec<ConfigEntry>> {
    let raws = source.list_entries().await?;
    Ok(raws
        .into_iter()
        .map(|raw| {
            let ty = OptionType::from_tag(&raw.type_tag);
            let value = display_value(raw.value.as_deref(), ty);
            ConfigEntry::new(raw.name, value, raw.type_tag)
        })
        .collect())
}

/// Enumerates every option the daemon recognizes, resolving current
/// values over the control channel.
///
/// The capability listing (`GETINFO config/names`) must parse in full;
/// per-option value queries degrade to an unresolved value instead of
/// failing the whole load.
pub struct DaemonConfigSource<'a, C: ControlPort> {
    port: &'a mut C,
    aliases: &'a Aliases,
}

impl<'a, C: ControlPort> DaemonConfigSource<'a, C> {
    pub fn new(port: &'a mut C, aliases: &'a Aliases) -> Self {
        Self { port, aliases }
    }

    async fn resolve_value(&mut self, name: &str) -> Option<String> {
        if let Some(query) = self.aliases.get(name) {
            match self.port.option_map(query).await {
                Ok(map) => map.get(name).cloned().filter(|value| !value.is_empty()),
                Err(e) => {
                    debug!("option {name}: sub-query {query} failed: {e}");
                    None
                }
            }
        } else {
            match self.port.option_values(name).await {
                Ok(values) => {
                    let joined = values.join(", ");
                    if joined.is_empty() {
                        None
                    } else {
                        Some(joined)
                    }
                }
                Err(e) => {
                    debug!("option {name}: value query failed: {e}");
                    None
                }
            }
        }
    }
}

#[async_trait]
impl<C: ControlPort> ConfigSource for DaemonConfigSource<'_, C> {
    async fn list_entries(&mut self) -> Result<Vec<RawEntry>> {
        let listing = self.port.info("config/names").await?;
        let mut entries = Vec::new();
        for line in listing.lines() {
            if line.is_empty() {
                continue;
            }
            let (name, type_tag) =
                line.split_once(' ')
                    .ok_or_else(|| VigilError::MalformedListing {
                        line: line.to_string(),
                    })?;
            let value = self.resolve_value(name).await;
            entries.push(RawEntry {
                name: name.to_string(),
                type_tag: type_tag.to_string(),
                value,
            });
        }
        debug!("daemon listed {} options", entries.len());
        Ok(entries)
    }
}

/// Enumerates the local store in key order; values pass through
/// unformatted.
pub struct LocalConfigSource<'a> {
    store: &'a LocalStore,
}

impl<'a> LocalConfigSource<'a> {
    pub fn new(store: &'a LocalStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ConfigSource for LocalConfigSource<'_> {
    async fn list_entries(&mut self) -> Result<Vec<RawEntry>> {
        Ok(self
            .store
            .keys()
            .iter()
            .map(|key| RawEntry {
                name: key.clone(),
                type_tag: String::new(),
                value: Some(self.store.value_string(key)),
            })
            .collect())
    }
}
