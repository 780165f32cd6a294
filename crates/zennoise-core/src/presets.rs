//! Named presets persisted as one JSON object under a single storage key.
//!
//! Every mutation re-reads the stored mapping first, so entries written by
//! another tab since the last read are not lost.

use crate::config::{ParsePolicy, PresetConfig};
use crate::error::{PresetError, PresetResult};
use crate::settings::Settings;
use std::collections::BTreeMap;

/// Preset name to settings, ordered by name.
pub type PresetMap = BTreeMap<String, Settings>;

/// Persistent string key-value storage (`window.localStorage` in the browser).
pub trait KeyValueStore {
    fn get(&self, key: &str) -> PresetResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> PresetResult<()>;
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    pub entries: BTreeMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> PresetResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> PresetResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

pub struct PresetStore<S: KeyValueStore> {
    storage: S,
    config: PresetConfig,
}

impl<S: KeyValueStore> PresetStore<S> {
    pub fn new(storage: S, config: PresetConfig) -> Self {
        Self { storage, config }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn policy(&self) -> ParsePolicy {
        self.config.policy
    }

    /// Read every stored preset.
    ///
    /// Under [`ParsePolicy::FailOpen`] an unreadable or malformed blob is
    /// logged and reported as an empty mapping.
    pub fn list(&self) -> PresetResult<PresetMap> {
        match self.read() {
            Ok(map) => Ok(map),
            Err(e) if self.config.policy == ParsePolicy::FailOpen => {
                log::warn!("[presets] treating store as empty: {}", e);
                Ok(PresetMap::new())
            }
            Err(e) => Err(e),
        }
    }

    fn read(&self) -> PresetResult<PresetMap> {
        match self.storage.get(&self.config.storage_key)? {
            None => Ok(PresetMap::new()),
            Some(raw) if raw.trim().is_empty() => Ok(PresetMap::new()),
            Some(raw) => Ok(serde_json::from_str(&raw)?),
        }
    }

    fn write(&mut self, map: &PresetMap) -> PresetResult<()> {
        let raw = serde_json::to_string(map)?;
        self.storage.set(&self.config.storage_key, &raw)
    }

    /// Insert or overwrite `name`, persist, and return the re-read list.
    pub fn save(&mut self, name: &str, settings: &Settings) -> PresetResult<PresetMap> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PresetError::EmptyName);
        }
        let mut map = self.list()?;
        map.insert(name.to_string(), *settings);
        self.write(&map)?;
        log::info!("[presets] saved {:?}", name);
        self.list()
    }

    /// Remove `name`, persist, and return the re-read list.
    pub fn delete(&mut self, name: &str) -> PresetResult<PresetMap> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PresetError::EmptyName);
        }
        let mut map = self.list()?;
        if map.remove(name).is_none() {
            return Err(PresetError::NotFound(name.to_string()));
        }
        self.write(&map)?;
        log::info!("[presets] deleted {:?}", name);
        self.list()
    }

    pub fn load(&self, name: &str) -> PresetResult<Settings> {
        let name = name.trim();
        self.list()?
            .remove(name)
            .ok_or_else(|| PresetError::NotFound(name.to_string()))
    }

    pub fn names(&self) -> PresetResult<Vec<String>> {
        Ok(self.list()?.into_keys().collect())
    }
}
