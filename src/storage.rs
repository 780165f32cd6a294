use web_sys as web;
use zennoise_core::{KeyValueStore, PresetError, PresetResult};

/// [`KeyValueStore`] over `window.localStorage`.
pub struct LocalStorageStore {
    storage: web::Storage,
}

impl LocalStorageStore {
    pub fn new() -> anyhow::Result<Self> {
        let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        let storage = window
            .local_storage()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?
            .ok_or_else(|| anyhow::anyhow!("localStorage unavailable"))?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> PresetResult<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| PresetError::Storage(format!("{:?}", e)))
    }

    fn set(&mut self, key: &str, value: &str) -> PresetResult<()> {
        // Throws QuotaExceededError when the origin's quota is full
        self.storage
            .set_item(key, value)
            .map_err(|e| PresetError::Storage(format!("{:?}", e)))
    }
}
