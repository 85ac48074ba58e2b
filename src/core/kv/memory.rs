use crate::core::kv::store::KeyValueStore;
use anyhow::Error;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;

/// In-process key-value store for development and tests.
#[derive(Default)]
pub struct MemoryStore {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>, Error> {
        Ok(self.items.lock().get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: String) -> Result<(), Error> {
        self.items.lock().insert(key.to_string(), value);
        Ok(())
    }
}
