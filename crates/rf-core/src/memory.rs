//! In-memory [`KeyValueStore`]. Nothing survives the process.

use dashmap::DashMap;

use crate::error::Result;
use crate::traits::KeyValueStore;

#[derive(Debug, Default)]
pub struct InMemoryKv {
    entries: DashMap<String, String>,
}

impl InMemoryKv {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for InMemoryKv {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).map(|v| v.value().clone()))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}
