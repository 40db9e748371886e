//! In-memory channel store.
//!
//! Storage backend with no durability, used by tests and by servers running
//! without a database path configured.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{ChannelSnapshot, ChannelStore, StoreError};

/// A `ChannelStore` over a plain map.
#[derive(Debug, Default)]
pub struct MemoryChannelStore {
    rows: Mutex<HashMap<String, ChannelSnapshot>>,
}

impl MemoryChannelStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the stored row for a channel, if any.
    pub fn get(&self, name: &str) -> Option<ChannelSnapshot> {
        self.rows.lock().expect("store lock").get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.rows.lock().expect("store lock").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Pre-seed a row, for startup-loading tests.
    pub fn insert(&self, snapshot: ChannelSnapshot) {
        self.rows
            .lock()
            .expect("store lock")
            .insert(snapshot.name.clone(), snapshot);
    }
}

#[async_trait]
impl ChannelStore for MemoryChannelStore {
    async fn save(&self, snapshot: &ChannelSnapshot) -> Result<(), StoreError> {
        self.rows
            .lock()
            .expect("store lock")
            .insert(snapshot.name.clone(), snapshot.clone());
        Ok(())
    }

    async fn delete(&self, name: &str) -> Result<(), StoreError> {
        self.rows.lock().expect("store lock").remove(name);
        Ok(())
    }

    async fn load_all(&self) -> Result<Vec<ChannelSnapshot>, StoreError> {
        let mut rows: Vec<ChannelSnapshot> =
            self.rows.lock().expect("store lock").values().cloned().collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }
}
