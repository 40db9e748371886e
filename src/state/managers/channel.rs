//! Channel registry.
//!
//! Tracks the actor mailbox for every live channel. A channel is present
//! here iff it is persistent or has members; empty non-persistent channels
//! deregister themselves (see `ChannelActor::cleanup_if_empty`).

use std::sync::Arc;

use dashmap::DashMap;
use kestrel_proto::Name;
use tokio::sync::mpsc;
use tracing::info;

use crate::db::{ChannelStore, StoreError};
use crate::state::actor::{ChannelActor, ChannelEvent, ChannelSeed};

/// Channel registry: name → actor mailbox.
pub struct ChannelManager {
    pub channels: DashMap<Name, mpsc::Sender<ChannelEvent>>,
    store: Arc<dyn ChannelStore>,
}

impl ChannelManager {
    pub fn new(store: Arc<dyn ChannelStore>) -> Arc<Self> {
        Arc::new(Self {
            channels: DashMap::new(),
            store,
        })
    }

    pub fn get(&self, name: &Name) -> Option<mpsc::Sender<ChannelEvent>> {
        self.channels.get(name).map(|entry| entry.value().clone())
    }

    /// Get an existing channel actor or spawn a fresh one.
    pub fn get_or_create(self: &Arc<Self>, name: &Name) -> mpsc::Sender<ChannelEvent> {
        self.channels
            .entry(name.clone())
            .or_insert_with(|| {
                info!(channel = %name, "creating channel");
                ChannelActor::spawn(
                    name.clone(),
                    None,
                    Arc::downgrade(self),
                    self.store.clone(),
                )
            })
            .value()
            .clone()
    }

    pub fn contains(&self, name: &Name) -> bool {
        self.channels.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Remove a drained channel. Called by its actor.
    pub(crate) fn deregister(&self, name: &Name) {
        if self.channels.remove(name).is_some() {
            info!(channel = %name, "channel destroyed");
        }
    }

    /// Spawn actors for every stored channel. Returns how many were loaded.
    pub async fn load_persistent(self: &Arc<Self>) -> Result<usize, StoreError> {
        let snapshots = self.store.load_all().await?;
        let count = snapshots.len();

        for snapshot in snapshots {
            let name = Name::new(snapshot.name.clone());
            let seed = ChannelSeed::from_snapshot(&snapshot);
            let tx = ChannelActor::spawn(
                name.clone(),
                Some(seed),
                Arc::downgrade(self),
                self.store.clone(),
            );
            info!(channel = %name, "loaded channel from store");
            self.channels.insert(name, tx);
        }

        Ok(count)
    }
}
