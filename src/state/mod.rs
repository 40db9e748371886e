//! Server state: clients, channels, and the registries that own them.

pub mod actor;
pub mod channel;
pub mod client;
pub mod managers;
pub mod masks;

pub use channel::{parse_flags, serialize_flags, MemberModes};
pub use client::{Client, Uid, CAP_MULTI_PREFIX};
pub use masks::UserMaskSet;

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::db::{ChannelStore, StoreError};
use managers::{ChannelManager, ClientManager};

/// Process-wide server state, passed explicitly to every operation.
pub struct ServerState {
    /// Server name, the source of numeric replies.
    pub name: String,
    pub clients: ClientManager,
    pub channels: Arc<ChannelManager>,
}

impl ServerState {
    pub fn new(config: &ServerConfig, store: Arc<dyn ChannelStore>) -> Arc<Self> {
        Arc::new(Self {
            name: config.name.clone(),
            clients: ClientManager::new(),
            channels: ChannelManager::new(store),
        })
    }

    /// Load persistent channels from the store at startup.
    pub async fn load_channels(&self) -> Result<usize, StoreError> {
        self.channels.load_persistent().await
    }
}
