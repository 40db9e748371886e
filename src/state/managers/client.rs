//! Client registry.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use kestrel_proto::{Message, Name};
use tokio::sync::{mpsc, RwLock};

use crate::state::client::{Client, Uid};

/// Server-wide client registry, keyed by nickname.
#[derive(Debug, Default)]
pub struct ClientManager {
    pub clients: DashMap<Name, Arc<RwLock<Client>>>,
    next_uid: AtomicU64,
}

impl ClientManager {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_uid(&self) -> Uid {
        let n = self.next_uid.fetch_add(1, Ordering::Relaxed);
        format!("u{:06}", n)
    }

    /// Register a client the connection layer has finished setting up.
    pub fn register(
        &self,
        nick: Name,
        user: &str,
        host: &str,
        sender: mpsc::Sender<Arc<Message>>,
    ) -> Arc<RwLock<Client>> {
        let client = Arc::new(RwLock::new(Client {
            uid: self.allocate_uid(),
            nick: nick.clone(),
            user: user.to_string(),
            host: host.to_string(),
            caps: HashSet::new(),
            oper: false,
            away: None,
            channels: HashSet::new(),
            sender,
        }));
        self.clients.insert(nick, client.clone());
        client
    }

    pub fn get(&self, nick: &Name) -> Option<Arc<RwLock<Client>>> {
        self.clients.get(nick).map(|entry| entry.value().clone())
    }

    pub fn remove(&self, nick: &Name) -> Option<Arc<RwLock<Client>>> {
        self.clients.remove(nick).map(|(_, client)| client)
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}
