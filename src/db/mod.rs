//! Durable storage for persistent channels.
//!
//! The channel core talks to storage through the narrow [`ChannelStore`]
//! trait so it stays I/O-agnostic; [`SqliteChannelStore`] is the production
//! backend and [`MemoryChannelStore`] backs tests.

mod memory;
mod sqlite;

pub use memory::MemoryChannelStore;
pub use sqlite::SqliteChannelStore;

use async_trait::async_trait;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

/// One persistence row: the full durable state of a channel.
///
/// Mask-list columns hold the serialized (sorted, space-joined) form of the
/// corresponding mask set; `flags` holds the serialized flag characters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelSnapshot {
    pub name: String,
    pub flags: String,
    pub key: String,
    pub topic: String,
    pub user_limit: u64,
    pub ban_list: String,
    pub except_list: String,
    pub invite_list: String,
}

/// Upsert/delete sink for persistent channels, plus startup loading.
///
/// Writes are best-effort from the caller's point of view: a failed save is
/// logged and the in-memory operation proceeds.
#[async_trait]
pub trait ChannelStore: Send + Sync {
    /// Upsert the row for a persistent channel.
    async fn save(&self, snapshot: &ChannelSnapshot) -> Result<(), StoreError>;

    /// Delete any row for the named channel.
    async fn delete(&self, name: &str) -> Result<(), StoreError>;

    /// Load every stored channel, for startup.
    async fn load_all(&self) -> Result<Vec<ChannelSnapshot>, StoreError>;
}
