//! Server-wide registries.

mod channel;
mod client;

pub use channel::ChannelManager;
pub use client::ClientManager;
