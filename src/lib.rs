//! kestreld — the channel core of the Kestrel IRC server.
//!
//! Implements the stateful channel subsystem: membership, the mode and
//! privilege system, mask lists, channel-directed broadcast, NAMES, and
//! durable persistence of persistent channels. Each channel is owned by an
//! actor task; operations arrive as events and are answered with protocol
//! results that the handler layer renders as IRC lines and numerics.
//!
//! The connection plumbing (sockets, framing, command parsing, capability
//! negotiation) lives outside this crate and talks to it through
//! [`state::ServerState`] and the functions in [`handlers`].

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod state;

pub use config::ServerConfig;
pub use error::ChannelError;
pub use state::ServerState;
