//! Command-level orchestration.
//!
//! Handlers are the entry points a command dispatcher calls: they resolve
//! registry lookups, assemble actor parameters, await the actor's reply,
//! convert errors to numerics, and keep each client's channel mirror in
//! step with the channel's member set.

pub mod channel;
pub mod quit;

use std::collections::HashSet;
use std::sync::Arc;

use kestrel_proto::{Command, Message, Name, Prefix, Response};
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, oneshot, RwLock};
use tracing::warn;

use crate::error::ChannelError;
use crate::state::actor::ChannelEvent;
use crate::state::client::{Client, Uid};

/// Build a numeric reply sourced from the server.
pub fn server_reply(server_name: &str, response: Response, args: Vec<String>) -> Message {
    Message {
        tags: None,
        prefix: Some(Prefix::server(server_name)),
        command: Command::Response(response, args),
    }
}

/// Send one event to a channel actor and await its reply.
///
/// `None` means the actor is gone (its mailbox closed mid-flight); callers
/// treat that like a stale registry entry.
pub(crate) async fn request<R>(
    tx: &mpsc::Sender<ChannelEvent>,
    make: impl FnOnce(oneshot::Sender<R>) -> ChannelEvent,
) -> Option<R> {
    let (reply_tx, reply_rx) = oneshot::channel();
    if tx.send(make(reply_tx)).await.is_err() {
        return None;
    }
    reply_rx.await.ok()
}

/// A snapshot of the acting client's identity, captured under one read
/// lock so the lock is never held across an actor round-trip.
pub(crate) struct ActingClient {
    pub uid: Uid,
    pub nick: Name,
    pub nickmask: String,
    pub prefix: Prefix,
    pub caps: HashSet<String>,
    pub oper: bool,
    pub sender: mpsc::Sender<Arc<Message>>,
}

impl ActingClient {
    pub async fn capture(client: &Arc<RwLock<Client>>) -> Self {
        let c = client.read().await;
        Self {
            uid: c.uid.clone(),
            nick: c.nick.clone(),
            nickmask: c.nickmask(),
            prefix: c.prefix(),
            caps: c.caps.clone(),
            oper: c.oper,
            sender: c.sender.clone(),
        }
    }

    pub fn try_send(&self, msg: Message) {
        match self.sender.try_send(Arc::new(msg)) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                warn!(nick = %self.nick, "outbound queue full, dropping line");
            }
            Err(TrySendError::Closed(_)) => {}
        }
    }

    /// Deliver the numeric for a failed channel operation.
    pub fn send_error(&self, server_name: &str, err: &ChannelError, channel: &str) {
        if let Some(reply) = err.to_irc_reply(server_name, self.nick.as_str(), channel) {
            self.try_send(reply);
        }
    }
}
