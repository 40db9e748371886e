//! Line delivery to channel members.

use std::sync::Arc;

use kestrel_proto::Message;
use tokio::sync::mpsc::error::TrySendError;
use tracing::warn;

use super::super::ChannelActor;
use crate::state::client::Uid;

impl ChannelActor {
    /// Deliver one line to every member, optionally excluding one uid
    /// (usually the sender).
    ///
    /// Delivery never blocks the actor: a member whose outbound queue is
    /// full loses this line; a closed queue belongs to a connection that
    /// is already tearing down. Neither aborts delivery to the rest.
    pub(crate) fn broadcast(&self, msg: Message, exclude: Option<&Uid>) {
        let msg = Arc::new(msg);
        for (uid, sender) in &self.senders {
            if Some(uid) == exclude {
                continue;
            }
            match sender.try_send(msg.clone()) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => {
                    warn!(channel = %self.name, member = %uid, "outbound queue full, dropping line");
                }
                Err(TrySendError::Closed(_)) => {}
            }
        }
    }
}
