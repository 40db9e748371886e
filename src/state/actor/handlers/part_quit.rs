//! PART and QUIT event handling.
//!
//! PART broadcasts the departure to every member (the leaver included)
//! before removing them. QUIT is the silent removal used on disconnect;
//! the connection-level QUIT broadcast happens elsewhere.

use kestrel_proto::{Command, Message, Prefix};
use tokio::sync::oneshot;

use super::super::{ChannelActor, ChannelError};
use crate::state::client::Uid;

impl ChannelActor {
    pub(crate) fn handle_part(
        &mut self,
        uid: Uid,
        reason: Option<String>,
        prefix: Prefix,
        reply_tx: oneshot::Sender<Result<(), ChannelError>>,
    ) {
        if !self.members.contains_key(&uid) {
            let _ = reply_tx.send(Err(ChannelError::NotOnChannel));
            return;
        }

        let part_msg = Message {
            tags: None,
            prefix: Some(prefix),
            command: Command::PART(self.name.as_str().to_string(), reason),
        };
        self.broadcast(part_msg, None);

        self.remove_member(&uid);
        let _ = reply_tx.send(Ok(()));

        self.cleanup_if_empty();
    }

    pub(crate) fn handle_quit(&mut self, uid: Uid, reply_tx: Option<oneshot::Sender<usize>>) {
        if self.members.contains_key(&uid) {
            self.remove_member(&uid);
        }
        if let Some(tx) = reply_tx {
            let _ = tx.send(self.members.len());
        }

        self.cleanup_if_empty();
    }

    pub(crate) fn remove_member(&mut self, uid: &Uid) {
        self.members.remove(uid);
        self.member_nicks.remove(uid);
        self.senders.remove(uid);
    }
}
