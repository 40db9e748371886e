//! KICK event handling.

use kestrel_proto::{Command, Message};
use tokio::sync::oneshot;

use super::super::{ChannelActor, ChannelError, KickParams};

impl ChannelActor {
    pub(crate) fn handle_kick(
        &mut self,
        params: KickParams,
        reply_tx: oneshot::Sender<Result<(), ChannelError>>,
    ) {
        let KickParams {
            sender_uid,
            sender_is_oper,
            sender_prefix,
            target_uid,
            target_nick,
            comment,
        } = params;

        if !(sender_is_oper || self.members.contains_key(&sender_uid)) {
            let _ = reply_tx.send(Err(ChannelError::NotOnChannel));
            return;
        }

        // A member without operator rights gets the cannot-send numeric
        // here, matching long-standing server behavior.
        if !self.client_is_operator(&sender_uid, sender_is_oper) {
            let _ = reply_tx.send(Err(ChannelError::CannotSendToChan));
            return;
        }

        if !self.members.contains_key(&target_uid) {
            let _ = reply_tx.send(Err(ChannelError::UserNotInChannel(target_nick)));
            return;
        }

        let kick_msg = Message {
            tags: None,
            prefix: Some(sender_prefix),
            command: Command::KICK(
                self.name.as_str().to_string(),
                target_nick,
                Some(comment),
            ),
        };
        self.broadcast(kick_msg, None);

        self.remove_member(&target_uid);
        let _ = reply_tx.send(Ok(()));

        self.cleanup_if_empty();
    }
}
