//! PRIVMSG/NOTICE event handling.

use kestrel_proto::{ChannelMode, Command, Message};
use tokio::sync::oneshot;

use super::super::{ChannelActor, ChannelError, MessageParams};
use crate::state::client::Uid;

impl ChannelActor {
    /// Whether this client may speak here.
    ///
    /// Server operators always may. +n blocks non-members; +m requires +v
    /// or +o — the higher prefixes alone do not satisfy +m.
    pub(crate) fn can_speak(&self, uid: &Uid, is_oper: bool) -> bool {
        if is_oper {
            return true;
        }

        let member = self.members.get(uid);

        if self.flags.contains(&ChannelMode::NoExternal) && member.is_none() {
            return false;
        }

        if self.flags.contains(&ChannelMode::Moderated) {
            let voiced = member.map(|m| m.voice || m.op).unwrap_or(false);
            if !voiced {
                return false;
            }
        }

        true
    }

    pub(crate) fn handle_message(
        &mut self,
        params: MessageParams,
        reply_tx: oneshot::Sender<Result<(), ChannelError>>,
    ) {
        if !self.can_speak(&params.uid, params.is_oper) {
            let _ = reply_tx.send(Err(ChannelError::CannotSendToChan));
            return;
        }

        let name = self.name.as_str().to_string();
        let command = if params.notice {
            Command::NOTICE(name, params.text)
        } else {
            Command::PRIVMSG(name, params.text)
        };

        let msg = Message {
            tags: None,
            prefix: Some(params.prefix),
            command,
        };
        self.broadcast(msg, Some(&params.uid));

        let _ = reply_tx.send(Ok(()));
    }
}
