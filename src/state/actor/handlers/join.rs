//! JOIN event handling.
//!
//! Admission checks run in a fixed order; the first failure wins and
//! nothing is mutated.

use kestrel_proto::{ChannelMode, Command, Message};
use tokio::sync::oneshot;
use tracing::debug;

use super::super::{ChannelActor, ChannelError, JoinOutcome, JoinParams};
use crate::state::channel::MemberModes;

impl ChannelActor {
    pub(crate) async fn handle_join(
        &mut self,
        params: JoinParams,
        reply_tx: oneshot::Sender<Result<JoinOutcome, ChannelError>>,
    ) {
        if self.is_draining() {
            let _ = reply_tx.send(Err(ChannelError::Tombstone));
            return;
        }

        // Already a member: silent no-op, modes untouched.
        if self.members.contains_key(&params.uid) {
            let _ = reply_tx.send(Ok(JoinOutcome {
                newly_joined: false,
                topic: None,
            }));
            return;
        }

        if self.is_full() {
            let _ = reply_tx.send(Err(ChannelError::ChannelIsFull));
            self.cleanup_if_empty();
            return;
        }

        if !self.check_key(params.key.as_deref()) {
            let _ = reply_tx.send(Err(ChannelError::BadChannelKey));
            self.cleanup_if_empty();
            return;
        }

        // An invite-list match both clears +i and overrides any ban.
        let invited = self.invites.matches(&params.nickmask);
        if self.flags.contains(&ChannelMode::InviteOnly) && !invited {
            let _ = reply_tx.send(Err(ChannelError::InviteOnlyChan));
            self.cleanup_if_empty();
            return;
        }

        if self.bans.matches(&params.nickmask)
            && !invited
            && !self.excepts.matches(&params.nickmask)
        {
            let _ = reply_tx.send(Err(ChannelError::BannedFromChan));
            self.cleanup_if_empty();
            return;
        }

        let mut modes = MemberModes::default();
        if !self.is_persistent() && self.members.is_empty() && !self.loaded_from_store() {
            // First member of a fresh channel founds it.
            modes.founder = true;
            modes.op = true;
            debug!(channel = %self.name, nick = %params.nick, "founder grant");
        }

        self.members.insert(params.uid.clone(), modes);
        self.member_nicks.insert(params.uid.clone(), params.nick);
        self.senders.insert(params.uid, params.sender);

        let join_msg = Message {
            tags: None,
            prefix: Some(params.prefix),
            command: Command::JOIN(self.name.as_str().to_string(), None),
        };
        self.broadcast(join_msg, None);

        let topic = if self.topic.is_empty() {
            None
        } else {
            Some(self.topic.clone())
        };
        let _ = reply_tx.send(Ok(JoinOutcome {
            newly_joined: true,
            topic,
        }));
    }
}
