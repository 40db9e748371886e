//! INVITE event handling.
//!
//! On an invite-only channel an invitation is recorded as an invite-list
//! mask for the invitee, which both clears +i and overrides bans at join
//! time. The courtesy numerics to inviter and invitee are sent by the
//! handler layer, which holds both clients.

use tokio::sync::oneshot;

use kestrel_proto::ChannelMode;

use super::super::{ChannelActor, ChannelError, InviteParams};

impl ChannelActor {
    pub(crate) async fn handle_invite(
        &mut self,
        params: InviteParams,
        reply_tx: oneshot::Sender<Result<(), ChannelError>>,
    ) {
        let invite_only = self.flags.contains(&ChannelMode::InviteOnly);

        if invite_only && !self.client_is_operator(&params.inviter_uid, params.inviter_is_oper) {
            let _ = reply_tx.send(Err(ChannelError::ChanOpPrivsNeeded));
            return;
        }

        if !self.members.contains_key(&params.inviter_uid) {
            let _ = reply_tx.send(Err(ChannelError::NotOnChannel));
            return;
        }

        if invite_only {
            self.invites.add(&params.invitee_nickmask);
            self.persist().await;
        }

        let _ = reply_tx.send(Ok(()));
    }
}
