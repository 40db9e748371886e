//! MODE batch application.
//!
//! Each change in a batch is applied independently; the subsequence that
//! actually mutated state is broadcast as one consolidated MODE line and
//! the channel is persisted once. Rejections and list queries are returned
//! to the handler layer as per-change replies.

use kestrel_proto::mode::{ModeChange, ModeOp, PREFIX_LADDER};
use kestrel_proto::{irc_eq, irc_to_lower, ChannelMode, Command, Message};
use tokio::sync::oneshot;
use tracing::debug;

use super::super::{ChannelActor, ChannelError, ModeOutcome, ModeParams, ModeReply};

impl ChannelActor {
    pub(crate) async fn handle_apply_modes(
        &mut self,
        params: ModeParams,
        reply_tx: oneshot::Sender<ModeOutcome>,
    ) {
        let mut outcome = ModeOutcome::default();

        // Bare MODE query: answer with the current mode string.
        if params.changes.is_empty() {
            let show_key = params.is_oper || self.members.contains_key(&params.uid);
            outcome.replies.push(ModeReply::Current {
                modestring: self.mode_string(show_key),
            });
            let _ = reply_tx.send(outcome);
            return;
        }

        for change in &params.changes {
            if self.apply_mode(&params, change, &mut outcome.replies) {
                outcome.applied.push(change.clone());
            }
        }

        if !outcome.applied.is_empty() {
            debug!(channel = %self.name, applied = outcome.applied.len(), "mode change");
            let msg = Message {
                tags: None,
                prefix: Some(params.prefix.clone()),
                command: Command::ChannelMode(
                    self.name.as_str().to_string(),
                    outcome.applied.clone(),
                ),
            };
            self.broadcast(msg, None);
            self.persist().await;
        }

        let _ = reply_tx.send(outcome);

        // Dropping +P from an empty channel destroys it.
        self.cleanup_if_empty();
    }

    /// Apply one change. Returns true iff state actually changed.
    fn apply_mode(
        &mut self,
        params: &ModeParams,
        change: &ModeChange,
        replies: &mut Vec<ModeReply>,
    ) -> bool {
        match &change.mode {
            ChannelMode::Ban | ChannelMode::Exception | ChannelMode::InviteException => {
                self.apply_mask(params, change, replies)
            }
            ChannelMode::Key => self.apply_key(params, change, replies),
            ChannelMode::Limit => self.apply_limit(params, change, replies),
            ChannelMode::Founder
            | ChannelMode::Admin
            | ChannelMode::Oper
            | ChannelMode::Halfop
            | ChannelMode::Voice => self.apply_prefix(params, change, replies),
            ChannelMode::Unknown(c) => {
                replies.push(ModeReply::Rejected(ChannelError::UnknownMode(*c)));
                false
            }
            mode if mode.is_flag() => self.apply_flag(params, change, replies),
            _ => false,
        }
    }

    fn require_operator(&self, params: &ModeParams, replies: &mut Vec<ModeReply>) -> bool {
        if self.client_is_operator(&params.uid, params.is_oper) {
            true
        } else {
            replies.push(ModeReply::Rejected(ChannelError::ChanOpPrivsNeeded));
            false
        }
    }

    fn apply_flag(
        &mut self,
        params: &ModeParams,
        change: &ModeChange,
        replies: &mut Vec<ModeReply>,
    ) -> bool {
        if !self.require_operator(params, replies) {
            return false;
        }

        match change.op {
            ModeOp::Add => self.flags.insert(change.mode.clone()),
            ModeOp::Remove => self.flags.remove(&change.mode),
            ModeOp::List => false,
        }
    }

    fn apply_key(
        &mut self,
        params: &ModeParams,
        change: &ModeChange,
        replies: &mut Vec<ModeReply>,
    ) -> bool {
        if !self.require_operator(params, replies) {
            return false;
        }

        match change.op {
            ModeOp::Add => {
                let key = match change.arg.as_deref().filter(|k| !k.is_empty()) {
                    Some(key) => key,
                    None => {
                        replies.push(ModeReply::Rejected(ChannelError::NeedMoreParams));
                        return false;
                    }
                };
                if key == self.key {
                    return false;
                }
                self.key = key.to_string();
                self.flags.insert(ChannelMode::Key);
                true
            }
            // -k clears unconditionally and always reads back as applied.
            ModeOp::Remove => {
                self.key.clear();
                self.flags.remove(&ChannelMode::Key);
                true
            }
            ModeOp::List => false,
        }
    }

    fn apply_limit(
        &mut self,
        params: &ModeParams,
        change: &ModeChange,
        replies: &mut Vec<ModeReply>,
    ) -> bool {
        if !self.require_operator(params, replies) {
            return false;
        }

        let limit = match change.arg.as_deref().and_then(|a| a.parse::<u64>().ok()) {
            Some(limit) => limit,
            None => {
                replies.push(ModeReply::Rejected(ChannelError::NeedMoreParams));
                return false;
            }
        };

        if limit == 0 || limit == self.user_limit {
            return false;
        }
        self.user_limit = limit;
        self.flags.insert(ChannelMode::Limit);
        true
    }

    fn apply_mask(
        &mut self,
        params: &ModeParams,
        change: &ModeChange,
        replies: &mut Vec<ModeReply>,
    ) -> bool {
        let mask = change.arg.as_deref().unwrap_or("");

        // A list query (or a bare +b/-b with no mask) dumps the list.
        if change.op == ModeOp::List || mask.is_empty() {
            let masks = self
                .list_for(&change.mode)
                .map(|list| list.iter().map(str::to_string).collect())
                .unwrap_or_default();
            replies.push(ModeReply::MaskList {
                mode: change.mode.clone(),
                masks,
            });
            return false;
        }

        if !self.require_operator(params, replies) {
            return false;
        }

        let list = match self.list_for_mut(&change.mode) {
            Some(list) => list,
            None => return false,
        };
        match change.op {
            ModeOp::Add => list.add(mask),
            ModeOp::Remove => list.remove(mask),
            ModeOp::List => false,
        }
    }

    fn apply_prefix(
        &mut self,
        params: &ModeParams,
        change: &ModeChange,
        replies: &mut Vec<ModeReply>,
    ) -> bool {
        let target_nick = change.arg.clone().unwrap_or_default();

        // Anyone may shed their own prefix mode; every other prefix change
        // passes the channel-operator gate and the ladder below.
        let self_removal =
            change.op == ModeOp::Remove && irc_eq(&target_nick, params.nick.as_str());

        if !self_removal {
            if !self.require_operator(params, replies) {
                return false;
            }

            // Walk the ladder top-down: the actor's highest held mode
            // decides. Holding a mode at or above the one being changed
            // qualifies, except that admin cannot grant or revoke admin —
            // that stays with the founder.
            let actor_modes = self.members.get(&params.uid).cloned().unwrap_or_default();
            let mut has_privs = false;
            for ladder_mode in &PREFIX_LADDER {
                if actor_modes.has(ladder_mode) {
                    has_privs =
                        !(*ladder_mode == ChannelMode::Admin && change.mode == ChannelMode::Admin);
                    break;
                }
                if *ladder_mode == change.mode {
                    break;
                }
            }

            if !has_privs {
                replies.push(ModeReply::Rejected(ChannelError::ChanOpPrivsNeeded));
                return false;
            }
        }

        self.apply_prefix_member(params, change, &target_nick, replies)
    }

    /// Look up the target, verify membership, and flip the named mode.
    fn apply_prefix_member(
        &mut self,
        params: &ModeParams,
        change: &ModeChange,
        target_nick: &str,
        replies: &mut Vec<ModeReply>,
    ) -> bool {
        if target_nick.is_empty() {
            replies.push(ModeReply::Rejected(ChannelError::NeedMoreParams));
            return false;
        }

        let target_uid = match params.targets.get(&irc_to_lower(target_nick)) {
            Some(uid) => uid,
            None => {
                replies.push(ModeReply::Rejected(ChannelError::NoSuchNick(
                    target_nick.to_string(),
                )));
                return false;
            }
        };

        let modes = match self.members.get_mut(target_uid) {
            Some(modes) => modes,
            None => {
                replies.push(ModeReply::Rejected(ChannelError::UserNotInChannel(
                    target_nick.to_string(),
                )));
                return false;
            }
        };

        match change.op {
            ModeOp::Add => modes.set(&change.mode, true),
            ModeOp::Remove => modes.set(&change.mode, false),
            ModeOp::List => false,
        }
    }
}
