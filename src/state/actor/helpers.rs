//! Shared queries and persistence plumbing for the channel actor.

use kestrel_proto::ChannelMode;
use tracing::warn;

use super::types::NamesSnapshot;
use super::ChannelActor;
use crate::db::ChannelSnapshot;
use crate::state::channel::serialize_flags;
use crate::state::client::Uid;

impl ChannelActor {
    /// Channel-operator check: a server operator, or a member holding +o.
    pub(crate) fn client_is_operator(&self, uid: &Uid, is_oper: bool) -> bool {
        is_oper
            || self
                .members
                .get(uid)
                .map(|modes| modes.op)
                .unwrap_or(false)
    }

    pub(crate) fn is_full(&self) -> bool {
        self.user_limit > 0 && self.members.len() as u64 >= self.user_limit
    }

    pub(crate) fn check_key(&self, provided: Option<&str>) -> bool {
        self.key.is_empty() || provided == Some(self.key.as_str())
    }

    pub(crate) fn list_for(&self, mode: &ChannelMode) -> Option<&crate::state::UserMaskSet> {
        match mode {
            ChannelMode::Ban => Some(&self.bans),
            ChannelMode::Exception => Some(&self.excepts),
            ChannelMode::InviteException => Some(&self.invites),
            _ => None,
        }
    }

    pub(crate) fn list_for_mut(
        &mut self,
        mode: &ChannelMode,
    ) -> Option<&mut crate::state::UserMaskSet> {
        match mode {
            ChannelMode::Ban => Some(&mut self.bans),
            ChannelMode::Exception => Some(&mut self.excepts),
            ChannelMode::InviteException => Some(&mut self.invites),
            _ => None,
        }
    }

    /// `+<flags>[ <key>][ <limit>]` with positional arguments in flag order.
    ///
    /// The key is disclosed only when `show_key` (the viewer is a member or
    /// a server operator).
    pub(crate) fn mode_string(&self, show_key: bool) -> String {
        let show_key = show_key && !self.key.is_empty();
        let show_limit = self.user_limit > 0;

        let mut s = String::from("+");
        if show_key {
            s.push('k');
        }
        if show_limit {
            s.push('l');
        }

        let mut flag_chars: Vec<char> = self
            .flags
            .iter()
            .filter(|mode| mode.is_flag())
            .map(ChannelMode::as_char)
            .collect();
        flag_chars.sort_unstable();
        s.extend(flag_chars);

        if show_key {
            s.push(' ');
            s.push_str(&self.key);
        }
        if show_limit {
            s.push(' ');
            s.push_str(&self.user_limit.to_string());
        }

        s
    }

    pub(crate) fn names_snapshot(&self) -> NamesSnapshot {
        let mut members: Vec<(String, crate::state::MemberModes)> = self
            .members
            .iter()
            .map(|(uid, modes)| {
                let nick = self
                    .member_nicks
                    .get(uid)
                    .map(|n| n.as_str().to_string())
                    .unwrap_or_else(|| uid.clone());
                (nick, modes.clone())
            })
            .collect();
        members.sort_by_key(|(nick, _)| kestrel_proto::irc_to_lower(nick));

        NamesSnapshot {
            name: self.name.as_str().to_string(),
            secret: self.flags.contains(&ChannelMode::Secret),
            members,
        }
    }

    /// The durable form of this channel.
    pub(crate) fn snapshot(&self) -> ChannelSnapshot {
        ChannelSnapshot {
            name: self.name.as_str().to_string(),
            flags: serialize_flags(&self.flags),
            key: self.key.clone(),
            topic: self.topic.clone(),
            user_limit: self.user_limit,
            ban_list: self.bans.serialize(),
            except_list: self.excepts.serialize(),
            invite_list: self.invites.serialize(),
        }
    }

    /// Write through to the store: upsert while persistent, delete
    /// otherwise. Best-effort; failures are logged and ignored.
    pub(crate) async fn persist(&self) {
        let result = if self.is_persistent() {
            self.store.save(&self.snapshot()).await
        } else {
            self.store.delete(self.name.as_str()).await
        };

        if let Err(err) = result {
            warn!(channel = %self.name, error = %err, "channel persist failed");
        }
    }
}
