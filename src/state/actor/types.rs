//! Type definitions for the channel actor model.
//!
//! Contains [`ChannelEvent`] variants and the parameter/outcome structs
//! passed to and from [`ChannelActor`](super::ChannelActor) instances.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use kestrel_proto::mode::ModeChange;
use kestrel_proto::{ChannelMode, Message, Name, Prefix};
use tokio::sync::{mpsc, oneshot};

use crate::db::ChannelSnapshot;
use crate::state::channel::{parse_flags, MemberModes};
use crate::state::client::Uid;
use crate::state::masks::UserMaskSet;

// Re-export ChannelError from the central error module.
pub use crate::error::ChannelError;

/// Parameters for JOIN event handling.
#[derive(Debug)]
pub struct JoinParams {
    pub uid: Uid,
    pub nick: Name,
    /// `nick!user@host`, the mask-matching subject.
    pub nickmask: String,
    /// Source prefix for the JOIN broadcast.
    pub prefix: Prefix,
    pub sender: mpsc::Sender<Arc<Message>>,
    pub key: Option<String>,
}

/// What a successful JOIN tells the handler layer.
#[derive(Debug)]
pub struct JoinOutcome {
    /// False when the client was already a member (silent no-op).
    pub newly_joined: bool,
    /// Current topic, if one is set, for delivery to the joiner.
    pub topic: Option<String>,
}

/// Parameters for KICK event handling.
#[derive(Debug)]
pub struct KickParams {
    pub sender_uid: Uid,
    pub sender_is_oper: bool,
    pub sender_prefix: Prefix,
    pub target_uid: Uid,
    pub target_nick: String,
    pub comment: String,
}

/// Parameters for INVITE event handling.
#[derive(Debug)]
pub struct InviteParams {
    pub inviter_uid: Uid,
    pub inviter_is_oper: bool,
    pub invitee_nickmask: String,
}

/// Parameters for TOPIC change handling.
#[derive(Debug)]
pub struct TopicParams {
    pub uid: Uid,
    pub is_oper: bool,
    pub prefix: Prefix,
    pub topic: String,
}

/// Parameters for channel PRIVMSG/NOTICE handling.
#[derive(Debug)]
pub struct MessageParams {
    pub uid: Uid,
    pub is_oper: bool,
    pub prefix: Prefix,
    pub notice: bool,
    pub text: String,
}

/// Parameters for MODE application.
#[derive(Debug)]
pub struct ModeParams {
    pub uid: Uid,
    pub nick: Name,
    pub is_oper: bool,
    pub prefix: Prefix,
    pub changes: Vec<ModeChange>,
    /// Prefix-mode target nicknames resolved against the client registry,
    /// keyed by folded nick. Nicks absent here are unknown to the server.
    pub targets: HashMap<String, Uid>,
}

/// Result of applying a MODE batch.
#[derive(Debug, Default)]
pub struct ModeOutcome {
    /// The subsequence of changes that mutated state, in input order.
    pub applied: Vec<ModeChange>,
    /// Per-change replies for the acting client, in input order.
    pub replies: Vec<ModeReply>,
}

/// One reply owed to the acting client for a mode batch.
#[derive(Debug)]
pub enum ModeReply {
    /// A change was rejected with this protocol error.
    Rejected(ChannelError),
    /// A mask-list query: the list contents in stable order.
    MaskList {
        mode: ChannelMode,
        masks: Vec<String>,
    },
    /// Empty batch: the current mode string.
    Current { modestring: String },
}

/// Membership snapshot for NAMES formatting.
#[derive(Debug)]
pub struct NamesSnapshot {
    /// Channel display name.
    pub name: String,
    pub secret: bool,
    /// `(nick, modes)` sorted by folded nick.
    pub members: Vec<(String, MemberModes)>,
}

/// Initial state for an actor spawned from the persistence store.
#[derive(Debug, Default)]
pub struct ChannelSeed {
    pub flags: HashSet<ChannelMode>,
    pub key: String,
    pub user_limit: u64,
    pub topic: String,
    pub bans: UserMaskSet,
    pub excepts: UserMaskSet,
    pub invites: UserMaskSet,
}

impl ChannelSeed {
    /// Rebuild channel state from a stored row.
    ///
    /// The key/limit flag markers are renormalized against the stored
    /// values so the marker-iff-set invariant holds whatever the row says.
    pub fn from_snapshot(snapshot: &ChannelSnapshot) -> Self {
        let mut flags = parse_flags(&snapshot.flags);

        if snapshot.key.is_empty() {
            flags.remove(&ChannelMode::Key);
        } else {
            flags.insert(ChannelMode::Key);
        }
        if snapshot.user_limit == 0 {
            flags.remove(&ChannelMode::Limit);
        } else {
            flags.insert(ChannelMode::Limit);
        }

        Self {
            flags,
            key: snapshot.key.clone(),
            user_limit: snapshot.user_limit,
            topic: snapshot.topic.clone(),
            bans: UserMaskSet::parse(&snapshot.ban_list),
            excepts: UserMaskSet::parse(&snapshot.except_list),
            invites: UserMaskSet::parse(&snapshot.invite_list),
        }
    }
}

/// Events that can be sent to a channel actor.
#[derive(Debug)]
pub enum ChannelEvent {
    /// Client joining the channel.
    Join {
        params: Box<JoinParams>,
        reply_tx: oneshot::Sender<Result<JoinOutcome, ChannelError>>,
    },
    /// Client leaving the channel.
    Part {
        uid: Uid,
        reason: Option<String>,
        prefix: Prefix,
        reply_tx: oneshot::Sender<Result<(), ChannelError>>,
    },
    /// Client disconnecting: silent membership removal.
    Quit {
        uid: Uid,
        reply_tx: Option<oneshot::Sender<usize>>,
    },
    /// Kick a member.
    Kick {
        params: KickParams,
        reply_tx: oneshot::Sender<Result<(), ChannelError>>,
    },
    /// Record an invitation (invite-only channels add the invitee's mask).
    Invite {
        params: InviteParams,
        reply_tx: oneshot::Sender<Result<(), ChannelError>>,
    },
    /// Read the topic. `Ok(None)` means no topic is set.
    GetTopic {
        uid: Uid,
        reply_tx: oneshot::Sender<Result<Option<String>, ChannelError>>,
    },
    /// Replace the topic and broadcast it.
    SetTopic {
        params: TopicParams,
        reply_tx: oneshot::Sender<Result<(), ChannelError>>,
    },
    /// PRIVMSG/NOTICE to the channel.
    Message {
        params: MessageParams,
        reply_tx: oneshot::Sender<Result<(), ChannelError>>,
    },
    /// Apply a batch of mode changes.
    ApplyModes {
        params: Box<ModeParams>,
        reply_tx: oneshot::Sender<ModeOutcome>,
    },
    /// Membership snapshot for NAMES.
    GetNames {
        reply_tx: oneshot::Sender<NamesSnapshot>,
    },
}
