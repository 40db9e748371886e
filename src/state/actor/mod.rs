//! Actor model for channel state.
//!
//! Each channel is owned by a `ChannelActor` running on its own tokio task.
//! All interaction happens through [`ChannelEvent`] messages, so every
//! operation against one channel is serialized by its mailbox and no lock
//! is held while lines are delivered to members.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Weak};

use kestrel_proto::{ChannelMode, Message, Name};
use tokio::sync::mpsc;

use crate::db::ChannelStore;
use crate::state::channel::MemberModes;
use crate::state::client::Uid;
use crate::state::managers::ChannelManager;
use crate::state::masks::UserMaskSet;

mod handlers;
mod helpers;
mod types;

pub use types::*;

/// Mailbox capacity per channel. Senders briefly back-pressure under burst.
const MAILBOX_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ActorState {
    Active,
    /// Empty non-persistent channel, deregistered; queued events are
    /// answered with [`ChannelError::Tombstone`].
    Draining,
}

/// The channel actor: owns the state of a single channel and processes
/// events sequentially.
pub struct ChannelActor {
    pub name: Name,
    /// Boolean flags plus the key/limit markers. The markers track the
    /// `key`/`user_limit` fields: marker present iff the value is set.
    pub flags: HashSet<ChannelMode>,
    pub key: String,
    pub user_limit: u64,
    pub topic: String,
    pub bans: UserMaskSet,
    pub excepts: UserMaskSet,
    pub invites: UserMaskSet,
    pub members: im::HashMap<Uid, MemberModes>,
    pub member_nicks: HashMap<Uid, Name>,
    pub senders: HashMap<Uid, mpsc::Sender<Arc<Message>>>,
    /// True when this channel was seeded from the store: its first joiner
    /// is a returning visitor, not a founder.
    from_store: bool,
    store: Arc<dyn ChannelStore>,
    registry: Weak<ChannelManager>,
    state: ActorState,
}

impl ChannelActor {
    /// Spawn an actor for the named channel and return its mailbox.
    ///
    /// `seed` carries state loaded from the persistence store; `None`
    /// starts an empty channel created by a first JOIN.
    pub fn spawn(
        name: Name,
        seed: Option<ChannelSeed>,
        registry: Weak<ChannelManager>,
        store: Arc<dyn ChannelStore>,
    ) -> mpsc::Sender<ChannelEvent> {
        let (tx, rx) = mpsc::channel(MAILBOX_CAPACITY);

        let from_store = seed.is_some();
        let seed = seed.unwrap_or_default();
        let actor = Self {
            name,
            flags: seed.flags,
            key: seed.key,
            user_limit: seed.user_limit,
            topic: seed.topic,
            bans: seed.bans,
            excepts: seed.excepts,
            invites: seed.invites,
            members: im::HashMap::new(),
            member_nicks: HashMap::new(),
            senders: HashMap::new(),
            from_store,
            store,
            registry,
            state: ActorState::Active,
        };

        tokio::spawn(async move {
            actor.run(rx).await;
        });
        tx
    }

    /// The main actor loop.
    async fn run(mut self, mut rx: mpsc::Receiver<ChannelEvent>) {
        while let Some(event) = rx.recv().await {
            self.handle_event(event).await;
        }
    }

    async fn handle_event(&mut self, event: ChannelEvent) {
        match event {
            ChannelEvent::Join { params, reply_tx } => {
                self.handle_join(*params, reply_tx).await;
            }
            ChannelEvent::Part {
                uid,
                reason,
                prefix,
                reply_tx,
            } => {
                self.handle_part(uid, reason, prefix, reply_tx);
            }
            ChannelEvent::Quit { uid, reply_tx } => {
                self.handle_quit(uid, reply_tx);
            }
            ChannelEvent::Kick { params, reply_tx } => {
                self.handle_kick(params, reply_tx);
            }
            ChannelEvent::Invite { params, reply_tx } => {
                self.handle_invite(params, reply_tx).await;
            }
            ChannelEvent::GetTopic { uid, reply_tx } => {
                self.handle_get_topic(uid, reply_tx);
            }
            ChannelEvent::SetTopic { params, reply_tx } => {
                self.handle_set_topic(params, reply_tx).await;
            }
            ChannelEvent::Message { params, reply_tx } => {
                self.handle_message(params, reply_tx);
            }
            ChannelEvent::ApplyModes { params, reply_tx } => {
                self.handle_apply_modes(*params, reply_tx).await;
            }
            ChannelEvent::GetNames { reply_tx } => {
                let _ = reply_tx.send(self.names_snapshot());
            }
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub(crate) fn is_persistent(&self) -> bool {
        self.flags.contains(&ChannelMode::Permanent)
    }

    /// Deregister once empty and not persistent. Later events already in
    /// the mailbox observe the draining state.
    pub(crate) fn cleanup_if_empty(&mut self) {
        if self.state == ActorState::Draining {
            return;
        }

        if self.is_empty() && !self.is_persistent() {
            self.state = ActorState::Draining;
            if let Some(registry) = self.registry.upgrade() {
                registry.deregister(&self.name);
            }
        }
    }

    pub(crate) fn is_draining(&self) -> bool {
        self.state == ActorState::Draining
    }

    pub(crate) fn loaded_from_store(&self) -> bool {
        self.from_store
    }
}
