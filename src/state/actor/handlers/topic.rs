//! TOPIC event handling.

use kestrel_proto::{ChannelMode, Command, Message};
use tokio::sync::oneshot;

use super::super::{ChannelActor, ChannelError, TopicParams};
use crate::state::client::Uid;

impl ChannelActor {
    /// Read the topic. An unset topic is `Ok(None)`: clients expect
    /// silence rather than an empty RPL_TOPIC.
    pub(crate) fn handle_get_topic(
        &self,
        uid: Uid,
        reply_tx: oneshot::Sender<Result<Option<String>, ChannelError>>,
    ) {
        if !self.members.contains_key(&uid) {
            let _ = reply_tx.send(Err(ChannelError::NotOnChannel));
            return;
        }

        let topic = if self.topic.is_empty() {
            None
        } else {
            Some(self.topic.clone())
        };
        let _ = reply_tx.send(Ok(topic));
    }

    pub(crate) async fn handle_set_topic(
        &mut self,
        params: TopicParams,
        reply_tx: oneshot::Sender<Result<(), ChannelError>>,
    ) {
        if !(params.is_oper || self.members.contains_key(&params.uid)) {
            let _ = reply_tx.send(Err(ChannelError::NotOnChannel));
            return;
        }

        if self.flags.contains(&ChannelMode::TopicLock)
            && !self.client_is_operator(&params.uid, params.is_oper)
        {
            let _ = reply_tx.send(Err(ChannelError::ChanOpPrivsNeeded));
            return;
        }

        self.topic = params.topic.clone();

        let topic_msg = Message {
            tags: None,
            prefix: Some(params.prefix),
            command: Command::TOPIC(self.name.as_str().to_string(), Some(params.topic)),
        };
        self.broadcast(topic_msg, None);

        self.persist().await;
        let _ = reply_tx.send(Ok(()));
    }
}
