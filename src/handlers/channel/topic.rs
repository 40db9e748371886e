//! TOPIC handlers.

use std::sync::Arc;

use kestrel_proto::{Name, Response};
use tokio::sync::RwLock;

use crate::handlers::{request, server_reply, ActingClient};
use crate::state::actor::{ChannelError, ChannelEvent, TopicParams};
use crate::state::client::Client;
use crate::state::ServerState;

pub async fn get_topic(state: &Arc<ServerState>, client: &Arc<RwLock<Client>>, channel: &Name) {
    let acting = ActingClient::capture(client).await;

    let tx = match state.channels.get(channel) {
        Some(tx) => tx,
        None => {
            acting.send_error(&state.name, &ChannelError::NotOnChannel, channel.as_str());
            return;
        }
    };

    let uid = acting.uid.clone();
    let reply = request(&tx, |reply_tx| ChannelEvent::GetTopic { uid, reply_tx }).await;

    match reply {
        Some(Ok(Some(topic))) => {
            acting.try_send(server_reply(
                &state.name,
                Response::RPL_TOPIC,
                vec![
                    acting.nick.as_str().to_string(),
                    channel.as_str().to_string(),
                    topic,
                ],
            ));
        }
        // No topic set: clients expect silence here.
        Some(Ok(None)) => {}
        Some(Err(err)) => acting.send_error(&state.name, &err, channel.as_str()),
        None => {}
    }
}

pub async fn set_topic(
    state: &Arc<ServerState>,
    client: &Arc<RwLock<Client>>,
    channel: &Name,
    topic: &str,
) {
    let acting = ActingClient::capture(client).await;

    let tx = match state.channels.get(channel) {
        Some(tx) => tx,
        None => {
            acting.send_error(&state.name, &ChannelError::NotOnChannel, channel.as_str());
            return;
        }
    };

    let params = TopicParams {
        uid: acting.uid.clone(),
        is_oper: acting.oper,
        prefix: acting.prefix.clone(),
        topic: topic.to_string(),
    };

    let reply = request(&tx, |reply_tx| ChannelEvent::SetTopic { params, reply_tx }).await;

    if let Some(Err(err)) = reply {
        acting.send_error(&state.name, &err, channel.as_str());
    }
}
