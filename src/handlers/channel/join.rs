//! JOIN handler.
//!
//! Orchestrates the handshake with the channel actor: creating the channel
//! on first join, mirroring membership on the client, and delivering the
//! topic and NAMES listing to the joiner.

use std::sync::Arc;

use kestrel_proto::{Name, Response};
use tokio::sync::RwLock;

use super::names::send_names;
use crate::handlers::{request, server_reply, ActingClient};
use crate::state::actor::{ChannelError, ChannelEvent, JoinParams};
use crate::state::client::Client;
use crate::state::ServerState;

/// Retries against actors caught draining between lookup and delivery.
const JOIN_ATTEMPTS: usize = 3;

pub async fn join(
    state: &Arc<ServerState>,
    client: &Arc<RwLock<Client>>,
    channel: &Name,
    key: Option<&str>,
) {
    let acting = ActingClient::capture(client).await;

    for _ in 0..JOIN_ATTEMPTS {
        let tx = state.channels.get_or_create(channel);

        let params = JoinParams {
            uid: acting.uid.clone(),
            nick: acting.nick.clone(),
            nickmask: acting.nickmask.clone(),
            prefix: acting.prefix.clone(),
            sender: acting.sender.clone(),
            key: key.map(str::to_string),
        };

        let reply = request(&tx, |reply_tx| ChannelEvent::Join {
            params: Box::new(params),
            reply_tx,
        })
        .await;

        match reply {
            // Stale actor drained between lookup and delivery; the registry
            // entry is gone, so the next lookup creates a fresh one.
            Some(Err(ChannelError::Tombstone)) | None => continue,
            Some(Err(err)) => {
                acting.send_error(&state.name, &err, channel.as_str());
                return;
            }
            Some(Ok(outcome)) => {
                if !outcome.newly_joined {
                    return;
                }

                {
                    let mut c = client.write().await;
                    c.channels.insert(channel.clone());
                }

                if let Some(topic) = outcome.topic {
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

                send_names(state, &acting, channel).await;
                return;
            }
        }
    }
}
