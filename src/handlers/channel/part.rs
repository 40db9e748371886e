//! PART handler.

use std::sync::Arc;

use kestrel_proto::Name;
use tokio::sync::RwLock;

use crate::handlers::{request, ActingClient};
use crate::state::actor::{ChannelError, ChannelEvent};
use crate::state::client::Client;
use crate::state::ServerState;

pub async fn part(
    state: &Arc<ServerState>,
    client: &Arc<RwLock<Client>>,
    channel: &Name,
    reason: Option<&str>,
) {
    let acting = ActingClient::capture(client).await;

    let tx = match state.channels.get(channel) {
        Some(tx) => tx,
        None => {
            // No such channel means the client is not on it.
            acting.send_error(&state.name, &ChannelError::NotOnChannel, channel.as_str());
            return;
        }
    };

    let uid = acting.uid.clone();
    let prefix = acting.prefix.clone();
    let reason = reason.map(str::to_string);
    let reply = request(&tx, |reply_tx| ChannelEvent::Part {
        uid,
        reason,
        prefix,
        reply_tx,
    })
    .await;

    match reply {
        Some(Ok(())) => {
            client.write().await.channels.remove(channel);
        }
        Some(Err(err)) => acting.send_error(&state.name, &err, channel.as_str()),
        None => {}
    }
}
