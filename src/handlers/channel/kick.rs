//! KICK handler.

use std::sync::Arc;

use kestrel_proto::Name;
use tokio::sync::RwLock;

use crate::handlers::{request, ActingClient};
use crate::state::actor::{ChannelError, ChannelEvent, KickParams};
use crate::state::client::Client;
use crate::state::ServerState;

pub async fn kick(
    state: &Arc<ServerState>,
    client: &Arc<RwLock<Client>>,
    channel: &Name,
    target: &Name,
    comment: &str,
) {
    let acting = ActingClient::capture(client).await;

    let tx = match state.channels.get(channel) {
        Some(tx) => tx,
        None => {
            acting.send_error(&state.name, &ChannelError::NotOnChannel, channel.as_str());
            return;
        }
    };

    let target_client = match state.clients.get(target) {
        Some(target_client) => target_client,
        None => {
            acting.send_error(
                &state.name,
                &ChannelError::NoSuchNick(target.as_str().to_string()),
                channel.as_str(),
            );
            return;
        }
    };

    let (target_uid, target_nick) = {
        let t = target_client.read().await;
        (t.uid.clone(), t.nick.as_str().to_string())
    };

    let params = KickParams {
        sender_uid: acting.uid.clone(),
        sender_is_oper: acting.oper,
        sender_prefix: acting.prefix.clone(),
        target_uid,
        target_nick,
        comment: comment.to_string(),
    };

    let reply = request(&tx, |reply_tx| ChannelEvent::Kick { params, reply_tx }).await;

    match reply {
        Some(Ok(())) => {
            target_client.write().await.channels.remove(channel);
        }
        Some(Err(err)) => acting.send_error(&state.name, &err, channel.as_str()),
        None => {}
    }
}
