//! PRIVMSG/NOTICE handlers.
//!
//! NOTICE stays silent when the target channel does not exist; the
//! cannot-send check itself replies for both commands.

use std::sync::Arc;

use kestrel_proto::{Name, Response};
use tokio::sync::RwLock;

use crate::handlers::{request, server_reply, ActingClient};
use crate::state::actor::{ChannelEvent, MessageParams};
use crate::state::client::Client;
use crate::state::ServerState;

pub async fn privmsg(
    state: &Arc<ServerState>,
    client: &Arc<RwLock<Client>>,
    channel: &Name,
    text: &str,
) {
    send_channel_message(state, client, channel, text, false).await;
}

pub async fn notice(
    state: &Arc<ServerState>,
    client: &Arc<RwLock<Client>>,
    channel: &Name,
    text: &str,
) {
    send_channel_message(state, client, channel, text, true).await;
}

async fn send_channel_message(
    state: &Arc<ServerState>,
    client: &Arc<RwLock<Client>>,
    channel: &Name,
    text: &str,
    notice: bool,
) {
    let acting = ActingClient::capture(client).await;

    let tx = match state.channels.get(channel) {
        Some(tx) => tx,
        None => {
            if !notice {
                acting.try_send(server_reply(
                    &state.name,
                    Response::ERR_NOSUCHCHANNEL,
                    vec![
                        acting.nick.as_str().to_string(),
                        channel.as_str().to_string(),
                        "No such channel".to_string(),
                    ],
                ));
            }
            return;
        }
    };

    let params = MessageParams {
        uid: acting.uid.clone(),
        is_oper: acting.oper,
        prefix: acting.prefix.clone(),
        notice,
        text: text.to_string(),
    };

    let reply = request(&tx, |reply_tx| ChannelEvent::Message { params, reply_tx }).await;

    if let Some(Err(err)) = reply {
        acting.send_error(&state.name, &err, channel.as_str());
    }
}
