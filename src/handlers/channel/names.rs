//! NAMES handler.
//!
//! Lines are wrapped under a budget of `480 - len(server name) -
//! len(recipient nick)` bytes of nickname payload, with member prefixes
//! honoring the requester's multi-prefix capability.

use std::sync::Arc;

use kestrel_proto::{Name, Response};
use tokio::sync::RwLock;

use crate::handlers::{request, server_reply, ActingClient};
use crate::state::actor::ChannelEvent;
use crate::state::client::Client;
use crate::state::{ServerState, CAP_MULTI_PREFIX};

pub async fn names(state: &Arc<ServerState>, client: &Arc<RwLock<Client>>, channel: &Name) {
    let acting = ActingClient::capture(client).await;
    send_names(state, &acting, channel).await;
}

pub(crate) async fn send_names(state: &ServerState, acting: &ActingClient, channel: &Name) {
    let snapshot = match state.channels.get(channel) {
        Some(tx) => request(&tx, |reply_tx| ChannelEvent::GetNames { reply_tx }).await,
        None => None,
    };

    let nick = acting.nick.as_str().to_string();
    let multi_prefix = acting.caps.contains(CAP_MULTI_PREFIX);

    let channel_display = match &snapshot {
        Some(snapshot) => snapshot.name.clone(),
        None => channel.as_str().to_string(),
    };

    if let Some(snapshot) = snapshot {
        let budget = 480usize.saturating_sub(state.name.len() + nick.len());
        let symbol = if snapshot.secret { "@" } else { "=" };

        let mut buffer = String::new();
        for (member_nick, modes) in &snapshot.members {
            let token = format!("{}{}", modes.prefixes(multi_prefix), member_nick);

            if buffer.is_empty() {
                buffer = token;
                continue;
            }

            if buffer.len() + 1 + token.len() > budget {
                acting.try_send(server_reply(
                    &state.name,
                    Response::RPL_NAMREPLY,
                    vec![
                        nick.clone(),
                        symbol.to_string(),
                        channel_display.clone(),
                        buffer,
                    ],
                ));
                buffer = token;
                continue;
            }

            buffer.push(' ');
            buffer.push_str(&token);
        }

        // Flush the tail, even when the channel is empty.
        acting.try_send(server_reply(
            &state.name,
            Response::RPL_NAMREPLY,
            vec![
                nick.clone(),
                symbol.to_string(),
                channel_display.clone(),
                buffer,
            ],
        ));
    }

    acting.try_send(server_reply(
        &state.name,
        Response::RPL_ENDOFNAMES,
        vec![nick, channel_display, "End of /NAMES list".to_string()],
    ));
}
