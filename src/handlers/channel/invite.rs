//! INVITE handler.

use std::sync::Arc;

use kestrel_proto::{Command, Message, Name, Response};
use tokio::sync::RwLock;

use crate::handlers::{request, server_reply, ActingClient};
use crate::state::actor::{ChannelError, ChannelEvent, InviteParams};
use crate::state::client::Client;
use crate::state::ServerState;

pub async fn invite(
    state: &Arc<ServerState>,
    client: &Arc<RwLock<Client>>,
    target: &Name,
    channel: &Name,
) {
    let acting = ActingClient::capture(client).await;

    let invitee = match state.clients.get(target) {
        Some(invitee) => invitee,
        None => {
            acting.send_error(
                &state.name,
                &ChannelError::NoSuchNick(target.as_str().to_string()),
                channel.as_str(),
            );
            return;
        }
    };

    let tx = match state.channels.get(channel) {
        Some(tx) => tx,
        None => {
            acting.try_send(server_reply(
                &state.name,
                Response::ERR_NOSUCHCHANNEL,
                vec![
                    acting.nick.as_str().to_string(),
                    channel.as_str().to_string(),
                    "No such channel".to_string(),
                ],
            ));
            return;
        }
    };

    let (invitee_nick, invitee_mask, invitee_away) = {
        let i = invitee.read().await;
        (i.nick.as_str().to_string(), i.nickmask(), i.away.clone())
    };

    let params = InviteParams {
        inviter_uid: acting.uid.clone(),
        inviter_is_oper: acting.oper,
        invitee_nickmask: invitee_mask,
    };

    let reply = request(&tx, |reply_tx| ChannelEvent::Invite { params, reply_tx }).await;

    match reply {
        Some(Ok(())) => {
            acting.try_send(server_reply(
                &state.name,
                Response::RPL_INVITING,
                vec![
                    acting.nick.as_str().to_string(),
                    invitee_nick.clone(),
                    channel.as_str().to_string(),
                ],
            ));

            let invite_msg = Message {
                tags: None,
                prefix: Some(acting.prefix.clone()),
                command: Command::INVITE(invitee_nick.clone(), channel.as_str().to_string()),
            };
            invitee.read().await.try_send(Arc::new(invite_msg));

            if let Some(away) = invitee_away {
                acting.try_send(server_reply(
                    &state.name,
                    Response::RPL_AWAY,
                    vec![acting.nick.as_str().to_string(), invitee_nick, away],
                ));
            }
        }
        Some(Err(err)) => acting.send_error(&state.name, &err, channel.as_str()),
        None => {}
    }
}
