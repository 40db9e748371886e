//! MODE handler.

use std::collections::HashMap;
use std::sync::Arc;

use kestrel_proto::mode::ModeChange;
use kestrel_proto::{ChannelMode, Name, Response};
use tokio::sync::RwLock;

use crate::handlers::{request, server_reply, ActingClient};
use crate::state::actor::{ChannelEvent, ModeParams, ModeReply};
use crate::state::client::Client;
use crate::state::ServerState;

pub async fn mode(
    state: &Arc<ServerState>,
    client: &Arc<RwLock<Client>>,
    channel: &Name,
    changes: Vec<ModeChange>,
) {
    let acting = ActingClient::capture(client).await;

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

    // Resolve prefix-mode target nicks against the client registry; the
    // engine reports a nick missing here as ERR_NOSUCHNICK.
    let mut targets = HashMap::new();
    for change in &changes {
        if change.mode.is_prefix_mode() {
            if let Some(arg) = &change.arg {
                let name = Name::new(arg.clone());
                if let Some(target) = state.clients.get(&name) {
                    let uid = target.read().await.uid.clone();
                    targets.insert(name.folded().to_string(), uid);
                }
            }
        }
    }

    let params = ModeParams {
        uid: acting.uid.clone(),
        nick: acting.nick.clone(),
        is_oper: acting.oper,
        prefix: acting.prefix.clone(),
        changes,
        targets,
    };

    let outcome = match request(&tx, |reply_tx| ChannelEvent::ApplyModes {
        params: Box::new(params),
        reply_tx,
    })
    .await
    {
        Some(outcome) => outcome,
        None => return,
    };

    for reply in outcome.replies {
        match reply {
            ModeReply::Rejected(err) => {
                acting.send_error(&state.name, &err, channel.as_str());
            }
            ModeReply::Current { modestring } => {
                acting.try_send(server_reply(
                    &state.name,
                    Response::RPL_CHANNELMODEIS,
                    vec![
                        acting.nick.as_str().to_string(),
                        channel.as_str().to_string(),
                        modestring,
                    ],
                ));
            }
            ModeReply::MaskList { mode, masks } => {
                send_mask_list(state, &acting, channel, &mode, &masks);
            }
        }
    }
}

fn send_mask_list(
    state: &ServerState,
    acting: &ActingClient,
    channel: &Name,
    mode: &ChannelMode,
    masks: &[String],
) {
    let (entry, end, end_label) = match mode {
        ChannelMode::Ban => (
            Response::RPL_BANLIST,
            Response::RPL_ENDOFBANLIST,
            "End of channel ban list",
        ),
        ChannelMode::Exception => (
            Response::RPL_EXCEPTLIST,
            Response::RPL_ENDOFEXCEPTLIST,
            "End of channel exception list",
        ),
        ChannelMode::InviteException => (
            Response::RPL_INVITELIST,
            Response::RPL_ENDOFINVITELIST,
            "End of channel invite list",
        ),
        _ => return,
    };

    let nick = acting.nick.as_str().to_string();
    for mask in masks {
        acting.try_send(server_reply(
            &state.name,
            entry,
            vec![nick.clone(), channel.as_str().to_string(), mask.clone()],
        ));
    }
    acting.try_send(server_reply(
        &state.name,
        end,
        vec![
            nick,
            channel.as_str().to_string(),
            end_label.to_string(),
        ],
    ));
}
