//! Connection-teardown handling.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use crate::handlers::request;
use crate::state::actor::ChannelEvent;
use crate::state::client::Client;
use crate::state::ServerState;

/// Remove a disconnecting client from every channel it belongs to and
/// deregister it.
///
/// Removal is silent at the channel level; the connection layer owns the
/// QUIT broadcast. Safe against concurrent channel operations — each
/// removal is one serialized actor event.
pub async fn quit(state: &Arc<ServerState>, client: &Arc<RwLock<Client>>) {
    let (uid, nick, channels) = {
        let c = client.read().await;
        (
            c.uid.clone(),
            c.nick.clone(),
            c.channels.iter().cloned().collect::<Vec<_>>(),
        )
    };

    for name in channels {
        if let Some(tx) = state.channels.get(&name) {
            let uid = uid.clone();
            let _ = request(&tx, |reply_tx| ChannelEvent::Quit {
                uid,
                reply_tx: Some(reply_tx),
            })
            .await;
        }
    }

    client.write().await.channels.clear();
    state.clients.remove(&nick);
    info!(nick = %nick, "client departed");
}
