//! Connected client state.

use std::collections::HashSet;
use std::sync::Arc;

use kestrel_proto::{Message, Name, Prefix};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::warn;

/// The multi-prefix IRCv3 capability name.
pub const CAP_MULTI_PREFIX: &str = "multi-prefix";

/// Unique identifier for a client connection.
pub type Uid = String;

/// A registered client as the channel core sees it.
///
/// The connection plumbing (registration handshake, line framing) lives
/// outside this crate; it hands us an outbound queue and identity fields.
#[derive(Debug)]
pub struct Client {
    pub uid: Uid,
    pub nick: Name,
    pub user: String,
    pub host: String,
    /// Negotiated IRCv3 capabilities (e.g. `multi-prefix`).
    pub caps: HashSet<String>,
    /// Server-wide operator.
    pub oper: bool,
    /// Away message, if marked away.
    pub away: Option<String>,
    /// Channels this client is in: the mirror of each channel's member set.
    pub channels: HashSet<Name>,
    pub sender: mpsc::Sender<Arc<Message>>,
}

impl Client {
    /// The `nick!user@host` identity string, used both as a message source
    /// and as the subject for mask matching.
    pub fn nickmask(&self) -> String {
        format!("{}!{}@{}", self.nick, self.user, self.host)
    }

    /// Message source prefix for lines originated by this client.
    pub fn prefix(&self) -> Prefix {
        Prefix::user(self.nick.as_str(), &self.user, &self.host)
    }

    pub fn has_cap(&self, cap: &str) -> bool {
        self.caps.contains(cap)
    }

    /// Enqueue one line without blocking.
    ///
    /// A full outbound queue drops the line for this recipient only; a
    /// closed queue means the connection is already gone.
    pub fn try_send(&self, msg: Arc<Message>) {
        match self.sender.try_send(msg) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                warn!(nick = %self.nick, "outbound queue full, dropping line");
            }
            Err(TrySendError::Closed(_)) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> (Client, mpsc::Receiver<Arc<Message>>) {
        let (tx, rx) = mpsc::channel(4);
        let client = Client {
            uid: "u000001".to_string(),
            nick: Name::from("Alice"),
            user: "ali".to_string(),
            host: "host.example".to_string(),
            caps: HashSet::new(),
            oper: false,
            away: None,
            channels: HashSet::new(),
            sender: tx,
        };
        (client, rx)
    }

    #[test]
    fn nickmask_shape() {
        let (client, _rx) = test_client();
        assert_eq!(client.nickmask(), "Alice!ali@host.example");
    }

    #[tokio::test]
    async fn try_send_enqueues() {
        let (client, mut rx) = test_client();
        let msg = Arc::new(Message::new(None, kestrel_proto::Command::QUIT(None)));
        client.try_send(msg.clone());
        assert_eq!(rx.recv().await.unwrap(), msg);
    }

    #[tokio::test]
    async fn try_send_drops_when_full() {
        let (client, mut rx) = test_client();
        let msg = Arc::new(Message::new(None, kestrel_proto::Command::QUIT(None)));
        for _ in 0..8 {
            client.try_send(msg.clone());
        }
        // Only the queue capacity made it through; nothing panicked.
        let mut received = 0;
        while rx.try_recv().is_ok() {
            received += 1;
        }
        assert_eq!(received, 4);
    }
}
