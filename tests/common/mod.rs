//! Integration test infrastructure.
//!
//! Builds a server state over the in-memory store and fake clients whose
//! outbound queues are drained directly, so whole channel flows run
//! without sockets.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::Once;
use std::time::Duration;

use kestreld::db::MemoryChannelStore;
use kestreld::state::client::Client;
use kestreld::state::{ServerState, CAP_MULTI_PREFIX};
use kestreld::ServerConfig;

use kestrel_proto::{Command, Message, Name, Response};
use tokio::sync::{mpsc, RwLock};

static INIT_TRACING: Once = Once::new();

/// Outbound queue depth for test clients: deep enough that broadcast
/// storms in large-membership tests are not dropped.
const CLIENT_QUEUE: usize = 4096;

pub struct TestNet {
    pub state: Arc<ServerState>,
    pub store: Arc<MemoryChannelStore>,
}

impl TestNet {
    pub fn new() -> Self {
        Self::with_server_name("irc.kestrel.example")
    }

    /// A fresh server state over an existing store, as after a restart.
    pub fn with_store(store: Arc<MemoryChannelStore>) -> Self {
        let config = ServerConfig::default();
        let state = ServerState::new(&config, store.clone());
        Self { state, store }
    }

    pub fn with_server_name(name: &str) -> Self {
        INIT_TRACING.call_once(|| {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| "warn".into()),
                )
                .with_test_writer()
                .try_init();
        });

        let config = ServerConfig {
            name: name.to_string(),
            ..ServerConfig::default()
        };
        let store = Arc::new(MemoryChannelStore::new());
        let state = ServerState::new(&config, store.clone());
        Self { state, store }
    }

    /// Register a client with plain identity fields.
    pub async fn client(&self, nick: &str) -> TestClient {
        let (tx, rx) = mpsc::channel(CLIENT_QUEUE);
        let handle = self.state.clients.register(
            Name::from(nick),
            &nick.to_lowercase(),
            "host.example",
            tx,
        );
        TestClient {
            handle,
            rx,
            nick: Name::from(nick),
        }
    }

    /// Register a client with an explicit user@host (for mask tests).
    pub async fn client_at(&self, nick: &str, user: &str, host: &str) -> TestClient {
        let (tx, rx) = mpsc::channel(CLIENT_QUEUE);
        let handle = self
            .state
            .clients
            .register(Name::from(nick), user, host, tx);
        TestClient {
            handle,
            rx,
            nick: Name::from(nick),
        }
    }
}

pub struct TestClient {
    pub handle: Arc<RwLock<Client>>,
    pub rx: mpsc::Receiver<Arc<Message>>,
    pub nick: Name,
}

impl TestClient {
    pub async fn set_oper(&self) {
        self.handle.write().await.oper = true;
    }

    pub async fn set_away(&self, message: &str) {
        self.handle.write().await.away = Some(message.to_string());
    }

    pub async fn enable_multi_prefix(&self) {
        self.handle
            .write()
            .await
            .caps
            .insert(CAP_MULTI_PREFIX.to_string());
    }

    /// Receive the next line, failing the test after a short timeout.
    pub async fn recv(&mut self) -> Arc<Message> {
        tokio::time::timeout(Duration::from_secs(1), self.rx.recv())
            .await
            .expect("timed out waiting for a line")
            .expect("client queue closed")
    }

    /// Drain everything already enqueued.
    pub fn drain(&mut self) -> Vec<Arc<Message>> {
        let mut out = Vec::new();
        while let Ok(msg) = self.rx.try_recv() {
            out.push(msg);
        }
        out
    }

    /// Drain and return only numeric replies as `(code, args)`.
    pub fn drain_numerics(&mut self) -> Vec<(Response, Vec<String>)> {
        self.drain()
            .into_iter()
            .filter_map(|msg| match &msg.command {
                Command::Response(code, args) => Some((*code, args.clone())),
                _ => None,
            })
            .collect()
    }

    /// Expect exactly one pending numeric with the given code.
    pub fn expect_numeric(&mut self, expected: Response) -> Vec<String> {
        let numerics = self.drain_numerics();
        let mut matching: Vec<_> = numerics
            .iter()
            .filter(|(code, _)| *code == expected)
            .cloned()
            .collect();
        assert_eq!(
            matching.len(),
            1,
            "expected one {:?}, saw numerics {:?}",
            expected,
            numerics
        );
        matching.pop().unwrap().1
    }

    /// Assert nothing is pending.
    pub fn expect_silence(&mut self) {
        let pending = self.drain();
        assert!(pending.is_empty(), "expected silence, got {:?}", pending);
    }
}

/// Pull every PRIVMSG/NOTICE payload out of a drained batch.
#[allow(dead_code)]
pub fn message_texts(batch: &[Arc<Message>]) -> Vec<String> {
    batch
        .iter()
        .filter_map(|msg| match &msg.command {
            Command::PRIVMSG(_, text) | Command::NOTICE(_, text) => Some(text.clone()),
            _ => None,
        })
        .collect()
}
