//! In-process mock Electrum node.
//!
//! Listens on an ephemeral loopback port, reads one request line per
//! connection and answers according to its [`MockBehaviour`]. Every received
//! line is recorded for assertions.

use std::net::SocketAddr;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::domain::Node;

/// How the mock answers each connection.
#[derive(Debug, Clone)]
pub enum MockBehaviour {
    /// Reply with this line. A `\n` is appended if missing.
    Reply(String),
    /// Read the request and never answer.
    Silent,
    /// Accept and close without reading.
    CloseImmediately,
    /// Write these bytes without a terminator, then close.
    Partial(String),
}

/// A plain-TCP Electrum node served from a background task.
pub struct MockElectrumNode {
    addr: SocketAddr,
    received: Arc<Mutex<Vec<String>>>,
    task: JoinHandle<()>,
}

impl MockElectrumNode {
    /// Bind to `127.0.0.1:0` and start serving.
    pub async fn start(behaviour: MockBehaviour) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let received = Arc::new(Mutex::new(Vec::new()));

        let log = received.clone();
        let task = tokio::spawn(async move {
            while let Ok((socket, _)) = listener.accept().await {
                tokio::spawn(handle(socket, behaviour.clone(), log.clone()));
            }
        });

        Ok(Self {
            addr,
            received,
            task,
        })
    }

    /// Answer every request with `line`.
    pub async fn replying(line: impl Into<String>) -> std::io::Result<Self> {
        Self::start(MockBehaviour::Reply(line.into())).await
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Seed record pointing at this mock over plain TCP.
    pub fn node(&self) -> Node {
        Node::seed("127.0.0.1", 0, self.port())
    }

    /// Request lines received so far, terminators stripped.
    pub fn received(&self) -> Vec<String> {
        self.received.lock().clone()
    }
}

impl Drop for MockElectrumNode {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn handle(
    mut socket: tokio::net::TcpStream,
    behaviour: MockBehaviour,
    log: Arc<Mutex<Vec<String>>>,
) {
    if matches!(behaviour, MockBehaviour::CloseImmediately) {
        return;
    }

    let (read_half, mut write_half) = socket.split();
    let mut reader = BufReader::new(read_half);
    let mut line = String::new();
    if reader.read_line(&mut line).await.is_err() {
        return;
    }
    log.lock().push(line.trim_end().to_string());

    match behaviour {
        MockBehaviour::Reply(mut reply) => {
            if !reply.ends_with('\n') {
                reply.push('\n');
            }
            let _ = write_half.write_all(reply.as_bytes()).await;
            let _ = write_half.flush().await;
            // Hold the connection open until the client closes it.
            let mut rest = String::new();
            let _ = reader.read_line(&mut rest).await;
        }
        MockBehaviour::Silent => {
            let mut rest = String::new();
            let _ = reader.read_line(&mut rest).await;
        }
        MockBehaviour::Partial(bytes) => {
            let _ = write_half.write_all(bytes.as_bytes()).await;
            let _ = write_half.shutdown().await;
        }
        MockBehaviour::CloseImmediately => {}
    }
}

/// A `server.peers.subscribe` response listing the given
/// `(ip, host, features)` entries.
pub fn peers_response(id: u64, entries: &[(&str, &str, &[&str])]) -> String {
    let result: Vec<serde_json::Value> = entries
        .iter()
        .map(|(ip, host, features)| serde_json::json!([ip, host, features]))
        .collect();
    serde_json::json!({ "jsonrpc": "2.0", "id": id, "result": result }).to_string()
}
