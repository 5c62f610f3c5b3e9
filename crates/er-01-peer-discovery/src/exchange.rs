//! # RPC Exchange
//!
//! One framed request/response round trip over an open stream. A request is
//! one line of JSON terminated by `\n`; so is the response.
//!
//! The deadline is fixed before the request is written and covers both the
//! write and the read. The response is read up to and including the first
//! `\n`. A peer that closes the connection before sending the terminator
//! yields an error, never a truncated response.

use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::time::Instant;

use crate::domain::ExchangeError;
use crate::protocol::JsonRpcRequest;

/// Default time allowed for one round trip.
pub const DEFAULT_READ_DEADLINE: Duration = Duration::from_secs(5);

/// Default cap on a single response line.
pub const DEFAULT_MAX_RESPONSE_BYTES: usize = 4 * 1024 * 1024;

/// Request/response framing with a deadline and a size cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RpcExchange {
    pub read_deadline: Duration,
    pub max_response_bytes: usize,
}

impl Default for RpcExchange {
    fn default() -> Self {
        Self {
            read_deadline: DEFAULT_READ_DEADLINE,
            max_response_bytes: DEFAULT_MAX_RESPONSE_BYTES,
        }
    }
}

impl RpcExchange {
    pub fn new(read_deadline: Duration, max_response_bytes: usize) -> Self {
        Self {
            read_deadline,
            max_response_bytes,
        }
    }

    /// Serialize `request` and exchange it.
    pub async fn send<S>(
        &self,
        stream: &mut S,
        request: &JsonRpcRequest,
    ) -> Result<Vec<u8>, ExchangeError>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let payload = serde_json::to_vec(request).map_err(ExchangeError::Serialize)?;
        self.send_raw(stream, &payload).await
    }

    /// Write `payload` as one line and return the response line, terminator
    /// included.
    pub async fn send_raw<S>(&self, stream: &mut S, payload: &[u8]) -> Result<Vec<u8>, ExchangeError>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let deadline = Instant::now() + self.read_deadline;
        let line = frame(payload);

        match tokio::time::timeout_at(deadline, self.round_trip(stream, &line)).await {
            Ok(result) => result,
            Err(_) => Err(ExchangeError::DeadlineExceeded(self.read_deadline)),
        }
    }

    async fn round_trip<S>(&self, stream: &mut S, line: &[u8]) -> Result<Vec<u8>, ExchangeError>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        stream.write_all(line).await.map_err(ExchangeError::Write)?;
        stream.flush().await.map_err(ExchangeError::Write)?;

        let mut reader = BufReader::new(stream).take(self.max_response_bytes as u64);
        let mut response = Vec::new();
        reader
            .read_until(b'\n', &mut response)
            .await
            .map_err(ExchangeError::Read)?;

        if response.last() == Some(&b'\n') {
            Ok(response)
        } else if response.len() >= self.max_response_bytes {
            Err(ExchangeError::ResponseTooLarge {
                limit: self.max_response_bytes,
            })
        } else {
            Err(ExchangeError::ConnectionClosed)
        }
    }
}

/// Strip any trailing line terminator and append exactly one `\n`.
fn frame(payload: &[u8]) -> Vec<u8> {
    let mut end = payload.len();
    while end > 0 && matches!(payload[end - 1], b'\n' | b'\r') {
        end -= 1;
    }
    let mut line = Vec::with_capacity(end + 1);
    line.extend_from_slice(&payload[..end]);
    line.push(b'\n');
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::duplex;

    #[test]
    fn test_frame_appends_single_newline() {
        assert_eq!(frame(b"{}"), b"{}\n");
        assert_eq!(frame(b"{}\n"), b"{}\n");
        assert_eq!(frame(b"{}\r\n"), b"{}\n");
        assert_eq!(frame(b""), b"\n");
    }

    #[tokio::test]
    async fn test_round_trip_returns_line_with_terminator() {
        let (mut client, mut server) = duplex(1024);
        let peer = tokio::spawn(async move {
            let mut reader = BufReader::new(&mut server);
            let mut request = String::new();
            reader.read_line(&mut request).await.unwrap();
            server
                .write_all(b"{\"jsonrpc\":\"2.0\",\"id\":1,\"result\":[]}\n")
                .await
                .unwrap();
            request
        });

        let response = RpcExchange::default()
            .send(&mut client, &JsonRpcRequest::peers_subscribe(1))
            .await
            .unwrap();
        assert_eq!(response, b"{\"jsonrpc\":\"2.0\",\"id\":1,\"result\":[]}\n");

        let request = peer.await.unwrap();
        assert!(request.ends_with('\n'));
        assert!(request.contains("server.peers.subscribe"));
    }

    #[tokio::test]
    async fn test_bytes_after_terminator_are_ignored() {
        let (mut client, mut server) = duplex(1024);
        tokio::spawn(async move {
            let mut buf = [0u8; 64];
            let _ = server.read(&mut buf).await;
            server.write_all(b"first\nsecond\n").await.unwrap();
        });

        let response = RpcExchange::default()
            .send_raw(&mut client, b"ping")
            .await
            .unwrap();
        assert_eq!(response, b"first\n");
    }

    #[tokio::test]
    async fn test_silent_peer_hits_deadline() {
        let (mut client, _server) = duplex(1024);
        let exchange = RpcExchange::new(Duration::from_millis(50), 1024);

        let started = std::time::Instant::now();
        let err = exchange.send_raw(&mut client, b"ping").await.unwrap_err();
        assert!(matches!(err, ExchangeError::DeadlineExceeded(_)));
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_early_close_is_an_error() {
        let (mut client, mut server) = duplex(1024);
        tokio::spawn(async move {
            let mut buf = [0u8; 64];
            let _ = server.read(&mut buf).await;
            server.write_all(b"{\"partial\":").await.unwrap();
            drop(server);
        });

        let err = RpcExchange::default()
            .send_raw(&mut client, b"ping")
            .await
            .unwrap_err();
        assert!(matches!(err, ExchangeError::ConnectionClosed));
    }

    #[tokio::test]
    async fn test_oversized_response_is_rejected() {
        let (mut client, mut server) = duplex(4096);
        tokio::spawn(async move {
            let mut buf = [0u8; 64];
            let _ = server.read(&mut buf).await;
            let _ = server.write_all(&[b'x'; 256]).await;
            let _ = server.write_all(b"\n").await;
        });

        let err = RpcExchange::new(Duration::from_secs(2), 64)
            .send_raw(&mut client, b"ping")
            .await
            .unwrap_err();
        assert!(matches!(err, ExchangeError::ResponseTooLarge { limit: 64 }));
    }
}
