//! Transport abstraction layer for the game room.
//!
//! The room never owns sockets. It talks to clients through the
//! [`Connection`] trait: send a text frame, receive the next text frame,
//! close with a reason, and ask whether the peer is still there.
//! [`Transport`] accepts new connections.
//!
//! # Feature Flags
//!
//! - `websocket` (default) — WebSocket transport via `tokio-tungstenite`

mod error;
#[cfg(feature = "websocket")]
mod websocket;

pub use error::TransportError;
#[cfg(feature = "websocket")]
pub use websocket::{WebSocketConnection, WebSocketTransport};

use std::fmt;
use std::future::Future;

/// Longest close reason a WebSocket close frame can carry, in bytes.
///
/// A close frame's payload is capped at 125 bytes and two of them are the
/// status code.
pub const MAX_CLOSE_REASON_LEN: usize = 123;

/// Opaque identifier for a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Creates a new `ConnectionId` from a raw `u64`.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying `u64` value.
    pub fn into_inner(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// Status code sent when the server closes a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseCode {
    /// Orderly shutdown (1000).
    Normal,
    /// The server hit a condition it could not recover from, such as a
    /// failed write (1011).
    UnexpectedCondition,
}

impl CloseCode {
    /// Returns the numeric WebSocket status code.
    pub fn as_u16(self) -> u16 {
        match self {
            Self::Normal => 1000,
            Self::UnexpectedCondition => 1011,
        }
    }
}

/// Cuts `reason` down to at most [`MAX_CLOSE_REASON_LEN`] bytes without
/// splitting a UTF-8 sequence.
pub fn trim_reason(reason: &str) -> &str {
    if reason.len() <= MAX_CLOSE_REASON_LEN {
        return reason;
    }
    let mut end = MAX_CLOSE_REASON_LEN;
    while !reason.is_char_boundary(end) {
        end -= 1;
    }
    &reason[..end]
}

/// Accepts new incoming connections.
pub trait Transport: Send + Sync + 'static {
    /// The connection type produced by this transport.
    type Connection: Connection;
    /// The error type for transport operations.
    type Error: std::error::Error + Send + Sync;

    /// Waits for and accepts the next incoming connection.
    fn accept(
        &mut self,
    ) -> impl Future<Output = Result<Self::Connection, Self::Error>> + Send;
}

/// A single client connection carrying text frames.
pub trait Connection: Send + Sync + 'static {
    /// The error type for connection operations.
    type Error: std::error::Error + Send + Sync;

    /// Sends one text frame to the remote peer.
    fn send(
        &self,
        text: &str,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Receives the next text frame from the remote peer.
    ///
    /// Returns `Ok(None)` when the connection is cleanly closed.
    fn recv(
        &self,
    ) -> impl Future<Output = Result<Option<String>, Self::Error>> + Send;

    /// Closes the connection with a status code and a reason.
    ///
    /// Implementations trim the reason with [`trim_reason`].
    fn close(
        &self,
        code: CloseCode,
        reason: &str,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Returns `false` once the connection has been closed by either side
    /// or has failed.
    fn is_open(&self) -> bool;

    /// Returns the unique identifier for this connection.
    fn id(&self) -> ConnectionId;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_id_new_and_into_inner() {
        let id = ConnectionId::new(42);
        assert_eq!(id.into_inner(), 42);
    }

    #[test]
    fn test_connection_id_display() {
        let id = ConnectionId::new(7);
        assert_eq!(id.to_string(), "conn-7");
    }

    #[test]
    fn test_connection_id_hash_works_as_map_key() {
        use std::collections::HashMap;
        let mut map = HashMap::new();
        map.insert(ConnectionId::new(1), "alice");
        map.insert(ConnectionId::new(2), "bob");
        assert_eq!(map[&ConnectionId::new(1)], "alice");
    }

    #[test]
    fn test_close_codes() {
        assert_eq!(CloseCode::Normal.as_u16(), 1000);
        assert_eq!(CloseCode::UnexpectedCondition.as_u16(), 1011);
    }

    #[test]
    fn test_trim_reason_keeps_short_reasons() {
        assert_eq!(trim_reason("broken pipe"), "broken pipe");
    }

    #[test]
    fn test_trim_reason_caps_length() {
        let long = "x".repeat(300);
        assert_eq!(trim_reason(&long).len(), MAX_CLOSE_REASON_LEN);
    }

    #[test]
    fn test_trim_reason_respects_char_boundaries() {
        // 'é' is two bytes; 62 of them straddle the 123-byte cap.
        let long = "é".repeat(62);
        let trimmed = trim_reason(&long);
        assert_eq!(trimmed.len(), 122);
        assert!(trimmed.chars().all(|c| c == 'é'));
    }
}
