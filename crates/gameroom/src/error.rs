//! Unified error type for the gameroom server.

use gameroom_protocol::ProtocolError;
use gameroom_room::RoomError;
use gameroom_transport::TransportError;

/// Top-level error that wraps all crate-specific errors.
///
/// The `#[from]` attribute on each variant lets `?` convert sub-crate
/// errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum GameroomError {
    /// A transport-level error (bind, accept, send, recv).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A frame could not be encoded or decoded.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A room-level error (malformed payload, site lookup).
    #[error(transparent)]
    Room(#[from] RoomError),
}
