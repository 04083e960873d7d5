//! Error types for the room layer.

use std::path::PathBuf;

use gameroom_protocol::ProtocolError;

/// Errors that can occur in the room layer.
///
/// None of these is fatal to the process. Protocol errors are confined to
/// the one message that caused them, and lookup errors fall back to the
/// room's default description.
#[derive(Debug, thiserror::Error)]
pub enum RoomError {
    /// An inbound frame could not be decoded.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The site lookup service could not answer.
    #[error("site lookup failed: {0}")]
    Lookup(String),

    /// A site document could not be read from disk.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A site document was not valid JSON of the expected shape.
    #[error("invalid site document: {0}")]
    SiteDocument(#[source] serde_json::Error),
}
