//! Error types for the protocol layer.

/// Errors that can occur while routing, decoding, or encoding frames.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a payload into JSON text).
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed. Malformed JSON, missing required fields,
    /// or a payload segment that is not there at all.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// The first routing field is not a verb this room understands.
    #[error("unknown verb: {0}")]
    UnknownVerb(String),

    /// The frame parsed but breaks a protocol rule, such as an outbound
    /// frame with the wrong number of routing fields.
    #[error("invalid message: {0}")]
    InvalidMessage(String),
}
