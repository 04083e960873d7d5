//! Codec trait and the JSON implementation.
//!
//! Routing fields are plain text, but payloads go through a [`Codec`].
//! The room only ever speaks JSON today; the trait keeps the encoding
//! swappable in one place.

use serde::{Serialize, de::DeserializeOwned};

use crate::ProtocolError;

/// Encodes payloads to text and decodes them back.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into text.
    ///
    /// # Errors
    /// Returns `ProtocolError::Encode` if serialization fails.
    fn encode<T: Serialize>(&self, value: &T) -> Result<String, ProtocolError>;

    /// Deserializes text back into a value.
    ///
    /// # Errors
    /// Returns `ProtocolError::Decode` if the text is malformed,
    /// incomplete, or doesn't match the expected type.
    fn decode<T: DeserializeOwned>(
        &self,
        text: &str,
    ) -> Result<T, ProtocolError>;
}

/// A [`Codec`] backed by `serde_json`.
///
/// ```rust
/// use gameroom_protocol::{Codec, JsonCodec, PlayerId, PlayerRef};
///
/// let codec = JsonCodec;
/// let hello: PlayerRef =
///     codec.decode(r#"{"username":"A","userId":"u1"}"#).unwrap();
/// assert_eq!(hello.user_id, PlayerId::from("u1"));
///
/// let text = codec.encode(&hello).unwrap();
/// assert_eq!(text, r#"{"username":"A","userId":"u1"}"#);
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<String, ProtocolError> {
        serde_json::to_string(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(
        &self,
        text: &str,
    ) -> Result<T, ProtocolError> {
        serde_json::from_str(text).map_err(ProtocolError::Decode)
    }
}
