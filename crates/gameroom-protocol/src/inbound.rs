//! Frames sent by clients to the room.

use std::str::FromStr;

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{Codec, PlayerId, ProtocolError, split_routing};

/// The closed set of verbs a client may open a frame with.
///
/// The long mediator spellings (`roomHello`, `room`, `roomGoodbye`)
/// are accepted alongside the short forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InboundVerb {
    /// A player is entering the room.
    Hello,
    /// A player is leaving the room.
    Goodbye,
    /// Chat text or a slash command.
    Command,
}

impl InboundVerb {
    /// Returns the canonical wire spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hello => "hello",
            Self::Goodbye => "goodbye",
            Self::Command => "command",
        }
    }
}

impl FromStr for InboundVerb {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hello" | "roomHello" => Ok(Self::Hello),
            "goodbye" | "roomGoodbye" => Ok(Self::Goodbye),
            "command" | "room" => Ok(Self::Command),
            other => Err(ProtocolError::UnknownVerb(other.to_owned())),
        }
    }
}

/// A routed inbound frame whose payload has not been decoded yet.
///
/// Decoding is deferred so a handler can act on the verb (and on
/// per-connection state) before paying for, or failing on, the JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundFrame<'a> {
    /// The frame's verb.
    pub verb: InboundVerb,
    /// Routing fields between the verb and the payload, usually a
    /// recipient the room ignores.
    pub routing: Vec<&'a str>,
    /// The raw payload segment. Empty when the frame has no payload.
    pub payload: &'a str,
}

impl<'a> InboundFrame<'a> {
    /// Routes a raw frame and identifies its verb.
    ///
    /// # Errors
    /// Returns [`ProtocolError::UnknownVerb`] if the first field is not a
    /// recognised verb. Never inspects the payload.
    pub fn parse(raw: &'a str) -> Result<Self, ProtocolError> {
        let fields = split_routing(raw);
        let verb: InboundVerb =
            fields.first().copied().unwrap_or_default().parse()?;

        let (payload, routing) = match fields.split_last() {
            Some((last, rest)) if !rest.is_empty() => {
                (*last, rest[1..].to_vec())
            }
            _ => ("", Vec::new()),
        };

        Ok(Self {
            verb,
            routing,
            payload,
        })
    }

    /// Decodes the payload segment into `T`.
    ///
    /// # Errors
    /// Returns [`ProtocolError::Decode`] for malformed or missing JSON.
    pub fn decode_payload<T: DeserializeOwned>(
        &self,
        codec: &impl Codec,
    ) -> Result<T, ProtocolError> {
        codec.decode(self.payload)
    }
}

/// Payload of `hello` and `goodbye`: who is arriving or leaving.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRef {
    /// Display name.
    #[serde(deserialize_with = "crate::lenient::string")]
    pub username: String,
    /// Stable player id.
    #[serde(rename = "userId", deserialize_with = "crate::lenient::player_id")]
    pub user_id: PlayerId,
}

/// Payload of `command`: a line of chat or a slash command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatCommand {
    /// Sender's player id.
    #[serde(rename = "userId", deserialize_with = "crate::lenient::player_id")]
    pub user_id: PlayerId,
    /// Sender's display name.
    #[serde(deserialize_with = "crate::lenient::string")]
    pub username: String,
    /// What the player typed, casing intact.
    #[serde(deserialize_with = "crate::lenient::string")]
    pub content: String,
}
