//! Frames sent by the room to clients.
//!
//! ```text
//! ack,{"version":[1]}
//! player,<recipient>,{"type":"location"|"event"|"chat",...}
//! playerLocation,<player>,{"type":"exit",...}
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{
    Codec, PROTOCOL_VERSIONS, PlayerId, ProtocolError, Recipient,
    split_routing,
};

/// The verbs the room opens outbound frames with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutboundVerb {
    /// Sent once on connect, advertising protocol versions.
    Ack,
    /// Carries a location, event, or chat payload.
    Player,
    /// Carries an exit intent.
    PlayerLocation,
}

impl OutboundVerb {
    /// Returns the wire spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ack => "ack",
            Self::Player => "player",
            Self::PlayerLocation => "playerLocation",
        }
    }
}

impl fmt::Display for OutboundVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutboundVerb {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ack" => Ok(Self::Ack),
            "player" => Ok(Self::Player),
            "playerLocation" => Ok(Self::PlayerLocation),
            other => Err(ProtocolError::UnknownVerb(other.to_owned())),
        }
    }
}

/// Payload of the `ack` frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AckPayload {
    /// Supported protocol versions.
    pub version: Vec<u32>,
}

impl Default for AckPayload {
    fn default() -> Self {
        Self {
            version: PROTOCOL_VERSIONS.to_vec(),
        }
    }
}

/// Room-originated payloads, discriminated by `type`.
///
/// `event`, `chat`, and `exit` carry a bookmark drawn from the room's
/// sequencer. `location` does not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RoomPayload {
    /// The room's name and description.
    Location {
        name: String,
        #[serde(
            rename = "fullName",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        full_name: Option<String>,
        description: String,
    },

    /// A request that the player be moved through a door.
    Exit {
        #[serde(rename = "exitId")]
        exit_id: String,
        bookmark: u64,
        content: String,
    },

    /// A narrated event. `content` maps `*` to the text everyone sees and a
    /// player id to the text only that player sees.
    Event {
        content: BTreeMap<String, String>,
        bookmark: u64,
    },

    /// A line of chat.
    Chat {
        username: String,
        content: String,
        bookmark: u64,
    },
}

impl RoomPayload {
    /// Builds an event payload from the room-wide and the player-private
    /// texts. Either may be absent.
    pub fn event(
        for_room: Option<&str>,
        for_player: Option<(&PlayerId, &str)>,
        bookmark: u64,
    ) -> Self {
        let mut content = BTreeMap::new();
        if let Some(text) = for_room {
            content.insert(crate::ROOM_WIDE.to_owned(), text.to_owned());
        }
        if let Some((player, text)) = for_player {
            content.insert(player.to_string(), text.to_owned());
        }
        Self::Event { content, bookmark }
    }

    /// Returns the bookmark this payload carries, if its type has one.
    pub fn bookmark(&self) -> Option<u64> {
        match self {
            Self::Location { .. } => None,
            Self::Exit { bookmark, .. }
            | Self::Event { bookmark, .. }
            | Self::Chat { bookmark, .. } => Some(*bookmark),
        }
    }
}

/// The JSON object that closes an outbound frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FramePayload {
    /// The connect-time acknowledgement.
    Ack(AckPayload),
    /// Anything the room says about itself or its players.
    Room(RoomPayload),
}

/// One outbound frame: verb, optional recipient, payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// The frame's verb.
    pub verb: OutboundVerb,
    /// Who the frame is addressed to. `ack` has no recipient field.
    pub recipient: Option<Recipient>,
    /// The JSON payload.
    pub payload: FramePayload,
}

impl Frame {
    /// The acknowledgement sent when a connection opens.
    pub fn ack() -> Self {
        Self {
            verb: OutboundVerb::Ack,
            recipient: None,
            payload: FramePayload::Ack(AckPayload::default()),
        }
    }

    /// A `player` frame addressed to `recipient`.
    pub fn player(recipient: Recipient, payload: RoomPayload) -> Self {
        Self {
            verb: OutboundVerb::Player,
            recipient: Some(recipient),
            payload: FramePayload::Room(payload),
        }
    }

    /// A `playerLocation` frame carrying an exit intent for `player`.
    pub fn player_location(player: PlayerId, payload: RoomPayload) -> Self {
        Self {
            verb: OutboundVerb::PlayerLocation,
            recipient: Some(Recipient::Player(player)),
            payload: FramePayload::Room(payload),
        }
    }

    /// Returns the room payload, or `None` for `ack`.
    pub fn room_payload(&self) -> Option<&RoomPayload> {
        match &self.payload {
            FramePayload::Room(p) => Some(p),
            FramePayload::Ack(_) => None,
        }
    }

    /// Returns the bookmark carried by the payload, if any.
    pub fn bookmark(&self) -> Option<u64> {
        self.room_payload().and_then(RoomPayload::bookmark)
    }

    /// Renders the frame as wire text.
    ///
    /// # Errors
    /// Returns [`ProtocolError::Encode`] if the payload can't be encoded.
    pub fn encode(&self, codec: &impl Codec) -> Result<String, ProtocolError> {
        let json = codec.encode(&self.payload)?;
        Ok(match &self.recipient {
            Some(recipient) => format!("{},{},{}", self.verb, recipient, json),
            None => format!("{},{}", self.verb, json),
        })
    }

    /// Parses wire text produced by [`encode`](Self::encode). Used by
    /// clients and test harnesses.
    ///
    /// # Errors
    /// Returns [`ProtocolError::InvalidMessage`] when the field count does
    /// not fit the verb, or a decode error for a bad payload.
    pub fn decode(codec: &impl Codec, text: &str) -> Result<Self, ProtocolError> {
        let fields = split_routing(text);
        let verb: OutboundVerb =
            fields.first().copied().unwrap_or_default().parse()?;

        let (recipient, payload) = match (verb, fields.as_slice()) {
            (OutboundVerb::Ack, [_, payload]) => (None, *payload),
            (OutboundVerb::Player | OutboundVerb::PlayerLocation, [_, to, payload]) => {
                (Some(to.parse()?), *payload)
            }
            _ => {
                return Err(ProtocolError::InvalidMessage(format!(
                    "{verb} frame with {} fields",
                    fields.len()
                )));
            }
        };

        Ok(Self {
            verb,
            recipient,
            payload: codec.decode(payload)?,
        })
    }
}
