//! Identity and addressing types shared by inbound and outbound frames.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ProtocolError;

/// Recipient field value that addresses everyone in the room.
pub const ROOM_WIDE: &str = "*";

/// Protocol versions this room speaks, advertised in the `ack` frame.
pub const PROTOCOL_VERSIONS: &[u32] = &[1];

/// A player's identifier, as issued by the wider game.
///
/// The room treats it as an opaque string: it only compares ids and
/// echoes them back as recipients and event keys.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for PlayerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Who an outbound frame is addressed to.
///
/// This is the second routing field of an outbound frame: either one
/// player's id or `*` for the whole room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recipient {
    /// Everyone in the room.
    All,

    /// One specific player.
    Player(PlayerId),
}

impl fmt::Display for Recipient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ROOM_WIDE),
            Self::Player(id) => write!(f, "{id}"),
        }
    }
}

impl FromStr for Recipient {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Err(ProtocolError::InvalidMessage("empty recipient".into())),
            ROOM_WIDE => Ok(Self::All),
            id => Ok(Self::Player(PlayerId::from(id))),
        }
    }
}
