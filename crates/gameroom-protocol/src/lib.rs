//! Wire protocol for the game room.
//!
//! Every frame on the wire is plain text: comma-separated routing fields
//! followed by one JSON object.
//!
//! ```text
//! hello,ignored,{"username":"A","userId":"u1"}      (client → room)
//! player,*,{"type":"chat","username":"A",...}        (room → clients)
//! ```
//!
//! - **Router** ([`split_routing`]) — cuts a raw frame into its routing
//!   fields and the JSON payload.
//! - **Inbound** ([`InboundFrame`], [`InboundVerb`], payload structs) —
//!   what clients send.
//! - **Outbound** ([`Frame`], [`RoomPayload`]) — what the room sends.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]) — how payloads become
//!   text and back.
//! - **Errors** ([`ProtocolError`]).
//!
//! The protocol layer knows nothing about connections or membership.

mod codec;
mod error;
mod inbound;
mod lenient;
mod outbound;
mod router;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use inbound::{ChatCommand, InboundFrame, InboundVerb, PlayerRef};
pub use outbound::{AckPayload, Frame, FramePayload, OutboundVerb, RoomPayload};
pub use router::split_routing;
pub use types::{PROTOCOL_VERSIONS, PlayerId, ROOM_WIDE, Recipient};
