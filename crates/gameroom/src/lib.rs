//! # Gameroom
//!
//! One room of a multiplayer text adventure, served over WebSocket.
//!
//! Players say `hello` to enter, send `command` frames to talk, look
//! around, examine things, or ask to leave through a door, and say
//! `goodbye` to go. Everything they say to the room reaches everyone
//! connected, tagged with a bookmark that orders it room-wide.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gameroom::prelude::*;
//!
//! # async fn start() -> Result<(), GameroomError> {
//! let server = RoomServer::builder()
//!     .bind("0.0.0.0:9080")
//!     .build(&NoSiteLookup)
//!     .await?;
//! server.run().await
//! # }
//! ```

mod error;
mod handler;
mod server;

pub use error::GameroomError;
pub use server::{DEFAULT_BIND_ADDR, RoomServer, RoomServerBuilder};

pub use gameroom_protocol as protocol;
pub use gameroom_room as room;
pub use gameroom_session as session;
pub use gameroom_transport as transport;

/// Everything needed to configure and run a room.
pub mod prelude {
    pub use crate::{
        DEFAULT_BIND_ADDR, GameroomError, RoomServer, RoomServerBuilder,
    };
    pub use gameroom_protocol::{
        Frame, FramePayload, JsonCodec, OutboundVerb, PlayerId, Recipient,
        RoomPayload,
    };
    pub use gameroom_room::{
        NoSiteLookup, ObjectTable, RoomInfo, RoomObject, SiteInfo,
        SiteLookup, StaticSiteLookup,
    };
}
