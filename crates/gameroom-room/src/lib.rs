//! The room itself: what it is, what it says, and who hears it.
//!
//! # Key types
//!
//! - [`Room`] — the engine every connection handler shares
//! - [`RoomInfo`] — name, description, and doors, resolved once at startup
//! - [`SiteLookup`] — the map service seam ([`NoSiteLookup`],
//!   [`StaticSiteLookup`])
//! - [`ObjectTable`] — things a player can `/look` at
//! - [`BookmarkSequencer`] — the room-wide event order
//! - [`CommandInterpreter`] — turns messages into outbound frames
//! - [`fanout`] — direct and room-wide delivery

mod error;
pub mod fanout;
mod info;
mod interpreter;
mod lookup;
mod objects;
mod room;
mod sequencer;

pub use error::RoomError;
pub use info::{
    DEFAULT_DESCRIPTION, DEFAULT_FULL_NAME, DEFAULT_NAME, Doors, RoomInfo,
    SiteInfo,
};
pub use interpreter::{
    Command, CommandInterpreter, Delivery, EXIT_CONTENT, NEED_DIRECTION,
    Outbound, UNRECOGNISED_COMMAND, YOU_ENTERED,
};
pub use lookup::{NoSiteLookup, SiteLookup, StaticSiteLookup};
pub use objects::{ObjectTable, RoomObject};
pub use room::Room;
pub use sequencer::BookmarkSequencer;
