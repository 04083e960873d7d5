//! Who is here, and how to reach them.
//!
//! Two independent concurrent structures:
//!
//! 1. **Membership** ([`RoomMembership`]) — the set of player ids present
//!    in the room. Changed by `hello` and `goodbye`.
//! 2. **Sessions** ([`SessionRegistry`]) — the live connections the room
//!    broadcasts to, plus the identity each connection has announced.
//!
//! Neither locks the other. A connection can be registered without its
//! player being a member (and the reverse) for a moment during a join or
//! after a transport failure; callers tolerate that.
//!
//! ```text
//! Room engine (above)  ← joins/leaves players, broadcasts to sessions
//!     ↕
//! Session layer (this crate)
//!     ↕
//! Protocol + transport (below)  ← PlayerId, Connection, ConnectionId
//! ```

mod membership;
mod registry;

pub use membership::RoomMembership;
pub use registry::{Player, SessionRegistry};
