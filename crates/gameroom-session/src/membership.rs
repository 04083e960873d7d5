//! The set of players present in the room.

use dashmap::DashSet;
use gameroom_protocol::PlayerId;

/// Concurrent set of present player ids.
///
/// Every operation is a single atomic step on a sharded set, so
/// concurrent joins of the same id cannot both report "newly joined"
/// and no update is lost.
#[derive(Debug, Default)]
pub struct RoomMembership {
    players: DashSet<PlayerId>,
}

impl RoomMembership {
    /// Creates an empty membership set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `player`. Returns `true` if they were not already present.
    pub fn join(&self, player: PlayerId) -> bool {
        let joined = self.players.insert(player.clone());
        tracing::debug!(%player, joined, "membership join");
        joined
    }

    /// Removes `player` if present. Removing an absent player is a no-op.
    ///
    /// Returns whether anything was removed.
    pub fn leave(&self, player: &PlayerId) -> bool {
        let left = self.players.remove(player).is_some();
        tracing::debug!(%player, left, "membership leave");
        left
    }

    /// Returns `true` if `player` is present.
    pub fn contains(&self, player: &PlayerId) -> bool {
        self.players.contains(player)
    }

    /// Number of present players.
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Returns `true` if nobody is present.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}
