//! Live connections and the identity each one has announced.

use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use gameroom_protocol::PlayerId;
use gameroom_transport::{Connection, ConnectionId};

/// The identity a connection announced in its `hello`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    /// Stable player id.
    pub user_id: PlayerId,
    /// Display name.
    pub username: String,
}

/// Concurrent registry of the connections this room broadcasts to.
///
/// The transport owns each connection; the registry only holds an `Arc`
/// to it while it is registered. Per-connection attributes live in a side
/// map keyed by [`ConnectionId`] instead of on the connection object.
pub struct SessionRegistry<C: Connection> {
    connections: DashMap<ConnectionId, Arc<C>>,
    identities: DashMap<ConnectionId, Player>,
}

impl<C: Connection> SessionRegistry<C> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
            identities: DashMap::new(),
        }
    }

    /// Registers a connection. Returns `false` if it was already
    /// registered.
    pub fn add(&self, conn: Arc<C>) -> bool {
        let conn_id = conn.id();
        let added = self.connections.insert(conn_id, conn).is_none();
        if added {
            tracing::debug!(%conn_id, "session registered");
        }
        added
    }

    /// Unregisters a connection and forgets its identity.
    ///
    /// Returns the connection if it was registered.
    pub fn remove(&self, conn_id: ConnectionId) -> Option<Arc<C>> {
        self.identities.remove(&conn_id);
        let removed = self.connections.remove(&conn_id).map(|(_, c)| c);
        if removed.is_some() {
            tracing::debug!(%conn_id, "session unregistered");
        }
        removed
    }

    /// Returns `true` if the connection is registered.
    pub fn contains(&self, conn_id: ConnectionId) -> bool {
        self.connections.contains_key(&conn_id)
    }

    /// Copies out the registered connections for a broadcast.
    ///
    /// No shard lock is held once this returns, so the caller can await
    /// writes freely. Connections added or removed while the broadcast is
    /// in flight may or may not be included.
    pub fn snapshot_for_broadcast(&self) -> Vec<Arc<C>> {
        self.connections
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect()
    }

    /// Attaches an identity to a connection.
    ///
    /// Returns `false`, leaving the existing identity in place, if the
    /// connection already has one. The check and the insert are one atomic
    /// step, so two racing `hello`s on a connection cannot both attach.
    pub fn attach(&self, conn_id: ConnectionId, player: Player) -> bool {
        match self.identities.entry(conn_id) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(player);
                true
            }
        }
    }

    /// Returns the identity attached to a connection, if any.
    pub fn identity(&self, conn_id: ConnectionId) -> Option<Player> {
        self.identities.get(&conn_id).map(|p| p.value().clone())
    }

    /// Number of registered connections.
    pub fn len(&self) -> usize {
        self.connections.len()
    }

    /// Returns `true` if no connection is registered.
    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}

impl<C: Connection> Default for SessionRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}
