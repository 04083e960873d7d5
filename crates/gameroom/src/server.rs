//! `RoomServer` builder and server loop.
//!
//! This is the entry point for running a room. It ties together the
//! layers: transport, protocol, session, room.

use std::net::SocketAddr;
use std::sync::Arc;

use gameroom_room::{ObjectTable, Room, RoomInfo, SiteLookup};
use gameroom_transport::{Transport, WebSocketConnection, WebSocketTransport};

use crate::GameroomError;
use crate::handler::handle_connection;

/// Address the server binds to when none is given.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:9080";

/// Builder for configuring and starting a room server.
///
/// # Example
///
/// ```rust,no_run
/// use gameroom::prelude::*;
///
/// # async fn start() -> Result<(), GameroomError> {
/// let lookup = StaticSiteLookup::new()
///     .with_site("kitchen", SiteInfo {
///         name: Some("Kitchen".into()),
///         ..SiteInfo::default()
///     });
/// let server = RoomServer::builder()
///     .bind("0.0.0.0:9080")
///     .site_id("kitchen")
///     .build(&lookup)
///     .await?;
/// server.run().await
/// # }
/// ```
pub struct RoomServerBuilder {
    bind_addr: String,
    site_id: Option<String>,
    objects: ObjectTable,
}

impl RoomServerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            site_id: None,
            objects: ObjectTable::default(),
        }
    }

    /// Sets the address to bind the server to.
    pub fn bind(mut self, addr: &str) -> Self {
        self.bind_addr = addr.to_string();
        self
    }

    /// Sets the site this room stands on in the wider map.
    pub fn site_id(mut self, site_id: impl Into<String>) -> Self {
        self.site_id = Some(site_id.into());
        self
    }

    /// Replaces the objects players can examine.
    pub fn objects(mut self, objects: ObjectTable) -> Self {
        self.objects = objects;
        self
    }

    /// Resolves the room's description through `lookup`, then binds.
    ///
    /// A failed lookup is not an error: the room falls back to its
    /// defaults. Only binding the listener can fail.
    pub async fn build(
        self,
        lookup: &impl SiteLookup,
    ) -> Result<RoomServer, GameroomError> {
        let info = RoomInfo::initialize(self.site_id.as_deref(), lookup).await;
        let doors: Vec<&str> = info.doors.directions().collect();
        tracing::info!(name = %info.name, ?doors, "room initialized");

        let transport = WebSocketTransport::bind(&self.bind_addr).await?;
        let room = Arc::new(Room::new(info, self.objects));

        Ok(RoomServer { transport, room })
    }
}

impl Default for RoomServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A room accepting WebSocket connections.
///
/// Call [`run()`](Self::run) to start accepting connections.
pub struct RoomServer {
    transport: WebSocketTransport,
    room: Arc<Room<WebSocketConnection>>,
}

impl RoomServer {
    /// Creates a new builder.
    pub fn builder() -> RoomServerBuilder {
        RoomServerBuilder::new()
    }

    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.transport.local_addr()
    }

    /// Returns the room shared by every connection handler.
    pub fn room(&self) -> &Arc<Room<WebSocketConnection>> {
        &self.room
    }

    /// Runs the server accept loop.
    ///
    /// Spawns a handler task for each accepted connection. A failed accept
    /// is logged and the loop carries on. Runs until the process is
    /// terminated.
    pub async fn run(mut self) -> Result<(), GameroomError> {
        tracing::info!(room = %self.room.info().name, "room server running");

        loop {
            match self.transport.accept().await {
                Ok(conn) => {
                    let room = Arc::clone(&self.room);
                    tokio::spawn(handle_connection(conn, room));
                }
                Err(e) => {
                    tracing::error!(error = %e, "accept failed");
                }
            }
        }
    }
}
