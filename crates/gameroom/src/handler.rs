//! Per-connection handler: greet, then feed every frame to the room.
//!
//! Each accepted connection gets its own Tokio task running this handler.
//! The flow is:
//!   1. Send `ack` with the supported protocol versions
//!   2. Loop: receive text frames and hand them to [`Room::handle_message`]
//!   3. On close or error, unregister the connection

use std::sync::Arc;

use gameroom_room::Room;
use gameroom_transport::{Connection, ConnectionId, WebSocketConnection};

/// Drop guard that unregisters a connection when the handler exits.
///
/// Runs even if the handler panics. Unregistering is synchronous, so no
/// task needs to be spawned.
struct RegistrationGuard {
    conn_id: ConnectionId,
    room: Arc<Room<WebSocketConnection>>,
}

impl Drop for RegistrationGuard {
    fn drop(&mut self) {
        self.room.on_close(self.conn_id);
    }
}

/// Handles a single connection from accept to close.
pub(crate) async fn handle_connection(
    conn: WebSocketConnection,
    room: Arc<Room<WebSocketConnection>>,
) {
    let conn = Arc::new(conn);
    let conn_id = conn.id();
    let _guard = RegistrationGuard {
        conn_id,
        room: Arc::clone(&room),
    };

    if !room.on_open(&conn).await {
        tracing::debug!(%conn_id, "could not greet connection");
        return;
    }

    loop {
        let text = match conn.recv().await {
            Ok(Some(text)) => text,
            Ok(None) => {
                tracing::info!(%conn_id, "connection closed cleanly");
                break;
            }
            Err(e) => {
                tracing::debug!(%conn_id, error = %e, "recv error");
                break;
            }
        };

        // A bad frame only costs that frame.
        if let Err(e) = room.handle_message(&conn, &text).await {
            tracing::debug!(%conn_id, error = %e, "dropping malformed frame");
        }

        if !conn.is_open() {
            tracing::debug!(%conn_id, "connection closed during delivery");
            break;
        }
    }

    // _guard drops here and unregisters the connection.
}
