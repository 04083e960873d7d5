//! The room engine: routes each inbound frame, performs its one state
//! change, and delivers what the interpreter says.
//!
//! A `Room` is shared by every connection handler behind an `Arc`. There
//! is no room-wide lock; membership, sessions, and the bookmark counter
//! each keep themselves consistent, and handlers for different
//! connections run in parallel.

use std::sync::Arc;

use gameroom_protocol::{
    ChatCommand, Frame, InboundFrame, InboundVerb, JsonCodec,
    PlayerRef, ProtocolError,
};
use gameroom_session::{Player, RoomMembership, SessionRegistry};
use gameroom_transport::{Connection, ConnectionId};

use crate::fanout::{broadcast_all, send_to};
use crate::{
    BookmarkSequencer, CommandInterpreter, Delivery, ObjectTable, Outbound,
    RoomError, RoomInfo,
};

/// One room instance.
pub struct Room<C: Connection> {
    interpreter: CommandInterpreter,
    membership: RoomMembership,
    sessions: SessionRegistry<C>,
    codec: JsonCodec,
}

impl<C: Connection> Room<C> {
    /// Creates a room with an empty membership and a fresh bookmark
    /// sequence.
    pub fn new(info: RoomInfo, objects: ObjectTable) -> Self {
        Self {
            interpreter: CommandInterpreter::new(
                info,
                objects,
                BookmarkSequencer::new(),
            ),
            membership: RoomMembership::new(),
            sessions: SessionRegistry::new(),
            codec: JsonCodec,
        }
    }

    pub fn info(&self) -> &RoomInfo {
        self.interpreter.info()
    }

    pub fn membership(&self) -> &RoomMembership {
        &self.membership
    }

    pub fn sessions(&self) -> &SessionRegistry<C> {
        &self.sessions
    }

    pub fn bookmarks(&self) -> &BookmarkSequencer {
        self.interpreter.bookmarks()
    }

    /// Greets a freshly opened connection with `ack`.
    ///
    /// The connection is not registered until it says `hello`.
    pub async fn on_open(&self, conn: &C) -> bool {
        tracing::info!(conn_id = %conn.id(), "new connection to the room");
        match Frame::ack().encode(&self.codec) {
            Ok(text) => send_to(conn, &text).await,
            Err(e) => {
                tracing::error!(error = %e, "failed to encode ack");
                false
            }
        }
    }

    /// Forgets a connection the transport has closed.
    ///
    /// Membership is left alone; only `goodbye` takes a player out of the
    /// room.
    pub fn on_close(&self, conn_id: ConnectionId) {
        if self.sessions.remove(conn_id).is_some() {
            tracing::info!(%conn_id, "connection to the room closed");
        }
    }

    /// Handles one inbound frame from `conn`.
    ///
    /// Unknown verbs are ignored. A payload that fails to decode is
    /// returned as an error for the caller to log; nothing is sent and the
    /// connection stays up.
    pub async fn handle_message(
        &self,
        conn: &Arc<C>,
        raw: &str,
    ) -> Result<(), RoomError> {
        let frame = match InboundFrame::parse(raw) {
            Ok(frame) => frame,
            Err(ProtocolError::UnknownVerb(verb)) => {
                tracing::debug!(conn_id = %conn.id(), %verb, "ignoring unknown verb");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        tracing::debug!(conn_id = %conn.id(), verb = frame.verb.as_str(), "frame received");
        match frame.verb {
            InboundVerb::Hello => self.hello(conn, &frame).await,
            InboundVerb::Goodbye => self.goodbye(conn, &frame).await,
            InboundVerb::Command => self.command(conn, &frame).await,
        }
    }

    async fn hello(
        &self,
        conn: &Arc<C>,
        frame: &InboundFrame<'_>,
    ) -> Result<(), RoomError> {
        let conn_id = conn.id();
        if self.sessions.identity(conn_id).is_some() {
            tracing::debug!(%conn_id, "duplicate hello on connection ignored");
            return Ok(());
        }

        let hello: PlayerRef = frame.decode_payload(&self.codec)?;
        let player = Player {
            user_id: hello.user_id.clone(),
            username: hello.username.clone(),
        };
        if !self.sessions.attach(conn_id, player) {
            tracing::debug!(%conn_id, "concurrent hello on connection ignored");
            return Ok(());
        }

        self.sessions.add(Arc::clone(conn));
        let newly_joined = self.membership.join(hello.user_id.clone());
        if newly_joined {
            tracing::info!(%conn_id, player_id = %hello.user_id, username = %hello.username, "player entered the room");
        } else {
            tracing::debug!(%conn_id, player_id = %hello.user_id, "player already present");
        }

        let out = self.interpreter.hello(&hello, newly_joined);
        self.deliver(conn, out).await;
        Ok(())
    }

    async fn goodbye(
        &self,
        conn: &Arc<C>,
        frame: &InboundFrame<'_>,
    ) -> Result<(), RoomError> {
        let conn_id = conn.id();
        self.sessions.remove(conn_id);

        let bye: PlayerRef = frame.decode_payload(&self.codec)?;
        self.membership.leave(&bye.user_id);
        tracing::info!(%conn_id, player_id = %bye.user_id, username = %bye.username, "player left the room");

        let out = self.interpreter.goodbye(&bye);
        self.deliver(conn, out).await;
        Ok(())
    }

    async fn command(
        &self,
        conn: &Arc<C>,
        frame: &InboundFrame<'_>,
    ) -> Result<(), RoomError> {
        let cmd: ChatCommand = frame.decode_payload(&self.codec)?;
        tracing::debug!(conn_id = %conn.id(), player_id = %cmd.user_id, content = %cmd.content, "command received");

        let out = self.interpreter.command(&cmd);
        self.deliver(conn, out).await;
        Ok(())
    }

    /// Sends each frame in order. Encoding or delivery failures are logged
    /// and never stop the frames after them.
    async fn deliver(&self, conn: &C, out: Vec<Outbound>) {
        for Outbound { delivery, frame } in out {
            let text = match frame.encode(&self.codec) {
                Ok(text) => text,
                Err(e) => {
                    tracing::error!(error = %e, "failed to encode frame");
                    continue;
                }
            };
            match delivery {
                Delivery::Direct => {
                    send_to(conn, &text).await;
                }
                Delivery::Broadcast => {
                    broadcast_all(&self.sessions, &text).await;
                }
            }
        }
    }
}
