//! Integration tests for the room engine, driven through mock connections.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use gameroom_protocol::{
    Frame, JsonCodec, OutboundVerb, PlayerId, Recipient, RoomPayload,
};
use gameroom_room::{ObjectTable, Room, RoomError, RoomInfo, SiteInfo};
use gameroom_transport::{CloseCode, Connection, ConnectionId, TransportError};

// =========================================================================
// Mock connection
// =========================================================================

/// Records every frame written to it. Can be told to fail writes.
struct MockConn {
    id: ConnectionId,
    open: AtomicBool,
    fail_writes: AtomicBool,
    sent: Mutex<Vec<String>>,
    closed_with: Mutex<Option<(CloseCode, String)>>,
}

impl MockConn {
    fn new(id: u64) -> Arc<Self> {
        Arc::new(Self {
            id: ConnectionId::new(id),
            open: AtomicBool::new(true),
            fail_writes: AtomicBool::new(false),
            sent: Mutex::new(Vec::new()),
            closed_with: Mutex::new(None),
        })
    }

    /// Decodes and drains everything sent so far.
    fn take_frames(&self) -> Vec<Frame> {
        self.sent
            .lock()
            .unwrap()
            .drain(..)
            .map(|text| Frame::decode(&JsonCodec, &text).expect("room sent a bad frame"))
            .collect()
    }
}

impl Connection for MockConn {
    type Error = TransportError;

    async fn send(&self, text: &str) -> Result<(), TransportError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(TransportError::SendFailed(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "x".repeat(400),
            )));
        }
        self.sent.lock().unwrap().push(text.to_owned());
        Ok(())
    }

    async fn recv(&self) -> Result<Option<String>, TransportError> {
        Ok(None)
    }

    async fn close(
        &self,
        code: CloseCode,
        reason: &str,
    ) -> Result<(), TransportError> {
        self.open.store(false, Ordering::SeqCst);
        *self.closed_with.lock().unwrap() = Some((code, reason.to_owned()));
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }

    fn id(&self) -> ConnectionId {
        self.id
    }
}

// =========================================================================
// Helpers
// =========================================================================

fn room() -> Room<MockConn> {
    let info = RoomInfo::from_site(Some(SiteInfo {
        name: Some("Kitchen".into()),
        full_name: Some("The Jam Kitchen".into()),
        description: Some("Sticky.".into()),
        doors: BTreeMap::from([("south".to_owned(), "S".to_owned())]),
    }));
    Room::new(info, ObjectTable::default())
}

fn hello(user: &str, name: &str) -> String {
    format!(r#"hello,ignored,{{"username":"{name}","userId":"{user}"}}"#)
}

fn goodbye(user: &str, name: &str) -> String {
    format!(r#"goodbye,ignored,{{"username":"{name}","userId":"{user}"}}"#)
}

fn command(user: &str, name: &str, content: &str) -> String {
    format!(
        r#"command,ignored,{{"userId":"{user}","username":"{name}","content":"{content}"}}"#
    )
}

fn event_content(frame: &Frame) -> BTreeMap<String, String> {
    match frame.room_payload() {
        Some(RoomPayload::Event { content, .. }) => content.clone(),
        other => panic!("expected event, got {other:?}"),
    }
}

fn is_location(frame: &Frame) -> bool {
    matches!(frame.room_payload(), Some(RoomPayload::Location { .. }))
}

// =========================================================================
// Connect
// =========================================================================

#[tokio::test]
async fn test_open_sends_ack_without_registering() {
    let room = room();
    let c1 = MockConn::new(1);

    assert!(room.on_open(&c1).await);

    assert_eq!(c1.take_frames(), vec![Frame::ack()]);
    assert!(room.sessions().is_empty());
}

// =========================================================================
// End-to-end scenarios
// =========================================================================

#[tokio::test]
async fn test_hello_broadcasts_arrival_and_replies_location() {
    let room = room();
    let c1 = MockConn::new(1);

    room.handle_message(&c1, &hello("u1", "A")).await.unwrap();

    let frames = c1.take_frames();
    assert_eq!(frames.len(), 2);

    assert_eq!(frames[0].verb, OutboundVerb::Player);
    assert_eq!(frames[0].recipient, Some(Recipient::All));
    let content = event_content(&frames[0]);
    assert_eq!(content["*"], "Player A has entered the room");
    assert_eq!(content["u1"], "You have entered the room");

    assert_eq!(
        frames[1],
        Frame::player(
            Recipient::Player(PlayerId::from("u1")),
            RoomPayload::Location {
                name: "Kitchen".into(),
                full_name: Some("The Jam Kitchen".into()),
                description: "Sticky.".into(),
            }
        )
    );

    assert!(room.membership().contains(&PlayerId::from("u1")));
    assert!(room.sessions().contains(c1.id()));
}

#[tokio::test]
async fn test_chat_reaches_everyone_with_a_later_bookmark() {
    let room = room();
    let c1 = MockConn::new(1);
    let c2 = MockConn::new(2);

    room.handle_message(&c1, &hello("u1", "A")).await.unwrap();
    room.handle_message(&c2, &hello("u2", "B")).await.unwrap();
    let earlier: Vec<u64> = c1
        .take_frames()
        .iter()
        .chain(c2.take_frames().iter())
        .filter_map(Frame::bookmark)
        .collect();

    room.handle_message(&c2, &command("u1", "A", "hello everyone"))
        .await
        .unwrap();

    for conn in [&c1, &c2] {
        let frames = conn.take_frames();
        assert_eq!(frames.len(), 1, "exactly one chat frame");
        match frames[0].room_payload() {
            Some(RoomPayload::Chat {
                username,
                content,
                bookmark,
            }) => {
                assert_eq!(username, "A");
                assert_eq!(content, "hello everyone");
                assert!(earlier.iter().all(|b| bookmark > b));
            }
            other => panic!("expected chat, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn test_go_through_missing_door_replies_only_to_sender() {
    let room = room();
    let c1 = MockConn::new(1);
    let c2 = MockConn::new(2);
    room.handle_message(&c1, &hello("u1", "A")).await.unwrap();
    room.handle_message(&c2, &hello("u2", "B")).await.unwrap();
    c1.take_frames();
    c2.take_frames();

    room.handle_message(&c1, &command("u1", "A", "/go north"))
        .await
        .unwrap();

    let frames = c1.take_frames();
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].verb, OutboundVerb::Player);
    assert_eq!(
        event_content(&frames[0])["u1"],
        "Hmm. There is no north door. Try again?"
    );
    assert!(c2.take_frames().is_empty(), "no broadcast");
}

#[tokio::test]
async fn test_goodbye_removes_player_and_broadcasts_departure() {
    let room = room();
    let c1 = MockConn::new(1);
    let c2 = MockConn::new(2);
    room.handle_message(&c1, &hello("u1", "A")).await.unwrap();
    room.handle_message(&c2, &hello("u2", "B")).await.unwrap();
    c1.take_frames();
    c2.take_frames();

    room.handle_message(&c1, &goodbye("u1", "A")).await.unwrap();

    assert!(!room.sessions().contains(c1.id()));
    assert!(!room.membership().contains(&PlayerId::from("u1")));
    assert!(c1.take_frames().is_empty(), "leaver is already unregistered");

    let frames = c2.take_frames();
    assert_eq!(frames.len(), 1);
    let content = event_content(&frames[0]);
    assert_eq!(content.len(), 1, "no private variant");
    assert_eq!(content["*"], "Player A has left the room");
}

// =========================================================================
// Hello idempotence
// =========================================================================

#[tokio::test]
async fn test_repeated_hello_on_one_connection_broadcasts_once() {
    let room = room();
    let c1 = MockConn::new(1);

    room.handle_message(&c1, &hello("u1", "A")).await.unwrap();
    room.handle_message(&c1, &hello("u1", "A")).await.unwrap();

    let frames = c1.take_frames();
    let arrivals = frames.iter().filter(|f| f.bookmark().is_some()).count();
    let locations = frames.iter().filter(|f| is_location(f)).count();
    assert_eq!(arrivals, 1);
    assert!((1..=2).contains(&locations));
    assert_eq!(room.sessions().len(), 1);
}

#[tokio::test]
async fn test_same_player_on_second_connection_gets_location_only() {
    let room = room();
    let c1 = MockConn::new(1);
    let c2 = MockConn::new(2);
    room.handle_message(&c1, &hello("u1", "A")).await.unwrap();
    c1.take_frames();

    room.handle_message(&c2, &hello("u1", "A")).await.unwrap();

    assert!(c1.take_frames().is_empty(), "no arrival broadcast");
    let frames = c2.take_frames();
    assert_eq!(frames.len(), 1);
    assert!(is_location(&frames[0]));
    assert_eq!(room.sessions().len(), 2);
}

#[tokio::test]
async fn test_goodbye_lets_the_connection_hello_again() {
    let room = room();
    let c1 = MockConn::new(1);

    room.handle_message(&c1, &hello("u1", "A")).await.unwrap();
    room.handle_message(&c1, &goodbye("u1", "A")).await.unwrap();
    c1.take_frames();

    room.handle_message(&c1, &hello("u1", "A")).await.unwrap();

    let frames = c1.take_frames();
    assert_eq!(frames.len(), 2, "arrival broadcast and location again");
}

// =========================================================================
// Commands
// =========================================================================

#[tokio::test]
async fn test_look_is_seen_only_by_the_looker() {
    // The object listing travels as an event, but it is keyed and delivered
    // to the sender alone.
    let room = room();
    let c1 = MockConn::new(1);
    let c2 = MockConn::new(2);
    room.handle_message(&c1, &hello("u1", "A")).await.unwrap();
    room.handle_message(&c2, &hello("u2", "B")).await.unwrap();
    c1.take_frames();
    c2.take_frames();

    room.handle_message(&c1, &command("u1", "A", "/look")).await.unwrap();

    let frames = c1.take_frames();
    assert_eq!(frames.len(), 2);
    assert!(matches!(
        frames[0].room_payload(),
        Some(RoomPayload::Location { full_name: None, .. })
    ));
    assert_eq!(
        event_content(&frames[1])["u1"],
        ObjectTable::default().listing()
    );
    assert!(c2.take_frames().is_empty());
}

#[tokio::test]
async fn test_go_through_door_sends_exit_intent() {
    let room = room();
    let c1 = MockConn::new(1);
    room.handle_message(&c1, &hello("u1", "A")).await.unwrap();
    c1.take_frames();

    room.handle_message(&c1, &command("u1", "A", "/go South"))
        .await
        .unwrap();

    let frames = c1.take_frames();
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].verb, OutboundVerb::PlayerLocation);
    assert!(matches!(
        frames[0].room_payload(),
        Some(RoomPayload::Exit { exit_id, content, .. })
            if exit_id == "S" && content == "Run Away!"
    ));
    assert!(room.membership().contains(&PlayerId::from("u1")), "intent only");
}

// =========================================================================
// Errors
// =========================================================================

#[tokio::test]
async fn test_malformed_payload_is_local_to_the_message() {
    let room = room();
    let c1 = MockConn::new(1);

    let result = room.handle_message(&c1, r#"hello,ignored,{"username":"#).await;

    assert!(matches!(result, Err(RoomError::Protocol(_))));
    assert!(c1.take_frames().is_empty());
    assert!(c1.is_open());

    room.handle_message(&c1, &hello("u1", "A")).await.unwrap();
    assert_eq!(c1.take_frames().len(), 2);
}

#[tokio::test]
async fn test_malformed_goodbye_still_unregisters_connection() {
    let room = room();
    let c1 = MockConn::new(1);
    room.handle_message(&c1, &hello("u1", "A")).await.unwrap();

    let result = room.handle_message(&c1, "goodbye,ignored,{not json").await;

    assert!(result.is_err());
    assert!(!room.sessions().contains(c1.id()));
    assert!(room.membership().contains(&PlayerId::from("u1")));
}

#[tokio::test]
async fn test_unknown_verb_is_ignored() {
    let room = room();
    let c1 = MockConn::new(1);

    room.handle_message(&c1, r#"dance,ignored,{}"#).await.unwrap();

    assert!(c1.take_frames().is_empty());
    assert!(room.sessions().is_empty());
    assert_eq!(room.bookmarks().peek(), 0);
}

#[tokio::test]
async fn test_failed_write_closes_that_connection_only() {
    let room = room();
    let c1 = MockConn::new(1);
    let c2 = MockConn::new(2);
    let c3 = MockConn::new(3);
    for (conn, user) in [(&c1, "u1"), (&c2, "u2"), (&c3, "u3")] {
        room.handle_message(conn, &hello(user, user)).await.unwrap();
        conn.take_frames();
    }
    c2.fail_writes.store(true, Ordering::SeqCst);

    room.handle_message(&c1, &command("u1", "A", "anyone here?"))
        .await
        .unwrap();

    assert_eq!(c1.take_frames().len(), 1);
    assert_eq!(c3.take_frames().len(), 1);
    assert!(!c2.is_open());
    let (code, reason) = c2.closed_with.lock().unwrap().clone().unwrap();
    assert_eq!(code, CloseCode::UnexpectedCondition);
    assert!(reason.len() <= gameroom_transport::MAX_CLOSE_REASON_LEN);
}

#[tokio::test]
async fn test_closed_connection_is_skipped_not_closed_again() {
    let room = room();
    let c1 = MockConn::new(1);
    let c2 = MockConn::new(2);
    room.handle_message(&c1, &hello("u1", "A")).await.unwrap();
    room.handle_message(&c2, &hello("u2", "B")).await.unwrap();
    c1.take_frames();
    c2.take_frames();
    c2.open.store(false, Ordering::SeqCst);

    room.handle_message(&c1, &command("u1", "A", "hi")).await.unwrap();

    assert!(c2.take_frames().is_empty());
    assert!(c2.closed_with.lock().unwrap().is_none());
    assert_eq!(c1.take_frames().len(), 1);
}

#[tokio::test]
async fn test_transport_close_unregisters_but_keeps_membership() {
    let room = room();
    let c1 = MockConn::new(1);
    room.handle_message(&c1, &hello("u1", "A")).await.unwrap();

    room.on_close(c1.id());

    assert!(!room.sessions().contains(c1.id()));
    assert!(room.membership().contains(&PlayerId::from("u1")));
}

// =========================================================================
// Concurrency
// =========================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_players_never_share_a_bookmark() {
    const PLAYERS: u64 = 20;

    let room = Arc::new(room());
    let watcher = MockConn::new(0);
    room.handle_message(&watcher, &hello("watcher", "W"))
        .await
        .unwrap();

    let tasks: Vec<_> = (1..=PLAYERS)
        .map(|i| {
            let room = Arc::clone(&room);
            tokio::spawn(async move {
                let conn = MockConn::new(i);
                let user = format!("u{i}");
                room.handle_message(&conn, &hello(&user, &user)).await.unwrap();
                room.handle_message(&conn, &command(&user, &user, "hi"))
                    .await
                    .unwrap();
            })
        })
        .collect();
    for task in tasks {
        task.await.unwrap();
    }

    // The watcher's own arrival, then one arrival and one chat per player.
    let bookmarks: Vec<u64> = watcher
        .take_frames()
        .iter()
        .filter_map(Frame::bookmark)
        .collect();
    let unique: BTreeSet<u64> = bookmarks.iter().copied().collect();

    assert_eq!(bookmarks.len(), unique.len(), "no bookmark delivered twice");
    assert_eq!(unique, (0..1 + 2 * PLAYERS).collect::<BTreeSet<u64>>());
    assert_eq!(room.membership().len(), 1 + PLAYERS as usize);
}
