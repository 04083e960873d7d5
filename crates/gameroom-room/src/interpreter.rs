//! Turns hellos, goodbyes, and commands into outbound frames.
//!
//! The interpreter never touches membership or sessions. The room engine
//! performs the one mutation a message calls for and hands the outcome in;
//! the interpreter decides what to say and to whom, drawing one bookmark
//! per event frame in the order the frames are built.

use gameroom_protocol::{
    ChatCommand, Frame, PlayerId, PlayerRef, Recipient, RoomPayload,
};

use crate::{BookmarkSequencer, ObjectTable, RoomInfo};

/// Reply when `/go` names no direction.
pub const NEED_DIRECTION: &str =
    "Hmm. Looks like you need to specify a direction. Try again?";

/// Reply to a slash command the room doesn't know.
pub const UNRECOGNISED_COMMAND: &str = "Unrecognised command - sorry :-(";

/// Private half of the arrival event.
pub const YOU_ENTERED: &str = "You have entered the room";

/// Content of every exit intent.
pub const EXIT_CONTENT: &str = "Run Away!";

fn no_such_door(direction: &str) -> String {
    format!("Hmm. There is no {direction} door. Try again?")
}

fn entered(username: &str) -> String {
    format!("Player {username} has entered the room")
}

fn left(username: &str) -> String {
    format!("Player {username} has left the room")
}

/// What a line of `content` asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Bare `/look`.
    Look,
    /// `/look <object>`, object lower-cased.
    Examine(String),
    /// `/go` with an optional direction, lower-cased.
    Go(Option<String>),
    /// Any other slash command. Carries the lower-cased command word.
    Unrecognised(String),
    /// Not a command at all.
    Chat,
}

impl Command {
    /// Classifies a line of player input.
    ///
    /// Matching is case-insensitive and by prefix: anything after `/look`
    /// names an object, anything after `/go` names a direction. Chat is
    /// echoed from the payload, so its casing survives.
    pub fn parse(content: &str) -> Self {
        let lower = content.to_lowercase();
        if !lower.starts_with('/') {
            return Self::Chat;
        }

        if let Some(rest) = lower.strip_prefix("/look") {
            return match rest.trim() {
                "" => Self::Look,
                object => Self::Examine(object.to_owned()),
            };
        }
        if let Some(rest) = lower.strip_prefix("/go") {
            return match rest.trim() {
                "" => Self::Go(None),
                direction => Self::Go(Some(direction.to_owned())),
            };
        }

        let word = lower.split_whitespace().next().unwrap_or("/");
        Self::Unrecognised(word.to_owned())
    }
}

/// How an outbound frame travels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Only to the connection the inbound message arrived on.
    Direct,
    /// To every registered connection.
    Broadcast,
}

/// One frame to send, and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outbound {
    pub delivery: Delivery,
    pub frame: Frame,
}

impl Outbound {
    fn direct(frame: Frame) -> Self {
        Self {
            delivery: Delivery::Direct,
            frame,
        }
    }

    fn broadcast(frame: Frame) -> Self {
        Self {
            delivery: Delivery::Broadcast,
            frame,
        }
    }
}

/// Builds the room's replies and broadcasts.
#[derive(Debug)]
pub struct CommandInterpreter {
    info: RoomInfo,
    objects: ObjectTable,
    bookmarks: BookmarkSequencer,
}

impl CommandInterpreter {
    pub fn new(
        info: RoomInfo,
        objects: ObjectTable,
        bookmarks: BookmarkSequencer,
    ) -> Self {
        Self {
            info,
            objects,
            bookmarks,
        }
    }

    pub fn info(&self) -> &RoomInfo {
        &self.info
    }

    pub fn objects(&self) -> &ObjectTable {
        &self.objects
    }

    pub fn bookmarks(&self) -> &BookmarkSequencer {
        &self.bookmarks
    }

    /// Frames for a `hello`. The arrival event is only broadcast when the
    /// player was not already present; the location reply always goes out.
    pub fn hello(&self, player: &PlayerRef, newly_joined: bool) -> Vec<Outbound> {
        let mut out = Vec::with_capacity(2);
        if newly_joined {
            out.push(Outbound::broadcast(Frame::player(
                Recipient::All,
                RoomPayload::event(
                    Some(&entered(&player.username)),
                    Some((&player.user_id, YOU_ENTERED)),
                    self.bookmarks.next(),
                ),
            )));
        }
        out.push(Outbound::direct(self.location(&player.user_id, true)));
        out
    }

    /// Frames for a `goodbye`: one room-wide departure event.
    pub fn goodbye(&self, player: &PlayerRef) -> Vec<Outbound> {
        vec![Outbound::broadcast(Frame::player(
            Recipient::All,
            RoomPayload::event(
                Some(&left(&player.username)),
                None,
                self.bookmarks.next(),
            ),
        ))]
    }

    /// Frames for a `command`.
    pub fn command(&self, cmd: &ChatCommand) -> Vec<Outbound> {
        let sender = &cmd.user_id;
        match Command::parse(&cmd.content) {
            // The object listing goes out as an event keyed only by the
            // sender and is delivered only on the sender's connection.
            Command::Look => vec![
                Outbound::direct(self.location(sender, false)),
                Outbound::direct(self.private_event(sender, &self.objects.listing())),
            ],
            Command::Examine(object) => match self.objects.describe(&object) {
                Some(description) => {
                    vec![Outbound::direct(self.private_event(sender, description))]
                }
                None => Vec::new(),
            },
            Command::Go(None) => {
                vec![Outbound::direct(self.private_event(sender, NEED_DIRECTION))]
            }
            Command::Go(Some(direction)) => match self.info.doors.exit_for(&direction) {
                Some(exit_id) => vec![Outbound::direct(Frame::player_location(
                    sender.clone(),
                    RoomPayload::Exit {
                        exit_id: exit_id.to_owned(),
                        bookmark: self.bookmarks.next(),
                        content: EXIT_CONTENT.to_owned(),
                    },
                ))],
                None => vec![Outbound::direct(
                    self.private_event(sender, &no_such_door(&direction)),
                )],
            },
            Command::Unrecognised(word) => {
                tracing::debug!(player_id = %sender, command = %word, "unrecognised command");
                vec![Outbound::direct(self.private_event(sender, UNRECOGNISED_COMMAND))]
            }
            Command::Chat => vec![Outbound::broadcast(Frame::player(
                Recipient::All,
                RoomPayload::Chat {
                    username: cmd.username.clone(),
                    content: cmd.content.clone(),
                    bookmark: self.bookmarks.next(),
                },
            ))],
        }
    }

    fn location(&self, player: &PlayerId, with_full_name: bool) -> Frame {
        Frame::player(
            Recipient::Player(player.clone()),
            RoomPayload::Location {
                name: self.info.name.clone(),
                full_name: with_full_name.then(|| self.info.full_name.clone()),
                description: self.info.description.clone(),
            },
        )
    }

    fn private_event(&self, player: &PlayerId, text: &str) -> Frame {
        Frame::player(
            Recipient::Player(player.clone()),
            RoomPayload::event(None, Some((player, text)), self.bookmarks.next()),
        )
    }
}
