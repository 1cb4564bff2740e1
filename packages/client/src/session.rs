//! Client-side room state.
//!
//! The server never confirms a join or lists rooms, so the client tracks what
//! it has joined and which room its chat lines go to.

use roomcast_server::infrastructure::dto::websocket::ClientEnvelope;

use crate::{
    command::{Command, HELP},
    error::SessionError,
};

/// What the runner should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send an envelope; print `echo` locally if present
    Send {
        envelope: ClientEnvelope,
        echo: Option<String>,
    },
    /// Print a line locally, nothing goes over the wire
    Notice(String),
    /// Close the connection and exit
    Quit,
    Nothing,
}

/// Joined rooms and the active room
#[derive(Debug, Default)]
pub struct ClientSession {
    joined_rooms: Vec<String>,
    active_room: Option<String>,
}

impl ClientSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Joined rooms in the order they were first joined
    pub fn joined_rooms(&self) -> &[String] {
        &self.joined_rooms
    }

    pub fn active_room(&self) -> Option<&str> {
        self.active_room.as_deref()
    }

    /// Join (or create) a room and make it active.
    ///
    /// Joining a room again re-sends the join; the server treats it as a no-op.
    pub fn join(&mut self, room: &str) -> Result<ClientEnvelope, SessionError> {
        let room = room.trim();
        if room.is_empty() {
            return Err(SessionError::BlankRoom);
        }
        if !self.joined_rooms.iter().any(|r| r == room) {
            self.joined_rooms.push(room.to_string());
        }
        self.active_room = Some(room.to_string());
        Ok(ClientEnvelope::join(room))
    }

    /// Make an already joined room active
    pub fn switch(&mut self, room: &str) -> Result<(), SessionError> {
        let room = room.trim();
        if room.is_empty() {
            return Err(SessionError::BlankRoom);
        }
        if !self.joined_rooms.iter().any(|r| r == room) {
            return Err(SessionError::NotJoined(room.to_string()));
        }
        self.active_room = Some(room.to_string());
        Ok(())
    }

    /// Build a chat envelope for the active room
    pub fn say(&self, message: &str) -> Result<ClientEnvelope, SessionError> {
        let room = self.active_room.as_deref().ok_or(SessionError::NoActiveRoom)?;
        Ok(ClientEnvelope::chat(room, message))
    }

    /// Apply one command
    pub fn handle(&mut self, command: Command) -> Effect {
        match command {
            Command::Create(room) | Command::Join(room) => match self.join(&room) {
                Ok(envelope) => Effect::Send {
                    envelope,
                    echo: Some(format!("* now chatting in '{}'", room.trim())),
                },
                Err(e) => Effect::Notice(format!("! {e}")),
            },
            Command::Switch(room) => match self.switch(&room) {
                Ok(()) => Effect::Notice(format!("* now chatting in '{}'", room.trim())),
                Err(e) => Effect::Notice(format!("! {e}")),
            },
            Command::Rooms => Effect::Notice(self.describe_rooms()),
            Command::Help => Effect::Notice(HELP.to_string()),
            Command::Quit => Effect::Quit,
            Command::Say(message) => match self.say(&message) {
                Ok(envelope) => Effect::Send {
                    envelope,
                    echo: Some(format!("you: {message}")),
                },
                Err(e) => Effect::Notice(format!("! {e}")),
            },
            Command::Empty => Effect::Nothing,
            Command::Unknown(name) => {
                Effect::Notice(format!("! unknown command '/{name}'; try /help"))
            }
        }
    }

    fn describe_rooms(&self) -> String {
        if self.joined_rooms.is_empty() {
            return "* no rooms joined".to_string();
        }
        self.joined_rooms
            .iter()
            .map(|room| {
                if self.active_room.as_deref() == Some(room.as_str()) {
                    format!("* {room} (active)")
                } else {
                    format!("  {room}")
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
