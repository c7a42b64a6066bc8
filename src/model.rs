//! Session state shared by the view: room membership, connection status, chat log.
//! The board itself lives behind `SharedBoard`; the reducer only tracks a version so
//! the canvas knows when to redraw.

use std::cell::RefCell;
use std::rc::Rc;
use yew::Reducible;

use crate::board::Board;
use crate::chat::SYSTEM_USER;
use crate::protocol::ServerMsg;

const MAX_CHAT_LINES: usize = 200;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatLine {
    pub user: String,
    pub text: String,
    /// Server timestamp (epoch ms); local notices carry none.
    pub at_ms: Option<u64>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionState {
    pub connected: bool,
    pub room: Option<String>,
    pub slot: Option<String>,
    pub chat: Vec<ChatLine>,
    /// Bumped whenever the board changes.
    pub version: u64,
}

impl SessionState {
    fn notice(&mut self, text: impl Into<String>) {
        self.push(ChatLine { user: SYSTEM_USER.to_string(), text: text.into(), at_ms: None });
    }

    fn push(&mut self, line: ChatLine) {
        self.chat.push(line);
        if self.chat.len() > MAX_CHAT_LINES {
            let excess = self.chat.len() - MAX_CHAT_LINES;
            self.chat.drain(..excess);
        }
    }
}

pub enum SessionAction {
    Connected,
    Disconnected,
    Server(ServerMsg),
    Notice(String),
    BoardChanged,
}

impl Reducible for SessionState {
    type Action = SessionAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use SessionAction::*;
        let mut new = (*self).clone();
        match action {
            Connected => {
                new.connected = true;
                new.notice("Connected");
            }
            Disconnected => {
                new.connected = false;
                new.room = None;
                new.slot = None;
                new.notice("Lost connection");
            }
            Notice(text) => new.notice(text),
            BoardChanged => new.version = new.version.wrapping_add(1),
            Server(msg) => match msg {
                ServerMsg::RoomCreated { room } | ServerMsg::RoomJoined { room } => {
                    new.notice(format!("Joined room {room}"));
                    new.room = Some(room);
                    new.slot = None;
                    new.version = new.version.wrapping_add(1);
                }
                ServerMsg::SlotJoined { room, slot } => {
                    new.notice(format!("Joined slot {slot} in room {room}"));
                    new.slot = Some(slot);
                }
                ServerMsg::RoomLeft { room } => {
                    let left = new.room.take().unwrap_or(room);
                    new.notice(format!("Left room {left}"));
                    new.slot = None;
                    new.version = new.version.wrapping_add(1);
                }
                ServerMsg::SlotLeft { room } => {
                    new.notice(format!("Left your slot in room {room}"));
                    new.slot = None;
                }
                ServerMsg::Chat { timestamp, user, text } => {
                    new.push(ChatLine { user, text, at_ms: timestamp.parse().ok() });
                }
                ServerMsg::Error { message, .. } => new.notice(message),
                ServerMsg::UnknownError => new.notice("Unknown error occured"),
                ServerMsg::Play { .. } => new.version = new.version.wrapping_add(1),
            },
        }
        Rc::new(new)
    }
}

/// The board shared between the canvas and the socket handler. Compares by identity
/// so it can sit in component props.
#[derive(Clone)]
pub struct SharedBoard(pub Rc<RefCell<Board>>);

impl SharedBoard {
    pub fn new(board: Board) -> Self {
        Self(Rc::new(RefCell::new(board)))
    }
}

impl PartialEq for SharedBoard {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(state: SessionState, actions: Vec<SessionAction>) -> Rc<SessionState> {
        actions.into_iter().fold(Rc::new(state), |s, a| s.reduce(a))
    }

    fn last_text(s: &SessionState) -> &str {
        &s.chat.last().unwrap().text
    }

    #[test]
    fn joining_and_leaving_rooms() {
        let s = apply(
            SessionState::default(),
            vec![
                SessionAction::Connected,
                SessionAction::Server(ServerMsg::RoomCreated { room: "3".into() }),
                SessionAction::Server(ServerMsg::SlotJoined { room: "3".into(), slot: "0".into() }),
            ],
        );
        assert!(s.connected);
        assert_eq!(s.room.as_deref(), Some("3"));
        assert_eq!(s.slot.as_deref(), Some("0"));
        assert_eq!(last_text(&s), "Joined slot 0 in room 3");

        let s = apply((*s).clone(), vec![SessionAction::Server(ServerMsg::RoomLeft { room: "3".into() })]);
        assert_eq!(s.room, None);
        assert_eq!(s.slot, None);
        assert_eq!(last_text(&s), "Left room 3");
    }

    #[test]
    fn errors_become_system_notices() {
        let s = apply(
            SessionState::default(),
            vec![
                SessionAction::Server(ServerMsg::Error { command: "JOIN".into(), message: "No room".into() }),
                SessionAction::Server(ServerMsg::UnknownError),
            ],
        );
        assert_eq!(s.chat[0].text, "No room");
        assert_eq!(s.chat[0].user, SYSTEM_USER);
        assert_eq!(last_text(&s), "Unknown error occured");
    }

    #[test]
    fn chat_lines_keep_server_time_and_cap() {
        let mut actions = Vec::new();
        for i in 0..(MAX_CHAT_LINES + 5) {
            actions.push(SessionAction::Server(ServerMsg::Chat {
                timestamp: "1700000000000".into(),
                user: "ana".into(),
                text: format!("msg {i}"),
            }));
        }
        let s = apply(SessionState::default(), actions);
        assert_eq!(s.chat.len(), MAX_CHAT_LINES);
        assert_eq!(s.chat[0].text, "msg 5");
        assert_eq!(s.chat[0].at_ms, Some(1_700_000_000_000));
    }

    #[test]
    fn board_changes_bump_version() {
        let s = apply(
            SessionState::default(),
            vec![
                SessionAction::BoardChanged,
                SessionAction::Server(ServerMsg::Play { room: "1".into(), token: "X".into(), path: vec![(0, 0)] }),
            ],
        );
        assert_eq!(s.version, 2);
        assert!(s.chat.is_empty());
    }

    #[test]
    fn disconnect_forgets_room() {
        let s = apply(
            SessionState::default(),
            vec![
                SessionAction::Server(ServerMsg::RoomJoined { room: "8".into() }),
                SessionAction::Disconnected,
            ],
        );
        assert!(!s.connected);
        assert_eq!(s.room, None);
        assert_eq!(last_text(&s), "Lost connection");
    }
}
