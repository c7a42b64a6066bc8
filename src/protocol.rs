//! Client side of the room protocol.
//!
//! Every message is a list of fields joined by the ASCII record separator. The first
//! field is a four-letter command tag; the rest depend on the command. A move carries
//! one `row,col` field per board level.

use thiserror::Error;

use crate::board::CellIndex;

pub const DELIMITER: char = '\u{1e}';

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    MakeRoom,
    JoinRoom,
    JoinSlot,
    LeaveRoom,
    LeaveSlot,
    Play,
    Chat,
    Error,
}

impl Command {
    pub fn tag(self) -> &'static str {
        match self {
            Command::MakeRoom => "MKRM",
            Command::JoinRoom => "JOIN",
            Command::JoinSlot => "JNSL",
            Command::LeaveRoom => "LEAV",
            Command::LeaveSlot => "LVSL",
            Command::Play => "PLAY",
            Command::Chat => "CHAT",
            Command::Error => "ERRO",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Some(match tag {
            "MKRM" => Command::MakeRoom,
            "JOIN" => Command::JoinRoom,
            "JNSL" => Command::JoinSlot,
            "LEAV" => Command::LeaveRoom,
            "LVSL" => Command::LeaveSlot,
            "PLAY" => Command::Play,
            "CHAT" => Command::Chat,
            "ERRO" => Command::Error,
            _ => return None,
        })
    }
}

/// Messages sent to the server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClientMsg {
    MakeRoom,
    JoinRoom { room: String },
    JoinSlot { room: String },
    LeaveSlot { room: String },
    LeaveRoom { room: String },
    Chat { room: String, text: String },
    Play { room: String, path: Vec<CellIndex> },
}

impl ClientMsg {
    pub fn command(&self) -> Command {
        match self {
            ClientMsg::MakeRoom => Command::MakeRoom,
            ClientMsg::JoinRoom { .. } => Command::JoinRoom,
            ClientMsg::JoinSlot { .. } => Command::JoinSlot,
            ClientMsg::LeaveSlot { .. } => Command::LeaveSlot,
            ClientMsg::LeaveRoom { .. } => Command::LeaveRoom,
            ClientMsg::Chat { .. } => Command::Chat,
            ClientMsg::Play { .. } => Command::Play,
        }
    }

    pub fn encode(&self) -> String {
        let mut fields: Vec<String> = vec![self.command().tag().to_string()];
        match self {
            ClientMsg::MakeRoom => {}
            ClientMsg::JoinRoom { room }
            | ClientMsg::JoinSlot { room }
            | ClientMsg::LeaveSlot { room }
            | ClientMsg::LeaveRoom { room } => fields.push(room.clone()),
            ClientMsg::Chat { room, text } => {
                fields.push(room.clone());
                fields.push(text.clone());
            }
            ClientMsg::Play { room, path } => {
                fields.push(room.clone());
                fields.extend(path.iter().map(|(r, c)| format!("{r},{c}")));
            }
        }
        fields.join(&DELIMITER.to_string())
    }
}

/// Messages received from the server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ServerMsg {
    RoomCreated { room: String },
    RoomJoined { room: String },
    SlotJoined { room: String, slot: String },
    RoomLeft { room: String },
    SlotLeft { room: String },
    Chat { timestamp: String, user: String, text: String },
    Error { command: String, message: String },
    /// An error reply without the usual command/message pair.
    UnknownError,
    Play { room: String, token: String, path: Vec<CellIndex> },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("empty message")]
    Empty,
    #[error("unknown command tag: {tag}")]
    UnknownCommand { tag: String },
    #[error("{tag} expects {expected} fields, got {got}")]
    FieldCount { tag: &'static str, expected: usize, got: usize },
    #[error("{tag} expects at least {min} fields, got {got}")]
    TooFewFields { tag: &'static str, min: usize, got: usize },
    #[error("malformed coordinate field: {field:?}")]
    BadCoordinate { field: String },
}

pub fn decode(raw: &str) -> Result<ServerMsg, ProtocolError> {
    if raw.is_empty() {
        return Err(ProtocolError::Empty);
    }
    let fields: Vec<&str> = raw.split(DELIMITER).collect();
    let command = Command::from_tag(fields[0])
        .ok_or_else(|| ProtocolError::UnknownCommand { tag: fields[0].to_string() })?;
    let expect = |n: usize| {
        if fields.len() == n {
            Ok(())
        } else {
            Err(ProtocolError::FieldCount { tag: command.tag(), expected: n, got: fields.len() })
        }
    };
    let owned = |i: usize| fields[i].to_string();

    Ok(match command {
        Command::MakeRoom => {
            expect(2)?;
            ServerMsg::RoomCreated { room: owned(1) }
        }
        Command::JoinRoom => {
            expect(2)?;
            ServerMsg::RoomJoined { room: owned(1) }
        }
        Command::JoinSlot => {
            expect(3)?;
            ServerMsg::SlotJoined { room: owned(1), slot: owned(2) }
        }
        Command::LeaveRoom => {
            expect(2)?;
            ServerMsg::RoomLeft { room: owned(1) }
        }
        Command::LeaveSlot => {
            expect(2)?;
            ServerMsg::SlotLeft { room: owned(1) }
        }
        Command::Chat => {
            expect(4)?;
            ServerMsg::Chat { timestamp: owned(1), user: owned(2), text: owned(3) }
        }
        Command::Error if fields.len() == 3 => {
            ServerMsg::Error { command: owned(1), message: owned(2) }
        }
        Command::Error => ServerMsg::UnknownError,
        Command::Play => {
            if fields.len() < 4 {
                return Err(ProtocolError::TooFewFields {
                    tag: command.tag(),
                    min: 4,
                    got: fields.len(),
                });
            }
            let path = fields[3..]
                .iter()
                .map(|f| parse_coordinate(f))
                .collect::<Result<Vec<_>, _>>()?;
            ServerMsg::Play { room: owned(1), token: owned(2), path }
        }
    })
}

fn parse_coordinate(field: &str) -> Result<CellIndex, ProtocolError> {
    let bad = || ProtocolError::BadCoordinate { field: field.to_string() };
    let (row, col) = field.split_once(',').ok_or_else(bad)?;
    let row = row.trim().parse().map_err(|_| bad())?;
    let col = col.trim().parse().map_err(|_| bad())?;
    Ok((row, col))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wire(fields: &[&str]) -> String {
        fields.join("\u{1e}")
    }

    #[test]
    fn encodes_play_path_one_field_per_level() {
        let msg = ClientMsg::Play { room: "7".into(), path: vec![(0, 2), (1, 1)] };
        assert_eq!(msg.encode(), wire(&["PLAY", "7", "0,2", "1,1"]));
        assert_eq!(ClientMsg::MakeRoom.encode(), "MKRM");
        assert_eq!(
            ClientMsg::Chat { room: "3".into(), text: "hi there".into() }.encode(),
            wire(&["CHAT", "3", "hi there"])
        );
    }

    #[test]
    fn decodes_room_replies() {
        assert_eq!(decode(&wire(&["MKRM", "4"])), Ok(ServerMsg::RoomCreated { room: "4".into() }));
        assert_eq!(
            decode(&wire(&["JNSL", "4", "1"])),
            Ok(ServerMsg::SlotJoined { room: "4".into(), slot: "1".into() })
        );
        assert_eq!(decode(&wire(&["LEAV", "4"])), Ok(ServerMsg::RoomLeft { room: "4".into() }));
    }

    #[test]
    fn decodes_play() {
        let msg = decode(&wire(&["PLAY", "9", "X", "0,0", "2, 1"])).unwrap();
        assert_eq!(
            msg,
            ServerMsg::Play { room: "9".into(), token: "X".into(), path: vec![(0, 0), (2, 1)] }
        );
    }

    #[test]
    fn single_level_play_decodes() {
        // one coordinate field is enough; depth is checked against the board, not here
        assert_eq!(
            decode(&wire(&["PLAY", "r", "X", "1,2"])),
            Ok(ServerMsg::Play { room: "r".into(), token: "X".into(), path: vec![(1, 2)] })
        );
    }

    #[test]
    fn rejects_malformed_play() {
        assert!(matches!(
            decode(&wire(&["PLAY", "9", "X"])),
            Err(ProtocolError::TooFewFields { got: 3, .. })
        ));
        assert_eq!(
            decode(&wire(&["PLAY", "9", "X", "0;0"])),
            Err(ProtocolError::BadCoordinate { field: "0;0".into() })
        );
        assert!(decode(&wire(&["PLAY", "9", "X", "-1,0"])).is_err());
    }

    #[test]
    fn error_replies_always_decode() {
        assert_eq!(
            decode(&wire(&["ERRO", "JOIN", "No such room"])),
            Ok(ServerMsg::Error { command: "JOIN".into(), message: "No such room".into() })
        );
        assert_eq!(decode("ERRO"), Ok(ServerMsg::UnknownError));
    }

    #[test]
    fn wrong_field_counts_and_tags() {
        assert_eq!(decode(""), Err(ProtocolError::Empty));
        assert!(matches!(decode("NOPE"), Err(ProtocolError::UnknownCommand { .. })));
        assert!(matches!(decode(&wire(&["CHAT", "1", "bob"])), Err(ProtocolError::FieldCount { .. })));
        assert!(matches!(decode("JOIN"), Err(ProtocolError::FieldCount { expected: 2, got: 1, .. })));
    }
}
