//! Chat entry handling: text cleanup and `/` commands.

use crate::protocol::{ClientMsg, DELIMITER};

pub const SYSTEM_USER: &str = "[System]";

pub const HELP_TEXT: &str = "\n/make\tCreate a Room | \
/join <roomid>\tJoin an existing Room | \
/leave\tLeave the current room | \
/sit\tTake a slot in the current room | \
/stand\tGive up your slot";

/// What a line typed into the chat box turns into.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChatIntent {
    Send(ClientMsg),
    /// Shown locally as a system message; nothing goes over the wire.
    Notice(String),
    Ignore,
}

/// Trims leading/trailing newlines, collapses blank-line runs to a single newline and
/// drops the protocol delimiter.
pub fn sanitize_text(s: &str) -> String {
    let trimmed = s.trim_matches('\n');
    let mut out = String::with_capacity(trimmed.len());
    let mut last_newline = false;
    for ch in trimmed.chars().filter(|&c| c != DELIMITER) {
        if ch == '\n' {
            if last_newline {
                continue;
            }
            last_newline = true;
        } else {
            last_newline = false;
        }
        out.push(ch);
    }
    out
}

pub fn parse_input(text: &str, room: Option<&str>) -> ChatIntent {
    let Some(command) = text.strip_prefix('/') else {
        return match room {
            _ if text.is_empty() => ChatIntent::Ignore,
            Some(room) => ChatIntent::Send(ClientMsg::Chat { room: room.to_string(), text: text.to_string() }),
            None => ChatIntent::Notice("You aren't in a room".to_string()),
        };
    };
    let args: Vec<&str> = command.split(' ').collect();
    let in_room = |make: fn(String) -> ClientMsg| match room {
        Some(room) => ChatIntent::Send(make(room.to_string())),
        None => ChatIntent::Notice("You aren't in a room".to_string()),
    };
    match args[0] {
        "make" => ChatIntent::Send(ClientMsg::MakeRoom),
        "join" if args.len() == 2 => ChatIntent::Send(ClientMsg::JoinRoom { room: args[1].to_string() }),
        "join" => ChatIntent::Ignore,
        "sit" | "slot" if args.len() == 1 => in_room(|room| ClientMsg::JoinSlot { room }),
        "sit" | "slot" => ChatIntent::Ignore,
        "stand" | "unslot" => in_room(|room| ClientMsg::LeaveSlot { room }),
        "leave" => in_room(|room| ClientMsg::LeaveRoom { room }),
        "help" => ChatIntent::Notice(HELP_TEXT.to_string()),
        _ => ChatIntent::Notice("Invalid / Command. Type /help for help.".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_collapses_newlines() {
        assert_eq!(sanitize_text("\n\nhello\n\n\nworld\n"), "hello\nworld");
        assert_eq!(sanitize_text("a\nb"), "a\nb");
        assert_eq!(sanitize_text("a\u{1e}b"), "ab");
        assert_eq!(sanitize_text("\n\n"), "");
    }

    #[test]
    fn plain_text_needs_a_room() {
        assert_eq!(
            parse_input("hello", Some("2")),
            ChatIntent::Send(ClientMsg::Chat { room: "2".into(), text: "hello".into() })
        );
        assert_eq!(parse_input("hello", None), ChatIntent::Notice("You aren't in a room".into()));
        assert_eq!(parse_input("", Some("2")), ChatIntent::Ignore);
    }

    #[test]
    fn slash_commands() {
        assert_eq!(parse_input("/make", None), ChatIntent::Send(ClientMsg::MakeRoom));
        assert_eq!(parse_input("/join 12", None), ChatIntent::Send(ClientMsg::JoinRoom { room: "12".into() }));
        assert_eq!(parse_input("/join", None), ChatIntent::Ignore);
        assert_eq!(parse_input("/sit", Some("5")), ChatIntent::Send(ClientMsg::JoinSlot { room: "5".into() }));
        assert_eq!(parse_input("/slot now", Some("5")), ChatIntent::Ignore);
        assert_eq!(parse_input("/unslot", Some("5")), ChatIntent::Send(ClientMsg::LeaveSlot { room: "5".into() }));
        assert_eq!(parse_input("/leave", Some("5")), ChatIntent::Send(ClientMsg::LeaveRoom { room: "5".into() }));
        assert!(matches!(parse_input("/leave", None), ChatIntent::Notice(_)));
        assert_eq!(parse_input("/help", None), ChatIntent::Notice(HELP_TEXT.into()));
        assert!(matches!(parse_input("/dance", None), ChatIntent::Notice(n) if n.starts_with("Invalid")));
    }
}
