use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsValue;
use yew::prelude::*;

use super::{board_view::BoardView, chat_panel::ChatPanel, status_bar::StatusBar};
use crate::board::{Board, CellIndex};
use crate::canvas::LineStyle;
use crate::chat::{parse_input, sanitize_text, ChatIntent};
use crate::config::GameConfig;
use crate::model::{SessionAction, SessionState, SharedBoard};
use crate::net::{Connection, SocketEvent};
use crate::protocol::{ClientMsg, ServerMsg};
use crate::util::{clog, cwarn};

fn load_config() -> GameConfig {
    let raw = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body())
        .and_then(|b| b.get_attribute("data-config"));
    match raw {
        Some(raw) => match GameConfig::from_json(&raw) {
            Ok(cfg) => {
                if cfg.clamped {
                    cwarn(&format!(
                        "data-config board too large, using {}x{} with {} sublevels",
                        cfg.rows, cfg.cols, cfg.sublevels
                    ));
                }
                cfg
            }
            Err(err) => {
                cwarn(&format!("bad data-config, using defaults: {err}"));
                GameConfig::default()
            }
        },
        None => GameConfig::default(),
    }
}

fn socket_url(config: &GameConfig) -> Result<String, JsValue> {
    let location = web_sys::window()
        .ok_or_else(|| JsValue::from_str("no window"))?
        .location();
    Ok(config.socket_url(&location.protocol()?, &location.hostname()?, &location.port()?))
}

fn send(connection: &RefCell<Option<Connection>>, msg: &ClientMsg) {
    match connection.borrow().as_ref() {
        Some(conn) => conn.send(msg),
        None => cwarn("no connection"),
    }
}

// Board mutations happen before the reducer sees the message so the redraw it
// triggers picks them up.
fn apply_server_msg(board: &SharedBoard, session: &UseReducerHandle<SessionState>, msg: ServerMsg) {
    match &msg {
        ServerMsg::Play { token, path, .. } => {
            let mut b = board.0.borrow_mut();
            if path.len() != b.depth() {
                cwarn(&format!("play has {} levels, board has {}", path.len(), b.depth()));
                return;
            }
            if let Some(prev) = b.token_at(path).filter(|t| !t.is_empty()) {
                clog(&format!("overwriting {prev:?} at {path:?}"));
            }
            if !b.play(path, token) {
                cwarn(&format!("play outside the board: {path:?}"));
                return;
            }
        }
        ServerMsg::RoomCreated { .. } | ServerMsg::RoomJoined { .. } | ServerMsg::RoomLeft { .. } => {
            board.0.borrow_mut().clear();
        }
        _ => {}
    }
    session.dispatch(SessionAction::Server(msg));
}

#[function_component(App)]
pub fn app() -> Html {
    let config = use_state(load_config);
    let board = use_state(|| {
        SharedBoard::new(Board::new(
            0.0,
            0.0,
            0.0,
            0.0,
            config.sublevels,
            config.pad(),
            config.rows,
            config.cols,
        ))
    });
    let session = use_reducer(SessionState::default);
    let connection = use_mut_ref(|| None::<Connection>);

    // Connect once; every handler closes over these handles only
    {
        let session = session.clone();
        let board = (*board).clone();
        let connection = connection.clone();
        let config = (*config).clone();
        use_effect_with((), move |_| {
            let on_event: Rc<dyn Fn(SocketEvent)> = {
                let session = session.clone();
                Rc::new(move |event: SocketEvent| match event {
                    SocketEvent::Open => session.dispatch(SessionAction::Connected),
                    SocketEvent::Closed => session.dispatch(SessionAction::Disconnected),
                    SocketEvent::Message(msg) => apply_server_msg(&board, &session, msg),
                })
            };
            match socket_url(&config).and_then(|url| Connection::open(&url, on_event)) {
                Ok(conn) => *connection.borrow_mut() = Some(conn),
                Err(err) => {
                    cwarn(&format!("could not open socket: {err:?}"));
                    session.dispatch(SessionAction::Notice("Could not connect".to_string()));
                }
            }
            move || {
                if let Some(conn) = connection.borrow_mut().take() {
                    conn.close();
                }
            }
        });
    }

    let on_cell = {
        let session = session.clone();
        let connection = connection.clone();
        Callback::from(move |path: Vec<CellIndex>| match session.room.clone() {
            Some(room) => send(&connection, &ClientMsg::Play { room, path }),
            None => session.dispatch(SessionAction::Notice("Join a room to play".to_string())),
        })
    };

    let on_chat = {
        let session = session.clone();
        let connection = connection.clone();
        Callback::from(move |raw: String| {
            let text = sanitize_text(&raw);
            match parse_input(&text, session.room.as_deref()) {
                ChatIntent::Send(msg) => send(&connection, &msg),
                ChatIntent::Notice(notice) => session.dispatch(SessionAction::Notice(notice)),
                ChatIntent::Ignore => {}
            }
        })
    };

    html! {
        <div id="root" style="display:flex; flex-direction:column; width:100vw; height:100vh;">
            <StatusBar connected={session.connected} room={session.room.clone()} slot={session.slot.clone()} />
            <div style="flex:1; display:flex; min-height:0;">
                <BoardView
                    board={(*board).clone()}
                    style={LineStyle::from(&*config)}
                    version={session.version}
                    {on_cell}
                />
                <ChatPanel lines={session.chat.clone()} on_submit={on_chat} />
            </div>
        </div>
    }
}
