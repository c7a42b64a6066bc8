use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CloseEvent, ErrorEvent, Event, MessageEvent, WebSocket};

use crate::protocol::{decode, ClientMsg, ServerMsg};
use crate::util::{clog, cwarn};

pub enum SocketEvent {
    Open,
    Closed,
    Message(ServerMsg),
}

#[allow(dead_code)]
struct WsHandlers {
    onopen: Closure<dyn FnMut(Event)>,
    onmessage: Closure<dyn FnMut(MessageEvent)>,
    onerror: Closure<dyn FnMut(ErrorEvent)>,
    onclose: Closure<dyn FnMut(CloseEvent)>,
}

/// A socket to the room server. Inbound frames are decoded and handed to the
/// callback; undecodable frames are logged and dropped.
pub struct Connection {
    ws: WebSocket,
    handlers: RefCell<Option<WsHandlers>>,
}

impl Connection {
    pub fn open(url: &str, on_event: Rc<dyn Fn(SocketEvent)>) -> Result<Self, JsValue> {
        let ws = WebSocket::new(url)?;

        let onopen = {
            let on_event = on_event.clone();
            let url = url.to_string();
            Closure::wrap(Box::new(move |_event: Event| {
                clog(&format!("websocket connected: {url}"));
                on_event(SocketEvent::Open);
            }) as Box<dyn FnMut(Event)>)
        };
        let onmessage = {
            let on_event = on_event.clone();
            Closure::wrap(Box::new(move |event: MessageEvent| {
                let Some(raw) = event.data().as_string() else {
                    cwarn("ignoring non-text websocket frame");
                    return;
                };
                clog(&format!("recv: {raw:?}"));
                match decode(&raw) {
                    Ok(msg) => on_event(SocketEvent::Message(msg)),
                    Err(err) => cwarn(&format!("dropping message {raw:?}: {err}")),
                }
            }) as Box<dyn FnMut(MessageEvent)>)
        };
        let onerror = {
            let url = url.to_string();
            Closure::wrap(Box::new(move |event: ErrorEvent| {
                cwarn(&format!("websocket error on {url}: {}", event.message()));
            }) as Box<dyn FnMut(ErrorEvent)>)
        };
        let onclose = {
            Closure::wrap(Box::new(move |event: CloseEvent| {
                clog(&format!("websocket closed ({}) {}", event.code(), event.reason()));
                on_event(SocketEvent::Closed);
            }) as Box<dyn FnMut(CloseEvent)>)
        };

        ws.set_onopen(Some(onopen.as_ref().unchecked_ref()));
        ws.set_onmessage(Some(onmessage.as_ref().unchecked_ref()));
        ws.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        ws.set_onclose(Some(onclose.as_ref().unchecked_ref()));

        Ok(Self {
            ws,
            handlers: RefCell::new(Some(WsHandlers { onopen, onmessage, onerror, onclose })),
        })
    }

    pub fn send(&self, msg: &ClientMsg) {
        if self.ws.ready_state() != WebSocket::OPEN {
            cwarn(&format!("not connected, dropping {}", msg.command().tag()));
            return;
        }
        let frame = msg.encode();
        if let Err(err) = self.ws.send_with_str(&frame) {
            cwarn(&format!("send failed: {err:?}"));
        }
    }

    /// Detaches the handlers before closing so no events fire into a torn-down view.
    pub fn close(&self) {
        self.ws.set_onopen(None);
        self.ws.set_onmessage(None);
        self.ws.set_onerror(None);
        self.ws.set_onclose(None);
        if let Err(err) = self.ws.close() {
            cwarn(&format!("close failed: {err:?}"));
        }
        self.handlers.borrow_mut().take();
    }
}
