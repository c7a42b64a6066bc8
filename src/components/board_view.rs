use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::HtmlCanvasElement;
use yew::prelude::*;

use crate::board::CellIndex;
use crate::canvas::{BoardCanvas, LineStyle};
use crate::model::SharedBoard;
use crate::util::cwarn;

#[derive(Properties, PartialEq, Clone)]
pub struct BoardViewProps {
    pub board: SharedBoard,
    pub style: LineStyle,
    /// Changes whenever the board contents change.
    pub version: u64,
    pub on_cell: Callback<Vec<CellIndex>>,
}

#[function_component(BoardView)]
pub fn board_view(props: &BoardViewProps) -> Html {
    let canvas_ref = use_node_ref();
    let adapter = use_mut_ref(|| None::<Rc<BoardCanvas>>);
    // The click listener is registered once; it reads the latest callback from here.
    let on_cell_ref = use_mut_ref(|| props.on_cell.clone());
    *on_cell_ref.borrow_mut() = props.on_cell.clone();

    // Redraw when the board changes
    {
        let adapter = adapter.clone();
        let board = props.board.clone();
        use_effect_with(props.version, move |_| {
            if let Some(a) = &*adapter.borrow() {
                a.render(&mut board.0.borrow_mut());
            }
            || ()
        });
    }

    // Mount: build the adapter, hook resize + click
    {
        let canvas_ref = canvas_ref.clone();
        let adapter = adapter.clone();
        let board = props.board.clone();
        let style = props.style.clone();
        use_effect_with((), move |_| {
            let window = web_sys::window().expect("no global `window` exists");
            let canvas: HtmlCanvasElement = canvas_ref
                .cast::<HtmlCanvasElement>()
                .expect("canvas_ref not attached to a canvas element");

            let board_canvas = match BoardCanvas::new(canvas.clone(), style) {
                Ok(c) => Rc::new(c),
                Err(err) => {
                    cwarn(&format!("board canvas unavailable: {err:?}"));
                    return Box::new(|| ()) as Box<dyn FnOnce()>;
                }
            };
            board_canvas.render(&mut board.0.borrow_mut());
            *adapter.borrow_mut() = Some(board_canvas.clone());

            let resize_cb = {
                let board_canvas = board_canvas.clone();
                let board = board.clone();
                Closure::wrap(Box::new(move |_e: web_sys::Event| {
                    board_canvas.render(&mut board.0.borrow_mut());
                }) as Box<dyn FnMut(_)>)
            };
            if let Err(err) = window.add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref()) {
                cwarn(&format!("could not add resize listener: {err:?}"));
            }

            let click_cb = {
                let board_canvas = board_canvas.clone();
                let board = board.clone();
                let on_cell_ref = on_cell_ref.clone();
                Closure::wrap(Box::new(move |e: web_sys::MouseEvent| {
                    let (x, y) = board_canvas.to_local(e.client_x() as f64, e.client_y() as f64);
                    let hit = board.0.borrow().get_cell(x, y);
                    if let Some(path) = hit {
                        let on_cell = on_cell_ref.borrow().clone();
                        on_cell.emit(path);
                    }
                }) as Box<dyn FnMut(_)>)
            };
            if let Err(err) = canvas.add_event_listener_with_callback("click", click_cb.as_ref().unchecked_ref()) {
                cwarn(&format!("could not add click listener: {err:?}"));
            }

            Box::new(move || {
                if let Err(err) = window
                    .remove_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref())
                {
                    cwarn(&format!("could not remove resize listener: {err:?}"));
                }
                if let Err(err) = canvas
                    .remove_event_listener_with_callback("click", click_cb.as_ref().unchecked_ref())
                {
                    cwarn(&format!("could not remove click listener: {err:?}"));
                }
                adapter.borrow_mut().take();
                drop(resize_cb);
                drop(click_cb);
            }) as Box<dyn FnOnce()>
        });
    }

    html! {
        <div class="board-host" style="flex:1; min-width:0; min-height:0; display:flex; align-items:center; justify-content:center; overflow:hidden;">
            <canvas ref={canvas_ref} id="main" style="display:block;"></canvas>
        </div>
    }
}
