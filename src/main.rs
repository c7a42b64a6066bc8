mod board;
mod canvas;
mod chat;
mod components;
mod config;
mod geometry;
mod model;
mod net;
mod protocol;
mod surface;
mod util;

use components::app::App;

fn main() {
    yew::Renderer::<App>::new().render();
}
