pub mod app;
pub mod board_view;
pub mod chat_panel;
pub mod status_bar;
