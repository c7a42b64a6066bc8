//! Board and connection settings. Defaults match a classic 3x3 board nested one level;
//! a page can override any field through JSON in the body's `data-config`.

use serde::Deserialize;

use crate::board::clamp_shape;
use crate::geometry::Padding;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub rows: usize,
    pub cols: usize,
    /// Nested levels below the root board.
    pub sublevels: usize,
    pub padding: f64,
    /// Grid line colour per level, outermost first.
    pub line_colors: Vec<String>,
    pub line_widths: Vec<f64>,
    pub token_font: String,
    pub debug_borders: bool,
    pub socket_path: String,
    /// Set by `from_json` when the requested board shape had to be shrunk.
    #[serde(skip)]
    pub clamped: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: 3,
            cols: 3,
            sublevels: 1,
            padding: 5.0,
            line_colors: vec!["black".to_string(), "slategrey".to_string()],
            line_widths: vec![5.0, 1.0],
            token_font: "16px sans-serif".to_string(),
            debug_borders: false,
            socket_path: "/ws".to_string(),
            clamped: false,
        }
    }
}

impl GameConfig {
    /// Parses overrides on top of the defaults, then bounds the board shape with
    /// `clamp_shape`.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let mut cfg: GameConfig = serde_json::from_str(raw)?;
        let requested = (cfg.rows, cfg.cols, cfg.sublevels);
        (cfg.rows, cfg.cols, cfg.sublevels) = clamp_shape(cfg.rows, cfg.cols, cfg.sublevels);
        cfg.clamped = requested != (cfg.rows, cfg.cols, cfg.sublevels);
        Ok(cfg)
    }

    pub fn pad(&self) -> Padding {
        Padding::uniform(self.padding)
    }

    /// `ws://host[:port]/path`, or `wss://` when the page itself is served over https.
    pub fn socket_url(&self, protocol: &str, hostname: &str, port: &str) -> String {
        let scheme = if protocol == "https:" { "wss" } else { "ws" };
        let port = if port.is_empty() { String::new() } else { format!(":{port}") };
        format!("{scheme}://{hostname}{port}{}", self.socket_path)
    }
}
