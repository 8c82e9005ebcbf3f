//! Terminal dashboard: a release table and a release-notes page.

mod app;
mod backend;
pub mod detail;
mod frame;
mod state;
pub mod table;
mod terminal;

pub use app::{App, POLL_INTERVAL};
pub use backend::{CrosstermRenderer, map_key, restore_terminal};
pub use state::{Mode, Movement, UiState};
pub use terminal::{Input, Style, TerminalRenderer};
