//! Character-cell rendering capability used by the dashboard.

use anyhow::Result;

/// Decoded user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Up,
    Down,
    Enter,
    Escape,
    Char(char),
    /// Ctrl-C / Ctrl-Q
    Interrupt,
    /// The terminal was resized; [`TerminalRenderer::dimensions`] is current.
    Resize,
}

/// Visual style of a run of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Style {
    #[default]
    Normal,
    Header,
    Selected,
    /// Rows that are still loading
    Muted,
}

/// A terminal the dashboard can draw on and read keys from.
///
/// Coordinates are zero-based `(col, row)`. Output may be buffered until
/// [`flush`](TerminalRenderer::flush).
pub trait TerminalRenderer {
    fn clear_screen(&mut self) -> Result<()>;
    fn write_at(&mut self, col: u16, row: u16, text: &str, style: Style) -> Result<()>;
    /// `(width, height)` in cells.
    fn dimensions(&self) -> (u16, u16);
    /// Next pending input, without blocking.
    fn read_key(&mut self) -> Result<Option<Input>>;
    fn flush(&mut self) -> Result<()>;
}
