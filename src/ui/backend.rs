//! Crossterm implementation of [`TerminalRenderer`].

use std::io::{self, Stdout, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{
        self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode,
        enable_raw_mode,
    },
};
use log::{debug, warn};

use super::terminal::{Input, Style, TerminalRenderer};
use crate::error::MonitorError;

const WINDOW_TITLE: &str = "GitHub Release Monitor";

/// Raw-mode alternate-screen terminal on stdout.
///
/// The terminal is restored when the renderer is dropped.
pub struct CrosstermRenderer {
    out: Stdout,
    size: (u16, u16),
}

impl CrosstermRenderer {
    /// Switches the terminal into dashboard mode.
    ///
    /// Fails with [`MonitorError::UiInit`] when stdout is not a usable
    /// terminal; anything already enabled is undone first.
    pub fn init() -> Result<Self> {
        enable_raw_mode().map_err(|e| MonitorError::UiInit(e.to_string()))?;
        debug!("Enabled raw mode");

        let mut out = io::stdout();
        if let Err(e) = execute!(out, EnterAlternateScreen, Hide, SetTitle(WINDOW_TITLE)) {
            let _ = restore_terminal();
            return Err(MonitorError::UiInit(e.to_string()).into());
        }

        let size = match terminal::size() {
            Ok(size) => size,
            Err(e) => {
                let _ = restore_terminal();
                return Err(MonitorError::UiInit(e.to_string()).into());
            }
        };
        debug!("Terminal size: {}x{}", size.0, size.1);

        Ok(Self { out, size })
    }
}

impl Drop for CrosstermRenderer {
    fn drop(&mut self) {
        if let Err(e) = restore_terminal() {
            warn!("Failed to restore terminal: {}", e);
        }
    }
}

/// Leaves the alternate screen and raw mode. Safe to call more than once.
pub fn restore_terminal() -> io::Result<()> {
    let mut out = io::stdout();
    execute!(out, ResetColor, Show, LeaveAlternateScreen)?;
    disable_raw_mode()
}

/// Translates a key press into dashboard input.
pub fn map_key(key: KeyEvent) -> Option<Input> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('C') | KeyCode::Char('q') | KeyCode::Char('Q') => {
                Some(Input::Interrupt)
            }
            _ => None,
        };
    }

    match key.code {
        KeyCode::Up => Some(Input::Up),
        KeyCode::Down => Some(Input::Down),
        KeyCode::Enter => Some(Input::Enter),
        KeyCode::Esc => Some(Input::Escape),
        KeyCode::Char(c) => Some(Input::Char(c)),
        _ => None,
    }
}

fn apply_style(out: &mut Stdout, style: Style) -> io::Result<()> {
    match style {
        Style::Normal => Ok(()),
        Style::Header => queue!(
            out,
            SetForegroundColor(Color::Green),
            SetAttribute(Attribute::Bold)
        ),
        Style::Selected => queue!(
            out,
            SetForegroundColor(Color::White),
            SetBackgroundColor(Color::Blue)
        ),
        Style::Muted => queue!(out, SetForegroundColor(Color::DarkGrey)),
    }
}

impl TerminalRenderer for CrosstermRenderer {
    fn clear_screen(&mut self) -> Result<()> {
        queue!(self.out, ResetColor, Clear(ClearType::All)).context("Failed to clear screen")
    }

    fn write_at(&mut self, col: u16, row: u16, text: &str, style: Style) -> Result<()> {
        let (width, height) = self.size;
        if row >= height || col >= width {
            return Ok(());
        }
        let text: String = text.chars().take((width - col) as usize).collect();

        queue!(self.out, MoveTo(col, row))?;
        apply_style(&mut self.out, style)?;
        queue!(
            self.out,
            Print(text),
            SetAttribute(Attribute::Reset),
            ResetColor
        )
        .context("Failed to write to terminal")
    }

    fn dimensions(&self) -> (u16, u16) {
        self.size
    }

    fn read_key(&mut self) -> Result<Option<Input>> {
        while event::poll(Duration::ZERO).context("Failed to poll terminal events")? {
            match event::read().context("Failed to read terminal event")? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if let Some(input) = map_key(key) {
                        return Ok(Some(input));
                    }
                }
                Event::Resize(width, height) => {
                    self.size = (width, height);
                    return Ok(Some(Input::Resize));
                }
                _ => {}
            }
        }
        Ok(None)
    }

    fn flush(&mut self) -> Result<()> {
        self.out.flush().context("Failed to flush terminal")
    }
}
