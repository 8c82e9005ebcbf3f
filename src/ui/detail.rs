//! Detail mode: scrollable release notes of one release.

use anyhow::Result;
use chrono::Local;

use super::frame::{draw_footer, draw_header, fit};
use super::state::{Mode, UiState};
use super::terminal::{Input, Style, TerminalRenderer};
use crate::release::{NO_RELEASE_NOTES, Release};

pub const TITLE: &str = "Release Notes";
pub const HELP: &str = "Up/Down or j/k: Scroll | g/G: Top/Bottom | B/Esc: Back to table | X: Exit";
pub const NOTES_SEPARATOR: &str = "--- Release Notes ---";

/// Columns kept free around wrapped text.
const WRAP_MARGIN: usize = 8;
/// Rows used by title, scroll markers and footer.
const CHROME_ROWS: usize = 8;
const MORE_ABOVE_ROW: u16 = 3;
const FIRST_LINE_ROW: u16 = 4;
const TEXT_COL: u16 = 2;
/// Lines before the notes body: four header fields, blank, separator, blank.
const PREAMBLE_LINES: usize = 7;

/// Wrap width for a terminal `width` columns wide.
pub fn wrap_width(width: u16) -> usize {
    (width as usize).saturating_sub(WRAP_MARGIN).max(1)
}

/// Number of text lines shown in a terminal `height` rows tall.
pub fn visible_lines(height: u16) -> usize {
    (height as usize).saturating_sub(CHROME_ROWS).max(1)
}

/// Greedy word wrap of a single line.
///
/// Lines no longer than `width` are returned as is. Longer lines break at the
/// last space inside the window, or exactly at `width` when the window has no
/// space. One space after each break is dropped.
pub fn wrap_line(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= width {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut start = 0;
    while start < chars.len() {
        let end = start + width;
        if end >= chars.len() {
            lines.push(chars[start..].iter().collect());
            break;
        }

        let mut split = end;
        while split > start && chars[split] != ' ' {
            split -= 1;
        }
        if split == start {
            split = end;
        }

        lines.push(chars[start..split].iter().collect());
        start = split;
        if chars.get(start) == Some(&' ') {
            start += 1;
        }
    }
    lines
}

/// Display lines for `release`: header fields, separator, wrapped notes.
pub fn page_lines(release: &Release, width: usize) -> Vec<String> {
    let created = if !release.has_known_date() {
        "-".to_string()
    } else {
        format!(
            "{} ({})",
            release
                .created_at
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S"),
            release.time_difference
        )
    };

    let mut lines = vec![
        format!("Owner: {}", release.repo.owner),
        format!("Repo: {}", release.repo.name),
        format!("Tag: {}", release.tag_name),
        format!("Created At: {}", created),
        String::new(),
        NOTES_SEPARATOR.to_string(),
        String::new(),
    ];

    let body = if release.body.is_empty() {
        NO_RELEASE_NOTES
    } else {
        release.body.as_str()
    };
    for raw in body.split('\n') {
        let line = raw.trim_end_matches('\r').replace('\t', "    ");
        if line.is_empty() {
            lines.push(String::new());
        } else {
            lines.extend(wrap_line(&line, width));
        }
    }
    lines
}

/// Pre-wrapped notes of one release plus the scroll position.
///
/// `scroll_offset` stays within `[0, max(0, line_count - visible_lines)]`.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailPage {
    release: Release,
    lines: Vec<String>,
    scroll_offset: usize,
    visible_lines: usize,
}

impl DetailPage {
    /// Lays out `release` for a `width` x `height` terminal.
    pub fn build(release: &Release, width: u16, height: u16) -> Self {
        Self {
            release: release.clone(),
            lines: page_lines(release, wrap_width(width)),
            scroll_offset: 0,
            visible_lines: visible_lines(height),
        }
    }

    /// Re-wraps for new terminal dimensions, keeping the offset in range.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.lines = page_lines(&self.release, wrap_width(width));
        self.visible_lines = visible_lines(height);
        self.scroll_offset = self.scroll_offset.min(self.max_offset());
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn visible_lines(&self) -> usize {
        self.visible_lines
    }

    pub fn max_offset(&self) -> usize {
        self.lines.len().saturating_sub(self.visible_lines)
    }

    pub fn scroll_down(&mut self) -> bool {
        if self.scroll_offset + self.visible_lines < self.lines.len() {
            self.scroll_offset += 1;
            true
        } else {
            false
        }
    }

    pub fn scroll_up(&mut self) -> bool {
        if self.scroll_offset > 0 {
            self.scroll_offset -= 1;
            true
        } else {
            false
        }
    }

    pub fn scroll_to_top(&mut self) -> bool {
        let moved = self.scroll_offset != 0;
        self.scroll_offset = 0;
        moved
    }

    pub fn scroll_to_bottom(&mut self) -> bool {
        let bottom = self.max_offset();
        let moved = self.scroll_offset != bottom;
        self.scroll_offset = bottom;
        moved
    }

    /// Lines currently in the viewport, with their absolute index.
    pub fn visible(&self) -> impl Iterator<Item = (usize, &str)> {
        self.lines
            .iter()
            .enumerate()
            .skip(self.scroll_offset)
            .take(self.visible_lines)
            .map(|(i, line)| (i, line.as_str()))
    }
}

/// What the UI loop must do after a detail key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailAction {
    None,
    Repaint,
    /// Back to the table (mode is already Table)
    Back,
    Quit,
}

pub fn handle_detail_input(state: &mut UiState, page: &mut DetailPage, input: Input) -> DetailAction {
    let moved = match input {
        Input::Down | Input::Char('j') => page.scroll_down(),
        Input::Up | Input::Char('k') => page.scroll_up(),
        Input::Char('g') => page.scroll_to_top(),
        Input::Char('G') => page.scroll_to_bottom(),
        Input::Char('b') | Input::Char('B') | Input::Escape => {
            state.set_mode(Mode::Table);
            return DetailAction::Back;
        }
        Input::Char('x') | Input::Char('X') | Input::Interrupt => return DetailAction::Quit,
        _ => false,
    };

    if moved {
        DetailAction::Repaint
    } else {
        DetailAction::None
    }
}

fn line_style(index: usize) -> Style {
    if index < 4 || index == PREAMBLE_LINES - 2 {
        Style::Header
    } else {
        Style::Normal
    }
}

/// Paints the page. `full` also clears the screen and redraws the chrome.
pub fn draw_detail<T: TerminalRenderer>(renderer: &mut T, page: &DetailPage, full: bool) -> Result<()> {
    let (width, height) = renderer.dimensions();
    let text_width = (width as usize).saturating_sub(TEXT_COL as usize);

    if full {
        renderer.clear_screen()?;
        draw_header(renderer, TITLE)?;
        draw_footer(renderer, HELP)?;
    }

    let mut row = FIRST_LINE_ROW;
    for (index, line) in page.visible() {
        renderer.write_at(TEXT_COL, row, &fit(line, text_width), line_style(index))?;
        row += 1;
    }
    while (row as usize) < FIRST_LINE_ROW as usize + page.visible_lines() {
        renderer.write_at(TEXT_COL, row, &fit("", text_width), Style::Normal)?;
        row += 1;
    }

    let marker = " [MORE] ";
    let marker_col = (width as usize).saturating_sub(marker.len()) / 2;
    let more_below_row = height.saturating_sub(3);
    let has_more_below = page.scroll_offset() + page.visible_lines() < page.line_count();
    for (marker_row, shown) in [
        (MORE_ABOVE_ROW, page.scroll_offset() > 0),
        (more_below_row, has_more_below),
    ] {
        let text = if shown { marker.to_string() } else { fit("", marker.len()) };
        renderer.write_at(marker_col as u16, marker_row, &text, Style::Header)?;
    }
    Ok(())
}
