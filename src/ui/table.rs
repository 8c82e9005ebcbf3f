//! Table mode: one row per repository, newest release first.
//!
//! Rows for releases come first, in collection order, followed by a
//! "fetching" row for every configured repository that has not settled yet.

use std::collections::HashMap;

use anyhow::Result;

use super::frame::{draw_footer, draw_header, fit};
use super::state::{Mode, Movement, UiState};
use super::terminal::{Input, Style, TerminalRenderer};
use crate::github::RepoRef;
use crate::release::{CollectionView, PLACEHOLDER_TAG, Release};

pub const TITLE: &str = "GitHub Release Monitor";
pub const HELP: &str = "Up/Down or j/k: Navigate | Enter: View release | X: Exit";

const COLUMN_HEADER_ROW: u16 = 3;
/// Screen row of the first table row.
pub const FIRST_ROW: u16 = 4;
/// Rows used by title, column header and footer.
const CHROME_ROWS: usize = 7;

/// Number of table rows that fit in a terminal of `height` rows.
pub fn visible_rows(height: u16) -> usize {
    (height as usize).saturating_sub(CHROME_ROWS).max(1)
}

/// One line of the table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TableRow<'a> {
    Release(&'a Release),
    Fetching(&'a RepoRef),
}

/// Snapshot of everything the table displays.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableModel {
    releases: Vec<Release>,
    pending: Vec<RepoRef>,
}

impl TableModel {
    /// Builds rows from a collection view and the configured repositories.
    ///
    /// A repository is pending until a release or a failure has been recorded
    /// for it. Repositories listed twice need two settled entries.
    pub fn new(view: CollectionView, repos: &[RepoRef]) -> Self {
        let mut settled: HashMap<&RepoRef, usize> = HashMap::new();
        for repo in view.releases.iter().map(|r| &r.repo).chain(view.failed.iter()) {
            *settled.entry(repo).or_default() += 1;
        }

        let pending = repos
            .iter()
            .filter(|repo| match settled.get_mut(repo) {
                Some(count) if *count > 0 => {
                    *count -= 1;
                    false
                }
                _ => true,
            })
            .cloned()
            .collect();

        Self {
            releases: view.releases,
            pending,
        }
    }

    pub fn total_rows(&self) -> usize {
        self.releases.len() + self.pending.len()
    }

    /// Rows backed by a fetched release.
    pub fn fetched_rows(&self) -> usize {
        self.releases.len()
    }

    pub fn pending(&self) -> &[RepoRef] {
        &self.pending
    }

    /// Row at 0-based `index`.
    pub fn row(&self, index: usize) -> Option<TableRow<'_>> {
        if let Some(release) = self.releases.get(index) {
            return Some(TableRow::Release(release));
        }
        self.pending
            .get(index - self.releases.len())
            .map(TableRow::Fetching)
    }

    pub fn release(&self, index: usize) -> Option<&Release> {
        self.releases.get(index)
    }
}

/// What the UI loop must do after a table key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableAction {
    None,
    /// Selection moved inside the viewport; repaint just these 1-based rows
    RepaintRows { previous: usize, current: usize },
    /// The viewport scrolled; repaint every visible row
    RepaintAll,
    /// Open the release at this 0-based index (mode is already Detail)
    OpenDetail(usize),
    Quit,
}

/// Applies one input to the table state. `fetched` is the number of rows
/// backed by a release; only those can be opened.
pub fn handle_table_input(state: &mut UiState, input: Input, fetched: usize) -> TableAction {
    let previous = state.selected_row();

    let movement = match input {
        Input::Up | Input::Char('k') => state.move_up(),
        Input::Down | Input::Char('j') => state.move_down(),
        Input::Enter => {
            let row = state.selected_row();
            if (1..=fetched).contains(&row) {
                state.set_mode(Mode::Detail);
                return TableAction::OpenDetail(row - 1);
            }
            return TableAction::None;
        }
        Input::Char('x') | Input::Char('X') | Input::Interrupt => return TableAction::Quit,
        _ => return TableAction::None,
    };

    match movement {
        Movement::None => TableAction::None,
        Movement::Selection => TableAction::RepaintRows {
            previous,
            current: state.selected_row(),
        },
        Movement::Scrolled => TableAction::RepaintAll,
    }
}

fn columns(repo: &str, tag: &str, time: &str, kind: &str, windows: &str) -> String {
    format!(
        "{:<45} | {:<15} | {:<10} | {:<4} | {}",
        repo, tag, time, kind, windows
    )
}

/// Text of one row, before fitting to the screen.
pub fn format_row(row: &TableRow<'_>) -> String {
    match row {
        TableRow::Release(release) if release.is_placeholder() => {
            columns(&release.repo.to_string(), PLACEHOLDER_TAG, "", "", "")
        }
        TableRow::Release(release) => columns(
            &release.repo.to_string(),
            &release.tag_name,
            &release.time_difference,
            if release.prerelease { "Pre" } else { "" },
            if release.has_windows_asset { "Yes" } else { "No" },
        ),
        TableRow::Fetching(repo) => format!("{:<45} | fetching...", repo.to_string()),
    }
}

fn row_width<T: TerminalRenderer>(renderer: &T) -> usize {
    (renderer.dimensions().0 as usize).saturating_sub(2)
}

/// Paints the 1-based `row` if it is inside the viewport.
pub fn draw_row<T: TerminalRenderer>(
    renderer: &mut T,
    state: &UiState,
    model: &TableModel,
    row: usize,
) -> Result<()> {
    if !state.is_visible(row) {
        return Ok(());
    }
    let y = FIRST_ROW + (row - 1 - state.viewport_start()) as u16;
    let width = row_width(renderer);

    let Some(table_row) = model.row(row - 1) else {
        return renderer.write_at(1, y, &fit("", width), Style::Normal);
    };

    let style = if row == state.selected_row() {
        Style::Selected
    } else if matches!(table_row, TableRow::Fetching(_)) {
        Style::Muted
    } else {
        Style::Normal
    };
    renderer.write_at(1, y, &fit(&format_row(&table_row), width), style)
}

/// Paints every row of the viewport, blanking the unused ones.
pub fn draw_rows<T: TerminalRenderer>(
    renderer: &mut T,
    state: &UiState,
    model: &TableModel,
) -> Result<()> {
    let first = state.viewport_start() + 1;
    for row in first..first + state.visible_rows() {
        draw_row(renderer, state, model, row)?;
    }
    Ok(())
}

/// Paints the whole table screen: title, column header, rows and footer.
pub fn draw_table<T: TerminalRenderer>(
    renderer: &mut T,
    state: &UiState,
    model: &TableModel,
) -> Result<()> {
    let (_, height) = renderer.dimensions();
    let width = row_width(renderer);

    draw_header(renderer, TITLE)?;
    renderer.write_at(
        1,
        COLUMN_HEADER_ROW,
        &fit(&columns("Repository", "Tag", "Time", "Type", "Windows"), width),
        Style::Header,
    )?;
    draw_rows(renderer, state, model)?;

    // Gap between the last row and the footer
    let below = FIRST_ROW as usize + state.visible_rows();
    for y in below..(height as usize).saturating_sub(2) {
        renderer.write_at(1, y as u16, &fit("", width), Style::Normal)?;
    }

    draw_footer(renderer, HELP)
}
