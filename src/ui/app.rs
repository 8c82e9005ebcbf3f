//! The UI loop: owns the renderer and the dashboard state, dispatches input
//! to the table or detail controller and repaints on request.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use log::debug;

use super::detail::{DetailAction, DetailPage, draw_detail, handle_detail_input};
use super::state::{Mode, UiState};
use super::table::{
    TableAction, TableModel, draw_row, draw_rows, draw_table, handle_table_input, visible_rows,
};
use super::terminal::{Input, TerminalRenderer};
use crate::github::RepoRef;
use crate::release::ReleaseCollection;
use crate::signals::{RedrawSignal, RunFlag};

/// Delay between input polls.
pub const POLL_INTERVAL: Duration = Duration::from_millis(10);

pub struct App<T: TerminalRenderer> {
    renderer: T,
    collection: Arc<ReleaseCollection>,
    repos: Vec<RepoRef>,
    running: RunFlag,
    redraw: RedrawSignal,
    state: UiState,
    model: TableModel,
    detail: Option<DetailPage>,
}

impl<T: TerminalRenderer> App<T> {
    pub fn new(
        renderer: T,
        collection: Arc<ReleaseCollection>,
        repos: Vec<RepoRef>,
        running: RunFlag,
        redraw: RedrawSignal,
    ) -> Self {
        let (_, height) = renderer.dimensions();
        Self {
            renderer,
            collection,
            repos,
            running,
            redraw,
            state: UiState::new(0, visible_rows(height)),
            model: TableModel::default(),
            detail: None,
        }
    }

    /// Blocks until the run flag is cleared.
    pub fn run(&mut self) -> Result<()> {
        self.start()?;
        while self.running.is_running() {
            self.step()?;
            thread::sleep(POLL_INTERVAL);
        }
        debug!("UI loop finished");
        Ok(())
    }

    /// Paints the first frame.
    pub fn start(&mut self) -> Result<()> {
        self.redraw_table(true)?;
        self.renderer.flush()
    }

    /// One loop iteration: pending redraw, then at most one input.
    ///
    /// Redraw requests are left pending while the detail page is open.
    pub fn step(&mut self) -> Result<()> {
        if self.state.mode() == Mode::Table && self.redraw.take() {
            self.redraw_table(false)?;
        }
        if let Some(input) = self.renderer.read_key()? {
            self.handle_input(input)?;
        }
        self.renderer.flush()
    }

    pub fn handle_input(&mut self, input: Input) -> Result<()> {
        if input == Input::Resize {
            return self.on_resize();
        }
        match self.state.mode() {
            Mode::Table => self.handle_table(input),
            Mode::Detail => self.handle_detail(input),
        }
    }

    fn handle_table(&mut self, input: Input) -> Result<()> {
        match handle_table_input(&mut self.state, input, self.model.fetched_rows()) {
            TableAction::None => Ok(()),
            TableAction::RepaintRows { previous, current } => {
                draw_row(&mut self.renderer, &self.state, &self.model, previous)?;
                draw_row(&mut self.renderer, &self.state, &self.model, current)
            }
            TableAction::RepaintAll => draw_rows(&mut self.renderer, &self.state, &self.model),
            TableAction::OpenDetail(index) => {
                let Some(release) = self.model.release(index) else {
                    self.state.set_mode(Mode::Table);
                    return Ok(());
                };
                let (width, height) = self.renderer.dimensions();
                debug!("Opening release notes of {}", release.repo);
                let page = DetailPage::build(release, width, height);
                draw_detail(&mut self.renderer, &page, true)?;
                self.detail = Some(page);
                Ok(())
            }
            TableAction::Quit => {
                self.running.stop();
                Ok(())
            }
        }
    }

    fn handle_detail(&mut self, input: Input) -> Result<()> {
        let Some(page) = self.detail.as_mut() else {
            self.state.set_mode(Mode::Table);
            return self.redraw_table(true);
        };

        match handle_detail_input(&mut self.state, page, input) {
            DetailAction::None => Ok(()),
            DetailAction::Repaint => draw_detail(&mut self.renderer, page, false),
            DetailAction::Back => {
                self.detail = None;
                // The full redraw below covers any request made meanwhile
                self.redraw.take();
                self.redraw_table(true)
            }
            DetailAction::Quit => {
                self.running.stop();
                Ok(())
            }
        }
    }

    fn on_resize(&mut self) -> Result<()> {
        let (width, height) = self.renderer.dimensions();
        debug!("Terminal resized to {}x{}", width, height);
        if self.state.mode() == Mode::Detail {
            if let Some(page) = self.detail.as_mut() {
                page.resize(width, height);
                return draw_detail(&mut self.renderer, page, true);
            }
        }
        self.redraw_table(true)
    }

    /// Rebuilds the table from a fresh snapshot and paints it.
    fn redraw_table(&mut self, clear: bool) -> Result<()> {
        let (_, height) = self.renderer.dimensions();
        self.model = TableModel::new(self.collection.view(), &self.repos);
        self.state.set_total_rows(self.model.total_rows());
        self.state.set_visible_rows(visible_rows(height));

        if clear {
            self.renderer.clear_screen()?;
        }
        draw_table(&mut self.renderer, &self.state, &self.model)
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn renderer(&self) -> &T {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut T {
        &mut self.renderer
    }
}
