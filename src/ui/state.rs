//! Selection and viewport state of the dashboard.

/// Which controller receives input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Table,
    Detail,
}

/// Effect of a selection move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    /// Already at the edge
    None,
    /// Selection moved within the viewport
    Selection,
    /// Selection moved and the viewport followed it
    Scrolled,
}

/// Owned by the UI loop. `selected_row` is 1-based and always within
/// `[1, max(1, total_rows)]`; `viewport_start` is the 0-based index of the
/// first visible row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiState {
    selected_row: usize,
    viewport_start: usize,
    mode: Mode,
    total_rows: usize,
    visible_rows: usize,
}

impl UiState {
    pub fn new(total_rows: usize, visible_rows: usize) -> Self {
        let mut state = Self {
            selected_row: 1,
            viewport_start: 0,
            mode: Mode::Table,
            total_rows,
            visible_rows: visible_rows.max(1),
        };
        state.clamp();
        state
    }

    pub fn selected_row(&self) -> usize {
        self.selected_row
    }

    pub fn viewport_start(&self) -> usize {
        self.viewport_start
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    pub fn total_rows(&self) -> usize {
        self.total_rows
    }

    pub fn visible_rows(&self) -> usize {
        self.visible_rows
    }

    /// Whether the 1-based `row` is inside the viewport.
    pub fn is_visible(&self, row: usize) -> bool {
        row > self.viewport_start && row <= self.viewport_start + self.visible_rows
    }

    pub fn move_up(&mut self) -> Movement {
        if self.selected_row <= 1 {
            return Movement::None;
        }
        self.selected_row -= 1;
        if self.selected_row <= self.viewport_start {
            self.viewport_start = self.selected_row - 1;
            Movement::Scrolled
        } else {
            Movement::Selection
        }
    }

    pub fn move_down(&mut self) -> Movement {
        if self.selected_row >= self.total_rows {
            return Movement::None;
        }
        self.selected_row += 1;
        if self.selected_row > self.viewport_start + self.visible_rows {
            self.viewport_start = self.selected_row - self.visible_rows;
            Movement::Scrolled
        } else {
            Movement::Selection
        }
    }

    pub fn set_total_rows(&mut self, total_rows: usize) {
        self.total_rows = total_rows;
        self.clamp();
    }

    pub fn set_visible_rows(&mut self, visible_rows: usize) {
        self.visible_rows = visible_rows.max(1);
        self.clamp();
    }

    fn clamp(&mut self) {
        self.selected_row = self.selected_row.clamp(1, self.total_rows.max(1));

        // Don't leave blank rows at the bottom when rows above are hidden
        let last_start = self.total_rows.saturating_sub(self.visible_rows);
        self.viewport_start = self.viewport_start.min(last_start);

        if self.selected_row <= self.viewport_start {
            self.viewport_start = self.selected_row - 1;
        } else if self.selected_row > self.viewport_start + self.visible_rows {
            self.viewport_start = self.selected_row - self.visible_rows;
        }
    }
}
