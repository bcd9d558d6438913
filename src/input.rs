//! Input normalization and click hit-testing.
//!
//! DOM keyboard and mouse events are turned into [`InputEvent`]s in `main.rs`;
//! renderers register [`ClickTarget`]s every frame so a tap can be mapped back
//! to a semantic action ID.

use ratzilla::ratatui::layout::Rect;

/// Layouts narrower than this stack their panels vertically.
pub const NARROW_BREAKPOINT: u16 = 60;

/// Keyboard, mouse and touch input, normalized.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A printable character.
    Key(char),
    /// A click/tap on a registered target, identified by its action ID.
    Click(u16),
    Enter,
    Backspace,
    Escape,
}

/// A rectangle (in terminal cells) bound to an action ID.
#[derive(Debug, Clone)]
pub struct ClickTarget {
    pub rect: Rect,
    pub action_id: u16,
}

/// Shared between the render loop (writes targets) and the mouse handler
/// (reads them).
pub struct ClickState {
    pub targets: Vec<ClickTarget>,
    pub terminal_cols: u16,
    pub terminal_rows: u16,
}

impl ClickState {
    pub fn new() -> Self {
        Self {
            targets: Vec::new(),
            terminal_cols: 0,
            terminal_rows: 0,
        }
    }

    /// Called at the start of every frame; targets only live for one frame.
    pub fn begin_frame(&mut self, cols: u16, rows: u16) {
        self.terminal_cols = cols;
        self.terminal_rows = rows;
        self.targets.clear();
    }

    pub fn add_click_target(&mut self, rect: Rect, action_id: u16) {
        if rect.width > 0 && rect.height > 0 {
            self.targets.push(ClickTarget { rect, action_id });
        }
    }

    /// Full-width single-row target, ignored if `row` falls outside `area`.
    pub fn add_row_target(&mut self, area: Rect, row: u16, action_id: u16) {
        if row >= area.y && row < area.y + area.height {
            self.add_click_target(Rect::new(area.x, row, area.width, 1), action_id);
        }
    }

    /// Action at a cell. Later targets sit on top of earlier ones, so popups
    /// registered after the screen beneath them win.
    pub fn hit_test(&self, col: u16, row: u16) -> Option<u16> {
        self.targets.iter().rev().find_map(|t| {
            let r = &t.rect;
            let inside = col >= r.x && col < r.x + r.width && row >= r.y && row < r.y + r.height;
            inside.then_some(t.action_id)
        })
    }

    pub fn has_size(&self) -> bool {
        self.terminal_cols > 0 && self.terminal_rows > 0
    }
}

pub fn is_narrow_layout(width: u16) -> bool {
    width < NARROW_BREAKPOINT
}

/// Convert a pixel Y offset inside the grid container to a terminal row.
/// `None` when outside the grid or when the grid has no size yet.
pub fn pixel_y_to_row(click_y: f64, grid_height: f64, terminal_rows: u16) -> Option<u16> {
    pixel_to_cell(click_y, grid_height, terminal_rows)
}

/// Convert a pixel X offset inside the grid container to a terminal column.
pub fn pixel_x_to_col(click_x: f64, grid_width: f64, terminal_cols: u16) -> Option<u16> {
    pixel_to_cell(click_x, grid_width, terminal_cols)
}

fn pixel_to_cell(offset: f64, extent: f64, cells: u16) -> Option<u16> {
    if extent <= 0.0 || cells == 0 || offset < 0.0 {
        return None;
    }
    let cell = (offset / (extent / cells as f64)) as u16;
    (cell < cells).then_some(cell)
}
