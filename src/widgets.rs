//! Clickable UI building blocks.
//!
//! [`ClickableList`] collects the lines of a panel and remembers which ones are
//! buttons, so the click rows always follow the rendered layout.

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::text::Line;
use ratzilla::ratatui::widgets::{Paragraph, Wrap};

use crate::input::ClickState;

/// Lines for a `Paragraph`, some of them bound to an action ID.
///
/// ```ignore
/// let mut cl = ClickableList::new();
/// cl.push(Line::from("Hotspots"));
/// cl.push_clickable(Line::from(" [1] Bookshelf"), HOTSPOT_BASE);
/// cl.register_targets(block.inner(area), &mut cs, true);
/// f.render_widget(Paragraph::new(cl.into_lines()).block(block).wrap(..), area);
/// ```
pub struct ClickableList<'a> {
    lines: Vec<Line<'a>>,
    /// `(line index, action id)`
    actions: Vec<(usize, u16)>,
}

impl<'a> ClickableList<'a> {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            actions: Vec::new(),
        }
    }

    pub fn push(&mut self, line: impl Into<Line<'a>>) {
        self.lines.push(line.into());
    }

    pub fn push_clickable(&mut self, line: impl Into<Line<'a>>, action_id: u16) {
        self.actions.push((self.lines.len(), action_id));
        self.lines.push(line.into());
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn into_lines(self) -> Vec<Line<'a>> {
        self.lines
    }

    /// Visual rows each line occupies inside `width` columns. Wrapped lines
    /// are measured by ratatui itself, so word breaks match the render.
    fn row_heights(&self, width: u16, wrap: bool) -> Vec<u16> {
        let width = width.max(1);
        self.lines
            .iter()
            .map(|line| {
                if !wrap || line.width() <= width as usize {
                    1
                } else {
                    Paragraph::new(line.clone())
                        .wrap(Wrap { trim: false })
                        .line_count(width)
                        .max(1) as u16
                }
            })
            .collect()
    }

    /// Total rows the list takes when rendered `width` columns wide.
    pub fn visual_height(&self, width: u16, wrap: bool) -> u16 {
        self.row_heights(width, wrap)
            .into_iter()
            .fold(0u16, u16::saturating_add)
    }

    /// Register a target for every visual row of every clickable line.
    ///
    /// `inner` is the content area (inside any borders). Pass `wrap = true`
    /// when the paragraph is rendered with `Wrap`, so long lines push the
    /// following buttons down.
    pub fn register_targets(&self, inner: Rect, cs: &mut ClickState, wrap: bool) {
        let heights = self.row_heights(inner.width, wrap);
        let mut starts = Vec::with_capacity(heights.len());
        let mut row = 0u16;
        for h in &heights {
            starts.push(row);
            row = row.saturating_add(*h);
        }

        for &(idx, action_id) in &self.actions {
            for offset in 0..heights[idx] {
                let screen_row = inner.y.saturating_add(starts[idx] + offset);
                cs.add_row_target(inner, screen_row, action_id);
            }
        }
    }
}
