//! Game trait: the seam between the browser loop in `main.rs` and a game.

pub mod escape;

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::input::{ClickState, InputEvent};

pub trait Game {
    /// Handle an input event. Returns true if the event was consumed.
    fn handle_input(&mut self, event: &InputEvent) -> bool;

    /// Advance game logic by `delta_ticks` discrete ticks.
    fn tick(&mut self, delta_ticks: u32);

    /// Whether the game currently wants ticks. The frame loop pauses its
    /// clock while this is false.
    fn is_ticking(&self) -> bool;

    /// Render the game into the given area.
    fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>);
}

/// Build the escape room from its bundled content.
pub fn create_game() -> Result<Box<dyn Game>, escape::catalog::CatalogError> {
    let content = escape::content::load()?;
    Ok(Box::new(escape::EscapeGame::new(content)))
}
