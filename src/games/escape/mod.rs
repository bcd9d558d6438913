//! Escape Room. Find the items, read the clues, enter the code before time
//! runs out.
//!
//! `EscapeGame` is the presentation adapter: it maps keys and clicks onto
//! [`GameSession`] calls and owns the code-entry text field. All game rules
//! live in `session`.

pub mod actions;
pub mod catalog;
pub mod content;
pub mod notify;
pub mod render;
pub mod session;

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::console;
use crate::games::Game;
use crate::input::{ClickState, InputEvent};

use actions::*;
use catalog::{HotspotAction, HotspotTable};
use content::Content;
use session::{GameSession, Phase};

/// Longest code the prompt accepts.
pub const MAX_CODE_LEN: usize = 16;

/// Hotspots reachable with the `1`-`9` keys.
const KEYED_HOTSPOTS: usize = 9;

pub struct EscapeGame {
    session: GameSession,
    hotspots: HotspotTable,
    code_input: String,
}

impl EscapeGame {
    pub fn new(content: Content) -> Self {
        for room in 0..content.hotspots.room_count() {
            let count = content.hotspots.for_room(room).len();
            if count > KEYED_HOTSPOTS {
                let name = content.rooms.get(room).map_or("?", |r| r.name.as_str());
                console::warn(&format!(
                    "escape: {name} has {count} hotspots, only the first {KEYED_HOTSPOTS} have number keys"
                ));
            }
        }
        Self {
            session: GameSession::new(content.rooms),
            hotspots: content.hotspots,
            code_input: String::new(),
        }
    }

    /// Run the hotspot at `index` in the current room.
    fn activate_hotspot(&mut self, index: usize) -> bool {
        let room = self.session.current_room_index();
        let Some(spot) = self.hotspots.for_room(room).get(index) else {
            return false;
        };
        match spot.action.clone() {
            HotspotAction::Collect { item } => {
                self.session.collect_item(item);
            }
            HotspotAction::Discover { clue } => {
                self.session.discover_clue(clue);
            }
        }
        true
    }

    fn submit(&mut self) -> bool {
        let code = std::mem::take(&mut self.code_input);
        self.session.submit_code(&code);
        true
    }

    fn cancel(&mut self) -> bool {
        self.code_input.clear();
        self.session.cancel_code();
        true
    }

    fn start(&mut self) -> bool {
        self.code_input.clear();
        self.session.start();
        true
    }

    fn reset(&mut self) -> bool {
        self.code_input.clear();
        self.session.reset();
        true
    }

    // ── Dispatch ───────────────────────────────────────────────

    fn handle_notice(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::Enter | InputEvent::Key(' ') | InputEvent::Click(DISMISS_NOTICE) => {
                self.session.notifications_mut().pop();
                true
            }
            // Esc closes the whole stack.
            InputEvent::Escape => {
                self.session.notifications_mut().drain();
                true
            }
            _ => false,
        }
    }

    fn handle_title(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::Key('s') | InputEvent::Key('S') | InputEvent::Enter => self.start(),
            InputEvent::Click(START_GAME) => self.start(),
            _ => false,
        }
    }

    fn handle_game_over(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::Key('r') | InputEvent::Key('R') | InputEvent::Enter => self.reset(),
            InputEvent::Click(PLAY_AGAIN) => self.reset(),
            _ => false,
        }
    }

    fn handle_code_prompt(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::Key(c) if !c.is_control() => {
                if self.code_input.chars().count() < MAX_CODE_LEN {
                    self.code_input.push(*c);
                }
                true
            }
            InputEvent::Backspace => {
                self.code_input.pop();
                true
            }
            InputEvent::Enter | InputEvent::Click(SUBMIT_CODE) => self.submit(),
            InputEvent::Escape | InputEvent::Click(CANCEL_CODE) => self.cancel(),
            _ => false,
        }
    }

    fn handle_room(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::Key(c @ '1'..='9') => {
                let index = (*c as u8 - b'1') as usize;
                self.activate_hotspot(index)
            }
            InputEvent::Key('e') | InputEvent::Key('E') | InputEvent::Click(ATTEMPT_ESCAPE) => {
                self.session.attempt_escape();
                true
            }
            InputEvent::Click(id) if (HOTSPOT_BASE..HOTSPOT_BASE + MAX_HOTSPOTS).contains(id) => {
                self.activate_hotspot((id - HOTSPOT_BASE) as usize)
            }
            _ => false,
        }
    }
}

impl Game for EscapeGame {
    fn handle_input(&mut self, event: &InputEvent) -> bool {
        // A visible toast is modal.
        if !self.session.notifications().is_empty() {
            return self.handle_notice(event);
        }

        match self.session.phase() {
            Phase::NotStarted => self.handle_title(event),
            Phase::Won | Phase::Lost => self.handle_game_over(event),
            Phase::Playing if self.session.awaiting_code() => self.handle_code_prompt(event),
            Phase::Playing => self.handle_room(event),
        }
    }

    fn tick(&mut self, delta_ticks: u32) {
        for _ in 0..delta_ticks {
            self.session.tick();
        }
        if !self.session.awaiting_code() {
            self.code_input.clear();
        }
    }

    fn is_ticking(&self) -> bool {
        self.session.phase() == Phase::Playing
    }

    fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        render::render(&self.session, &self.hotspots, &self.code_input, f, area, click_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game() -> EscapeGame {
        EscapeGame::new(content::load().unwrap())
    }

    fn press(g: &mut EscapeGame, events: &[InputEvent]) {
        for e in events {
            g.handle_input(e);
        }
    }

    fn type_code(g: &mut EscapeGame, code: &str) {
        for c in code.chars() {
            g.handle_input(&InputEvent::Key(c));
        }
    }

    fn dismiss_all(g: &mut EscapeGame) {
        while !g.session.notifications().is_empty() {
            g.handle_input(&InputEvent::Enter);
        }
    }

    /// Start and collect every required item of the current room.
    fn collect_all(g: &mut EscapeGame) {
        let room = g.session.current_room_index();
        for i in 0..g.hotspots.for_room(room).len() {
            g.handle_input(&InputEvent::Click(HOTSPOT_BASE + i as u16));
            dismiss_all(g);
        }
    }

    #[test]
    fn title_screen_starts_game() {
        let mut g = game();
        assert!(!g.handle_input(&InputEvent::Key('e')));
        assert_eq!(g.session.phase(), Phase::NotStarted);
        assert!(g.handle_input(&InputEvent::Click(START_GAME)));
        assert_eq!(g.session.phase(), Phase::Playing);
        assert!(g.is_ticking());
    }

    #[test]
    fn hotspot_keys_collect_and_toast_is_modal() {
        let mut g = game();
        press(&mut g, &[InputEvent::Key('s'), InputEvent::Key('1')]);
        assert!(g.session.has_item("key"));
        assert_eq!(g.session.notifications().len(), 1);

        // Toast open: hotspot key is swallowed.
        assert!(!g.handle_input(&InputEvent::Key('4')));
        assert!(!g.session.has_item("code"));

        assert!(g.handle_input(&InputEvent::Click(DISMISS_NOTICE)));
        assert!(g.session.notifications().is_empty());
        g.handle_input(&InputEvent::Key('4'));
        assert!(g.session.has_item("code"));
    }

    #[test]
    fn clue_hotspot_discovers() {
        let mut g = game();
        press(&mut g, &[InputEvent::Enter, InputEvent::Key('2')]);
        assert_eq!(g.session.clues().len(), 1);
        assert_eq!(g.session.clues()[0].id, "desk-note");
    }

    #[test]
    fn escape_dismisses_all_pending_notices() {
        let mut g = game();
        g.handle_input(&InputEvent::Enter);
        g.session.notifications_mut().push(notify::Notification::new(
            notify::NoticeKind::ItemFound,
            "a",
            "a",
        ));
        g.session.notifications_mut().push(notify::Notification::new(
            notify::NoticeKind::ItemFound,
            "b",
            "b",
        ));
        assert!(g.handle_input(&InputEvent::Key(' ')));
        assert_eq!(g.session.notifications().len(), 1);
        assert!(g.handle_input(&InputEvent::Escape));
        assert!(g.session.notifications().is_empty());
        // Escape on the room screen itself does nothing.
        assert!(!g.handle_input(&InputEvent::Escape));
    }

    #[test]
    fn unknown_hotspot_index_ignored() {
        let mut g = game();
        g.handle_input(&InputEvent::Enter);
        assert!(!g.handle_input(&InputEvent::Key('9')));
        assert!(!g.handle_input(&InputEvent::Click(HOTSPOT_BASE + 7)));
        assert!(g.session.inventory().is_empty());
    }

    #[test]
    fn escape_without_items_shows_missing() {
        let mut g = game();
        press(&mut g, &[InputEvent::Enter, InputEvent::Key('e')]);
        assert!(!g.session.awaiting_code());
        let n = g.session.notifications().front().unwrap();
        assert_eq!(n.body, "You need: key, code");
    }

    #[test]
    fn code_prompt_typing_and_backspace() {
        let mut g = game();
        g.handle_input(&InputEvent::Enter);
        collect_all(&mut g);
        g.handle_input(&InputEvent::Click(ATTEMPT_ESCAPE));
        assert!(g.session.awaiting_code());

        type_code(&mut g, "18x");
        g.handle_input(&InputEvent::Backspace);
        type_code(&mut g, "47");
        assert_eq!(g.code_input, "1847");

        // Hotspot digits go to the prompt, not the room.
        assert_eq!(g.session.clues().len(), 2);

        g.handle_input(&InputEvent::Enter);
        assert_eq!(g.session.current_room_index(), 1);
        assert!(g.code_input.is_empty());
        assert_eq!(g.session.time_remaining(), 420);
    }

    #[test]
    fn code_length_is_capped() {
        let mut g = game();
        g.handle_input(&InputEvent::Enter);
        collect_all(&mut g);
        g.handle_input(&InputEvent::Key('e'));
        type_code(&mut g, &"9".repeat(40));
        assert_eq!(g.code_input.chars().count(), MAX_CODE_LEN);
    }

    #[test]
    fn wrong_code_then_cancel() {
        let mut g = game();
        g.handle_input(&InputEvent::Enter);
        collect_all(&mut g);
        g.handle_input(&InputEvent::Key('e'));
        type_code(&mut g, "wrong");
        g.handle_input(&InputEvent::Click(SUBMIT_CODE));
        assert!(!g.session.awaiting_code());
        assert_eq!(g.session.notifications().front().unwrap().title, "Wrong Code");
        dismiss_all(&mut g);

        g.handle_input(&InputEvent::Key('e'));
        type_code(&mut g, "18");
        g.handle_input(&InputEvent::Escape);
        assert!(!g.session.awaiting_code());
        assert!(g.code_input.is_empty());
        assert_eq!(g.session.current_room_index(), 0);
    }

    #[test]
    fn full_playthrough_to_win_and_replay() {
        let mut g = game();
        g.handle_input(&InputEvent::Enter);
        for code in ["1847", "science", "Escape"] {
            collect_all(&mut g);
            g.handle_input(&InputEvent::Key('e'));
            type_code(&mut g, code);
            g.handle_input(&InputEvent::Enter);
            dismiss_all(&mut g);
        }
        assert_eq!(g.session.phase(), Phase::Won);
        assert!(!g.is_ticking());

        g.tick(5);
        assert_eq!(g.session.phase(), Phase::Won);

        assert!(g.handle_input(&InputEvent::Click(PLAY_AGAIN)));
        assert_eq!(g.session.phase(), Phase::NotStarted);
        assert_eq!(g.session.current_room_index(), 0);
    }

    #[test]
    fn ticking_out_loses_and_clears_prompt() {
        let mut g = game();
        g.handle_input(&InputEvent::Enter);
        collect_all(&mut g);
        g.handle_input(&InputEvent::Key('e'));
        type_code(&mut g, "18");

        g.tick(299);
        assert_eq!(g.session.time_remaining(), 1);
        assert_eq!(g.code_input, "18");

        g.tick(10);
        assert_eq!(g.session.phase(), Phase::Lost);
        assert_eq!(g.session.time_remaining(), 0);
        assert!(g.code_input.is_empty());

        assert!(g.handle_input(&InputEvent::Key('r')));
        assert_eq!(g.session.phase(), Phase::NotStarted);
    }
}
