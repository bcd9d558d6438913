//! Escape room session: the room-progression state machine.
//!
//! ```text
//! NotStarted --start()--> Playing
//! Playing --tick() hits 0--> Lost
//! Playing --submit_code() match, last room--> Won
//! Playing --submit_code() match--> Playing (next room)
//! Playing --submit_code() mismatch--> Playing (same room)
//! Won | Lost --reset()--> NotStarted
//! ```
//!
//! Every mutating call outside `Playing` is a silent no-op: they arrive from UI
//! events that can race with the timer running out.

use crate::console;

use super::catalog::{Clue, Item, RoomCatalog, RoomDefinition};
use super::notify::{NoticeKind, Notification, NotificationQueue};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    Playing,
    Won,
    Lost,
}

pub struct GameSession {
    rooms: RoomCatalog,
    current_room: usize,
    inventory: Vec<Item>,
    clues: Vec<Clue>,
    time_remaining: u32,
    phase: Phase,
    awaiting_code: bool,
    notifications: NotificationQueue,
}

impl GameSession {
    pub fn new(rooms: RoomCatalog) -> Self {
        let time_remaining = rooms.first().time_limit;
        Self {
            rooms,
            current_room: 0,
            inventory: Vec::new(),
            clues: Vec::new(),
            time_remaining,
            phase: Phase::NotStarted,
            awaiting_code: false,
            notifications: NotificationQueue::new(),
        }
    }

    // ── Observers ──────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_room_index(&self) -> usize {
        self.current_room
    }

    pub fn current_room(&self) -> &RoomDefinition {
        &self.rooms[self.current_room]
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_last_room(&self) -> bool {
        self.current_room + 1 == self.rooms.len()
    }

    pub fn inventory(&self) -> &[Item] {
        &self.inventory
    }

    pub fn clues(&self) -> &[Clue] {
        &self.clues
    }

    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    pub fn awaiting_code(&self) -> bool {
        self.awaiting_code
    }

    pub fn has_item(&self, id: &str) -> bool {
        self.inventory.iter().any(|i| i.id == id)
    }

    pub fn has_clue(&self, id: &str) -> bool {
        self.clues.iter().any(|c| c.id == id)
    }

    /// Required item ids not yet collected, in the room definition's order.
    pub fn missing_items(&self) -> Vec<&str> {
        self.current_room()
            .required_items
            .iter()
            .map(String::as_str)
            .filter(|id| !self.has_item(id))
            .collect()
    }

    pub fn notifications(&self) -> &NotificationQueue {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut NotificationQueue {
        &mut self.notifications
    }

    // ── Lifecycle ──────────────────────────────────────────────

    /// Begin (or restart) a play-through from the first room.
    pub fn start(&mut self) {
        self.clear_progress();
        self.phase = Phase::Playing;
        console::info(&format!("escape: started in {}", self.current_room().name));
    }

    /// Back to the title screen. Room definitions are kept.
    pub fn reset(&mut self) {
        self.clear_progress();
        self.phase = Phase::NotStarted;
        console::info("escape: reset");
    }

    fn clear_progress(&mut self) {
        self.current_room = 0;
        self.inventory.clear();
        self.clues.clear();
        self.awaiting_code = false;
        self.notifications.clear();
        self.time_remaining = self.rooms.first().time_limit;
    }

    /// One second of countdown. Driven by the external scheduler.
    pub fn tick(&mut self) {
        if self.phase != Phase::Playing || self.time_remaining == 0 {
            return;
        }
        self.time_remaining -= 1;
        if self.time_remaining == 0 {
            self.phase = Phase::Lost;
            self.awaiting_code = false;
            console::info(&format!("escape: time ran out in {}", self.current_room().name));
        }
    }

    // ── Player actions ─────────────────────────────────────────

    /// Add an item to the inventory. Returns true if it was new.
    pub fn collect_item(&mut self, item: Item) -> bool {
        if self.phase != Phase::Playing || self.has_item(&item.id) {
            return false;
        }
        self.notifications.push(Notification::new(
            NoticeKind::ItemFound,
            "Item Found!",
            format!("You found: {}", item.name),
        ));
        self.inventory.push(item);
        true
    }

    /// Record a clue. Returns true if it was new.
    pub fn discover_clue(&mut self, clue: Clue) -> bool {
        if self.phase != Phase::Playing || self.has_clue(&clue.id) {
            return false;
        }
        self.notifications.push(Notification::new(
            NoticeKind::ClueDiscovered,
            "Clue Discovered!",
            clue.text.clone(),
        ));
        self.clues.push(Clue { found: true, ..clue });
        true
    }

    /// Open the code prompt if every required item is held; otherwise report
    /// what is missing. Returns whether the prompt is open.
    pub fn attempt_escape(&mut self) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }
        let missing = self.missing_items();
        if missing.is_empty() {
            self.awaiting_code = true;
        } else {
            let body = format!("You need: {}", missing.join(", "));
            self.notifications
                .push(Notification::new(NoticeKind::MissingItems, "Missing Items", body));
        }
        self.awaiting_code
    }

    /// Close the code prompt without submitting.
    pub fn cancel_code(&mut self) {
        if self.phase == Phase::Playing {
            self.awaiting_code = false;
        }
    }

    /// Try an unlock code. Returns true if it matched.
    pub fn submit_code(&mut self, text: &str) -> bool {
        if self.phase != Phase::Playing || !self.awaiting_code {
            return false;
        }
        self.awaiting_code = false;

        if !self.current_room().code_matches(text) {
            self.notifications.push(Notification::new(
                NoticeKind::WrongCode,
                "Wrong Code",
                "The code is incorrect. Keep searching for clues!",
            ));
            return false;
        }

        if self.is_last_room() {
            self.phase = Phase::Won;
            console::info(&format!("escape: won with {}s left", self.time_remaining));
            return true;
        }

        self.current_room += 1;
        self.inventory.clear();
        self.clues.clear();
        self.time_remaining = self.current_room().time_limit;
        let name = self.current_room().name.clone();
        console::info(&format!("escape: entered {}", name));
        self.notifications.push(Notification::new(
            NoticeKind::RoomEscaped,
            "Room Escaped!",
            format!("Moving to {}...", name),
        ));
        true
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::games::escape::catalog::fixtures::{clue, item, two_rooms};
    use proptest::prelude::*;

    #[derive(Clone, Debug)]
    enum Op {
        Tick,
        Collect(u8),
        Discover(u8),
        Attempt,
        Submit(String),
        Cancel,
    }

    fn arb_op() -> impl Strategy<Value = Op> {
        prop_oneof![
            4 => Just(Op::Tick),
            3 => (0u8..4).prop_map(Op::Collect),
            1 => (0u8..3).prop_map(Op::Discover),
            2 => Just(Op::Attempt),
            2 => prop_oneof![
                Just("1847".to_string()),
                Just("science".to_string()),
                "[a-z0-9]{0,6}",
            ]
            .prop_map(Op::Submit),
            1 => Just(Op::Cancel),
        ]
    }

    const ITEM_IDS: [&str; 4] = ["key", "code", "vial", "junk"];

    fn apply(s: &mut GameSession, op: &Op) {
        match op {
            Op::Tick => s.tick(),
            Op::Collect(i) => {
                s.collect_item(item(ITEM_IDS[*i as usize]));
            }
            Op::Discover(i) => {
                s.discover_clue(clue(&format!("clue-{}", i), "text"));
            }
            Op::Attempt => {
                s.attempt_escape();
            }
            Op::Submit(text) => {
                s.submit_code(text);
            }
            Op::Cancel => s.cancel_code(),
        }
    }

    proptest! {
        #[test]
        fn prop_invariants_hold(ops in proptest::collection::vec(arb_op(), 0..200)) {
            let mut s = GameSession::new(two_rooms());
            s.start();
            for op in &ops {
                apply(&mut s, op);
                prop_assert!(s.current_room_index() < s.room_count());
                prop_assert!(s.time_remaining() <= s.current_room().time_limit);

                let mut ids: Vec<&str> = s.inventory().iter().map(|i| i.id.as_str()).collect();
                ids.sort();
                ids.dedup();
                prop_assert_eq!(ids.len(), s.inventory().len());

                if s.awaiting_code() {
                    prop_assert_eq!(s.phase(), Phase::Playing);
                }
            }
        }

        #[test]
        fn prop_duplicate_collect_is_noop(idx in 0usize..4) {
            let mut s = GameSession::new(two_rooms());
            s.start();
            s.collect_item(item(ITEM_IDS[idx]));
            let size = s.inventory().len();
            let notes = s.notifications().len();
            prop_assert!(!s.collect_item(item(ITEM_IDS[idx])));
            prop_assert_eq!(s.inventory().len(), size);
            prop_assert_eq!(s.notifications().len(), notes);
        }

        #[test]
        fn prop_attempt_escape_never_moves(ops in proptest::collection::vec(arb_op(), 0..60)) {
            let mut s = GameSession::new(two_rooms());
            s.start();
            for op in &ops {
                apply(&mut s, op);
            }
            let phase = s.phase();
            let room = s.current_room_index();
            let time = s.time_remaining();
            s.attempt_escape();
            prop_assert_eq!(s.phase(), phase);
            prop_assert_eq!(s.current_room_index(), room);
            prop_assert_eq!(s.time_remaining(), time);
        }

        #[test]
        fn prop_wrong_code_changes_nothing(code in "[A-Za-z0-9]{0,8}", ticks in 0u32..100) {
            prop_assume!(code.to_uppercase() != "1847");
            let mut s = GameSession::new(two_rooms());
            s.start();
            s.collect_item(item("key"));
            s.collect_item(item("code"));
            s.discover_clue(clue("c", "t"));
            for _ in 0..ticks {
                s.tick();
            }
            s.attempt_escape();

            let inventory = s.inventory().to_vec();
            let clues = s.clues().to_vec();
            let time = s.time_remaining();
            prop_assert!(!s.submit_code(&code));
            prop_assert_eq!(s.current_room_index(), 0);
            prop_assert_eq!(s.time_remaining(), time);
            prop_assert_eq!(s.inventory(), inventory.as_slice());
            prop_assert_eq!(s.clues(), clues.as_slice());
            prop_assert!(!s.awaiting_code());
        }

        #[test]
        fn prop_extra_ticks_never_underflow(extra in 0u32..50) {
            let mut s = GameSession::new(two_rooms());
            s.start();
            for _ in 0..(300 + extra) {
                s.tick();
            }
            prop_assert_eq!(s.phase(), Phase::Lost);
            prop_assert_eq!(s.time_remaining(), 0);
        }
    }
}
