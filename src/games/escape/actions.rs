//! Semantic action IDs for escape room click targets.

// ── Title / end screens ────────────────────────────────────────
pub const START_GAME: u16 = 1;
pub const PLAY_AGAIN: u16 = 2;

// ── Room ───────────────────────────────────────────────────────
/// Hotspot base: + index into the room's hotspot list.
pub const HOTSPOT_BASE: u16 = 10;
/// Upper bound on hotspots addressable by click.
pub const MAX_HOTSPOTS: u16 = 20;
pub const ATTEMPT_ESCAPE: u16 = 40;

// ── Code prompt ────────────────────────────────────────────────
pub const SUBMIT_CODE: u16 = 50;
pub const CANCEL_CODE: u16 = 51;

// ── Toast ──────────────────────────────────────────────────────
pub const DISMISS_NOTICE: u16 = 60;
