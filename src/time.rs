//! Fixed-timestep clock using an accumulator pattern.
//!
//! `draw_web()` calls at ~60fps with variable delta. GameTime converts
//! this into whole ticks at a fixed rate, so the game only ever sees
//! discrete `tick()` calls and stays deterministic under test.

/// Escape room countdown rate: one tick per real-time second.
pub const TICKS_PER_SECOND: u32 = 1;

/// Longest frame gap accepted in one update. A backgrounded tab resumes with
/// at most this much elapsed time instead of a burst of ticks.
pub const MAX_FRAME_MS: f64 = 1000.0;

pub struct GameTime {
    ms_per_tick: f64,
    /// Milliseconds not yet consumed as ticks.
    accumulator: f64,
    /// Timestamp of the last update (ms), None after creation or `pause()`.
    last_timestamp: Option<f64>,
}

impl GameTime {
    pub fn new(ticks_per_sec: u32) -> Self {
        Self {
            ms_per_tick: 1000.0 / ticks_per_sec.max(1) as f64,
            accumulator: 0.0,
            last_timestamp: None,
        }
    }

    /// Feed the wall-clock timestamp (from `performance.now()`), once per
    /// frame. Returns the number of ticks to run this frame.
    pub fn update(&mut self, now_ms: f64) -> u32 {
        let delta = match self.last_timestamp {
            Some(prev) => (now_ms - prev).clamp(0.0, MAX_FRAME_MS),
            None => 0.0,
        };
        self.last_timestamp = Some(now_ms);

        self.accumulator += delta;
        let ticks = (self.accumulator / self.ms_per_tick) as u32;
        self.accumulator -= ticks as f64 * self.ms_per_tick;
        ticks
    }

    /// Stop counting. Time between `pause()` and the next `update()` is
    /// never turned into ticks, and any partial tick is dropped.
    pub fn pause(&mut self) {
        self.last_timestamp = None;
        self.accumulator = 0.0;
    }

    pub fn is_paused(&self) -> bool {
        self.last_timestamp.is_none()
    }
}
