//! Held-key tracker for terminal environments.
//!
//! The engine wants the level state of every control once per tick. Terminals
//! deliver key events instead, and many never deliver a release. This handler
//! turns press/repeat/release events into per-tick [`Controls`]:
//!
//! - a key counts as held from its press (or repeat) until its release
//! - without release events, it counts as released once no press or repeat
//!   arrived for the release timeout
//! - a press that was released again before the next sample still shows up as
//!   held in that one sample, so quick taps are never lost
//! - every distinct press is one rising edge: a second tap while the first is
//!   still reported as held is delivered as one released sample, then a held one

use std::time::{Duration, Instant};

use crossterm::event::{KeyEvent, KeyEventKind};
use tracing::trace;

use crate::map::control_for_key;
use crate::types::{Control, Controls};

// In terminals without key-release events, a short timeout prevents a single tap
// from turning into a sustained "held" state.
pub const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

// Without release events, auto-repeat arrives as plain presses. Presses closer
// together than this are repeats of one hold, further apart they are new taps.
const KEY_REPEAT_GAP: Duration = Duration::from_millis(60);

#[derive(Debug, Clone)]
pub struct InputHandler {
    /// Time of the last press/repeat of each held control.
    last_seen: [Option<Instant>; Control::COUNT],
    /// Distinct presses not yet delivered as a rising edge.
    pending_taps: [u8; Control::COUNT],
    /// What the previous sample reported.
    reported: [bool; Control::COUNT],
    /// Set once the terminal has shown it reports releases.
    releases_reported: bool,
    key_release_timeout: Duration,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::with_key_release_timeout_ms(DEFAULT_KEY_RELEASE_TIMEOUT_MS)
    }

    pub fn with_key_release_timeout_ms(timeout_ms: u32) -> Self {
        Self {
            last_seen: [None; Control::COUNT],
            pending_taps: [0; Control::COUNT],
            reported: [false; Control::COUNT],
            releases_reported: false,
            key_release_timeout: Duration::from_millis(u64::from(timeout_ms)),
        }
    }

    /// Feed one key event. Returns the control it touched, if any.
    pub fn handle_key_event(&mut self, key: KeyEvent, now: Instant) -> Option<Control> {
        let control = control_for_key(key.code)?;
        match key.kind {
            KeyEventKind::Press => self.handle_key_press(control, now),
            KeyEventKind::Repeat => self.last_seen[control.index()] = Some(now),
            KeyEventKind::Release => self.handle_key_release(control),
        }
        Some(control)
    }

    pub fn handle_key_press(&mut self, control: Control, now: Instant) {
        let i = control.index();
        let distinct = match self.last_seen[i] {
            None => true,
            Some(seen) => {
                !self.releases_reported && now.saturating_duration_since(seen) > KEY_REPEAT_GAP
            }
        };
        if distinct {
            trace!(control = control.as_str(), "press");
            self.pending_taps[i] = self.pending_taps[i].saturating_add(1);
        }
        self.last_seen[i] = Some(now);
    }

    pub fn handle_key_release(&mut self, control: Control) {
        self.releases_reported = true;
        self.last_seen[control.index()] = None;
        trace!(control = control.as_str(), "release");
    }

    /// Whether `control` is held right now, ignoring taps.
    pub fn is_held(&self, control: Control, now: Instant) -> bool {
        match self.last_seen[control.index()] {
            Some(seen) => {
                self.releases_reported
                    || now.saturating_duration_since(seen) <= self.key_release_timeout
            }
            None => false,
        }
    }

    /// Held state of every control for this tick.
    ///
    /// Expires timed-out keys and delivers at most one pending tap per
    /// control. A tap arriving while the control was reported held costs one
    /// released sample first, so the engine sees a fresh edge.
    pub fn sample(&mut self, now: Instant) -> Controls {
        let mut controls = Controls::NONE;
        for control in Control::ALL {
            let i = control.index();
            let held = self.is_held(control, now);
            if !held {
                self.last_seen[i] = None;
            }
            let down = if self.pending_taps[i] == 0 {
                held
            } else if self.reported[i] {
                false
            } else {
                self.pending_taps[i] -= 1;
                true
            };
            self.reported[i] = down;
            controls.set(control, down);
        }
        controls
    }

    /// Forget everything, e.g. after focus loss.
    pub fn reset(&mut self) {
        self.last_seen = [None; Control::COUNT];
        self.pending_taps = [0; Control::COUNT];
        self.reported = [false; Control::COUNT];
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
