//! Session - per-game counters and input latches
//!
//! A session lives from game start to game over. Restarting a game replaces
//! it with a fresh one; nothing here is global.

use tracing::debug;

use crate::scoring::{gravity_period_after, lock_points};
use crate::types::{Control, INITIAL_GRAVITY_PERIOD};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    score: u32,
    pieces_placed: u32,
    /// Ticks between forced drops.
    gravity_period: u32,
    /// Ticks since the last forced drop.
    gravity_counter: u32,
    /// Held state of every control on the previous tick.
    latches: [bool; Control::COUNT],
}

impl Session {
    pub fn new() -> Self {
        Self {
            score: 0,
            pieces_placed: 0,
            gravity_period: INITIAL_GRAVITY_PERIOD,
            gravity_counter: 0,
            latches: [false; Control::COUNT],
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn pieces_placed(&self) -> u32 {
        self.pieces_placed
    }

    pub fn gravity_period(&self) -> u32 {
        self.gravity_period
    }

    pub fn gravity_counter(&self) -> u32 {
        self.gravity_counter
    }

    /// Feed the held state of `control` for this tick.
    ///
    /// Returns true only on a rising edge: held now, released on the previous
    /// tick. Holding a control fires once.
    pub fn latch(&mut self, control: Control, held: bool) -> bool {
        let was_held = std::mem::replace(&mut self.latches[control.index()], held);
        held && !was_held
    }

    /// Advance the gravity counter and report whether a drop is due.
    ///
    /// Soft drop forces a drop every tick and restarts the count.
    pub fn gravity_due(&mut self, soft_drop: bool) -> bool {
        if soft_drop {
            self.gravity_counter = 0;
            return true;
        }
        self.gravity_counter += 1;
        if self.gravity_counter >= self.gravity_period {
            self.gravity_counter = 0;
            return true;
        }
        false
    }

    /// Account for one locked piece that completed `lines` rows.
    ///
    /// Returns the points awarded.
    pub fn record_lock(&mut self, lines: usize) -> u32 {
        self.pieces_placed += 1;

        let period = gravity_period_after(self.pieces_placed, self.gravity_period);
        if period != self.gravity_period {
            debug!(
                pieces = self.pieces_placed,
                from = self.gravity_period,
                to = period,
                "speed up"
            );
            self.gravity_period = period;
        }

        let points = lock_points(lines);
        self.score = self.score.saturating_add(points);
        points
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
