//! One step of the fixed-tick loop, kept apart from the terminal so any
//! [`RenderSink`] can drive it.

use std::time::Duration;

use anyhow::{ensure, Context, Result};
use tracing::debug;

use crate::core::{Game, GameSnapshot, TickEvent};
use crate::term::{FrameBuffer, GameView, RenderSink};
use crate::types::Controls;

/// Longest accepted tick, in milliseconds.
pub const MAX_TICK_MS: u64 = 10_000;
/// Longest accepted line-clear flash.
pub const MAX_FLASH: Duration = Duration::from_secs(60);

/// Validated loop timings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub tick: Duration,
    pub flash: Duration,
}

impl Timing {
    pub fn new(tick_ms: u64, flash_ticks: u32) -> Result<Self> {
        ensure!(tick_ms > 0, "--tick-ms must be greater than zero");
        ensure!(
            tick_ms <= MAX_TICK_MS,
            "--tick-ms must be at most {MAX_TICK_MS}, got {tick_ms}"
        );
        let tick = Duration::from_millis(tick_ms);
        let flash = tick
            .checked_mul(flash_ticks)
            .filter(|flash| *flash <= MAX_FLASH)
            .with_context(|| {
                format!(
                    "--flash-ticks {flash_ticks} at {tick_ms} ms per tick is longer than {} s",
                    MAX_FLASH.as_secs()
                )
            })?;
        Ok(Self { tick, flash })
    }
}

/// Snapshot, screen buffer and view, reused across frames.
#[derive(Debug)]
pub struct Screen {
    view: GameView,
    frame: FrameBuffer,
    snap: GameSnapshot,
}

impl Screen {
    pub fn new() -> Self {
        let view = GameView::new();
        Self {
            frame: view.screen(),
            view,
            snap: GameSnapshot::default(),
        }
    }

    /// Draw the game as it is now and hand the frame to `sink`.
    pub fn present(&mut self, game: &Game, sink: &mut impl RenderSink) -> Result<()> {
        game.snapshot_into(&mut self.snap);
        self.view.render_into(&self.snap, &mut self.frame);
        sink.present(&mut self.frame)
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

/// What the loop does after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Quit,
    GameOver { score: u32 },
}

/// Tick the game once and present the result.
///
/// On a line clear the frame with the marked rows is presented first, then
/// `wait(flash)` runs (returning true means quit), then the rows collapse and
/// the collapsed frame is presented.
pub fn advance(
    game: &mut Game,
    controls: Controls,
    screen: &mut Screen,
    sink: &mut impl RenderSink,
    flash: Duration,
    mut wait: impl FnMut(Duration) -> Result<bool>,
) -> Result<Step> {
    match game.tick(controls) {
        TickEvent::LinesCompleted(rows) => {
            debug!(rows = ?rows.as_slice(), "flash");
            screen.present(game, sink)?;
            if wait(flash)? {
                return Ok(Step::Quit);
            }
            game.collapse_completed_rows();
        }
        TickEvent::GameOver(_) => {
            return Ok(Step::GameOver {
                score: game.score(),
            })
        }
        TickEvent::Idle | TickEvent::Locked => {}
    }
    screen.present(game, sink)?;
    Ok(Step::Continue)
}
