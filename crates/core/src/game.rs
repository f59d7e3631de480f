//! Game module - the per-tick controller
//!
//! Ties the field, the piece source and the session together. One call to
//! [`Game::tick`] is one fixed game tick:
//!
//! 1. collapse rows left over from the previous line clear
//! 2. spawn a piece if none is falling (game over if it does not fit)
//! 3. edge-detect rotate / left / right, try each move, revert on collision
//! 4. gravity or soft drop: descend, or lock + scan + score
//!
//! The controller knows nothing about wall time. Whoever drives it decides
//! how long a tick is and how long the line-clear flash lasts.

use tracing::{debug, info};

use crate::collision::fits;
use crate::field::{CompletedRows, Field};
use crate::piece::ActivePiece;
use crate::rng::PieceSource;
use crate::session::Session;
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{Control, Controls};

/// Why a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameOverReason {
    /// A freshly spawned piece already overlapped the stack.
    BlockedSpawn,
    /// A piece came to rest with its anchor still above the field.
    RestedAboveField,
}

/// Where the state machine is between ticks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// No active piece; the next tick spawns one.
    Spawning,
    Falling(ActivePiece),
    /// Rows were completed and marked; they are removed on collapse.
    LineClear(CompletedRows),
    GameOver(GameOverReason),
}

/// What one tick did, for the driver to react to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickEvent {
    /// The piece is still falling (it may have moved).
    Idle,
    /// The piece locked without completing a row.
    Locked,
    /// The piece locked and completed these rows. They are marked in the
    /// field and wait for [`Game::collapse_completed_rows`].
    LinesCompleted(CompletedRows),
    GameOver(GameOverReason),
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct Game {
    field: Field,
    session: Session,
    pieces: PieceSource,
    phase: Phase,
}

impl Game {
    /// Create a new game with the given RNG seed
    pub fn new(seed: u64) -> Self {
        Self::with_source(PieceSource::new(seed))
    }

    pub fn with_source(pieces: PieceSource) -> Self {
        Self::from_parts(Field::new(), pieces)
    }

    /// Start from a prepared field, e.g. a puzzle setup or a test fixture.
    pub fn from_parts(field: Field, pieces: PieceSource) -> Self {
        Self {
            field,
            session: Session::new(),
            pieces,
            phase: Phase::Spawning,
        }
    }

    /// Throw away the field and session and start over. The piece stream
    /// carries on where it was.
    pub fn restart(&mut self) {
        self.field.reset();
        self.session = Session::new();
        self.phase = Phase::Spawning;
        debug!("restart");
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn active(&self) -> Option<&ActivePiece> {
        match &self.phase {
            Phase::Falling(piece) => Some(piece),
            _ => None,
        }
    }

    /// Rows marked complete and not yet removed.
    pub fn pending_rows(&self) -> &[usize] {
        match &self.phase {
            Phase::LineClear(rows) => rows.as_slice(),
            _ => &[],
        }
    }

    pub fn score(&self) -> u32 {
        self.session.score()
    }

    pub fn pieces_placed(&self) -> u32 {
        self.session.pieces_placed()
    }

    pub fn gravity_period(&self) -> u32 {
        self.session.gravity_period()
    }

    pub fn seed(&self) -> u64 {
        self.pieces.seed()
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.phase, Phase::GameOver(_))
    }

    pub fn game_over_reason(&self) -> Option<GameOverReason> {
        match self.phase {
            Phase::GameOver(reason) => Some(reason),
            _ => None,
        }
    }

    /// Run one tick with this tick's held controls.
    pub fn tick(&mut self, controls: Controls) -> TickEvent {
        if let Phase::GameOver(reason) = self.phase {
            return TickEvent::GameOver(reason);
        }

        // A driver that skipped the flash still gets the rows removed.
        self.collapse_completed_rows();

        let mut piece = match self.phase {
            Phase::Falling(piece) => piece,
            _ => match self.spawn() {
                Some(piece) => piece,
                None => return TickEvent::GameOver(GameOverReason::BlockedSpawn),
            },
        };

        let rotate = self.session.latch(Control::Rotate, controls.rotate);
        let left = self.session.latch(Control::MoveLeft, controls.move_left);
        let right = self.session.latch(Control::MoveRight, controls.move_right);

        if rotate {
            piece = self.try_rotate(piece);
        }

        // Both directions held cancel out.
        if controls.move_left != controls.move_right {
            if left {
                piece = self.try_shift(piece, -1);
            } else if right {
                piece = self.try_shift(piece, 1);
            }
        }

        if self.session.gravity_due(controls.soft_drop) {
            let lowered = piece.translated(0, 1);
            if !fits(&lowered, &self.field) {
                return self.settle(piece);
            }
            piece = lowered;
        }

        self.phase = Phase::Falling(piece);
        TickEvent::Idle
    }

    /// Remove rows completed by the last lock, letting the stack fall.
    ///
    /// Call after showing the flash frame. Returns how many rows went away;
    /// 0 when nothing was pending.
    pub fn collapse_completed_rows(&mut self) -> usize {
        let Phase::LineClear(rows) = &self.phase else {
            return 0;
        };
        self.field.shift_rows_down(rows);
        let count = rows.len();
        debug!(rows = count, "line clear");
        self.phase = Phase::Spawning;
        count
    }

    /// A read-only copy for renderers.
    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.field.copy_from_slice(self.field.cells());
        out.active = self.active().map(ActiveSnapshot::from);
        out.score = self.session.score();
        out.pieces_placed = self.session.pieces_placed();
        out.gravity_period = self.session.gravity_period();
        out.flashing = !self.pending_rows().is_empty();
        out.game_over = self.is_game_over();
    }

    fn spawn(&mut self) -> Option<ActivePiece> {
        let piece = ActivePiece::spawn(self.pieces.draw());
        if !fits(&piece, &self.field) {
            self.end(GameOverReason::BlockedSpawn);
            return None;
        }
        debug!(kind = piece.kind().as_str(), "spawn");
        Some(piece)
    }

    /// One quarter turn clockwise, or no change if it would collide.
    fn try_rotate(&self, piece: ActivePiece) -> ActivePiece {
        let turned = piece.rotated_cw();
        if fits(&turned, &self.field) {
            turned
        } else {
            piece
        }
    }

    fn try_shift(&self, piece: ActivePiece, dx: i32) -> ActivePiece {
        let moved = piece.translated(dx, 0);
        if fits(&moved, &self.field) {
            moved
        } else {
            piece
        }
    }

    /// The piece cannot descend: lock it, or end the game if it never
    /// made it into the field.
    fn settle(&mut self, piece: ActivePiece) -> TickEvent {
        if piece.y() < 0 {
            self.end(GameOverReason::RestedAboveField);
            return TickEvent::GameOver(GameOverReason::RestedAboveField);
        }

        self.field.lock(&piece);
        let rows = self.field.scan_completed_rows();
        let points = self.session.record_lock(rows.len());
        debug!(
            kind = piece.kind().as_str(),
            x = piece.x(),
            y = piece.y(),
            lines = rows.len(),
            points,
            "lock"
        );

        if rows.is_empty() {
            self.phase = Phase::Spawning;
            TickEvent::Locked
        } else {
            self.phase = Phase::LineClear(rows.clone());
            TickEvent::LinesCompleted(rows)
        }
    }

    fn end(&mut self, reason: GameOverReason) {
        info!(
            ?reason,
            score = self.session.score(),
            pieces = self.session.pieces_placed(),
            "game over"
        );
        self.phase = Phase::GameOver(reason);
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(1)
    }
}
