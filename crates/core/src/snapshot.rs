//! Snapshot module - read-only view of a game for renderers

use crate::piece::ActivePiece;
use crate::shapes::ShapeMask;
use crate::types::{FieldCell, PieceKind, Rotation, FIELD_HEIGHT, FIELD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i32,
    pub y: i32,
    pub mask: ShapeMask,
}

impl ActiveSnapshot {
    /// Absolute field coordinates of every occupied cell.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.mask
            .occupied()
            .map(move |(i, j)| (self.x + i as i32, self.y + j as i32))
    }
}

impl From<&ActivePiece> for ActiveSnapshot {
    fn from(value: &ActivePiece) -> Self {
        Self {
            kind: value.kind(),
            rotation: value.rotation(),
            x: value.x(),
            y: value.y(),
            mask: *value.mask(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    /// Row-major, borders included.
    pub field: [FieldCell; FIELD_WIDTH * FIELD_HEIGHT],
    pub active: Option<ActiveSnapshot>,
    pub score: u32,
    pub pieces_placed: u32,
    pub gravity_period: u32,
    /// Completed rows are marked and waiting to be removed.
    pub flashing: bool,
    pub game_over: bool,
}

impl GameSnapshot {
    pub fn cell(&self, x: usize, y: usize) -> FieldCell {
        if x >= FIELD_WIDTH || y >= FIELD_HEIGHT {
            return FieldCell::Empty;
        }
        self.field[y * FIELD_WIDTH + x]
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            field: [FieldCell::Empty; FIELD_WIDTH * FIELD_HEIGHT],
            active: None,
            score: 0,
            pieces_placed: 0,
            gravity_period: 0,
            flashing: false,
            game_over: false,
        }
    }
}
