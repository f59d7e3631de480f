//! Active piece - the falling piece and its cached mask

use crate::rotation::rotate;
use crate::shapes::ShapeMask;
use crate::types::{PieceKind, Rotation, ENTRY_X, ENTRY_Y};

/// The falling piece.
///
/// `x`/`y` anchor the top-left corner of the 4x4 mask in field coordinates.
/// `y` is negative while the piece is still entering from above. The mask is
/// always the rotation engine's output for (kind, rotation); fields are private
/// so it cannot drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    kind: PieceKind,
    x: i32,
    y: i32,
    rotation: Rotation,
    mask: ShapeMask,
}

impl ActivePiece {
    /// Create a piece at an arbitrary anchor, North orientation.
    pub fn new(kind: PieceKind, x: i32, y: i32) -> Self {
        Self::with_rotation(kind, x, y, Rotation::North)
    }

    pub fn with_rotation(kind: PieceKind, x: i32, y: i32, rotation: Rotation) -> Self {
        Self {
            kind,
            x,
            y,
            rotation,
            mask: rotate(kind, rotation),
        }
    }

    /// Create a piece at the entry point.
    pub fn spawn(kind: PieceKind) -> Self {
        Self::new(kind, ENTRY_X, ENTRY_Y)
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn mask(&self) -> &ShapeMask {
        &self.mask
    }

    /// Same piece moved by (dx, dy).
    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Same piece one quarter turn clockwise, mask recomputed.
    pub fn rotated_cw(&self) -> Self {
        Self::with_rotation(self.kind, self.x, self.y, self.rotation.rotate_cw())
    }

    /// Same piece one quarter turn counter-clockwise, mask recomputed.
    pub fn rotated_ccw(&self) -> Self {
        Self::with_rotation(self.kind, self.x, self.y, self.rotation.rotate_ccw())
    }

    /// Absolute field coordinates of every occupied cell.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.mask
            .occupied()
            .map(move |(i, j)| (self.x + i as i32, self.y + j as i32))
    }
}
