//! Rotation engine
//!
//! Maps (kind, rotation) onto a concrete 4x4 mask by remapping every cell of
//! the canonical mask. With `o = 3`:
//!
//! | rotation | target x | target y |
//! |----------|----------|----------|
//! | East (90°) | `y` | `o - x` |
//! | South (180°) | `o - x` | `o - y` |
//! | West (270°) | `o - y` | `x` |
//!
//! There are no wall kicks: callers either accept the rotated mask as-is or
//! keep the previous one.

use crate::shapes::{base_shape, ShapeMask};
use crate::types::{PieceKind, Rotation, MASK_SIZE};

const OFFSET: usize = MASK_SIZE - 1;

/// Concrete mask of `kind` at `rotation`.
pub fn rotate(kind: PieceKind, rotation: Rotation) -> ShapeMask {
    rotate_mask(base_shape(kind), rotation)
}

/// Apply a rotation transform to an arbitrary mask.
pub fn rotate_mask(base: &ShapeMask, rotation: Rotation) -> ShapeMask {
    if rotation == Rotation::North {
        return *base;
    }

    let mut out = ShapeMask::EMPTY;
    for (x, y) in base.occupied() {
        let (tx, ty) = target(rotation, x, y);
        out.set(tx, ty, true);
    }
    out
}

#[inline(always)]
fn target(rotation: Rotation, x: usize, y: usize) -> (usize, usize) {
    match rotation {
        Rotation::North => (x, y),
        Rotation::East => (y, OFFSET - x),
        Rotation::South => (OFFSET - x, OFFSET - y),
        Rotation::West => (OFFSET - y, x),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_north_is_canonical() {
        for kind in PieceKind::ALL {
            assert_eq!(rotate(kind, Rotation::North), *base_shape(kind));
        }
    }

    #[test]
    fn test_line_east_is_horizontal() {
        // Column 2 maps onto row 3 - 2 = 1.
        let east = rotate(PieceKind::Line, Rotation::East);
        assert_eq!(format!("{:?}", east), "..../XXXX/..../....");
    }

    #[test]
    fn test_tee_all_orientations() {
        assert_eq!(
            format!("{:?}", rotate(PieceKind::Tee, Rotation::East)),
            "..../..X./.XXX/...."
        );
        assert_eq!(
            format!("{:?}", rotate(PieceKind::Tee, Rotation::South)),
            "..X./.XX./..X./...."
        );
        assert_eq!(
            format!("{:?}", rotate(PieceKind::Tee, Rotation::West)),
            "..../XXX./.X../...."
        );
    }

    #[test]
    fn test_rotation_preserves_popcount() {
        for kind in PieceKind::ALL {
            for r in 0..4 {
                let mask = rotate(kind, Rotation::from_index(r));
                assert_eq!(mask.popcount(), base_shape(kind).popcount());
            }
        }
    }

    #[test]
    fn test_applying_east_four_times_is_identity() {
        for kind in PieceKind::ALL {
            let base = *base_shape(kind);
            let mut mask = base;
            for _ in 0..4 {
                mask = rotate_mask(&mask, Rotation::East);
            }
            assert_eq!(mask, base, "{:?}", kind);
        }
    }

    #[test]
    fn test_east_then_west_restores_mask() {
        for kind in PieceKind::ALL {
            let base = *base_shape(kind);
            let east = rotate_mask(&base, Rotation::East);
            assert_eq!(rotate_mask(&east, Rotation::West), base);
        }
    }
}
