//! Shape table - the seven canonical 4x4 piece masks
//!
//! Every kind is stored once, in its North orientation. Other orientations
//! are derived by the rotation engine ([`crate::rotation`]).

use std::fmt;

use crate::types::{PieceKind, MASK_SIZE};

const MASK_CELLS: usize = MASK_SIZE * MASK_SIZE;

/// A 4x4 grid of occupied/empty cells, row-major (`y * 4 + x`).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeMask {
    cells: [bool; MASK_CELLS],
}

impl ShapeMask {
    /// A mask with no occupied cell.
    pub const EMPTY: ShapeMask = ShapeMask {
        cells: [false; MASK_CELLS],
    };

    /// Build a mask from four rows of `.`/`X`, top row first.
    ///
    /// Any byte other than `X` is treated as empty.
    pub const fn from_rows(rows: [&str; MASK_SIZE]) -> Self {
        let mut cells = [false; MASK_CELLS];
        let mut y = 0;
        while y < MASK_SIZE {
            let row = rows[y].as_bytes();
            let mut x = 0;
            while x < MASK_SIZE && x < row.len() {
                cells[y * MASK_SIZE + x] = row[x] == b'X';
                x += 1;
            }
            y += 1;
        }
        Self { cells }
    }

    /// Whether cell (x, y) is occupied. Out-of-range coordinates are empty.
    #[inline(always)]
    pub fn get(&self, x: usize, y: usize) -> bool {
        x < MASK_SIZE && y < MASK_SIZE && self.cells[y * MASK_SIZE + x]
    }

    pub(crate) fn set(&mut self, x: usize, y: usize, occupied: bool) {
        if x < MASK_SIZE && y < MASK_SIZE {
            self.cells[y * MASK_SIZE + x] = occupied;
        }
    }

    /// Number of occupied cells.
    pub fn popcount(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Occupied cells as (x, y) offsets, row by row.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &c)| c)
            .map(|(i, _)| (i % MASK_SIZE, i / MASK_SIZE))
    }
}

impl fmt::Debug for ShapeMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..MASK_SIZE {
            if y > 0 {
                f.write_str("/")?;
            }
            for x in 0..MASK_SIZE {
                f.write_str(if self.get(x, y) { "X" } else { "." })?;
            }
        }
        Ok(())
    }
}

/// Canonical masks, indexed by [`PieceKind::index`].
static SHAPES: [ShapeMask; PieceKind::COUNT] = [
    // Line
    ShapeMask::from_rows(["..X.", "..X.", "..X.", "..X."]),
    // Tee
    ShapeMask::from_rows(["....", ".X..", ".XX.", ".X.."]),
    // Cube
    ShapeMask::from_rows(["....", ".XX.", ".XX.", "...."]),
    // LeftL
    ShapeMask::from_rows(["....", ".X..", ".XX.", "..X."]),
    // RightL
    ShapeMask::from_rows(["....", ".X..", ".X..", ".XX."]),
    // LeftS
    ShapeMask::from_rows(["....", "..X.", ".XX.", ".X.."]),
    // RightS
    ShapeMask::from_rows(["....", "..X.", "..X.", ".XX."]),
];

/// The canonical (North) mask for a kind.
pub fn base_shape(kind: PieceKind) -> &'static ShapeMask {
    &SHAPES[kind.index()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_shape_has_four_cells() {
        for kind in PieceKind::ALL {
            assert_eq!(base_shape(kind).popcount(), 4, "{:?}", kind);
        }
    }

    #[test]
    fn test_line_is_vertical_in_column_two() {
        let line = base_shape(PieceKind::Line);
        let cells: Vec<_> = line.occupied().collect();
        assert_eq!(cells, vec![(2, 0), (2, 1), (2, 2), (2, 3)]);
    }

    #[test]
    fn test_debug_format_is_row_strings() {
        let cube = base_shape(PieceKind::Cube);
        assert_eq!(format!("{:?}", cube), "..../.XX./.XX./....");
    }

    #[test]
    fn test_get_out_of_range_is_empty() {
        let tee = base_shape(PieceKind::Tee);
        assert!(!tee.get(4, 0));
        assert!(!tee.get(0, 4));
    }
}
