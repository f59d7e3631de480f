//! Field module - the bordered playing arena
//!
//! The field is a 12x18 flat array in row-major order (`y * FIELD_WIDTH + x`).
//! Column 0, column 11 and row 17 are permanent [`FieldCell::Border`] cells.
//! Everything inside is the playable interior: columns 1..=10, rows 0..=16.
//!
//! Borders double as bounds. Collision tests never need an explicit range
//! check for the sides or the floor, they just find a non-empty cell.

use std::fmt;

use arrayvec::ArrayVec;

use crate::piece::ActivePiece;
use crate::types::{FieldCell, FIELD_HEIGHT, FIELD_WIDTH, INTERIOR_HEIGHT};

/// Total number of cells in the arena
const FIELD_SIZE: usize = FIELD_WIDTH * FIELD_HEIGHT;

/// Indices of rows found complete by one scan, top to bottom.
pub type CompletedRows = ArrayVec<usize, INTERIOR_HEIGHT>;

/// The playing field, borders included.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    cells: [FieldCell; FIELD_SIZE],
}

impl Field {
    /// Create an empty field with its borders in place
    pub fn new() -> Self {
        let mut field = Self {
            cells: [FieldCell::Empty; FIELD_SIZE],
        };
        field.reset();
        field
    }

    /// Clear all locked material, restoring borders.
    pub fn reset(&mut self) {
        for (i, cell) in self.cells.iter_mut().enumerate() {
            let x = i % FIELD_WIDTH;
            let y = i / FIELD_WIDTH;
            *cell = if Self::is_border(x, y) {
                FieldCell::Border
            } else {
                FieldCell::Empty
            };
        }
    }

    /// Build a field from interior rows written as glyphs (see
    /// [`FieldCell::glyph`]). Rows are aligned to the bottom of the interior;
    /// missing rows above stay empty. Each row must be exactly 10 characters.
    ///
    /// Returns `None` on a malformed row, too many rows, or a `#` inside.
    pub fn from_rows(rows: &[&str]) -> Option<Self> {
        if rows.len() > INTERIOR_HEIGHT {
            return None;
        }
        let mut field = Self::new();
        let top = INTERIOR_HEIGHT - rows.len();
        for (r, row) in rows.iter().enumerate() {
            if row.chars().count() != FIELD_WIDTH - 2 {
                return None;
            }
            for (i, ch) in row.chars().enumerate() {
                let cell = FieldCell::from_glyph(ch)?;
                if !field.set(i as i32 + 1, (top + r) as i32, cell) {
                    return None;
                }
            }
        }
        Some(field)
    }

    #[inline(always)]
    fn is_border(x: usize, y: usize) -> bool {
        x == 0 || x == FIELD_WIDTH - 1 || y == FIELD_HEIGHT - 1
    }

    #[inline(always)]
    fn index(x: i32, y: i32) -> Option<usize> {
        if x < 0 || x >= FIELD_WIDTH as i32 || y < 0 || y >= FIELD_HEIGHT as i32 {
            return None;
        }
        Some((y as usize) * FIELD_WIDTH + (x as usize))
    }

    /// Whether (x, y) is a playable (non-border) cell.
    pub fn is_interior(x: i32, y: i32) -> bool {
        x >= 1 && x < FIELD_WIDTH as i32 - 1 && y >= 0 && y < INTERIOR_HEIGHT as i32
    }

    /// Total width, borders included.
    pub fn width(&self) -> usize {
        FIELD_WIDTH
    }

    /// Total height, bottom border included.
    pub fn height(&self) -> usize {
        FIELD_HEIGHT
    }

    /// Get cell at (x, y). `None` outside the arena.
    pub fn get(&self, x: i32, y: i32) -> Option<FieldCell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set an interior cell. Returns false (and does nothing) for border
    /// cells, out-of-range coordinates, or an attempt to write a border.
    pub fn set(&mut self, x: i32, y: i32, cell: FieldCell) -> bool {
        if !Self::is_interior(x, y) || cell == FieldCell::Border {
            return false;
        }
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// One full row, borders included.
    pub fn row(&self, y: usize) -> &[FieldCell] {
        let start = y * FIELD_WIDTH;
        &self.cells[start..start + FIELD_WIDTH]
    }

    /// All rows top to bottom, borders included.
    pub fn rows(&self) -> impl Iterator<Item = &[FieldCell]> {
        self.cells.chunks_exact(FIELD_WIDTH)
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[FieldCell] {
        &self.cells
    }

    /// Write the piece's kind into every occupied cell it covers.
    ///
    /// Fit is not checked; the caller locks only a pose it already validated.
    /// Cells outside the interior (still above the field, or on a border) are
    /// skipped. Returns the number of cells written.
    pub fn lock(&mut self, piece: &ActivePiece) -> usize {
        let cell = FieldCell::Locked(piece.kind());
        let mut written = 0;
        for (x, y) in piece.cells() {
            if self.set(x, y, cell) {
                written += 1;
            }
        }
        written
    }

    /// Find every interior row with no empty cell and mark it completed.
    ///
    /// Marked rows stay in place until [`Field::shift_rows_down`] removes
    /// them, so a renderer can show them first.
    pub fn scan_completed_rows(&mut self) -> CompletedRows {
        let mut completed = CompletedRows::new();
        for y in 0..INTERIOR_HEIGHT {
            if self.row(y).iter().any(|cell| cell.is_empty()) {
                continue;
            }
            completed.push(y);
            let start = y * FIELD_WIDTH;
            for cell in &mut self.cells[start + 1..start + FIELD_WIDTH - 1] {
                *cell = FieldCell::Completed;
            }
        }
        completed
    }

    /// Remove the given rows, letting everything above fall.
    ///
    /// Rows are processed top to bottom. For each one, every interior row from
    /// it up to row 1 takes the contents of the row above; row 0 keeps its
    /// contents. Each removed row therefore shifts the rows above it by one.
    pub fn shift_rows_down(&mut self, rows: &[usize]) {
        let mut sorted: CompletedRows = rows
            .iter()
            .copied()
            .filter(|&y| y < INTERIOR_HEIGHT)
            .take(INTERIOR_HEIGHT)
            .collect();
        sorted.sort_unstable();

        for &cleared in &sorted {
            for y in (1..=cleared).rev() {
                let dst = y * FIELD_WIDTH + 1;
                let src = (y - 1) * FIELD_WIDTH + 1;
                // copy_within handles the overlapping row ranges
                self.cells.copy_within(src..src + FIELD_WIDTH - 2, dst);
            }
        }
    }
}

impl Default for Field {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for cell in row {
                write!(f, "{}", cell.glyph())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
