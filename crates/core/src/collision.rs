//! Collision tester - does a piece pose fit the field?

use crate::field::Field;
use crate::piece::ActivePiece;
use crate::types::FieldCell;

/// Check whether every occupied cell of `piece` lands on an empty field cell.
///
/// Cells above the top of the field (row < 0) never collide, so pieces can
/// enter from above. Borders are ordinary non-empty cells: moving into a wall
/// or the floor is just another collision. A coordinate outside the arena
/// altogether counts as a collision.
pub fn fits(piece: &ActivePiece, field: &Field) -> bool {
    for (x, y) in piece.cells() {
        if y < 0 {
            continue;
        }
        if field.get(x, y) != Some(FieldCell::Empty) {
            return false;
        }
    }
    true
}
