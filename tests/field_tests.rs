//! Field tests - arena layout, locking, completed rows and collapse

use blockfall::core::{fits, ActivePiece, Field};
use blockfall::types::{FieldCell, PieceKind, Rotation, FIELD_HEIGHT, FIELD_WIDTH};

fn borders_intact(field: &Field) -> bool {
    (0..FIELD_HEIGHT as i32).all(|y| {
        field.get(0, y) == Some(FieldCell::Border)
            && field.get(FIELD_WIDTH as i32 - 1, y) == Some(FieldCell::Border)
    }) && (0..FIELD_WIDTH as i32).all(|x| field.get(x, FIELD_HEIGHT as i32 - 1) == Some(FieldCell::Border))
}

#[test]
fn test_field_dimensions() {
    let field = Field::new();
    assert_eq!(field.width(), 12);
    assert_eq!(field.height(), 18);
    assert_eq!(field.cells().len(), 12 * 18);
    assert!(borders_intact(&field));
}

#[test]
fn test_from_rows_aligns_to_bottom() {
    let field = Field::from_rows(&["B         ", "AAAA AAAAA"]).unwrap();
    assert_eq!(field.get(1, 15), Some(FieldCell::Locked(PieceKind::Tee)));
    assert_eq!(field.get(1, 16), Some(FieldCell::Locked(PieceKind::Line)));
    assert_eq!(field.get(5, 16), Some(FieldCell::Empty));
    assert_eq!(field.get(1, 14), Some(FieldCell::Empty));
}

#[test]
fn test_from_rows_rejects_bad_input() {
    assert!(Field::from_rows(&["AAAA"]).is_none());
    assert!(Field::from_rows(&["AAAA#AAAAA"]).is_none());
    assert!(Field::from_rows(&["AAAA?AAAAA"]).is_none());
    let too_many = ["          "; 18];
    assert!(Field::from_rows(&too_many).is_none());
}

#[test]
fn test_fits_is_translation_invariant_across_empty_columns() {
    let field = Field::new();
    // Every column of the Line's mask except column 2 is empty, so shifting
    // the anchor across positions where column 2 stays inside gives the same
    // answer as the in-field test.
    for x in -1..=8 {
        let piece = ActivePiece::new(PieceKind::Line, x, 5);
        assert!(fits(&piece, &field), "x = {}", x);
    }
    assert!(!fits(&ActivePiece::new(PieceKind::Line, -2, 5), &field));
    assert!(!fits(&ActivePiece::new(PieceKind::Line, 9, 5), &field));
}

#[test]
fn test_lock_never_writes_outside_interior() {
    let mut field = Field::new();
    for kind in PieceKind::ALL {
        for rotation in [Rotation::North, Rotation::East, Rotation::South, Rotation::West] {
            for x in -3..=11 {
                for y in [-3, -1, 0, 8, 14, 16] {
                    field.lock(&ActivePiece::with_rotation(kind, x, y, rotation));
                }
            }
        }
    }
    assert!(borders_intact(&field));
}

#[test]
fn test_scan_reports_only_full_rows() {
    let mut field = Field::from_rows(&[
        "AAAAAAAAA ",
        "AAAAAAAAAA",
        " AAAAAAAAA",
        "AAAAAAAAAA",
    ])
    .unwrap();
    let rows = field.scan_completed_rows();
    assert_eq!(rows.as_slice(), &[14, 16]);
    assert_eq!(field.get(3, 14), Some(FieldCell::Completed));
    assert_eq!(field.get(3, 13), Some(FieldCell::Locked(PieceKind::Line)));
    assert_eq!(field.get(3, 15), Some(FieldCell::Locked(PieceKind::Line)));
}

#[test]
fn test_scan_on_empty_field_finds_nothing() {
    let mut field = Field::new();
    assert!(field.scan_completed_rows().is_empty());
    assert_eq!(field, Field::new());
}

#[test]
fn test_shift_removes_rows_and_drops_the_rest() {
    let mut field = Field::from_rows(&[
        "B         ",
        "AAAAAAAAAA",
        "C   C     ",
        "DDDDDDDDDD",
    ])
    .unwrap();
    let rows = field.scan_completed_rows();
    assert_eq!(rows.as_slice(), &[14, 16]);
    field.shift_rows_down(&rows);

    let text = field.to_string();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[16], "#C   C     #");
    assert_eq!(lines[15], "#B         #");
    assert_eq!(lines[14], "#          #");
    assert_eq!(lines[13], "#          #");
    assert_eq!(lines[17], "############");
    assert!(borders_intact(&field));
}

#[test]
fn test_shift_order_of_rows_does_not_matter() {
    let rows = ["E         ", "AAAAAAAAAA", "AAAAAAAAAA", "F         "];
    let mut a = Field::from_rows(&rows).unwrap();
    let mut b = a.clone();
    a.shift_rows_down(&[14, 15]);
    b.shift_rows_down(&[15, 14]);
    assert_eq!(a, b);
    assert_eq!(a.get(1, 16), Some(FieldCell::Locked(PieceKind::LeftS)));
    // The E row fell by two.
    assert_eq!(a.get(1, 15), Some(FieldCell::Locked(PieceKind::RightL)));
    assert_eq!(a.get(1, 14), Some(FieldCell::Empty));
    assert_eq!(a.get(1, 13), Some(FieldCell::Empty));
}

#[test]
fn test_reset_clears_material() {
    let mut field = Field::from_rows(&["AAAAAAAAAA"]).unwrap();
    field.reset();
    assert_eq!(field, Field::new());
}
