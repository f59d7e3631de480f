//! GameView: composes a [`GameSnapshot`] into the fixed-size screen buffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Layout, in screen characters:
//!
//! - the screen is [`SCREEN_WIDTH`] x [`SCREEN_HEIGHT`]
//! - the field, borders included, starts at ([`FIELD_OFFSET_X`], [`FIELD_OFFSET_Y`]),
//!   one character per cell
//! - the score line `SCORE: nnnnnnnn` sits at ([`SCORE_X`], [`SCORE_Y`])

use std::fmt::{self, Write as _};

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{
    FieldCell, PieceKind, FIELD_HEIGHT, FIELD_OFFSET_X, FIELD_OFFSET_Y, FIELD_WIDTH, SCORE_DIGITS,
    SCORE_X, SCORE_Y, SCREEN_HEIGHT, SCREEN_WIDTH,
};

const BORDER: CellStyle = CellStyle::PLAIN.with_fg(Rgb::new(150, 150, 160));
const EMPTY: CellStyle = CellStyle::PLAIN.with_bg(Rgb::new(20, 20, 28));
const COMPLETED: CellStyle = CellStyle::PLAIN
    .with_fg(Rgb::new(255, 255, 255))
    .with_bg(Rgb::new(90, 90, 110))
    .bold();
const SCORE: CellStyle = CellStyle::PLAIN.with_fg(Rgb::new(240, 240, 240)).bold();

/// Foreground color of a piece kind.
pub fn kind_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::Line => Rgb::new(80, 220, 220),
        PieceKind::Tee => Rgb::new(200, 120, 220),
        PieceKind::Cube => Rgb::new(240, 220, 80),
        PieceKind::LeftL => Rgb::new(80, 120, 220),
        PieceKind::RightL => Rgb::new(255, 165, 0),
        PieceKind::LeftS => Rgb::new(100, 220, 120),
        PieceKind::RightS => Rgb::new(220, 80, 80),
    }
}

fn cell_style(cell: FieldCell) -> CellStyle {
    match cell {
        FieldCell::Empty => EMPTY,
        FieldCell::Border => BORDER,
        FieldCell::Locked(kind) => EMPTY.with_fg(kind_color(kind)),
        FieldCell::Completed => COMPLETED,
    }
}

/// Writes formatted text into the buffer left to right, one cell per char.
struct TextCursor<'a> {
    fb: &'a mut FrameBuffer,
    x: u16,
    y: u16,
    style: CellStyle,
}

impl fmt::Write for TextCursor<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.fb.put_str(self.x, self.y, s, self.style);
        self.x = self.x.saturating_add(s.chars().count() as u16);
        Ok(())
    }
}

/// Draw `SCORE: nnnnnnnn` at the score position without going through a `String`.
fn draw_score(fb: &mut FrameBuffer, score: u32) {
    let mut cursor = TextCursor {
        fb,
        x: SCORE_X,
        y: SCORE_Y,
        style: SCORE,
    };
    // TextCursor never fails.
    let _ = write!(cursor, "SCORE: {:>width$}", score, width = SCORE_DIGITS);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GameView;

impl GameView {
    pub fn new() -> Self {
        Self
    }

    /// A buffer of the screen size, ready for [`GameView::render_into`].
    pub fn screen(&self) -> FrameBuffer {
        FrameBuffer::new(SCREEN_WIDTH, SCREEN_HEIGHT)
    }

    /// Render the snapshot into an existing screen buffer.
    ///
    /// Every cell of the buffer is rewritten, so callers can reuse one buffer
    /// across frames.
    pub fn render_into(&self, snap: &GameSnapshot, fb: &mut FrameBuffer) {
        fb.clear(CellStyle::PLAIN.cell(' '));

        for y in 0..FIELD_HEIGHT {
            for x in 0..FIELD_WIDTH {
                let cell = snap.cell(x, y);
                fb.put_char(
                    FIELD_OFFSET_X + x as u16,
                    FIELD_OFFSET_Y + y as u16,
                    cell.glyph(),
                    cell_style(cell),
                );
            }
        }

        if let Some(active) = &snap.active {
            let style = EMPTY.with_fg(kind_color(active.kind)).bold();
            for (x, y) in active.cells() {
                // Rows above the field are not drawn.
                if x < 0 || y < 0 {
                    continue;
                }
                fb.put_char(
                    FIELD_OFFSET_X + x as u16,
                    FIELD_OFFSET_Y + y as u16,
                    active.kind.letter(),
                    style,
                );
            }
        }

        draw_score(fb, snap.score);
    }

    pub fn render(&self, snap: &GameSnapshot) -> FrameBuffer {
        let mut fb = self.screen();
        self.render_into(snap, &mut fb);
        fb
    }
}
