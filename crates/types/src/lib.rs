//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data with no external dependencies, so they can be used
//! by the engine, the terminal renderer and the input layer alike.
//!
//! # Field Dimensions
//!
//! The playing field is a bordered arena:
//!
//! - **Interior**: 10 columns by 17 rows
//! - **Border**: one column on each side, one row at the bottom
//! - **Total**: 12 columns by 18 rows, row-major, row 0 at the top
//! - **Entry point**: pieces enter at (4, -2), above the visible field
//!
//! # Timing
//!
//! The engine counts ticks, not milliseconds. The runner sleeps
//! [`TICK_MS`] between ticks and [`FLASH_TICKS`] ticks on a line clear.
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 50 | Length of one game tick |
//! | `INITIAL_GRAVITY_PERIOD` | 20 | Ticks per forced drop at game start |
//! | `MIN_GRAVITY_PERIOD` | 2 | Floor for the gravity period |
//! | `SPEEDUP_EVERY` | 10 | Locked pieces between speed-ups |
//! | `FLASH_TICKS` | 8 | Line-clear flash length in ticks |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{FieldCell, PieceKind, FIELD_HEIGHT, FIELD_WIDTH};
//!
//! let kind = PieceKind::from_index(1).unwrap();
//! assert_eq!(kind, PieceKind::Tee);
//! assert_eq!(kind.letter(), 'B');
//! assert_eq!(PieceKind::from_letter('B'), Some(PieceKind::Tee));
//!
//! assert_eq!(FieldCell::Border.glyph(), '#');
//! assert_eq!(FIELD_WIDTH, 12);
//! assert_eq!(FIELD_HEIGHT, 18);
//! ```

/// Interior (playable) width in cells.
pub const INTERIOR_WIDTH: usize = 10;

/// Interior (playable) height in cells.
pub const INTERIOR_HEIGHT: usize = 17;

/// Total field width including the left and right border columns.
pub const FIELD_WIDTH: usize = INTERIOR_WIDTH + 2;

/// Total field height including the bottom border row.
pub const FIELD_HEIGHT: usize = INTERIOR_HEIGHT + 1;

/// Shape masks are 4x4.
pub const MASK_SIZE: usize = 4;

/// Anchor column for freshly spawned pieces.
pub const ENTRY_X: i32 = 4;

/// Anchor row for freshly spawned pieces (negative: enters from above).
pub const ENTRY_Y: i32 = -2;

/// Fixed tick length in milliseconds.
pub const TICK_MS: u64 = 50;

/// Line-clear flash length, in ticks (8 * 50ms = 400ms).
pub const FLASH_TICKS: u32 = 8;

/// Ticks between forced drops at the start of a game.
pub const INITIAL_GRAVITY_PERIOD: u32 = 20;

/// The gravity period never drops below this many ticks.
pub const MIN_GRAVITY_PERIOD: u32 = 2;

/// Every this many locked pieces the gravity period shrinks by one.
pub const SPEEDUP_EVERY: u32 = 10;

/// Points awarded for every locked piece.
pub const LOCK_SCORE: u32 = 25;

/// Multiplier of the line bonus `LINE_BONUS_BASE * 2^lines`.
pub const LINE_BONUS_BASE: u32 = 100;

/// Screen buffer width in characters.
pub const SCREEN_WIDTH: u16 = 120;

/// Screen buffer height in characters.
pub const SCREEN_HEIGHT: u16 = 30;

/// Screen column of the field's left border.
pub const FIELD_OFFSET_X: u16 = 2;

/// Screen row of the field's top row.
pub const FIELD_OFFSET_Y: u16 = 6;

/// Screen position of the score overlay.
pub const SCORE_X: u16 = FIELD_WIDTH as u16 + 6;
pub const SCORE_Y: u16 = 2;

/// Width the score value is padded to.
pub const SCORE_DIGITS: usize = 8;

/// The seven piece kinds.
///
/// Declaration order matters: it is the index used by the random source and
/// the order of the kind letters `A`..`G`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Line,
    Tee,
    Cube,
    LeftL,
    RightL,
    LeftS,
    RightS,
}

impl PieceKind {
    /// All kinds in index order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::Line,
        PieceKind::Tee,
        PieceKind::Cube,
        PieceKind::LeftL,
        PieceKind::RightL,
        PieceKind::LeftS,
        PieceKind::RightS,
    ];

    /// Number of kinds.
    pub const COUNT: usize = 7;

    /// Map an index in `0..7` to a kind.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Letter written into the field when a piece of this kind locks.
    pub fn letter(self) -> char {
        match self {
            PieceKind::Line => 'A',
            PieceKind::Tee => 'B',
            PieceKind::Cube => 'C',
            PieceKind::LeftL => 'D',
            PieceKind::RightL => 'E',
            PieceKind::LeftS => 'F',
            PieceKind::RightS => 'G',
        }
    }

    /// Inverse of [`PieceKind::letter`].
    pub fn from_letter(letter: char) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.letter() == letter)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PieceKind::Line => "line",
            PieceKind::Tee => "tee",
            PieceKind::Cube => "cube",
            PieceKind::LeftL => "left-l",
            PieceKind::RightL => "right-l",
            PieceKind::LeftS => "left-s",
            PieceKind::RightS => "right-s",
        }
    }
}

/// Rotation states (North = canonical orientation, index 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    #[default]
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Map any integer onto a rotation, wrapping modulo 4 in both directions.
    pub fn from_index(index: i32) -> Self {
        match index.rem_euclid(4) {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }

    /// Index in `0..=3` (quarter turns clockwise from North).
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Rotate clockwise
    pub fn rotate_cw(self) -> Self {
        Self::from_index(self.index() as i32 + 1)
    }

    /// Rotate counter-clockwise
    pub fn rotate_ccw(self) -> Self {
        Self::from_index(self.index() as i32 - 1)
    }
}

/// One cell of the field arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FieldCell {
    #[default]
    Empty,
    /// Permanent wall/floor sentinel.
    Border,
    /// Settled material from a locked piece.
    Locked(PieceKind),
    /// Interior cell of a row that was just completed and awaits removal.
    Completed,
}

impl FieldCell {
    pub fn is_empty(self) -> bool {
        matches!(self, FieldCell::Empty)
    }

    /// Character used when the field is drawn as text.
    pub fn glyph(self) -> char {
        match self {
            FieldCell::Empty => ' ',
            FieldCell::Border => '#',
            FieldCell::Locked(kind) => kind.letter(),
            FieldCell::Completed => '=',
        }
    }

    /// Inverse of [`FieldCell::glyph`].
    pub fn from_glyph(ch: char) -> Option<Self> {
        match ch {
            ' ' => Some(FieldCell::Empty),
            '#' => Some(FieldCell::Border),
            '=' => Some(FieldCell::Completed),
            other => PieceKind::from_letter(other).map(FieldCell::Locked),
        }
    }
}

/// Logical controls sampled once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Rotate,
    MoveLeft,
    MoveRight,
    SoftDrop,
}

impl Control {
    pub const ALL: [Control; 4] = [
        Control::Rotate,
        Control::MoveLeft,
        Control::MoveRight,
        Control::SoftDrop,
    ];

    /// Number of controls.
    pub const COUNT: usize = 4;

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Control::Rotate => "rotate",
            Control::MoveLeft => "moveLeft",
            Control::MoveRight => "moveRight",
            Control::SoftDrop => "softDrop",
        }
    }
}

/// Raw held state of every control for one tick.
///
/// This is level state straight from the input source. Edge detection is the
/// engine's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Controls {
    pub rotate: bool,
    pub move_left: bool,
    pub move_right: bool,
    pub soft_drop: bool,
}

impl Controls {
    /// No control held.
    pub const NONE: Controls = Controls {
        rotate: false,
        move_left: false,
        move_right: false,
        soft_drop: false,
    };

    pub fn is_held(&self, control: Control) -> bool {
        match control {
            Control::Rotate => self.rotate,
            Control::MoveLeft => self.move_left,
            Control::MoveRight => self.move_right,
            Control::SoftDrop => self.soft_drop,
        }
    }

    pub fn set(&mut self, control: Control, held: bool) {
        match control {
            Control::Rotate => self.rotate = held,
            Control::MoveLeft => self.move_left = held,
            Control::MoveRight => self.move_right = held,
            Control::SoftDrop => self.soft_drop = held,
        }
    }

    /// Builder-style helper, mostly for tests and scripted input.
    pub fn with(mut self, control: Control) -> Self {
        self.set(control, true);
        self
    }
}
