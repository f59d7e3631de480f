//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the rules of the falling-block game and nothing else.
//! It has no dependency on the terminal or the keyboard, so it is:
//!
//! - **Deterministic**: the same seed and the same control stream produce the
//!   same game
//! - **Testable**: every rule is exercised by plain unit tests
//! - **Clock-free**: the engine counts ticks; the driver owns wall time
//!
//! # Module Structure
//!
//! - [`shapes`]: the seven base shape masks
//! - [`rotation`]: quarter-turn transforms of a mask
//! - [`piece`]: the falling piece (kind, anchor, rotation, cached mask)
//! - [`field`]: the bordered 12x18 arena, locking and row removal
//! - [`collision`]: does a pose fit?
//! - [`scoring`]: lock points, line bonus, speed ramp
//! - [`session`]: per-game counters and input latches
//! - [`rng`]: seeded piece source
//! - [`game`]: the per-tick controller
//! - [`snapshot`]: a copy of the state for renderers
//!
//! # Game Rules
//!
//! - Pieces enter at (4, -2), above the field, and fall one row every
//!   gravity period (20 ticks at first, one tick faster every 10 locks, never
//!   under 2). Holding soft drop forces a drop every tick.
//! - Rotate, left and right fire once per press. Rotation is clockwise with
//!   no wall kicks; a blocked move is simply dropped.
//! - A piece that cannot descend locks. Every lock scores 25, plus
//!   `100 * 2^lines` when it completes rows.
//! - The game ends when a new piece does not fit, or when a piece comes to
//!   rest with its anchor still above the field.
//!
//! # Example
//!
//! ```
//! use blockfall_core::{Game, TickEvent};
//! use blockfall_core::types::{Control, Controls};
//!
//! let mut game = Game::new(12345);
//! assert_eq!(game.tick(Controls::NONE), TickEvent::Idle);
//!
//! let before = game.active().unwrap().x();
//! game.tick(Controls::NONE.with(Control::MoveRight));
//! assert_eq!(game.active().unwrap().x(), before + 1);
//! ```

pub mod collision;
pub mod field;
pub mod game;
pub mod piece;
pub mod rng;
pub mod rotation;
pub mod scoring;
pub mod session;
pub mod shapes;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use collision::fits;
pub use field::{CompletedRows, Field};
pub use game::{Game, GameOverReason, Phase, TickEvent};
pub use piece::ActivePiece;
pub use rng::PieceSource;
pub use rotation::{rotate, rotate_mask};
pub use scoring::{line_bonus, lock_points};
pub use session::Session;
pub use shapes::{base_shape, ShapeMask};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
