//! Blockfall (workspace facade crate).
//!
//! Re-exports the workspace crates under short names so the runner, the
//! integration tests and the benchmarks share one import path:
//! `blockfall::{core, input, term, types}`. [`runner`] holds the tick step
//! the binary loops over.

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;

pub mod runner;
