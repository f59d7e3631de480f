//! Terminal input module (engine-facing).
//!
//! This module is intentionally independent of the engine. It maps `crossterm`
//! key events to [`crate::types::Control`]s and keeps the held state the
//! engine samples once per tick, including for terminals without key-release
//! events.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

pub mod handler;
pub mod map;

pub use blockfall_types as types;

pub use handler::{InputHandler, DEFAULT_KEY_RELEASE_TIMEOUT_MS};
pub use map::{control_for_key, should_quit};

/// Why [`pump_until`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSignal {
    /// The deadline passed.
    Timeout,
    /// A quit key was pressed.
    Quit,
    /// The terminal was resized and the screen needs a full redraw.
    Resize,
}

/// Feed one terminal event to `handler`. Returns a signal the runner must act
/// on before the deadline.
pub fn handle_event(handler: &mut InputHandler, event: Event, now: Instant) -> Option<InputSignal> {
    match event {
        Event::Key(key) => {
            if key.kind == KeyEventKind::Press && should_quit(key) {
                return Some(InputSignal::Quit);
            }
            handler.handle_key_event(key, now);
            None
        }
        Event::Resize(..) => Some(InputSignal::Resize),
        Event::FocusLost => {
            handler.reset();
            None
        }
        _ => None,
    }
}

/// Read terminal events into `handler` until `deadline`.
///
/// Returns early on a quit key or a resize.
pub fn pump_until(handler: &mut InputHandler, deadline: Instant) -> Result<InputSignal> {
    loop {
        let timeout = deadline
            .checked_duration_since(Instant::now())
            .unwrap_or(Duration::ZERO);

        if !event::poll(timeout)? {
            return Ok(InputSignal::Timeout);
        }
        if let Some(signal) = handle_event(handler, event::read()?, Instant::now()) {
            return Ok(signal);
        }
        if Instant::now() >= deadline {
            return Ok(InputSignal::Timeout);
        }
    }
}
