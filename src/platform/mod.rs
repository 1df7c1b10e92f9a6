//! Platform layer
//!
//! Everything the simulation needs from the outside world:
//! - Keyboard state (terminal events or a script)
//! - Tick pacing
//! - Terminal setup and teardown

pub mod keyboard;
pub mod pacing;
pub mod scripted;
pub mod terminal;

pub use keyboard::{HeldKeys, Key, Keyboard};
pub use pacing::{Pacing, TickScheduler};
pub use scripted::ScriptedInput;
pub use terminal::TerminalSession;

use crate::sim::TickInput;

/// Source of the held-key snapshot taken at the start of every tick
pub trait InputSampler {
    fn sample(&mut self) -> TickInput;
}
