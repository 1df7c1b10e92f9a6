//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed tick only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod obstacles;
pub mod physics;
pub mod rotation;
pub mod state;
pub mod tick;

pub use physics::{PlayerStep, step_player};
pub use rotation::Rotation;
pub use state::{GameEvent, GameMode, GameState, Obstacle, ObstacleKind, PlayerState, Snapshot};
pub use tick::{TickInput, advance};
