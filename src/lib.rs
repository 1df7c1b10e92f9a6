//! Hopscroll - a side-scrolling jump-and-dodge arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player physics, obstacles, scoring)
//! - `renderer`: Drawing surface, software canvas and terminal presenter
//! - `platform`: Keyboard state, scripted input and tick pacing
//! - `audio`: Audible alerts
//! - `settings`: Persisted preferences
//! - `cli`: Command line overrides
//! - `app`: The thin driver that loops, sleeps and does IO

pub mod app;
pub mod audio;
pub mod cli;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use platform::Pacing;
pub use settings::Settings;
pub use sim::GameMode;

use glam::DVec2;

/// Game configuration constants
pub mod consts {
    use glam::DVec2;

    /// Surface dimensions (pixels)
    pub const WIDTH: f64 = 650.0;
    pub const HEIGHT: f64 = 650.0;

    /// Simulation rate
    pub const TICKS_PER_SECOND: u32 = 30;
    /// Pause used by the fixed-delay scheduler (1000 / 30, truncated)
    pub const FIXED_DELAY_MS: u64 = 33;

    /// Ground level; the player never sinks below it
    pub const GROUND_Y: f64 = 540.0;
    /// Downward acceleration applied every airborne tick
    pub const GRAVITY: DVec2 = DVec2::new(0.0, 2.0);
    /// Upward impulse of a jump or double jump
    pub const JUMP_IMPULSE: DVec2 = DVec2::new(0.0, -20.0);
    /// Horizontal offset added per tick while a direction is held
    pub const HORIZONTAL_SPEED: f64 = 5.0;
    /// Running scales the instantaneous velocity per axis
    pub const RUN_SCALE: DVec2 = DVec2::new(2.0, 1.5);
    /// Ticks after landing before a double jump becomes available
    pub const DOUBLE_JUMP_COOLDOWN: u32 = 8;
    /// Degrees of spin per tick while moving
    pub const SPIN_PER_TICK: i32 = 20;

    /// Arcade spawn probabilities (independent per tick)
    pub const FALLING_SPAWN_CHANCE: f64 = 0.025;
    pub const SLIDING_SPAWN_CHANCE: f64 = 0.0125;

    /// Obstacle motion (pixels per tick)
    pub const FALLING_SPEED: f64 = 6.0;
    pub const SLIDING_SPEED: f64 = 6.0;
    pub const SCROLLING_SPEED: f64 = 10.0;
    /// Growth counter cap for falling squares
    pub const FALLING_MAX_TICKS: u32 = 10;
    /// Full edge length of an obstacle square
    pub const OBSTACLE_SIZE: f64 = 30.0;

    /// Classic course: one obstacle every interval, entering from beyond the right edge
    pub const CLASSIC_SPAWN_INTERVAL: u64 = 30;
    pub const CLASSIC_SPAWN_X: f64 = 800.0;
}

/// Top-left corner of a box of `size` centred on `center`, truncated to pixels
#[inline]
pub fn centered(center: f64, size: i32) -> i32 {
    center as i32 - size / 2
}

/// Starting position of the player: centred on the ground
#[inline]
pub fn spawn_point() -> DVec2 {
    DVec2::new(consts::WIDTH / 2.0, consts::GROUND_Y)
}
