//! Game state and core simulation types
//!
//! Everything one tick reads or writes lives in [`GameState`].

use glam::DVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::rotation::Rotation;
use crate::consts::*;
use crate::spawn_point;

/// Which obstacle course is played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    /// Falling and sliding squares spawned at random, running enabled
    #[default]
    Arcade,
    /// A fixed course of squares scrolling in from the right, no running
    Classic,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Arcade => "arcade",
            GameMode::Classic => "classic",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "arcade" => Some(GameMode::Arcade),
            "classic" => Some(GameMode::Classic),
            _ => None,
        }
    }
}

/// The player's avatar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub position: DVec2,
    /// Persistent velocity (directional input is not folded in)
    pub velocity: DVec2,
    pub rotation: Rotation,
    /// Whether the double jump of the current excursion is spent
    pub double_jumped: bool,
    /// Ticks left before a double jump is allowed; reset on landing
    pub double_jump_cooldown: u32,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            position: spawn_point(),
            velocity: DVec2::ZERO,
            rotation: Rotation::default(),
            double_jumped: false,
            double_jump_cooldown: DOUBLE_JUMP_COOLDOWN,
        }
    }
}

impl PlayerState {
    pub fn is_grounded(&self) -> bool {
        self.position.y == GROUND_Y
    }
}

/// Obstacle variant, without payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Falling,
    Sliding,
    Scrolling,
}

/// An obstacle snapshot. Each tick replaces it with the result of [`Obstacle::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Obstacle {
    /// Grows from nothing to full size while dropping out of the sky
    Falling { position: DVec2, ticks: u32 },
    /// Slides along the ground; `forwards` means left to right
    Sliding { position: DVec2, forwards: bool },
    /// Classic course block scrolling towards the left edge
    Scrolling { position: DVec2 },
}

impl Obstacle {
    pub fn falling(position: DVec2) -> Self {
        Obstacle::Falling { position, ticks: 0 }
    }

    pub fn kind(&self) -> ObstacleKind {
        match self {
            Obstacle::Falling { .. } => ObstacleKind::Falling,
            Obstacle::Sliding { .. } => ObstacleKind::Sliding,
            Obstacle::Scrolling { .. } => ObstacleKind::Scrolling,
        }
    }

    pub fn position(&self) -> DVec2 {
        match *self {
            Obstacle::Falling { position, .. }
            | Obstacle::Sliding { position, .. }
            | Obstacle::Scrolling { position } => position,
        }
    }

    /// Edge length in pixels as currently drawn
    pub fn size(&self) -> f64 {
        match *self {
            Obstacle::Falling { ticks, .. } => {
                OBSTACLE_SIZE * f64::from(ticks) / f64::from(FALLING_MAX_TICKS)
            }
            Obstacle::Sliding { .. } | Obstacle::Scrolling { .. } => OBSTACLE_SIZE,
        }
    }

    /// Next snapshot: move one tick along the variant's path
    pub fn tick(self) -> Self {
        match self {
            Obstacle::Falling { position, ticks } => Obstacle::Falling {
                position: position + DVec2::new(0.0, FALLING_SPEED),
                ticks: (ticks + 1).min(FALLING_MAX_TICKS),
            },
            Obstacle::Sliding { position, forwards } => {
                let dx = if forwards { SLIDING_SPEED } else { -SLIDING_SPEED };
                Obstacle::Sliding {
                    position: position + DVec2::new(dx, 0.0),
                    forwards,
                }
            }
            Obstacle::Scrolling { position } => Obstacle::Scrolling {
                position: position - DVec2::new(SCROLLING_SPEED, 0.0),
            },
        }
    }

    /// Whether the obstacle has left the playfield and should be scored.
    ///
    /// Scrolling blocks start beyond the right edge, so only the left and
    /// bottom edges count for them.
    pub fn is_out_of_bounds(&self) -> bool {
        let p = self.position();
        match self {
            Obstacle::Scrolling { .. } => p.x < 0.0 || p.y > HEIGHT,
            _ => p.x < 0.0 || p.x > WIDTH || p.y > HEIGHT,
        }
    }
}

/// Something that happened during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Jumped,
    DoubleJumped,
    /// Player touched down after being airborne
    Landed,
    ObstacleSpawned(ObstacleKind),
    /// An obstacle crossed a boundary and was scored
    ObstacleCleared(ObstacleKind),
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub mode: GameMode,
    pub player: PlayerState,
    /// Live obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    pub score: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Decorative phase used to animate the ground band
    pub sky: Rotation,
    rng: Pcg32,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64, mode: GameMode) -> Self {
        Self {
            seed,
            mode,
            player: PlayerState::default(),
            obstacles: Vec::new(),
            score: 0,
            time_ticks: 0,
            sky: Rotation::default(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub(crate) fn rng_mut(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Serializable view of the gameplay-relevant state
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            seed: self.seed,
            mode: self.mode,
            time_ticks: self.time_ticks,
            score: self.score,
            player: &self.player,
            obstacles: &self.obstacles,
        }
    }
}

/// Borrowed view of a [`GameState`] for JSON output
#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub seed: u64,
    pub mode: GameMode,
    pub time_ticks: u64,
    pub score: u64,
    pub player: &'a PlayerState,
    pub obstacles: &'a [Obstacle],
}
