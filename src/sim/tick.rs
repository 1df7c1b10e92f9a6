//! Fixed timestep simulation tick
//!
//! Core game loop step that advances the simulation deterministically.

use serde::{Deserialize, Serialize};

use super::obstacles;
use super::physics::step_player;
use super::state::{GameEvent, GameState};

/// Key state sampled for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Jump / double jump
    pub jump: bool,
    pub left: bool,
    pub right: bool,
    /// Running modifier (arcade only)
    pub run: bool,
}

/// Advance the game state by one tick.
///
/// Order: player step, spawn, obstacle motion, prune and score, sky phase.
/// Obstacles never collide with the player; they only score by leaving.
pub fn advance(mut state: GameState, input: &TickInput) -> (GameState, Vec<GameEvent>) {
    let step = step_player(&state.player, input, state.mode);
    state.player = step.player;
    let mut events = step.events;

    let (mode, time_ticks) = (state.mode, state.time_ticks);
    let spawned = obstacles::spawn(mode, time_ticks, state.rng_mut());
    for obstacle in &spawned {
        log::debug!("tick {}: spawned {:?} at {}", time_ticks, obstacle.kind(), obstacle.position());
        events.push(GameEvent::ObstacleSpawned(obstacle.kind()));
    }
    state.obstacles.extend(spawned);

    let (kept, cleared) = obstacles::prune(obstacles::advance(std::mem::take(&mut state.obstacles)));
    state.obstacles = kept;
    for obstacle in &cleared {
        state.score += 1;
        log::debug!("tick {}: cleared {:?}, score {}", time_ticks, obstacle.kind(), state.score);
        events.push(GameEvent::ObstacleCleared(obstacle.kind()));
    }

    state.sky = state.sky.next();
    state.time_ticks += 1;

    log::trace!(
        "tick {}: player {} vel {} rot {}",
        state.time_ticks,
        state.player.position,
        state.player.velocity,
        state.player.rotation.degrees()
    );

    (state, events)
}
