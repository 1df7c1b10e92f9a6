//! Player physics for one tick
//!
//! Order of operations:
//! 1. Jump impulses (ground jump, then the cooldown-gated double jump)
//! 2. Gravity while airborne
//! 3. Velocity integration, then directional/running offsets
//! 4. Position integration
//! 5. Ground clamp, spin, wall clamp

use glam::DVec2;

use super::state::{GameEvent, GameMode, PlayerState};
use super::tick::TickInput;
use crate::consts::*;

/// Result of stepping the player once
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerStep {
    pub player: PlayerState,
    pub events: Vec<GameEvent>,
}

/// Advance the player by one tick
pub fn step_player(player: &PlayerState, input: &TickInput, mode: GameMode) -> PlayerStep {
    let mut events = Vec::new();
    let grounded = player.is_grounded();

    let mut acceleration = DVec2::ZERO;
    let ground_jump = input.jump && grounded;
    if ground_jump {
        acceleration += JUMP_IMPULSE;
        events.push(GameEvent::Jumped);
    }

    let mut cooldown = player.double_jump_cooldown.saturating_sub(1);
    let mut double_jumped = player.double_jumped;
    if input.jump && !grounded && !double_jumped && cooldown == 0 {
        acceleration += JUMP_IMPULSE;
        double_jumped = true;
        events.push(GameEvent::DoubleJumped);
    }

    // A ground jump leaves the ground this very tick
    if !grounded || ground_jump {
        acceleration += GRAVITY;
    }

    let mut velocity = player.velocity + acceleration;

    let mut instantaneous = velocity;
    if input.left {
        instantaneous.x -= HORIZONTAL_SPEED;
    }
    if input.right {
        instantaneous.x += HORIZONTAL_SPEED;
    }
    if input.run && mode == GameMode::Arcade {
        instantaneous *= RUN_SCALE;
    }

    let mut position = player.position + instantaneous;

    if position.y >= GROUND_Y {
        position.y = GROUND_Y;
        velocity.y = 0.0;
        double_jumped = false;
        cooldown = DOUBLE_JUMP_COOLDOWN;
        if !grounded {
            events.push(GameEvent::Landed);
        }
    }

    let mut at_wall = false;
    if position.x <= 0.0 {
        position.x = 0.0;
        velocity.x = 0.0;
        at_wall = true;
    }
    if position.x >= WIDTH {
        position.x = WIDTH;
        velocity.x = 0.0;
        at_wall = true;
    }

    let rotation = if at_wall {
        player.rotation
    } else {
        match mode {
            GameMode::Arcade => {
                let mut angular = 0;
                if input.right {
                    angular -= SPIN_PER_TICK;
                }
                if input.left {
                    angular += SPIN_PER_TICK;
                }
                player.rotation.next_by(angular)
            }
            GameMode::Classic => {
                let mut rotation = player.rotation;
                if input.right {
                    rotation = rotation.next_by(-SPIN_PER_TICK);
                }
                if input.left {
                    rotation = rotation.next_by(SPIN_PER_TICK);
                }
                rotation
            }
        }
    };

    PlayerStep {
        player: PlayerState {
            position,
            velocity,
            rotation,
            double_jumped,
            double_jump_cooldown: cooldown,
        },
        events,
    }
}
