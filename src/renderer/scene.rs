//! Draws one frame of the game onto a [`Surface`]

use super::surface::{Color, Surface};
use crate::centered;
use crate::consts::*;
use crate::sim::{GameState, Obstacle, PlayerState, Rotation};

const ROAD_TOP: i32 = 500;
const ROAD_HEIGHT: i32 = 30;
const FLOOR_TOP: i32 = 570;
const GRASS_TOP: i32 = 530;
const GRASS_SPACING: usize = 10;
const GRASS_AMPLITUDE: f64 = 10.0;
const EDGE_LINE: i32 = 6;

const SCORE_X: i32 = 20;
const SCORE_BASELINE: i32 = 640;

/// Draw background, player, score and obstacles, in that order
pub fn draw_frame<S: Surface + ?Sized>(surface: &mut S, state: &GameState) {
    surface.clear(Color::WHITE);
    draw_background(surface, state.sky);
    draw_player(surface, &state.player);
    draw_score(surface, state.score);
    for obstacle in &state.obstacles {
        draw_obstacle(surface, obstacle);
    }
}

fn draw_background<S: Surface + ?Sized>(surface: &mut S, sky: Rotation) {
    let (width, height) = (WIDTH as i32, HEIGHT as i32);
    let phase = f64::from(sky.degrees()).to_radians();

    // Wavy grass band, drifting with the sky phase
    for y in (0..height).step_by(GRASS_SPACING) {
        if y <= GRASS_TOP || y >= FLOOR_TOP {
            continue;
        }
        for x in 0..width {
            let offset = ((f64::from(x) + phase).sin() * GRASS_AMPLITUDE) as i32;
            surface.fill_rect(x, y + offset, 2, 2, Color::GREEN);
        }
    }

    surface.fill_rect(0, ROAD_TOP, width, ROAD_HEIGHT, Color::GRAY);
    surface.fill_rect(0, FLOOR_TOP, width, height - FLOOR_TOP, Color::LIGHT_GRAY);
    surface.fill_rect(0, ROAD_TOP, width, EDGE_LINE, Color::BLACK);
}

fn draw_player<S: Surface + ?Sized>(surface: &mut S, player: &PlayerState) {
    let (x, y) = (player.position.x, player.position.y);
    surface.fill_oval(centered(x, 30), centered(y, 30), 30, 30, Color::BLACK);
    // Half disc shows the spin
    surface.fill_arc(
        centered(x, 25),
        centered(y, 25),
        25,
        25,
        player.rotation.degrees(),
        -180,
        Color::WHITE,
    );
    surface.fill_oval(centered(x, 15), centered(y, 15), 15, 15, Color::BLACK);
    surface.fill_oval(centered(x, 12), centered(y, 12), 12, 12, Color::RED);
}

fn draw_score<S: Surface + ?Sized>(surface: &mut S, score: u64) {
    surface.draw_text(&format!("Score: {score}"), SCORE_X, SCORE_BASELINE, Color::BLACK);
}

fn draw_obstacle<S: Surface + ?Sized>(surface: &mut S, obstacle: &Obstacle) {
    let color = match obstacle {
        Obstacle::Falling { .. } => Color::RED,
        Obstacle::Sliding { .. } => Color::ORANGE,
        Obstacle::Scrolling { .. } => Color::BLUE,
    };
    let size = obstacle.size() as i32;
    let p = obstacle.position();
    surface.fill_rect(centered(p.x, size), centered(p.y, size), size, size, color);
}
