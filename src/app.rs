//! Game driver
//!
//! Owns the loop: sample input, advance the simulation, react to events,
//! redraw, pause. All IO lives here or below `platform`; `sim` stays pure.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::Context;
use parking_lot::Mutex;

use crate::audio::{AudioManager, SoundEffect};
use crate::consts::{HEIGHT, TICKS_PER_SECOND, WIDTH};
use crate::platform::{InputSampler, Keyboard, ScriptedInput, TerminalSession, TickScheduler};
use crate::renderer::{Canvas, SharedCanvas, TerminalPresenter, draw_frame};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, advance};

/// Seed from settings, or from the clock
pub fn resolve_seed(settings: &Settings) -> u64 {
    settings.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default()
    })
}

fn new_canvas() -> Canvas {
    Canvas::new(WIDTH as u32, HEIGHT as u32)
}

/// One update: sample keys, advance, ring the bell for every cleared obstacle
pub fn step<I, W>(state: GameState, input: &mut I, audio: &mut AudioManager<W>) -> GameState
where
    I: InputSampler,
    W: Write,
{
    let keys = input.sample();
    let (state, events) = advance(state, &keys);
    for event in &events {
        if let GameEvent::ObstacleCleared(_) = event {
            audio.play(SoundEffect::ObstacleCleared);
        }
    }
    state
}

/// Run `ticks` updates back to back
pub fn simulate<I, W>(mut state: GameState, ticks: u64, input: &mut I, audio: &mut AudioManager<W>) -> GameState
where
    I: InputSampler,
    W: Write,
{
    for _ in 0..ticks {
        state = step(state, input, audio);
    }
    state
}

/// Interactive game in the terminal until Esc or Ctrl-C
pub fn run_terminal(settings: &Settings) -> anyhow::Result<GameState> {
    let seed = resolve_seed(settings);
    // Dropped last, after the threads below have stopped writing
    let session = TerminalSession::enter()?;

    let mut scheduler = TickScheduler::new(settings.pacing, TICKS_PER_SECOND);
    // Repaint once per tick
    let canvas: SharedCanvas = Arc::new(Mutex::new(new_canvas()));
    let presenter = TerminalPresenter::spawn(Arc::clone(&canvas), scheduler.period())?;
    let mut keyboard = Keyboard::spawn(
        session.release_aware(),
        Duration::from_millis(settings.key_hold_ms),
    )?;
    let mut audio = AudioManager::new();
    audio.set_muted(!settings.sound);

    let mut state = GameState::new(seed, settings.mode);
    log::info!(
        "starting {} game (seed {seed}, {} pacing, sound {})",
        settings.mode.as_str(),
        settings.pacing.as_str(),
        if audio.is_muted() { "off" } else { "on" }
    );

    while !keyboard.quit_requested() {
        state = step(state, &mut keyboard, &mut audio);
        draw_frame(&mut *canvas.lock(), &state);
        if presenter.has_exited() {
            break;
        }
        scheduler.pause();
    }

    keyboard.shutdown()?;
    presenter.shutdown()?;
    drop(session);
    log::info!("game over after {} ticks, score {}", state.time_ticks, state.score);
    Ok(state)
}

/// Run without a terminal, write the final state as JSON to `out`
/// and optionally the final frame as a PPM image
pub fn run_headless<W: Write>(
    settings: &Settings,
    ticks: u64,
    dump_frame: Option<&Path>,
    mut out: W,
) -> anyhow::Result<GameState> {
    let seed = resolve_seed(settings);
    log::info!("headless {} run: {ticks} ticks, seed {seed}", settings.mode.as_str());

    // stderr carries the logs here, keep it free of bells
    let mut audio = AudioManager::new();
    audio.set_muted(true);
    let state = simulate(
        GameState::new(seed, settings.mode),
        ticks,
        &mut ScriptedInput::idle(),
        &mut audio,
    );

    serde_json::to_writer(&mut out, &state.snapshot()).context("failed to encode snapshot")?;
    writeln!(out).context("failed to write snapshot")?;

    if let Some(path) = dump_frame {
        let mut canvas = new_canvas();
        draw_frame(&mut canvas, &state);
        let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
        canvas
            .write_ppm(BufWriter::new(file))
            .with_context(|| format!("failed to write frame to {}", path.display()))?;
        log::info!("frame written to {}", path.display());
    }
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{GameMode, TickInput};

    fn seeded(mode: GameMode) -> Settings {
        Settings {
            mode,
            seed: Some(11),
            ..Settings::default()
        }
    }

    #[test]
    fn test_seed_from_settings() {
        assert_eq!(resolve_seed(&seeded(GameMode::Arcade)), 11);
    }

    #[test]
    fn test_bell_rings_once_per_cleared_obstacle() {
        let mut audio = AudioManager::with_writer(Vec::new());
        let state = simulate(
            GameState::new(1, GameMode::Classic),
            200,
            &mut ScriptedInput::idle(),
            &mut audio,
        );
        assert!(state.score > 0);
        assert_eq!(audio.into_inner().len() as u64, state.score);
    }

    #[test]
    fn test_scripted_jump_leaves_ground() {
        let jump = TickInput { jump: true, ..Default::default() };
        let mut input = ScriptedInput::new(vec![(0, jump), (1, TickInput::default())]);
        let mut audio = AudioManager::with_writer(Vec::new());
        let state = simulate(GameState::new(1, GameMode::Arcade), 3, &mut input, &mut audio);
        assert!(!state.player.is_grounded());
    }

    #[test]
    fn test_headless_prints_snapshot() {
        let mut out = Vec::new();
        let state = run_headless(&seeded(GameMode::Classic), 81, None, &mut out).unwrap();
        assert_eq!(state.score, 1);

        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["time_ticks"], 81);
        assert_eq!(json["score"], 1);
        assert_eq!(json["mode"], "classic");
        assert_eq!(json["seed"], 11);
    }

    #[test]
    fn test_headless_is_reproducible() {
        let settings = seeded(GameMode::Arcade);
        let (mut a, mut b) = (Vec::new(), Vec::new());
        run_headless(&settings, 300, None, &mut a).unwrap();
        run_headless(&settings, 300, None, &mut b).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_headless_dumps_frame() {
        let path = std::env::temp_dir().join(format!("hopscroll-{}-frame.ppm", std::process::id()));
        run_headless(&seeded(GameMode::Arcade), 5, Some(&path), Vec::new()).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert!(bytes.starts_with(b"P6\n650 650\n255\n"));
        assert_eq!(bytes.len(), "P6\n650 650\n255\n".len() + 650 * 650 * 3);
    }
}
