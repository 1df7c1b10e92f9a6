//! Polled keyboard state built from terminal key events
//!
//! Terminals deliver key events, not key state. When the terminal reports
//! key releases (kitty keyboard protocol) a key is held from press to release.
//! Otherwise a key counts as held for a short window after its last press or
//! auto-repeat event.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use anyhow::Context;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, ModifierKeyCode};
use parking_lot::Mutex;

use super::InputSampler;
use crate::sim::TickInput;

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Game actions a key can be bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Jump,
    Left,
    Right,
    Run,
}

/// Map a terminal key code to a game action
pub fn binding(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char(' ' | 'w' | 'W') | KeyCode::Up => Some(Key::Jump),
        KeyCode::Char('a' | 'A') | KeyCode::Left => Some(Key::Left),
        KeyCode::Char('d' | 'D') | KeyCode::Right => Some(Key::Right),
        KeyCode::Modifier(ModifierKeyCode::LeftShift | ModifierKeyCode::RightShift) => Some(Key::Run),
        _ => None,
    }
}

/// Which game keys are currently held
#[derive(Debug)]
pub struct HeldKeys {
    release_aware: bool,
    hold: Duration,
    /// Last press or repeat per key
    pressed: HashMap<Key, Instant>,
    quit: bool,
}

impl HeldKeys {
    pub fn new(release_aware: bool, hold: Duration) -> Self {
        Self {
            release_aware,
            hold,
            pressed: HashMap::new(),
            quit: false,
        }
    }

    /// Fold one key event into the table
    pub fn apply(&mut self, event: &KeyEvent, now: Instant) {
        let is_press = matches!(event.kind, KeyEventKind::Press | KeyEventKind::Repeat);
        if is_press && is_quit(event) {
            self.quit = true;
            return;
        }

        // Legacy terminals only tell us about shift through the modifiers
        // of other keys (e.g. 'D' with SHIFT).
        if !self.release_aware && is_press && event.modifiers.contains(KeyModifiers::SHIFT) {
            self.pressed.insert(Key::Run, now);
        }

        let Some(key) = binding(event.code) else { return };
        if is_press {
            self.pressed.insert(key, now);
        } else {
            self.pressed.remove(&key);
        }
    }

    pub fn is_down(&self, key: Key, now: Instant) -> bool {
        match self.pressed.get(&key) {
            Some(_) if self.release_aware => true,
            Some(at) => now.saturating_duration_since(*at) <= self.hold,
            None => false,
        }
    }

    pub fn sample(&self, now: Instant) -> TickInput {
        TickInput {
            jump: self.is_down(Key::Jump, now),
            left: self.is_down(Key::Left, now),
            right: self.is_down(Key::Right, now),
            run: self.is_down(Key::Run, now),
        }
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }
}

fn is_quit(event: &KeyEvent) -> bool {
    match event.code {
        KeyCode::Esc => true,
        KeyCode::Char('c') => event.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Reads terminal events on a background thread and answers key-state queries
pub struct Keyboard {
    keys: Arc<Mutex<HeldKeys>>,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<anyhow::Result<()>>>,
}

impl Keyboard {
    pub fn spawn(release_aware: bool, hold: Duration) -> anyhow::Result<Self> {
        let keys = Arc::new(Mutex::new(HeldKeys::new(release_aware, hold)));
        let stop = Arc::new(AtomicBool::new(false));
        let handle = {
            let keys = Arc::clone(&keys);
            let stop = Arc::clone(&stop);
            thread::Builder::new()
                .name("keyboard".into())
                .spawn(move || read_loop(&keys, &stop))
                .context("failed to spawn keyboard thread")?
        };
        log::info!(
            "keyboard: {} mode",
            if release_aware { "press/release" } else { "hold-window" }
        );
        Ok(Self { keys, stop, handle: Some(handle) })
    }

    /// Esc or Ctrl-C was pressed, or the reader thread died
    pub fn quit_requested(&self) -> bool {
        self.keys.lock().quit_requested() || self.handle.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Stop the reader thread and surface any error it hit
    pub fn shutdown(mut self) -> anyhow::Result<()> {
        self.join()
    }

    fn join(&mut self) -> anyhow::Result<()> {
        self.stop.store(true, Ordering::SeqCst);
        match self.handle.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| anyhow::anyhow!("keyboard thread panicked"))?,
            None => Ok(()),
        }
    }
}

impl InputSampler for Keyboard {
    fn sample(&mut self) -> TickInput {
        self.keys.lock().sample(Instant::now())
    }
}

impl Drop for Keyboard {
    fn drop(&mut self) {
        if let Err(e) = self.join() {
            log::error!("keyboard: {e:#}");
        }
    }
}

fn read_loop(keys: &Mutex<HeldKeys>, stop: &AtomicBool) -> anyhow::Result<()> {
    while !stop.load(Ordering::SeqCst) {
        if !event::poll(POLL_INTERVAL).context("failed to poll terminal events")? {
            continue;
        }
        if let Event::Key(key) = event::read().context("failed to read terminal event")? {
            let mut keys = keys.lock();
            keys.apply(&key, Instant::now());
            if keys.quit_requested() {
                break;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOLD: Duration = Duration::from_millis(300);

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Press)
    }

    fn release(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Release)
    }

    #[test]
    fn test_bindings() {
        assert_eq!(binding(KeyCode::Char(' ')), Some(Key::Jump));
        assert_eq!(binding(KeyCode::Char('A')), Some(Key::Left));
        assert_eq!(binding(KeyCode::Right), Some(Key::Right));
        assert_eq!(binding(KeyCode::Modifier(ModifierKeyCode::RightShift)), Some(Key::Run));
        assert_eq!(binding(KeyCode::Char('x')), None);
    }

    #[test]
    fn test_release_aware_holds_until_release() {
        let t0 = Instant::now();
        let mut keys = HeldKeys::new(true, HOLD);
        keys.apply(&press(KeyCode::Char('d')), t0);
        assert!(keys.is_down(Key::Right, t0 + Duration::from_secs(5)));
        keys.apply(&release(KeyCode::Char('d')), t0 + Duration::from_secs(5));
        assert!(!keys.is_down(Key::Right, t0 + Duration::from_secs(5)));
    }

    #[test]
    fn test_hold_window_expires() {
        let t0 = Instant::now();
        let mut keys = HeldKeys::new(false, HOLD);
        keys.apply(&press(KeyCode::Char(' ')), t0);
        assert!(keys.sample(t0 + Duration::from_millis(100)).jump);
        assert!(!keys.sample(t0 + Duration::from_millis(400)).jump);

        // Auto-repeat extends the window
        keys.apply(&press(KeyCode::Char(' ')), t0 + Duration::from_millis(250));
        assert!(keys.sample(t0 + Duration::from_millis(400)).jump);
    }

    #[test]
    fn test_shift_modifier_means_run_on_legacy_terminals() {
        let t0 = Instant::now();
        let mut keys = HeldKeys::new(false, HOLD);
        keys.apply(&KeyEvent::new(KeyCode::Char('D'), KeyModifiers::SHIFT), t0);
        let input = keys.sample(t0);
        assert!(input.run && input.right && !input.left);
    }

    #[test]
    fn test_quit_keys() {
        let mut keys = HeldKeys::new(true, HOLD);
        keys.apply(&press(KeyCode::Char('c')), Instant::now());
        assert!(!keys.quit_requested());
        keys.apply(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), Instant::now());
        assert!(keys.quit_requested());

        let mut keys = HeldKeys::new(false, HOLD);
        keys.apply(&press(KeyCode::Esc), Instant::now());
        assert!(keys.quit_requested());
    }
}
