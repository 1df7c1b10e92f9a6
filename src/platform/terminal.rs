//! Terminal session guard
//!
//! Puts the terminal into raw mode on an alternate screen and restores it on
//! drop, including when the game loop bails out with an error.

use std::io::{self, Write};

use anyhow::Context;
use crossterm::event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags};
use crossterm::{cursor, execute, terminal};

pub struct TerminalSession {
    release_aware: bool,
}

impl TerminalSession {
    pub fn enter() -> anyhow::Result<Self> {
        terminal::enable_raw_mode().context("failed to enable raw mode")?;
        let mut out = io::stdout();
        if let Err(e) = execute!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::DisableLineWrap,
        ) {
            let _ = terminal::disable_raw_mode();
            return Err(e).context("failed to set up terminal");
        }

        // Key release events need the kitty keyboard protocol
        let release_aware = matches!(terminal::supports_keyboard_enhancement(), Ok(true))
            && execute!(
                out,
                PushKeyboardEnhancementFlags(
                    KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                        | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                        | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES
                )
            )
            .is_ok();

        log::info!("terminal session started (key releases: {release_aware})");
        Ok(Self { release_aware })
    }

    /// Whether the terminal reports key releases
    pub fn release_aware(&self) -> bool {
        self.release_aware
    }

    fn restore(&self, out: &mut impl Write) -> io::Result<()> {
        if self.release_aware {
            execute!(out, PopKeyboardEnhancementFlags)?;
        }
        execute!(
            out,
            terminal::LeaveAlternateScreen,
            cursor::Show,
            terminal::EnableLineWrap,
        )?;
        terminal::disable_raw_mode()
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        match self.restore(&mut io::stdout()) {
            Ok(()) => log::info!("terminal restored"),
            Err(e) => log::error!("failed to restore terminal: {e}"),
        }
    }
}
