//! Audio alerts
//!
//! The terminal has one sound: the bell. Writing BEL to stderr lets the
//! terminal emulator decide how to ring it, so nothing here ever blocks.

use std::io::{self, Stderr, Write};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// An obstacle left the field and scored a point
    ObstacleCleared,
}

const BEL: &[u8] = b"\x07";

/// Audio manager for the game
pub struct AudioManager<W: Write = Stderr> {
    out: W,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        Self::with_writer(io::stderr())
    }
}

impl<W: Write> AudioManager<W> {
    pub fn with_writer(out: W) -> Self {
        Self { out, muted: false }
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        if self.muted {
            return;
        }
        let bytes = match effect {
            SoundEffect::ObstacleCleared => BEL,
        };
        if let Err(e) = self.out.write_all(bytes).and_then(|()| self.out.flush()) {
            log::warn!("failed to play {effect:?}: {e}");
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_play_rings_bell() {
        let mut audio = AudioManager::with_writer(Vec::new());
        audio.play(SoundEffect::ObstacleCleared);
        audio.play(SoundEffect::ObstacleCleared);
        assert_eq!(audio.into_inner(), b"\x07\x07");
    }

    #[test]
    fn test_muted_is_silent() {
        let mut audio = AudioManager::with_writer(Vec::new());
        audio.set_muted(true);
        audio.play(SoundEffect::ObstacleCleared);
        assert!(audio.is_muted());
        assert!(audio.into_inner().is_empty());
    }

    #[test]
    fn test_write_failure_is_not_fatal() {
        let mut audio = AudioManager::with_writer(Broken);
        audio.play(SoundEffect::ObstacleCleared);
    }
}
