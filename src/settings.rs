//! Game settings and preferences
//!
//! Stored as JSON. Missing fields fall back to their defaults so an old or
//! hand-written file keeps working.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::platform::Pacing;
use crate::sim::GameMode;

/// Settings file picked up from the working directory when no path is given
pub const DEFAULT_PATH: &str = "hopscroll.json";

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Which obstacle course to play
    pub mode: GameMode,
    /// Ring the bell when an obstacle is cleared
    pub sound: bool,
    /// Fixed RNG seed; derived from the clock when absent
    pub seed: Option<u64>,
    /// How the loop sleeps between ticks
    pub pacing: Pacing,
    /// How long a key counts as held after its last press, on terminals
    /// that do not report releases
    pub key_hold_ms: u64,
    /// Where logs go while the terminal is in use
    pub log_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: GameMode::Arcade,
            sound: true,
            seed: None,
            pacing: Pacing::FixedRate,
            key_hold_ms: 300,
            log_file: PathBuf::from("hopscroll.log"),
        }
    }
}

impl Settings {
    /// Load settings from a JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings from {}", path.display()))?;
        serde_json::from_str(&json).with_context(|| format!("invalid settings in {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to encode settings")?;
        fs::write(path, json)
            .with_context(|| format!("failed to write settings to {}", path.display()))?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("hopscroll-{}-{name}.json", std::process::id()))
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"mode": "classic", "seed": 7}"#).unwrap();
        assert_eq!(settings.mode, GameMode::Classic);
        assert_eq!(settings.seed, Some(7));
        assert!(settings.sound);
        assert_eq!(settings.pacing, Pacing::FixedRate);
        assert_eq!(settings.key_hold_ms, 300);
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        assert!(serde_json::from_str::<Settings>(r#"{"mode": "endless"}"#).is_err());
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("save");
        let settings = Settings {
            mode: GameMode::Classic,
            sound: false,
            pacing: Pacing::FixedDelay,
            ..Settings::default()
        };
        settings.save(&path).unwrap();
        let loaded = Settings::load(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_load_reports_path() {
        let path = temp_path("missing");
        let err = Settings::load(&path).unwrap_err();
        assert!(format!("{err:#}").contains(&path.display().to_string()));
    }
}
