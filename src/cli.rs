//! Command line flags
//!
//! Flags override whatever the settings file says.

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};

use crate::platform::Pacing;
use crate::settings::{DEFAULT_PATH, Settings};
use crate::sim::GameMode;

pub const USAGE: &str = "\
usage: hopscroll [--settings PATH] [--seed N] [--classic|--arcade|--mode NAME]
                 [--mute] [--fixed-delay] [--headless TICKS] [--dump-frame PATH]
                 [--save-settings PATH]";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
    pub settings: Option<PathBuf>,
    pub seed: Option<u64>,
    pub mode: Option<GameMode>,
    pub mute: bool,
    pub fixed_delay: bool,
    /// Run this many ticks without a terminal
    pub headless: Option<u64>,
    /// Write the last headless frame here as a PPM image
    pub dump_frame: Option<PathBuf>,
    /// Write the effective settings here and exit
    pub save_settings: Option<PathBuf>,
    pub help: bool,
}

impl Args {
    /// Parse flags, not including the program name
    pub fn parse<I>(args: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut parsed = Args::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            let mut value = || args.next().with_context(|| format!("{arg} needs a value"));
            match arg.as_str() {
                "--settings" => parsed.settings = Some(PathBuf::from(value()?)),
                "--seed" => {
                    let raw = value()?;
                    parsed.seed = Some(raw.parse().with_context(|| format!("bad seed {raw:?}"))?);
                }
                "--classic" => parsed.mode = Some(GameMode::Classic),
                "--arcade" => parsed.mode = Some(GameMode::Arcade),
                "--mode" => {
                    let raw = value()?;
                    parsed.mode = Some(
                        GameMode::from_str(&raw).with_context(|| format!("unknown mode {raw:?}"))?,
                    );
                }
                "--mute" => parsed.mute = true,
                "--fixed-delay" => parsed.fixed_delay = true,
                "--headless" => {
                    let raw = value()?;
                    parsed.headless =
                        Some(raw.parse().with_context(|| format!("bad tick count {raw:?}"))?);
                }
                "--dump-frame" => parsed.dump_frame = Some(PathBuf::from(value()?)),
                "--save-settings" => parsed.save_settings = Some(PathBuf::from(value()?)),
                "-h" | "--help" => parsed.help = true,
                other => bail!("unknown argument {other:?}\n{USAGE}"),
            }
        }
        if parsed.dump_frame.is_some() && parsed.headless.is_none() {
            bail!("--dump-frame only works with --headless");
        }
        Ok(parsed)
    }

    /// The settings file to read: `--settings`, else `hopscroll.json` if present
    pub fn settings_source(&self) -> Option<&Path> {
        match &self.settings {
            Some(path) => Some(path.as_path()),
            None => Some(Path::new(DEFAULT_PATH)).filter(|path| path.exists()),
        }
    }

    /// Load the settings file these flags point at, then apply the overrides
    pub fn settings(&self) -> anyhow::Result<Settings> {
        let settings = match self.settings_source() {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        Ok(self.apply(settings))
    }

    pub fn apply(&self, mut settings: Settings) -> Settings {
        if let Some(seed) = self.seed {
            settings.seed = Some(seed);
        }
        if let Some(mode) = self.mode {
            settings.mode = mode;
        }
        if self.mute {
            settings.sound = false;
        }
        if self.fixed_delay {
            settings.pacing = Pacing::FixedDelay;
        }
        settings
    }
}
