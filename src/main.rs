//! Hopscroll entry point
//!
//! Parses flags, sets up logging and hands off to the driver.

use std::fs::OpenOptions;
use std::io;

use anyhow::Context;
use env_logger::{Env, Target};

use hopscroll::app;
use hopscroll::cli::{Args, USAGE};
use hopscroll::settings::Settings;

fn init_logging(settings: &Settings, headless: bool) -> anyhow::Result<()> {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("info"));
    if !headless {
        // The terminal is the display; logs go to a file instead
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&settings.log_file)
            .with_context(|| format!("failed to open log file {}", settings.log_file.display()))?;
        builder.target(Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse(std::env::args().skip(1))?;
    if args.help {
        println!("{USAGE}");
        return Ok(());
    }
    // Settings name the log file, so they load before logging starts
    let settings = args.settings()?;
    init_logging(&settings, args.headless.is_some())?;
    log::info!("Hopscroll starting...");
    match args.settings_source() {
        Some(path) => log::info!("Loaded settings from {}", path.display()),
        None => log::info!("Using default settings"),
    }

    if let Some(path) = &args.save_settings {
        return settings.save(path);
    }

    match args.headless {
        Some(ticks) => {
            app::run_headless(&settings, ticks, args.dump_frame.as_deref(), io::stdout().lock())?;
        }
        None => {
            app::run_terminal(&settings)?;
        }
    }
    Ok(())
}
