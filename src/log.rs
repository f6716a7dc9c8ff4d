//! Initialisation of the program logger.
//!
//! Output goes to stdout with `HH:MM:SS` timestamps, colourised per level
//! when stdout is a terminal. The level comes from the `BINROUTE_LOG_LEVEL`
//! environment variable, falling back to the settings file and finally to
//! `info`.

use anyhow::{bail, Result};
use chrono::Local;
use fern::colors::{Color, ColoredLevelConfig};
use fern::Dispatch;
use std::env;

/// Log level used when neither the environment nor the settings specify one.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Initialise the logger. Must be called at most once per process.
///
/// # Arguments
///
/// * `log_level_from_settings` - The level named in the settings file, if any
pub fn init(log_level_from_settings: Option<&str>) -> Result<()> {
    let log_level = env::var("BINROUTE_LOG_LEVEL").unwrap_or_else(|_| {
        log_level_from_settings
            .unwrap_or(DEFAULT_LOG_LEVEL)
            .to_string()
    });

    let log_level = match log_level.to_lowercase().as_str() {
        "off" => log::LevelFilter::Off,
        "error" => log::LevelFilter::Error,
        "warn" => log::LevelFilter::Warn,
        "info" => log::LevelFilter::Info,
        "debug" => log::LevelFilter::Debug,
        "trace" => log::LevelFilter::Trace,
        unknown => bail!("Unknown log level: {}", unknown),
    };

    let use_colour = atty::is(atty::Stream::Stdout);
    let colours = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::Green)
        .debug(Color::Blue)
        .trace(Color::Magenta);

    Dispatch::new()
        .format(move |out, message, record| {
            let timestamp = Local::now().format("%H:%M:%S");
            if use_colour {
                out.finish(format_args!(
                    "[{} {}] {}",
                    timestamp,
                    colours.color(record.level()),
                    message
                ))
            } else {
                out.finish(format_args!(
                    "[{} {}] {}",
                    timestamp,
                    record.level(),
                    message
                ))
            }
        })
        .level(log_level)
        .chain(std::io::stdout())
        .apply()?;

    Ok(())
}
