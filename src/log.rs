//! Provides functions to setup the program logger.

use crate::config::Config;
use fern::{
    colors::{Color, ColoredLevelConfig},
    Dispatch,
};
use log::Level;
pub use log::{debug, error, info, trace, warn};
use std::time::Instant;

/// Returns the status glyph printed in front of a log record.
fn glyph(level: Level) -> &'static str {
    match level {
        Level::Error => "\u{2717}",
        Level::Warn => "\u{26a0}",
        Level::Info => "\u{2713}",
        Level::Debug | Level::Trace => "\u{00b7}",
    }
}

/// Sets up the program-wide logger based on a given program configuration.
pub fn setup_logging(config: &Config) -> anyhow::Result<()> {
    let colors = ColoredLevelConfig::new()
        .info(Color::Green)
        .debug(Color::Magenta)
        .warn(Color::Yellow)
        .error(Color::Red);
    let start = Instant::now();

    Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{: >9.3}] \x1B[{}m{}\x1B[0m {{{}}} {}",
                start.elapsed().as_secs_f32(),
                colors.get_color(&record.level()).to_fg_str(),
                glyph(record.level()),
                record.target(),
                message
            ))
        })
        .level(config.log_level())
        .level_for("hyper", log::LevelFilter::Info)
        .level_for("reqwest", log::LevelFilter::Info)
        .chain(std::io::stdout())
        .apply()?;

    Ok(())
}
