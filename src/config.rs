//! The configuration framework for the pipeline tools.

use crate::opts::Opts;
use log::{debug, LevelFilter};
use std::path::{Path, PathBuf};

/// The default directory the JSON datasets live in.
pub const DEFAULT_DATA_DIR: &str = "data";
/// The default directory the cover images live in.
pub const DEFAULT_IMAGES_DIR: &str = "public/images/games";
/// The default directory the compiled modules are written to.
pub const DEFAULT_OUT_DIR: &str = "gen";

/// Stores a pipeline tool's runtime configuration. New instances are built
/// with a [`Builder`](Builder).
#[derive(Debug)]
pub struct Config {
    log_level: LevelFilter,
    data_dir: PathBuf,
    images_dir: PathBuf,
    out_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LevelFilter::Info,
            data_dir: DEFAULT_DATA_DIR.into(),
            images_dir: DEFAULT_IMAGES_DIR.into(),
            out_dir: DEFAULT_OUT_DIR.into(),
        }
    }
}

impl Config {
    /// Returns the log level.
    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    /// Returns the dataset directory.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Returns the cover image directory.
    pub fn images_dir(&self) -> &Path {
        &self.images_dir
    }

    /// Returns the compile output directory.
    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Logs the current config values with debug level.
    pub fn debug_values(&self) {
        debug!("Log level: {}", self.log_level);
        debug!("Data directory: {}", self.data_dir.display());
        debug!("Image directory: {}", self.images_dir.display());
        debug!("Compile output directory: {}", self.out_dir.display());
    }
}

/// A builder used to build a [`Config`](Config) from several sources.
#[derive(Debug, Default)]
pub struct Builder {
    config: Config,
}

impl Builder {
    /// Returns a new builder holding the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a given [`Opts`](crate::opts::Opts) to the configuration.
    /// Arguments the tool didn't define keep their current values.
    pub fn apply_opts(mut self, opts: &Opts) -> Self {
        if let Some(log_level) = opts.log_level {
            self.config.log_level = log_level;
        }
        if let Some(data_dir) = &opts.data_dir {
            self.config.data_dir = data_dir.clone();
        }
        if let Some(images_dir) = &opts.images_dir {
            self.config.images_dir = images_dir.clone();
        }
        if let Some(out_dir) = &opts.out_dir {
            self.config.out_dir = out_dir.clone();
        }
        self
    }

    /// Finalises the builder and returns the built `Config`.
    pub fn build(self) -> Config {
        self.config
    }
}
