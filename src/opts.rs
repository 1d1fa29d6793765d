//! Provides the [`Opts`](Opts) struct, used to read and access a pipeline
//! tool's command line arguments.

use crate::config;
use clap::{App, Arg, ArgMatches};
use log::LevelFilter;
use std::{path::PathBuf, str::FromStr};

/// Accepted values for the `--log-level` option.
const LOG_LEVELS: &[&str] = &["off", "error", "warn", "info", "debug", "trace"];

/// Stores the command line arguments shared by the pipeline tools. Arguments a
/// tool doesn't define are `None`.
#[derive(Debug, Default)]
pub struct Opts {
    /// The directory the JSON datasets live in.
    pub data_dir: Option<PathBuf>,
    /// The directory the cover images live in.
    pub images_dir: Option<PathBuf>,
    /// The directory compiled modules are written to.
    pub out_dir: Option<PathBuf>,
    /// The log level to use.
    pub log_level: Option<LevelFilter>,
    /// A single submission id to scrape.
    pub id: Option<String>,
    /// The start day of the scrape window.
    pub from: Option<String>,
    /// The end day of the scrape window.
    pub to: Option<String>,
}

impl Opts {
    /// Returns the `clap::App` every pipeline tool starts from.
    pub fn build_app(name: &'static str, about: &'static str) -> App<'static, 'static> {
        App::new(name)
            .version(clap::crate_version!())
            .about(about)
            .arg(
                Arg::with_name("data-dir")
                    .long("data-dir")
                    .value_name("DIR")
                    .default_value(config::DEFAULT_DATA_DIR)
                    .takes_value(true)
                    .help("Sets the directory the JSON datasets live in"),
            )
            .arg(
                Arg::with_name("log-level")
                    .long("log-level")
                    .value_name("LEVEL")
                    .possible_values(LOG_LEVELS)
                    .case_insensitive(true)
                    .takes_value(true)
                    .help("Specify the log level to use"),
            )
    }

    /// Returns the `--images-dir` argument for tools that touch cover images.
    pub fn images_dir_arg() -> Arg<'static, 'static> {
        Arg::with_name("images-dir")
            .long("images-dir")
            .value_name("DIR")
            .default_value(config::DEFAULT_IMAGES_DIR)
            .takes_value(true)
            .help("Sets the directory the cover images live in")
    }

    /// Returns the `--out-dir` argument for the compile tool.
    pub fn out_dir_arg() -> Arg<'static, 'static> {
        Arg::with_name("out-dir")
            .long("out-dir")
            .value_name("DIR")
            .default_value(config::DEFAULT_OUT_DIR)
            .takes_value(true)
            .help("Sets the directory the compiled modules are written to")
    }

    /// Returns a new `Opts` instance based on a given set of parsed argument
    /// matches.
    pub fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            data_dir: matches.value_of_os("data-dir").map(Into::into),
            images_dir: matches.value_of_os("images-dir").map(Into::into),
            out_dir: matches.value_of_os("out-dir").map(Into::into),
            log_level: matches.value_of("log-level").map(|value| {
                LevelFilter::from_str(value).expect("failed to parse value as log level")
            }),
            id: matches.value_of("id").map(str::to_string),
            from: matches.value_of("from").map(str::to_string),
            to: matches.value_of("to").map(str::to_string),
        }
    }

    /// Returns a new `Opts` instance based on a given tool's finished `App`.
    pub fn get(app: App<'static, 'static>) -> Self {
        Self::from_matches(&app.get_matches())
    }

    /// Returns a new `Opts` instance based on a given tool's `App` and an
    /// iterator of custom command line arguments.
    pub fn custom_args<I, T>(app: App<'static, 'static>, args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::from_matches(&app.get_matches_from(args))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let opts = Opts::custom_args(Opts::build_app("test", ""), vec!["test"]);
        assert_eq!(opts.data_dir, Some(PathBuf::from(config::DEFAULT_DATA_DIR)));
        assert_eq!(opts.log_level, None);
        assert_eq!(opts.images_dir, None);
    }

    #[test]
    fn log_level_is_parsed_case_insensitively() {
        let opts = Opts::custom_args(
            Opts::build_app("test", ""),
            vec!["test", "--log-level", "DEBUG"],
        );
        assert_eq!(opts.log_level, Some(LevelFilter::Debug));
    }

    #[test]
    fn optional_directory_args() {
        let opts = Opts::custom_args(
            Opts::build_app("test", "").arg(Opts::images_dir_arg()),
            vec!["test", "--images-dir", "imgs", "--data-dir", "elsewhere"],
        );
        assert_eq!(opts.images_dir, Some(PathBuf::from("imgs")));
        assert_eq!(opts.data_dir, Some(PathBuf::from("elsewhere")));
    }
}
