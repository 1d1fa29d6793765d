//! Offline pipeline for a curated web catalog of playable games sourced from
//! Hacker News "Show HN" submissions.
//!
//! The pipeline scrapes candidate submissions from the Algolia Hacker News
//! API into a staging dataset, promotes curated entries into the active
//! archive, periodically re-validates play URLs and delists the dead ones,
//! audits the datasets for duplicates and inconsistencies, and compiles the
//! curated JSON into statically importable modules for the catalog site.
//! Each stage is an independent binary under `src/bin`.

#![warn(clippy::if_not_else)]
#![warn(clippy::needless_pass_by_value)]

pub mod audit;
pub mod classify;
pub mod compile;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod game;
pub mod hn;
pub mod links;
pub mod log;
pub mod opts;
pub mod points;
pub mod promote;
pub mod scrape;
pub mod store;
pub mod text;
pub mod util;
pub mod validate;
