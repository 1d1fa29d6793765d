//! Provides all the error types the pipeline uses.

use chrono::{DateTime, Utc};
use std::path::PathBuf;
use thiserror::Error;

/// Represents all types of errors that can occur when talking to the Hacker
/// News search API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The API responded with an HTTP error status code.
    #[error("API returned status {0}")]
    ErrorStatus(reqwest::StatusCode),
}

/// Represents all types of errors that can occur when reading or writing the
/// dataset files.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A dataset file doesn't exist where expected.
    #[error("dataset file not found: {}", .0.display())]
    NoSuchFile(PathBuf),
}

/// Represents all the ways a staged entry can fail validation when being
/// promoted into the archive.
#[derive(Debug, Error)]
pub enum EntryError {
    /// A required field is empty.
    #[error("empty field '{0}'")]
    EmptyField(&'static str),
    /// A required list field has no elements.
    #[error("no values for field '{0}'")]
    EmptyList(&'static str),
    /// The entry's discussion URL doesn't encode the entry's own id.
    #[error("discussion URL doesn't match the entry id: {0}")]
    HnUrlMismatch(String),
    /// The entry's image URL doesn't point at a file named after the entry id.
    #[error("image URL doesn't match the entry id: {0}")]
    ImageUrlMismatch(String),
    /// The entry's cover image doesn't exist on disk.
    #[error("missing cover image: {}", .0.display())]
    MissingImage(PathBuf),
}

/// Represents errors in a scrape window given on the command line.
#[derive(Debug, Error)]
pub enum WindowError {
    /// A window bound isn't a valid calendar day.
    #[error("invalid day '{0}', expected YYYY-MM-DD")]
    InvalidDay(String),
    /// The window's start doesn't precede its end.
    #[error("window start {from} doesn't precede its end {to}")]
    Backwards {
        /// The offending start bound.
        from: DateTime<Utc>,
        /// The offending end bound.
        to: DateTime<Utc>,
    },
}
