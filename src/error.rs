// src/error.rs

//! Error types for extras resolution

use thiserror::Error;

/// Result type for garnish operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving an extras manifest
#[derive(Error, Debug)]
pub enum Error {
    /// Running interpreter version is below the minimum supported threshold.
    /// Raised before any manifest parsing; aborts the build.
    #[error("garnish requires Python 3.7 and above, but yours is {found}")]
    UnsupportedRuntime {
        /// The version the resolver was invoked with
        found: semver::Version,
    },

    /// IO error reading the manifest (a missing manifest is not an error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
