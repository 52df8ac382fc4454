//! Error types for the cardcat_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for cardcat_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An entity could not be built because one of its invariants failed
    #[error("Invariant violation: {0}")]
    Invariant(String),

    /// A mandatory value was absent or blank
    #[error("Missing required argument: {0}")]
    MissingArgument(&'static str),

    /// Text did not match any member of a closed vocabulary
    #[error("Unrecognized {vocabulary} value: {value:?}")]
    UnrecognizedValue {
        vocabulary: &'static str,
        value: String,
    },

    /// A query clause value is not part of the catalog vocabulary
    #[error("Unsupported value for {attribute}: {value:?}")]
    UnsupportedValue {
        attribute: &'static str,
        value: String,
    },

    /// A textual filter expression could not be parsed
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn invariant(msg: impl Into<String>) -> Self {
        Error::Invariant(msg.into())
    }

    /// True for errors raised while validating input values, as opposed to
    /// environmental failures (IO, parsing of files).
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::Invariant(_)
                | Error::MissingArgument(_)
                | Error::UnrecognizedValue { .. }
                | Error::UnsupportedValue { .. }
                | Error::InvalidFilter(_)
        )
    }
}
