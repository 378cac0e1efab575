//! Errors raised while reading `REVIEW_*` settings.

use std::path::PathBuf;
use thiserror::Error;

/// Invalid server or lexicon settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `REVIEW_PORT` parsed to `0`.
    #[error("invalid port '{value}': must be between 1 and 65535")]
    InvalidPort { value: String },

    /// `REVIEW_PORT` is not a `u16`.
    #[error("failed to parse port '{value}': {source}")]
    PortParseError {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// `REVIEW_BIND_ADDR` is not an IP address.
    #[error("failed to parse bind address '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },

    /// The lexicon file named by `REVIEW_LEXICON_PATH` does not exist.
    #[error("lexicon file does not exist: {path}")]
    LexiconNotFound { path: PathBuf },

    /// `REVIEW_LEXICON_PATH` points at a directory or other non-file.
    #[error("lexicon path is not a file: {path}")]
    LexiconNotAFile { path: PathBuf },
}
