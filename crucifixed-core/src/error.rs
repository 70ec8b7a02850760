//! Error types.
//!
//! None of these are fatal to the game loop: callers reject the request or
//! fall back to a built-in default and keep running.

use std::path::PathBuf;

/// Errors raised by the game crate.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// Equip request named a weapon that is not in the registry.
    #[error("unknown weapon: {0}")]
    UnknownWeapon(String),

    /// Level file could not be read.
    #[error("failed to read level {path}: {source}")]
    LevelIo {
        /// Path that was read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Level file is not valid level JSON.
    #[error("invalid level data: {0}")]
    LevelParse(#[from] serde_json::Error),

    /// Level data is well-formed but unusable.
    #[error("invalid level: {0}")]
    InvalidLevel(String),

    /// Config file could not be read.
    #[error("failed to read config {path}: {source}")]
    ConfigIo {
        /// Path that was read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid config JSON.
    #[error("invalid config {path}: {source}")]
    ConfigParse {
        /// Path that was read
        path: PathBuf,
        /// Underlying parse error
        #[source]
        source: serde_json::Error,
    },

    /// Config parsed but holds values the game cannot run with.
    #[error("invalid config {path}: {reason}")]
    InvalidConfig {
        /// Path that was read
        path: PathBuf,
        /// First offending setting
        reason: String,
    },
}
