//! Unified error type for the bot and its persistence layer.
//!
//! The tracking engine itself never fails hard: input problems are clamped or
//! reported as `false`/`None`. These variants cover the outer edges where a
//! real failure can happen (startup, storage, Discord I/O).

use thiserror::Error;

/// Every error the crate can surface.
#[derive(Debug, Error)]
pub enum Error {
    /// Settings file could not be read or parsed, or a value is invalid.
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description
        message: String,
    },

    /// Underlying SeaORM/SQLite failure.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// A persisted snapshot blob could not be encoded or decoded.
    #[error("Snapshot '{name}' error: {message}")]
    Snapshot {
        /// Snapshot name (e.g. `aahar_water`)
        name: String,
        /// What went wrong
        message: String,
    },

    /// Onboarding input failed validation.
    #[error("Invalid profile: {message}")]
    InvalidProfile {
        /// Which field was rejected and why
        message: String,
    },

    /// Writing a response into a `String` failed.
    #[error("Formatting error: {0}")]
    Format(#[from] std::fmt::Error),

    /// I/O failure outside the database (settings file, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A required environment variable is missing.
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Serenity/Poise framework error.
    #[error("Discord error: {0}")]
    Discord(Box<poise::serenity_prelude::Error>),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::Discord(Box::new(value))
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
