//! Core error types for waterbuddy-core.
//!
//! Every engine error is local and recoverable: a failed command leaves the
//! session exactly as it was before the call.

use std::path::PathBuf;
use thiserror::Error;

use crate::flow::{CommandKind, Phase};

/// Core error type for waterbuddy-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A hydration command was rejected
    #[error(transparent)]
    Hydration(#[from] HydrationError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// No live session with this id
    #[error("Session not found: {0}")]
    SessionNotFound(uuid::Uuid),

    /// A session lock was poisoned by a panicking holder
    #[error("Session lock poisoned: {0}")]
    LockPoisoned(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised by the hydration engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HydrationError {
    /// Key is not one of the fixed age groups
    #[error("Unknown age group: '{0}'")]
    UnknownAgeGroup(String),

    /// Intake amount is zero, negative, non-finite or not a whole number of ml
    #[error("Invalid intake amount: {0}")]
    InvalidAmount(String),

    /// Goal outside the accepted range
    #[error("Invalid goal: {0} ml (must be between {min} and {max} ml)", min = crate::catalog::MIN_GOAL_ML, max = crate::catalog::MAX_GOAL_ML)]
    InvalidGoal(i64),

    /// Command not legal in the current phase
    #[error("Command '{command}' is not available during {phase}")]
    InvalidTransition { phase: Phase, command: CommandKind },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
