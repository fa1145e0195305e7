//! Error types for Ideaflow.
//!
//! All errors in Ideaflow are represented by the `IdeaflowError` enum,
//! which provides specific variants for different error categories.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for all Ideaflow operations.
///
/// Scenario synthesis itself is total; the variants below cover input
/// validation, configuration loading and the export boundary.
#[derive(Deserialize, Serialize, Error, Debug, Clone, PartialEq)]
pub enum IdeaflowError {
    /// Precondition violations on a generation request (e.g. an empty idea).
    #[error("{0}")]
    Input(String),

    /// Configuration parsing or validation errors.
    #[error("{0}")]
    Config(String),

    /// Data conversion errors (JSON, TOML).
    #[error("{0}")]
    Convert(String),

    /// The assembled module list does not form a simple chain.
    #[error("{0}")]
    Chain(String),

    /// I/O operation errors.
    #[error("{0}")]
    IoError(String),
}

impl From<IdeaflowError> for String {
    fn from(val: IdeaflowError) -> Self {
        val.to_string()
    }
}

impl From<std::io::Error> for IdeaflowError {
    fn from(error: std::io::Error) -> Self {
        IdeaflowError::IoError(error.to_string())
    }
}

impl From<serde_json::Error> for IdeaflowError {
    fn from(error: serde_json::Error) -> Self {
        IdeaflowError::Convert(error.to_string())
    }
}

impl From<toml::de::Error> for IdeaflowError {
    fn from(error: toml::de::Error) -> Self {
        IdeaflowError::Config(error.to_string())
    }
}
