//! Typed errors for the recommendation serving core.
//!
//! Uses `thiserror` for ergonomic error definitions and implements
//! `Serialize` so errors can cross a transport boundary cleanly.

use serde::Serialize;
use thiserror::Error;

/// Errors that can occur while serving recommendations.
#[derive(Debug, Error, Serialize)]
#[serde(tag = "type", content = "message")]
pub enum RecommendError {
    /// Caller supplied an empty or otherwise unusable song set
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The rule artifact exists but could not be read or parsed.
    /// The previously active rule set, if any, stays in force.
    #[error("Failed to load rule artifact: {0}")]
    Load(String),

    /// No rule set has ever been loaded successfully
    #[error("No rule set available")]
    ModelUnavailable,
}

// Implement From traits for common error types to simplify conversion

impl From<std::io::Error> for RecommendError {
    fn from(e: std::io::Error) -> Self {
        RecommendError::Load(e.to_string())
    }
}

impl From<serde_json::Error> for RecommendError {
    fn from(e: serde_json::Error) -> Self {
        RecommendError::Load(format!("Deserialization error: {}", e))
    }
}
