//! Environment-driven configuration.
//!
//! The core only needs to know where the trainer publishes its artifact
//! and how many songs a response may carry; everything else (mining
//! parameters, transport settings) belongs to the external collaborators.

use crate::engine::DEFAULT_MAX_RECOMMENDATIONS;
use std::path::PathBuf;

/// Where the trainer publishes the rule artifact unless overridden.
pub const DEFAULT_MODEL_PATH: &str = "/shared/rules.json";

#[derive(Clone, Debug)]
pub struct Config {
    /// Path to the rule artifact on the shared filesystem
    pub artifact_path: PathBuf,
    /// Cap on songs per recommendation response
    pub max_recommendations: usize,
}

impl Config {
    /// Read configuration from `MODEL_PATH` and `MAX_RECOMMENDATIONS`,
    /// falling back to defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        let artifact_path = std::env::var("MODEL_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_MODEL_PATH));

        let max_recommendations = std::env::var("MAX_RECOMMENDATIONS")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|&n| n > 0)
            .unwrap_or(DEFAULT_MAX_RECOMMENDATIONS);

        Self {
            artifact_path,
            max_recommendations,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            artifact_path: PathBuf::from(DEFAULT_MODEL_PATH),
            max_recommendations: DEFAULT_MAX_RECOMMENDATIONS,
        }
    }
}
