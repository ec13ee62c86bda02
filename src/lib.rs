//! Association-rule song recommendation serving core.
//!
//! An offline trainer mines playlist data into antecedent → consequent
//! rules and publishes them as an artifact on a shared path. This crate
//! keeps that artifact hot-reloaded in memory ([`RuleStore`]) and turns a
//! caller's known songs into a ranked list of suggestions
//! ([`RecommendationEngine`]). Transport wiring (HTTP, CLI clients) lives
//! outside; the crate exposes a plain function-call contract.

pub mod config;
pub mod engine;
pub mod errors;
pub mod rules;

pub use config::Config;
pub use engine::{RecommendationEngine, Recommendations};
pub use errors::RecommendError;
pub use rules::{ModelStatus, Rule, RuleSet, RuleStore};
