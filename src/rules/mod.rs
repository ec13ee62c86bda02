//! Rule model: artifact loading, fingerprinting, and the hot-reload store.
//!
//! Rules are mined offline by the trainer and published as an artifact on
//! a shared path; this module only consumes that artifact.

pub mod artifact;
pub mod store;
pub mod types;

pub use store::RuleStore;
pub use types::{ModelStatus, Rule, RuleSet};
