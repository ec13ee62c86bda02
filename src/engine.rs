//! Recommendation engine implementation.
//!
//! Generates song recommendations by scanning the active rule set:
//! every rule whose antecedent is contained in the caller's songs votes
//! its confidence for each consequent song the caller doesn't already
//! know. Votes for the same song accumulate additively, so a song backed
//! by several independent rules outranks one backed by a single strong
//! rule. Ranking is a pure function of (input, rule set); the engine adds
//! the refresh check and response metadata around it.

use crate::errors::RecommendError;
use crate::rules::{RuleSet, RuleStore};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Default cap on the number of songs returned per request.
pub const DEFAULT_MAX_RECOMMENDATIONS: usize = 10;

/// A ranked recommendation response with model provenance.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendations {
    /// Suggested songs, best first
    pub songs: Vec<String>,
    /// Fingerprint of the rule set that produced this ranking
    pub model_version: String,
    /// When that rule set was loaded
    pub model_date: DateTime<Utc>,
    /// Number of songs the caller submitted (before deduplication)
    pub input_songs_count: usize,
}

/// Engine for serving song recommendations.
///
/// Holds the rule store it was constructed with and checks it for a
/// fresher artifact on every request. Designed to be created once at
/// startup and shared by the transport layer.
pub struct RecommendationEngine {
    store: Arc<RuleStore>,
    max_results: usize,
}

impl RecommendationEngine {
    pub fn new(store: Arc<RuleStore>, max_results: usize) -> Self {
        Self { store, max_results }
    }

    /// Generate recommendations for the caller's known songs.
    ///
    /// A failed refresh is logged and the request proceeds on the
    /// last-good snapshot; it only becomes an error when no snapshot has
    /// ever loaded.
    pub fn recommend(&self, songs: &[String]) -> Result<Recommendations, RecommendError> {
        if songs.is_empty() {
            return Err(RecommendError::InvalidInput(
                "song list is empty".to_string(),
            ));
        }

        if let Err(e) = self.store.refresh_if_changed() {
            log::warn!("Rule refresh failed, serving last-good model: {}", e);
        }

        let rules = self
            .store
            .current()
            .ok_or(RecommendError::ModelUnavailable)?;

        let ranked = rank_by_confidence(songs, &rules, self.max_results)?;

        Ok(Recommendations {
            songs: ranked,
            model_version: rules.fingerprint().to_string(),
            model_date: rules.loaded_at(),
            input_songs_count: songs.len(),
        })
    }
}

/// Rank candidate songs for `input` against `rules`.
///
/// Scans rules in stored order; for each rule whose antecedent is a
/// subset of the (deduplicated) input, adds its confidence to every
/// consequent song not already known to the caller. Candidates are
/// sorted by accumulated confidence descending; ties keep the order in
/// which candidates were first encountered during the scan, so equal
/// scores rank deterministically. At most `limit` songs are returned.
pub fn rank_by_confidence(
    input: &[String],
    rules: &RuleSet,
    limit: usize,
) -> Result<Vec<String>, RecommendError> {
    let input_set: HashSet<&str> = input.iter().map(String::as_str).collect();
    if input_set.is_empty() {
        return Err(RecommendError::InvalidInput(
            "song list is empty".to_string(),
        ));
    }

    // candidate -> (first-seen rank, accumulated confidence)
    let mut scores: HashMap<&str, (usize, f64)> = HashMap::new();
    let mut next_rank = 0usize;

    for rule in rules.rules() {
        let matches = rule
            .antecedent
            .iter()
            .all(|song| input_set.contains(song.as_str()));
        if !matches {
            continue;
        }

        for song in &rule.consequent {
            if input_set.contains(song.as_str()) {
                continue;
            }
            let entry = scores.entry(song.as_str()).or_insert_with(|| {
                let rank = next_rank;
                next_rank += 1;
                (rank, 0.0)
            });
            entry.1 += rule.confidence;
        }
    }

    let mut ranked: Vec<(&str, usize, f64)> = scores
        .into_iter()
        .map(|(song, (rank, score))| (song, rank, score))
        .collect();

    ranked.sort_by(|a, b| {
        b.2.partial_cmp(&a.2)
            .unwrap_or(Ordering::Equal)
            .then(a.1.cmp(&b.1))
    });

    Ok(ranked
        .into_iter()
        .take(limit)
        .map(|(song, _, _)| song.to_string())
        .collect())
}
