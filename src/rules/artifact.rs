//! Artifact deserialization and change-detection fingerprinting.
//!
//! The trainer writes the rule model as a JSON array of
//! `{"antecedent": [...], "consequent": [...], "confidence": f}` records
//! to a shared path. Staleness is detected by hashing the raw bytes, so a
//! rewrite with identical content never triggers a reload and an atomic
//! rename with new content always does.

use crate::errors::RecommendError;
use crate::rules::types::Rule;

/// Content fingerprint over the raw artifact bytes (lowercase hex MD5).
pub fn fingerprint(bytes: &[u8]) -> String {
    hex::encode(md5::compute(bytes).0)
}

/// Parse the artifact into a rule list, validating every record.
///
/// A single malformed rule rejects the whole artifact; a partially
/// adopted model would silently skew every ranking after it.
pub fn parse_rules(bytes: &[u8]) -> Result<Vec<Rule>, RecommendError> {
    let rules: Vec<Rule> = serde_json::from_slice(bytes)?;

    for (i, rule) in rules.iter().enumerate() {
        if rule.antecedent.is_empty() {
            return Err(RecommendError::Load(format!(
                "Rule {} has an empty antecedent",
                i
            )));
        }
        if rule.consequent.is_empty() {
            return Err(RecommendError::Load(format!(
                "Rule {} has an empty consequent",
                i
            )));
        }
        if !rule.confidence.is_finite() {
            return Err(RecommendError::Load(format!(
                "Rule {} has a non-finite confidence",
                i
            )));
        }
    }

    Ok(rules)
}
