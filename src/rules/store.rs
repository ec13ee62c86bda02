//! Hot-reloadable rule store.
//!
//! Owns the single active [`RuleSet`] snapshot and keeps it in sync with
//! the trainer's artifact on disk. Readers clone an `Arc` under a lock
//! scoped to the pointer read only; hashing and deserialization of a new
//! artifact happen entirely outside that lock, so a reload never stalls
//! in-flight recommendation requests.

use crate::errors::RecommendError;
use crate::rules::artifact;
use crate::rules::types::{ModelStatus, RuleSet};
use parking_lot::RwLock;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub struct RuleStore {
    artifact_path: PathBuf,
    active: RwLock<Option<Arc<RuleSet>>>,
}

impl RuleStore {
    /// Create a store for the given artifact path. No I/O happens here;
    /// call [`refresh_if_changed`](Self::refresh_if_changed) to load.
    pub fn new(artifact_path: impl Into<PathBuf>) -> Self {
        Self {
            artifact_path: artifact_path.into(),
            active: RwLock::new(None),
        }
    }

    /// Reload the rule set if the artifact on disk has changed.
    ///
    /// Returns `Ok(true)` iff a new snapshot was swapped in. A missing
    /// artifact is not an error: the previous snapshot (if any) stays
    /// active and `Ok(false)` is returned. A present-but-unparseable
    /// artifact returns [`RecommendError::Load`] and likewise leaves the
    /// previous snapshot untouched; the next call retries naturally.
    pub fn refresh_if_changed(&self) -> Result<bool, RecommendError> {
        let bytes = match std::fs::read(&self.artifact_path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("Rule artifact not present at {:?}", self.artifact_path);
                return Ok(false);
            }
            Err(e) => return Err(e.into()),
        };

        let fingerprint = artifact::fingerprint(&bytes);

        // Pointer read only; don't hold the lock across parsing.
        let unchanged = {
            let active = self.active.read();
            active
                .as_ref()
                .map(|rules| rules.fingerprint() == fingerprint)
                .unwrap_or(false)
        };
        if unchanged {
            return Ok(false);
        }

        let rules = artifact::parse_rules(&bytes)?;
        let rule_set = Arc::new(RuleSet::new(rules, fingerprint));

        log::info!(
            "Loaded rule set: {} rules, fingerprint {}",
            rule_set.len(),
            rule_set.fingerprint()
        );

        *self.active.write() = Some(rule_set);
        Ok(true)
    }

    /// The presently active snapshot, if any load has ever succeeded.
    pub fn current(&self) -> Option<Arc<RuleSet>> {
        self.active.read().clone()
    }

    /// Health flag: has any rule set ever loaded successfully.
    pub fn is_loaded(&self) -> bool {
        self.active.read().is_some()
    }

    /// Snapshot of store health for external health-check wiring.
    pub fn status(&self) -> ModelStatus {
        let active = self.active.read().clone();
        match active {
            Some(rules) => ModelStatus {
                model_loaded: true,
                rule_count: rules.len(),
                fingerprint: Some(rules.fingerprint().to_string()),
                loaded_at: Some(rules.loaded_at()),
            },
            None => ModelStatus {
                model_loaded: false,
                rule_count: 0,
                fingerprint: None,
                loaded_at: None,
            },
        }
    }

    pub fn artifact_path(&self) -> &Path {
        &self.artifact_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_artifact(dir: &tempfile::TempDir, name: &str, json: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(json.as_bytes()).unwrap();
        path
    }

    const RULES_V1: &str =
        r#"[{"antecedent": ["a"], "consequent": ["b"], "confidence": 0.8}]"#;
    const RULES_V2: &str =
        r#"[{"antecedent": ["a"], "consequent": ["c"], "confidence": 0.6},
            {"antecedent": ["b"], "consequent": ["d"], "confidence": 0.4}]"#;

    #[test]
    fn test_missing_artifact_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = RuleStore::new(dir.path().join("absent.json"));

        assert!(!store.refresh_if_changed().unwrap());
        assert!(!store.is_loaded());
        assert!(store.current().is_none());
    }

    #[test]
    fn test_first_refresh_loads_the_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_artifact(&dir, "rules.json", RULES_V1);
        let store = RuleStore::new(path);

        assert!(store.refresh_if_changed().unwrap());
        assert!(store.is_loaded());
        assert_eq!(store.current().unwrap().len(), 1);
    }

    #[test]
    fn test_unchanged_artifact_never_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_artifact(&dir, "rules.json", RULES_V1);
        let store = RuleStore::new(path);

        assert!(store.refresh_if_changed().unwrap());
        let first = store.current().unwrap();

        assert!(!store.refresh_if_changed().unwrap());
        let second = store.current().unwrap();

        // Same snapshot, not a re-parsed copy.
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_changed_artifact_swaps_in_new_rules() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_artifact(&dir, "rules.json", RULES_V1);
        let store = RuleStore::new(path.clone());

        store.refresh_if_changed().unwrap();
        let old_fingerprint = store.current().unwrap().fingerprint().to_string();

        std::fs::write(&path, RULES_V2).unwrap();
        assert!(store.refresh_if_changed().unwrap());

        let current = store.current().unwrap();
        assert_eq!(current.len(), 2);
        assert_ne!(current.fingerprint(), old_fingerprint);
    }

    #[test]
    fn test_in_flight_snapshot_survives_a_swap() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_artifact(&dir, "rules.json", RULES_V1);
        let store = RuleStore::new(path.clone());

        store.refresh_if_changed().unwrap();
        let in_flight = store.current().unwrap();

        std::fs::write(&path, RULES_V2).unwrap();
        store.refresh_if_changed().unwrap();

        // The borrowed snapshot still sees the old model.
        assert_eq!(in_flight.len(), 1);
        assert_eq!(in_flight.rules()[0].consequent, vec!["b"]);
        assert_eq!(store.current().unwrap().len(), 2);
    }

    #[test]
    fn test_corrupt_artifact_keeps_last_good_rules() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_artifact(&dir, "rules.json", RULES_V1);
        let store = RuleStore::new(path.clone());

        store.refresh_if_changed().unwrap();

        std::fs::write(&path, "{ definitely not rules").unwrap();
        let result = store.refresh_if_changed();
        assert!(matches!(result, Err(RecommendError::Load(_))));

        // Previous snapshot is fully intact and usable.
        let current = store.current().unwrap();
        assert_eq!(current.len(), 1);
        assert_eq!(current.rules()[0].confidence, 0.8);
    }

    #[test]
    fn test_corrupt_artifact_with_no_prior_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_artifact(&dir, "rules.json", "[1, 2, 3]");
        let store = RuleStore::new(path);

        assert!(store.refresh_if_changed().is_err());
        assert!(!store.is_loaded());
    }

    #[test]
    fn test_status_reflects_load_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_artifact(&dir, "rules.json", RULES_V1);
        let store = RuleStore::new(path);

        let status = store.status();
        assert!(!status.model_loaded);
        assert_eq!(status.rule_count, 0);
        assert!(status.fingerprint.is_none());

        store.refresh_if_changed().unwrap();

        let status = store.status();
        assert!(status.model_loaded);
        assert_eq!(status.rule_count, 1);
        assert!(status.fingerprint.is_some());
        assert!(status.loaded_at.is_some());
    }
}
