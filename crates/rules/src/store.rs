//! Rule store with mtime-based hot reload
//!
//! The host loads the rule file once per build and re-parses it only when
//! the file changed on disk. A failed reload keeps the previously loaded
//! rules live.

use crate::matcher::RuleSet;
use crate::model::{load_rules, RulesError};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{info, warn};

/// Tracks per-file modification times across reload checks
#[derive(Debug, Default)]
pub struct ModifiedTracker {
    history: HashMap<PathBuf, SystemTime>,
}

impl ModifiedTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if the file's mtime advanced past the recorded one
    ///
    /// A file never seen before counts as modified.
    pub fn is_modified(&self, path: &Path) -> std::io::Result<bool> {
        let mtime = std::fs::metadata(path)?.modified()?;
        Ok(match self.history.get(path) {
            Some(&recorded) => recorded < mtime,
            None => true,
        })
    }

    /// Record the file's current mtime
    pub fn mark(&mut self, path: &Path) -> std::io::Result<()> {
        let mtime = std::fs::metadata(path)?.modified()?;
        self.history.insert(path.to_path_buf(), mtime);
        Ok(())
    }
}

/// Shared rule set, re-parsed when the rule file changes on disk
#[derive(Debug, Default)]
pub struct RuleStore {
    rules: RwLock<RuleSet>,
    tracker: RwLock<ModifiedTracker>,
}

impl RuleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-parse the rule file if its mtime advanced since the last load
    ///
    /// Returns true when a reload happened. On a parse failure the previous
    /// rules stay live and the error propagates.
    pub fn reload_if_changed(&self, path: &Path) -> Result<bool, RulesError> {
        let modified = self
            .tracker
            .read()
            .is_modified(path)
            .map_err(|source| RulesError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        if !modified {
            return Ok(false);
        }

        let rules = load_rules(path).inspect_err(|_| {
            warn!(path = %path.display(), "rule reload failed, keeping previous rules");
        })?;
        info!(path = %path.display(), count = rules.len(), "rules loaded");

        *self.rules.write() = RuleSet::new(rules);
        self.tracker
            .write()
            .mark(path)
            .map_err(|source| RulesError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(true)
    }

    /// Run `f` against the currently loaded rules
    pub fn with_rules<R>(&self, f: impl FnOnce(&RuleSet) -> R) -> R {
        f(&self.rules.read())
    }

    /// Snapshot of the currently loaded rules
    pub fn snapshot(&self) -> RuleSet {
        self.rules.read().clone()
    }
}
