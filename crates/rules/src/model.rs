//! Serde model of the injection rule file
//!
//! The rule file (`bytelego.json`) is a JSON array of rules. Each rule
//! selects target classes and methods and names the hook methods the host
//! injects at the matched call sites. All criteria are optional; a missing
//! class criterion means the rule applies to every class.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Rule file load/parse errors
#[derive(Debug, thiserror::Error)]
pub enum RulesError {
    #[error("failed to read rule file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse rule file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// One injection rule: target selection plus the hooks to inject
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct InjectRule {
    /// Fully-qualified class annotation that selects target classes
    pub class_annotation: Option<String>,
    /// Fully-qualified class names that select target classes
    pub class_name: Option<Vec<String>>,
    /// Fully-qualified method annotation that selects target methods
    pub method_annotation: Option<String>,
    /// Method names that select target methods
    pub method_name: Option<Vec<String>>,
    /// Hook methods to inject at matched call sites
    pub insert_code_config: Option<InsertCodeSpec>,
}

impl InjectRule {
    /// True if the rule names no class criteria (applies to every class)
    pub fn has_class_criteria(&self) -> bool {
        self.class_annotation.as_deref().is_some_and(|a| !a.is_empty())
            || self.class_name.as_ref().is_some_and(|names| !names.is_empty())
    }

    /// True if the rule names at least one method criterion
    ///
    /// A rule without method criteria can never select a call site and is
    /// dropped during method matching.
    pub fn has_method_criteria(&self) -> bool {
        self.method_annotation.as_deref().is_some_and(|a| !a.is_empty())
            || self.method_name.as_ref().is_some_and(|names| !names.is_empty())
    }
}

/// Hook methods injected at a matched call site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct InsertCodeSpec {
    /// Fully-qualified class holding the hook methods
    pub class_name: Option<String>,
    /// Static method invoked at method exit
    pub on_method_after: Option<String>,
    /// Static method invoked at method entry
    pub on_method_before: Option<String>,
}

/// Load and parse a rule file
pub fn load_rules(path: &Path) -> Result<Vec<InjectRule>, RulesError> {
    let raw = fs::read_to_string(path).map_err(|source| RulesError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| RulesError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
