//! Injection rule model and matching for ByteLego
//!
//! This crate provides:
//! - Serde model of the `bytelego.json` rule file
//! - Class/method/annotation matching with JVM-name normalization
//! - Rule store with mtime-based hot reload
//!
//! The matched rule's position in the file is the configuration index the
//! host passes to the runtime hooks in `bytelego-hooks`.

pub mod matcher;
pub mod model;
pub mod store;

// Re-exports
pub use matcher::{ClassMatch, MatchState, RuleSet};
pub use model::{load_rules, InjectRule, InsertCodeSpec, RulesError};
pub use store::{ModifiedTracker, RuleStore};
