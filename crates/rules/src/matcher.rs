//! Class and method matching against the loaded rules
//!
//! The host hands in names as they appear in class files: internal class
//! names (`com/example/Foo$Inner`) and annotation descriptors
//! (`Lcom/example/Timed;`). The rule file uses dotted source names, so
//! both sides are normalized before comparison.
//!
//! Matching is two-phase, mirroring how the host walks a class file:
//! first the class (`RuleSet::match_class`), then each method of a hit
//! class (`ClassMatch::match_method`). The index of a matched rule is the
//! configuration index injected at the call site.

use crate::model::InjectRule;
use tracing::debug;

/// Outcome of a match phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchState {
    /// No rule carries criteria for this phase
    NotConfigured,
    /// Criteria exist, but nothing matched
    NotMatched,
    /// At least one rule matched
    Matched,
}

/// Immutable set of loaded rules
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<InjectRule>,
}

/// Rules that survived the class phase for one class
#[derive(Debug, Clone)]
pub struct ClassMatch<'a> {
    /// (rule index, rule) pairs that apply to the class
    hits: Vec<(usize, &'a InjectRule)>,
}

impl RuleSet {
    pub fn new(rules: Vec<InjectRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[InjectRule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Match a class by internal name and (optionally) class annotation
    ///
    /// A rule hits when it names the class, names the class annotation, or
    /// carries no class criteria at all (applies everywhere). Inner-class
    /// suffixes (`$Inner`) are stripped before comparison.
    pub fn match_class(&self, class_name: &str, class_annotation: Option<&str>) -> ClassMatch<'_> {
        let dotted = normalize_class_name(class_name);
        let annotation = class_annotation.map(normalize_annotation);

        let hits: Vec<_> = self
            .rules
            .iter()
            .enumerate()
            .filter(|(_, rule)| {
                if !rule.has_class_criteria() {
                    return true;
                }
                if rule
                    .class_name
                    .as_ref()
                    .is_some_and(|names| names.iter().any(|n| n == &dotted))
                {
                    return true;
                }
                match (&rule.class_annotation, &annotation) {
                    (Some(configured), Some(seen)) => configured == seen,
                    _ => false,
                }
            })
            .collect();

        debug!(class = %dotted, hits = hits.len(), "class match");
        ClassMatch { hits }
    }

    /// Class-name-only match state, for diagnostics
    pub fn class_match_state(&self, class_name: &str) -> MatchState {
        let dotted = normalize_class_name(class_name);
        let configured: Vec<_> = self
            .rules
            .iter()
            .filter(|rule| rule.class_name.as_ref().is_some_and(|n| !n.is_empty()))
            .collect();

        if configured.is_empty() {
            return MatchState::NotConfigured;
        }
        let matched = configured
            .iter()
            .any(|rule| rule.class_name.as_ref().is_some_and(|n| n.contains(&dotted)));
        if matched {
            MatchState::Matched
        } else {
            MatchState::NotMatched
        }
    }
}

impl<'a> ClassMatch<'a> {
    /// Rules that apply to the class, with their configuration indices
    pub fn hits(&self) -> &[(usize, &'a InjectRule)] {
        &self.hits
    }

    /// True if no rule with method criteria applies to the class
    ///
    /// Rules without method criteria can never select a call site; they are
    /// ineffective hits and do not count.
    pub fn is_empty(&self) -> bool {
        !self.hits.iter().any(|(_, rule)| rule.has_method_criteria())
    }

    /// Match a method by name and (optionally) annotation descriptor
    ///
    /// A rule hits when its method-name list contains the name or its
    /// method annotation equals the descriptor. Returns the matched
    /// (configuration index, rule) pairs in rule-file order.
    pub fn match_method(
        &self,
        method_name: &str,
        method_annotation: Option<&str>,
    ) -> Vec<(usize, &'a InjectRule)> {
        let annotation = method_annotation.map(normalize_annotation);

        let matched: Vec<_> = self
            .hits
            .iter()
            .filter(|(_, rule)| rule.has_method_criteria())
            .filter(|(_, rule)| {
                if rule
                    .method_name
                    .as_ref()
                    .is_some_and(|names| names.iter().any(|n| n == method_name))
                {
                    return true;
                }
                match (&rule.method_annotation, &annotation) {
                    (Some(configured), Some(seen)) => configured == seen,
                    _ => false,
                }
            })
            .copied()
            .collect();

        debug!(method = method_name, hits = matched.len(), "method match");
        matched
    }
}

/// Internal class name to dotted source name, inner classes folded into
/// their enclosing class
fn normalize_class_name(name: &str) -> String {
    let dotted = name.replace('/', ".");
    match dotted.find('$') {
        Some(idx) => dotted[..idx].to_string(),
        None => dotted,
    }
}

/// Annotation descriptor (`Lcom/foo/Timed;`) or dotted name to dotted name
fn normalize_annotation(descriptor: &str) -> String {
    let inner = descriptor
        .strip_prefix('L')
        .and_then(|rest| rest.strip_suffix(';'))
        .unwrap_or(descriptor);
    inner.replace('/', ".")
}
