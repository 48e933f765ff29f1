//! Ignore rule sets with gitignore precedence
//!
//! Rules are kept in rank order (built-in defaults, then file lines) and
//! evaluated last-match-wins, walking the path from its outermost directory
//! inwards. Once a directory is excluded nothing below it can be
//! re-included, the same limitation git has.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use crate::engine::normalize::NormalizedPath;
use crate::rules::{IgnoreRule, RuleSource, DEFAULT_IGNORE_PATTERNS};

/// Loaded rule sets, keyed by ignore-file path
static RULE_SET_CACHE: Lazy<RwLock<HashMap<PathBuf, Arc<IgnoreRuleSet>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Ordered list of ignore rules
#[derive(Debug, Clone, Default)]
pub struct IgnoreRuleSet {
    rules: Vec<IgnoreRule>,
}

impl IgnoreRuleSet {
    /// Built-in defaults only
    pub fn defaults() -> Self {
        let mut set = Self::default();
        set.extend_lines(DEFAULT_IGNORE_PATTERNS.iter().copied(), RuleSource::Builtin);
        set
    }

    /// Exactly the given patterns, without defaults
    pub fn from_patterns<'a>(patterns: impl IntoIterator<Item = &'a str>) -> Self {
        let mut set = Self::default();
        set.extend_lines(patterns, RuleSource::File);
        set
    }

    /// Built-in defaults followed by the lines of an ignore file
    pub fn with_file_contents(contents: &str) -> Self {
        let mut set = Self::defaults();
        set.extend_lines(contents.lines(), RuleSource::File);
        set
    }

    /// Defaults plus the file at `path`; a missing or unreadable file means defaults only
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::with_file_contents(&contents),
            Err(_) => Self::defaults(),
        }
    }

    /// Like [`IgnoreRuleSet::load`], memoized per path for the life of the process
    pub fn load_cached(path: &Path) -> Arc<Self> {
        if let Ok(cache) = RULE_SET_CACHE.read() {
            if let Some(set) = cache.get(path) {
                return Arc::clone(set);
            }
        }

        let set = Arc::new(Self::load(path));

        if let Ok(mut cache) = RULE_SET_CACHE.write() {
            cache
                .entry(path.to_path_buf())
                .or_insert_with(|| Arc::clone(&set));
        }

        set
    }

    fn extend_lines<'a>(&mut self, lines: impl IntoIterator<Item = &'a str>, source: RuleSource) {
        for line in lines {
            let rank = self.rules.len();
            if let Some(rule) = IgnoreRule::parse(line, rank, source) {
                self.rules.push(rule);
            }
        }
    }

    /// Rules in rank order
    pub fn rules(&self) -> &[IgnoreRule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The rule that excludes `path`, if any
    ///
    /// Each ancestor is checked from the outermost inwards; at every level
    /// the last matching rule decides. An excluded ancestor ends the walk,
    /// so a negation deeper down cannot re-include anything inside it.
    pub fn excluding_rule(&self, path: &NormalizedPath) -> Option<&IgnoreRule> {
        let segments = path.segments();

        for end in 1..=segments.len() {
            let prefix = &segments[..end];
            let last_match = self.rules.iter().rev().find(|r| r.matches_segments(prefix));

            if let Some(rule) = last_match {
                if !rule.negated {
                    return Some(rule);
                }
            }
        }

        None
    }

    pub fn is_excluded(&self, path: &NormalizedPath) -> bool {
        self.excluding_rule(path).is_some()
    }
}
