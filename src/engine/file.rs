//! File, search and glob path checking
//!
//! Read/Edit/Write name a single path. Grep names an optional directory (its
//! `pattern` is a regular expression, not a location). Glob names a pattern
//! and an optional base directory, and may additionally be rejected for
//! being unscoped.

use std::path::Path;

use crate::engine::normalize::{normalize_path, NormalizedPath};
use crate::output::BlockDecision;
use crate::rules::ignore::IgnoreRuleSet;

/// Directories offered as scopes for an overly broad glob
pub const SUGGESTED_SCOPES: &[&str] = &["src", "lib", "app", "packages", "tests"];

/// Check one file path
pub fn check_path(
    file_path: &str,
    rules: &IgnoreRuleSet,
    workspace_root: Option<&Path>,
) -> BlockDecision {
    match normalize_path(file_path, workspace_root) {
        Some(path) => check_normalized(&path, rules),
        None => BlockDecision::allow(),
    }
}

fn check_normalized(path: &NormalizedPath, rules: &IgnoreRuleSet) -> BlockDecision {
    match rules.excluding_rule(path) {
        Some(rule) => BlockDecision::blocked_path(path.as_string(), rule.pattern.as_str()),
        None => BlockDecision::allow(),
    }
}

/// Check a content search; only its directory is a location
pub fn check_search(
    path: Option<&str>,
    rules: &IgnoreRuleSet,
    workspace_root: Option<&Path>,
) -> BlockDecision {
    path.map(|p| check_path(p, rules, workspace_root))
        .unwrap_or_else(BlockDecision::allow)
}

/// Check a glob pattern and its optional base directory
pub fn check_glob(
    pattern: &str,
    base_path: Option<&str>,
    rules: &IgnoreRuleSet,
    workspace_root: Option<&Path>,
    check_broad_patterns: bool,
) -> BlockDecision {
    let broad = check_broad_patterns && is_broad_glob(pattern, base_path, workspace_root);

    if let Some(base) = base_path {
        let decision = check_path(base, rules, workspace_root);
        if decision.is_blocked() {
            return decision;
        }
    }

    let target = match base_path {
        Some(base) if !is_absolute_pattern(pattern) => {
            format!("{}/{}", base.trim_end_matches(['/', '\\']), pattern)
        }
        _ => pattern.to_string(),
    };

    let mut decision = check_path(&target, rules, workspace_root);
    if decision.is_blocked() {
        decision.is_broad_pattern = broad;
        return decision;
    }

    if broad {
        return BlockDecision::broad_pattern(pattern, &suggest_scoped_patterns(pattern));
    }

    BlockDecision::allow()
}

fn is_absolute_pattern(pattern: &str) -> bool {
    let bytes = pattern.as_bytes();
    pattern.starts_with(['/', '\\'])
        || (bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':')
}

fn has_wildcard(segment: &str) -> bool {
    segment.contains(['*', '?', '['])
}

/// Whether a glob scans the whole workspace
///
/// A pattern is broad when it recurses (`**`) and nothing fixed comes
/// before the recursion: `**/*.ts` and `*/**/x` are broad, `src/**/*.ts`
/// and `*.ts` are not. A base directory below the workspace root scopes
/// any pattern.
pub fn is_broad_glob(pattern: &str, base_path: Option<&str>, workspace_root: Option<&Path>) -> bool {
    if base_path.and_then(|b| normalize_path(b, workspace_root)).is_some() {
        return false;
    }

    let Some(path) = normalize_path(pattern, workspace_root) else {
        return false;
    };

    match path.segments().iter().position(|s| s == "**") {
        Some(first_recursive) => path.segments()[..first_recursive]
            .iter()
            .all(|s| has_wildcard(s)),
        None => false,
    }
}

/// Scoped rewrites of a broad pattern, e.g. `**/*.ts` -> `src/**/*.ts`
pub fn suggest_scoped_patterns(pattern: &str) -> Vec<String> {
    let normalized = pattern.replace('\\', "/");
    let segments: Vec<&str> = normalized
        .split('/')
        .filter(|s| !s.is_empty() && *s != ".")
        .collect();

    let Some(first_recursive) = segments.iter().position(|s| *s == "**") else {
        return Vec::new();
    };
    let tail = segments[first_recursive..].join("/");

    SUGGESTED_SCOPES
        .iter()
        .map(|scope| format!("{}/{}", scope, tail))
        .collect()
}
