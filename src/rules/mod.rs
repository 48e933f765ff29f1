//! Rules for scout-block
//!
//! Ignore patterns that mark excluded workspace areas, and the catalogue of
//! tooling commands that are exempt from path blocking.

pub mod ignore;
pub mod tooling;

use regex::Regex;

/// Built-in ignore patterns, always applied first and in this order
pub const DEFAULT_IGNORE_PATTERNS: &[&str] = &[
    "node_modules",
    "__pycache__",
    ".git",
    "dist",
    "build",
    ".next",
    ".nuxt",
    ".turbo",
    ".venv",
    "venv",
    ".pytest_cache",
    ".mypy_cache",
];

/// Where a rule came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleSource {
    Builtin,
    File,
}

/// Matcher for one path segment
#[derive(Debug, Clone)]
enum SegmentMatcher {
    Literal(String),
    Wildcard(Regex),
}

impl SegmentMatcher {
    fn compile(segment: &str) -> Option<Self> {
        if !segment.contains(['*', '?']) {
            return Some(SegmentMatcher::Literal(segment.to_string()));
        }

        let pattern = regex::escape(segment)
            .replace(r"\*", "[^/]*")
            .replace(r"\?", "[^/]");
        Regex::new(&format!("^{}$", pattern))
            .ok()
            .map(SegmentMatcher::Wildcard)
    }

    fn matches(&self, segment: &str) -> bool {
        match self {
            SegmentMatcher::Literal(literal) => literal == segment,
            SegmentMatcher::Wildcard(re) => re.is_match(segment),
        }
    }
}

/// One line of an ignore specification
#[derive(Debug, Clone)]
pub struct IgnoreRule {
    /// Pattern text without the `!` prefix
    pub pattern: String,

    /// `!pattern`: re-include instead of exclude
    pub negated: bool,

    /// Position in the rule set; a higher rank wins
    pub rank: usize,

    pub source: RuleSource,

    anchored: bool,
    segments: Vec<SegmentMatcher>,
}

impl IgnoreRule {
    /// Parse one ignore-file line
    ///
    /// Returns `None` for blank lines, comments and patterns that cannot be
    /// compiled.
    pub fn parse(line: &str, rank: usize, source: RuleSource) -> Option<Self> {
        let line = line.trim_end();
        if line.trim().is_empty() || line.starts_with('#') {
            return None;
        }

        let (negated, body) = match line.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, line.strip_prefix('\\').unwrap_or(line)),
        };
        let body = body.trim_start();

        let anchored = body.starts_with('/');
        let mut parts: Vec<&str> = body.split('/').filter(|s| !s.is_empty() && *s != ".").collect();
        while parts.first() == Some(&"**") {
            parts.remove(0);
        }
        if parts.is_empty() {
            return None;
        }

        let segments = parts
            .iter()
            .map(|s| SegmentMatcher::compile(s))
            .collect::<Option<Vec<_>>>()?;

        Some(Self {
            pattern: body.to_string(),
            negated,
            rank,
            source,
            anchored,
            segments,
        })
    }

    /// Whether the rule matches the path made of exactly these segments
    ///
    /// Floating patterns match the trailing segments; anchored ones must
    /// cover the path from its first segment.
    pub fn matches_segments(&self, path: &[String]) -> bool {
        let n = self.segments.len();
        if path.len() < n || (self.anchored && path.len() != n) {
            return false;
        }

        let tail = &path[path.len() - n..];
        self.segments
            .iter()
            .zip(tail)
            .all(|(matcher, segment)| matcher.matches(segment))
    }
}
