//! Path normalization for ignore matching
//!
//! Turns a raw token into workspace-relative segments without touching the
//! filesystem, so `./dist//a.js`, `"dist/a.js"` and `/work/app/dist/a.js`
//! (with `/work/app` as the root) all compare equal.

use std::fmt;
use std::path::Path;

/// A canonical, segment-decomposed path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedPath {
    segments: Vec<String>,
}

impl NormalizedPath {
    /// Path segments, outermost first
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Segments joined with `/`
    pub fn as_string(&self) -> String {
        self.segments.join("/")
    }
}

impl fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_string())
    }
}

/// Shell leftovers that can cling to a token from naive tokenization
fn is_shell_noise(c: char) -> bool {
    matches!(
        c,
        '"' | '\'' | '`' | '(' | ')' | ';' | '&' | '|' | '<' | '>' | ',' | '{' | '}'
    ) || c.is_whitespace()
}

/// Normalize a raw path token
///
/// Quotes and shell metacharacters around the token are stripped, `\` is
/// treated as a separator, `.` and `..` are resolved syntactically and
/// leading `..` that climb above the start are dropped, keeping the tail.
/// Absolute paths under `workspace_root` become relative to it. Returns
/// `None` when nothing matchable is left (`.`, `/`, the root itself).
pub fn normalize_path(raw: &str, workspace_root: Option<&Path>) -> Option<NormalizedPath> {
    let cleaned = raw.trim_matches(is_shell_noise).replace('\\', "/");
    if cleaned.is_empty() {
        return None;
    }

    let mut segments = resolve_segments(strip_drive(&cleaned));

    if is_absolute(&cleaned) {
        if let Some(root) = workspace_root {
            let root_str = root.to_string_lossy().replace('\\', "/");
            let root_segments = resolve_segments(strip_drive(&root_str));
            if !root_segments.is_empty() && segments.starts_with(&root_segments) {
                segments.drain(..root_segments.len());
            }
        }
    }

    if segments.is_empty() {
        None
    } else {
        Some(NormalizedPath { segments })
    }
}

fn is_absolute(path: &str) -> bool {
    path.starts_with('/') || strip_drive(path).len() != path.len()
}

/// Drop a Windows drive prefix such as `C:`
fn strip_drive(path: &str) -> &str {
    let bytes = path.as_bytes();
    if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
        &path[2..]
    } else {
        path
    }
}

fn resolve_segments(path: &str) -> Vec<String> {
    let mut segments: Vec<String> = Vec::new();

    for part in path.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other.to_string()),
        }
    }

    segments
}
