//! Shell command splitting and prefix stripping
//!
//! Breaks a compound command into its top-level sub-commands and strips the
//! assignment/privilege prefixes that sit in front of the real command.

use once_cell::sync::Lazy;
use regex::Regex;

/// Split a command on top-level `&&`, `||` and `;`
///
/// Quoting, backslash escapes and `$(...)` bodies are respected. Newlines and
/// single pipes never split: a here-document body or a pipeline belongs to
/// the command that starts it. Here-document bodies are copied through
/// verbatim up to their delimiter line. Empty segments are dropped.
pub fn split_commands(command: &str) -> Vec<String> {
    let chars: Vec<char> = command.chars().collect();
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut in_single = false;
    let mut in_double = false;
    let mut subst_depth = 0usize;
    let mut pending_heredocs: Vec<(String, bool)> = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if in_single {
            current.push(c);
            if c == '\'' {
                in_single = false;
            }
            i += 1;
            continue;
        }

        if c == '\\' {
            current.push(c);
            if let Some(&next) = chars.get(i + 1) {
                current.push(next);
            }
            i += 2;
            continue;
        }

        if in_double {
            current.push(c);
            if c == '"' {
                in_double = false;
            }
            i += 1;
            continue;
        }

        match c {
            '\'' => in_single = true,
            '"' => in_double = true,
            '$' if chars.get(i + 1) == Some(&'(') => {
                current.push_str("$(");
                subst_depth += 1;
                i += 2;
                continue;
            }
            '(' if subst_depth > 0 => subst_depth += 1,
            ')' if subst_depth > 0 => subst_depth -= 1,
            '<' if subst_depth == 0 && chars.get(i + 1) == Some(&'<') => {
                // `<<<` is a here-string, not a here-document
                let end = if chars.get(i + 2) == Some(&'<') {
                    i + 3
                } else {
                    let (delimiter, strip_tabs, end) = read_heredoc_delimiter(&chars, i + 2);
                    if !delimiter.is_empty() {
                        pending_heredocs.push((delimiter, strip_tabs));
                    }
                    end
                };
                current.extend(&chars[i..end]);
                i = end;
                continue;
            }
            '\n' if !pending_heredocs.is_empty() => {
                current.push('\n');
                i = copy_heredoc_bodies(&chars, i + 1, &mut pending_heredocs, &mut current);
                continue;
            }
            _ => {}
        }

        if subst_depth == 0 {
            let next = chars.get(i + 1).copied();
            let is_separator = matches!((c, next), ('&', Some('&')) | ('|', Some('|')));
            if is_separator || c == ';' {
                push_part(&mut parts, &current);
                current.clear();
                i += if is_separator { 2 } else { 1 };
                continue;
            }
        }

        current.push(c);
        i += 1;
    }

    push_part(&mut parts, &current);
    parts
}

/// Delimiter word after `<<` or `<<-`, with quotes removed
///
/// Returns the delimiter, whether leading tabs are stripped from body lines,
/// and the index just past the delimiter word.
fn read_heredoc_delimiter(chars: &[char], start: usize) -> (String, bool, usize) {
    let mut idx = start;
    let strip_tabs = chars.get(idx) == Some(&'-');
    if strip_tabs {
        idx += 1;
    }
    while matches!(chars.get(idx), Some(' ') | Some('\t')) {
        idx += 1;
    }

    let mut delimiter = String::new();
    let mut quote: Option<char> = None;

    while let Some(&c) = chars.get(idx) {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => delimiter.push(c),
            None => match c {
                '\'' | '"' => quote = Some(c),
                '\\' => {}
                _ if c.is_whitespace() || matches!(c, ';' | '&' | '|' | '<' | '>' | '(' | ')') => break,
                _ => delimiter.push(c),
            },
        }
        idx += 1;
    }

    (delimiter, strip_tabs, idx)
}

/// Copy the bodies of queued here-documents into `current`, starting at `start`
///
/// Returns the index after the last delimiter line. An unterminated body
/// runs to the end of the input.
fn copy_heredoc_bodies(
    chars: &[char],
    start: usize,
    pending: &mut Vec<(String, bool)>,
    current: &mut String,
) -> usize {
    let mut idx = start;

    for (delimiter, strip_tabs) in pending.drain(..) {
        while idx < chars.len() {
            let end = chars[idx..]
                .iter()
                .position(|&c| c == '\n')
                .map_or(chars.len(), |off| idx + off);
            let line: String = chars[idx..end].iter().collect();

            current.push_str(&line);
            if end < chars.len() {
                current.push('\n');
            }
            idx = (end + 1).min(chars.len());

            let candidate = if strip_tabs { line.trim_start_matches('\t') } else { line.as_str() };
            if candidate.trim_end() == delimiter {
                break;
            }
        }
    }

    idx
}

fn push_part(parts: &mut Vec<String>, part: &str) {
    let trimmed = part.trim();
    if !trimmed.is_empty() {
        parts.push(trimmed.to_string());
    }
}

static ENV_ASSIGNMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^[A-Za-z_][A-Za-z0-9_]*=(?:"(?:[^"\\]|\\.)*"|'[^']*'|\S)*(?:\s+|$)"#).unwrap()
});

static SUDO_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^sudo(?:\s+(?:-[ugCh]\s+\S+|-\S+))*(?:\s+|$)").unwrap());

static ENV_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^env(?:\s+-\S+)*(?:\s+|$)").unwrap());

/// Strip leading `NAME=value` assignments, `sudo` and bare `env` wrappers
///
/// The result is always a suffix of the input. A command without such a
/// prefix is returned unchanged, so the function is idempotent.
pub fn strip_command_prefix(command: &str) -> &str {
    let mut rest = command.trim_start();
    let mut stripped = false;

    loop {
        let matched = [&*ENV_ASSIGNMENT, &*SUDO_PREFIX, &*ENV_PREFIX]
            .iter()
            .find_map(|re| re.find(rest));

        match matched {
            Some(m) if m.end() > 0 => {
                rest = rest[m.end()..].trim_start();
                stripped = true;
            }
            _ => break,
        }
    }

    if stripped {
        rest
    } else {
        command
    }
}
