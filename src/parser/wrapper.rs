//! Wrapper command detection and unwrapping
//!
//! Two kinds of wrappers matter here. Shell executors (`bash -c`, `eval`)
//! carry a whole command line as a string argument, which has to be pulled
//! out and evaluated again. Invocation wrappers (`sudo`, `timeout`, `xargs`,
//! ...) just prefix the real command and its options.

use once_cell::sync::Lazy;
use regex::Regex;

/// Invocation wrappers seen in front of the real command of a pipeline stage
pub const DEFAULT_WRAPPERS: &[&str] = &[
    "sudo",
    "timeout",
    "xargs",
    "env",
    "nice",
    "nohup",
    "ionice",
    "strace",
    "time",
    "unbuffer",
    "watch",
    "doas", // BSD sudo alternative
];

static SHELL_EXECUTOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^(?:(?:\S*/)?(?:ba|z|da|k)?sh\s+(?:-\S+\s+)*-[A-Za-z]*c|eval)\s+(?:"((?:[^"\\]|\\.)*)"|'([^']*)')"#,
    )
    .unwrap()
});

/// Extract the command string a shell executor would run
///
/// Matches `bash -c "<inner>"`, `sh -c '<inner>'` and `eval "<inner>"` (also
/// `zsh`/`dash`/`ksh` and absolute interpreter paths). Double-quoted bodies
/// have their backslash escapes resolved.
pub fn extract_executor_body(command: &str) -> Option<String> {
    let caps = SHELL_EXECUTOR.captures(command.trim_start())?;

    if let Some(double) = caps.get(1) {
        return Some(unescape_double_quoted(double.as_str()));
    }

    caps.get(2).map(|single| single.as_str().to_string())
}

/// Return the body of a shell executor, or the command unchanged
///
/// Only one executor level is removed per call. Unwrapping again is a no-op
/// for bodies that are not themselves executors; a nested `bash -c` body
/// peels one more level each time.
pub fn unwrap_executor(command: &str) -> String {
    extract_executor_body(command).unwrap_or_else(|| command.to_string())
}

fn unescape_double_quoted(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.peek() {
                Some(&next @ ('"' | '\\' | '$' | '`')) => {
                    out.push(next);
                    chars.next();
                }
                _ => out.push(c),
            }
        } else {
            out.push(c);
        }
    }

    out
}

/// Index of the real command inside a word list that may start with wrappers
///
/// Example: `["sudo", "timeout", "30", "cat", "x"]` -> `Some(3)`
/// Returns `None` when the words are only wrappers and their options.
pub fn real_command_index(words: &[&str]) -> Option<usize> {
    let mut idx = 0;

    while idx < words.len() {
        let word = words[idx];

        if !DEFAULT_WRAPPERS.contains(&word) {
            return Some(idx);
        }

        idx = match word {
            "sudo" | "doas" => skip_options(
                words,
                idx + 1,
                &["-u", "--user", "-g", "--group", "-C", "--close-from", "-h", "--host"],
            ),
            "timeout" => {
                // First non-option is the duration
                skip_options(words, idx + 1, &["-s", "--signal", "-k", "--kill-after"]) + 1
            }
            "env" => {
                let mut next = skip_options(words, idx + 1, &["-u", "--unset", "-C", "--chdir"]);
                while next < words.len() && is_assignment(words[next]) {
                    next += 1;
                }
                next
            }
            "xargs" => skip_options(words, idx + 1, &["-n", "-L", "-I", "-E", "-s", "-P", "-d", "-a"]),
            "watch" => skip_options(words, idx + 1, &["-n", "-d", "--interval", "--differences"]),
            _ => skip_options(words, idx + 1, &["-n", "-c", "-p", "-o", "-e"]),
        };
    }

    None
}

/// Skip flags starting at `start`; flags listed in `with_value` also consume the next word
fn skip_options(words: &[&str], start: usize, with_value: &[&str]) -> usize {
    let mut idx = start;

    while idx < words.len() && words[idx].starts_with('-') {
        if with_value.contains(&words[idx]) {
            idx += 2;
        } else {
            idx += 1;
        }
    }

    idx
}

/// `NAME=value` shell assignment
pub fn is_assignment(word: &str) -> bool {
    match word.split_once('=') {
        Some((name, _)) => {
            let mut chars = name.chars();
            matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    }
}
