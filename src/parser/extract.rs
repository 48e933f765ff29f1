//! Context-aware path extraction
//!
//! Scans a single sub-command into words and operators, keeping track of
//! which words were quoted and which contained command substitution, then
//! picks the words that denote filesystem locations. A small per-command
//! table says which arguments are patterns or free text rather than paths
//! (`grep PATTERN`, `echo TEXT`, `sed SCRIPT`, `git commit -m MSG`).

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::parser::shell::{split_commands, strip_command_prefix};
use crate::parser::wrapper::{is_assignment, real_command_index};

/// Nesting limit for `$(...)` recursion
pub const MAX_SUBSTITUTION_DEPTH: usize = 4;

/// One scanned shell word
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    /// Text with quotes and escapes removed
    pub text: String,
    /// Some part of the word was quoted
    pub quoted: bool,
    /// The word contained a command substitution
    pub dynamic: bool,
}

/// Scanner output unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Word(Word),
    /// `|`, `|&`, `&`, `;` and `&&`/`||` inside substitutions: starts a new stage
    StageBreak,
    /// `>`, `>>`, `<`, `&>`: the next word is a path
    Redirect,
    /// `2>&1`, `>&-`: descriptor duplication, no path
    Duplicate,
    /// `<<<`: the next word is text
    HereString,
}

/// Words and operators of one command plus the bodies of its substitutions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scan {
    pub tokens: Vec<Token>,
    pub substitutions: Vec<String>,
}

/// How a command treats its arguments
#[derive(Debug, Clone, Copy)]
struct ArgSpec {
    /// Every argument is free text
    all_text: bool,
    /// Leading positional arguments that are patterns or scripts
    text_positionals: usize,
    /// Flags whose value (the next word) is text
    value_flags: &'static [&'static str],
    /// Flags that supply the pattern, so no positional one follows
    pattern_flags: &'static [&'static str],
    /// Subcommands whose operands are refs or names up to `--`
    ref_subcommands: &'static [&'static str],
}

const DEFAULT_SPEC: ArgSpec = ArgSpec {
    all_text: false,
    text_positionals: 0,
    value_flags: &[],
    pattern_flags: &[],
    ref_subcommands: &[],
};

const TEXT_SPEC: ArgSpec = ArgSpec {
    all_text: true,
    ..DEFAULT_SPEC
};

// `-E`, `-G` and `-T` are bare switches here (regex syntax, initial tab)
const GREP_SPEC: ArgSpec = ArgSpec {
    all_text: false,
    text_positionals: 1,
    value_flags: &[
        "-e", "--regexp", "-f", "--file", "-g", "--type", "-m", "--max-count", "-A",
        "-B", "-C", "--include", "--exclude", "--exclude-dir", "--ignore-dir",
    ],
    pattern_flags: &["-e", "--regexp", "-f", "--file"],
    ref_subcommands: &[],
};

const RG_SPEC: ArgSpec = ArgSpec {
    all_text: false,
    text_positionals: 1,
    value_flags: &[
        "-e", "--regexp", "-f", "--file", "-g", "--glob", "--iglob", "-t", "--type", "-T",
        "--type-not", "-E", "--encoding", "-m", "--max-count", "-A", "-B", "-C", "-M",
        "--max-columns", "-j", "--threads", "--ignore-file",
    ],
    pattern_flags: &["-e", "--regexp", "-f", "--file"],
    ref_subcommands: &[],
};

/// Command name -> argument treatment
static ARG_SPECS: Lazy<HashMap<&'static str, ArgSpec>> = Lazy::new(|| {
    let mut specs = HashMap::new();

    for name in ["echo", "printf", "print", "say", "notify-send", "logger"] {
        specs.insert(name, TEXT_SPEC);
    }

    for name in ["grep", "egrep", "fgrep", "ag", "ack", "git-grep", "zgrep"] {
        specs.insert(name, GREP_SPEC);
    }
    specs.insert("rg", RG_SPEC);

    specs.insert(
        "sed",
        ArgSpec {
            all_text: false,
            text_positionals: 1,
            value_flags: &["-e", "--expression", "-f", "--file"],
            pattern_flags: &["-e", "--expression", "-f", "--file"],
            ref_subcommands: &[],
        },
    );

    for name in ["awk", "gawk", "mawk", "nawk"] {
        specs.insert(
            name,
            ArgSpec {
                all_text: false,
                text_positionals: 1,
                value_flags: &["-F", "-v", "-f"],
                pattern_flags: &["-f"],
                ref_subcommands: &[],
            },
        );
    }

    specs.insert(
        "jq",
        ArgSpec {
            all_text: false,
            text_positionals: 1,
            value_flags: &["--arg", "--argjson", "--indent"],
            pattern_flags: &["-f", "--from-file"],
            ref_subcommands: &[],
        },
    );

    specs.insert(
        "find",
        ArgSpec {
            all_text: false,
            text_positionals: 0,
            value_flags: &[
                "-name", "-iname", "-path", "-ipath", "-regex", "-iregex", "-wholename",
                "-iwholename", "-type", "-maxdepth", "-mindepth", "-size", "-mtime", "-newer",
                "-user", "-group", "-perm", "-printf",
            ],
            pattern_flags: &[],
            ref_subcommands: &[],
        },
    );

    // First positional is the subcommand
    specs.insert(
        "git",
        ArgSpec {
            all_text: false,
            text_positionals: 1,
            value_flags: &[
                "-m", "--message", "--grep", "--author", "-S", "-G", "--format", "--pretty",
                "--since", "--until",
            ],
            pattern_flags: &[],
            ref_subcommands: &[
                "checkout", "switch", "branch", "merge", "rebase", "tag", "push", "pull",
                "fetch", "cherry-pick", "revert", "remote", "stash",
            ],
        },
    );

    specs
});

fn arg_spec(head: &str) -> ArgSpec {
    let name = head.rsplit('/').next().unwrap_or(head);
    ARG_SPECS.get(name).copied().unwrap_or(DEFAULT_SPEC)
}

/// Extract the path-like arguments of a sub-command
///
/// Flags, pattern/text arguments, URLs and dynamic words are skipped;
/// paths inside `$(...)` and backticks are included. A command with no
/// path-shaped argument (`echo hello`) yields an empty list.
pub fn extract_paths(command: &str) -> Vec<String> {
    extract_with_depth(command, 0)
}

fn extract_with_depth(command: &str, depth: usize) -> Vec<String> {
    if depth > MAX_SUBSTITUTION_DEPTH {
        return Vec::new();
    }

    let scan = scan(command);
    let mut paths = Vec::new();

    for stage in scan.tokens.split(|t| *t == Token::StageBreak) {
        collect_stage_paths(stage, &mut paths);
    }

    for inner in &scan.substitutions {
        for sub in split_commands(inner) {
            paths.extend(extract_with_depth(strip_command_prefix(&sub), depth + 1));
        }
    }

    paths
}

fn collect_stage_paths(stage: &[Token], paths: &mut Vec<String>) {
    let mut expect_redirect_target = false;
    let mut skip_next = false;
    let mut words: Vec<&Word> = Vec::new();

    // Redirect targets can appear anywhere; everything else is an argument
    for token in stage {
        match token {
            Token::Redirect => expect_redirect_target = true,
            Token::HereString => skip_next = true,
            Token::Duplicate | Token::StageBreak => {}
            Token::Word(word) => {
                if expect_redirect_target {
                    expect_redirect_target = false;
                    if is_path_candidate(word) {
                        paths.push(word.text.clone());
                    }
                } else if skip_next {
                    skip_next = false;
                } else {
                    words.push(word);
                }
            }
        }
    }

    let first = words.iter().position(|w| w.quoted || !is_assignment(&w.text));
    let words = match first {
        Some(idx) => &words[idx..],
        None => return,
    };

    let texts: Vec<&str> = words.iter().map(|w| w.text.as_str()).collect();
    let head_idx = match real_command_index(&texts) {
        Some(idx) => idx,
        None => return,
    };

    let spec = arg_spec(&words[head_idx].text);
    let mut positional = 0usize;
    let mut pattern_given = false;
    let mut skip_value = false;
    let mut options_done = false;
    let mut refs_only = false;

    for word in &words[head_idx + 1..] {
        if skip_value {
            skip_value = false;
            continue;
        }

        if !options_done && word.text.starts_with('-') && word.text.len() > 1 {
            if word.text == "--" {
                options_done = true;
                continue;
            }
            if spec.value_flags.contains(&word.text.as_str()) {
                skip_value = true;
            }
            if spec.pattern_flags.contains(&word.text.as_str()) {
                pattern_given = true;
            }
            continue;
        }

        let is_text = if refs_only {
            !options_done
        } else {
            spec.all_text || (!pattern_given && positional < spec.text_positionals)
        };
        if positional == 0 && spec.ref_subcommands.contains(&word.text.as_str()) {
            refs_only = true;
        }
        positional += 1;

        if !is_text && is_path_candidate(word) {
            paths.push(word.text.clone());
        }
    }
}

/// A word that could name a filesystem location
fn is_path_candidate(word: &Word) -> bool {
    let text = word.text.trim();

    if text.is_empty() || word.dynamic {
        return false;
    }

    if text.contains("://") {
        return false;
    }

    if text.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }

    !matches!(text, "{}" | ";" | "\\;" | "+" | "-" | "--" | "." | "..")
}

/// Scan a command into words and operators
pub fn scan(command: &str) -> Scan {
    Scanner::new(command).run()
}

struct Scanner {
    chars: Vec<char>,
    pos: usize,
    tokens: Vec<Token>,
    substitutions: Vec<String>,
    buf: String,
    in_word: bool,
    quoted: bool,
    dynamic: bool,
    expect_delimiter: Option<bool>,
    pending_heredocs: Vec<(String, bool)>,
}

impl Scanner {
    fn new(command: &str) -> Self {
        Self {
            chars: command.chars().collect(),
            pos: 0,
            tokens: Vec::new(),
            substitutions: Vec::new(),
            buf: String::new(),
            in_word: false,
            quoted: false,
            dynamic: false,
            expect_delimiter: None,
            pending_heredocs: Vec::new(),
        }
    }

    fn peek(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn run(mut self) -> Scan {
        while let Some(c) = self.peek(0) {
            match c {
                '\n' => {
                    self.flush();
                    self.pos += 1;
                    self.skip_heredoc_bodies();
                }
                ' ' | '\t' | '\r' | '(' | ')' => {
                    self.flush();
                    self.pos += 1;
                }
                '\\' => {
                    match self.peek(1) {
                        Some('\n') => {}
                        Some(next) => {
                            self.buf.push(next);
                            self.in_word = true;
                        }
                        None => {}
                    }
                    self.pos += 2;
                }
                '\'' => self.single_quoted(),
                '"' => self.double_quoted(),
                '$' if self.peek(1) == Some('(') => {
                    self.substitution();
                }
                '`' => self.backtick(),
                '#' if !self.in_word => self.skip_comment(),
                '|' => {
                    self.flush();
                    self.pos += match self.peek(1) {
                        Some('|') | Some('&') => 2,
                        _ => 1,
                    };
                    self.tokens.push(Token::StageBreak);
                }
                '&' => {
                    self.flush();
                    if self.peek(1) == Some('>') {
                        self.pos += if self.peek(2) == Some('>') { 3 } else { 2 };
                        self.tokens.push(Token::Redirect);
                    } else {
                        self.pos += if self.peek(1) == Some('&') { 2 } else { 1 };
                        self.tokens.push(Token::StageBreak);
                    }
                }
                ';' => {
                    self.flush();
                    self.pos += 1;
                    self.tokens.push(Token::StageBreak);
                }
                '<' | '>' => self.redirect(c),
                _ => {
                    self.buf.push(c);
                    self.in_word = true;
                    self.pos += 1;
                }
            }
        }

        self.flush();

        Scan {
            tokens: self.tokens,
            substitutions: self.substitutions,
        }
    }

    fn flush(&mut self) {
        if !self.in_word {
            return;
        }

        let word = Word {
            text: std::mem::take(&mut self.buf),
            quoted: self.quoted,
            dynamic: self.dynamic,
        };
        self.in_word = false;
        self.quoted = false;
        self.dynamic = false;

        if let Some(strip_tabs) = self.expect_delimiter.take() {
            self.pending_heredocs.push((word.text, strip_tabs));
            return;
        }

        self.tokens.push(Token::Word(word));
    }

    fn single_quoted(&mut self) {
        self.in_word = true;
        self.quoted = true;
        self.pos += 1;

        while let Some(c) = self.peek(0) {
            self.pos += 1;
            if c == '\'' {
                return;
            }
            self.buf.push(c);
        }
    }

    fn double_quoted(&mut self) {
        self.in_word = true;
        self.quoted = true;
        self.pos += 1;

        while let Some(c) = self.peek(0) {
            match c {
                '"' => {
                    self.pos += 1;
                    return;
                }
                '\\' => {
                    match self.peek(1) {
                        Some(next @ ('"' | '\\' | '$' | '`')) => self.buf.push(next),
                        Some('\n') => {}
                        Some(next) => {
                            self.buf.push('\\');
                            self.buf.push(next);
                        }
                        None => self.buf.push('\\'),
                    }
                    self.pos += 2;
                }
                '$' if self.peek(1) == Some('(') => self.substitution(),
                '`' => self.backtick(),
                _ => {
                    self.buf.push(c);
                    self.pos += 1;
                }
            }
        }
    }

    /// `$( ... )` with nesting; `$(( ... ))` is arithmetic and only marks the word dynamic
    fn substitution(&mut self) {
        let arithmetic = self.peek(2) == Some('(');
        let start = self.pos + 2;
        let mut depth = 1usize;
        let mut idx = start;
        let mut in_single = false;
        let mut in_double = false;

        while idx < self.chars.len() {
            let c = self.chars[idx];
            if in_single {
                in_single = c != '\'';
            } else if c == '\\' {
                idx += 1;
            } else if in_double {
                in_double = c != '"';
            } else {
                match c {
                    '\'' => in_single = true,
                    '"' => in_double = true,
                    '(' => depth += 1,
                    ')' => {
                        depth -= 1;
                        if depth == 0 {
                            break;
                        }
                    }
                    _ => {}
                }
            }
            idx += 1;
        }

        let end = idx.min(self.chars.len());
        if !arithmetic {
            let inner: String = self.chars[start..end].iter().collect();
            self.substitutions.push(inner);
        }

        self.in_word = true;
        self.dynamic = true;
        self.pos = end + 1;
    }

    fn backtick(&mut self) {
        let start = self.pos + 1;
        let mut idx = start;

        while idx < self.chars.len() && self.chars[idx] != '`' {
            if self.chars[idx] == '\\' {
                idx += 1;
            }
            idx += 1;
        }

        let end = idx.min(self.chars.len());
        let inner: String = self.chars[start..end].iter().collect();
        self.substitutions.push(inner);

        self.in_word = true;
        self.dynamic = true;
        self.pos = end + 1;
    }

    fn skip_comment(&mut self) {
        while let Some(c) = self.peek(0) {
            if c == '\n' {
                return;
            }
            self.pos += 1;
        }
    }

    fn redirect(&mut self, c: char) {
        // A bare descriptor number in front of the operator (`2>`) is not a word
        let descriptor = !self.quoted && !self.buf.is_empty() && self.buf.chars().all(|d| d.is_ascii_digit());
        if self.in_word && descriptor {
            self.buf.clear();
            self.in_word = false;
        } else {
            self.flush();
        }

        if c == '<' && self.peek(1) == Some('<') {
            if self.peek(2) == Some('<') {
                self.pos += 3;
                self.tokens.push(Token::HereString);
            } else {
                let strip_tabs = self.peek(2) == Some('-');
                self.pos += if strip_tabs { 3 } else { 2 };
                self.expect_delimiter = Some(strip_tabs);
            }
            return;
        }

        self.pos += 1;
        if matches!(self.peek(0), Some('>') | Some('|')) || (c == '<' && self.peek(0) == Some('>')) {
            self.pos += 1;
        }

        if self.peek(0) == Some('&') {
            self.pos += 1;
            while matches!(self.peek(0), Some(d) if d.is_ascii_digit() || d == '-') {
                self.pos += 1;
            }
            self.tokens.push(Token::Duplicate);
        } else {
            self.tokens.push(Token::Redirect);
        }
    }

    /// Skip here-document bodies queued on the line that just ended
    fn skip_heredoc_bodies(&mut self) {
        let pending = std::mem::take(&mut self.pending_heredocs);

        for (delimiter, strip_tabs) in pending {
            loop {
                if self.pos >= self.chars.len() {
                    return;
                }

                let line_end = self.chars[self.pos..]
                    .iter()
                    .position(|&c| c == '\n')
                    .map(|off| self.pos + off)
                    .unwrap_or(self.chars.len());
                let line: String = self.chars[self.pos..line_end].iter().collect();
                self.pos = (line_end + 1).min(self.chars.len());

                let candidate = if strip_tabs { line.trim_start_matches('\t') } else { line.as_str() };
                if candidate.trim_end() == delimiter {
                    break;
                }
            }
        }
    }
}
