//! Shell command path checking
//!
//! Each top-level sub-command is evaluated on its own: prefixes are stripped,
//! shell executors are unwrapped and re-evaluated, tooling commands are
//! exempt, and everything else has its path arguments matched against the
//! ignore rules. One blocked sub-command blocks the whole command.

use std::path::Path;

use crate::engine::normalize::normalize_path;
use crate::output::BlockDecision;
use crate::parser::extract::extract_paths;
use crate::parser::shell::{split_commands, strip_command_prefix};
use crate::parser::wrapper::extract_executor_body;
use crate::rules::ignore::IgnoreRuleSet;
use crate::rules::tooling::is_exempt_command;

/// Nesting limit for `bash -c` / `eval` bodies; deeper bodies are allowed
pub const MAX_UNWRAP_DEPTH: usize = 3;

/// Check a shell command line
pub fn check_command(
    command: &str,
    rules: &IgnoreRuleSet,
    workspace_root: Option<&Path>,
) -> BlockDecision {
    check_at_depth(command, rules, workspace_root, 0)
}

fn check_at_depth(
    command: &str,
    rules: &IgnoreRuleSet,
    workspace_root: Option<&Path>,
    depth: usize,
) -> BlockDecision {
    for sub_command in split_commands(command) {
        let decision = check_sub_command(&sub_command, rules, workspace_root, depth);
        if decision.is_blocked() {
            return decision;
        }
    }

    BlockDecision::allow()
}

/// Check one sub-command produced by the splitter
pub fn check_sub_command(
    sub_command: &str,
    rules: &IgnoreRuleSet,
    workspace_root: Option<&Path>,
    depth: usize,
) -> BlockDecision {
    let command = strip_command_prefix(sub_command);

    // The body runs through the whole pipeline again, splitting included
    if let Some(body) = extract_executor_body(command) {
        if depth >= MAX_UNWRAP_DEPTH {
            return BlockDecision::allow();
        }
        return check_at_depth(&body, rules, workspace_root, depth + 1);
    }

    if is_exempt_command(command) {
        return BlockDecision::allow();
    }

    for raw in extract_paths(command) {
        let Some(path) = normalize_path(&raw, workspace_root) else {
            continue;
        };
        if let Some(rule) = rules.excluding_rule(&path) {
            return BlockDecision::blocked_path(path.as_string(), rule.pattern.as_str());
        }
    }

    BlockDecision::allow()
}
