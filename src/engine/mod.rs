//! Scout-block engine
//!
//! Dispatches a tool call to the shell or path checker and returns a block
//! decision. Every failure mode (unknown tool, malformed input, missing
//! ignore file) resolves to an allow.

pub mod bash;
pub mod file;
pub mod normalize;

use crate::config::{CheckOptions, Config};
use crate::input::{HookInput, ToolInput, ToolInvocation};
use crate::output::BlockDecision;
use crate::rules::ignore::IgnoreRuleSet;

use serde_json::Value;
use std::env;

/// Evaluate one tool call
///
/// `tool_name` accepts both agent names (`Bash`, `Read`, `Glob`, ...) and
/// the kebab-case kinds (`shell-execute`, `file-read`, ...).
pub fn check_scout_block(tool_name: &str, tool_input: &Value, options: &CheckOptions) -> BlockDecision {
    check_invocation(&ToolInvocation::new(tool_name, tool_input), options)
}

/// Evaluate an already parsed tool call
pub fn check_invocation(invocation: &ToolInvocation, options: &CheckOptions) -> BlockDecision {
    if invocation.input == ToolInput::Unknown {
        return BlockDecision::allow();
    }

    let rules = IgnoreRuleSet::load_cached(&options.resolved_ignore_file());
    let root = options.workspace_root.as_deref();

    match &invocation.input {
        ToolInput::Shell { command } => bash::check_command(command, &rules, root),
        ToolInput::File { file_path } => file::check_path(file_path, &rules, root),
        ToolInput::Search { path, .. } => file::check_search(path.as_deref(), &rules, root),
        ToolInput::Glob { pattern, path } => file::check_glob(
            pattern,
            path.as_deref(),
            &rules,
            root,
            options.check_broad_patterns,
        ),
        ToolInput::Unknown => BlockDecision::allow(),
    }
}

/// Hook-facing engine bound to a configuration
pub struct ScoutBlock {
    config: Config,
}

impl ScoutBlock {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Check if blocking is disabled via environment
    pub fn is_disabled(&self) -> bool {
        env::var("SCOUT_BLOCK_DISABLED").is_ok()
    }

    /// Check if warn-only mode is enabled
    pub fn is_warn_only(&self) -> bool {
        env::var("SCOUT_BLOCK_WARN_ONLY").is_ok()
    }

    /// Options for the session that sent `input`
    pub fn options_for(&self, input: &HookInput) -> CheckOptions {
        self.config.check_options(input.cwd.as_deref())
    }

    /// Main entry point: check a hook input and return a decision
    pub fn check(&self, input: &HookInput) -> BlockDecision {
        if self.is_disabled() {
            return BlockDecision::allow();
        }

        check_invocation(&input.invocation(), &self.options_for(input))
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
