//! scout-block - Keeps Claude Code out of build output and dependency directories
//!
//! This library decides whether an agent tool call (shell command, file
//! read/edit/write, content search, path glob) would touch an excluded area
//! of the workspace such as `node_modules`, `dist` or `.venv`.
//!
//! # Features
//!
//! - **Compound commands**: `&&`, `||` and `;` parts are checked independently
//! - **Context-aware extraction**: `grep "build" src/` does not look at `build`
//! - **Executor unwrapping**: `bash -c "..."` and `eval '...'` bodies are re-checked
//! - **Tooling exemption**: build/install/test commands and venv setup pass
//! - **Gitignore precedence**: last match wins, negation with the usual parent limitation
//! - **Broad globs**: `**/*.ts` is rejected with scoped suggestions
//! - **Audit logging**: JSONL log of all decisions
//!
//! # Example
//!
//! ```
//! use scout_block::{check_scout_block, CheckOptions};
//! use serde_json::json;
//!
//! let options = CheckOptions::default();
//!
//! let decision = check_scout_block("Bash", &json!({"command": "ls node_modules"}), &options);
//! assert!(decision.is_blocked());
//!
//! let decision = check_scout_block("Bash", &json!({"command": "npm run build"}), &options);
//! assert!(decision.is_allowed());
//!
//! let decision = check_scout_block("Glob", &json!({"pattern": "**/*.ts"}), &options);
//! assert!(decision.is_broad_pattern);
//! ```

pub mod audit;
pub mod config;
pub mod engine;
pub mod input;
pub mod output;
pub mod parser;
pub mod rules;

// Re-exports for convenience
pub use config::{CheckOptions, Config};
pub use engine::{check_invocation, check_scout_block, ScoutBlock};
pub use input::{HookInput, ToolInput, ToolInvocation, ToolKind};
pub use output::{BlockDecision, HookOutput};
pub use rules::ignore::IgnoreRuleSet;
