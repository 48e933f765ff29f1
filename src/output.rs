//! Decisions and hook output formatting
//!
//! `BlockDecision` is the library result; `HookOutput` is the JSON document
//! Claude Code expects back from a `PreToolUse` hook.

use serde::Serialize;

/// Result of evaluating one tool invocation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockDecision {
    pub blocked: bool,

    /// Human-readable explanation, set for blocks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Ignore pattern that matched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    /// Normalized path that matched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Path-glob pattern is unscoped across the workspace
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_broad_pattern: bool,
}

impl BlockDecision {
    /// Nothing to block
    pub fn allow() -> Self {
        Self::default()
    }

    /// Block because `path` matched the ignore rule `pattern`
    pub fn blocked_path(path: impl Into<String>, pattern: impl Into<String>) -> Self {
        let path = path.into();
        let pattern = pattern.into();
        let reason = format!(
            "'{}' matches ignore pattern '{}' (add '!{}' to the ignore file to allow it)",
            path, pattern, pattern
        );

        Self {
            blocked: true,
            reason: Some(reason),
            pattern: Some(pattern),
            path: Some(path),
            is_broad_pattern: false,
        }
    }

    /// Block an unscoped glob pattern
    pub fn broad_pattern(pattern: &str, suggestions: &[String]) -> Self {
        let mut reason = format!(
            "glob pattern '{}' is not scoped to a directory and would scan the whole workspace",
            pattern
        );
        if !suggestions.is_empty() {
            reason.push_str(&format!("; try {}", suggestions.join(", ")));
        }

        Self {
            blocked: true,
            reason: Some(reason),
            pattern: Some(pattern.to_string()),
            path: None,
            is_broad_pattern: true,
        }
    }

    pub fn is_blocked(&self) -> bool {
        self.blocked
    }

    pub fn is_allowed(&self) -> bool {
        !self.blocked
    }

    /// Reason text, empty for allows
    pub fn reason(&self) -> &str {
        self.reason.as_deref().unwrap_or("")
    }

    /// Serialize to the call-contract JSON shape
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{\"blocked\":false}".to_string())
    }
}

/// Main output structure for Claude Code hooks
#[derive(Debug, Serialize)]
pub struct HookOutput {
    /// Hook-specific output containing the permission decision
    #[serde(rename = "hookSpecificOutput", skip_serializing_if = "Option::is_none")]
    pub hook_specific_output: Option<HookSpecificOutput>,

    /// Optional system message to show the user
    #[serde(rename = "systemMessage", skip_serializing_if = "Option::is_none")]
    pub system_message: Option<String>,
}

/// Hook-specific output with permission decision
#[derive(Debug, Serialize)]
pub struct HookSpecificOutput {
    /// The hook event name (typically "PreToolUse")
    #[serde(rename = "hookEventName")]
    pub hook_event_name: String,

    /// Permission decision: "allow" or "deny"
    #[serde(rename = "permissionDecision")]
    pub permission_decision: String,

    /// Shown to the agent so it can pick another approach
    #[serde(rename = "permissionDecisionReason", skip_serializing_if = "Option::is_none")]
    pub permission_decision_reason: Option<String>,
}

impl HookOutput {
    /// Create an allow response (empty output = allow)
    pub fn allow() -> Self {
        HookOutput {
            hook_specific_output: None,
            system_message: None,
        }
    }

    /// Create a deny response tagged with the matched pattern
    pub fn deny(tag: &str, reason: &str) -> Self {
        HookOutput {
            hook_specific_output: Some(HookSpecificOutput {
                hook_event_name: "PreToolUse".to_string(),
                permission_decision: "deny".to_string(),
                permission_decision_reason: Some(reason.to_string()),
            }),
            system_message: Some(format!("[scout-block:{}] Blocked: {}", tag, reason)),
        }
    }

    /// Create a warn response (allows but shows warning)
    pub fn warn(message: &str) -> Self {
        HookOutput {
            hook_specific_output: None,
            system_message: Some(format!("[scout-block] Warning: {}", message)),
        }
    }

    /// Create output from a decision; `warn_only` downgrades blocks to warnings
    pub fn from_decision(decision: &BlockDecision, warn_only: bool) -> Self {
        if !decision.blocked {
            return HookOutput::allow();
        }

        if warn_only {
            return HookOutput::warn(decision.reason());
        }

        let tag = if decision.is_broad_pattern {
            "broad-glob"
        } else {
            decision.pattern.as_deref().unwrap_or("path")
        };
        HookOutput::deny(tag, decision.reason())
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}
