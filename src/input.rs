//! Input parsing for Claude Code hook JSON format
//!
//! Parses the JSON input from stdin that Claude Code sends to hooks. The
//! `tool_input` stays loosely typed until the tool kind is known, so a
//! malformed payload degrades to [`ToolInput::Unknown`] instead of failing.

use serde::Deserialize;
use serde_json::Value;

/// Main input structure from Claude Code hooks
#[derive(Debug, Clone, Deserialize)]
pub struct HookInput {
    /// Name of the tool being invoked (e.g., "Bash", "Read", "Grep", "Glob")
    #[serde(default)]
    pub tool_name: String,

    /// Tool-specific input parameters
    #[serde(default)]
    pub tool_input: Value,

    /// Optional session identifier
    #[serde(default)]
    pub session_id: Option<String>,

    /// Hook event name (e.g., "PreToolUse")
    #[serde(default)]
    pub hook_event_name: Option<String>,

    /// Working directory of the agent session
    #[serde(default)]
    pub cwd: Option<String>,
}

/// The closed set of tools the filter understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    ShellExecute,
    FileRead,
    ContentSearch,
    PathGlob,
    FileEdit,
    FileWrite,
}

impl ToolKind {
    /// Resolve an agent tool name or a canonical kebab-case name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Bash" | "bash" | "shell-execute" => Some(ToolKind::ShellExecute),
            "Read" | "read" | "file-read" => Some(ToolKind::FileRead),
            "Grep" | "grep" | "content-search" => Some(ToolKind::ContentSearch),
            "Glob" | "glob" | "path-glob" => Some(ToolKind::PathGlob),
            "Edit" | "MultiEdit" | "edit" | "file-edit" => Some(ToolKind::FileEdit),
            "Write" | "write" | "file-write" => Some(ToolKind::FileWrite),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ToolKind::ShellExecute => "shell-execute",
            ToolKind::FileRead => "file-read",
            ToolKind::ContentSearch => "content-search",
            ToolKind::PathGlob => "path-glob",
            ToolKind::FileEdit => "file-edit",
            ToolKind::FileWrite => "file-write",
        }
    }
}

/// The fields of a tool input that matter for path blocking
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolInput {
    /// Shell command execution
    Shell { command: String },

    /// Read, Edit or Write of a single file
    File { file_path: String },

    /// Content search; only `path` is a filesystem location
    Search { pattern: String, path: Option<String> },

    /// Path glob with an optional base directory
    Glob { pattern: String, path: Option<String> },

    /// Unknown tool or malformed input - pass through
    Unknown,
}

impl ToolInput {
    /// Pick the relevant fields for `kind` out of a raw tool input
    pub fn parse(kind: Option<ToolKind>, raw: &Value) -> Self {
        let field = |name: &str| raw.get(name).and_then(Value::as_str).map(String::from);

        let parsed = match kind {
            Some(ToolKind::ShellExecute) => field("command").map(|command| ToolInput::Shell { command }),
            Some(ToolKind::FileRead) | Some(ToolKind::FileEdit) | Some(ToolKind::FileWrite) => {
                field("file_path").map(|file_path| ToolInput::File { file_path })
            }
            Some(ToolKind::ContentSearch) => field("pattern").map(|pattern| ToolInput::Search {
                pattern,
                path: field("path"),
            }),
            Some(ToolKind::PathGlob) => field("pattern").map(|pattern| ToolInput::Glob {
                pattern,
                path: field("path"),
            }),
            None => None,
        };

        parsed.unwrap_or(ToolInput::Unknown)
    }
}

/// One tool call to evaluate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    pub tool_name: String,
    pub kind: Option<ToolKind>,
    pub input: ToolInput,
}

impl ToolInvocation {
    pub fn new(tool_name: &str, raw: &Value) -> Self {
        let kind = ToolKind::from_name(tool_name);
        Self {
            tool_name: tool_name.to_string(),
            kind,
            input: ToolInput::parse(kind, raw),
        }
    }
}

impl HookInput {
    /// Parse input from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The tool call carried by this hook input
    pub fn invocation(&self) -> ToolInvocation {
        ToolInvocation::new(&self.tool_name, &self.tool_input)
    }

    /// Get a summary of the input for logging
    pub fn summary(&self) -> String {
        match self.invocation().input {
            ToolInput::Shell { command } => {
                let truncated = if command.chars().count() > 100 {
                    format!("{}...", command.chars().take(100).collect::<String>())
                } else {
                    command
                };
                format!("{}: {}", self.tool_name, truncated)
            }
            ToolInput::File { file_path } => format!("{}: {}", self.tool_name, file_path),
            ToolInput::Search { pattern, path } | ToolInput::Glob { pattern, path } => match path {
                Some(path) => format!("{}: {} in {}", self.tool_name, pattern, path),
                None => format!("{}: {}", self.tool_name, pattern),
            },
            ToolInput::Unknown => format!("Unknown tool: {}", self.tool_name),
        }
    }
}
