//! Configuration loading for scout-block
//!
//! Supports TOML configuration with embedded defaults.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Ignore file used when none is configured, relative to the workspace root
pub const DEFAULT_IGNORE_FILE: &str = ".claude/.ckignore";

/// General configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Enable audit logging
    pub audit_log: bool,

    /// Path to audit log file
    pub audit_path: Option<String>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            audit_log: true,
            audit_path: Some("~/.claude/scout-block/audit.jsonl".to_string()),
        }
    }
}

/// Path-blocking configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScoutConfig {
    /// Ignore file; relative paths resolve against the workspace root
    pub ignore_file: Option<String>,

    /// Block unscoped glob patterns
    pub check_broad_patterns: bool,

    /// Fixed workspace root; otherwise the hook's cwd or CLAUDE_PROJECT_DIR
    pub workspace_root: Option<String>,
}

impl Default for ScoutConfig {
    fn default() -> Self {
        Self {
            ignore_file: Some(DEFAULT_IGNORE_FILE.to_string()),
            check_broad_patterns: true,
            workspace_root: None,
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub scout: ScoutConfig,
}

/// Per-call evaluation options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOptions {
    /// Ignore file to load; `None` means `<workspace_root>/.claude/.ckignore`
    pub ignore_file_path: Option<PathBuf>,

    pub check_broad_patterns: bool,

    /// Absolute paths under this root are matched relative to it
    pub workspace_root: Option<PathBuf>,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            ignore_file_path: None,
            check_broad_patterns: true,
            workspace_root: None,
        }
    }
}

impl CheckOptions {
    /// The ignore file this call should read
    pub fn resolved_ignore_file(&self) -> PathBuf {
        let path = self
            .ignore_file_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_IGNORE_FILE));

        match &self.workspace_root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path,
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load() -> Self {
        // Try to load from standard locations
        let config_paths = [
            // User-specific config
            dirs::home_dir().map(|p| p.join(".claude/scout-block/config.toml")),
            // System-wide config
            Some(PathBuf::from("/etc/scout-block/config.toml")),
        ];

        for path in config_paths.into_iter().flatten() {
            if path.exists() {
                if let Ok(content) = std::fs::read_to_string(&path) {
                    match toml::from_str(&content) {
                        Ok(config) => return config,
                        Err(e) => {
                            eprintln!("Warning: Failed to parse {}: {}", path.display(), e);
                        }
                    }
                }
            }
        }

        // Return defaults
        Config::default()
    }

    /// Load from a specific path
    pub fn load_from(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Expand ~ in path strings
    pub fn expand_path(path: &str) -> PathBuf {
        if let Some(rest) = path.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest);
            }
        }
        PathBuf::from(path)
    }

    /// Get the audit log path (expanded)
    pub fn audit_path(&self) -> Option<PathBuf> {
        self.general.audit_path.as_ref().map(|p| Self::expand_path(p))
    }

    /// Evaluation options for a session running in `cwd`
    ///
    /// The workspace root is the configured one, else `cwd`, else the
    /// `CLAUDE_PROJECT_DIR` environment variable.
    pub fn check_options(&self, cwd: Option<&str>) -> CheckOptions {
        let workspace_root = self
            .scout
            .workspace_root
            .as_deref()
            .map(Self::expand_path)
            .or_else(|| cwd.filter(|c| !c.is_empty()).map(PathBuf::from))
            .or_else(|| std::env::var("CLAUDE_PROJECT_DIR").ok().map(PathBuf::from));

        CheckOptions {
            ignore_file_path: self.scout.ignore_file.as_deref().map(Self::expand_path),
            check_broad_patterns: self.scout.check_broad_patterns,
            workspace_root,
        }
    }
}

/// Embedded default configuration
pub const DEFAULT_CONFIG_TOML: &str = r#"
[general]
audit_log = true
audit_path = "~/.claude/scout-block/audit.jsonl"

[scout]
ignore_file = ".claude/.ckignore"
check_broad_patterns = true
"#;
