//! scout-block - Keeps Claude Code out of build output and dependency directories
//!
//! A `PreToolUse` hook that blocks tool calls touching ignored directories.
//!
//! # Usage
//!
//! ```bash
//! # As a Claude Code hook (reads JSON from stdin, writes JSON to stdout)
//! echo '{"tool_name":"Bash","tool_input":{"command":"ls node_modules"}}' | scout-block
//!
//! # Custom ignore file
//! scout-block --ignore-file .claude/.ckignore
//!
//! # Dry-run mode (warn instead of block)
//! scout-block --dry-run
//! ```

use std::env;
use std::io::{self, BufRead, Write};

use scout_block::{
    audit::AuditLogger, config::Config, engine::ScoutBlock, input::HookInput, output::HookOutput,
};

/// Print version information
fn print_version() {
    println!("scout-block {}", env!("CARGO_PKG_VERSION"));
}

/// Print help message
fn print_help() {
    println!(
        r#"scout-block - Keeps Claude Code out of build output and dependency directories

USAGE:
    scout-block [OPTIONS]

OPTIONS:
    -h, --help               Print this help message
    -v, --version            Print version information
    -c, --config PATH        Path to config file
    -d, --dry-run            Dry-run mode (warn about what would be blocked but allow)
    -i, --ignore-file PATH   Ignore file (default: <workspace>/.claude/.ckignore)
    -w, --workspace PATH     Workspace root (default: hook cwd or CLAUDE_PROJECT_DIR)
        --no-broad-check     Allow unscoped glob patterns such as **/*.ts

ENVIRONMENT:
    SCOUT_BLOCK_DISABLED=1   Disable all checks (still logs)
    SCOUT_BLOCK_WARN_ONLY=1  Warn but don't block
    CLAUDE_PROJECT_DIR       Workspace root fallback

USAGE AS HOOK:
    Configure in ~/.claude/settings.json:
    {{
      "hooks": {{
        "PreToolUse": [{{
          "matcher": "Bash|Read|Edit|Write|Grep|Glob",
          "hooks": [{{
            "type": "command",
            "command": "~/.claude/scout-block/scout-block",
            "timeout": 5000
          }}]
        }}]
      }}
    }}
"#
    );
}

/// Parse command line arguments
struct Args {
    help: bool,
    version: bool,
    dry_run: bool,
    no_broad_check: bool,
    config_path: Option<String>,
    ignore_file: Option<String>,
    workspace: Option<String>,
}

impl Args {
    fn parse() -> Self {
        let args: Vec<String> = env::args().collect();
        let mut result = Args {
            help: false,
            version: false,
            dry_run: false,
            no_broad_check: false,
            config_path: None,
            ignore_file: None,
            workspace: None,
        };

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "-h" | "--help" => result.help = true,
                "-v" | "--version" => result.version = true,
                "-d" | "--dry-run" => result.dry_run = true,
                "--no-broad-check" => result.no_broad_check = true,
                "-c" | "--config" => {
                    if i + 1 < args.len() {
                        i += 1;
                        result.config_path = Some(args[i].clone());
                    }
                }
                "-i" | "--ignore-file" => {
                    if i + 1 < args.len() {
                        i += 1;
                        result.ignore_file = Some(args[i].clone());
                    }
                }
                "-w" | "--workspace" => {
                    if i + 1 < args.len() {
                        i += 1;
                        result.workspace = Some(args[i].clone());
                    }
                }
                arg if arg.starts_with("--config=") => {
                    result.config_path = Some(arg.trim_start_matches("--config=").to_string());
                }
                arg if arg.starts_with("--ignore-file=") => {
                    result.ignore_file = Some(arg.trim_start_matches("--ignore-file=").to_string());
                }
                arg if arg.starts_with("--workspace=") => {
                    result.workspace = Some(arg.trim_start_matches("--workspace=").to_string());
                }
                _ => {}
            }
            i += 1;
        }

        result
    }
}

fn main() {
    let args = Args::parse();

    // Handle help and version
    if args.help {
        print_help();
        return;
    }

    if args.version {
        print_version();
        return;
    }

    // Load configuration
    let mut config = if let Some(ref path) = args.config_path {
        Config::load_from(std::path::Path::new(path)).unwrap_or_else(|e| {
            eprintln!("Warning: Failed to load config from {}: {}", path, e);
            Config::default()
        })
    } else {
        Config::load()
    };

    // Command line overrides
    if args.ignore_file.is_some() {
        config.scout.ignore_file = args.ignore_file;
    }
    if args.workspace.is_some() {
        config.scout.workspace_root = args.workspace;
    }
    if args.no_broad_check {
        config.scout.check_broad_patterns = false;
    }

    // Create audit logger
    let audit_path = if config.general.audit_log {
        config.audit_path()
    } else {
        None
    };
    let mut logger = AuditLogger::new(audit_path.as_deref());

    let engine = ScoutBlock::new(config);

    // Read JSON from stdin
    let stdin = io::stdin();
    let mut input_json = String::new();

    for line in stdin.lock().lines() {
        match line {
            Ok(line) => input_json.push_str(&line),
            Err(_) => break,
        }
    }

    // Handle empty input
    if input_json.trim().is_empty() {
        // No input = nothing to check, allow
        println!("{}", HookOutput::allow().to_json());
        return;
    }

    // Parse input; a hook we cannot read must never stop the agent
    let input = match HookInput::from_json(&input_json) {
        Ok(input) => input,
        Err(e) => {
            eprintln!("Warning: Failed to parse hook input (allowing): {}", e);
            println!("{}", HookOutput::allow().to_json());
            return;
        }
    };

    let disabled = engine.is_disabled();
    let warn_only = args.dry_run || engine.is_warn_only();

    let decision = engine.check(&input);

    // Log the decision
    if let Err(e) = logger.log_decision(&input, &decision, disabled, warn_only) {
        eprintln!("Warning: Failed to write audit log: {}", e);
    }

    // Generate output
    let output = HookOutput::from_decision(&decision, warn_only);

    // Write to stdout
    let json = output.to_json();
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let _ = writeln!(handle, "{}", json);
    let _ = handle.flush();
}
