//! Integration tests for ignore-file loading and precedence

use std::fs;
use std::path::{Path, PathBuf};

use scout_block::{check_scout_block, CheckOptions, Config, HookInput, IgnoreRuleSet, ScoutBlock};
use serde_json::json;
use tempfile::TempDir;

/// Workspace with `.claude/.ckignore` holding `contents`
fn workspace(contents: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join(".claude")).unwrap();
    fs::write(dir.path().join(".claude/.ckignore"), contents).unwrap();
    dir
}

fn options_for(root: &Path) -> CheckOptions {
    CheckOptions {
        ignore_file_path: None,
        check_broad_patterns: true,
        workspace_root: Some(root.to_path_buf()),
    }
}

fn blocked(command: &str, options: &CheckOptions) -> bool {
    check_scout_block("Bash", &json!({ "command": command }), options).is_blocked()
}

#[test]
fn test_file_rules_added_to_defaults() {
    let ws = workspace("coverage\n# generated docs\ndocs/api\n");
    let options = options_for(ws.path());

    assert!(blocked("ls coverage", &options));
    assert!(blocked("cat docs/api/index.html", &options));
    assert!(blocked("ls node_modules", &options));
    assert!(!blocked("cat docs/guide.md", &options));
}

#[test]
fn test_negation_reincludes_default() {
    let ws = workspace("!build\n");
    let options = options_for(ws.path());

    assert!(!blocked("ls build", &options));
    assert!(!blocked("cat build/output.txt", &options));
    assert!(blocked("ls dist", &options));
}

#[test]
fn test_negation_inside_excluded_parent_has_no_effect() {
    let ws = workspace("!dist/public\n");
    let options = options_for(ws.path());

    assert!(blocked("cat dist/app.js", &options));
    assert!(blocked("cat dist/public/index.html", &options));
}

#[test]
fn test_last_match_wins_in_file_order() {
    let ws = workspace("!dist\ndist\n");
    assert!(blocked("ls dist", &options_for(ws.path())));

    let ws = workspace("tmp\n!tmp\n");
    assert!(!blocked("ls tmp", &options_for(ws.path())));
}

#[test]
fn test_anchored_and_wildcard_rules() {
    let ws = workspace("/out\n*.log\n");
    let options = options_for(ws.path());

    assert!(blocked("ls out", &options));
    assert!(!blocked("ls src/out", &options));
    assert!(blocked("tail -f logs/server.log", &options));
    assert!(!blocked("tail -f logs/server.txt", &options));
}

#[test]
fn test_absolute_paths_matched_relative_to_root() {
    let ws = workspace("/out\n");
    let options = options_for(ws.path());
    let absolute = ws.path().join("out/report.txt");

    assert!(blocked(&format!("cat {}", absolute.display()), &options));
}

#[test]
fn test_explicit_ignore_file_path() {
    let dir = TempDir::new().unwrap();
    let ignore = dir.path().join("custom.ignore");
    fs::write(&ignore, "fixtures\n").unwrap();

    let options = CheckOptions {
        ignore_file_path: Some(ignore),
        ..CheckOptions::default()
    };
    assert!(blocked("ls fixtures", &options));
    assert!(blocked("ls node_modules", &options));
}

#[test]
fn test_missing_ignore_file_uses_defaults() {
    let options = CheckOptions {
        ignore_file_path: Some(PathBuf::from("/nonexistent/scout-block/missing.ckignore")),
        ..CheckOptions::default()
    };
    assert!(blocked("ls node_modules", &options));
    assert!(!blocked("ls coverage", &options));

    let set = IgnoreRuleSet::load(Path::new("/nonexistent/scout-block/missing.ckignore"));
    assert_eq!(set.rules().len(), IgnoreRuleSet::defaults().rules().len());
}

#[test]
fn test_unreadable_ignore_path_is_directory() {
    let dir = TempDir::new().unwrap();
    let options = CheckOptions {
        ignore_file_path: Some(dir.path().to_path_buf()),
        ..CheckOptions::default()
    };
    assert!(blocked("ls dist", &options));
    assert!(!blocked("ls src", &options));
}

#[test]
fn test_hook_cwd_selects_workspace_ignore_file() {
    let ws = workspace("generated\n");
    let engine = ScoutBlock::new(Config::default());

    let json = json!({
        "tool_name": "Read",
        "tool_input": { "file_path": "generated/schema.ts" },
        "cwd": ws.path().to_string_lossy(),
    })
    .to_string();
    let input = HookInput::from_json(&json).unwrap();

    assert!(engine.check(&input).is_blocked());
}
