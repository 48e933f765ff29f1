//! Integration tests for file, search and glob path checks

use scout_block::{check_scout_block, BlockDecision, CheckOptions, Config, HookInput, ScoutBlock};
use serde_json::json;

fn engine() -> ScoutBlock {
    let mut config = Config::default();
    config.scout.ignore_file = Some("/nonexistent/scout-block/file.ckignore".to_string());
    ScoutBlock::new(config)
}

fn check_tool(tool: &str, tool_input: serde_json::Value) -> BlockDecision {
    let json = json!({ "tool_name": tool, "tool_input": tool_input }).to_string();
    let input = HookInput::from_json(&json).unwrap();
    engine().check(&input)
}

fn check_read(file_path: &str) -> bool {
    check_tool("Read", json!({ "file_path": file_path })).is_allowed()
}

fn check_write(file_path: &str) -> bool {
    check_tool("Write", json!({ "file_path": file_path, "content": "test" })).is_allowed()
}

fn check_edit(file_path: &str) -> bool {
    check_tool(
        "Edit",
        json!({ "file_path": file_path, "old_string": "a", "new_string": "b" }),
    )
    .is_allowed()
}

fn check_glob(pattern: &str) -> BlockDecision {
    check_tool("Glob", json!({ "pattern": pattern }))
}

// ============================================================================
// Read / Edit / Write
// ============================================================================

#[test]
fn test_read_excluded_paths_blocked() {
    assert!(!check_read("node_modules/react/package.json"));
    assert!(!check_read("dist/index.html"));
    assert!(!check_read("./build/app.js"));
    assert!(!check_read("packages/api/__pycache__/x.pyc"));
    assert!(!check_read(".git/config"));
    assert!(!check_read(".turbo/cache/abc"));
}

#[test]
fn test_read_normal_paths_allowed() {
    assert!(check_read("src/index.ts"));
    assert!(check_read("README.md"));
    assert!(check_read(".gitignore"));
    assert!(check_read("docs/build.md"));
    assert!(check_read("src/distance.rs"));
}

#[test]
fn test_write_and_edit_checked_like_read() {
    assert!(!check_write("dist/out.js"));
    assert!(!check_edit("node_modules/lib/index.js"));
    assert!(check_write("src/new.ts"));
    assert!(check_edit("src/main.rs"));
}

#[test]
fn test_absolute_paths_inside_workspace() {
    let json = r#"{"tool_name":"Read","tool_input":{"file_path":"/home/dev/app/node_modules/x.js"},"cwd":"/home/dev/app"}"#;
    let input = HookInput::from_json(json).unwrap();
    let decision = engine().check(&input);
    assert!(decision.is_blocked());
    assert_eq!(decision.path.as_deref(), Some("node_modules/x.js"));

    let json = r#"{"tool_name":"Read","tool_input":{"file_path":"/home/dev/app/src/x.js"},"cwd":"/home/dev/app"}"#;
    let input = HookInput::from_json(json).unwrap();
    assert!(engine().check(&input).is_allowed());
}

#[test]
fn test_windows_style_paths() {
    assert!(!check_read(r"node_modules\react\index.js"));
    assert!(!check_read(r"C:\work\app\dist\main.js"));
}

// ============================================================================
// Grep
// ============================================================================

#[test]
fn test_grep_path_checked() {
    assert!(check_tool("Grep", json!({"pattern": "useState", "path": "node_modules"})).is_blocked());
    assert!(check_tool("Grep", json!({"pattern": "TODO", "path": "src/"})).is_allowed());
}

#[test]
fn test_grep_pattern_never_a_path() {
    assert!(check_tool("Grep", json!({"pattern": "node_modules"})).is_allowed());
    assert!(check_tool("Grep", json!({"pattern": "dist/", "path": "src"})).is_allowed());
}

// ============================================================================
// Glob
// ============================================================================

#[test]
fn test_broad_glob_blocked() {
    let decision = check_glob("**/*.ts");
    assert!(decision.is_blocked());
    assert!(decision.is_broad_pattern);
    assert!(decision.reason().contains("src/**/*.ts"));

    assert!(check_glob("**/*").is_broad_pattern);
    assert!(check_glob("**/package.json").is_broad_pattern);
}

#[test]
fn test_scoped_glob_allowed() {
    assert!(check_glob("src/**/*.ts").is_allowed());
    assert!(check_glob("*.md").is_allowed());
    assert!(check_glob("packages/*/src/**/*.tsx").is_allowed());
    assert!(check_tool("Glob", json!({"pattern": "**/*.ts", "path": "src"})).is_allowed());
}

#[test]
fn test_glob_into_excluded_dir_blocked() {
    let decision = check_glob("node_modules/**/*.d.ts");
    assert!(decision.is_blocked());
    assert!(!decision.is_broad_pattern);

    assert!(check_glob("dist/*.js").is_blocked());
    assert!(check_tool("Glob", json!({"pattern": "*.js", "path": "build"})).is_blocked());
}

#[test]
fn test_broad_check_disabled() {
    let options = CheckOptions {
        ignore_file_path: Some("/nonexistent/scout-block/file.ckignore".into()),
        check_broad_patterns: false,
        workspace_root: None,
    };
    assert!(check_scout_block("path-glob", &json!({"pattern": "**/*.ts"}), &options).is_allowed());
    assert!(check_scout_block("path-glob", &json!({"pattern": "dist/**"}), &options).is_blocked());
}

// ============================================================================
// Fail-open
// ============================================================================

#[test]
fn test_malformed_inputs_allowed() {
    assert!(check_tool("Read", json!({})).is_allowed());
    assert!(check_tool("Read", json!({"file_path": 42})).is_allowed());
    assert!(check_tool("Read", json!(null)).is_allowed());
    assert!(check_tool("Glob", json!({"path": "dist"})).is_allowed());
    assert!(check_tool("Read", json!({"file_path": ""})).is_allowed());
}

#[test]
fn test_unknown_tools_allowed() {
    assert!(check_tool("WebFetch", json!({"url": "https://example.com/dist"})).is_allowed());
    assert!(check_tool("Task", json!({"prompt": "look in node_modules"})).is_allowed());
    assert!(check_tool("", json!({"file_path": "dist/a.js"})).is_allowed());
}

#[test]
fn test_canonical_tool_names() {
    let options = CheckOptions {
        ignore_file_path: Some("/nonexistent/scout-block/file.ckignore".into()),
        ..CheckOptions::default()
    };
    assert!(check_scout_block("file-read", &json!({"file_path": "dist/a.js"}), &options).is_blocked());
    assert!(check_scout_block("file-edit", &json!({"file_path": "src/a.js"}), &options).is_allowed());
    assert!(check_scout_block("content-search", &json!({"pattern": "x", "path": "build"}), &options).is_blocked());
}
