//! Integration tests for shell command path checks

use scout_block::{Config, HookInput, ScoutBlock};

fn engine() -> ScoutBlock {
    let mut config = Config::default();
    config.scout.ignore_file = Some("/nonexistent/scout-block/bash.ckignore".to_string());
    ScoutBlock::new(config)
}

fn check_bash(command: &str) -> bool {
    let json = format!(
        r#"{{"tool_name":"Bash","tool_input":{{"command":"{}"}}}}"#,
        command
            .replace('\\', "\\\\")
            .replace('"', "\\\"")
            .replace('\n', "\\n")
            .replace('\t', "\\t")
    );
    let input = HookInput::from_json(&json).unwrap();
    let decision = engine().check(&input);
    decision.is_allowed()
}

// ============================================================================
// Direct access to excluded directories
// ============================================================================

#[test]
fn test_listing_excluded_dirs_blocked() {
    assert!(!check_bash("ls node_modules"));
    assert!(!check_bash("ls -la node_modules/"));
    assert!(!check_bash("ls ./dist"));
    assert!(!check_bash("tree build"));
    assert!(!check_bash("du -sh .venv"));
}

#[test]
fn test_reading_excluded_files_blocked() {
    assert!(!check_bash("cat dist/bundle.js"));
    assert!(!check_bash("head -50 node_modules/react/index.js"));
    assert!(!check_bash("less __pycache__/app.cpython-312.pyc"));
    assert!(!check_bash("cat packages/web/.next/build-manifest.json"));
    assert!(!check_bash("wc -l ../../node_modules/lodash/lodash.js"));
    assert!(!check_bash(r#"cat "node_modules/some pkg/index.js""#));
    assert!(!check_bash("less 'dist/release notes.txt'"));
    assert!(check_bash(r#"cat "docs/getting started.md""#));
}

#[test]
fn test_searching_excluded_dirs_blocked() {
    assert!(!check_bash("find node_modules -name '*.d.ts'"));
    assert!(!check_bash("grep -r useState node_modules/react"));
    assert!(!check_bash("rg TODO dist"));
    assert!(!check_bash("grep -E 'error|warn' dist/app.log"));
    assert!(!check_bash("grep -E error node_modules/x.js"));
    assert!(!check_bash("grep -T -n TODO build/notes.txt"));
    assert!(!check_bash("rg -E utf-16 TODO dist"));
    assert!(check_bash("grep -E 'dist|build' src/config.ts"));
}

#[test]
fn test_ordinary_commands_allowed() {
    assert!(check_bash("ls -la"));
    assert!(check_bash("cat src/index.ts"));
    assert!(check_bash("git status"));
    assert!(check_bash("git checkout build"));
    assert!(check_bash("git commit -m dist"));
    assert!(check_bash("pwd"));
    assert!(check_bash("echo hello"));
    assert!(check_bash("cat builder.py"));
    assert!(check_bash("ls src/build-tools"));
}

// ============================================================================
// Tooling exemptions
// ============================================================================

#[test]
fn test_build_commands_allowed() {
    assert!(check_bash("npm run build"));
    assert!(check_bash("npm install"));
    assert!(check_bash("pnpm build"));
    assert!(check_bash("yarn test"));
    assert!(check_bash("cargo build --release"));
    assert!(check_bash("go build ./..."));
    assert!(check_bash("make dist"));
    assert!(check_bash("tsc --outDir dist"));
    assert!(check_bash("docker build -t app ."));
    assert!(check_bash("./gradlew build"));
}

#[test]
fn test_build_command_with_trailing_filter_allowed() {
    assert!(check_bash("npm run build 2>&1 | tail -15"));
    assert!(check_bash("npx vite build | head -20"));
}

#[test]
fn test_venv_commands_allowed() {
    assert!(check_bash("uv venv"));
    assert!(check_bash("python3 -m venv .venv"));
    assert!(check_bash("python -m venv venv"));
    assert!(check_bash("virtualenv .venv"));
    assert!(check_bash(".venv/bin/python manage.py migrate"));
    assert!(check_bash("source .venv/bin/activate"));
    assert!(check_bash("backend/.venv/bin/pytest -x"));
}

#[test]
fn test_non_venv_interpreter_use_checked() {
    assert!(check_bash("python3 --version"));
    assert!(!check_bash("python3 .venv/lib/python3.12/site-packages/x.py"));
    assert!(!check_bash("ls .venv/lib"));
}

// ============================================================================
// Compound commands
// ============================================================================

#[test]
fn test_compound_blocked_if_any_part_blocked() {
    assert!(!check_bash("npm run build && cat dist/bundle.js"));
    assert!(!check_bash("cat dist/bundle.js && npm run build"));
    assert!(!check_bash("cd src; ls node_modules"));
    assert!(!check_bash("test -d build || ls build"));
}

#[test]
fn test_compound_allowed_if_all_parts_allowed() {
    assert!(check_bash("echo hi && npm run build"));
    assert!(check_bash("npm install && npm run build && npm test"));
    assert!(check_bash("cd src && ls"));
}

#[test]
fn test_compound_matches_independent_evaluation() {
    let parts = [
        "ls node_modules",
        "npm run build",
        "echo hi",
        "cat dist/a.js",
        "uv venv",
        "grep -r dist src/",
    ];

    for a in parts {
        for b in parts {
            for op in [" && ", " || ", "; "] {
                let combined = format!("{}{}{}", a, op, b);
                let expected = check_bash(a) && check_bash(b);
                assert_eq!(check_bash(&combined), expected, "{}", combined);
            }
        }
    }
}

#[test]
fn test_pipes_do_not_split_commands() {
    assert!(!check_bash("cat dist/file.js | head -20"));
    assert!(!check_bash("ls | grep x > build/out.txt"));
    assert!(check_bash("ls src | grep dist"));
}

// ============================================================================
// Pattern and text arguments
// ============================================================================

#[test]
fn test_search_patterns_not_paths() {
    assert!(check_bash(r#"grep -r "build" src/"#));
    assert!(check_bash("grep -rn node_modules src/"));
    assert!(check_bash("rg dist --type ts"));
    assert!(check_bash(r#"grep -e build -e dist README.md"#));
}

#[test]
fn test_text_arguments_not_paths() {
    assert!(check_bash(r#"echo "deploying to build server""#));
    assert!(check_bash("echo dist"));
    assert!(check_bash(r#"printf "%s\n" node_modules"#));
    assert!(check_bash(r#"git commit -m "clean up dist handling""#));
    assert!(check_bash("sed -i 's/build/dist/g' config.js"));
    assert!(check_bash("awk '/dist/ {print $1}' files.txt"));
}

#[test]
fn test_text_command_redirect_still_checked() {
    assert!(!check_bash("echo hi > dist/out.txt"));
    assert!(!check_bash("cat < node_modules/x/package.json"));
}

#[test]
fn test_command_substitution_checked() {
    assert!(!check_bash("echo $(ls node_modules)"));
    assert!(!check_bash("wc -l `cat dist/files.txt`"));
    assert!(check_bash("echo $(pwd)"));
}

// ============================================================================
// Prefixes and wrappers
// ============================================================================

#[test]
fn test_env_and_sudo_prefixes() {
    assert!(!check_bash("sudo ls node_modules"));
    assert!(!check_bash("DEBUG=1 cat dist/a.js"));
    assert!(!check_bash("env FOO=bar ls build"));
    assert!(check_bash("NODE_ENV=production npm run build"));
    assert!(check_bash("sudo env CI=1 npm test"));
}

#[test]
fn test_invocation_wrappers() {
    assert!(!check_bash("timeout 10 cat dist/a.js"));
    assert!(!check_bash("nice -n 5 ls node_modules"));
    assert!(check_bash("timeout 30 echo dist"));
}

#[test]
fn test_shell_executors_unwrapped() {
    assert!(!check_bash(r#"bash -c "ls node_modules""#));
    assert!(!check_bash("sh -c 'cat dist/a.js'"));
    assert!(!check_bash(r#"eval "ls build""#));
    assert!(!check_bash("sudo bash -c 'ls node_modules'"));
    assert!(check_bash(r#"bash -c "npm run build""#));
    assert!(check_bash("sh -c 'echo dist'"));
}

// ============================================================================
// Heredocs and fail-open
// ============================================================================

#[test]
fn test_heredoc_body_not_scanned() {
    assert!(check_bash("cat <<EOF\nnode_modules\ndist\nEOF"));
    assert!(!check_bash("cat > dist/notes.txt <<EOF\nhello\nEOF"));
    assert!(check_bash("cat > notes.md <<'EOF'\nRun npm ci; then ls node_modules to check\nEOF"));
    assert!(check_bash("cat > notes.md <<EOF\nbuild first && cat dist/a.js || ls build\nEOF"));
    assert!(!check_bash("cat <<'EOF'\nnode_modules; dist\nEOF\nls dist"));
}

#[test]
fn test_malformed_commands_fail_open() {
    assert!(check_bash(""));
    assert!(check_bash("   "));
    assert!(check_bash("&& ||"));
    assert!(check_bash("echo 'unterminated"));
}

#[test]
fn test_missing_command_field_allowed() {
    let input = HookInput::from_json(r#"{"tool_name":"Bash","tool_input":{}}"#).unwrap();
    assert!(engine().check(&input).is_allowed());

    let input = HookInput::from_json(r#"{"tool_name":"Bash"}"#).unwrap();
    assert!(engine().check(&input).is_allowed());
}
