//! Tooling and virtual-environment command catalogue
//!
//! Build, install, test and infra commands legitimately read and write
//! dependency and output directories, so they are exempt from path blocking.
//! Only the head of a command is examined; whatever follows (arguments,
//! `2>&1 | tail -15`) does not affect the match.

use once_cell::sync::Lazy;
use regex::RegexSet;

/// Command heads recognized as build/tool invocations
pub const BUILD_COMMAND_PATTERNS: &[&str] = &[
    // JS/TS package managers
    r"(?:npm|pnpm|yarn|bun)\s+(?:run|run-script)\s+\S+",
    r"(?:npm|pnpm|yarn|bun)\s+(?:install|i|ci|add|remove|rm|uninstall|update|upgrade|build|test|t|lint|dev|start|format|typecheck|exec|audit|outdated|dedupe|prune|rebuild|pack|publish|link|dlx|x|create|init)",
    r"yarn",
    r"(?:npx|pnpx|bunx)\s+\S+",
    // Python
    r"(?:pip|pip3)\s+(?:install|uninstall|download|wheel|freeze|list|show)",
    r"python(?:3(?:\.\d+)?)?\s+-m\s+(?:pip|pytest|build|mypy|ruff|black|unittest|tox|flake8|pylint|isort|coverage)",
    r"(?:poetry|pipenv|pdm|hatch)\s+(?:install|add|remove|lock|update|build|run|sync|shell|test|publish)",
    r"uv\s+(?:pip|sync|add|remove|lock|run|build|tool|python|publish)",
    // Go, Rust, Ruby, PHP, Elixir
    r"go\s+(?:build|test|run|install|get|mod|vet|fmt|generate|work|clean)",
    r"cargo\s+(?:build|b|test|t|run|r|check|c|clippy|fmt|install|bench|doc|add|remove|update|fetch|nextest|clean|publish|tree|metadata)",
    r"(?:bundle|bundler)\s+(?:install|exec|update|add)",
    r"gem\s+(?:install|build|update)",
    r"(?:rake|rails)\s+\S+",
    r"composer\s+(?:install|update|require|remove|dump-autoload|run|run-script|test)",
    r"mix\s+(?:deps\.get|deps\.compile|compile|test|format|phx\.server|release|ecto\.\S+)",
    // Generic build systems
    r"(?:make|cmake|ninja|mvn|gradle|gradlew|bazel|ant|sbt|dotnet|meson)",
    // Compilers, bundlers, linters, test runners
    r"(?:tsc|vite|webpack|rollup|esbuild|swc|babel|parcel|next|nuxt|astro|remix|jest|vitest|mocha|ava|playwright|cypress|eslint|prettier|biome|stylelint|oxlint|pytest|tox|nox|ruff|black|isort|flake8|pylint|mypy|pyright|rspec|rubocop|phpunit|phpstan|golangci-lint|gofmt|rustc|rustfmt|gcc|g\+\+|clang|clang\+\+|javac|kotlinc|swiftc|zig)",
    // Infra CLIs and monorepo task runners
    r"(?:docker|docker-compose|podman|kubectl|helm|minikube|kind|terraform|tofu|terragrunt|pulumi|ansible|ansible-playbook|vagrant|packer|turbo|nx|lerna|rush|moon|skaffold|tilt)",
];

/// Interpreter or tool executed out of a virtual environment
pub const VENV_EXEC_PATTERNS: &[&str] = &[
    r"(?:\S*[/\\])?\.?venv[/\\](?:bin|Scripts)[/\\]\S+",
    r"(?:source|\.)\s+(?:\S*[/\\])?\.?venv[/\\](?:bin|Scripts)[/\\]activate\S*",
];

/// Virtual environment creation
pub const VENV_CREATE_PATTERNS: &[&str] = &[
    r"python(?:3(?:\.\d+)?)?(?:\.exe)?\s+-m\s+(?:venv|virtualenv)",
    r"py(?:\s+-\d+(?:\.\d+)?)?\s+-m\s+(?:venv|virtualenv)",
    r"uv\s+venv",
    r"virtualenv",
];

fn compile(patterns: &[&[&str]]) -> RegexSet {
    let anchored: Vec<String> = patterns
        .iter()
        .flat_map(|group| group.iter())
        .map(|p| format!(r"^(?:\./)?(?:{})(?:\s|$)", p))
        .collect();
    RegexSet::new(&anchored).unwrap_or_else(|_| RegexSet::empty())
}

static BUILD_COMMANDS: Lazy<RegexSet> = Lazy::new(|| compile(&[BUILD_COMMAND_PATTERNS]));

static VENV_COMMANDS: Lazy<RegexSet> =
    Lazy::new(|| compile(&[VENV_EXEC_PATTERNS, VENV_CREATE_PATTERNS]));

/// Package-manager script, compiler, linter, test runner or infra CLI
pub fn is_build_command(command: &str) -> bool {
    BUILD_COMMANDS.is_match(command.trim())
}

/// Execution from a virtual environment, or creation of one
pub fn is_venv_command(command: &str) -> bool {
    VENV_COMMANDS.is_match(command.trim())
}

/// Either predicate; such commands are never path-blocked
pub fn is_exempt_command(command: &str) -> bool {
    is_build_command(command) || is_venv_command(command)
}
