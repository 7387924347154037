use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// File and directory constants
// ---------------------------------------------------------------------------

pub const CONFIG_FILE: &str = ".ai-workflow.yaml";
pub const DISCOVERY_DIR: &str = "docs/discovery";
pub const PLANS_DIR: &str = "docs/plans";

/// Directories `init` guarantees exist under the project root.
pub const WORKFLOW_DIRS: [&str; 2] = [DISCOVERY_DIR, PLANS_DIR];

/// Scripts directory relative to the framework installation prefix.
pub const FRAMEWORK_SCRIPTS_DIR: &str = "core/scripts";
/// Scripts directory for a checkout vendored into the project.
pub const LOCAL_SCRIPTS_DIR: &str = "ai-dev-workflow/core/scripts";

pub const DISCOVERY_SCRIPT: &str = "ai-discovery.sh";
pub const PLANNING_SCRIPT: &str = "ai-implementation-plan.sh";

// Marker files used for project-type detection.
pub const PUBSPEC_YAML: &str = "pubspec.yaml";
pub const PACKAGE_JSON: &str = "package.json";
pub const REQUIREMENTS_TXT: &str = "requirements.txt";
pub const PYPROJECT_TOML: &str = "pyproject.toml";
pub const GO_MOD: &str = "go.mod";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

pub fn framework_script(framework_dir: &Path, name: &str) -> PathBuf {
    framework_dir.join(FRAMEWORK_SCRIPTS_DIR).join(name)
}

pub fn local_script(root: &Path, name: &str) -> PathBuf {
    root.join(LOCAL_SCRIPTS_DIR).join(name)
}

/// Default discovery document for a story, relative to the project root.
pub fn discovery_doc(epic: &str, story: &str) -> String {
    format!("{DISCOVERY_DIR}/story-{epic}-{story}-discovery.md")
}

/// Default implementation plan for a story, relative to the project root.
pub fn plan_doc(epic: &str, story: &str) -> String {
    format!("{PLANS_DIR}/story-{epic}-{story}-plan.md")
}

/// Final path segment of `root`, used as the project name.
pub fn project_name(root: &Path) -> String {
    root.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "project".to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
