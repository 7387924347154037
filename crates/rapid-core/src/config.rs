use crate::error::Result;
use crate::paths;
use crate::types::ProjectType;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_AI_TOOL: &str = "copilot";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 120;
pub const DEFAULT_BRANCH_PATTERN: &str = "story/{epic}-{story}-{slug}";
pub const OUTPUT_PATH_TEMPLATES: [&str; 2] = [
    "docs/discovery/{epic}-{story}-discovery.md",
    "docs/plans/{epic}-{story}-plan.md",
];

// ---------------------------------------------------------------------------
// ProjectConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(rename = "type")]
    pub project_type: ProjectType,
    pub name: String,
    #[serde(default)]
    pub architecture: Vec<String>,
}

// ---------------------------------------------------------------------------
// WorkflowsConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowsConfig {
    pub story_analysis: StoryAnalysisConfig,
}

/// Written for the external scripts to read. rapid does not enforce the
/// timeout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryAnalysisConfig {
    pub enabled: bool,
    #[serde(alias = "timeout")]
    pub timeout_seconds: u64,
    #[serde(alias = "outputs")]
    pub output_path_templates: Vec<String>,
}

impl Default for StoryAnalysisConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            output_path_templates: OUTPUT_PATH_TEMPLATES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// IntegrationsConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrationsConfig {
    pub vscode: VscodeConfig,
    pub git: GitConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VscodeConfig {
    pub enabled: bool,
    pub auto_open_files: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GitConfig {
    pub auto_branch: bool,
    pub branch_pattern: String,
}

impl Default for IntegrationsConfig {
    fn default() -> Self {
        Self {
            vscode: VscodeConfig {
                enabled: true,
                auto_open_files: true,
            },
            git: GitConfig {
                auto_branch: true,
                branch_pattern: DEFAULT_BRANCH_PATTERN.to_string(),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// WorkflowConfig
// ---------------------------------------------------------------------------

/// Contents of `.ai-workflow.yaml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowConfig {
    pub project: ProjectConfig,
    pub ai_tools: Vec<String>,
    pub workflows: WorkflowsConfig,
    pub integrations: IntegrationsConfig,
}

impl WorkflowConfig {
    /// Build the config for a project. Depends only on the arguments.
    pub fn synthesize(project_type: ProjectType, ai_tool: &str, root: &Path) -> Self {
        Self {
            project: ProjectConfig {
                project_type,
                name: paths::project_name(root),
                architecture: project_type
                    .architecture()
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            },
            ai_tools: vec![ai_tool.to_string()],
            workflows: WorkflowsConfig {
                story_analysis: StoryAnalysisConfig::default(),
            },
            integrations: IntegrationsConfig::default(),
        }
    }

    #[cfg(test)]
    fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        let data = std::fs::read_to_string(&path)?;
        let cfg: WorkflowConfig = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    /// Overwrite `.ai-workflow.yaml` with this config.
    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }
}

// ---------------------------------------------------------------------------
// init
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct DirStatus {
    pub path: String,
    pub created: bool,
}

/// What `initialize` wrote.
#[derive(Debug, Clone, Serialize)]
pub struct InitReport {
    pub config_path: PathBuf,
    pub config: WorkflowConfig,
    pub dirs: Vec<DirStatus>,
}

/// Write `.ai-workflow.yaml` for `project_type` and make sure the workflow
/// document directories exist. Existing directory contents are untouched.
pub fn initialize(root: &Path, project_type: ProjectType, ai_tool: &str) -> Result<InitReport> {
    let config = WorkflowConfig::synthesize(project_type, ai_tool, root);
    config.save(root)?;

    let mut dirs = Vec::with_capacity(paths::WORKFLOW_DIRS.len());
    for dir in paths::WORKFLOW_DIRS {
        let created = crate::io::ensure_dir(&root.join(dir))?;
        dirs.push(DirStatus {
            path: dir.to_string(),
            created,
        });
    }

    Ok(InitReport {
        config_path: paths::config_path(root),
        config,
        dirs,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
