//! Resolution and invocation of the external workflow scripts.
//!
//! Scripts are looked up under the framework installation first
//! (`<framework>/core/scripts/`), then under a copy vendored into the project
//! (`<root>/ai-dev-workflow/core/scripts/`). They are executed directly from an
//! argument vector with the project root as working directory. No shell is
//! involved, so titles with spaces or quotes reach the script unchanged.
//!
//! stdio is inherited: script output streams to the terminal as it runs and
//! is never captured.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{RapidError, Result};
use crate::paths;

/// Environment variable overriding the framework installation directory.
pub const FRAMEWORK_DIR_ENV: &str = "RAPID_FRAMEWORK_DIR";

/// Where to look for workflow scripts.
#[derive(Debug, Clone)]
pub struct ScriptLocator {
    framework_dir: Option<PathBuf>,
    root: PathBuf,
}

impl ScriptLocator {
    pub fn new(framework_dir: Option<PathBuf>, root: impl Into<PathBuf>) -> Self {
        Self {
            framework_dir,
            root: root.into(),
        }
    }

    /// Locator for an installed binary: `RAPID_FRAMEWORK_DIR` if set,
    /// otherwise the prefix the running executable is installed under.
    pub fn from_env(root: impl Into<PathBuf>) -> Self {
        Self::new(framework_dir_from_env(), root)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Candidate paths for `name`, in lookup order.
    pub fn candidates(&self, name: &str) -> Vec<PathBuf> {
        let mut out = Vec::with_capacity(2);
        if let Some(dir) = &self.framework_dir {
            out.push(paths::framework_script(dir, name));
        }
        out.push(paths::local_script(&self.root, name));
        out
    }

    pub fn resolve(&self, name: &str) -> Result<PathBuf> {
        for candidate in self.candidates(name) {
            if candidate.is_file() {
                tracing::debug!(script = name, path = %candidate.display(), "resolved script");
                return Ok(candidate);
            }
        }
        Err(RapidError::ScriptNotFound(name.to_string()))
    }
}

fn framework_dir_from_env() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os(FRAMEWORK_DIR_ENV) {
        return Some(PathBuf::from(dir));
    }
    // <prefix>/bin/rapid -> <prefix>
    let exe = std::env::current_exe().ok()?;
    exe.parent()?.parent().map(Path::to_path_buf)
}

// ---------------------------------------------------------------------------
// ScriptRunner
// ---------------------------------------------------------------------------

/// Runs a resolved script to completion.
pub trait ScriptRunner {
    fn run(&mut self, script: &Path, args: &[String], cwd: &Path) -> Result<()>;
}

/// Spawns the script as a child process with inherited stdio and blocks until
/// it exits.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl ScriptRunner for ProcessRunner {
    fn run(&mut self, script: &Path, args: &[String], cwd: &Path) -> Result<()> {
        let name = script_name(script);
        tracing::info!(script = %script.display(), ?args, "running script");

        let status = Command::new(script)
            .args(args)
            .current_dir(cwd)
            .status()
            .map_err(|source| RapidError::ScriptSpawnFailed {
                script: name.clone(),
                source,
            })?;

        if !status.success() {
            return Err(RapidError::ScriptFailed {
                script: name,
                code: status.code(),
            });
        }
        Ok(())
    }
}

fn script_name(script: &Path) -> String {
    script
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| script.display().to_string())
}
