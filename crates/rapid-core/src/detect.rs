//! Project-type detection from marker files in the project root.
//!
//! Markers are checked in a fixed priority order and the first match wins:
//! `pubspec.yaml`, `package.json` (react vs. node by dependencies),
//! `requirements.txt` / `pyproject.toml`, `go.mod`. Anything else is generic.

use serde::de::IgnoredAny;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{RapidError, Result};
use crate::paths;
use crate::types::ProjectType;

/// The parts of `package.json` detection looks at. Dependency values are
/// ignored; only the presence of a key matters.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageDescriptor {
    #[serde(default)]
    pub dependencies: Option<BTreeMap<String, IgnoredAny>>,
    #[serde(default)]
    pub dev_dependencies: Option<BTreeMap<String, IgnoredAny>>,
}

impl PackageDescriptor {
    /// Read and parse `package.json`. A file that does not fit the expected
    /// shape is an error, not an empty descriptor.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        serde_json::from_str(&data).map_err(|source| RapidError::PackageDescriptorParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// True if `name` appears in either dependencies or devDependencies.
    pub fn depends_on(&self, name: &str) -> bool {
        [&self.dependencies, &self.dev_dependencies]
            .into_iter()
            .flatten()
            .any(|deps| deps.contains_key(name))
    }
}

pub fn detect(root: &Path) -> Result<ProjectType> {
    let detected = detect_inner(root)?;
    tracing::debug!(root = %root.display(), project_type = %detected, "detected project type");
    Ok(detected)
}

fn detect_inner(root: &Path) -> Result<ProjectType> {
    if root.join(paths::PUBSPEC_YAML).exists() {
        return Ok(ProjectType::Flutter);
    }

    let package_json = root.join(paths::PACKAGE_JSON);
    if package_json.exists() {
        let pkg = PackageDescriptor::load(&package_json)?;
        return Ok(if pkg.depends_on("react") {
            ProjectType::React
        } else {
            ProjectType::Node
        });
    }

    if root.join(paths::REQUIREMENTS_TXT).exists() || root.join(paths::PYPROJECT_TOML).exists() {
        return Ok(ProjectType::Python);
    }

    if root.join(paths::GO_MOD).exists() {
        return Ok(ProjectType::Go);
    }

    Ok(ProjectType::Generic)
}
