use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::RapidError;

// ---------------------------------------------------------------------------
// ProjectType
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectType {
    Flutter,
    React,
    Node,
    Python,
    Go,
    Generic,
}

impl ProjectType {
    pub fn all() -> &'static [ProjectType] {
        &[
            ProjectType::Flutter,
            ProjectType::React,
            ProjectType::Node,
            ProjectType::Python,
            ProjectType::Go,
            ProjectType::Generic,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ProjectType::Flutter => "flutter",
            ProjectType::React => "react",
            ProjectType::Node => "node",
            ProjectType::Python => "python",
            ProjectType::Go => "go",
            ProjectType::Generic => "generic",
        }
    }

    /// Default architecture tags recorded in the workflow config.
    /// Descriptive only; nothing in rapid branches on them.
    pub fn architecture(self) -> &'static [&'static str] {
        match self {
            ProjectType::Flutter => &["bloc", "drift"],
            ProjectType::React => &["hooks", "context"],
            ProjectType::Python => &["django", "orm"],
            ProjectType::Node | ProjectType::Go | ProjectType::Generic => &[],
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProjectType {
    type Err = RapidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProjectType::all()
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| RapidError::InvalidProjectType(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// TypeSelection
// ---------------------------------------------------------------------------

/// Value of `init --type`: detect from marker files, or use the given type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeSelection {
    #[default]
    Auto,
    Explicit(ProjectType),
}

impl fmt::Display for TypeSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeSelection::Auto => f.write_str("auto"),
            TypeSelection::Explicit(t) => t.fmt(f),
        }
    }
}

impl std::str::FromStr for TypeSelection {
    type Err = RapidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(TypeSelection::Auto),
            other => other.parse().map(TypeSelection::Explicit),
        }
    }
}
