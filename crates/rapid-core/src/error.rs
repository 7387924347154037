use std::path::PathBuf;
use thiserror::Error;

use crate::workflow::Step;

#[derive(Debug, Error)]
pub enum RapidError {
    #[error("script not found: {0}")]
    ScriptNotFound(String),

    #[error("failed to start {script}")]
    ScriptSpawnFailed {
        script: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{script} exited with {}", exit_description(.code))]
    ScriptFailed { script: String, code: Option<i32> },

    #[error("failed to parse {}", .path.display())]
    PackageDescriptorParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid project type '{0}': expected one of flutter, react, node, python, go, generic, auto")]
    InvalidProjectType(String),

    #[error("{step} failed")]
    StepFailed {
        step: Step,
        #[source]
        source: Box<RapidError>,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

impl RapidError {
    /// True for errors raised while starting or running an external script.
    #[cfg(test)]
    pub(crate) fn is_script_failure(&self) -> bool {
        match self {
            RapidError::ScriptSpawnFailed { .. } | RapidError::ScriptFailed { .. } => true,
            RapidError::StepFailed { source, .. } => source.is_script_failure(),
            _ => false,
        }
    }
}

fn exit_description(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, RapidError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_failed_message_includes_code() {
        let err = RapidError::ScriptFailed {
            script: "ai-discovery.sh".into(),
            code: Some(3),
        };
        assert_eq!(err.to_string(), "ai-discovery.sh exited with exit code 3");
        assert!(err.is_script_failure());
    }

    #[test]
    fn script_failed_by_signal() {
        let err = RapidError::ScriptFailed {
            script: "ai-discovery.sh".into(),
            code: None,
        };
        assert!(err.to_string().contains("terminated by signal"));
    }

    #[test]
    fn not_found_is_not_an_execution_failure() {
        let err = RapidError::ScriptNotFound("ai-discovery.sh".into());
        assert_eq!(err.to_string(), "script not found: ai-discovery.sh");
        assert!(!err.is_script_failure());
    }
}
