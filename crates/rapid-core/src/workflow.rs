use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

use crate::error::{RapidError, Result};
use crate::paths;
use crate::scripts::{ProcessRunner, ScriptLocator, ScriptRunner};

// ---------------------------------------------------------------------------
// StoryRef
// ---------------------------------------------------------------------------

/// Identifies a story. Epic and story are opaque tokens; nothing is validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoryRef {
    pub epic: String,
    pub story: String,
    pub title: String,
}

impl StoryRef {
    pub fn new(epic: impl Into<String>, story: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            epic: epic.into(),
            story: story.into(),
            title: title.into(),
        }
    }

    pub fn discovery_doc(&self) -> String {
        paths::discovery_doc(&self.epic, &self.story)
    }

    pub fn plan_doc(&self) -> String {
        paths::plan_doc(&self.epic, &self.story)
    }
}

impl fmt::Display for StoryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.epic, self.story)
    }
}

// ---------------------------------------------------------------------------
// Step
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Discovery,
    Planning,
}

impl Step {
    pub fn as_str(self) -> &'static str {
        match self {
            Step::Discovery => "discovery",
            Step::Planning => "planning",
        }
    }

    pub fn script(self) -> &'static str {
        match self {
            Step::Discovery => paths::DISCOVERY_SCRIPT,
            Step::Planning => paths::PLANNING_SCRIPT,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A script invocation that completed successfully.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invocation {
    pub step: Step,
    pub script: PathBuf,
    pub args: Vec<String>,
}

// ---------------------------------------------------------------------------
// Workflow
// ---------------------------------------------------------------------------

pub struct Workflow<R = ProcessRunner> {
    locator: ScriptLocator,
    runner: R,
}

impl Workflow<ProcessRunner> {
    pub fn with_process_runner(locator: ScriptLocator) -> Self {
        Self::new(locator, ProcessRunner)
    }
}

impl<R: ScriptRunner> Workflow<R> {
    pub fn new(locator: ScriptLocator, runner: R) -> Self {
        Self { locator, runner }
    }

    #[cfg(test)]
    fn runner(&self) -> &R {
        &self.runner
    }

    /// Run the discovery script: `(epic, story, title, output)`.
    pub fn analyze(&mut self, story: &StoryRef, output: Option<&str>) -> Result<Invocation> {
        let output = output.map_or_else(|| story.discovery_doc(), str::to_string);
        self.run_step(
            Step::Discovery,
            vec![story.epic.clone(), story.story.clone(), story.title.clone(), output],
        )
    }

    /// Run the planning script: `(epic, story, title, discovery, output)`.
    pub fn plan(
        &mut self,
        story: &StoryRef,
        discovery: Option<&str>,
        output: Option<&str>,
    ) -> Result<Invocation> {
        let discovery = discovery.map_or_else(|| story.discovery_doc(), str::to_string);
        let output = output.map_or_else(|| story.plan_doc(), str::to_string);
        self.run_step(
            Step::Planning,
            vec![
                story.epic.clone(),
                story.story.clone(),
                story.title.clone(),
                discovery,
                output,
            ],
        )
    }

    /// Discovery followed by planning, both with default paths. Planning is
    /// never started if discovery fails. `on_step` is called before each step.
    pub fn setup(
        &mut self,
        story: &StoryRef,
        mut on_step: impl FnMut(Step),
    ) -> Result<Vec<Invocation>> {
        on_step(Step::Discovery);
        let discovery = self.analyze(story, None)?;
        on_step(Step::Planning);
        let planning = self.plan(story, None, None)?;
        Ok(vec![discovery, planning])
    }

    fn run_step(&mut self, step: Step, args: Vec<String>) -> Result<Invocation> {
        let wrap = |source: RapidError| RapidError::StepFailed {
            step,
            source: Box::new(source),
        };
        let script = self.locator.resolve(step.script()).map_err(wrap)?;
        self.runner
            .run(&script, &args, self.locator.root())
            .map_err(wrap)?;
        Ok(Invocation { step, script, args })
    }
}
