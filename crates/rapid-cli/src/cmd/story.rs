use crate::output::print_json;
use rapid_core::scripts::ScriptLocator;
use rapid_core::workflow::{Step, StoryRef, Workflow};
use std::path::Path;

fn workflow(root: &Path) -> Workflow {
    Workflow::with_process_runner(ScriptLocator::from_env(root))
}

pub fn analyze(
    root: &Path,
    epic: String,
    story: String,
    title: String,
    output: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let story = StoryRef::new(epic, story, title);
    if !json {
        println!("Analyzing Story {story}: {}", story.title);
    }

    let invocation = workflow(root).analyze(&story, output)?;

    if json {
        return print_json(&invocation);
    }
    Ok(())
}

pub fn plan(
    root: &Path,
    epic: String,
    story: String,
    title: String,
    discovery: Option<&str>,
    output: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let story = StoryRef::new(epic, story, title);
    if !json {
        println!("Creating implementation plan for Story {story}");
    }

    let invocation = workflow(root).plan(&story, discovery, output)?;

    if json {
        return print_json(&invocation);
    }
    Ok(())
}

pub fn setup(
    root: &Path,
    epic: String,
    story: String,
    title: String,
    json: bool,
) -> anyhow::Result<()> {
    let story = StoryRef::new(epic, story, title);
    if !json {
        println!("Setting up Story {story}: {}", story.title);
    }

    let invocations = workflow(root).setup(&story, |step| {
        if json {
            return;
        }
        match step {
            Step::Discovery => println!("Step 1: Running discovery analysis..."),
            Step::Planning => println!("Step 2: Generating implementation plan..."),
        }
    })?;

    if json {
        return print_json(&invocations);
    }
    println!("Complete setup finished.");
    Ok(())
}
