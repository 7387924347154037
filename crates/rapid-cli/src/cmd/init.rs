use crate::output::print_json;
use anyhow::Context;
use rapid_core::{config, detect, paths, types::TypeSelection};
use std::path::Path;

pub fn run(root: &Path, selection: TypeSelection, ai_tool: &str, json: bool) -> anyhow::Result<()> {
    let project_type = match selection {
        TypeSelection::Auto => detect::detect(root).context("failed to detect project type")?,
        TypeSelection::Explicit(t) => t,
    };

    let report = config::initialize(root, project_type, ai_tool)
        .with_context(|| format!("failed to initialize AI workflow in {}", root.display()))?;

    if json {
        return print_json(&report);
    }

    println!("Initializing AI workflow in: {}", root.display());
    println!("  project type: {project_type}");
    println!("  ai tool:      {ai_tool}");
    println!("  wrote:   {}", paths::CONFIG_FILE);
    for dir in &report.dirs {
        if dir.created {
            println!("  created: {}/", dir.path);
        } else {
            println!("  exists:  {}/", dir.path);
        }
    }

    println!("\nAI workflow initialized.");
    println!("Edit {} to customize configuration", paths::CONFIG_FILE);
    Ok(())
}
