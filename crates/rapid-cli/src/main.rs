mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use rapid_core::types::TypeSelection;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "rapid",
    about = "RAPID-AI: Requirements-Analysis-Planning-Implementation-Development with AI automation",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: current directory)
    #[arg(long, global = true, env = "RAPID_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize AI workflow in the current project
    Init {
        /// Project type (flutter, react, node, python, go, generic, auto)
        #[arg(short = 't', long = "type", default_value = "auto")]
        project_type: TypeSelection,

        /// Primary AI tool (copilot, claude, gpt4, ...)
        #[arg(short, long, default_value = rapid_core::config::DEFAULT_AI_TOOL)]
        ai: String,
    },

    /// Analyze a story/feature with AI
    Analyze {
        /// Epic number
        epic: String,
        /// Story number
        story: String,
        /// Story title
        title: String,

        /// Output file path
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Generate implementation plan for a story
    Plan {
        /// Epic number
        epic: String,
        /// Story number
        story: String,
        /// Story title
        title: String,

        /// Discovery document to use
        #[arg(short, long)]
        discovery: Option<String>,

        /// Output file path
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Complete story setup (analyze + plan)
    Setup {
        /// Epic number
        epic: String,
        /// Story number
        story: String,
        /// Story title
        title: String,
    },
}

fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins when set; otherwise only warnings and errors.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());
    tracing::debug!(root = %root.display(), "resolved project root");

    let result = match cli.command {
        Commands::Init { project_type, ai } => cmd::init::run(&root, project_type, &ai, cli.json),
        Commands::Analyze {
            epic,
            story,
            title,
            output,
        } => cmd::story::analyze(&root, epic, story, title, output.as_deref(), cli.json),
        Commands::Plan {
            epic,
            story,
            title,
            discovery,
            output,
        } => cmd::story::plan(
            &root,
            epic,
            story,
            title,
            discovery.as_deref(),
            output.as_deref(),
            cli.json,
        ),
        Commands::Setup { epic, story, title } => {
            cmd::story::setup(&root, epic, story, title, cli.json)
        }
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
