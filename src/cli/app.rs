//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::inject_cmd;
use super::output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "registrant")]
#[command(author, version, about = "Generates plugin registrants for Flutter projects")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write .flutter-plugins and regenerate platform registrants
    Inject {
        /// Project directory (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Treat the project as a module (overrides registrant.toml)
        #[arg(long)]
        module: bool,
    },

    /// List plugins the project depends on
    List {
        /// Project directory (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Print whether the project has a plugin manifest
    HasPlugins {
        /// Project directory (defaults to current directory)
        path: Option<PathBuf>,
    },
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(cli.format, cli.verbose);

    output.verbose("registrant starting");

    match cli.command {
        Commands::Inject { path, module } => inject_cmd::inject(&output, &path, module)?,
        Commands::List { path } => inject_cmd::list(&output, &path)?,
        Commands::HasPlugins { path } => inject_cmd::has_plugins_cmd(&output, path.as_deref())?,
    }

    Ok(())
}
