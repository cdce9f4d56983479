//! nbsite CLI - build a static website from notebook chapters.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "nbsite")]
#[command(about = "Build a static website from a directory of notebook chapters")]
#[command(version)]
pub struct Cli {
    /// Command to run (defaults to build)
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to site.toml config file
    #[arg(short, long, default_value = "site.toml", global = true)]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a config file, templates and a first chapter
    Init {
        /// Overwrite existing templates and sample chapter
        #[arg(short, long)]
        yes: bool,
    },

    /// Build the site
    Build {
        /// Output directory (defaults to config or the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Minify inlined chapter CSS
        #[arg(long)]
        minify: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    let command = cli.command.unwrap_or(Commands::Build {
        output: None,
        minify: false,
    });

    // Execute command
    match command {
        Commands::Init { yes } => {
            commands::init::run(&cli.config, yes)?;
        }
        Commands::Build { output, minify } => {
            commands::build::run(&cli.config, output, minify.then_some(true))?;
        }
    }

    Ok(())
}
