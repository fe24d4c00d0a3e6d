//! Callsheet CLI — the main entry point.
//!
//! Commands:
//! - `serve`    — Start the HTTP relay server
//! - `context`  — Render the prompt context for a record bundle file
//! - `doctor`   — Diagnose configuration health

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(
    name = "callsheet",
    about = "Callsheet — LLM relay for talent-booking records",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP relay server
    Serve {
        /// Override the port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Render the prompt context for a JSON record-bundle file
    Context {
        /// Path to a JSON file containing the record bundle
        file: PathBuf,
    },

    /// Diagnose configuration health
    Doctor,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Serve { port } => commands::serve::run(port).await?,
        Commands::Context { file } => commands::context::run(&file)?,
        Commands::Doctor => commands::doctor::run()?,
    }

    Ok(())
}
