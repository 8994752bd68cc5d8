// SPDX-License-Identifier: GPL-3.0-only

use clap::{Parser, Subcommand};
use label_camera::Config;
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "label-camera")]
#[command(about = "Take a still photo and give it a name")]
#[command(version)]
#[command(subcommand_required = false)]
struct Cli {
    /// Configuration file for the simulated devices (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive terminal front end (default)
    Terminal,

    /// Play a sequence of gestures headlessly and print the final state as JSON
    Script {
        /// Gestures: access, capture, cancel, dismiss, label=<name>
        #[arg(required = true)]
        steps: Vec<String>,

        /// Print the state after every step
        #[arg(short, long)]
        trace: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let interactive = !matches!(cli.command, Some(Commands::Script { .. }));

    // Initialize logging
    // Set RUST_LOG environment variable to control log level
    // Examples: RUST_LOG=debug, RUST_LOG=label_camera=debug, RUST_LOG=info
    // The terminal front end owns the screen, so it stays quiet unless asked
    let default_filter = if interactive { "off" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .init();

    let config = Config::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Some(Commands::Script { steps, trace }) => cli::run_script(&config, &steps, trace),
        Some(Commands::Terminal) | None => label_camera::terminal::run(&config),
    }
}
