//! Gantry CLI - a dependency-driven build configurator for native GUI applications

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("gantry=debug")
    } else {
        EnvFilter::new("gantry=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    let shell = if cli.no_color {
        gantry::util::shell::Shell::new().no_color()
    } else {
        gantry::util::shell::Shell::new()
    };

    // Execute command
    match cli.command {
        Commands::Install(args) => commands::install::execute(args, &shell),
        Commands::Build(args) => commands::build::execute(args, &shell),
        Commands::Add(args) => commands::add::execute(args, &shell),
        Commands::Remove(args) => commands::remove::execute(args, &shell),
        Commands::Clean(args) => commands::clean::execute(args, &shell),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
