//! CLI definitions using clap.

use clap::{Args, Parser, Subcommand};

/// Gantry - a dependency-driven build configurator for native GUI applications
#[derive(Parser)]
#[command(name = "gantry")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve requirements, generate descriptors, and stage bindings
    Install(InstallArgs),

    /// Install, then configure and build with CMake
    Build(BuildArgs),

    /// Add a requirement to Gantry.toml
    Add(AddArgs),

    /// Remove a requirement from Gantry.toml
    Remove(RemoveArgs),

    /// Remove build artifacts
    Clean(CleanArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct InstallArgs {
    /// Build profile to prepare for
    #[arg(long, value_name = "PROFILE")]
    pub profile: Option<String>,
}

#[derive(Args)]
pub struct BuildArgs {
    /// Build in release mode
    #[arg(short, long)]
    pub release: bool,

    /// Build profile (overrides --release)
    #[arg(long, value_name = "PROFILE")]
    pub profile: Option<String>,
}

#[derive(Args)]
pub struct AddArgs {
    /// Requirement entry, e.g. `imgui/1.90.5`
    pub entry: String,
}

#[derive(Args)]
pub struct RemoveArgs {
    /// Package name to remove
    pub name: String,
}

#[derive(Args)]
pub struct CleanArgs {
    /// Also remove staged bindings
    #[arg(long)]
    pub bindings: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
