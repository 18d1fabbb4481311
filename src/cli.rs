use clap::{Parser, Subcommand};

use crate::commands::{platform, platforms};

#[derive(Debug, Parser)]
#[command(name = "pfm")]
#[command(about = "Platform Manager CLI for hybrid app projects", long_about = None)]
pub struct Cli {
    /// Show debug logs and detailed error information
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add, remove, or list the platforms of a project
    Platform(platform::Args),

    /// Show the platforms that can be added
    Platforms(platforms::Args),
}
