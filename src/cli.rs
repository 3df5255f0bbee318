use clap::{Parser, Subcommand};
use mediaprep::jobs::JobKind;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mediaprep")]
#[command(author, version, about = "Batch image and video conversion for static sites")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert every pending source file
    Run {
        /// Run only this job (runs all enabled jobs if not specified)
        #[arg(long, value_enum)]
        job: Option<JobKind>,

        /// Show what would be done without executing
        #[arg(long)]
        dry_run: bool,

        /// Print job summaries as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check that required external tools are available
    CheckTools,

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Write a config file populated with the defaults
    Init {
        /// Where to write the config
        #[arg(default_value = "mediaprep.toml")]
        path: PathBuf,
    },

    /// Display version information
    Version,
}
