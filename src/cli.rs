//! CLI definitions for streamcheck.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// streamcheck CLI.
#[derive(Parser)]
#[command(name = "streamcheck")]
#[command(about = "End-to-end checks for a video streaming site")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(
        short,
        long,
        env = "STREAMCHECK_CONFIG",
        default_value = "config/streamcheck.toml",
        global = true
    )]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Run the happy-path journey against a real browser
    Smoke {
        /// Search keyword
        #[arg(short, long, default_value = "lofi hip hop")]
        query: String,

        /// Seconds to seek forward after pausing
        #[arg(long, default_value_t = 10.0)]
        seek: f64,
    },

    /// Open a page and run the ad skipper once
    SkipAds {
        /// Page to open (default: site base URL)
        #[arg(long)]
        url: Option<String>,
    },

    /// Generate the HTML report from Cucumber JSON results
    Report {
        /// Directory holding Cucumber JSON files
        #[arg(long)]
        json_dir: Option<PathBuf>,

        /// Output directory for index.html
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Load and validate the configuration
    Validate,
}
