//! CLI parse: clap types for seo-outline. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// seo-outline - SEO content brief generation
#[derive(Parser, Debug)]
#[command(name = "seo-outline")]
#[command(about = "Generate structured SEO content briefs from keyword research")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory (config/ is read from here)
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides layered config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the content strategy stage over a pipeline state file
    Generate {
        /// Pipeline state JSON
        #[arg(long)]
        input: PathBuf,
        /// Write the updated state here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print the research context block without calling a model
    Context {
        /// Pipeline state JSON
        #[arg(long)]
        input: PathBuf,
    },
}
