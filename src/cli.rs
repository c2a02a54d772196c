//! Command-line interface for quoteweave
//!
//! Provides argument parsing using clap derive macros.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Quotation attribution stitching and scoring
#[derive(Parser, Debug)]
#[command(
    name = "quoteweave",
    version = Box::leak(crate::version_string().into_boxed_str()) as &str,
    about = "Quotation attribution stitching and scoring"
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Suppress progress output (quiet mode)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a custom component pipeline
    Run {
        /// Component to run, as name[key=value,...] (repeatable, in order)
        #[arg(
            long = "component",
            value_name = "NAME[ARGS]",
            required = true,
            num_args = 1
        )]
        components: Vec<String>,
    },

    /// List available pipeline components
    Components,

    /// Stitch per-chunk segment sequences from a JSON file into one sequence
    Stitch {
        /// JSON file holding an array of segment sequences, in chunk order
        #[arg(long, value_name = "PATH")]
        input: PathBuf,

        /// Chunk overlap hint in characters (default from config)
        #[arg(long, value_name = "CHARS")]
        overlap: Option<usize>,

        /// Write the stitched sequence to this file instead of stdout
        #[arg(long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Score a predicted segment sequence against ground truth
    Evaluate {
        /// JSON file holding the predicted segment sequence
        #[arg(long, value_name = "PATH")]
        predicted: PathBuf,

        /// JSON file holding the ground-truth segment sequence
        #[arg(long, value_name = "PATH")]
        ground_truth: PathBuf,

        /// Print the report as JSON to stdout instead of rendering it
        #[arg(long)]
        json: bool,
    },
}
