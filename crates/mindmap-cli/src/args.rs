//! Command-line argument definitions for the mindmap CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, the detection mode and logging verbosity.

use clap::Parser;

/// Command-line arguments for the mindmap reconstruction tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the rendered mindmap (SVG or XHTML)
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output JSON file
    #[arg(short, long, default_value = "mindmap.json")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Rebuild the tree from this node id (e.g. `node_3`) instead of the detected root
    #[arg(long, conflicts_with = "debug")]
    pub root: Option<String>,

    /// Write the intermediate detection snapshot instead of the tree
    #[arg(long)]
    pub debug: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
