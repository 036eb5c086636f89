//! Mindmap CLI library
//!
//! This module contains the core CLI logic for the mindmap reconstruction
//! tool.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;
pub use error_adapter::ErrorAdapter;

use std::{fs, io};

use log::info;
use serde::Serialize;

use mindmap::{MindmapError, session::DetectionSession};
use mindmap_scene::SvgDocument;

/// Run the mindmap CLI application
///
/// This function reads a rendered mindmap, reconstructs its tree and writes
/// the result as pretty-printed JSON to the output file. With `--debug` the
/// intermediate detection snapshot is written instead; with `--root` the
/// tree is rebuilt from the given node.
///
/// # Errors
///
/// Returns `MindmapError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed input documents
/// - Detection failures
pub fn run(args: &Args) -> Result<(), MindmapError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing mindmap"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;
    let document = SvgDocument::parse(&source)?;
    let mut session = DetectionSession::new(app_config.detect().clone())?;

    let json = if args.debug {
        to_json(session.debug_extract(&document))?
    } else if let Some(root) = &args.root {
        session.debug_extract(&document);
        to_json(&session.extract_with_root(root)?)?
    } else {
        to_json(&session.detect(&document)?)?
    };

    fs::write(&args.output, json)?;

    info!(output_file = args.output; "JSON exported successfully");

    Ok(())
}

fn to_json(value: &impl Serialize) -> Result<String, MindmapError> {
    serde_json::to_string_pretty(value).map_err(|err| io::Error::from(err).into())
}
