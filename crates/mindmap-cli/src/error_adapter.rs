//! Error adapter for converting MindmapError to miette diagnostics.
//!
//! This module provides the bridge between the library's error type and
//! miette's rich diagnostic formatting used in the CLI. Every variant gets a
//! stable code and, where the user can act on it, a help line.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use mindmap::MindmapError;

/// Adapter rendering a [`MindmapError`] through miette.
pub struct ErrorAdapter<'a>(pub &'a MindmapError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.0 {
            MindmapError::NoScreenContent => "mindmap::no_screen_content",
            MindmapError::NoUniqueNodes => "mindmap::no_unique_nodes",
            MindmapError::HierarchyValidationFailed { .. } => "mindmap::hierarchy_validation",
            MindmapError::NoDebugData => "mindmap::no_debug_data",
            MindmapError::RootNotFound(_) => "mindmap::root_not_found",
            MindmapError::Config(_) => "mindmap::config",
            MindmapError::Scene(_) => "mindmap::scene",
            MindmapError::Io(_) => "mindmap::io",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self.0 {
            MindmapError::NoScreenContent => {
                "the input must contain at least one <svg> element with shapes"
            }
            MindmapError::NoUniqueNodes => {
                "no text label looked like mindmap content; check `noise_patterns` in the configuration"
            }
            MindmapError::HierarchyValidationFailed { .. } => {
                "this is a bug; rerun with --log-level debug and report the output"
            }
            MindmapError::RootNotFound(_) => {
                "run with --debug to list the node ids of this scene"
            }
            MindmapError::Scene(_) => "the input must be a well-formed SVG or XHTML document",
            MindmapError::NoDebugData | MindmapError::Config(_) | MindmapError::Io(_) => {
                return None;
            }
        };
        Some(Box::new(help))
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(err: &MindmapError) -> Option<String> {
        ErrorAdapter(err).code().map(|code| code.to_string())
    }

    fn help(err: &MindmapError) -> Option<String> {
        ErrorAdapter(err).help().map(|help| help.to_string())
    }

    #[test]
    fn test_codes() {
        assert_eq!(
            code(&MindmapError::NoScreenContent).as_deref(),
            Some("mindmap::no_screen_content")
        );
        assert_eq!(
            code(&MindmapError::RootNotFound("node_4".into())).as_deref(),
            Some("mindmap::root_not_found")
        );
        assert_eq!(
            code(&MindmapError::HierarchyValidationFailed { duplicates: 2 }).as_deref(),
            Some("mindmap::hierarchy_validation")
        );
    }

    #[test]
    fn test_help_only_when_actionable() {
        assert!(help(&MindmapError::RootNotFound("x".into())).is_some_and(|h| h.contains("--debug")));
        assert!(help(&MindmapError::Config("bad".into())).is_none());
    }

    #[test]
    fn test_report_rendering() {
        let err = MindmapError::NoUniqueNodes;
        let mut rendered = String::new();
        miette::GraphicalReportHandler::new_themed(miette::GraphicalTheme::unicode_nocolor())
            .render_report(&mut rendered, &ErrorAdapter(&err))
            .expect("Writing to String buffer is infallible");

        assert!(rendered.contains("mindmap::no_unique_nodes"));
        assert!(rendered.contains("No unique nodes found in the scene."));
        assert!(rendered.contains("noise_patterns"));
    }
}
