//! Label content filter.
//!
//! Rendered pages mix mindmap labels with UI chrome (buttons, menus, account
//! widgets). Labels matching any denylist pattern are not mindmap content.

use log::debug;
use regex::Regex;

use crate::MindmapError;

/// Patterns every filter rejects. Matched against the trimmed label.
const BUILTIN_PATTERNS: &[&str] = &[
    r"(?i)^(lock|settings|sources|chat|studio|arrow_back)$",
    r"(?i)^(collapse|expand|add|remove|thumb_up|thumb_down)$",
    r"(?i)^(copy|good response|bad response|light mode|dark mode)$",
    r"(?i)^(google apps|google account|gmail)$",
    r"^\d+$",
    r"^[^\w\s]*$",
    r"(?i)@\w+\.com$",
    r"(?i)^https?://",
    r"^\s*$",
];

/// Shortest accepted label, in characters.
const MIN_LABEL_CHARS: usize = 2;

/// Decides whether a label is mindmap content.
#[derive(Debug, Clone)]
pub struct ContentFilter {
    patterns: Vec<Regex>,
}

impl ContentFilter {
    /// Compiles the built-in denylist plus `extra` patterns.
    ///
    /// # Errors
    ///
    /// Returns [`MindmapError::Config`] when a pattern is not a valid regex.
    pub fn new<S: AsRef<str>>(extra: &[S]) -> Result<Self, MindmapError> {
        let patterns = BUILTIN_PATTERNS
            .iter()
            .copied()
            .chain(extra.iter().map(AsRef::as_ref))
            .map(|pattern| {
                Regex::new(pattern).map_err(|err| {
                    MindmapError::Config(format!("invalid noise pattern `{pattern}`: {err}"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(patterns = patterns.len(); "Content filter compiled");
        Ok(Self { patterns })
    }

    /// Whether `label` should become a node.
    pub fn accepts(&self, label: &str) -> bool {
        let trimmed = label.trim();
        if trimmed.chars().count() < MIN_LABEL_CHARS {
            return false;
        }
        !self.patterns.iter().any(|pattern| pattern.is_match(trimmed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builtin() -> ContentFilter {
        ContentFilter::new::<&str>(&[]).expect("built-in patterns compile")
    }

    #[test]
    fn test_accepts_topics() {
        let filter = builtin();
        for label in ["Machine Learning", "AI", "Neural nets (CNN)", "2024 roadmap", "Données"] {
            assert!(filter.accepts(label), "{label} should be accepted");
        }
    }

    #[test]
    fn test_rejects_ui_chrome() {
        let filter = builtin();
        for label in [
            "Settings",
            "  expand ",
            "thumb_up",
            "Dark Mode",
            "Google Account",
            "arrow_back",
        ] {
            assert!(!filter.accepts(label), "{label} should be rejected");
        }
    }

    #[test]
    fn test_rejects_non_content() {
        let filter = builtin();
        for label in [
            "",
            "x",
            "   ",
            "42",
            "--",
            "...!",
            "someone@example.com",
            "https://example.com/map",
            "HTTP://EXAMPLE.COM",
        ] {
            assert!(!filter.accepts(label), "{label:?} should be rejected");
        }
    }

    #[test]
    fn test_extra_patterns() {
        let filter = ContentFilter::new(&["(?i)^share$"]).expect("valid pattern");
        assert!(!filter.accepts("Share"));
        assert!(filter.accepts("Shared memory"));
    }

    #[test]
    fn test_invalid_extra_pattern() {
        let err = ContentFilter::new(&["(unclosed"]).unwrap_err();
        assert!(matches!(err, MindmapError::Config(_)));
    }
}
