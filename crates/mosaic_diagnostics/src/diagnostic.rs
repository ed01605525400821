//! The structured diagnostic message type.

use crate::severity::Severity;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single structured diagnostic emitted during parsing or floorplanning.
///
/// Carries a severity, a human-readable message, and an optional subject —
/// typically the name of the block, terminal, or net the message is about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// How severe this diagnostic is.
    pub severity: Severity,
    /// The human-readable message.
    pub message: String,
    /// The entity the message refers to, if any (block/net/terminal name).
    pub subject: Option<String>,
}

impl Diagnostic {
    /// Creates an error-severity diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
            subject: None,
        }
    }

    /// Creates a warning-severity diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
            subject: None,
        }
    }

    /// Creates a note-severity diagnostic.
    pub fn note(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Note,
            message: message.into(),
            subject: None,
        }
    }

    /// Attaches the name of the entity this diagnostic refers to.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.subject {
            Some(subject) => write!(f, "{}: {} ({subject})", self.severity, self.message),
            None => write!(f, "{}: {}", self.severity, self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_severity() {
        assert_eq!(Diagnostic::error("x").severity, Severity::Error);
        assert_eq!(Diagnostic::warning("x").severity, Severity::Warning);
        assert_eq!(Diagnostic::note("x").severity, Severity::Note);
    }

    #[test]
    fn display_with_subject() {
        let diag = Diagnostic::warning("unknown net member").with_subject("bk7");
        assert_eq!(format!("{diag}"), "warning: unknown net member (bk7)");
    }

    #[test]
    fn display_without_subject() {
        let diag = Diagnostic::note("placement complete");
        assert_eq!(format!("{diag}"), "note: placement complete");
    }

    #[test]
    fn serde_roundtrip() {
        let diag = Diagnostic::error("block outside outline").with_subject("bk1");
        let json = serde_json::to_string(&diag).unwrap();
        let back: Diagnostic = serde_json::from_str(&json).unwrap();
        assert_eq!(diag, back);
    }
}
