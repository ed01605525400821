//! Thread-safe diagnostic accumulator.

use crate::diagnostic::Diagnostic;
use crate::severity::Severity;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// An accumulator for diagnostics emitted during a floorplanning run.
///
/// The sink is shared by reference through the parse and search pipeline.
/// Counts per severity are kept in atomics so `has_errors` and the count
/// accessors never take the entry lock.
pub struct DiagnosticSink {
    entries: Mutex<Vec<Diagnostic>>,
    errors: AtomicUsize,
    warnings: AtomicUsize,
}

impl DiagnosticSink {
    /// Creates a new empty diagnostic sink.
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            errors: AtomicUsize::new(0),
            warnings: AtomicUsize::new(0),
        }
    }

    /// Emits a diagnostic into the sink.
    pub fn emit(&self, diag: Diagnostic) {
        match diag.severity {
            Severity::Error => {
                self.errors.fetch_add(1, Ordering::Relaxed);
            }
            Severity::Warning => {
                self.warnings.fetch_add(1, Ordering::Relaxed);
            }
            Severity::Note => {}
        }
        self.entries.lock().unwrap().push(diag);
    }

    /// Returns `true` if any error-severity diagnostics have been emitted.
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// Returns the number of error-severity diagnostics emitted so far.
    pub fn error_count(&self) -> usize {
        self.errors.load(Ordering::Relaxed)
    }

    /// Returns the number of warning-severity diagnostics emitted so far.
    pub fn warning_count(&self) -> usize {
        self.warnings.load(Ordering::Relaxed)
    }

    /// Drains all accumulated diagnostics, leaving the sink empty.
    ///
    /// Severity counts are not reset; they record the whole run.
    pub fn drain(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.entries.lock().unwrap())
    }

    /// Returns a copy of the accumulated diagnostics without draining.
    pub fn snapshot(&self) -> Vec<Diagnostic> {
        self.entries.lock().unwrap().clone()
    }
}

impl Default for DiagnosticSink {
    fn default() -> Self {
        Self::new()
    }
}
