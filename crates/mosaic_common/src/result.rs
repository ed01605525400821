//! Common result and error types for the Mosaic floorplanner.

/// The standard result type for fallible engine operations.
///
/// `Ok` carries the result value, which may be degraded (e.g. a floorplan
/// with unplaced blocks flagged through diagnostics). `Err` means a bug in
/// Mosaic itself, never a problem with the user's input — input problems
/// are reported via [`DiagnosticSink`](../../mosaic_diagnostics) or the
/// parser/config error enums and still produce `Ok` where recovery is
/// possible.
pub type MosaicResult<T> = Result<T, InternalError>;

/// An internal error indicating a bug in Mosaic, not a user input problem.
///
/// If one of these surfaces during a run, an invariant of the packing
/// engine has been violated and the offending code path should be fixed.
#[derive(Debug, thiserror::Error)]
#[error("internal floorplanner error: {message}")]
pub struct InternalError {
    /// Description of the violated invariant.
    pub message: String,
}

impl InternalError {
    /// Creates a new internal error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<String> for InternalError {
    fn from(message: String) -> Self {
        Self { message }
    }
}
