//! Diagnostic messages and accumulation for the Mosaic floorplanner.
//!
//! Recoverable problems — an unknown net member, a block the initial
//! placement could not fit, an invalid block in the final layout — are
//! reported as structured [`Diagnostic`] values with a [`Severity`] and
//! collected in a thread-safe [`DiagnosticSink`]. Hard failures (malformed
//! input, broken configuration) use the error enums of the parser and
//! config crates instead and never reach the sink.

#![warn(missing_docs)]

pub mod diagnostic;
pub mod severity;
pub mod sink;

pub use diagnostic::Diagnostic;
pub use severity::Severity;
pub use sink::DiagnosticSink;
