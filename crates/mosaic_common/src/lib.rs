//! Shared foundational types for the Mosaic floorplanner.
//!
//! This crate holds the result alias and internal error type used across
//! every other Mosaic crate. User-facing problems (bad input files,
//! unplaceable blocks) are reported through `mosaic_diagnostics`; the types
//! here cover only logic errors inside the tool itself.

#![warn(missing_docs)]

pub mod result;

pub use result::{InternalError, MosaicResult};
