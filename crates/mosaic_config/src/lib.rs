//! Parsing and validation of `mosaic.toml` run configuration files.
//!
//! The configuration names the two input files, the output path, the
//! annealing schedule, and the cost weights. Loading validates every
//! numeric range up front so the engine never sees a nonsensical schedule.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str};
pub use types::{AnnealConfig, CostConfig, FilesConfig, FloorplanConfig};
