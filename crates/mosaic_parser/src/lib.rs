//! Parsers for the `.block` and `.nets` floorplan input formats.
//!
//! A `.block` file carries the chip outline plus every block and terminal;
//! a `.nets` file carries connectivity groups over their names. Parsing a
//! `.block` file produces a fresh [`Design`](mosaic_geom::Design); parsing
//! a `.nets` file resolves names against that design and appends nets.
//!
//! Malformed lines (wrong field count, unparsable numbers) are hard
//! [`ParseError`]s that abort the run. An unknown net member name is a
//! recoverable condition: a warning diagnostic is emitted and the member
//! is skipped.

#![warn(missing_docs)]

pub mod block_file;
pub mod error;
pub mod net_file;

pub use block_file::{parse_block_file, parse_block_str};
pub use error::ParseError;
pub use net_file::{parse_net_file, parse_net_str};
