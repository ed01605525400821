//! Geometry model for the Mosaic floorplanner.
//!
//! Defines the entities a floorplan is made of: the fixed [`Outline`],
//! placeable [`Block`]s, immovable [`Terminal`]s, and [`Net`]s referencing
//! both. The [`Design`] arena owns all of them and hands out opaque `u32`
//! IDs; every other crate works in terms of those IDs.

#![warn(missing_docs)]

pub mod design;
pub mod ids;
pub mod units;

pub use design::Design;
pub use ids::{BlockId, NetId, NodeId, TerminalId};
pub use units::{Block, Net, NetMember, Outline, Terminal};
