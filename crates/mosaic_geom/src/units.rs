//! The floorplan entities: outline, blocks, terminals, and nets.

use crate::ids::{BlockId, NetId, TerminalId};
use serde::{Deserialize, Serialize};

/// The fixed rectangular boundary the whole placement must fit inside.
///
/// Fixed after construction; nothing in the engine mutates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outline {
    /// Outline width.
    pub width: i64,
    /// Outline height.
    pub height: i64,
}

impl Outline {
    /// Creates an outline with the given dimensions.
    pub fn new(width: i64, height: i64) -> Self {
        Self { width, height }
    }
}

/// A placeable rectangular module.
///
/// `(x, y)` is the bottom-left corner and is meaningful only while
/// `placed` is set. Rotating a block swaps `width` and `height` and
/// toggles `rotated`; the two must never change independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// The unique ID of this block.
    pub id: BlockId,
    /// Unique human-readable name from the input file.
    pub name: String,
    /// Current width (swapped with height while rotated).
    pub width: i64,
    /// Current height (swapped with width while rotated).
    pub height: i64,
    /// X coordinate of the bottom-left corner.
    pub x: i64,
    /// Y coordinate of the bottom-left corner.
    pub y: i64,
    /// Whether the block is currently rotated 90 degrees.
    pub rotated: bool,
    /// Whether the block has been assigned a position.
    pub placed: bool,
}

impl Block {
    /// Creates an unplaced block at the origin. The ID is assigned when the
    /// block is added to a [`Design`](crate::Design).
    pub fn new(name: impl Into<String>, width: i64, height: i64) -> Self {
        Self {
            id: BlockId::from_raw(0),
            name: name.into(),
            width,
            height,
            x: 0,
            y: 0,
            rotated: false,
            placed: false,
        }
    }

    /// Swaps width and height and toggles the rotation flag.
    ///
    /// Applying this twice restores the original dimensions and flag.
    pub fn rotate(&mut self) {
        std::mem::swap(&mut self.width, &mut self.height);
        self.rotated = !self.rotated;
    }

    /// Returns the block's area. Invariant under rotation.
    pub fn area(&self) -> i64 {
        self.width * self.height
    }

    /// Returns the center point of the block's rectangle.
    ///
    /// This is the block's net-endpoint under the center-based wirelength
    /// convention.
    pub fn center(&self) -> (f64, f64) {
        (
            self.x as f64 + self.width as f64 / 2.0,
            self.y as f64 + self.height as f64 / 2.0,
        )
    }

    /// X coordinate of the top-right corner.
    pub fn x_max(&self) -> i64 {
        self.x + self.width
    }

    /// Y coordinate of the top-right corner.
    pub fn y_max(&self) -> i64 {
        self.y + self.height
    }
}

/// A fixed I/O pad participating in nets but never moved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Terminal {
    /// The unique ID of this terminal.
    pub id: TerminalId,
    /// Unique human-readable name from the input file.
    pub name: String,
    /// Fixed X coordinate.
    pub x: i64,
    /// Fixed Y coordinate.
    pub y: i64,
}

impl Terminal {
    /// Creates a terminal at a fixed position. The ID is assigned when the
    /// terminal is added to a [`Design`](crate::Design).
    pub fn new(name: impl Into<String>, x: i64, y: i64) -> Self {
        Self {
            id: TerminalId::from_raw(0),
            name: name.into(),
            x,
            y,
        }
    }
}

/// A member of a net: either a block or a terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NetMember {
    /// A block, contributing its center point to the net's bounding box.
    Block(BlockId),
    /// A terminal, contributing its exact fixed point.
    Terminal(TerminalId),
}

/// A named connectivity group over blocks and terminals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Net {
    /// The unique ID of this net.
    pub id: NetId,
    /// Net name (`net0`, `net1`, ... in input order).
    pub name: String,
    /// Ordered member references. Members must exist when added.
    pub members: Vec<NetMember>,
}

impl Net {
    /// Creates an empty net. The ID is assigned when the net is added to a
    /// [`Design`](crate::Design).
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: NetId::from_raw(0),
            name: name.into(),
            members: Vec::new(),
        }
    }

    /// Appends a member reference.
    pub fn add_member(&mut self, member: NetMember) {
        self.members.push(member);
    }

    /// Returns the net's degree (number of members).
    pub fn degree(&self) -> usize {
        self.members.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotate_twice_restores() {
        let mut block = Block::new("bk1", 40, 30);
        block.rotate();
        assert_eq!((block.width, block.height), (30, 40));
        assert!(block.rotated);
        block.rotate();
        assert_eq!((block.width, block.height), (40, 30));
        assert!(!block.rotated);
    }

    #[test]
    fn area_invariant_under_rotation() {
        let mut block = Block::new("bk1", 40, 30);
        let before = block.area();
        block.rotate();
        assert_eq!(block.area(), before);
    }

    #[test]
    fn center_of_odd_dimensions() {
        let mut block = Block::new("bk1", 5, 3);
        block.x = 10;
        block.y = 20;
        assert_eq!(block.center(), (12.5, 21.5));
    }

    #[test]
    fn corner_accessors() {
        let mut block = Block::new("bk1", 40, 30);
        block.x = 1;
        block.y = 2;
        assert_eq!(block.x_max(), 41);
        assert_eq!(block.y_max(), 32);
    }

    #[test]
    fn net_degree_tracks_members() {
        let mut net = Net::new("net0");
        assert_eq!(net.degree(), 0);
        net.add_member(NetMember::Block(BlockId::from_raw(0)));
        net.add_member(NetMember::Terminal(TerminalId::from_raw(0)));
        assert_eq!(net.degree(), 2);
    }

    #[test]
    fn terminal_position_fixed() {
        let term = Terminal::new("p1", 100, 100);
        assert_eq!((term.x, term.y), (100, 100));
    }

    #[test]
    fn serde_roundtrip() {
        let block = Block::new("bk1", 40, 30);
        let json = serde_json::to_string(&block).unwrap();
        let back: Block = serde_json::from_str(&json).unwrap();
        assert_eq!(block, back);
    }
}
