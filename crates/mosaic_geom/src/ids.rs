//! Opaque ID newtypes for floorplan entities.
//!
//! [`BlockId`], [`TerminalId`], [`NetId`], and [`NodeId`] are thin `u32`
//! wrappers used as arena indices into the [`Design`](crate::Design) and
//! the packing tree. They are `Copy`, `Hash`, and serde-serializable.

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
        pub struct $name(u32);

        impl $name {
            /// Creates an ID from a raw `u32` index.
            pub fn from_raw(index: u32) -> Self {
                Self(index)
            }

            /// Returns the raw `u32` index.
            pub fn as_raw(self) -> u32 {
                self.0
            }

            /// Returns the index as a `usize` for direct arena access.
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(
    /// Opaque, copyable ID for a block in the design.
    BlockId
);

define_id!(
    /// Opaque, copyable ID for a terminal in the design.
    TerminalId
);

define_id!(
    /// Opaque, copyable ID for a net in the design.
    NetId
);

define_id!(
    /// Opaque, copyable ID for a slot in the packing tree.
    NodeId
);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn block_id_roundtrip() {
        let id = BlockId::from_raw(12);
        assert_eq!(id.as_raw(), 12);
        assert_eq!(id.index(), 12);
    }

    #[test]
    fn id_equality() {
        assert_eq!(NetId::from_raw(3), NetId::from_raw(3));
        assert_ne!(NetId::from_raw(3), NetId::from_raw(4));
    }

    #[test]
    fn id_hash_in_set() {
        let mut set = HashSet::new();
        set.insert(NodeId::from_raw(1));
        set.insert(NodeId::from_raw(2));
        set.insert(NodeId::from_raw(1));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn id_display() {
        assert_eq!(format!("{}", TerminalId::from_raw(9)), "9");
    }

    #[test]
    fn id_serde_roundtrip() {
        let id = BlockId::from_raw(77);
        let json = serde_json::to_string(&id).unwrap();
        let back: BlockId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
