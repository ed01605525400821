//! Reversible perturbation moves and the rollback log.
//!
//! Every move applied through [`MoveLog`] pushes a record of itself;
//! [`MoveLog::undo_last`] pops the record and applies its inverse, and
//! [`MoveLog::commit_last`] pops and discards it once the controller
//! accepts the move. The log is a strict stack: only the most recent move
//! can be undone, so each trial must be committed or rolled back before
//! the next one is applied.

use crate::tree::{ChildSlot, PackingTree};
use mosaic_geom::{BlockId, Design, NodeId};

/// A reversible action taken during optimization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    /// Width/height swap plus rotation-flag toggle. Self-inverse.
    Rotate {
        /// The rotated block.
        block: BlockId,
    },
    /// Position shift by `(dx, dy)`. Inverse shifts by `(-dx, -dy)`.
    Translate {
        /// The translated block.
        block: BlockId,
        /// X delta.
        dx: i64,
        /// Y delta.
        dy: i64,
    },
    /// Exchange of the blocks two tree slots reference. Self-inverse.
    SwapSlots {
        /// First slot.
        a: NodeId,
        /// Second slot.
        b: NodeId,
    },
    /// Subtree relocation. The inverse re-attaches the node into the exact
    /// child slot it came from.
    RelocateSubtree {
        /// The relocated slot.
        node: NodeId,
        /// The original parent slot, or `None` if the node was the root.
        old_parent: Option<(NodeId, ChildSlot)>,
    },
}

/// A stack of applied-but-uncommitted moves.
#[derive(Debug, Default)]
pub struct MoveLog {
    entries: Vec<Move>,
}

impl MoveLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of uncommitted moves.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the log holds no uncommitted moves.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rotates a block and logs the move.
    pub fn rotate(&mut self, design: &mut Design, block: BlockId) {
        design.block_mut(block).rotate();
        self.entries.push(Move::Rotate { block });
    }

    /// Translates a block by `(dx, dy)` and logs the move.
    pub fn translate(&mut self, design: &mut Design, block: BlockId, dx: i64, dy: i64) {
        let b = design.block_mut(block);
        b.x += dx;
        b.y += dy;
        self.entries.push(Move::Translate { block, dx, dy });
    }

    /// Swaps the blocks referenced by two tree slots and logs the move.
    pub fn swap_slots(&mut self, tree: &mut PackingTree, a: NodeId, b: NodeId) {
        tree.swap_blocks(a, b);
        self.entries.push(Move::SwapSlots { a, b });
    }

    /// Detaches `node` and re-attaches it under `new_parent` (`None` makes
    /// it the new root), logging the original parent slot for rollback.
    ///
    /// Returns `false` without mutating anything if `new_parent` lies
    /// inside the subtree rooted at `node`, which would orphan the subtree.
    pub fn relocate_subtree(
        &mut self,
        tree: &mut PackingTree,
        node: NodeId,
        new_parent: Option<NodeId>,
    ) -> bool {
        if let Some(dst) = new_parent {
            if tree.contains(node, dst) {
                return false;
            }
        }
        let old_parent = tree.parent_slot(node);
        tree.detach(node);
        tree.attach(new_parent, node);
        self.entries.push(Move::RelocateSubtree { node, old_parent });
        true
    }

    /// Undoes the most recent uncommitted move.
    ///
    /// Returns `false` if the log is empty.
    pub fn undo_last(&mut self, design: &mut Design, tree: &mut PackingTree) -> bool {
        let Some(last) = self.entries.pop() else {
            return false;
        };
        match last {
            Move::Rotate { block } => design.block_mut(block).rotate(),
            Move::Translate { block, dx, dy } => {
                let b = design.block_mut(block);
                b.x -= dx;
                b.y -= dy;
            }
            Move::SwapSlots { a, b } => tree.swap_blocks(a, b),
            Move::RelocateSubtree { node, old_parent } => {
                tree.detach(node);
                match old_parent {
                    Some((parent, slot)) => tree.attach_at(parent, slot, node),
                    None => tree.attach(None, node),
                }
            }
        }
        true
    }

    /// Discards the most recent move record, committing the move.
    ///
    /// Returns `false` if the log is empty.
    pub fn commit_last(&mut self) -> bool {
        self.entries.pop().is_some()
    }
}
