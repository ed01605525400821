//! The B*-tree packing structure.
//!
//! A binary tree over slots, each slot referencing one block, encodes
//! relative positioning without storing absolute coordinates: packing the
//! tree places the root at the origin, a left child directly to the right
//! of its parent, and a right child directly above it. Any tree shape
//! yields a placement that is non-overlapping along those two relations,
//! so topology perturbations explore the packing space safely.
//!
//! Tree linkage lives in its own slot arena, keyed by [`NodeId`] — blocks
//! stay pure geometry records and the tree can be tested on its own.

use mosaic_geom::{BlockId, Design, NodeId};
use rand::Rng;
use std::collections::{HashMap, VecDeque};

/// Which child slot of a parent a node occupies.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ChildSlot {
    /// The left slot: packed directly to the right of the parent.
    Left,
    /// The right slot: packed directly above the parent.
    Right,
}

/// One tree slot wrapping a block reference.
#[derive(Debug, Clone)]
struct Node {
    block: BlockId,
    parent: Option<NodeId>,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

/// The packing tree: a slot arena plus a root reference.
///
/// Slots are created once (during construction from the initial placement)
/// and relinked afterwards; they are never freed individually.
#[derive(Debug, Clone, Default)]
pub struct PackingTree {
    nodes: Vec<Node>,
    slot_by_block: HashMap<BlockId, NodeId>,
    root: Option<NodeId>,
}

impl PackingTree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of slots.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns whether the tree has no slots.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the root slot, if any.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Returns the block a slot references.
    pub fn block_at(&self, node: NodeId) -> BlockId {
        self.nodes[node.index()].block
    }

    /// Returns the slot currently referencing a block.
    pub fn slot_of(&self, block: BlockId) -> Option<NodeId> {
        self.slot_by_block.get(&block).copied()
    }

    /// Returns a slot's parent.
    pub fn parent_of(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.index()].parent
    }

    /// Returns a slot's left child.
    pub fn left_of(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.index()].left
    }

    /// Returns a slot's right child.
    pub fn right_of(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.index()].right
    }

    /// Returns the parent slot a node occupies, or `None` for the root.
    pub fn parent_slot(&self, node: NodeId) -> Option<(NodeId, ChildSlot)> {
        let parent = self.nodes[node.index()].parent?;
        let pn = &self.nodes[parent.index()];
        if pn.left == Some(node) {
            Some((parent, ChildSlot::Left))
        } else {
            Some((parent, ChildSlot::Right))
        }
    }

    /// Creates the root slot for a block. The tree must be empty.
    pub fn set_root(&mut self, block: BlockId) -> NodeId {
        debug_assert!(self.root.is_none(), "tree already has a root");
        let id = self.new_node(block);
        self.root = Some(id);
        id
    }

    /// Inserts a block as a new leaf, descending from `parent` and choosing
    /// left or right uniformly at random at each level until an empty slot
    /// is found. Used only while linking the initial placement.
    pub fn insert(&mut self, parent: NodeId, block: BlockId, rng: &mut impl Rng) -> NodeId {
        let id = self.new_node(block);
        let mut cur = parent;
        loop {
            if rng.gen::<bool>() {
                match self.nodes[cur.index()].left {
                    None => {
                        self.nodes[cur.index()].left = Some(id);
                        break;
                    }
                    Some(next) => cur = next,
                }
            } else {
                match self.nodes[cur.index()].right {
                    None => {
                        self.nodes[cur.index()].right = Some(id);
                        break;
                    }
                    Some(next) => cur = next,
                }
            }
        }
        self.nodes[id.index()].parent = Some(cur);
        id
    }

    /// Derives absolute coordinates for every block reachable from the
    /// root: the root at (0, 0), a left child at `(parent.x + parent.width,
    /// parent.y)`, a right child at `(parent.x, parent.y + parent.height)`.
    ///
    /// Uses an explicit stack so deep trees cannot overflow the call stack.
    /// Every visited block is marked placed.
    pub fn pack(&self, design: &mut Design) {
        let Some(root) = self.root else {
            return;
        };
        let mut stack: Vec<(NodeId, Option<(NodeId, ChildSlot)>)> = vec![(root, None)];
        while let Some((id, origin)) = stack.pop() {
            let (x, y) = match origin {
                None => (0, 0),
                Some((pid, slot)) => {
                    let parent = design.block(self.nodes[pid.index()].block);
                    match slot {
                        ChildSlot::Left => (parent.x_max(), parent.y),
                        ChildSlot::Right => (parent.x, parent.y_max()),
                    }
                }
            };
            let block = design.block_mut(self.nodes[id.index()].block);
            block.x = x;
            block.y = y;
            block.placed = true;

            if let Some(right) = self.nodes[id.index()].right {
                stack.push((right, Some((id, ChildSlot::Right))));
            }
            if let Some(left) = self.nodes[id.index()].left {
                stack.push((left, Some((id, ChildSlot::Left))));
            }
        }
    }

    /// Removes a slot from its parent's child slot without touching the
    /// slot's own children. Detaching the root clears the root reference.
    pub fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.index()].parent {
            let pn = &mut self.nodes[parent.index()];
            if pn.left == Some(node) {
                pn.left = None;
            } else if pn.right == Some(node) {
                pn.right = None;
            }
            self.nodes[node.index()].parent = None;
        }
        if self.root == Some(node) {
            self.root = None;
        }
    }

    /// Attaches a detached slot. With no parent the slot becomes the root;
    /// otherwise a level-order search from `parent` finds the first node
    /// with an empty child slot, left slot preferred. The search is bounded
    /// by the arena, so a saturated subtree can never loop.
    pub fn attach(&mut self, parent: Option<NodeId>, node: NodeId) {
        let Some(start) = parent else {
            self.nodes[node.index()].parent = None;
            self.root = Some(node);
            return;
        };
        let mut queue = VecDeque::from([start]);
        while let Some(cur) = queue.pop_front() {
            let (left, right) = {
                let n = &self.nodes[cur.index()];
                (n.left, n.right)
            };
            let Some(left) = left else {
                self.nodes[cur.index()].left = Some(node);
                self.nodes[node.index()].parent = Some(cur);
                return;
            };
            let Some(right) = right else {
                self.nodes[cur.index()].right = Some(node);
                self.nodes[node.index()].parent = Some(cur);
                return;
            };
            queue.push_back(left);
            queue.push_back(right);
        }
    }

    /// Attaches a detached slot into a specific empty child slot.
    ///
    /// Used by move rollback to restore the exact original linkage.
    pub fn attach_at(&mut self, parent: NodeId, slot: ChildSlot, node: NodeId) {
        let pn = &mut self.nodes[parent.index()];
        match slot {
            ChildSlot::Left => {
                debug_assert!(pn.left.is_none(), "left slot occupied");
                pn.left = Some(node);
            }
            ChildSlot::Right => {
                debug_assert!(pn.right.is_none(), "right slot occupied");
                pn.right = Some(node);
            }
        }
        self.nodes[node.index()].parent = Some(parent);
    }

    /// Swaps the blocks two slots reference, leaving all tree pointers
    /// untouched. Safe for any pair of slots, including ancestor and
    /// descendant; applying it twice restores the original assignment.
    pub fn swap_blocks(&mut self, a: NodeId, b: NodeId) {
        let block_a = self.nodes[a.index()].block;
        let block_b = self.nodes[b.index()].block;
        self.nodes[a.index()].block = block_b;
        self.nodes[b.index()].block = block_a;
        self.slot_by_block.insert(block_a, b);
        self.slot_by_block.insert(block_b, a);
    }

    /// Returns whether `target` lies in the subtree rooted at `subtree`
    /// (including `subtree` itself).
    pub fn contains(&self, subtree: NodeId, target: NodeId) -> bool {
        let mut stack = vec![subtree];
        while let Some(cur) = stack.pop() {
            if cur == target {
                return true;
            }
            if let Some(left) = self.nodes[cur.index()].left {
                stack.push(left);
            }
            if let Some(right) = self.nodes[cur.index()].right {
                stack.push(right);
            }
        }
        false
    }

    fn new_node(&mut self, block: BlockId) -> NodeId {
        let id = NodeId::from_raw(self.nodes.len() as u32);
        self.nodes.push(Node {
            block,
            parent: None,
            left: None,
            right: None,
        });
        self.slot_by_block.insert(block, id);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mosaic_geom::{Block, Outline};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn design_with_blocks(dims: &[(i64, i64)]) -> Design {
        let mut design = Design::new(Outline::new(1000, 1000));
        for (i, &(w, h)) in dims.iter().enumerate() {
            design.add_block(Block::new(format!("bk{i}"), w, h));
        }
        design
    }

    /// Builds bk0 as root with bk1 in its left slot and bk2 in its right.
    fn three_node_tree(design: &Design) -> (PackingTree, NodeId, NodeId, NodeId) {
        let mut tree = PackingTree::new();
        let ids: Vec<BlockId> = design.block_ids().collect();
        let root = tree.set_root(ids[0]);
        let left = tree.new_node(ids[1]);
        tree.attach_at(root, ChildSlot::Left, left);
        let right = tree.new_node(ids[2]);
        tree.attach_at(root, ChildSlot::Right, right);
        (tree, root, left, right)
    }

    #[test]
    fn pack_places_relative_to_parent() {
        let mut design = design_with_blocks(&[(40, 30), (50, 60), (20, 20)]);
        let (tree, ..) = three_node_tree(&design);
        tree.pack(&mut design);

        let root = design.block(BlockId::from_raw(0));
        let left = design.block(BlockId::from_raw(1));
        let right = design.block(BlockId::from_raw(2));
        assert_eq!((root.x, root.y), (0, 0));
        assert_eq!((left.x, left.y), (40, 0));
        assert_eq!((right.x, right.y), (0, 30));
        assert!(design.is_fully_placed());
    }

    #[test]
    fn pack_parent_relation_holds_for_random_trees() {
        let mut rng = StdRng::seed_from_u64(7);
        let dims: Vec<(i64, i64)> = (0..12).map(|i| (10 + i, 5 + 2 * i)).collect();
        let mut design = design_with_blocks(&dims);
        let mut tree = PackingTree::new();
        let ids: Vec<BlockId> = design.block_ids().collect();
        let root = tree.set_root(ids[0]);
        for &id in &ids[1..] {
            tree.insert(root, id, &mut rng);
        }

        tree.pack(&mut design);

        for node_raw in 0..tree.len() as u32 {
            let node = NodeId::from_raw(node_raw);
            let block = design.block(tree.block_at(node));
            match tree.parent_slot(node) {
                None => assert_eq!((block.x, block.y), (0, 0)),
                Some((pid, ChildSlot::Left)) => {
                    let parent = design.block(tree.block_at(pid));
                    assert_eq!(block.x, parent.x_max());
                    assert_eq!(block.y, parent.y);
                }
                Some((pid, ChildSlot::Right)) => {
                    let parent = design.block(tree.block_at(pid));
                    assert_eq!(block.x, parent.x);
                    assert_eq!(block.y, parent.y_max());
                }
            }
        }
    }

    #[test]
    fn insert_links_every_block_once() {
        let mut rng = StdRng::seed_from_u64(3);
        let design = design_with_blocks(&[(10, 10); 20]);
        let mut tree = PackingTree::new();
        let ids: Vec<BlockId> = design.block_ids().collect();
        let root = tree.set_root(ids[0]);
        for &id in &ids[1..] {
            tree.insert(root, id, &mut rng);
        }
        assert_eq!(tree.len(), 20);
        for &id in &ids {
            let slot = tree.slot_of(id).unwrap();
            assert_eq!(tree.block_at(slot), id);
        }
    }

    #[test]
    fn detach_clears_parent_slot_and_keeps_children() {
        let design = design_with_blocks(&[(10, 10), (10, 10), (10, 10)]);
        let (mut tree, root, left, _right) = three_node_tree(&design);

        tree.detach(left);
        assert_eq!(tree.left_of(root), None);
        assert_eq!(tree.parent_of(left), None);
        // Root's right child is untouched.
        assert!(tree.right_of(root).is_some());
    }

    #[test]
    fn detach_root_clears_root() {
        let design = design_with_blocks(&[(10, 10)]);
        let mut tree = PackingTree::new();
        let root = tree.set_root(BlockId::from_raw(0));
        tree.detach(root);
        assert_eq!(tree.root(), None);
    }

    #[test]
    fn attach_prefers_left_then_level_order() {
        let design = design_with_blocks(&[(10, 10), (10, 10), (10, 10), (10, 10)]);
        let (mut tree, root, left, right) = three_node_tree(&design);
        let extra = tree.new_node(BlockId::from_raw(3));

        // Root is saturated; level-order search must land on the left
        // child's left slot, not descend forever.
        tree.attach(Some(root), extra);
        assert_eq!(tree.left_of(left), Some(extra));
        assert_eq!(tree.parent_of(extra), Some(left));
        assert_eq!(tree.left_of(right), None);
    }

    #[test]
    fn attach_none_restores_root() {
        let design = design_with_blocks(&[(10, 10)]);
        let mut tree = PackingTree::new();
        let root = tree.set_root(BlockId::from_raw(0));
        tree.detach(root);
        tree.attach(None, root);
        assert_eq!(tree.root(), Some(root));
        assert_eq!(tree.parent_of(root), None);
    }

    #[test]
    fn swap_blocks_twice_restores() {
        let design = design_with_blocks(&[(10, 10), (20, 20), (30, 30)]);
        let (mut tree, root, left, _) = three_node_tree(&design);
        let before_root = tree.block_at(root);
        let before_left = tree.block_at(left);

        tree.swap_blocks(root, left);
        assert_eq!(tree.block_at(root), before_left);
        assert_eq!(tree.block_at(left), before_root);
        assert_eq!(tree.slot_of(before_root), Some(left));

        tree.swap_blocks(root, left);
        assert_eq!(tree.block_at(root), before_root);
        assert_eq!(tree.block_at(left), before_left);
        assert_eq!(tree.slot_of(before_root), Some(root));
    }

    #[test]
    fn swap_blocks_of_ancestor_and_descendant_is_safe() {
        let design = design_with_blocks(&[(10, 10), (20, 20), (30, 30)]);
        let (mut tree, root, left, right) = three_node_tree(&design);
        tree.swap_blocks(root, left);
        // Tree shape is unchanged; only payloads moved.
        assert_eq!(tree.left_of(root), Some(left));
        assert_eq!(tree.right_of(root), Some(right));
        assert_eq!(tree.parent_of(left), Some(root));
    }

    #[test]
    fn contains_subtree_membership() {
        let design = design_with_blocks(&[(10, 10), (10, 10), (10, 10)]);
        let (tree, root, left, right) = three_node_tree(&design);
        assert!(tree.contains(root, left));
        assert!(tree.contains(root, root));
        assert!(!tree.contains(left, root));
        assert!(!tree.contains(left, right));
    }

    #[test]
    fn pack_empty_tree_is_noop() {
        let mut design = design_with_blocks(&[(10, 10)]);
        let tree = PackingTree::new();
        tree.pack(&mut design);
        assert!(!design.block(BlockId::from_raw(0)).placed);
    }
}
