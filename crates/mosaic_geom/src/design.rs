//! The design arena owning all floorplan entities.

use crate::ids::{BlockId, NetId, TerminalId};
use crate::units::{Block, Net, NetMember, Outline, Terminal};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The complete input design: outline, blocks, terminals, and nets.
///
/// Entities are stored in `Vec` arenas indexed by their ID; `add_*` assigns
/// IDs in insertion order. Blocks and terminals also get name indices for
/// net resolution during parsing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Design {
    /// The fixed chip outline.
    pub outline: Outline,
    /// All blocks in the design.
    pub blocks: Vec<Block>,
    /// All terminals in the design.
    pub terminals: Vec<Terminal>,
    /// All nets in the design.
    pub nets: Vec<Net>,
    /// Auxiliary index: block name to ID (rebuilt on deserialization).
    #[serde(skip)]
    pub block_by_name: HashMap<String, BlockId>,
    /// Auxiliary index: terminal name to ID (rebuilt on deserialization).
    #[serde(skip)]
    pub terminal_by_name: HashMap<String, TerminalId>,
}

impl Design {
    /// Creates an empty design with the given outline.
    pub fn new(outline: Outline) -> Self {
        Self {
            outline,
            blocks: Vec::new(),
            terminals: Vec::new(),
            nets: Vec::new(),
            block_by_name: HashMap::new(),
            terminal_by_name: HashMap::new(),
        }
    }

    /// Adds a block and returns its ID.
    pub fn add_block(&mut self, mut block: Block) -> BlockId {
        let id = BlockId::from_raw(self.blocks.len() as u32);
        block.id = id;
        self.block_by_name.insert(block.name.clone(), id);
        self.blocks.push(block);
        id
    }

    /// Adds a terminal and returns its ID.
    pub fn add_terminal(&mut self, mut terminal: Terminal) -> TerminalId {
        let id = TerminalId::from_raw(self.terminals.len() as u32);
        terminal.id = id;
        self.terminal_by_name.insert(terminal.name.clone(), id);
        self.terminals.push(terminal);
        id
    }

    /// Adds a net and returns its ID.
    pub fn add_net(&mut self, mut net: Net) -> NetId {
        let id = NetId::from_raw(self.nets.len() as u32);
        net.id = id;
        self.nets.push(net);
        id
    }

    /// Returns the block with the given ID.
    pub fn block(&self, id: BlockId) -> &Block {
        &self.blocks[id.index()]
    }

    /// Returns a mutable reference to the block with the given ID.
    pub fn block_mut(&mut self, id: BlockId) -> &mut Block {
        &mut self.blocks[id.index()]
    }

    /// Returns the terminal with the given ID.
    pub fn terminal(&self, id: TerminalId) -> &Terminal {
        &self.terminals[id.index()]
    }

    /// Returns the net with the given ID.
    pub fn net(&self, id: NetId) -> &Net {
        &self.nets[id.index()]
    }

    /// Returns the number of blocks.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Returns the number of terminals.
    pub fn terminal_count(&self) -> usize {
        self.terminals.len()
    }

    /// Returns the number of nets.
    pub fn net_count(&self) -> usize {
        self.nets.len()
    }

    /// Returns the IDs of all blocks in arena order.
    pub fn block_ids(&self) -> impl Iterator<Item = BlockId> + '_ {
        (0..self.blocks.len() as u32).map(BlockId::from_raw)
    }

    /// Returns the number of placed blocks.
    pub fn placed_count(&self) -> usize {
        self.blocks.iter().filter(|b| b.placed).count()
    }

    /// Returns whether every block has been assigned a position.
    pub fn is_fully_placed(&self) -> bool {
        self.blocks.iter().all(|b| b.placed)
    }

    /// Returns the net-endpoint of a member: the owning block's center
    /// (`None` while the block is unplaced) or the terminal's fixed point.
    pub fn member_point(&self, member: NetMember) -> Option<(f64, f64)> {
        match member {
            NetMember::Block(id) => {
                let block = self.block(id);
                block.placed.then(|| block.center())
            }
            NetMember::Terminal(id) => {
                let term = self.terminal(id);
                Some((term.x as f64, term.y as f64))
            }
        }
    }

    /// Rebuilds the name indices after deserialization.
    pub fn rebuild_indices(&mut self) {
        self.block_by_name.clear();
        for (i, block) in self.blocks.iter().enumerate() {
            self.block_by_name
                .insert(block.name.clone(), BlockId::from_raw(i as u32));
        }
        self.terminal_by_name.clear();
        for (i, term) in self.terminals.iter().enumerate() {
            self.terminal_by_name
                .insert(term.name.clone(), TerminalId::from_raw(i as u32));
        }
    }
}
