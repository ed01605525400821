//! Validity checks and the placement cost model.
//!
//! Validity is a pure predicate over block positions: inside the outline
//! and overlapping no other placed block. Cost blends three normalized
//! terms into one scalar (lower is better): a packing-efficiency area
//! ratio, half-perimeter wirelength, and a bonus for connected blocks
//! that abut along a long edge.
//!
//! Wirelength uses the center-based convention: a block contributes its
//! rectangle center to a net's bounding box, a terminal its exact point.

use mosaic_geom::{Block, BlockId, Design, Net, NetMember, Outline};

/// Weights of the scalar cost function.
#[derive(Debug, Clone, Copy)]
pub struct CostWeights {
    /// Weight `alpha` of the normalized area term, in [0, 1]; the
    /// wirelength term gets `1 - alpha`.
    pub area: f64,
    /// Weight `beta` of the adjacent-long-edge bonus, in [0, 1].
    pub adjacency: f64,
}

impl Default for CostWeights {
    fn default() -> Self {
        Self {
            area: 0.5,
            adjacency: 0.5,
        }
    }
}

/// The cost evaluator for one design.
///
/// Normalization baselines depend only on block dimensions (which rotation
/// does not change in aggregate), so they are computed once up front and
/// reused for every evaluation in the search loop.
#[derive(Debug, Clone)]
pub struct CostModel {
    /// The configured term weights.
    pub weights: CostWeights,
    total_block_area: f64,
    wirelength_baseline: f64,
}

impl CostModel {
    /// Builds a cost model for the given design.
    pub fn new(design: &Design, weights: CostWeights) -> Self {
        let total_block_area: f64 = design.blocks.iter().map(|b| b.area() as f64).sum();
        let baseline = if design.block_count() == 0 {
            1.0
        } else {
            let sum: f64 = design
                .blocks
                .iter()
                .map(|b| 0.5 * (b.width + b.height) as f64)
                .sum();
            sum / design.block_count() as f64
        };
        Self {
            weights,
            total_block_area,
            wirelength_baseline: if baseline > 0.0 { baseline } else { 1.0 },
        }
    }

    /// Bounding-box area of all placed blocks divided by the sum of block
    /// areas: a packing-efficiency ratio comparable in scale to the
    /// normalized wirelength, rather than a raw area.
    pub fn normalized_area(&self, design: &Design) -> f64 {
        if self.total_block_area == 0.0 {
            return 0.0;
        }
        let (w, h) = bounding_extents(design);
        (w * h) as f64 / self.total_block_area
    }

    /// Total HPWL divided by the average half-perimeter of a block.
    pub fn normalized_wirelength(&self, design: &Design) -> f64 {
        total_wirelength(design) / self.wirelength_baseline
    }

    /// The scalar cost: `alpha * area + (1 - alpha) * wirelength -
    /// beta * adjacency`. Lower is better.
    pub fn cost(&self, design: &Design) -> f64 {
        self.weights.area * self.normalized_area(design)
            + (1.0 - self.weights.area) * self.normalized_wirelength(design)
            - self.weights.adjacency * adjacent_long_edge_bonus(design)
    }
}

/// Returns whether a block lies entirely inside the outline.
pub fn within_outline(outline: &Outline, block: &Block) -> bool {
    block.x >= 0
        && block.y >= 0
        && block.x_max() <= outline.width
        && block.y_max() <= outline.height
}

/// Returns whether two blocks' rectangles overlap.
///
/// Symmetric; rectangles that merely share an edge do not overlap.
pub fn overlaps(a: &Block, b: &Block) -> bool {
    !(a.x_max() <= b.x || b.x_max() <= a.x || a.y_max() <= b.y || b.y_max() <= a.y)
}

/// Returns whether a block is placed, inside the outline, and overlapping
/// no other placed block.
pub fn is_valid(design: &Design, id: BlockId) -> bool {
    let block = design.block(id);
    if !block.placed || !within_outline(&design.outline, block) {
        return false;
    }
    design
        .blocks
        .iter()
        .all(|other| other.id == id || !other.placed || !overlaps(block, other))
}

/// Returns the top-right extents of the bounding box of all placed blocks.
pub fn bounding_extents(design: &Design) -> (i64, i64) {
    let mut w = 0;
    let mut h = 0;
    for block in design.blocks.iter().filter(|b| b.placed) {
        w = w.max(block.x_max());
        h = h.max(block.y_max());
    }
    (w, h)
}

/// Sum of half-perimeter wirelengths across all nets.
pub fn total_wirelength(design: &Design) -> f64 {
    design.nets.iter().map(|net| net_hpwl(design, net)).sum()
}

/// HPWL of one net: width plus height of the bounding box spanning every
/// member's point. Unplaced blocks contribute nothing.
fn net_hpwl(design: &Design, net: &Net) -> f64 {
    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;

    for &member in &net.members {
        if let Some((x, y)) = design.member_point(member) {
            min_x = min_x.min(x);
            max_x = max_x.max(x);
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }
    }

    if min_x.is_infinite() {
        return 0.0;
    }
    (max_x - min_x) + (max_y - min_y)
}

/// Counts net-sharing block pairs that abut along a long edge: vertically
/// aligned and separated by exactly the taller block's height, or
/// horizontally aligned and separated by exactly the wider block's width.
pub fn adjacent_long_edge_bonus(design: &Design) -> f64 {
    let mut bonus = 0.0;
    for net in &design.nets {
        let blocks: Vec<&Block> = net
            .members
            .iter()
            .filter_map(|&m| match m {
                NetMember::Block(id) => Some(design.block(id)),
                NetMember::Terminal(_) => None,
            })
            .filter(|b| b.placed)
            .collect();
        for i in 0..blocks.len() {
            for j in (i + 1)..blocks.len() {
                let (a, b) = (blocks[i], blocks[j]);
                if a.id == b.id {
                    continue;
                }
                let stacked = a.x == b.x && (a.y - b.y).abs() == a.height.max(b.height);
                let side_by_side = a.y == b.y && (a.x - b.x).abs() == a.width.max(b.width);
                if stacked || side_by_side {
                    bonus += 1.0;
                }
            }
        }
    }
    bonus
}
