//! Greedy initial placement.
//!
//! Blocks are placed one at a time in descending area order. Each block
//! tries the frontier corners exposed by already-placed blocks and takes
//! the valid corner closest, in summed Manhattan distance, to the blocks
//! already placed; rotation is tried only when no unrotated corner fits.
//! A bounded random search covers the rare case where no frontier corner
//! works. Blocks that still cannot be placed are reported and left
//! unplaced.
//!
//! The placed blocks are then linked into a packing tree in placement
//! order, so the annealer starts from a tree whose packing mirrors the
//! greedy result's structure.

use crate::cost::is_valid;
use crate::tree::PackingTree;
use mosaic_diagnostics::{Diagnostic, DiagnosticSink};
use mosaic_geom::{BlockId, Design};
use rand::Rng;

/// Random-fallback sample count per block.
const MAX_RANDOM_TRIALS: usize = 99;

/// Places every block greedily and links the placed ones into `tree`.
pub fn initial_placement(
    design: &mut Design,
    tree: &mut PackingTree,
    rng: &mut impl Rng,
    sink: &DiagnosticSink,
) {
    let mut order: Vec<BlockId> = design.block_ids().collect();
    order.sort_by_key(|&id| std::cmp::Reverse(design.block(id).area()));

    let mut placed_order: Vec<BlockId> = Vec::with_capacity(order.len());
    for id in order {
        let candidates = frontier_candidates(design);
        let mut done = try_candidates(design, id, &candidates);
        if !done {
            done = random_candidate(design, id, rng);
        }
        if done {
            placed_order.push(id);
        } else {
            sink.emit(
                Diagnostic::warning("no valid position found; block left unplaced")
                    .with_subject(design.block(id).name.clone()),
            );
            design.block_mut(id).placed = false;
        }
    }

    let mut iter = placed_order.into_iter();
    if let Some(first) = iter.next() {
        let root = tree.set_root(first);
        for id in iter {
            tree.insert(root, id, rng);
        }
    }
}

/// Corner positions exposed by placed blocks: to the right of each block
/// and on top of it. An empty design exposes only the origin.
fn frontier_candidates(design: &Design) -> Vec<(i64, i64)> {
    let mut candidates = Vec::new();
    for other in design.blocks.iter().filter(|b| b.placed) {
        candidates.push((other.x_max(), other.y));
        candidates.push((other.x, other.y_max()));
    }
    if candidates.is_empty() {
        candidates.push((0, 0));
    }
    candidates
}

/// Tries every candidate corner, unrotated first, and applies the valid
/// position with the smallest summed distance to the placed blocks.
/// Returns whether the block was placed.
fn try_candidates(design: &mut Design, id: BlockId, candidates: &[(i64, i64)]) -> bool {
    for rotated in [false, true] {
        if rotated {
            design.block_mut(id).rotate();
        }
        let mut best: Option<((i64, i64), i64)> = None;
        for &(x, y) in candidates {
            {
                let block = design.block_mut(id);
                block.x = x;
                block.y = y;
                block.placed = true;
            }
            if is_valid(design, id) {
                let score = cumulative_distance(design, id);
                if best.map_or(true, |(_, s)| score < s) {
                    best = Some(((x, y), score));
                }
            }
            design.block_mut(id).placed = false;
        }
        if let Some(((x, y), _)) = best {
            let block = design.block_mut(id);
            block.x = x;
            block.y = y;
            block.placed = true;
            return true;
        }
        if rotated {
            // Neither orientation fit any corner; undo the trial rotation.
            design.block_mut(id).rotate();
        }
    }
    false
}

/// Samples random in-outline positions for the block. Each sampled
/// position is tried unrotated first, then rotated in place, so a tight
/// spot that only admits the rotated footprint is still found. Positions
/// whose corner falls strictly inside a placed block are skipped before
/// the full validity check. Returns whether the block was placed.
fn random_candidate(design: &mut Design, id: BlockId, rng: &mut impl Rng) -> bool {
    let outline = design.outline;
    let (w, h) = {
        let block = design.block(id);
        (block.width, block.height)
    };
    let fits = |w: i64, h: i64| w <= outline.width && h <= outline.height;
    if !fits(w, h) && !fits(h, w) {
        return false;
    }

    // Sample against the smaller footprint dimension so positions that
    // only the rotated orientation can use stay reachable.
    let min_dim = w.min(h);
    for _ in 0..MAX_RANDOM_TRIALS {
        let x = rng.gen_range(0..=outline.width - min_dim);
        let y = rng.gen_range(0..=outline.height - min_dim);
        let corner_covered = design.blocks.iter().any(|b| {
            b.placed && b.id != id && x > b.x && x < b.x_max() && y > b.y && y < b.y_max()
        });
        if corner_covered {
            continue;
        }
        if try_position(design, id, x, y) {
            return true;
        }
    }
    false
}

/// Tries one fixed position in both orientations, unrotated first.
fn try_position(design: &mut Design, id: BlockId, x: i64, y: i64) -> bool {
    for rotated in [false, true] {
        if rotated {
            design.block_mut(id).rotate();
        }
        let block = design.block_mut(id);
        block.x = x;
        block.y = y;
        block.placed = true;
        if is_valid(design, id) {
            return true;
        }
        design.block_mut(id).placed = false;
        if rotated {
            design.block_mut(id).rotate();
        }
    }
    false
}

/// Sum of Manhattan distances from a block's corner to the corner of
/// every other placed block. The greedy scan keeps the candidate that
/// packs the new block closest to everything already placed.
fn cumulative_distance(design: &Design, id: BlockId) -> i64 {
    let block = design.block(id);
    design
        .blocks
        .iter()
        .filter(|b| b.placed && b.id != id)
        .map(|b| (block.x - b.x).abs() + (block.y - b.y).abs())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mosaic_geom::{Block, Outline};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn places_largest_block_first_at_origin() {
        let mut design = Design::new(Outline::new(100, 100));
        let small = design.add_block(Block::new("bk1", 40, 30));
        let large = design.add_block(Block::new("bk2", 50, 60));
        let mut tree = PackingTree::new();
        let sink = DiagnosticSink::new();
        let mut rng = StdRng::seed_from_u64(11);

        initial_placement(&mut design, &mut tree, &mut rng, &sink);

        assert!(!sink.has_errors());
        assert!(design.is_fully_placed());
        // Largest area first, so bk2 anchors the origin and the root slot.
        let b = design.block(large);
        assert_eq!((b.x, b.y), (0, 0));
        assert_eq!(tree.block_at(tree.root().unwrap()), large);
        assert!(tree.slot_of(small).is_some());
        assert!(is_valid(&design, small));
        assert!(is_valid(&design, large));
    }

    #[test]
    fn every_placed_block_is_valid() {
        let mut design = Design::new(Outline::new(200, 200));
        for (i, (w, h)) in [(40, 30), (50, 60), (20, 80), (70, 10), (30, 30)]
            .into_iter()
            .enumerate()
        {
            design.add_block(Block::new(format!("bk{i}"), w, h));
        }
        let mut tree = PackingTree::new();
        let sink = DiagnosticSink::new();
        let mut rng = StdRng::seed_from_u64(42);

        initial_placement(&mut design, &mut tree, &mut rng, &sink);

        for id in design.block_ids() {
            if design.block(id).placed {
                assert!(is_valid(&design, id), "block {id} placed invalidly");
            }
        }
        assert!(design.is_fully_placed());
        assert_eq!(tree.len(), design.block_count());
    }

    #[test]
    fn oversized_block_warns_and_stays_unplaced() {
        let mut design = Design::new(Outline::new(50, 50));
        let big = design.add_block(Block::new("giant", 80, 80));
        let ok = design.add_block(Block::new("bk1", 20, 20));
        let mut tree = PackingTree::new();
        let sink = DiagnosticSink::new();
        let mut rng = StdRng::seed_from_u64(1);

        initial_placement(&mut design, &mut tree, &mut rng, &sink);

        assert!(!design.block(big).placed);
        assert!(design.block(ok).placed);
        assert!(tree.slot_of(big).is_none());
        let diags = sink.drain();
        assert_eq!(diags.len(), 1);
        assert!(diags[0].message.contains("unplaced"));
    }

    #[test]
    fn frontier_scoring_sums_distance_to_placed_blocks() {
        let mut design = Design::new(Outline::new(100, 100));
        design.add_block(Block::new("bk0", 20, 20));
        design.add_block(Block::new("bk1", 10, 10));
        let small = design.add_block(Block::new("bk2", 5, 5));
        let mut tree = PackingTree::new();
        let sink = DiagnosticSink::new();
        let mut rng = StdRng::seed_from_u64(4);

        initial_placement(&mut design, &mut tree, &mut rng, &sink);

        // bk0 anchors the origin and bk1 lands at (20, 0). bk2's valid
        // corners are (0,20), (30,0), and (20,10) with summed distances
        // 60, 40, and 40 to the two placed blocks; the earliest minimum
        // in scan order wins.
        let c = design.block(small);
        assert_eq!((c.x, c.y), (30, 0));
    }

    #[test]
    fn random_fallback_tries_the_rotated_footprint() {
        // A full-width blocker leaves a 14-high strip. The 12x30 block
        // fits the outline upright but always overlaps the blocker; only
        // its rotated 30x12 footprint can land in the strip.
        let mut design = Design::new(Outline::new(200, 40));
        let blocker = design.add_block(Block::new("blocker", 200, 26));
        let tall = design.add_block(Block::new("tall", 12, 30));
        {
            let b = design.block_mut(blocker);
            b.x = 0;
            b.y = 14;
            b.placed = true;
        }
        let mut rng = StdRng::seed_from_u64(8);

        assert!(random_candidate(&mut design, tall, &mut rng));
        let b = design.block(tall);
        assert!(b.rotated);
        assert_eq!((b.width, b.height), (30, 12));
        assert!(is_valid(&design, tall));
    }

    #[test]
    fn rotation_rescues_a_tall_block() {
        // 10x60 cannot stand in a 40-high outline but fits on its side.
        let mut design = Design::new(Outline::new(100, 40));
        let tall = design.add_block(Block::new("tall", 10, 60));
        let mut tree = PackingTree::new();
        let sink = DiagnosticSink::new();
        let mut rng = StdRng::seed_from_u64(5);

        initial_placement(&mut design, &mut tree, &mut rng, &sink);

        let b = design.block(tall);
        assert!(b.placed);
        assert!(b.rotated);
        assert_eq!((b.width, b.height), (60, 10));
    }
}
