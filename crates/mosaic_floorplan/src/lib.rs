//! Fixed-outline floorplanning engine.
//!
//! A design enters with blocks, terminals, and nets; the engine packs the
//! blocks inside the outline with a greedy initial placement, refines the
//! result with simulated annealing, and reports the best placement found.
//! Placement quality is the weighted blend defined in [`cost`].
//!
//! The entry point is [`floorplan`]; the lower-level pieces (the packing
//! tree, the move log, the cost model) are public for callers that want
//! to drive the search themselves.

#![warn(missing_docs)]

pub mod anneal;
pub mod cost;
pub mod init;
pub mod moves;
pub mod report;
pub mod tree;

pub use anneal::{anneal, AnnealOutcome, AnnealSchedule};
pub use cost::{CostModel, CostWeights};
pub use init::initial_placement;
pub use moves::{Move, MoveLog};
pub use report::{BlockPlacement, FloorplanResult};
pub use tree::{ChildSlot, PackingTree};

use mosaic_common::result::{InternalError, MosaicResult};
use mosaic_diagnostics::{Diagnostic, DiagnosticSink};
use mosaic_geom::Design;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Instant;

/// Knobs for one end-to-end run.
#[derive(Debug, Clone, Copy, Default)]
pub struct FloorplanParams {
    /// Cost-term weights.
    pub weights: CostWeights,
    /// Annealing schedule.
    pub schedule: AnnealSchedule,
    /// Seed for the run's random source; a fresh entropy seed when unset.
    pub seed: Option<u64>,
}

/// Runs the full pipeline on a design: initial placement, annealing, and
/// final validation. Blocks that end up unplaced or invalid are reported
/// as errors on the sink; the returned summary covers whatever was placed.
pub fn floorplan(
    design: &mut Design,
    params: &FloorplanParams,
    sink: &DiagnosticSink,
) -> MosaicResult<FloorplanResult> {
    if design.block_count() == 0 {
        return Err(InternalError::new("design has no blocks"));
    }
    let start = Instant::now();
    let mut rng = match params.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut tree = PackingTree::new();
    initial_placement(design, &mut tree, &mut rng, sink);

    let model = CostModel::new(design, params.weights);
    let outcome = anneal(design, &mut tree, &model, &params.schedule, &mut rng);
    sink.emit(Diagnostic::note(if outcome.converged {
        format!("annealing converged after {} sweeps", outcome.sweeps)
    } else {
        format!("annealing stopped after {} sweeps", outcome.sweeps)
    }));

    for id in design.block_ids() {
        let block = design.block(id);
        if !block.placed {
            sink.emit(
                Diagnostic::error("block could not be placed")
                    .with_subject(block.name.clone()),
            );
        } else if !cost::is_valid(design, id) {
            sink.emit(
                Diagnostic::error("final position leaves the outline or overlaps a neighbor")
                    .with_subject(block.name.clone()),
            );
        }
    }

    Ok(FloorplanResult::from_design(design, &model, start.elapsed()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mosaic_parser::{parse_block_str, parse_net_str};

    const BLOCKS: &str = "\
Outline: 150 150
NumBlocks: 3
NumTerminals: 2
bk1 40 30
bk2 50 60
bk3 20 80
p1 terminal 150 150
p2 terminal 0 150
";

    const NETS: &str = "\
NumNets: 2
NetDegree: 2
bk1
bk2
NetDegree: 3
bk2
bk3
p1
";

    fn sample_design(sink: &DiagnosticSink) -> Design {
        let mut design = parse_block_str(BLOCKS, sink).unwrap();
        parse_net_str(NETS, &mut design, sink).unwrap();
        design
    }

    fn fast_params(seed: u64) -> FloorplanParams {
        FloorplanParams {
            seed: Some(seed),
            schedule: AnnealSchedule {
                iterations: 100,
                ..AnnealSchedule::default()
            },
            ..FloorplanParams::default()
        }
    }

    #[test]
    fn pipeline_places_every_block() {
        let sink = DiagnosticSink::new();
        let mut design = sample_design(&sink);
        let result = floorplan(&mut design, &fast_params(7), &sink).unwrap();

        assert!(!sink.has_errors());
        assert!(design.is_fully_placed());
        assert_eq!(result.blocks.len(), 3);
        assert_eq!((result.width, result.height), (150, 150));
        assert!(result.area <= 150 * 150);
        for id in design.block_ids() {
            assert!(cost::is_valid(&design, id));
        }
    }

    #[test]
    fn same_seed_same_result() {
        let sink = DiagnosticSink::new();
        let mut d1 = sample_design(&sink);
        let r1 = floorplan(&mut d1, &fast_params(1234), &sink).unwrap();
        let mut d2 = sample_design(&sink);
        let r2 = floorplan(&mut d2, &fast_params(1234), &sink).unwrap();

        assert_eq!(r1.cost, r2.cost);
        assert_eq!(r1.blocks.len(), r2.blocks.len());
        for (a, b) in r1.blocks.iter().zip(r2.blocks.iter()) {
            assert_eq!(a, b);
        }
    }

    #[test]
    fn empty_design_is_an_error() {
        let sink = DiagnosticSink::new();
        let mut design = Design::new(mosaic_geom::Outline::new(10, 10));
        assert!(floorplan(&mut design, &FloorplanParams::default(), &sink).is_err());
    }

    #[test]
    fn oversized_block_surfaces_as_error() {
        let sink = DiagnosticSink::new();
        let blocks = "\
Outline: 50 50
NumBlocks: 2
NumTerminals: 0
giant 80 80
bk1 20 20
";
        let mut design = parse_block_str(blocks, &sink).unwrap();
        let result = floorplan(&mut design, &fast_params(3), &sink).unwrap();

        assert!(sink.has_errors());
        assert_eq!(result.blocks.len(), 1);
        assert!(!design.is_fully_placed());
    }
}
