//! Simulated-annealing refinement of a packed placement.
//!
//! Each sweep gives every placed block one trial move: a rotation with
//! small probability, otherwise a one-unit nudge toward the origin. A
//! trial that breaks validity is rolled back outright; a valid trial is
//! accepted by the Metropolis criterion against the best cost seen so
//! far. The temperature cools geometrically after every trial, including
//! rolled-back ones, so the schedule length is independent of the
//! acceptance rate. The run ends early once the last ten sweep-end best
//! costs sum to within `1e-9` of ten times the oldest of them.
//!
//! The best geometry ever seen is snapshotted and restored at the end,
//! so a late uphill wander can never degrade the returned placement.

use crate::cost::{is_valid, CostModel};
use crate::moves::MoveLog;
use crate::tree::PackingTree;
use mosaic_geom::{BlockId, Design};
use rand::Rng;
use std::collections::VecDeque;
use std::time::Instant;

/// Probability that a trial move is a rotation rather than a nudge.
const ROTATE_PROBABILITY: f64 = 0.1;
/// Number of trailing sweep-end best costs inspected for convergence.
const CONVERGENCE_WINDOW: usize = 10;
/// The window is flat when its sum is within this of the window length
/// times its oldest entry.
const CONVERGENCE_EPSILON: f64 = 1e-9;

/// Cooling schedule parameters.
#[derive(Debug, Clone, Copy)]
pub struct AnnealSchedule {
    /// Starting temperature.
    pub temperature: f64,
    /// Geometric cooling factor, strictly between 0 and 1.
    pub cooling: f64,
    /// Maximum number of sweeps.
    pub iterations: usize,
    /// Optional wall-clock cutoff checked between sweeps.
    pub deadline: Option<Instant>,
}

impl Default for AnnealSchedule {
    fn default() -> Self {
        Self {
            temperature: 1000.0,
            cooling: 0.95,
            iterations: 1000,
            deadline: None,
        }
    }
}

/// What a finished annealing run reports.
#[derive(Debug, Clone, Copy)]
pub struct AnnealOutcome {
    /// Cost of the placement left in the design.
    pub best_cost: f64,
    /// Sweeps actually run.
    pub sweeps: usize,
    /// Trials accepted.
    pub accepted: usize,
    /// Valid trials rejected by the Metropolis test.
    pub rejected: usize,
    /// Whether the run stopped because the best cost went flat.
    pub converged: bool,
}

/// Refines the placement in `design` and returns run statistics.
///
/// Only placed blocks participate; unplaced ones are never touched. On
/// return the design holds the best geometry encountered, not the last.
pub fn anneal(
    design: &mut Design,
    tree: &mut PackingTree,
    model: &CostModel,
    schedule: &AnnealSchedule,
    rng: &mut impl Rng,
) -> AnnealOutcome {
    let participants: Vec<BlockId> = design
        .block_ids()
        .filter(|&id| design.block(id).placed)
        .collect();

    let mut log = MoveLog::new();
    let mut temperature = schedule.temperature;
    let mut best_cost = model.cost(design);
    let mut best_blocks = design.blocks.clone();
    let mut history: VecDeque<f64> = VecDeque::with_capacity(CONVERGENCE_WINDOW);
    let mut accepted = 0;
    let mut rejected = 0;
    let mut sweeps = 0;
    let mut converged = false;

    for _ in 0..schedule.iterations {
        for &id in &participants {
            if rng.gen::<f64>() < ROTATE_PROBABILITY {
                log.rotate(design, id);
            } else if rng.gen::<bool>() {
                log.translate(design, id, -1, 0);
            } else {
                log.translate(design, id, 0, -1);
            }

            if !is_valid(design, id) {
                log.undo_last(design, tree);
                temperature *= schedule.cooling;
                continue;
            }

            let cost = model.cost(design);
            let delta = cost - best_cost;
            if delta < 0.0 || rng.gen::<f64>() < (-delta / temperature).exp() {
                log.commit_last();
                accepted += 1;
                if cost < best_cost {
                    best_cost = cost;
                    best_blocks = design.blocks.clone();
                }
            } else {
                log.undo_last(design, tree);
                rejected += 1;
            }
            temperature *= schedule.cooling;
        }
        sweeps += 1;

        if history.len() == CONVERGENCE_WINDOW {
            history.pop_front();
        }
        history.push_back(best_cost);
        if history.len() == CONVERGENCE_WINDOW {
            if let Some(&oldest) = history.front() {
                let sum: f64 = history.iter().sum();
                if (CONVERGENCE_WINDOW as f64 * oldest - sum).abs() < CONVERGENCE_EPSILON {
                    converged = true;
                    break;
                }
            }
        }

        if let Some(deadline) = schedule.deadline {
            if Instant::now() >= deadline {
                break;
            }
        }
    }

    design.blocks = best_blocks;
    AnnealOutcome {
        best_cost,
        sweeps,
        accepted,
        rejected,
        converged,
    }
}
