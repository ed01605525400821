//! Configuration types deserialized from `mosaic.toml`.

use serde::Deserialize;

/// The top-level run configuration parsed from `mosaic.toml`.
#[derive(Debug, Deserialize)]
pub struct FloorplanConfig {
    /// Input and output file paths.
    pub files: FilesConfig,
    /// Simulated annealing schedule.
    #[serde(default)]
    pub anneal: AnnealConfig,
    /// Cost function weights.
    #[serde(default)]
    pub cost: CostConfig,
}

/// Input and output file paths.
#[derive(Debug, Deserialize)]
pub struct FilesConfig {
    /// Path to the `.block` file (outline, blocks, terminals).
    pub blocks: String,
    /// Path to the `.nets` file (connectivity).
    pub nets: String,
    /// Path the result report is written to.
    #[serde(default = "default_output")]
    pub output: String,
}

fn default_output() -> String {
    "floorplan.out".to_string()
}

/// Simulated annealing schedule parameters.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AnnealConfig {
    /// Initial temperature `T0`.
    pub temperature: f64,
    /// Geometric cooling factor applied after every per-block trial.
    pub cooling: f64,
    /// Maximum number of sweeps over the block collection.
    pub iterations: usize,
    /// RNG seed for reproducible runs. Seeded from entropy when absent.
    pub seed: Option<u64>,
}

impl Default for AnnealConfig {
    fn default() -> Self {
        Self {
            temperature: 1000.0,
            cooling: 0.95,
            iterations: 1000,
            seed: None,
        }
    }
}

/// Weights of the scalar cost function.
///
/// The cost is `area_weight * normalized_area + (1 - area_weight) *
/// normalized_wirelength - adjacency_weight * adjacency_bonus`.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CostConfig {
    /// Weight of the normalized area term, in [0, 1]. The wirelength term
    /// gets the complement.
    pub area_weight: f64,
    /// Weight of the adjacent-long-edge bonus, in [0, 1].
    pub adjacency_weight: f64,
}

impl Default for CostConfig {
    fn default() -> Self {
        Self {
            area_weight: 0.5,
            adjacency_weight: 0.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anneal_defaults() {
        let anneal = AnnealConfig::default();
        assert_eq!(anneal.temperature, 1000.0);
        assert_eq!(anneal.cooling, 0.95);
        assert_eq!(anneal.iterations, 1000);
        assert!(anneal.seed.is_none());
    }

    #[test]
    fn cost_defaults() {
        let cost = CostConfig::default();
        assert_eq!(cost.area_weight, 0.5);
        assert_eq!(cost.adjacency_weight, 0.5);
    }
}
