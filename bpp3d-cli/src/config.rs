use bpp3d::solver::{Limits, PackingMode};
use serde::{Deserialize, Serialize};

/// Configuration for the solver harness
#[derive(Debug, Serialize, Deserialize, Clone, Copy)]
pub struct HarnessConfig {
    /// Node, iteration and time budgets for the search; `0` means unbounded
    pub limits: Limits,
    /// The packing mode to solve for
    pub mode: PackingMode,
    /// Additionally solve the other packing mode and report both results
    pub run_both_modes: bool,
    /// Seed for the PRNG of the instance generator. If undefined, the
    /// generator runs in non-deterministic mode using entropy
    pub prng_seed: Option<u64>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            limits: Limits {
                max_nodes: 0,
                max_iterations: 0,
                max_time_secs: 600,
            },
            mode: PackingMode::Robot,
            run_both_modes: false,
            prng_seed: Some(0),
        }
    }
}
