use crate::entities::{Instance, Placement};
use crate::solver::SearchStatistics;

/// Provenance of the best solution found.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolutionOrigin {
    /// The layer-building heuristic; the search never improved on it
    LayerHeuristic,
    /// The branch-and-bound search
    Search,
}

/// Complete result of a solver invocation.
#[derive(Clone, Debug)]
pub struct Solution {
    /// One placement per item of the instance
    pub placements: Vec<Placement>,
    /// Number of bins used (the upper bound Z)
    pub n_bins: usize,
    /// Proven lower bound on the number of bins needed (Lb)
    pub lower_bound: usize,
    /// Whether the search was cut short by a node, iteration or time budget.
    /// If `false` the solution is proven optimal and `lower_bound == n_bins`.
    pub stopped: bool,
    pub origin: SolutionOrigin,
    pub stats: SearchStatistics,
}

impl Solution {
    pub fn is_proven_optimal(&self) -> bool {
        !self.stopped
    }

    /// Fraction of the used bin volume occupied by items.
    pub fn density(&self, instance: &Instance) -> f64 {
        if self.n_bins == 0 {
            return 0.0;
        }
        instance.total_item_volume() / (self.n_bins as f64 * instance.bin.volume())
    }
}
