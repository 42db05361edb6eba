//! The packing engine: lower bounds, the layer-construction heuristic, the
//! fit tester and the branch-and-bound search, tied together by [`solve`].

mod bounds;
pub mod fits;
mod layers;
mod mode;
mod search;
mod stats;

#[doc(inline)]
pub use bounds::lower_bound;
#[doc(inline)]
pub use layers::{LayerPacking, build_layers};
#[doc(inline)]
pub use mode::PackingMode;
#[doc(inline)]
pub use stats::SearchStatistics;

use crate::entities::{Instance, Solution, SolutionOrigin};
use crate::solver::search::{BranchAndBound, Incumbent};
use crate::util::assertions;
use log::info;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Budgets for one solver invocation. A value of `0` means unbounded.
/// Exhausting a budget is not a failure: the search halts and reports the
/// best solution found, flagged as not proven optimal.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct Limits {
    pub max_nodes: u64,
    pub max_iterations: u64,
    pub max_time_secs: u64,
}

impl Limits {
    pub(crate) fn time_limit(&self) -> Option<Duration> {
        (self.max_time_secs > 0).then(|| Duration::from_secs(self.max_time_secs))
    }
}

/// Packs all items of `instance` into a minimum number of bins.
///
/// The layer heuristic establishes an initial solution, the bound estimator
/// an initial lower bound; if they disagree, the branch-and-bound search
/// runs until optimality is proven or a budget of `limits` is exhausted.
///
/// The returned solution is always feasible. `lower_bound == n_bins` holds
/// exactly when `stopped == false`, certifying optimality.
pub fn solve(instance: &Instance, limits: Limits, mode: PackingMode) -> Solution {
    let run_start = Instant::now();
    let mut stats = SearchStatistics::default();

    if instance.n_items() == 0 {
        stats.total_time = run_start.elapsed();
        return Solution {
            placements: vec![],
            n_bins: 0,
            lower_bound: 0,
            stopped: false,
            origin: SolutionOrigin::LayerHeuristic,
            stats,
        };
    }

    let heuristic_start = Instant::now();
    let layer_packing = build_layers(instance);
    stats.heuristic_time = heuristic_start.elapsed();

    let root_lb = lower_bound(&instance.items, &instance.bin);
    debug_assert!(assertions::placements_feasible(
        &layer_packing.placements,
        instance
    ));

    let mut incumbent = Incumbent {
        n_bins: layer_packing.n_bins,
        placements: layer_packing.placements,
        origin: SolutionOrigin::LayerHeuristic,
    };

    let mut stopped = false;
    if incumbent.n_bins > root_lb {
        let search_start = Instant::now();
        let mut search = BranchAndBound::new(instance, mode, limits, &layer_packing.order, root_lb);
        stopped = search.run(&mut incumbent, &mut stats);
        match mode {
            PackingMode::Robot => stats.robot_time = search_start.elapsed(),
            PackingMode::General => stats.general_time = search_start.elapsed(),
        }
    }

    // exhaustion proves the incumbent optimal; otherwise the root bound is
    // the strongest certificate available
    let lower_bound = match stopped {
        false => incumbent.n_bins,
        true => root_lb,
    };

    assert!(
        lower_bound <= incumbent.n_bins,
        "lower bound {lower_bound} exceeds the solution bin count {}",
        incumbent.n_bins
    );
    assert!(
        assertions::placements_feasible(&incumbent.placements, instance),
        "solver produced an infeasible packing"
    );

    stats.total_time = run_start.elapsed();
    info!(
        "[SOLVE] {:?} mode: {} bins (lb {}, {}) in {:.3}ms",
        mode,
        incumbent.n_bins,
        lower_bound,
        if stopped { "stopped" } else { "proven optimal" },
        stats.total_time.as_secs_f64() * 1000.0,
    );

    Solution {
        placements: incumbent.placements,
        n_bins: incumbent.n_bins,
        lower_bound,
        stopped,
        origin: incumbent.origin,
        stats,
    }
}
