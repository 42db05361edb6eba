use std::time::Duration;

/// Counters accumulated over one solver invocation.
///
/// `nodes` and `iterations` count branch-and-bound node expansions and
/// candidate placements tried; `sub_nodes` and `sub_iterations` count the
/// construction attempts and point probes inside the general fit test.
#[derive(Clone, Copy, Debug, Default)]
pub struct SearchStatistics {
    pub nodes: u64,
    pub sub_nodes: u64,
    pub iterations: u64,
    pub sub_iterations: u64,
    pub calls_fits_two: u64,
    pub calls_fits_three: u64,
    pub calls_fits_more: u64,
    /// Time spent building the initial solution with the layer heuristic
    pub heuristic_time: Duration,
    /// Time spent in the search, when solving in robot mode
    pub robot_time: Duration,
    /// Time spent in the search, when solving in general mode
    pub general_time: Duration,
    pub total_time: Duration,
}
