//! Exact and heuristic engine for the three-dimensional bin packing problem:
//! packing a set of rectangular items into a minimum number of identical bins
//! under orthogonal, non-rotated placement.
//!
//! The crate provides a layer-building heuristic to establish an initial
//! solution, lower bounds derived from volume and dimension projections, and a
//! depth-first branch-and-bound search that proves optimality or returns the
//! best solution found within the configured budgets. Both robot packings
//! (placements reachable by a monotone pick-and-place order) and general
//! packings are supported.

pub mod entities;
pub mod geometry;
pub mod solver;
pub mod util;
