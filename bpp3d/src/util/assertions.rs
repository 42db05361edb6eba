//! Predicates used in assertions throughout the solver.
//! They favor clarity over speed and should not be called on hot paths
//! outside of `assert!` and `debug_assert!`.

use crate::entities::{Instance, Placement};
use crate::geometry::EPS;
use itertools::Itertools;

/// Whether `placements` is a complete, feasible packing of `instance`:
/// every item placed exactly once, every item inside its bin, no two items
/// of the same bin overlapping, and bins numbered contiguously from 0.
pub fn placements_feasible(placements: &[Placement], instance: &Instance) -> bool {
    if placements.len() != instance.n_items() {
        return false;
    }
    let ids = placements.iter().map(|p| p.item_id).sorted().collect_vec();
    if ids != (0..instance.n_items()).collect_vec() {
        return false;
    }

    let bin_interior = instance.bin.interior();
    let boxes = placements
        .iter()
        .map(|p| (p.bin_no, p.occupied_space(instance.item(p.item_id))))
        .collect_vec();

    if !boxes.iter().all(|(_, cuboid)| bin_interior.contains(cuboid)) {
        return false;
    }

    for ((bin_a, a), (bin_b, b)) in boxes.iter().tuple_combinations() {
        if bin_a == bin_b && a.overlaps(b) {
            return false;
        }
    }

    if !placements.is_empty() {
        let max_bin = placements.iter().map(|p| p.bin_no).max().unwrap();
        let used = placements.iter().map(|p| p.bin_no).unique().count();
        if used != max_bin + 1 {
            return false;
        }
    }

    true
}

/// Number of distinct bins referenced by `placements`.
pub fn bins_used(placements: &[Placement]) -> usize {
    placements.iter().map(|p| p.bin_no).unique().count()
}

/// Whether loading the items of each bin in the order they appear in
/// `placements` never requires passing through an already loaded item.
pub fn robot_loadable(placements: &[Placement], instance: &Instance) -> bool {
    let n_bins = bins_used(placements);
    for bin_no in 0..n_bins {
        let mut loaded = vec![];
        for p in placements.iter().filter(|p| p.bin_no == bin_no) {
            let blocked = loaded.iter().any(|c: &crate::geometry::primitives::Cuboid| {
                c.x_max > p.position.x() + EPS
                    && c.y_max > p.position.y() + EPS
                    && c.z_max > p.position.z() + EPS
            });
            if blocked {
                return false;
            }
            loaded.push(p.occupied_space(instance.item(p.item_id)));
        }
    }
    true
}
