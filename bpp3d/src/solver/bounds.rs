use crate::entities::{Bin, Item};
use crate::geometry::{Axis, EPS};

/// Computes a lower bound on the number of bins needed to pack `items`.
///
/// The bound is the maximum of the continuous volume bound and a projection
/// bound per axis: items wider than half the bin on both cross axes can
/// never share a cross-section, so they must be stacked along the remaining
/// axis and their summed extents bound the number of bins from below.
///
/// The result never overestimates the true minimum, and it is monotone:
/// extending the item set can only raise it. Both properties are relied upon
/// for pruning during the branch-and-bound search. The bound is a pure
/// function of the item multiset, independent of item order.
pub fn lower_bound(items: &[Item], bin: &Bin) -> usize {
    if items.is_empty() {
        return 0;
    }

    let total_volume: f64 = items.iter().map(|item| item.volume()).sum();
    let volume_bound = ceil_div(total_volume, bin.volume());

    let projection_bound = Axis::ALL
        .iter()
        .map(|&axis| projection_bound(items, bin, axis))
        .max()
        .unwrap_or(0);

    volume_bound.max(projection_bound).max(1)
}

/// Bound from items that monopolize the cross-section orthogonal to `axis`:
/// within a single bin, such items are forced into a stack along `axis`.
fn projection_bound(items: &[Item], bin: &Bin, axis: Axis) -> usize {
    let (u, v) = axis.cross();
    let stacked_extent: f64 = items
        .iter()
        .filter(|item| {
            item.extent(u) > bin.extent(u) / 2.0 + EPS
                && item.extent(v) > bin.extent(v) / 2.0 + EPS
        })
        .map(|item| item.extent(axis))
        .sum();

    ceil_div(stacked_extent, bin.extent(axis))
}

fn ceil_div(quantity: f64, capacity: f64) -> usize {
    (quantity / capacity - EPS).ceil().max(0.0) as usize
}
