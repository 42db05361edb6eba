use crate::entities::{Instance, Placement};
use crate::geometry::{Axis, EPS};
use crate::geometry::primitives::Point3;
use itertools::Itertools;
use log::debug;
use ordered_float::OrderedFloat;

/// A feasible packing produced by the layer heuristic, together with the
/// item order it used. The order seeds the branching order of the search.
#[derive(Clone, Debug)]
pub struct LayerPacking {
    pub placements: Vec<Placement>,
    pub n_bins: usize,
    /// Item ids in the order they were placed
    pub order: Vec<usize>,
    /// The axis along which bins were sliced into layers
    pub layer_axis: Axis,
}

/// Builds an initial feasible solution by slicing bins into layers.
///
/// Each candidate axis is tried as the layer axis and the best result is
/// kept. Items are sorted by decreasing extent along the layer axis; a layer
/// is opened with the depth of its first item and its cross-section is
/// filled with a shelf policy. A new bin is opened once the current one has
/// no room for another layer.
///
/// The result is strictly feasible but makes no optimality claim; it serves
/// as the initial incumbent and as the source of the branching order.
pub fn build_layers(instance: &Instance) -> LayerPacking {
    let best = Axis::ALL
        .iter()
        .map(|&axis| pack_along(instance, axis))
        .min_by_key(|packing| packing.n_bins)
        .expect("at least one layer axis");

    debug!(
        "[LAYERS] initial solution: {} bins, layers along {:?}",
        best.n_bins, best.layer_axis
    );
    best
}

/// Packs all items into layers stacked along `layer_axis`.
fn pack_along(instance: &Instance, layer_axis: Axis) -> LayerPacking {
    let (axis_u, axis_v) = layer_axis.cross();
    let bin = &instance.bin;
    let (cap_l, cap_u, cap_v) = (
        bin.extent(layer_axis),
        bin.extent(axis_u),
        bin.extent(axis_v),
    );

    // decreasing layer-axis extent, ties broken by volume
    let order = instance
        .items
        .iter()
        .sorted_by_key(|item| {
            (
                OrderedFloat(-item.extent(layer_axis)),
                OrderedFloat(-item.volume()),
            )
        })
        .map(|item| item.id)
        .collect_vec();

    let mut placements = Vec::with_capacity(instance.n_items());
    let mut bin_no = 0;
    let mut layer_pos = 0.0; // start of the current layer along the layer axis
    let mut layer_depth = 0.0;
    let mut shelf_pos = 0.0; // start of the current shelf along axis_v
    let mut shelf_depth = 0.0;
    let mut cursor = 0.0; // fill position within the shelf, along axis_u

    for &id in &order {
        let item = instance.item(id);
        let (e_l, e_u, e_v) = (
            item.extent(layer_axis),
            item.extent(axis_u),
            item.extent(axis_v),
        );

        loop {
            // current shelf
            if e_l <= layer_depth + EPS && cursor + e_u <= cap_u + EPS && shelf_pos + e_v <= cap_v + EPS
            {
                let mut coords = [0.0; 3];
                coords[layer_axis.index()] = layer_pos;
                coords[axis_u.index()] = cursor;
                coords[axis_v.index()] = shelf_pos;
                placements.push(Placement {
                    item_id: id,
                    bin_no,
                    position: Point3::from_coords(coords),
                });
                cursor += e_u;
                shelf_depth = f64::max(shelf_depth, e_v);
                break;
            }
            // next shelf in the same layer
            if e_l <= layer_depth + EPS && shelf_pos + shelf_depth + e_v <= cap_v + EPS {
                shelf_pos += shelf_depth;
                shelf_depth = 0.0;
                cursor = 0.0;
                continue;
            }
            // next layer in the same bin
            if layer_pos + layer_depth + e_l <= cap_l + EPS {
                layer_pos += layer_depth;
                layer_depth = e_l;
                shelf_pos = 0.0;
                shelf_depth = 0.0;
                cursor = 0.0;
                continue;
            }
            // open a new bin
            bin_no += 1;
            layer_pos = 0.0;
            layer_depth = e_l;
            shelf_pos = 0.0;
            shelf_depth = 0.0;
            cursor = 0.0;
        }
    }

    LayerPacking {
        placements,
        n_bins: if instance.n_items() == 0 { 0 } else { bin_no + 1 },
        order,
        layer_axis,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Bin, Instance};
    use crate::util::assertions;

    #[test]
    fn unit_cubes_fill_one_bin() {
        let bin = Bin::new(2.0, 2.0, 2.0).unwrap();
        let dims = vec![(1.0, 1.0, 1.0); 8];
        let instance = Instance::from_dims(&dims, bin).unwrap();
        let packing = build_layers(&instance);
        assert_eq!(packing.n_bins, 1);
        assert!(assertions::placements_feasible(&packing.placements, &instance));
    }

    #[test]
    fn bin_sized_items_get_their_own_bins() {
        let bin = Bin::new(2.0, 3.0, 4.0).unwrap();
        let dims = vec![(2.0, 3.0, 4.0); 3];
        let instance = Instance::from_dims(&dims, bin).unwrap();
        let packing = build_layers(&instance);
        assert_eq!(packing.n_bins, 3);
        assert!(assertions::placements_feasible(&packing.placements, &instance));
    }

    #[test]
    fn mixed_items_stay_feasible() {
        let bin = Bin::new(10.0, 8.0, 6.0).unwrap();
        let dims: Vec<(f64, f64, f64)> = (0..20)
            .map(|i| {
                let w = 1.0 + (i % 5) as f64;
                let h = 1.0 + (i % 4) as f64;
                let d = 1.0 + (i % 3) as f64;
                (w, h, d)
            })
            .collect();
        let instance = Instance::from_dims(&dims, bin).unwrap();
        let packing = build_layers(&instance);
        assert!(packing.n_bins >= 1);
        assert!(assertions::placements_feasible(&packing.placements, &instance));
        assert_eq!(packing.placements.len(), instance.n_items());
    }

    #[test]
    fn order_covers_all_items_once() {
        let bin = Bin::new(5.0, 5.0, 5.0).unwrap();
        let dims = vec![(1.0, 2.0, 3.0), (3.0, 2.0, 1.0), (2.0, 2.0, 2.0)];
        let instance = Instance::from_dims(&dims, bin).unwrap();
        let packing = build_layers(&instance);
        let mut order = packing.order.clone();
        order.sort_unstable();
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn empty_instance_uses_no_bins() {
        let bin = Bin::new(2.0, 2.0, 2.0).unwrap();
        let instance = Instance::from_dims(&[], bin).unwrap();
        let packing = build_layers(&instance);
        assert_eq!(packing.n_bins, 0);
        assert!(packing.placements.is_empty());
    }
}
