use crate::entities::{Bin, Item};
use anyhow::{Result, ensure};

/// Immutable description of a bin packing problem: the items to pack and the
/// dimensions of the (homogeneous) bins.
///
/// Construction validates all input: every dimension must be positive and no
/// item may exceed the bin on any axis. Invalid input is rejected here,
/// before any search is started.
#[derive(Clone, Debug)]
pub struct Instance {
    pub items: Vec<Item>,
    pub bin: Bin,
}

impl Instance {
    pub fn new(items: Vec<Item>, bin: Bin) -> Result<Instance> {
        for (i, item) in items.iter().enumerate() {
            ensure!(
                item.id == i,
                "item ids must match their position in the input: expected {i}, got {}",
                item.id
            );
            ensure!(
                item.width > 0.0 && item.height > 0.0 && item.depth > 0.0,
                "item {i} has non-positive dimensions: ({}, {}, {})",
                item.width,
                item.height,
                item.depth
            );
            ensure!(
                item.fits_in(&bin),
                "item {i} with dimensions ({}, {}, {}) exceeds the bin ({}, {}, {})",
                item.width,
                item.height,
                item.depth,
                bin.width,
                bin.height,
                bin.depth
            );
        }
        Ok(Instance { items, bin })
    }

    /// Builds an instance from raw `(width, height, depth)` triples,
    /// assigning ids by input position.
    pub fn from_dims(dims: &[(f64, f64, f64)], bin: Bin) -> Result<Instance> {
        let items = dims
            .iter()
            .enumerate()
            .map(|(id, &(w, h, d))| Item::new(id, w, h, d))
            .collect();
        Instance::new(items, bin)
    }

    pub fn item(&self, id: usize) -> &Item {
        &self.items[id]
    }

    pub fn n_items(&self) -> usize {
        self.items.len()
    }

    pub fn total_item_volume(&self) -> f64 {
        self.items.iter().map(|item| item.volume()).sum()
    }
}
