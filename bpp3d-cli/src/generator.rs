//! Random instance generation for benchmarking the solver: a fixed
//! catalogue of carton sizes distributed over a requested item count, packed
//! into one of four truck-sized bins.

use anyhow::{Result, bail};
use bpp3d::entities::{Bin, Instance};
use rand::Rng;

/// Bin dimensions per truck type, in centimeters
pub const TRUCK_TYPES: [(f64, f64, f64); 4] = [
    (240.0, 290.0, 420.0),
    (240.0, 270.0, 680.0),
    (240.0, 270.0, 960.0),
    (240.0, 250.0, 1350.0),
];

/// Carton dimensions of the goods catalogue, in centimeters
pub const CARTON_TYPES: [(f64, f64, f64); 7] = [
    (25.0, 22.0, 37.0),
    (20.5, 22.5, 34.0),
    (21.0, 21.5, 34.0),
    (18.5, 21.5, 30.0),
    (22.0, 21.5, 34.5),
    (18.5, 21.5, 24.0),
    (24.0, 22.5, 35.5),
];

/// Generates an instance of `n_items` cartons drawn uniformly from the
/// catalogue, to be packed into bins of the given truck type (1-based).
pub fn random_instance(n_items: usize, truck_type: usize, rng: &mut impl Rng) -> Result<Instance> {
    let Some(&(bin_w, bin_h, bin_d)) = TRUCK_TYPES.get(truck_type.wrapping_sub(1)) else {
        bail!(
            "unknown truck type {truck_type}, expected 1..={}",
            TRUCK_TYPES.len()
        );
    };
    let bin = Bin::new(bin_w, bin_h, bin_d)?;

    let dims: Vec<(f64, f64, f64)> = (0..n_items)
        .map(|_| CARTON_TYPES[rng.random_range(0..CARTON_TYPES.len())])
        .collect();

    Instance::from_dims(&dims, bin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::prelude::SmallRng;

    #[test]
    fn generates_requested_item_count() {
        let mut rng = SmallRng::seed_from_u64(0);
        let instance = random_instance(50, 1, &mut rng).unwrap();
        assert_eq!(instance.n_items(), 50);
        assert!(instance.items.iter().all(|item| item.fits_in(&instance.bin)));
    }

    #[test]
    fn rejects_unknown_truck_type() {
        let mut rng = SmallRng::seed_from_u64(0);
        assert!(random_instance(10, 0, &mut rng).is_err());
        assert!(random_instance(10, 5, &mut rng).is_err());
    }
}
