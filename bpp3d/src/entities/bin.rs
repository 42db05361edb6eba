use crate::geometry::Axis;
use crate::geometry::primitives::{Cuboid, Point3};
use anyhow::{Result, ensure};

/// Dimensions of the rectangular bins. All bins in a packing are identical;
/// bin instances are only distinguished by their sequential number.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bin {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

impl Bin {
    pub fn new(width: f64, height: f64, depth: f64) -> Result<Bin> {
        ensure!(
            width > 0.0 && height > 0.0 && depth > 0.0,
            "bin dimensions must be positive: ({width}, {height}, {depth})"
        );
        Ok(Bin {
            width,
            height,
            depth,
        })
    }

    pub fn volume(&self) -> f64 {
        self.width * self.height * self.depth
    }

    #[inline(always)]
    pub fn extent(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.width,
            Axis::Y => self.height,
            Axis::Z => self.depth,
        }
    }

    /// The interior of a bin instance as a [`Cuboid`] anchored at the origin.
    pub fn interior(&self) -> Cuboid {
        Cuboid::from_corner(Point3::ORIGIN, self.width, self.height, self.depth)
    }
}
