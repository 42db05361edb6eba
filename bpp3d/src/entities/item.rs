use crate::entities::Bin;
use crate::geometry::{Axis, EPS};

/// Rectangular item to be packed into a [`Bin`].
/// Dimensions are fixed for the whole run; rotation is not supported.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Item {
    /// Index of the item in the original input
    pub id: usize,
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

impl Item {
    pub fn new(id: usize, width: f64, height: f64, depth: f64) -> Item {
        Item {
            id,
            width,
            height,
            depth,
        }
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

    /// Whether the item fits in `bin` in its fixed orientation.
    pub fn fits_in(&self, bin: &Bin) -> bool {
        Axis::ALL
            .iter()
            .all(|&axis| self.extent(axis) <= bin.extent(axis) + EPS)
    }
}
