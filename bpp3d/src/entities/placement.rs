use crate::entities::Item;
use crate::geometry::primitives::{Cuboid, Point3};

/// Assignment of one [`Item`] to a position inside a bin instance.
/// `position` is the lower corner (minimum coordinates) of the item.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub item_id: usize,
    /// Sequential number of the bin instance the item is placed in, starting at 0
    pub bin_no: usize,
    pub position: Point3,
}

impl Placement {
    /// The space occupied by `item` under this placement.
    pub fn occupied_space(&self, item: &Item) -> Cuboid {
        debug_assert_eq!(self.item_id, item.id);
        Cuboid::from_corner(self.position, item.width, item.height, item.depth)
    }
}
