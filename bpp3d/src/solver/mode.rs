use crate::geometry::EPS;
use crate::geometry::primitives::{Cuboid, Point3};
use serde::{Deserialize, Serialize};

/// Which family of packings the solver is allowed to produce.
/// Fixed for a whole run; the mode only changes which candidate placement
/// points are admissible, all other components are mode-agnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackingMode {
    /// Placements must admit a monotone pick-and-place order: an item may
    /// only be loaded at a point on the staircase frontier of the items
    /// already in the bin. Required when a robot arm loads the bin.
    Robot,
    /// Any axis-aligned, non-overlapping placement is allowed.
    General,
}

impl PackingMode {
    /// Whether an item may be loaded with its lower corner at `point`, given
    /// the items already placed in the same bin (in load order).
    ///
    /// In robot mode, a point is unreachable if some earlier item extends
    /// strictly beyond it on all three axes: the arm would have to pass
    /// through that item's space to reach the point. This rejects, for
    /// example, slipping an item underneath an overhanging one.
    #[inline]
    pub fn admits(&self, point: Point3, placed: &[Cuboid]) -> bool {
        match self {
            PackingMode::General => true,
            PackingMode::Robot => !placed.iter().any(|c| {
                c.x_max > point.x() + EPS
                    && c.y_max > point.y() + EPS
                    && c.z_max > point.z() + EPS
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn robot_rejects_under_shelf_placement() {
        // a shelf hovering at y = 1, covering the full floor below it
        let shelf = Cuboid::from_corner(Point3(0.0, 1.0, 0.0), 2.0, 1.0, 2.0);
        let under = Point3::ORIGIN;
        assert!(!PackingMode::Robot.admits(under, &[shelf]));
        assert!(PackingMode::General.admits(under, &[shelf]));
    }

    #[test]
    fn robot_accepts_stacking_on_top() {
        let base = Cuboid::from_corner(Point3::ORIGIN, 2.0, 1.0, 2.0);
        let on_top = Point3(0.0, 1.0, 0.0);
        assert!(PackingMode::Robot.admits(on_top, &[base]));
    }

    #[test]
    fn robot_accepts_side_by_side() {
        let left = Cuboid::from_corner(Point3::ORIGIN, 1.0, 2.0, 2.0);
        let beside = Point3(1.0, 0.0, 0.0);
        assert!(PackingMode::Robot.admits(beside, &[left]));
    }
}
