use crate::geometry::EPS;
use crate::geometry::primitives::Point3;

/// Axis-aligned cuboid, defined by its two extreme corners.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cuboid {
    pub x_min: f64,
    pub y_min: f64,
    pub z_min: f64,
    pub x_max: f64,
    pub y_max: f64,
    pub z_max: f64,
}

impl Cuboid {
    /// Cuboid with lower corner `corner` and extents (`width`, `height`, `depth`).
    pub fn from_corner(corner: Point3, width: f64, height: f64, depth: f64) -> Self {
        Cuboid {
            x_min: corner.x(),
            y_min: corner.y(),
            z_min: corner.z(),
            x_max: corner.x() + width,
            y_max: corner.y() + height,
            z_max: corner.z() + depth,
        }
    }

    #[inline(always)]
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    #[inline(always)]
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    #[inline(always)]
    pub fn depth(&self) -> f64 {
        self.z_max - self.z_min
    }

    pub fn volume(&self) -> f64 {
        self.width() * self.height() * self.depth()
    }

    pub fn lower_corner(&self) -> Point3 {
        Point3(self.x_min, self.y_min, self.z_min)
    }

    /// Whether the interiors of `self` and `other` intersect.
    /// Touching faces or edges do not count as an overlap.
    #[inline(always)]
    pub fn overlaps(&self, other: &Cuboid) -> bool {
        f64::max(self.x_min, other.x_min) < f64::min(self.x_max, other.x_max) - EPS
            && f64::max(self.y_min, other.y_min) < f64::min(self.y_max, other.y_max) - EPS
            && f64::max(self.z_min, other.z_min) < f64::min(self.z_max, other.z_max) - EPS
    }

    /// Whether `other` lies fully within `self` (shared boundaries allowed).
    #[inline(always)]
    pub fn contains(&self, other: &Cuboid) -> bool {
        self.x_min <= other.x_min + EPS
            && self.y_min <= other.y_min + EPS
            && self.z_min <= other.z_min + EPS
            && self.x_max >= other.x_max - EPS
            && self.y_max >= other.y_max - EPS
            && self.z_max >= other.z_max - EPS
    }

    /// Whether `point` lies strictly in the interior of `self`.
    #[inline(always)]
    pub fn interior_contains(&self, point: Point3) -> bool {
        point.x() > self.x_min - EPS
            && point.x() < self.x_max - EPS
            && point.y() > self.y_min - EPS
            && point.y() < self.y_max - EPS
            && point.z() > self.z_min - EPS
            && point.z() < self.z_max - EPS
    }
}
