/// A point in 3D space (x, y, z).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point3(pub f64, pub f64, pub f64);

impl Point3 {
    pub const ORIGIN: Point3 = Point3(0.0, 0.0, 0.0);

    #[inline(always)]
    pub fn x(self) -> f64 {
        self.0
    }

    #[inline(always)]
    pub fn y(self) -> f64 {
        self.1
    }

    #[inline(always)]
    pub fn z(self) -> f64 {
        self.2
    }

    pub fn from_coords(coords: [f64; 3]) -> Self {
        Point3(coords[0], coords[1], coords[2])
    }
}

impl From<Point3> for (f64, f64, f64) {
    fn from(p: Point3) -> Self {
        (p.0, p.1, p.2)
    }
}
