pub mod primitives;

/// Tolerance used for all coordinate comparisons.
/// Item and bin dimensions are expected to be in the order of magnitude of
/// centimeters, so this is far below any meaningful difference.
pub const EPS: f64 = 1e-9;

/// The three axes of a bin: `X` = width, `Y` = height, `Z` = depth.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    #[inline(always)]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// The two axes spanning the cross-section orthogonal to `self`.
    #[inline(always)]
    pub fn cross(self) -> (Axis, Axis) {
        match self {
            Axis::X => (Axis::Y, Axis::Z),
            Axis::Y => (Axis::X, Axis::Z),
            Axis::Z => (Axis::X, Axis::Y),
        }
    }
}
