//! Parametric rays in globe-centered Cartesian space.

use glam::DVec3;

/// A line `origin + t * direction`.
///
/// The direction is not required to be unit length.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line {
    /// Point at `t = 0`.
    pub origin: DVec3,
    /// Displacement per unit of `t`.
    pub direction: DVec3,
}

impl Line {
    /// Construct a line from an origin and a direction.
    #[must_use]
    pub const fn new(origin: DVec3, direction: DVec3) -> Self {
        Self { origin, direction }
    }

    /// A ray leaving the globe's center in the given direction.
    #[must_use]
    pub const fn from_center(direction: DVec3) -> Self {
        Self::new(DVec3::ZERO, direction)
    }

    /// The point at parameter `t`.
    #[inline]
    #[must_use]
    pub fn point_at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }

    /// Returns true if the direction has zero length, in which case the line
    /// is a single point and cannot be intersected meaningfully.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.direction.length_squared() == 0.0
    }
}
