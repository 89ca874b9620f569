//! The globe abstraction consumed by sector subdivision.

use glam::DVec3;
use tessera_math::{Angle, LatLon, Line, Position};

/// A planet shape with terrain.
///
/// Cartesian coordinates are globe-centered with `+y` through the north
/// pole, `+z` through `(0°, 0°)` and `+x` through `(0°, 90°E)`.
pub trait Globe: Send + Sync {
    /// Semi-major axis in meters.
    fn equatorial_radius(&self) -> f64;

    /// Semi-minor axis in meters.
    fn polar_radius(&self) -> f64;

    /// First eccentricity squared, `1 - b²/a²`.
    fn eccentricity_squared(&self) -> f64 {
        let a = self.equatorial_radius();
        let b = self.polar_radius();
        1.0 - (b * b) / (a * a)
    }

    /// Terrain elevation in meters at the given location.
    fn elevation(&self, latitude: Angle, longitude: Angle) -> f64;

    /// Cartesian point for a geographic position `elevation` meters above
    /// the ellipsoid.
    fn compute_point_from_position(
        &self,
        latitude: Angle,
        longitude: Angle,
        elevation: f64,
    ) -> DVec3;

    /// Geographic position of a Cartesian point.
    fn compute_position_from_point(&self, point: DVec3) -> Position;

    /// Intersections of `line` with the ellipsoid raised by `altitude` meters.
    ///
    /// If the line starts outside the surface both crossings are returned,
    /// nearest first. If it starts inside, only the forward crossing is
    /// returned. A miss returns an empty vector.
    fn intersect(&self, line: &Line, altitude: f64) -> Vec<DVec3>;

    /// Geographic location of the first intersection of `line` with the
    /// ellipsoid surface, if any.
    fn intersection_position(&self, line: &Line) -> Option<LatLon> {
        self.intersect(line, 0.0)
            .first()
            .map(|p| self.compute_position_from_point(*p).lat_lon)
    }

    /// Convenience: [`Self::compute_point_from_position`] for a [`LatLon`].
    fn compute_point_from_lat_lon(&self, location: &LatLon, elevation: f64) -> DVec3 {
        self.compute_point_from_position(location.latitude, location.longitude, elevation)
    }
}
