//! Edges that follow a parallel or a meridian.
//!
//! Both variants are parameterised linearly in angle, which is exact: every
//! point of a parallel has the same latitude and every point of a meridian
//! the same longitude, so no globe is needed to evaluate them.

use tessera_math::{Angle, LatLon};

/// An edge along a parallel, running from `start_longitude` to `end_longitude`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstantLatEdge {
    latitude: Angle,
    start_longitude: Angle,
    end_longitude: Angle,
}

impl ConstantLatEdge {
    /// Construct an edge at `latitude` from `start_longitude` to `end_longitude`.
    #[must_use]
    pub const fn new(latitude: Angle, start_longitude: Angle, end_longitude: Angle) -> Self {
        Self {
            latitude,
            start_longitude,
            end_longitude,
        }
    }

    /// The parallel this edge lies on.
    #[must_use]
    pub fn latitude(&self) -> Angle {
        self.latitude
    }

    /// First point of the edge.
    #[must_use]
    pub fn start_point(&self) -> LatLon {
        LatLon::new(self.latitude, self.start_longitude)
    }

    /// Last point of the edge.
    #[must_use]
    pub fn end_point(&self) -> LatLon {
        LatLon::new(self.latitude, self.end_longitude)
    }

    /// Point at parameter `t` in `[0, 1]`.
    #[inline]
    #[must_use]
    pub fn point_on_edge(&self, t: f64) -> LatLon {
        LatLon::new(
            self.latitude,
            Angle::mix(t, self.start_longitude, self.end_longitude),
        )
    }

    /// Arc-length parameterisation. Along a parallel this is the same as
    /// [`Self::point_on_edge`].
    #[must_use]
    pub fn arc_length_point_on_edge(&self, t: f64) -> LatLon {
        self.point_on_edge(t)
    }

    /// Split at the middle longitude.
    #[must_use]
    pub fn subdivide(&self) -> [ConstantLatEdge; 2] {
        let mid = Angle::mid_angle(self.start_longitude, self.end_longitude);
        [
            Self::new(self.latitude, self.start_longitude, mid),
            Self::new(self.latitude, mid, self.end_longitude),
        ]
    }

    /// The larger of the two endpoint longitudes, in degrees.
    #[must_use]
    pub fn max_longitude_degrees(&self) -> f64 {
        self.start_longitude
            .degrees()
            .max(self.end_longitude.degrees())
    }
}

/// An edge along a meridian, running from `start_latitude` to `end_latitude`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstantLonEdge {
    start_latitude: Angle,
    end_latitude: Angle,
    longitude: Angle,
}

impl ConstantLonEdge {
    /// Construct an edge at `longitude` from `start_latitude` to `end_latitude`.
    #[must_use]
    pub const fn new(start_latitude: Angle, end_latitude: Angle, longitude: Angle) -> Self {
        Self {
            start_latitude,
            end_latitude,
            longitude,
        }
    }

    /// The meridian this edge lies on.
    #[must_use]
    pub fn longitude(&self) -> Angle {
        self.longitude
    }

    /// First point of the edge.
    #[must_use]
    pub fn start_point(&self) -> LatLon {
        LatLon::new(self.start_latitude, self.longitude)
    }

    /// Last point of the edge.
    #[must_use]
    pub fn end_point(&self) -> LatLon {
        LatLon::new(self.end_latitude, self.longitude)
    }

    /// Point at parameter `t` in `[0, 1]`.
    #[inline]
    #[must_use]
    pub fn point_on_edge(&self, t: f64) -> LatLon {
        LatLon::new(
            Angle::mix(t, self.start_latitude, self.end_latitude),
            self.longitude,
        )
    }

    /// Arc-length parameterisation, taken as linear in latitude.
    #[must_use]
    pub fn arc_length_point_on_edge(&self, t: f64) -> LatLon {
        self.point_on_edge(t)
    }

    /// Split at the middle latitude.
    #[must_use]
    pub fn subdivide(&self) -> [ConstantLonEdge; 2] {
        let mid = Angle::mid_angle(self.start_latitude, self.end_latitude);
        [
            Self::new(self.start_latitude, mid, self.longitude),
            Self::new(mid, self.end_latitude, self.longitude),
        ]
    }

    #[must_use]
    pub fn max_longitude_degrees(&self) -> f64 {
        self.longitude.degrees()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    fn deg(d: f64) -> Angle {
        Angle::from_degrees(d)
    }

    #[test]
    fn test_constant_lat_endpoints_are_exact() {
        let edge = ConstantLatEdge::new(deg(45.0), deg(-180.0), deg(-90.0));
        assert_eq!(edge.point_on_edge(0.0), edge.start_point());
        assert_eq!(edge.point_on_edge(1.0), edge.end_point());
        assert_eq!(edge.start_point(), LatLon::from_degrees(45.0, -180.0));
        assert_eq!(edge.end_point(), LatLon::from_degrees(45.0, -90.0));
    }

    #[test]
    fn test_constant_lat_keeps_latitude() {
        let edge = ConstantLatEdge::new(deg(-30.0), deg(10.0), deg(70.0));
        for i in 0..=10 {
            let p = edge.point_on_edge(i as f64 / 10.0);
            assert_eq!(p.latitude().degrees(), -30.0);
        }
        let quarter = edge.point_on_edge(0.25);
        assert!((quarter.longitude().degrees() - 25.0).abs() < EPSILON);
    }

    #[test]
    fn test_constant_lat_subdivide_halves_meet() {
        let edge = ConstantLatEdge::new(deg(45.0), deg(90.0), deg(0.0));
        let [first, second] = edge.subdivide();
        assert_eq!(first.start_point(), edge.start_point());
        assert_eq!(first.end_point(), second.start_point());
        assert_eq!(second.end_point(), edge.end_point());
        assert_eq!(first.end_point().longitude().degrees(), 45.0);
    }

    #[test]
    fn test_constant_lon_endpoints_are_exact() {
        let edge = ConstantLonEdge::new(deg(-45.0), deg(45.0), deg(-180.0));
        assert_eq!(edge.point_on_edge(0.0), edge.start_point());
        assert_eq!(edge.point_on_edge(1.0), edge.end_point());
        assert_eq!(edge.arc_length_point_on_edge(0.5), edge.point_on_edge(0.5));
    }

    #[test]
    fn test_constant_lon_subdivide_halves_meet() {
        let edge = ConstantLonEdge::new(deg(45.0), deg(-45.0), deg(90.0));
        let [first, second] = edge.subdivide();
        assert_eq!(first.start_point(), edge.start_point());
        assert_eq!(first.end_point(), second.start_point());
        assert_eq!(second.end_point(), edge.end_point());
        assert_eq!(first.end_point().latitude().degrees(), 0.0);
        assert_eq!(first.longitude().degrees(), 90.0);
    }

    #[test]
    fn test_max_longitude() {
        let lat_edge = ConstantLatEdge::new(deg(0.0), deg(120.0), deg(-60.0));
        assert_eq!(lat_edge.max_longitude_degrees(), 120.0);
        let lon_edge = ConstantLonEdge::new(deg(0.0), deg(10.0), deg(-60.0));
        assert_eq!(lon_edge.max_longitude_degrees(), -60.0);
    }
}
