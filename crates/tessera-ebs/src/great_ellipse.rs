//! Edges along the intersection of the ellipsoid with a plane through its
//! center.
//!
//! A great-ellipse edge caches the Cartesian positions of its endpoints,
//! raised to the terrain elevation at the time the edge is built. Interior
//! points are found by blending those two positions and projecting the blend
//! back onto the ellipsoid along a ray from the globe's center. The result
//! lies on the great ellipse but is not uniformly spaced in arc length.

use glam::DVec3;
use tessera_globe::Globe;
use tessera_math::{Angle, LatLon, Line};

use crate::EbsError;

/// An edge on a great ellipse between two geographic locations.
#[derive(Clone, Debug, PartialEq)]
pub struct GreatEllipseEdge {
    start: LatLon,
    end: LatLon,
    start_xyz: DVec3,
    end_xyz: DVec3,
}

impl GreatEllipseEdge {
    /// Construct the edge from `(start_latitude, start_longitude)` to
    /// `(end_latitude, end_longitude)`, anchoring both endpoints to the
    /// globe's terrain.
    #[must_use]
    pub fn new(
        globe: &dyn Globe,
        start_latitude: Angle,
        end_latitude: Angle,
        start_longitude: Angle,
        end_longitude: Angle,
    ) -> Self {
        Self::between(
            globe,
            LatLon::new(start_latitude, start_longitude),
            LatLon::new(end_latitude, end_longitude),
        )
    }

    /// Construct the edge between two locations.
    #[must_use]
    pub fn between(globe: &dyn Globe, start: LatLon, end: LatLon) -> Self {
        Self {
            start,
            end,
            start_xyz: terrain_point(globe, &start),
            end_xyz: terrain_point(globe, &end),
        }
    }

    /// First point of the edge.
    #[must_use]
    pub fn start_point(&self) -> LatLon {
        self.start
    }

    /// Last point of the edge.
    #[must_use]
    pub fn end_point(&self) -> LatLon {
        self.end
    }

    /// Cached Cartesian position of the start point.
    #[must_use]
    pub fn start_point_xyz(&self) -> DVec3 {
        self.start_xyz
    }

    /// Cached Cartesian position of the end point.
    #[must_use]
    pub fn end_point_xyz(&self) -> DVec3 {
        self.end_xyz
    }

    /// Point at parameter `t` in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`EbsError::NoEllipsoidIntersection`] when the blended
    /// direction vanishes, which only happens for antipodal endpoints.
    pub fn point_on_edge(&self, globe: &dyn Globe, t: f64) -> Result<LatLon, EbsError> {
        let blend = self.start_xyz * (1.0 - t) + self.end_xyz * t;
        project_direction(globe, blend)
    }

    /// Arc-length parameterisation.
    ///
    /// # Errors
    ///
    /// Same as [`Self::point_on_edge`].
    // TODO: walk the ellipse by arc length instead of reusing the chord blend.
    pub fn arc_length_point_on_edge(
        &self,
        globe: &dyn Globe,
        t: f64,
    ) -> Result<LatLon, EbsError> {
        self.point_on_edge(globe, t)
    }

    /// Unit normal of the plane through the globe's center and both
    /// endpoints, `normalize(end × start)`.
    ///
    /// A point on the same side as the normal lies outside any sector whose
    /// boundary runs along this edge.
    #[must_use]
    pub fn outward_pointing_normal(&self) -> DVec3 {
        central_plane_normal(self.end_xyz, self.start_xyz)
    }

    /// Split at the point returned by `point_on_edge(0.5)`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::point_on_edge`].
    pub fn subdivide(&self, globe: &dyn Globe) -> Result<[GreatEllipseEdge; 2], EbsError> {
        let mid = self.point_on_edge(globe, 0.5)?;
        Ok([
            Self::between(globe, self.start, mid),
            Self::between(globe, mid, self.end),
        ])
    }

    /// The larger of the two endpoint longitudes, in degrees.
    #[must_use]
    pub fn max_longitude_degrees(&self) -> f64 {
        self.start
            .longitude
            .degrees()
            .max(self.end.longitude.degrees())
    }

    /// Locate the middle of a quadrilateral from the split points of its
    /// four edges.
    ///
    /// The points are projected onto the bare ellipsoid. The planes through
    /// the globe's center and the chords `(p0, p2)` and `(p1, p3)` meet in
    /// a line through the center; the returned location is where that line
    /// pierces the ellipsoid on the side of `p0`.
    ///
    /// # Errors
    ///
    /// Returns [`EbsError::DegenerateCentralPoint`] when the two planes
    /// coincide or either chord is degenerate.
    pub fn find_central_point(
        globe: &dyn Globe,
        split_points: &[LatLon; 4],
    ) -> Result<LatLon, EbsError> {
        let [p0, p1, p2, p3] = split_points.map(|ll| globe.compute_point_from_lat_lon(&ll, 0.0));
        let w02 = central_plane_normal(p0, p2);
        let w13 = central_plane_normal(p1, p3);

        let mut direction = w02.cross(w13).normalize_or_zero();
        if direction == DVec3::ZERO {
            tracing::error!(?split_points, "Chord planes are parallel");
            return Err(EbsError::DegenerateCentralPoint);
        }
        if direction.dot(p0) < 0.0 {
            direction = -direction;
        }
        project_direction(globe, direction)
    }
}

/// Cartesian position of `location` raised to the globe's terrain.
fn terrain_point(globe: &dyn Globe, location: &LatLon) -> DVec3 {
    let elevation = globe.elevation(location.latitude, location.longitude);
    globe.compute_point_from_lat_lon(location, elevation)
}

/// Unit normal of the plane through the origin, `a` and `b`. Zero if the
/// points are collinear with the origin.
fn central_plane_normal(a: DVec3, b: DVec3) -> DVec3 {
    a.cross(b).normalize_or_zero()
}

/// Where the ray from the globe's center along `direction` meets the ellipsoid.
fn project_direction(globe: &dyn Globe, direction: DVec3) -> Result<LatLon, EbsError> {
    let direction = direction.normalize_or_zero();
    globe
        .intersection_position(&Line::from_center(direction))
        .ok_or_else(|| {
            tracing::error!(%direction, "Ray from globe center missed the ellipsoid");
            EbsError::NoEllipsoidIntersection { direction }
        })
}
