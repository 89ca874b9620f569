//! Quadrilateral globe regions bounded by four edges.

use std::fmt;

use glam::DVec3;
use tessera_globe::Globe;
use tessera_math::{Angle, LatLon, Sector};

use crate::{ConstantLatEdge, ConstantLonEdge, EbsError, Edge, EdgeKind, GreatEllipseEdge};

/// How far apart, in degrees, the end of one edge and the start of the next
/// may be while still counting as a closed loop.
pub const CLOSURE_TOLERANCE_DEG: f64 = 1e-9;

/// For each child in order: the parent edge whose start is the child's outer
/// corner, and the edge preceding it around the loop.
const CORNER_RING: [(usize, usize); 4] = [(0, 3), (1, 0), (2, 1), (3, 2)];

/// Index of the edge following each edge around the loop.
const NEXT_EDGE: [usize; 4] = [1, 2, 3, 0];

/// A region of the globe bounded by four edges forming a closed loop.
///
/// The end of edge `i` coincides with the start of edge `i + 1` (wrapping).
/// The sector also carries a loose rectangular bound over its corners, used
/// to cull containment queries before the exact edge tests.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeBoundedSector {
    boundary: [Edge; 4],
    bounds: Sector,
}

impl EdgeBoundedSector {
    /// Build a sector from four edges listed in loop order.
    ///
    /// A sector bounded only by parallels is a polar cap; its bound is
    /// widened to include the pole on the side of its edges and every
    /// longitude.
    ///
    /// # Errors
    ///
    /// Returns [`EbsError::OpenBoundary`] if an edge does not end where the
    /// next one starts.
    pub fn from_edges(boundary: [Edge; 4]) -> Result<Self, EbsError> {
        for (index, edge) in boundary.iter().enumerate() {
            let end = edge.end_point();
            let next_start = boundary[NEXT_EDGE[index]].start_point();
            if !end.coincides_with(&next_start, CLOSURE_TOLERANCE_DEG) {
                tracing::error!(index, %end, %next_start, "Sector boundary is not closed");
                return Err(EbsError::OpenBoundary {
                    index,
                    end,
                    next_start,
                });
            }
        }

        let mut bounds = Sector::from_point(boundary[0].start_point());
        for edge in &boundary[1..] {
            bounds = bounds.union_with_point(&edge.start_point());
        }

        let sector = Self { boundary, bounds };
        if !sector.is_polar() {
            return Ok(sector);
        }
        let bounds = if pole_beyond(bounds.min_latitude()) == Angle::POS90 {
            Sector::new(bounds.min_latitude(), Angle::POS90, Angle::NEG180, Angle::POS180)
        } else {
            Sector::new(Angle::NEG90, bounds.max_latitude(), Angle::NEG180, Angle::POS180)
        };
        Ok(Self { bounds, ..sector })
    }

    /// Edge `index`, or `None` past the fourth edge.
    #[must_use]
    pub fn edge(&self, index: usize) -> Option<&Edge> {
        self.boundary.get(index)
    }

    /// The four edges in loop order.
    #[must_use]
    pub fn edges(&self) -> &[Edge; 4] {
        &self.boundary
    }

    /// The rectangular bound used to cull containment queries.
    #[must_use]
    pub fn bounds(&self) -> &Sector {
        &self.bounds
    }

    #[must_use]
    pub fn num_constant_lat_edges(&self) -> usize {
        self.count_kind(EdgeKind::ConstantLatitude)
    }

    /// True for a polar cap: all four edges are parallels.
    #[must_use]
    pub fn is_polar(&self) -> bool {
        self.num_constant_lat_edges() == 4
    }

    #[must_use]
    pub fn has_great_ellipse_edges(&self) -> bool {
        self.count_kind(EdgeKind::GreatEllipse) > 0
    }

    fn count_kind(&self, kind: EdgeKind) -> usize {
        self.boundary.iter().filter(|e| e.kind() == kind).count()
    }

    /// The four corners in loop order, i.e. the start point of each edge.
    #[must_use]
    pub fn corners(&self) -> [LatLon; 4] {
        self.boundary.each_ref().map(Edge::start_point)
    }

    /// Iterate over the corners in loop order.
    pub fn iter(&self) -> impl Iterator<Item = LatLon> + '_ {
        self.boundary.iter().map(Edge::start_point)
    }

    /// Arithmetic mean of the corner latitudes and longitudes.
    ///
    /// This is only an approximation of the true centroid and is meaningless
    /// for sectors that straddle the antimeridian or contain a pole.
    #[must_use]
    pub fn average_of_corners(&self) -> LatLon {
        let (lat_sum, lon_sum) = self.iter().fold((0.0, 0.0), |(lat, lon), corner| {
            (lat + corner.latitude.degrees(), lon + corner.longitude.degrees())
        });
        LatLon::from_degrees(lat_sum * 0.25, lon_sum * 0.25)
    }

    /// Alias for [`Self::average_of_corners`].
    #[must_use]
    pub fn centroid(&self) -> LatLon {
        self.average_of_corners()
    }

    /// Cartesian position of the centroid on the terrain, with the terrain
    /// height scaled by `exaggeration`.
    #[must_use]
    pub fn compute_center_point(&self, globe: &dyn Globe, exaggeration: f64) -> DVec3 {
        exaggerated_point(globe, &self.centroid(), exaggeration)
    }

    /// Cartesian positions of the four corners on the terrain, in loop order.
    #[must_use]
    pub fn compute_corner_points(&self, globe: &dyn Globe, exaggeration: f64) -> [DVec3; 4] {
        self.corners()
            .map(|corner| exaggerated_point(globe, &corner, exaggeration))
    }

    /// Returns true if `point` lies inside the sector.
    ///
    /// Points outside the rectangular bound are rejected first. Each
    /// great-ellipse edge then rejects points on the outer side of its
    /// plane. Parallels and meridians are fully described by the bound and
    /// need no further test.
    #[must_use]
    pub fn contains(&self, globe: &dyn Globe, point: &LatLon) -> bool {
        if !self.bounds.contains(point) {
            return false;
        }

        let mut surface_point = None;
        for edge in self.boundary.iter().filter_map(Edge::as_great_ellipse) {
            let p = *surface_point
                .get_or_insert_with(|| globe.compute_point_from_lat_lon(point, 0.0));
            if edge.outward_pointing_normal().dot(p - edge.start_point_xyz()) > 0.0 {
                return false;
            }
        }
        true
    }

    /// [`Self::contains`] for a location in degrees.
    #[must_use]
    pub fn contains_degrees(&self, globe: &dyn Globe, latitude: f64, longitude: f64) -> bool {
        self.contains(globe, &LatLon::from_degrees(latitude, longitude))
    }

    /// [`Self::contains`] for a location in radians.
    #[must_use]
    pub fn contains_radians(&self, globe: &dyn Globe, latitude: f64, longitude: f64) -> bool {
        self.contains(globe, &LatLon::from_radians(latitude, longitude))
    }

    /// Split into four children that tile this sector.
    ///
    /// Every child keeps one of this sector's corners and shares halves of
    /// the two edges meeting there. Polar caps split into four wedges that
    /// meet at the pole. Sectors bounded by two opposite pairs of parallels
    /// and meridians split along the parallel and meridian through the
    /// centroid. Everything else, including every descendant of a polar
    /// wedge, splits along great ellipses through a common central point.
    ///
    /// # Errors
    ///
    /// Propagates failures from great-ellipse geometry and from closing the
    /// child loops.
    pub fn subdivide(&self, globe: &dyn Globe) -> Result<[EdgeBoundedSector; 4], EbsError> {
        if self.is_polar() {
            tracing::trace!(bounds = %self.bounds, "Subdividing polar sector");
            return self.subdivide_polar(globe);
        }

        let halves = try_each(|i| self.boundary[i].subdivide(globe))?;
        let kinds = self.boundary.each_ref().map(Edge::kind);
        let needs_great_ellipses = self.has_great_ellipse_edges() || kinds[0] != kinds[2];
        if needs_great_ellipses {
            tracing::trace!(bounds = %self.bounds, "Subdividing along great ellipses");
            self.subdivide_with_great_ellipses(globe, &halves)
        } else {
            tracing::trace!(bounds = %self.bounds, "Subdividing along parallels and meridians");
            self.subdivide_with_parallels_and_meridians(&halves, &kinds)
        }
    }

    fn subdivide_polar(&self, globe: &dyn Globe) -> Result<[EdgeBoundedSector; 4], EbsError> {
        try_each(|i| {
            let edge = &self.boundary[i];
            let start = edge.start_point();
            let end = edge.end_point();
            let pole = pole_beyond(start.latitude);
            let [first, second] = edge.subdivide(globe)?;
            Self::from_edges([
                first,
                second,
                ConstantLonEdge::new(end.latitude, pole, end.longitude).into(),
                ConstantLonEdge::new(pole, start.latitude, start.longitude).into(),
            ])
        })
    }

    fn subdivide_with_parallels_and_meridians(
        &self,
        halves: &[[Edge; 2]; 4],
        kinds: &[EdgeKind; 4],
    ) -> Result<[EdgeBoundedSector; 4], EbsError> {
        let center = self.average_of_corners();
        try_each(|child| {
            let (cur, prev) = CORNER_RING[child];
            let outer = &halves[cur][0];
            let start = outer.start_point();
            let end = outer.end_point();

            let (inward, back): (Edge, Edge) = match kinds[cur] {
                EdgeKind::ConstantLatitude => (
                    ConstantLonEdge::new(end.latitude, center.latitude, center.longitude).into(),
                    ConstantLatEdge::new(center.latitude, center.longitude, start.longitude).into(),
                ),
                EdgeKind::ConstantLongitude | EdgeKind::GreatEllipse => (
                    ConstantLatEdge::new(center.latitude, start.longitude, center.longitude).into(),
                    ConstantLonEdge::new(center.latitude, start.latitude, center.longitude).into(),
                ),
            };
            Self::from_edges([halves[prev][1].clone(), outer.clone(), inward, back])
        })
    }

    fn subdivide_with_great_ellipses(
        &self,
        globe: &dyn Globe,
        halves: &[[Edge; 2]; 4],
    ) -> Result<[EdgeBoundedSector; 4], EbsError> {
        let split_points = halves.each_ref().map(|pair| pair[0].end_point());
        let center = GreatEllipseEdge::find_central_point(globe, &split_points)?;
        try_each(|child| {
            let (cur, prev) = CORNER_RING[child];
            Self::from_edges([
                halves[prev][1].clone(),
                halves[cur][0].clone(),
                GreatEllipseEdge::between(globe, split_points[cur], center).into(),
                GreatEllipseEdge::between(globe, center, split_points[prev]).into(),
            ])
        })
    }
}

/// The pole on the same side of the equator as `latitude`.
fn pole_beyond(latitude: Angle) -> Angle {
    if latitude.degrees() < 0.0 {
        Angle::NEG90
    } else {
        Angle::POS90
    }
}

fn exaggerated_point(globe: &dyn Globe, location: &LatLon, exaggeration: f64) -> DVec3 {
    let elevation = exaggeration * globe.elevation(location.latitude, location.longitude);
    globe.compute_point_from_lat_lon(location, elevation)
}

/// Build one value per edge index, stopping at the first error.
fn try_each<T>(mut f: impl FnMut(usize) -> Result<T, EbsError>) -> Result<[T; 4], EbsError> {
    Ok([f(0)?, f(1)?, f(2)?, f(3)?])
}

impl<'a> IntoIterator for &'a EdgeBoundedSector {
    type Item = LatLon;
    type IntoIter = std::iter::Map<std::slice::Iter<'a, Edge>, fn(&Edge) -> LatLon>;

    fn into_iter(self) -> Self::IntoIter {
        self.boundary
            .iter()
            .map(Edge::start_point as fn(&Edge) -> LatLon)
    }
}

impl fmt::Display for EdgeBoundedSector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EdgeBoundedSector[{}, Sector edges: ", self.bounds)?;
        for (i, edge) in self.boundary.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{edge}")?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_globe::{ConstantElevation, EllipsoidalGlobe};

    const EPSILON: f64 = 1e-9;

    fn deg(d: f64) -> Angle {
        Angle::from_degrees(d)
    }

    /// The rectangle `[s, n] x [w, e]` wound like a lateral cube face.
    fn rectangle(s: f64, n: f64, w: f64, e: f64) -> EdgeBoundedSector {
        EdgeBoundedSector::from_edges([
            ConstantLonEdge::new(deg(s), deg(n), deg(w)).into(),
            ConstantLatEdge::new(deg(n), deg(w), deg(e)).into(),
            ConstantLonEdge::new(deg(n), deg(s), deg(e)).into(),
            ConstantLatEdge::new(deg(s), deg(e), deg(w)).into(),
        ])
        .unwrap()
    }

    fn north_cap(cutoff: f64) -> EdgeBoundedSector {
        EdgeBoundedSector::from_edges([
            ConstantLatEdge::new(deg(cutoff), deg(-180.0), deg(-90.0)).into(),
            ConstantLatEdge::new(deg(cutoff), deg(-90.0), deg(0.0)).into(),
            ConstantLatEdge::new(deg(cutoff), deg(0.0), deg(90.0)).into(),
            ConstantLatEdge::new(deg(cutoff), deg(90.0), deg(180.0)).into(),
        ])
        .unwrap()
    }

    #[test]
    fn test_from_edges_rejects_open_loop() {
        let result = EdgeBoundedSector::from_edges([
            ConstantLonEdge::new(deg(0.0), deg(10.0), deg(0.0)).into(),
            ConstantLatEdge::new(deg(10.0), deg(0.0), deg(10.0)).into(),
            ConstantLonEdge::new(deg(10.0), deg(0.0), deg(10.0)).into(),
            ConstantLatEdge::new(deg(0.0), deg(10.0), deg(1.0)).into(),
        ]);
        match result {
            Err(EbsError::OpenBoundary { index, .. }) => assert_eq!(index, 3),
            other => panic!("Expected an open boundary, got {other:?}"),
        }
    }

    #[test]
    fn test_bounds_cover_corners() {
        let sector = rectangle(-45.0, 45.0, -180.0, -90.0);
        let bounds = sector.bounds();
        assert_eq!(bounds.min_latitude().degrees(), -45.0);
        assert_eq!(bounds.max_latitude().degrees(), 45.0);
        assert_eq!(bounds.min_longitude().degrees(), -180.0);
        assert_eq!(bounds.max_longitude().degrees(), -90.0);
        assert!(!sector.is_polar());
        assert!(!sector.has_great_ellipse_edges());
        assert_eq!(sector.num_constant_lat_edges(), 2);
    }

    #[test]
    fn test_polar_bounds_reach_the_pole() {
        let cap = north_cap(45.0);
        assert!(cap.is_polar());
        assert_eq!(cap.bounds().min_latitude().degrees(), 45.0);
        assert_eq!(cap.bounds().max_latitude().degrees(), 90.0);
        assert_eq!(cap.bounds().min_longitude().degrees(), -180.0);
        assert_eq!(cap.bounds().max_longitude().degrees(), 180.0);
    }

    #[test]
    fn test_corners_follow_loop() {
        let sector = rectangle(0.0, 10.0, 20.0, 30.0);
        let corners = sector.corners();
        assert_eq!(corners[0], LatLon::from_degrees(0.0, 20.0));
        assert_eq!(corners[1], LatLon::from_degrees(10.0, 20.0));
        assert_eq!(corners[2], LatLon::from_degrees(10.0, 30.0));
        assert_eq!(corners[3], LatLon::from_degrees(0.0, 30.0));
        let iterated: Vec<LatLon> = (&sector).into_iter().collect();
        assert_eq!(iterated, corners.to_vec());
        assert_eq!(sector.iter().count(), 4);
    }

    #[test]
    fn test_average_of_corners() {
        let sector = rectangle(0.0, 10.0, 20.0, 30.0);
        let center = sector.centroid();
        assert!((center.latitude.degrees() - 5.0).abs() < EPSILON);
        assert!((center.longitude.degrees() - 25.0).abs() < EPSILON);
    }

    #[test]
    fn test_center_point_uses_exaggerated_elevation() {
        let globe = EllipsoidalGlobe::sphere(1000.0)
            .with_elevation_model(Box::new(ConstantElevation::new(10.0)));
        let sector = rectangle(-10.0, 10.0, -10.0, 10.0);
        let center = sector.compute_center_point(&globe, 3.0);
        assert!((center.length() - 1030.0).abs() < EPSILON);
        assert!((center.normalize() - DVec3::Z).length() < EPSILON);
        for corner in sector.compute_corner_points(&globe, 0.0) {
            assert!((corner.length() - 1000.0).abs() < EPSILON);
        }
    }

    #[test]
    fn test_rectangle_subdivides_into_quarters() {
        let globe = EllipsoidalGlobe::wgs84();
        let sector = rectangle(-45.0, 45.0, 0.0, 90.0);
        let children = sector.subdivide(&globe).unwrap();
        let expected = [
            (-45.0, 0.0, 0.0, 45.0),
            (0.0, 45.0, 0.0, 45.0),
            (0.0, 45.0, 45.0, 90.0),
            (-45.0, 0.0, 45.0, 90.0),
        ];
        for (child, (s, n, w, e)) in children.iter().zip(expected) {
            let b = child.bounds();
            assert!((b.min_latitude().degrees() - s).abs() < EPSILON, "{child}");
            assert!((b.max_latitude().degrees() - n).abs() < EPSILON, "{child}");
            assert!((b.min_longitude().degrees() - w).abs() < EPSILON, "{child}");
            assert!((b.max_longitude().degrees() - e).abs() < EPSILON, "{child}");
            assert!(!child.has_great_ellipse_edges());
        }
    }

    #[test]
    fn test_child_keeps_parent_corner() {
        let globe = EllipsoidalGlobe::wgs84();
        let sector = rectangle(-45.0, 45.0, 0.0, 90.0);
        let children = sector.subdivide(&globe).unwrap();
        for (child, corner) in children.iter().zip(sector.corners()) {
            assert!(child.corners()[1].coincides_with(&corner, EPSILON));
        }
    }

    #[test]
    fn test_polar_subdivision_meets_at_pole() {
        let globe = EllipsoidalGlobe::wgs84();
        let children = north_cap(45.0).subdivide(&globe).unwrap();
        for child in &children {
            let kinds = child.edges().each_ref().map(Edge::kind);
            assert_eq!(
                kinds,
                [
                    EdgeKind::ConstantLatitude,
                    EdgeKind::ConstantLatitude,
                    EdgeKind::ConstantLongitude,
                    EdgeKind::ConstantLongitude,
                ]
            );
            assert!(child.edges()[2].end_point().is_pole(EPSILON));
            assert!(child.edges()[3].start_point().is_pole(EPSILON));
            assert_eq!(child.bounds().max_latitude().degrees(), 90.0);
            assert!((child.bounds().delta_lon().degrees() - 90.0).abs() < EPSILON);
        }
    }

    #[test]
    fn test_polar_wedges_split_along_great_ellipses() {
        let globe = EllipsoidalGlobe::wgs84();
        let wedges = north_cap(45.0).subdivide(&globe).unwrap();
        let grandchildren = wedges[0].subdivide(&globe).unwrap();
        for child in &grandchildren {
            assert!(child.has_great_ellipse_edges());
            assert_eq!(child.edges()[2].kind(), EdgeKind::GreatEllipse);
            assert_eq!(child.edges()[3].kind(), EdgeKind::GreatEllipse);
        }
        assert_eq!(grandchildren[0].edges()[1].kind(), EdgeKind::ConstantLatitude);
    }

    #[test]
    fn test_contains_rectangle() {
        let globe = EllipsoidalGlobe::wgs84();
        let sector = rectangle(-45.0, 45.0, -180.0, -90.0);
        assert!(sector.contains_degrees(&globe, 0.0, -135.0));
        assert!(sector.contains_degrees(&globe, 45.0, -90.0));
        assert!(!sector.contains_degrees(&globe, 50.0, -135.0));
        assert!(!sector.contains_degrees(&globe, 0.0, 0.0));
        assert!(sector.contains_radians(&globe, 0.1, -2.0));
    }

    #[test]
    fn test_contains_rejects_outside_great_ellipse() {
        let globe = EllipsoidalGlobe::wgs84();
        let wedges = north_cap(45.0).subdivide(&globe).unwrap();
        let grandchildren = wedges[2].subdivide(&globe).unwrap();
        // Child 1 holds the wedge corner at (45°, 45°); its centroid is inside it.
        let child = &grandchildren[1];
        let inside = child.centroid();
        assert!(child.contains(&globe, &inside), "{child}");
        // Just below the shared center, near the western meridian, the point
        // is inside the loose bound but beyond a great-ellipse edge.
        let center = child.corners()[3];
        let beyond = LatLon::from_degrees(center.latitude.degrees() - 1.0, 23.5);
        assert!(child.bounds().contains(&beyond));
        assert!(!child.contains(&globe, &beyond), "{beyond} should be outside {child}");
        assert!(grandchildren[0].contains(&globe, &beyond));
    }

    #[test]
    fn test_display() {
        let sector = rectangle(0.0, 10.0, 20.0, 30.0);
        let text = sector.to_string();
        assert!(text.starts_with("EdgeBoundedSector[(0°, 20°), (10°, 30°), Sector edges: "));
        assert!(text.ends_with("ConstantLatitude, lat: 0°; lon range: 30° to 20°]"));
    }
}
