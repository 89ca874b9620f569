//! The closed set of boundary edge kinds.

use std::fmt;

use tessera_globe::Globe;
use tessera_math::LatLon;

use crate::{ConstantLatEdge, ConstantLonEdge, EbsError, GreatEllipseEdge};

/// Which curve an [`Edge`] follows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    /// A parallel.
    ConstantLatitude,
    /// A meridian.
    ConstantLongitude,
    /// A great ellipse.
    GreatEllipse,
}

impl EdgeKind {
    /// All kinds, in declaration order.
    pub const ALL: [EdgeKind; 3] = [
        EdgeKind::ConstantLatitude,
        EdgeKind::ConstantLongitude,
        EdgeKind::GreatEllipse,
    ];

    /// Position in [`Self::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EdgeKind::ConstantLatitude => "ConstantLatitude",
            EdgeKind::ConstantLongitude => "ConstantLongitude",
            EdgeKind::GreatEllipse => "GreatEllipse",
        };
        f.write_str(name)
    }
}

/// A directed boundary curve between two locations.
#[derive(Clone, Debug, PartialEq)]
pub enum Edge {
    ConstantLatitude(ConstantLatEdge),
    ConstantLongitude(ConstantLonEdge),
    GreatEllipse(GreatEllipseEdge),
}

impl Edge {
    #[must_use]
    pub fn kind(&self) -> EdgeKind {
        match self {
            Edge::ConstantLatitude(_) => EdgeKind::ConstantLatitude,
            Edge::ConstantLongitude(_) => EdgeKind::ConstantLongitude,
            Edge::GreatEllipse(_) => EdgeKind::GreatEllipse,
        }
    }

    /// First point of the edge.
    #[must_use]
    pub fn start_point(&self) -> LatLon {
        match self {
            Edge::ConstantLatitude(e) => e.start_point(),
            Edge::ConstantLongitude(e) => e.start_point(),
            Edge::GreatEllipse(e) => e.start_point(),
        }
    }

    /// Last point of the edge.
    #[must_use]
    pub fn end_point(&self) -> LatLon {
        match self {
            Edge::ConstantLatitude(e) => e.end_point(),
            Edge::ConstantLongitude(e) => e.end_point(),
            Edge::GreatEllipse(e) => e.end_point(),
        }
    }

    #[must_use]
    pub fn max_longitude_degrees(&self) -> f64 {
        match self {
            Edge::ConstantLatitude(e) => e.max_longitude_degrees(),
            Edge::ConstantLongitude(e) => e.max_longitude_degrees(),
            Edge::GreatEllipse(e) => e.max_longitude_degrees(),
        }
    }

    /// Point at parameter `t` in `[0, 1]`. `t = 0` is the start point and
    /// `t = 1` the end point.
    ///
    /// # Errors
    ///
    /// Only great-ellipse edges can fail; see
    /// [`GreatEllipseEdge::point_on_edge`].
    pub fn point_on_edge(&self, globe: &dyn Globe, t: f64) -> Result<LatLon, EbsError> {
        match self {
            Edge::ConstantLatitude(e) => Ok(e.point_on_edge(t)),
            Edge::ConstantLongitude(e) => Ok(e.point_on_edge(t)),
            Edge::GreatEllipse(e) => e.point_on_edge(globe, t),
        }
    }

    /// Point at fraction `t` of the edge's length.
    ///
    /// # Errors
    ///
    /// Only great-ellipse edges can fail.
    pub fn arc_length_point_on_edge(
        &self,
        globe: &dyn Globe,
        t: f64,
    ) -> Result<LatLon, EbsError> {
        match self {
            Edge::ConstantLatitude(e) => Ok(e.arc_length_point_on_edge(t)),
            Edge::ConstantLongitude(e) => Ok(e.arc_length_point_on_edge(t)),
            Edge::GreatEllipse(e) => e.arc_length_point_on_edge(globe, t),
        }
    }

    /// Split into two halves of the same kind. The first half starts at
    /// this edge's start, the second ends at its end, and they meet at the
    /// edge's midpoint.
    ///
    /// # Errors
    ///
    /// Only great-ellipse edges can fail.
    pub fn subdivide(&self, globe: &dyn Globe) -> Result<[Edge; 2], EbsError> {
        Ok(match self {
            Edge::ConstantLatitude(e) => e.subdivide().map(Edge::from),
            Edge::ConstantLongitude(e) => e.subdivide().map(Edge::from),
            Edge::GreatEllipse(e) => e.subdivide(globe)?.map(Edge::from),
        })
    }

    /// The great-ellipse payload, if this is one.
    #[must_use]
    pub fn as_great_ellipse(&self) -> Option<&GreatEllipseEdge> {
        match self {
            Edge::GreatEllipse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConstantLatEdge> for Edge {
    fn from(edge: ConstantLatEdge) -> Self {
        Edge::ConstantLatitude(edge)
    }
}

impl From<ConstantLonEdge> for Edge {
    fn from(edge: ConstantLonEdge) -> Self {
        Edge::ConstantLongitude(edge)
    }
}

impl From<GreatEllipseEdge> for Edge {
    fn from(edge: GreatEllipseEdge) -> Self {
        Edge::GreatEllipse(edge)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let start = self.start_point();
        let end = self.end_point();
        match self {
            Edge::ConstantLatitude(_) => write!(
                f,
                "ConstantLatitude, lat: {}; lon range: {} to {}",
                start.latitude, start.longitude, end.longitude
            ),
            Edge::ConstantLongitude(_) => write!(
                f,
                "ConstantLongitude, lat range: {} to {}; lon: {}",
                start.latitude, end.latitude, start.longitude
            ),
            Edge::GreatEllipse(_) => write!(
                f,
                "GreatEllipse, lat range: {} to {}; lon range: {} to {}",
                start.latitude, end.latitude, start.longitude, end.longitude
            ),
        }
    }
}
