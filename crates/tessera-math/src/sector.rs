//! Axis-aligned latitude/longitude rectangles.

use std::fmt;

use crate::{Angle, LatLon};

/// A rectangular region of the globe bounded by minimum and maximum
/// latitude and longitude.
///
/// Invariant: `min_latitude <= max_latitude` and `min_longitude <= max_longitude`.
/// The constructor enforces this by swapping bounds if needed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sector {
    min_latitude: Angle,
    max_latitude: Angle,
    min_longitude: Angle,
    max_longitude: Angle,
}

impl Sector {
    /// The whole globe.
    pub const FULL_SPHERE: Sector = Sector {
        min_latitude: Angle::NEG90,
        max_latitude: Angle::POS90,
        min_longitude: Angle::NEG180,
        max_longitude: Angle::POS180,
    };

    /// Construct a sector from its bounds. Swapped bounds are sorted.
    #[must_use]
    pub fn new(lat_a: Angle, lat_b: Angle, lon_a: Angle, lon_b: Angle) -> Self {
        let (min_latitude, max_latitude) = if lat_a <= lat_b {
            (lat_a, lat_b)
        } else {
            (lat_b, lat_a)
        };
        let (min_longitude, max_longitude) = if lon_a <= lon_b {
            (lon_a, lon_b)
        } else {
            (lon_b, lon_a)
        };
        Self {
            min_latitude,
            max_latitude,
            min_longitude,
            max_longitude,
        }
    }

    /// Construct a sector from bounds in degrees.
    #[must_use]
    pub fn from_degrees(min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> Self {
        Self::new(
            Angle::from_degrees(min_lat),
            Angle::from_degrees(max_lat),
            Angle::from_degrees(min_lon),
            Angle::from_degrees(max_lon),
        )
    }

    /// The degenerate sector holding a single point.
    #[must_use]
    pub fn from_point(point: LatLon) -> Self {
        Self::new(
            point.latitude,
            point.latitude,
            point.longitude,
            point.longitude,
        )
    }

    /// Southern bound.
    #[must_use]
    pub fn min_latitude(&self) -> Angle {
        self.min_latitude
    }

    /// Northern bound.
    #[must_use]
    pub fn max_latitude(&self) -> Angle {
        self.max_latitude
    }

    /// Western bound.
    #[must_use]
    pub fn min_longitude(&self) -> Angle {
        self.min_longitude
    }

    /// Eastern bound.
    #[must_use]
    pub fn max_longitude(&self) -> Angle {
        self.max_longitude
    }

    /// Latitude extent.
    #[must_use]
    pub fn delta_lat(&self) -> Angle {
        self.max_latitude - self.min_latitude
    }

    /// Longitude extent.
    #[must_use]
    pub fn delta_lon(&self) -> Angle {
        self.max_longitude - self.min_longitude
    }

    /// Midpoint of the latitude and longitude ranges.
    #[must_use]
    pub fn centroid(&self) -> LatLon {
        LatLon::new(
            Angle::mid_angle(self.min_latitude, self.max_latitude),
            Angle::mid_angle(self.min_longitude, self.max_longitude),
        )
    }

    /// The four corners: south-west, south-east, north-east, north-west.
    #[must_use]
    pub fn corners(&self) -> [LatLon; 4] {
        [
            LatLon::new(self.min_latitude, self.min_longitude),
            LatLon::new(self.min_latitude, self.max_longitude),
            LatLon::new(self.max_latitude, self.max_longitude),
            LatLon::new(self.max_latitude, self.min_longitude),
        ]
    }

    /// Inclusive containment test in degrees.
    #[must_use]
    pub fn contains_degrees(&self, latitude: f64, longitude: f64) -> bool {
        latitude >= self.min_latitude.degrees()
            && latitude <= self.max_latitude.degrees()
            && longitude >= self.min_longitude.degrees()
            && longitude <= self.max_longitude.degrees()
    }

    /// Inclusive containment test in radians.
    #[must_use]
    pub fn contains_radians(&self, latitude: f64, longitude: f64) -> bool {
        self.contains_degrees(latitude.to_degrees(), longitude.to_degrees())
    }

    /// Inclusive containment test.
    #[must_use]
    pub fn contains(&self, point: &LatLon) -> bool {
        self.contains_degrees(point.latitude.degrees(), point.longitude.degrees())
    }

    /// Returns true if the two sectors overlap, including touching edges.
    #[must_use]
    pub fn intersects(&self, other: &Sector) -> bool {
        self.min_latitude <= other.max_latitude
            && self.max_latitude >= other.min_latitude
            && self.min_longitude <= other.max_longitude
            && self.max_longitude >= other.min_longitude
    }

    /// The smallest sector enclosing `self` and `point`.
    #[must_use]
    pub fn union_with_point(&self, point: &LatLon) -> Sector {
        let lat = point.latitude;
        let lon = point.longitude;
        Sector {
            min_latitude: if lat < self.min_latitude { lat } else { self.min_latitude },
            max_latitude: if lat > self.max_latitude { lat } else { self.max_latitude },
            min_longitude: if lon < self.min_longitude { lon } else { self.min_longitude },
            max_longitude: if lon > self.max_longitude { lon } else { self.max_longitude },
        }
    }

    /// Split into four quadrants at the centroid.
    ///
    /// Children are ordered: \[south-west, south-east, north-west, north-east\].
    #[must_use]
    pub fn subdivide(&self) -> [Sector; 4] {
        let mid = self.centroid();
        let (lat0, lat1, lat2) = (self.min_latitude, mid.latitude, self.max_latitude);
        let (lon0, lon1, lon2) = (self.min_longitude, mid.longitude, self.max_longitude);
        [
            Sector::new(lat0, lat1, lon0, lon1),
            Sector::new(lat0, lat1, lon1, lon2),
            Sector::new(lat1, lat2, lon0, lon1),
            Sector::new(lat1, lat2, lon1, lon2),
        ]
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}), ({}, {})",
            self.min_latitude, self.min_longitude, self.max_latitude, self.max_longitude
        )
    }
}
