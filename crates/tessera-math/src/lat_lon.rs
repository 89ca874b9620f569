//! Geographic positions.

use std::fmt;

use crate::Angle;

/// A point on the globe's surface parameterised by latitude and longitude.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LatLon {
    /// Latitude, positive north.
    pub latitude: Angle,
    /// Longitude, positive east.
    pub longitude: Angle,
}

impl LatLon {
    /// Construct a `LatLon` from two angles.
    #[inline]
    #[must_use]
    pub const fn new(latitude: Angle, longitude: Angle) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Construct a `LatLon` from degrees.
    #[inline]
    #[must_use]
    pub const fn from_degrees(latitude: f64, longitude: f64) -> Self {
        Self::new(Angle::from_degrees(latitude), Angle::from_degrees(longitude))
    }

    /// Construct a `LatLon` from radians.
    #[inline]
    #[must_use]
    pub fn from_radians(latitude: f64, longitude: f64) -> Self {
        Self::new(Angle::from_radians(latitude), Angle::from_radians(longitude))
    }

    /// Latitude of this point.
    #[inline]
    #[must_use]
    pub fn latitude(&self) -> Angle {
        self.latitude
    }

    /// Longitude of this point.
    #[inline]
    #[must_use]
    pub fn longitude(&self) -> Angle {
        self.longitude
    }

    /// Returns true if this point lies within `tolerance_deg` of either pole.
    #[must_use]
    pub fn is_pole(&self, tolerance_deg: f64) -> bool {
        self.latitude.degrees().abs() >= 90.0 - tolerance_deg
    }

    /// Returns true if `self` and `other` name the same place on the globe.
    ///
    /// Latitudes must agree within `tolerance_deg`. At a pole every longitude
    /// names the same point, and elsewhere longitudes are compared modulo
    /// 360° so that `-180°` and `+180°` coincide.
    #[must_use]
    pub fn coincides_with(&self, other: &LatLon, tolerance_deg: f64) -> bool {
        let dlat = (self.latitude.degrees() - other.latitude.degrees()).abs();
        if dlat > tolerance_deg {
            return false;
        }
        if self.is_pole(tolerance_deg) && other.is_pole(tolerance_deg) {
            return true;
        }
        let dlon = (self.longitude.degrees() - other.longitude.degrees()).rem_euclid(360.0);
        dlon <= tolerance_deg || 360.0 - dlon <= tolerance_deg
    }
}

impl fmt::Display for LatLon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

/// A `LatLon` plus an elevation in meters above the reference ellipsoid.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
    /// Horizontal location.
    pub lat_lon: LatLon,
    /// Elevation in meters.
    pub elevation: f64,
}

impl Position {
    /// Construct a position.
    #[must_use]
    pub const fn new(lat_lon: LatLon, elevation: f64) -> Self {
        Self { lat_lon, elevation }
    }

    /// Construct a position from radians and meters.
    #[must_use]
    pub fn from_radians(latitude: f64, longitude: f64, elevation: f64) -> Self {
        Self::new(LatLon::from_radians(latitude, longitude), elevation)
    }

    /// Latitude of this position.
    #[must_use]
    pub fn latitude(&self) -> Angle {
        self.lat_lon.latitude
    }

    /// Longitude of this position.
    #[must_use]
    pub fn longitude(&self) -> Angle {
        self.lat_lon.longitude
    }
}
