//! Globe construction errors.

/// Errors returned when building a globe.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GlobeError {
    /// Radii must be positive and finite, with the polar radius no larger
    /// than the equatorial radius.
    #[error("invalid ellipsoid radii: equatorial {equatorial} m, polar {polar} m")]
    InvalidRadii {
        /// Requested equatorial radius in meters.
        equatorial: f64,
        /// Requested polar radius in meters.
        polar: f64,
    },
}
