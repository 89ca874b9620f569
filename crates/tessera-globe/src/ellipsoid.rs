//! Oblate ellipsoid of revolution with pluggable terrain.

use std::f64::consts::FRAC_PI_6;
use std::fmt;

use glam::DVec3;
use tessera_math::{Angle, Line, Position};

use crate::{ElevationModel, Globe, GlobeError, ZeroElevation};

/// WGS84 semi-major axis in meters.
const WGS84_EQUATORIAL_RADIUS: f64 = 6_378_137.0;

/// WGS84 semi-minor axis in meters.
const WGS84_POLAR_RADIUS: f64 = 6_356_752.3142;

/// An ellipsoidal globe centered at the origin.
pub struct EllipsoidalGlobe {
    equatorial_radius: f64,
    polar_radius: f64,
    es: f64,
    elevation_model: Box<dyn ElevationModel>,
}

impl EllipsoidalGlobe {
    /// Construct a globe, validating the radii.
    pub fn new(
        equatorial_radius: f64,
        polar_radius: f64,
        elevation_model: Box<dyn ElevationModel>,
    ) -> Result<Self, GlobeError> {
        let valid = equatorial_radius.is_finite()
            && polar_radius.is_finite()
            && equatorial_radius > 0.0
            && polar_radius > 0.0
            && polar_radius <= equatorial_radius;
        if !valid {
            return Err(GlobeError::InvalidRadii {
                equatorial: equatorial_radius,
                polar: polar_radius,
            });
        }
        let es = 1.0 - (polar_radius * polar_radius) / (equatorial_radius * equatorial_radius);
        Ok(Self {
            equatorial_radius,
            polar_radius,
            es,
            elevation_model,
        })
    }

    /// The WGS84 ellipsoid with no terrain.
    #[must_use]
    pub fn wgs84() -> Self {
        Self {
            equatorial_radius: WGS84_EQUATORIAL_RADIUS,
            polar_radius: WGS84_POLAR_RADIUS,
            es: 1.0
                - (WGS84_POLAR_RADIUS * WGS84_POLAR_RADIUS)
                    / (WGS84_EQUATORIAL_RADIUS * WGS84_EQUATORIAL_RADIUS),
            elevation_model: Box::new(ZeroElevation),
        }
    }

    /// A perfect sphere with no terrain.
    ///
    /// # Panics
    ///
    /// Panics if `radius` is not positive and finite.
    #[must_use]
    pub fn sphere(radius: f64) -> Self {
        assert!(
            radius.is_finite() && radius > 0.0,
            "Sphere radius must be positive, got {radius}"
        );
        Self {
            equatorial_radius: radius,
            polar_radius: radius,
            es: 0.0,
            elevation_model: Box::new(ZeroElevation),
        }
    }

    /// Replace the elevation model.
    #[must_use]
    pub fn with_elevation_model(mut self, elevation_model: Box<dyn ElevationModel>) -> Self {
        self.elevation_model = elevation_model;
        self
    }

    /// The terrain attached to this globe.
    #[must_use]
    pub fn elevation_model(&self) -> &dyn ElevationModel {
        self.elevation_model.as_ref()
    }

    /// Geodetic latitude and height for a point at distance `rho` from the
    /// polar axis and `z` along it.
    ///
    /// Closed form after Vermeille (2004), valid everywhere except the
    /// globe's exact center.
    fn geodetic_latitude_and_height(&self, rho: f64, z: f64) -> (f64, f64) {
        let a = self.equatorial_radius;
        let e2 = self.es;
        let e4 = e2 * e2;

        let p = rho * rho / (a * a);
        let q = z * z * (1.0 - e2) / (a * a);
        let r = (p + q - e4) / 6.0;
        let evolute = 8.0 * r * r * r + e4 * p * q;

        if evolute > 0.0 || q != 0.0 {
            let u = if evolute > 0.0 {
                let rad1 = evolute.sqrt();
                let rad2 = (e4 * p * q).sqrt();
                r + 0.5 * ((rad1 + rad2) * (rad1 + rad2)).cbrt()
                    + 0.5 * ((rad1 - rad2) * (rad1 - rad2)).cbrt()
            } else {
                // Inside the evolute: trigonometric root of the quartic.
                let rad1 = (-evolute).sqrt();
                let rad2 = (-8.0 * r * r * r).sqrt();
                let rad3 = (e4 * p * q).sqrt();
                let theta = 2.0 * rad3.atan2(rad1 + rad2) / 3.0;
                -4.0 * r * theta.sin() * (FRAC_PI_6 + theta).cos()
            };
            let v = (u * u + e4 * q).sqrt();
            let w = e2 * (u + v - q) / (2.0 * v);
            let k = (u + v) / ((w * w + u + v).sqrt() + w);
            let d = k * rho / (k + e2);
            let hyp = (d * d + z * z).sqrt();
            let height = (k + e2 - 1.0) * hyp / k;
            let latitude = 2.0 * z.atan2(hyp + d);
            (latitude, height)
        } else if e2 > 0.0 {
            // On the equatorial plane, inside the evolute.
            let rad1 = (1.0 - e2).sqrt();
            let rad2 = (e2 - p).sqrt();
            let e = e2.sqrt();
            let height = -a * rad1 * rad2 / e;
            let latitude = rad2 / (e * rad2 + rad1 * p.sqrt());
            (latitude, height)
        } else {
            (0.0, rho - a)
        }
    }
}

impl Globe for EllipsoidalGlobe {
    fn equatorial_radius(&self) -> f64 {
        self.equatorial_radius
    }

    fn polar_radius(&self) -> f64 {
        self.polar_radius
    }

    fn eccentricity_squared(&self) -> f64 {
        self.es
    }

    fn elevation(&self, latitude: Angle, longitude: Angle) -> f64 {
        self.elevation_model.elevation(latitude, longitude)
    }

    fn compute_point_from_position(
        &self,
        latitude: Angle,
        longitude: Angle,
        elevation: f64,
    ) -> DVec3 {
        let (sin_lat, cos_lat) = latitude.radians().sin_cos();
        let (sin_lon, cos_lon) = longitude.radians().sin_cos();

        // Radius of curvature in the prime vertical.
        let rpm = self.equatorial_radius / (1.0 - self.es * sin_lat * sin_lat).sqrt();

        DVec3::new(
            (rpm + elevation) * cos_lat * sin_lon,
            (rpm * (1.0 - self.es) + elevation) * sin_lat,
            (rpm + elevation) * cos_lat * cos_lon,
        )
    }

    fn compute_position_from_point(&self, point: DVec3) -> Position {
        // Equatorial-plane coordinates: x' toward (0°, 0°), y' toward (0°, 90°E).
        let x_eq = point.z;
        let y_eq = point.x;
        let rho = (x_eq * x_eq + y_eq * y_eq).sqrt();
        let longitude = y_eq.atan2(x_eq);
        let (latitude, height) = self.geodetic_latitude_and_height(rho, point.y);
        Position::from_radians(latitude, longitude, height)
    }

    fn intersect(&self, line: &Line, altitude: f64) -> Vec<DVec3> {
        if line.is_degenerate() {
            return Vec::new();
        }

        // Stretch y so the ellipsoid becomes a sphere of the equatorial radius.
        let equatorial = self.equatorial_radius + altitude;
        let polar = self.polar_radius + altitude;
        let m = equatorial / polar;
        let m2 = m * m;
        let r2 = equatorial * equatorial;

        let o = line.origin;
        let v = line.direction;
        let a = v.x * v.x + m2 * v.y * v.y + v.z * v.z;
        let b = 2.0 * (o.x * v.x + m2 * o.y * v.y + o.z * v.z);
        let c = o.x * o.x + m2 * o.y * o.y + o.z * o.z - r2;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return Vec::new();
        }

        let root = discriminant.sqrt();
        if discriminant == 0.0 {
            return vec![line.point_at(-b / (2.0 * a))];
        }

        let near = line.point_at((-b - root) / (2.0 * a));
        let far = line.point_at((-b + root) / (2.0 * a));
        if c >= 0.0 {
            vec![near, far]
        } else {
            vec![far]
        }
    }
}

impl fmt::Debug for EllipsoidalGlobe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EllipsoidalGlobe")
            .field("equatorial_radius", &self.equatorial_radius)
            .field("polar_radius", &self.polar_radius)
            .field("es", &self.es)
            .finish_non_exhaustive()
    }
}
