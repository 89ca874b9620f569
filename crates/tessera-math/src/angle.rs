//! Immutable angular values stored in degrees.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// An angle, stored in degrees.
///
/// Degrees are the canonical unit because every boundary the tessellation
/// builds (`±90`, `±180`, the latitude cutoff) is an exact decimal in
/// degrees. Radians are derived on demand.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Angle {
    degrees: f64,
}

impl Angle {
    /// 0°
    pub const ZERO: Angle = Angle::from_degrees(0.0);
    /// +90°
    pub const POS90: Angle = Angle::from_degrees(90.0);
    /// −90°
    pub const NEG90: Angle = Angle::from_degrees(-90.0);
    /// +180°
    pub const POS180: Angle = Angle::from_degrees(180.0);
    /// −180°
    pub const NEG180: Angle = Angle::from_degrees(-180.0);

    /// Construct an angle from degrees.
    #[inline]
    #[must_use]
    pub const fn from_degrees(degrees: f64) -> Self {
        Self { degrees }
    }

    /// Construct an angle from radians.
    #[inline]
    #[must_use]
    pub fn from_radians(radians: f64) -> Self {
        Self {
            degrees: radians.to_degrees(),
        }
    }

    /// The angle in degrees.
    #[inline]
    #[must_use]
    pub fn degrees(self) -> f64 {
        self.degrees
    }

    /// The angle in radians.
    #[inline]
    #[must_use]
    pub fn radians(self) -> f64 {
        self.degrees.to_radians()
    }

    /// Sine of the angle.
    #[inline]
    #[must_use]
    pub fn sin(self) -> f64 {
        self.radians().sin()
    }

    /// Cosine of the angle.
    #[inline]
    #[must_use]
    pub fn cos(self) -> f64 {
        self.radians().cos()
    }

    /// Linear blend `(1 - t)·a + t·b`.
    ///
    /// Written in this form so that `t = 0` returns `a` and `t = 1` returns
    /// `b` bit-for-bit.
    #[inline]
    #[must_use]
    pub fn mix(t: f64, a: Angle, b: Angle) -> Angle {
        Angle::from_degrees((1.0 - t) * a.degrees + t * b.degrees)
    }

    /// The angle halfway between `a` and `b`. Does not account for wrapping.
    #[inline]
    #[must_use]
    pub fn mid_angle(a: Angle, b: Angle) -> Angle {
        Angle::mix(0.5, a, b)
    }

    /// Wrap a longitude into `[-180, 180]`. `±180` are left untouched.
    #[must_use]
    pub fn normalized_longitude(self) -> Angle {
        let d = self.degrees;
        if (-180.0..=180.0).contains(&d) {
            return self;
        }
        let wrapped = (d + 180.0).rem_euclid(360.0) - 180.0;
        Angle::from_degrees(wrapped)
    }

    /// Wrap a latitude into `[-90, 90]` by clamping.
    #[must_use]
    pub fn clamped_latitude(self) -> Angle {
        Angle::from_degrees(self.degrees.clamp(-90.0, 90.0))
    }

    /// Absolute value of the angle.
    #[inline]
    #[must_use]
    pub fn abs(self) -> Angle {
        Angle::from_degrees(self.degrees.abs())
    }
}

impl Add for Angle {
    type Output = Angle;

    fn add(self, rhs: Angle) -> Angle {
        Angle::from_degrees(self.degrees + rhs.degrees)
    }
}

impl Sub for Angle {
    type Output = Angle;

    fn sub(self, rhs: Angle) -> Angle {
        Angle::from_degrees(self.degrees - rhs.degrees)
    }
}

impl Neg for Angle {
    type Output = Angle;

    fn neg(self) -> Angle {
        Angle::from_degrees(-self.degrees)
    }
}

impl Mul<f64> for Angle {
    type Output = Angle;

    fn mul(self, rhs: f64) -> Angle {
        Angle::from_degrees(self.degrees * rhs)
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.degrees)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_degrees_radians_roundtrip() {
        let a = Angle::from_degrees(45.0);
        assert!((a.radians() - std::f64::consts::FRAC_PI_4).abs() < EPSILON);
        let b = Angle::from_radians(std::f64::consts::FRAC_PI_2);
        assert!((b.degrees() - 90.0).abs() < EPSILON);
    }

    #[test]
    fn test_mix_is_exact_at_endpoints() {
        let a = Angle::from_degrees(-157.3);
        let b = Angle::from_degrees(12.9);
        assert_eq!(Angle::mix(0.0, a, b), a);
        assert_eq!(Angle::mix(1.0, a, b), b);
    }

    #[test]
    fn test_mid_angle() {
        let mid = Angle::mid_angle(Angle::NEG180, Angle::NEG90);
        assert_eq!(mid.degrees(), -135.0);
    }

    #[test]
    fn test_arithmetic() {
        let a = Angle::from_degrees(30.0);
        let b = Angle::from_degrees(15.0);
        assert_eq!((a + b).degrees(), 45.0);
        assert_eq!((a - b).degrees(), 15.0);
        assert_eq!((-a).degrees(), -30.0);
        assert_eq!((a * 0.5).degrees(), 15.0);
    }

    #[test]
    fn test_normalized_longitude() {
        assert_eq!(Angle::from_degrees(190.0).normalized_longitude().degrees(), -170.0);
        assert_eq!(Angle::from_degrees(-190.0).normalized_longitude().degrees(), 170.0);
        assert_eq!(Angle::POS180.normalized_longitude(), Angle::POS180);
        assert_eq!(Angle::NEG180.normalized_longitude(), Angle::NEG180);
    }

    #[test]
    fn test_trig() {
        assert!((Angle::POS90.sin() - 1.0).abs() < EPSILON);
        assert!(Angle::POS90.cos().abs() < EPSILON);
    }

    #[test]
    fn test_display() {
        assert_eq!(Angle::from_degrees(45.0).to_string(), "45°");
    }
}
