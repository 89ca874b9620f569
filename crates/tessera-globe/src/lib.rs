//! Reference ellipsoids and terrain elevation for the Tessera globe toolkit.
//!
//! The [`Globe`] trait is the only thing the sector subdivision system needs
//! from a planet: conversions between geographic and Cartesian coordinates,
//! terrain elevation, and ray intersection.

mod elevation;
mod ellipsoid;
mod error;
mod globe;

pub use elevation::{
    ConstantElevation, ElevationModel, FractalElevation, FractalParams, ZeroElevation,
};
pub use ellipsoid::EllipsoidalGlobe;
pub use error::GlobeError;
pub use globe::Globe;
