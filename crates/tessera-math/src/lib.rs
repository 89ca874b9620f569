//! Angles, geographic coordinates, rays, and lat/lon rectangles used by the Tessera globe toolkit.

mod angle;
mod lat_lon;
mod line;
mod sector;

pub use angle::Angle;
pub use lat_lon::{LatLon, Position};
pub use line::Line;
pub use sector::Sector;
