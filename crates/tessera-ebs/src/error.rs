//! Subdivision error types.

use glam::DVec3;
use tessera_math::LatLon;

/// Errors raised while building or subdividing edge-bounded sectors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EbsError {
    /// The four edges do not form a closed loop.
    #[error("edge {index} ends at {end} but the next edge starts at {next_start}")]
    OpenBoundary {
        /// Index of the edge whose end point is dangling.
        index: usize,
        /// End point of that edge.
        end: LatLon,
        /// Start point of the following edge.
        next_start: LatLon,
    },

    /// The cube mapping needs a cutoff strictly between the equator and the poles.
    #[error("latitude cutoff must lie strictly between 0° and 90°, got {0}°")]
    InvalidLatitudeCutoff(f64),

    /// A ray from the globe's center failed to reach the ellipsoid. Happens
    /// when a great-ellipse blend collapses to the center, i.e. for
    /// antipodal endpoints.
    #[error("ray {direction} from the globe center does not meet the ellipsoid")]
    NoEllipsoidIntersection {
        /// Direction of the failed ray.
        direction: DVec3,
    },

    /// The two chord planes used to locate a sector's center are parallel.
    #[error("central point is undefined: the chord planes are parallel")]
    DegenerateCentralPoint,
}
