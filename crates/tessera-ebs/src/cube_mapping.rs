//! The six root sectors that seed subdivision.
//!
//! The globe is cut like a cube: four lateral faces span 90° of longitude
//! each between `±cutoff` latitude, and two caps cover the polar regions
//! beyond the cutoff.

use std::fmt;

use tessera_math::Angle;

use crate::{ConstantLatEdge, ConstantLonEdge, EbsError, EdgeBoundedSector};

/// Identifies one of the six root sectors of [`EdgeBoundedSector::initial_cube_mapping`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RootFace {
    /// Lateral face spanning 180°W to 90°W.
    West180 = 0,
    /// Lateral face spanning 90°W to 0°.
    West90 = 1,
    /// Lateral face spanning 0° to 90°E.
    East0 = 2,
    /// Lateral face spanning 90°E to 180°E.
    East90 = 3,
    /// Cap south of `-cutoff`.
    SouthCap = 4,
    /// Cap north of `+cutoff`.
    NorthCap = 5,
}

impl RootFace {
    /// All faces in root order.
    pub const ALL: [RootFace; 6] = [
        RootFace::West180,
        RootFace::West90,
        RootFace::East0,
        RootFace::East90,
        RootFace::SouthCap,
        RootFace::NorthCap,
    ];

    /// Position in the array returned by the cube mapping.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn is_polar(self) -> bool {
        matches!(self, RootFace::SouthCap | RootFace::NorthCap)
    }

    /// Western bound of a lateral face, `None` for the caps.
    #[must_use]
    pub fn western_longitude(self) -> Option<Angle> {
        match self {
            RootFace::West180 => Some(Angle::NEG180),
            RootFace::West90 => Some(Angle::from_degrees(-90.0)),
            RootFace::East0 => Some(Angle::ZERO),
            RootFace::East90 => Some(Angle::from_degrees(90.0)),
            RootFace::SouthCap | RootFace::NorthCap => None,
        }
    }
}

impl fmt::Display for RootFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RootFace::West180 => "180W-90W",
            RootFace::West90 => "90W-0",
            RootFace::East0 => "0-90E",
            RootFace::East90 => "90E-180E",
            RootFace::SouthCap => "south cap",
            RootFace::NorthCap => "north cap",
        };
        f.write_str(name)
    }
}

/// Meridians bounding the four cap edges, in loop order.
const SOUTH_CAP_MERIDIANS: [f64; 5] = [180.0, 90.0, 0.0, -90.0, -180.0];
const NORTH_CAP_MERIDIANS: [f64; 5] = [-180.0, -90.0, 0.0, 90.0, 180.0];

impl EdgeBoundedSector {
    /// The six root sectors, indexed by [`RootFace::index`].
    ///
    /// Lateral faces are wound west meridian (northward), north parallel
    /// (eastward), east meridian (southward), south parallel (westward). The
    /// south cap runs westward from 180° and the north cap eastward from
    /// -180°.
    ///
    /// # Errors
    ///
    /// Returns [`EbsError::InvalidLatitudeCutoff`] unless
    /// `0° < latitude_cutoff < 90°`.
    pub fn initial_cube_mapping(
        latitude_cutoff: Angle,
    ) -> Result<[EdgeBoundedSector; 6], EbsError> {
        let cutoff = latitude_cutoff.degrees();
        if !(cutoff > 0.0 && cutoff < 90.0) {
            tracing::error!(cutoff, "Latitude cutoff out of range");
            return Err(EbsError::InvalidLatitudeCutoff(cutoff));
        }

        let north = latitude_cutoff;
        let south = -latitude_cutoff;
        let lateral = |face: RootFace| -> Result<EdgeBoundedSector, EbsError> {
            let west = face.western_longitude().unwrap_or(Angle::NEG180);
            let east = west + Angle::POS90;
            EdgeBoundedSector::from_edges([
                ConstantLonEdge::new(south, north, west).into(),
                ConstantLatEdge::new(north, west, east).into(),
                ConstantLonEdge::new(north, south, east).into(),
                ConstantLatEdge::new(south, east, west).into(),
            ])
        };
        let cap = |latitude: Angle, meridians: [f64; 5]| -> Result<EdgeBoundedSector, EbsError> {
            let m = meridians.map(Angle::from_degrees);
            EdgeBoundedSector::from_edges([
                ConstantLatEdge::new(latitude, m[0], m[1]).into(),
                ConstantLatEdge::new(latitude, m[1], m[2]).into(),
                ConstantLatEdge::new(latitude, m[2], m[3]).into(),
                ConstantLatEdge::new(latitude, m[3], m[4]).into(),
            ])
        };

        Ok([
            lateral(RootFace::West180)?,
            lateral(RootFace::West90)?,
            lateral(RootFace::East0)?,
            lateral(RootFace::East90)?,
            cap(south, SOUTH_CAP_MERIDIANS)?,
            cap(north, NORTH_CAP_MERIDIANS)?,
        ])
    }
}
