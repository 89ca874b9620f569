//! Recursive subdivision of the globe into edge-bounded sectors.
//!
//! Unlike a plain latitude/longitude tiling, sectors here are bounded by
//! four arbitrary [`Edge`]s: parallels, meridians, or great ellipses. The
//! globe starts as six cube-like roots ([`EdgeBoundedSector::initial_cube_mapping`])
//! and each sector splits into four children that tile it. Polar caps split
//! into wedges meeting at the pole, and their descendants split along great
//! ellipses, so tiles near the poles stay well shaped instead of collapsing
//! into slivers.
//!
//! Operations that need the planet's shape take a [`tessera_globe::Globe`]
//! explicitly.

mod constant_edge;
mod cube_mapping;
mod edge;
mod edge_bounded_sector;
mod error;
mod great_ellipse;
mod sector_tree;

pub use constant_edge::{ConstantLatEdge, ConstantLonEdge};
pub use cube_mapping::RootFace;
pub use edge::{Edge, EdgeKind};
pub use edge_bounded_sector::{CLOSURE_TOLERANCE_DEG, EdgeBoundedSector};
pub use error::EbsError;
pub use great_ellipse::GreatEllipseEdge;
pub use sector_tree::{CubeTessellation, SectorNode, TessellationLeaf};
