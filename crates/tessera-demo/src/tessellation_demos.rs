//! Tessellation walkthroughs run by the `tessera` binary.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;
use serde::Serialize;
use tessera_ebs::{
    CLOSURE_TOLERANCE_DEG, CubeTessellation, EbsError, EdgeBoundedSector, EdgeKind, RootFace,
    SectorNode,
};
use tessera_globe::Globe;
use tessera_math::{Angle, LatLon};
use tracing::{info, warn};

/// Failures that abort the demo.
#[derive(Debug, thiserror::Error)]
pub(crate) enum DemoError {
    #[error(transparent)]
    Subdivision(#[from] EbsError),

    #[error("failed to write {path}: {source}")]
    Dump {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode leaves: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Logs the six roots of the cube mapping.
pub(crate) fn demonstrate_cube_mapping(latitude_cutoff: Angle) -> Result<(), EbsError> {
    info!("Starting cube mapping demonstration");

    let roots = EdgeBoundedSector::initial_cube_mapping(latitude_cutoff)?;
    for (face, root) in RootFace::ALL.iter().zip(&roots) {
        info!(%face, polar = root.is_polar(), "{}", root);
    }

    info!("Cube mapping demonstration completed successfully");
    Ok(())
}

/// Builds the tessellation and refines every root to `depth`.
pub(crate) fn build_tessellation(
    globe: &dyn Globe,
    latitude_cutoff: Angle,
    depth: u32,
) -> Result<CubeTessellation, EbsError> {
    let mut tess = CubeTessellation::new(latitude_cutoff)?;
    tess.refine_uniform(globe, depth)?;

    for face in RootFace::ALL {
        let leaves = tess.root(face).all_leaves();
        let histogram = edge_kind_histogram(leaves.iter().map(|node| node.sector()));
        info!(
            %face,
            leaves = leaves.len(),
            constant_lat = histogram[EdgeKind::ConstantLatitude.index()],
            constant_lon = histogram[EdgeKind::ConstantLongitude.index()],
            great_ellipse = histogram[EdgeKind::GreatEllipse.index()],
            "Refined root"
        );
    }
    info!("Tessellation has {} leaves at depth {}", tess.leaf_count(), depth);
    Ok(tess)
}

/// Number of edges of each kind, indexed by [`EdgeKind::index`].
pub(crate) fn edge_kind_histogram<'a>(
    sectors: impl IntoIterator<Item = &'a EdgeBoundedSector>,
) -> [usize; 3] {
    let mut histogram = [0; 3];
    for sector in sectors {
        for edge in sector.edges() {
            histogram[edge.kind().index()] += 1;
        }
    }
    histogram
}

/// Outcome of [`verify_structure`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct StructureReport {
    pub sectors: usize,
    pub open_loops: usize,
    pub broken_splits: usize,
}

/// Checks that every sector's edges close and that every branch's children
/// carry the two halves of each parent edge.
pub(crate) fn verify_structure(tess: &CubeTessellation) -> StructureReport {
    info!("Verifying tessellation structure");

    let mut report = StructureReport::default();
    for face in RootFace::ALL {
        verify_node(tess.root(face), &mut report);
    }

    if report.open_loops == 0 && report.broken_splits == 0 {
        info!("All {} sectors are closed and split cleanly", report.sectors);
    } else {
        warn!(
            open_loops = report.open_loops,
            broken_splits = report.broken_splits,
            "Structural defects in {} sectors",
            report.sectors
        );
    }
    report
}

fn verify_node(node: &SectorNode, report: &mut StructureReport) {
    report.sectors += 1;
    let edges = node.sector().edges();
    let closed = edges.iter().zip(edges.iter().cycle().skip(1)).all(|(edge, next)| {
        edge.end_point()
            .coincides_with(&next.start_point(), CLOSURE_TOLERANCE_DEG)
    });
    if !closed {
        report.open_loops += 1;
    }

    let Some(children) = node.children() else {
        return;
    };
    let polar = node.sector().is_polar();
    for (i, parent_edge) in edges.iter().enumerate() {
        let (first, second) = if polar {
            (&children[i].sector().edges()[0], &children[i].sector().edges()[1])
        } else {
            (
                &children[i].sector().edges()[1],
                &children[(i + 1) % 4].sector().edges()[0],
            )
        };
        let rebuilt = first.kind() == parent_edge.kind()
            && second.kind() == parent_edge.kind()
            && first.start_point() == parent_edge.start_point()
            && first.end_point() == second.start_point()
            && second.end_point() == parent_edge.end_point();
        if !rebuilt {
            report.broken_splits += 1;
        }
    }
    for child in children {
        verify_node(child, report);
    }
}

/// How many leaves claimed each sampled location.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CoverageReport {
    pub uncovered: u32,
    pub single: u32,
    pub multiple: u32,
}

/// Tests `samples` locations drawn uniformly over the sphere against every
/// leaf.
pub(crate) fn sample_coverage(
    tess: &CubeTessellation,
    globe: &dyn Globe,
    samples: u32,
    seed: u64,
) -> CoverageReport {
    info!("Sampling coverage with {} random locations", samples);

    let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
    let leaves = tess.leaves();
    let mut report = CoverageReport::default();
    for _ in 0..samples {
        let z: f64 = rng.gen_range(-1.0..1.0);
        let latitude = z.asin().to_degrees();
        let longitude: f64 = rng.gen_range(-180.0..180.0);
        let point = LatLon::from_degrees(latitude, longitude);

        let holders = leaves
            .iter()
            .filter(|leaf| leaf.sector().contains(globe, &point))
            .count();
        match holders {
            0 => {
                report.uncovered += 1;
                tracing::debug!(%point, "Location not covered by any leaf");
            }
            1 => report.single += 1,
            _ => report.multiple += 1,
        }
    }

    info!(
        uncovered = report.uncovered,
        single = report.single,
        multiple = report.multiple,
        "Coverage sampling complete"
    );
    if report.uncovered > 0 {
        warn!(
            "{} of {} locations fell outside every leaf",
            report.uncovered, samples
        );
    }
    report
}

/// Radial extent of the leaf center and corner points over the terrain.
pub(crate) fn summarize_terrain(
    tess: &CubeTessellation,
    globe: &dyn Globe,
    exaggeration: f64,
) -> (f64, f64) {
    let mut lowest = f64::MAX;
    let mut highest = f64::MIN;
    for leaf in tess.leaves() {
        let sector = leaf.sector();
        let center = sector.compute_center_point(globe, exaggeration);
        let corners = sector.compute_corner_points(globe, exaggeration);
        for point in std::iter::once(center).chain(corners) {
            let radius = point.length();
            lowest = lowest.min(radius);
            highest = highest.max(radius);
        }
    }
    info!(
        exaggeration,
        "Leaf points span radii {:.1} m to {:.1} m", lowest, highest
    );
    (lowest, highest)
}

/// One leaf in the JSON dump.
#[derive(Debug, Serialize)]
pub(crate) struct LeafRecord {
    pub root: usize,
    pub face: String,
    pub depth: u32,
    /// `[latitude, longitude]` pairs in degrees, in loop order.
    pub corners: Vec<[f64; 2]>,
    pub edge_kinds: Vec<String>,
    pub center_xyz: [f64; 3],
}

pub(crate) fn leaf_records(
    tess: &CubeTessellation,
    globe: &dyn Globe,
    exaggeration: f64,
) -> Vec<LeafRecord> {
    tess.leaves()
        .into_iter()
        .map(|leaf| {
            let sector = leaf.sector();
            LeafRecord {
                root: leaf.face.index(),
                face: leaf.face.to_string(),
                depth: leaf.depth(),
                corners: sector
                    .iter()
                    .map(|c| [c.latitude.degrees(), c.longitude.degrees()])
                    .collect(),
                edge_kinds: sector.edges().iter().map(|e| e.kind().to_string()).collect(),
                center_xyz: sector.compute_center_point(globe, exaggeration).to_array(),
            }
        })
        .collect()
}

/// Writes every leaf to `path` as a JSON array.
pub(crate) fn dump_leaves(
    tess: &CubeTessellation,
    globe: &dyn Globe,
    exaggeration: f64,
    path: &Path,
) -> Result<usize, DemoError> {
    let records = leaf_records(tess, globe, exaggeration);
    let io_error = |source| DemoError::Dump {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = BufWriter::new(File::create(path).map_err(io_error)?);
    serde_json::to_writer_pretty(&mut writer, &records)?;
    writer.flush().map_err(io_error)?;

    info!("Wrote {} leaves to {}", records.len(), path.display());
    Ok(records.len())
}
