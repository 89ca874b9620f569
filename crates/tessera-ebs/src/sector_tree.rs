//! Per-root quadtrees of edge-bounded sectors.

use tessera_globe::Globe;
use tessera_math::{Angle, LatLon};

use crate::{EbsError, EdgeBoundedSector, RootFace};

/// A node in a root sector's quadtree.
///
/// Each node owns the sector it covers. It is either a leaf or an interior
/// node with exactly four children produced by [`EdgeBoundedSector::subdivide`],
/// in the order that method returns them.
#[derive(Debug, Clone)]
pub enum SectorNode {
    /// An undivided region.
    Leaf {
        /// The region covered by this leaf.
        sector: EdgeBoundedSector,
        /// Number of subdivisions between the root and this node.
        depth: u32,
    },
    /// A subdivided region.
    Branch {
        /// The region covered by this branch.
        sector: EdgeBoundedSector,
        /// Number of subdivisions between the root and this node.
        depth: u32,
        /// The four child nodes.
        children: Box<[SectorNode; 4]>,
    },
}

impl SectorNode {
    /// A root leaf covering `sector`.
    #[must_use]
    pub fn new(sector: EdgeBoundedSector) -> Self {
        SectorNode::Leaf { sector, depth: 0 }
    }

    /// Subdivide this leaf into four children one level deeper.
    /// No-op if already a branch.
    ///
    /// # Errors
    ///
    /// Propagates [`EdgeBoundedSector::subdivide`] failures, leaving the
    /// node unchanged.
    pub fn subdivide(&mut self, globe: &dyn Globe) -> Result<(), EbsError> {
        let SectorNode::Leaf { sector, depth } = self else {
            return Ok(());
        };
        let depth = *depth;
        let children = sector.subdivide(globe)?.map(|child| SectorNode::Leaf {
            sector: child,
            depth: depth + 1,
        });
        *self = SectorNode::Branch {
            sector: sector.clone(),
            depth,
            children: Box::new(children),
        };
        Ok(())
    }

    /// Merge this branch back into a single leaf, discarding all children.
    /// No-op if already a leaf.
    pub fn merge(&mut self) {
        if let SectorNode::Branch { sector, depth, .. } = self {
            *self = SectorNode::Leaf {
                sector: sector.clone(),
                depth: *depth,
            };
        }
    }

    /// Subdivide leaves for which `predicate(sector, depth)` holds, and
    /// recurse into their children, until `max_depth`.
    ///
    /// # Errors
    ///
    /// Stops at the first subdivision failure.
    pub fn refine<F>(
        &mut self,
        globe: &dyn Globe,
        max_depth: u32,
        predicate: &mut F,
    ) -> Result<(), EbsError>
    where
        F: FnMut(&EdgeBoundedSector, u32) -> bool,
    {
        if self.depth() >= max_depth {
            return Ok(());
        }
        if self.is_leaf() {
            if !predicate(self.sector(), self.depth()) {
                return Ok(());
            }
            self.subdivide(globe)?;
        }
        if let SectorNode::Branch { children, .. } = self {
            for child in children.iter_mut() {
                child.refine(globe, max_depth, predicate)?;
            }
        }
        Ok(())
    }

    /// The deepest node whose sector contains `point`. Returns `None` if
    /// this node's own sector does not contain it; a branch whose children
    /// all miss the point returns itself.
    #[must_use]
    pub fn find_leaf(&self, globe: &dyn Globe, point: &LatLon) -> Option<&SectorNode> {
        if !self.sector().contains(globe, point) {
            return None;
        }
        match self {
            SectorNode::Leaf { .. } => Some(self),
            SectorNode::Branch { children, .. } => Some(
                children
                    .iter()
                    .find_map(|child| child.find_leaf(globe, point))
                    .unwrap_or(self),
            ),
        }
    }

    /// Collect all leaves at exactly `target_depth`.
    #[must_use]
    pub fn leaves_at_depth(&self, target_depth: u32) -> Vec<&SectorNode> {
        let mut result = Vec::new();
        self.collect_leaves(
            &mut |leaf: &SectorNode| leaf.depth() == target_depth,
            &mut result,
        );
        result
    }

    /// Collect all current leaves regardless of depth.
    #[must_use]
    pub fn all_leaves(&self) -> Vec<&SectorNode> {
        let mut result = Vec::new();
        self.collect_leaves(&mut |_: &SectorNode| true, &mut result);
        result
    }

    fn collect_leaves<'a>(
        &'a self,
        keep: &mut dyn FnMut(&SectorNode) -> bool,
        result: &mut Vec<&'a SectorNode>,
    ) {
        match self {
            SectorNode::Leaf { .. } => {
                if keep(self) {
                    result.push(self);
                }
            }
            SectorNode::Branch { children, .. } => {
                for child in children.iter() {
                    child.collect_leaves(keep, result);
                }
            }
        }
    }

    #[must_use]
    pub fn leaf_count(&self) -> usize {
        match self {
            SectorNode::Leaf { .. } => 1,
            SectorNode::Branch { children, .. } => {
                children.iter().map(SectorNode::leaf_count).sum()
            }
        }
    }

    /// Returns true if this node is a leaf.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        matches!(self, SectorNode::Leaf { .. })
    }

    /// The sector this node covers.
    #[must_use]
    pub fn sector(&self) -> &EdgeBoundedSector {
        match self {
            SectorNode::Leaf { sector, .. } | SectorNode::Branch { sector, .. } => sector,
        }
    }

    #[must_use]
    pub fn depth(&self) -> u32 {
        match self {
            SectorNode::Leaf { depth, .. } | SectorNode::Branch { depth, .. } => *depth,
        }
    }

    /// The four children of a branch.
    #[must_use]
    pub fn children(&self) -> Option<&[SectorNode; 4]> {
        match self {
            SectorNode::Leaf { .. } => None,
            SectorNode::Branch { children, .. } => Some(children),
        }
    }
}

/// A leaf of a [`CubeTessellation`] together with the root it descends from.
#[derive(Debug, Clone, Copy)]
pub struct TessellationLeaf<'a> {
    pub face: RootFace,
    pub node: &'a SectorNode,
}

impl TessellationLeaf<'_> {
    #[must_use]
    pub fn sector(&self) -> &EdgeBoundedSector {
        self.node.sector()
    }

    #[must_use]
    pub fn depth(&self) -> u32 {
        self.node.depth()
    }
}

/// Six quadtrees rooted at the cube mapping, covering the whole globe.
#[derive(Debug, Clone)]
pub struct CubeTessellation {
    latitude_cutoff: Angle,
    roots: [SectorNode; 6],
}

impl CubeTessellation {
    /// Six unrefined roots from [`EdgeBoundedSector::initial_cube_mapping`].
    ///
    /// # Errors
    ///
    /// Returns [`EbsError::InvalidLatitudeCutoff`] for a cutoff outside `(0°, 90°)`.
    pub fn new(latitude_cutoff: Angle) -> Result<Self, EbsError> {
        let roots =
            EdgeBoundedSector::initial_cube_mapping(latitude_cutoff)?.map(SectorNode::new);
        Ok(Self {
            latitude_cutoff,
            roots,
        })
    }

    #[must_use]
    pub fn latitude_cutoff(&self) -> Angle {
        self.latitude_cutoff
    }

    /// The quadtree rooted at `face`.
    #[must_use]
    pub fn root(&self, face: RootFace) -> &SectorNode {
        &self.roots[face.index()]
    }

    /// Subdivide every leaf until all leaves sit at `depth`.
    ///
    /// # Errors
    ///
    /// Stops at the first subdivision failure.
    pub fn refine_uniform(&mut self, globe: &dyn Globe, depth: u32) -> Result<(), EbsError> {
        self.refine_where(globe, depth, |_, _| true)
    }

    /// Subdivide leaves selected by `predicate(sector, depth)`, down to
    /// `max_depth`.
    ///
    /// # Errors
    ///
    /// Stops at the first subdivision failure.
    pub fn refine_where<F>(
        &mut self,
        globe: &dyn Globe,
        max_depth: u32,
        mut predicate: F,
    ) -> Result<(), EbsError>
    where
        F: FnMut(&EdgeBoundedSector, u32) -> bool,
    {
        for (face, root) in RootFace::ALL.iter().zip(self.roots.iter_mut()) {
            root.refine(globe, max_depth, &mut predicate)?;
            tracing::debug!(%face, leaves = root.leaf_count(), "Refined root sector");
        }
        Ok(())
    }

    /// Collapse every root back to a single leaf.
    pub fn reset(&mut self) {
        for root in &mut self.roots {
            root.merge();
        }
    }

    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.roots.iter().map(SectorNode::leaf_count).sum()
    }

    /// All leaves, grouped by root in [`RootFace::ALL`] order.
    #[must_use]
    pub fn leaves(&self) -> Vec<TessellationLeaf<'_>> {
        RootFace::ALL
            .iter()
            .zip(&self.roots)
            .flat_map(|(&face, root)| {
                root.all_leaves()
                    .into_iter()
                    .map(move |node| TessellationLeaf { face, node })
            })
            .collect()
    }

    /// The first leaf, in root order, whose sector contains `point`.
    #[must_use]
    pub fn find_leaf(&self, globe: &dyn Globe, point: &LatLon) -> Option<TessellationLeaf<'_>> {
        RootFace::ALL.iter().zip(&self.roots).find_map(|(&face, root)| {
            root.find_leaf(globe, point)
                .map(|node| TessellationLeaf { face, node })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_globe::EllipsoidalGlobe;

    fn tessellation() -> CubeTessellation {
        CubeTessellation::new(Angle::from_degrees(45.0)).unwrap()
    }

    #[test]
    fn test_new_has_six_leaves() {
        let tess = tessellation();
        assert_eq!(tess.leaf_count(), 6);
        for face in RootFace::ALL {
            assert!(tess.root(face).is_leaf());
            assert_eq!(tess.root(face).depth(), 0);
        }
    }

    #[test]
    fn test_subdivide_produces_4_children() {
        let globe = EllipsoidalGlobe::wgs84();
        let mut node = tessellation().root(RootFace::East0).clone();
        node.subdivide(&globe).unwrap();
        let children = node.children().expect("Node should be a branch after subdivide");
        for child in children {
            assert!(child.is_leaf());
            assert_eq!(child.depth(), 1);
        }
        assert_eq!(node.leaf_count(), 4);
    }

    #[test]
    fn test_subdivide_branch_is_noop() {
        let globe = EllipsoidalGlobe::wgs84();
        let mut node = tessellation().root(RootFace::NorthCap).clone();
        node.subdivide(&globe).unwrap();
        node.subdivide(&globe).unwrap();
        assert_eq!(node.leaf_count(), 4);
    }

    #[test]
    fn test_merge_restores_leaf() {
        let globe = EllipsoidalGlobe::wgs84();
        let mut node = tessellation().root(RootFace::West90).clone();
        let original = node.sector().clone();
        node.subdivide(&globe).unwrap();
        node.merge();
        assert!(node.is_leaf());
        assert_eq!(node.sector(), &original);
    }

    #[test]
    fn test_uniform_refinement_counts() {
        let globe = EllipsoidalGlobe::wgs84();
        let mut tess = tessellation();
        tess.refine_uniform(&globe, 2).unwrap();
        assert_eq!(tess.leaf_count(), 6 * 16);
        assert_eq!(tess.leaves().len(), 96);
        for face in RootFace::ALL {
            assert_eq!(tess.root(face).leaves_at_depth(2).len(), 16);
            assert!(tess.root(face).leaves_at_depth(1).is_empty());
        }
        tess.reset();
        assert_eq!(tess.leaf_count(), 6);
    }

    #[test]
    fn test_refine_where_is_selective() {
        let globe = EllipsoidalGlobe::wgs84();
        let mut tess = tessellation();
        tess.refine_where(&globe, 3, |sector, _| {
            sector.is_polar() || sector.has_great_ellipse_edges()
        })
        .unwrap();
        // Lateral faces never qualify. Each cap splits into four wedges that
        // stop there: a wedge has neither property.
        assert_eq!(tess.root(RootFace::East0).leaf_count(), 1);
        assert_eq!(tess.root(RootFace::NorthCap).leaf_count(), 4);
        assert_eq!(tess.leaf_count(), 4 + 4 + 4);
    }

    #[test]
    fn test_find_leaf_lateral() {
        let globe = EllipsoidalGlobe::wgs84();
        let mut tess = tessellation();
        tess.refine_uniform(&globe, 1).unwrap();
        let point = LatLon::from_degrees(10.0, 30.0);
        let leaf = tess.find_leaf(&globe, &point).expect("Point should be covered");
        assert_eq!(leaf.face, RootFace::East0);
        assert_eq!(leaf.depth(), 1);
        assert!(leaf.sector().bounds().contains(&point));
    }

    #[test]
    fn test_find_leaf_polar() {
        let globe = EllipsoidalGlobe::wgs84();
        let mut tess = tessellation();
        tess.refine_uniform(&globe, 2).unwrap();
        let point = LatLon::from_degrees(-80.0, 100.0);
        let leaf = tess.find_leaf(&globe, &point).expect("Point should be covered");
        assert_eq!(leaf.face, RootFace::SouthCap);
        assert_eq!(leaf.depth(), 2);
        assert!(leaf.sector().contains(&globe, &point));
    }
}
