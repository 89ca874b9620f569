//! Structural properties of recursively subdivided sectors.

use tessera_ebs::*;
use tessera_globe::{EllipsoidalGlobe, Globe};
use tessera_math::{Angle, LatLon};

const EPSILON: f64 = 1e-9;

fn refined(globe: &dyn Globe, depth: u32) -> CubeTessellation {
    let mut tess = CubeTessellation::new(Angle::from_degrees(45.0)).unwrap();
    tess.refine_uniform(globe, depth).unwrap();
    tess
}

fn visit(node: &SectorNode, f: &mut dyn FnMut(&SectorNode)) {
    f(node);
    if let Some(children) = node.children() {
        for child in children {
            visit(child, f);
        }
    }
}

#[test]
fn test_every_sector_is_a_closed_loop() {
    let globe = EllipsoidalGlobe::wgs84();
    let tess = refined(&globe, 3);
    for face in RootFace::ALL {
        visit(tess.root(face), &mut |node| {
            let edges = node.sector().edges();
            for (i, edge) in edges.iter().enumerate() {
                let next = &edges[(i + 1) % 4];
                assert!(
                    edge.end_point().coincides_with(&next.start_point(), CLOSURE_TOLERANCE_DEG),
                    "Open loop at edge {i} of {}",
                    node.sector()
                );
            }
        });
    }
}

#[test]
fn test_children_reconstruct_parent_edges() {
    let globe = EllipsoidalGlobe::wgs84();
    let tess = refined(&globe, 3);
    for face in RootFace::ALL {
        visit(tess.root(face), &mut |node| {
            let Some(children) = node.children() else {
                return;
            };
            for (i, parent_edge) in node.sector().edges().iter().enumerate() {
                // Polar wedges keep both halves of one cap edge; every other
                // split hands the halves to neighbouring children.
                let (first, second) = if node.sector().is_polar() {
                    let wedge = children[i].sector().edges();
                    (&wedge[0], &wedge[1])
                } else {
                    (
                        &children[i].sector().edges()[1],
                        &children[(i + 1) % 4].sector().edges()[0],
                    )
                };
                assert_eq!(first.kind(), parent_edge.kind());
                assert_eq!(second.kind(), parent_edge.kind());
                assert_eq!(first.start_point(), parent_edge.start_point());
                assert_eq!(first.end_point(), second.start_point());
                assert_eq!(second.end_point(), parent_edge.end_point());
                let mid = parent_edge.point_on_edge(&globe, 0.5).unwrap();
                assert!(first.end_point().coincides_with(&mid, EPSILON));
            }
        });
    }
}

#[test]
fn test_subdivide_leaves_parent_untouched() {
    let globe = EllipsoidalGlobe::wgs84();
    let roots = EdgeBoundedSector::initial_cube_mapping(Angle::from_degrees(45.0)).unwrap();
    for root in &roots {
        let before = root.clone();
        let children = root.subdivide(&globe).unwrap();
        assert_eq!(children.len(), 4);
        assert_eq!(root, &before);
    }
}

#[test]
fn test_cube_mapping_at_45_degrees() {
    let roots = EdgeBoundedSector::initial_cube_mapping(Angle::from_degrees(45.0)).unwrap();
    assert_eq!(roots.len(), 6);
    for (root, cap_latitude) in [(&roots[4], -45.0), (&roots[5], 45.0)] {
        assert_eq!(root.num_constant_lat_edges(), 4);
        for edge in root.edges() {
            assert_eq!(edge.start_point().latitude.degrees(), cap_latitude);
            assert_eq!(edge.end_point().latitude.degrees(), cap_latitude);
        }
    }
    for (i, root) in roots[..4].iter().enumerate() {
        let west = -180.0 + 90.0 * i as f64;
        assert_eq!(root.bounds().min_longitude().degrees(), west);
        assert_eq!(root.bounds().delta_lon().degrees(), 90.0);
    }
}

#[test]
fn test_polar_children_share_the_pole() {
    let globe = EllipsoidalGlobe::wgs84();
    let roots = EdgeBoundedSector::initial_cube_mapping(Angle::from_degrees(45.0)).unwrap();
    for (cap, pole) in [(&roots[4], -90.0), (&roots[5], 90.0)] {
        assert!(cap.is_polar());
        let children = cap.subdivide(&globe).unwrap();
        for child in &children {
            let pole_corners = child
                .iter()
                .filter(|corner| (corner.latitude.degrees() - pole).abs() < EPSILON)
                .count();
            assert_eq!(pole_corners, 1, "{child} should touch the pole once");
            assert!(!child.is_polar());
        }
    }
}

#[test]
fn test_lateral_children_are_quarters() {
    let globe = EllipsoidalGlobe::wgs84();
    let roots = EdgeBoundedSector::initial_cube_mapping(Angle::from_degrees(45.0)).unwrap();
    let parent = &roots[0];
    let area = |s: &EdgeBoundedSector| {
        s.bounds().delta_lat().degrees() * s.bounds().delta_lon().degrees()
    };
    let children = parent.subdivide(&globe).unwrap();
    let total: f64 = children.iter().map(area).sum();
    assert!((total - area(parent)).abs() < EPSILON);
    for child in &children {
        assert!((area(child) - area(parent) / 4.0).abs() < EPSILON);
    }
}

#[test]
fn test_lateral_points_fall_in_exactly_one_leaf() {
    let globe = EllipsoidalGlobe::wgs84();
    let tess = refined(&globe, 3);
    let leaves = tess.leaves();
    for i in 0..14 {
        for j in 0..47 {
            let point = LatLon::from_degrees(-43.1 + 6.13 * i as f64, -179.3 + 7.61 * j as f64);
            let holders = leaves
                .iter()
                .filter(|leaf| leaf.sector().contains(&globe, &point))
                .count();
            assert_eq!(holders, 1, "{point} is covered by {holders} leaves");
        }
    }
}

#[test]
fn test_polar_lookup_lands_in_containing_leaf() {
    let globe = EllipsoidalGlobe::wgs84();
    let tess = refined(&globe, 3);
    for (lat, lon) in [(80.0, 10.0), (60.3, -120.7), (-75.5, 44.4), (-52.0, 170.0)] {
        let point = LatLon::from_degrees(lat, lon);
        let leaf = tess.find_leaf(&globe, &point).expect("Polar point not covered");
        assert!(leaf.face.is_polar());
        assert!(leaf.depth() >= 1);
        assert!(leaf.sector().contains(&globe, &point));
    }
}
