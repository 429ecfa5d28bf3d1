// Host-side tests for the primitive mesh builders.

use glam::Vec3;
use house_core::Geometry;

fn assert_well_formed(g: &Geometry) {
    assert_eq!(g.positions.len(), g.normals.len());
    assert_eq!(g.indices.len() % 3, 0);
    for &i in &g.indices {
        assert!((i as usize) < g.vertex_count(), "index {i} out of range");
    }
    for n in &g.normals {
        let len = Vec3::from_array(*n).length();
        assert!((len - 1.0).abs() < 1e-4, "normal length {len}");
    }
}

/// Every non-degenerate triangle faces away from the centre of a convex shape.
fn assert_outward(g: &Geometry) {
    for tri in g.indices.chunks_exact(3) {
        let [a, b, c] = [0, 1, 2].map(|k| Vec3::from_array(g.positions[tri[k] as usize]));
        let face = (b - a).cross(c - a);
        if face.length() < 1e-6 {
            continue;
        }
        let centroid = (a + b + c) / 3.0;
        assert!(face.dot(centroid) > 0.0, "inward triangle {tri:?}");
    }
}

#[test]
fn cuboid_counts_and_extent() {
    let g = Geometry::cuboid(3.0, 2.0, 2.0);
    assert_eq!(g.vertex_count(), 24);
    assert_eq!(g.triangle_count(), 12);
    assert_well_formed(&g);
    assert_outward(&g);
    let max = g
        .positions
        .iter()
        .fold(Vec3::splat(f32::MIN), |m, p| m.max(Vec3::from_array(*p)));
    assert_eq!(max, Vec3::new(1.5, 1.0, 1.0));
}

#[test]
fn cylinder_has_caps_and_side() {
    let g = Geometry::cylinder(1.8, 1.8, 0.1, 8);
    // side rings + two caps (centre + ring each)
    assert_eq!(g.vertex_count(), 2 * 9 + 2 * 10);
    assert_eq!(g.triangle_count(), 8 * 2 + 8 * 2);
    assert_well_formed(&g);
    assert_outward(&g);
}

#[test]
fn cone_skips_the_apex_cap() {
    let g = Geometry::cone(2.2, 1.5, 4);
    assert_eq!(g.vertex_count(), 2 * 5 + 6);
    assert_eq!(g.triangle_count(), 4 * 2 + 4);
    assert_well_formed(&g);
    assert_outward(&g);
    let top = g.positions.iter().map(|p| p[1]).fold(f32::MIN, f32::max);
    assert!((top - 0.75).abs() < 1e-6);
}

#[test]
fn sphere_vertices_lie_on_radius() {
    let g = Geometry::sphere(0.4, 32, 16);
    assert_eq!(g.vertex_count(), 33 * 17);
    // pole rows contribute one triangle per segment
    assert_eq!(g.triangle_count(), 32 * 2 * 16 - 2 * 32);
    assert_well_formed(&g);
    assert_outward(&g);
    for p in &g.positions {
        assert!((Vec3::from_array(*p).length() - 0.4).abs() < 1e-5);
    }
}

#[test]
fn ids_are_unique_per_geometry() {
    let a = Geometry::cuboid(1.0, 1.0, 1.0);
    let b = Geometry::cuboid(1.0, 1.0, 1.0);
    assert_ne!(a.id(), b.id());
}

#[test]
fn missing_normals_are_rebuilt() {
    let g = Geometry::from_mesh_data(
        vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
        None,
        None,
    );
    assert_eq!(g.indices, vec![0, 1, 2]);
    for n in &g.normals {
        assert_eq!(*n, [0.0, 0.0, 1.0]);
    }
}

#[test]
fn mismatched_normals_are_replaced() {
    let g = Geometry::from_mesh_data(
        vec![[0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 0.0]],
        Some(vec![[0.0, 1.0, 0.0]]),
        Some(vec![0, 1, 2]),
    );
    assert_eq!(g.normals.len(), 3);
    for n in &g.normals {
        assert_eq!(*n, [0.0, 1.0, 0.0]);
    }
}
