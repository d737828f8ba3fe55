//! Tests for meshes, faces and the mesh creator.

use approx::assert_abs_diff_eq;

use super::*;
use crate::spatial::OctreeIndex;

fn unit_cube() -> Mesh {
    AABox::new(Vec3::ZERO, Vec3::ONE).unwrap().to_mesh()
}

// =============================================================================
// CONSTRUCTION
// =============================================================================

#[test]
fn rejects_out_of_range_indices() {
    let err = Mesh::from_triangles(vec![Vec3::ZERO, Vec3::X], vec![[0, 1, 2]]).unwrap_err();
    assert_eq!(err, GeometryError::IndexOutOfRange { index: 2, len: 2 });
}

#[test]
fn empty_mesh_has_zero_box() {
    let mesh: Mesh = Mesh::default();
    assert!(mesh.is_empty());
    assert_eq!(mesh.bbox(), AABox::at_point(Vec3::ZERO));
    assert_eq!(mesh.distance_to(Vec3::ONE), f64::INFINITY);
}

#[test]
fn faces_resolve_to_vertex_positions() {
    let mesh = unit_cube();
    assert_eq!(mesh.vertex_count(), 8);
    assert_eq!(mesh.face_count(), 12);
    let corners = mesh.face_corners(0).unwrap();
    let [a, b, c] = mesh.faces()[0].indices();
    assert_eq!(corners, [a, b, c].map(|i| mesh.vertices()[i].position));
    assert!(mesh.face_corners(12).is_none());
}

// =============================================================================
// MEASURES
// =============================================================================

#[test]
fn cube_measures() {
    let mesh = unit_cube();
    assert_abs_diff_eq!(mesh.surface_area(), 6.0, epsilon = 1e-12);
    let weights = mesh.size_weights();
    assert_eq!(weights.len(), mesh.geometries().len());
    assert_abs_diff_eq!(weights.iter().sum::<f64>(), 6.0, epsilon = 1e-12);
    let centroid = mesh.centroid();
    assert_abs_diff_eq!(centroid.x, 0.5, epsilon = 1e-12);
    assert_abs_diff_eq!(centroid.z, 0.5, epsilon = 1e-12);
}

#[test]
fn cube_faces_point_outward() {
    let mesh = unit_cube();
    for face in mesh.faces() {
        let outward = face.centroid() - Vec3::splat(0.5);
        assert!(face.triangle().normal().dot(outward) > 0.0);
    }
    for (vertex, normal) in mesh.vertices().iter().zip(mesh.normals()) {
        assert!(normal.dot(vertex.position - Vec3::splat(0.5)) > 0.0);
    }
}

// =============================================================================
// INVALIDATION & TRANSFORM
// =============================================================================

#[test]
fn moved_vertices_need_update_bbox() {
    let mut mesh = unit_cube();
    for vertex in mesh.vertices_mut() {
        vertex.position *= 2.0;
    }
    assert_eq!(mesh.bbox().max(), Vec3::ONE, "stale until updated");
    mesh.update_bbox();
    assert_eq!(mesh.bbox().max(), Vec3::splat(2.0));
    assert_abs_diff_eq!(mesh.surface_area(), 24.0, epsilon = 1e-12);
}

#[test]
fn transform_rebuilds_index() {
    let mut mesh = unit_cube();
    mesh.transform(&Pose::from_rodrigues(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0)));
    assert_eq!(mesh.bbox().min(), Vec3::new(10.0, 0.0, 0.0));
    let hit = mesh.nearest(Vec3::new(9.0, 0.5, 0.5), None, None).unwrap();
    assert_abs_diff_eq!(hit.distance, 1.0, epsilon = 1e-12);
}

// =============================================================================
// QUERIES
// =============================================================================

#[test]
fn ray_enters_and_leaves_cube() {
    let mesh = unit_cube();
    let ray = Ray::new(Vec3::new(-2.0, 0.25, 0.3), Vec3::X);
    let hits = mesh.intersect_ray_elements(&ray, None);
    assert_eq!(hits.len(), 2);
    assert_abs_diff_eq!(hits[0].distance(), 2.0, epsilon = 1e-12);
    assert_abs_diff_eq!(hits[1].distance(), 3.0, epsilon = 1e-12);
    assert_eq!(mesh.intersect_ray_elements(&ray, Some(2.5)).len(), 1);
    assert_eq!(mesh.intersect_ray(&ray).len(), 2);
}

#[test]
fn box_query_returns_touching_faces() {
    let mesh = unit_cube();
    let corner = AABox::new(Vec3::splat(0.9), Vec3::splat(1.5)).unwrap();
    let faces = mesh.intersect_box_elements(&corner);
    assert!(!faces.is_empty());
    assert!(faces.iter().all(|f| f.bbox().intersects(&corner)));
    assert!(mesh.intersects_box(&corner));
    assert!(!mesh.intersects_box(&AABox::at_point(Vec3::splat(0.5))));
}

#[test]
fn clone_keeps_strategy_and_data() {
    let cube = unit_cube();
    let octree = Mesh::new(
        cube.vertices().to_vec(),
        cube.faces().to_vec(),
        OctreeIndex::new(),
    )
    .unwrap();
    let copy = octree.clone();
    assert_eq!(copy.index().strategy(), "octree");
    assert_eq!(copy.faces(), octree.faces());
    assert_eq!(copy.bbox(), octree.bbox());
}

#[test]
fn point_cloud_view_carries_normals() {
    let cloud = unit_cube().to_point_cloud();
    assert_eq!(cloud.points().len(), 8);
    assert!(cloud.points().iter().all(|p| p.normal.is_some()));
}

// =============================================================================
// CREATOR
// =============================================================================

#[test]
fn creator_offsets_indices_and_keeps_properties() {
    let mut tagged = unit_cube();
    tagged.set_face_property(3, "error", 0.25).unwrap();
    assert!(tagged.set_face_property(99, "error", 1.0).is_err());

    let merged = MeshCreator::merge([&unit_cube(), &tagged]).unwrap();
    assert_eq!(merged.vertex_count(), 16);
    assert_eq!(merged.face_count(), 24);
    assert_eq!(merged.faces()[12].indices(), unit_cube().faces()[0].indices().map(|i| i + 8));
    assert_eq!(merged.faces()[15].property("error"), Some(0.25));
    assert_eq!(merged.faces()[3].property("error"), None);
}

#[test]
fn creator_validates_at_build() {
    let mut creator = MeshCreator::new();
    creator.add_vertex(Vec3::ZERO);
    creator.add_face([0, 0, 5]);
    assert!(matches!(
        creator.build(),
        Err(GeometryError::IndexOutOfRange { index: 5, len: 1 })
    ));
}

#[test]
fn creator_builds_with_any_index() {
    let mut creator = MeshCreator::new();
    creator.add_triangle(Vec3::ZERO, Vec3::X, Vec3::Y);
    let mut properties = FaceProperties::new();
    properties.insert("weight".to_string(), 2.0);
    let a = creator.add_vertex(Point::new(Vec3::Z));
    creator.add_face_with_properties([0, 1, a], properties);
    let mesh = creator.build_with_index(OctreeIndex::new()).unwrap();
    assert_eq!(mesh.face_count(), 2);
    assert_eq!(mesh.faces()[1].property("weight"), Some(2.0));
}
