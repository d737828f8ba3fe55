use super::*;

#[test]
fn ray_through_point_hits() {
    let point = Point::new(Vec3::new(0.0, 0.0, 5.0));
    let hits = point.intersect_ray(&Ray::new(Vec3::ZERO, Vec3::Z));
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].distance, 5.0);
    assert_eq!(hits[0].position, point.position);
}

#[test]
fn ray_behind_or_beside_misses() {
    let point = Point::new(Vec3::new(0.0, 0.0, -5.0));
    assert!(point.intersect_ray(&Ray::new(Vec3::ZERO, Vec3::Z)).is_empty());

    let beside = Point::new(Vec3::new(0.1, 0.0, 5.0));
    assert!(beside.intersect_ray(&Ray::new(Vec3::ZERO, Vec3::Z)).is_empty());

    let near = Point::new(Vec3::new(1e-3, 0.0, 5.0));
    let loose = Ray::with_delta(Vec3::ZERO, Vec3::Z, 1e-2);
    assert_eq!(near.intersect_ray(&loose).len(), 1);
}

#[test]
fn box_test_is_closed() {
    let point = Point::new(Vec3::ONE);
    let bbox = AABox::new(Vec3::ZERO, Vec3::ONE).unwrap();
    assert!(point.intersects_box(&bbox));
    assert!(!Point::new(Vec3::splat(1.5)).intersects_box(&bbox));
}

#[test]
fn finite_views() {
    let point = Point::with_normal(Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.0, 0.0, 2.0));
    assert_eq!(point.normal, Some(Vec3::Z));
    assert_eq!(point.bbox().volume(), 0.0);
    assert_eq!(point.centroid(), point.position);
    let mesh = point.to_mesh();
    assert_eq!(mesh.vertex_count(), 1);
    assert_eq!(mesh.face_count(), 0);
}

#[test]
fn serde_omits_missing_normal() {
    let json = serde_json::to_string(&Point::new(Vec3::X)).unwrap();
    assert!(!json.contains("normal"));
    let back: Point = serde_json::from_str(&json).unwrap();
    assert_eq!(back, Point::new(Vec3::X));
}
