use super::*;
use crate::geometry::Shape;

fn floor(min: [f64; 2], max: [f64; 2]) -> AARectangle {
    AARectangle::new(
        Vec3::new(min[0], min[1], 0.0),
        Vec3::new(max[0], max[1], 0.0),
        Axis::Z,
        true,
    )
    .unwrap()
}

#[test]
fn rejects_non_flat_extent() {
    let err = AARectangle::new(Vec3::ZERO, Vec3::ONE, Axis::Z, true).unwrap_err();
    assert!(matches!(err, GeometryError::InvalidRectangle(_)));
}

#[test]
fn snaps_tiny_thickness() {
    let rect =
        AARectangle::new(Vec3::ZERO, Vec3::new(1.0, 1.0, 1e-12), Axis::Z, false).unwrap();
    assert_eq!(rect.bounds().max().z, 0.0);
    assert_eq!(rect.normal(), -Vec3::Z);
    assert!(!rect.is_normal_direction_positive());
}

#[test]
fn flatness_tolerance_comes_from_config() {
    let max = Vec3::new(1.0, 1.0, 1e-4);
    assert!(AARectangle::new(Vec3::ZERO, max, Axis::Z, true).is_err());
    let loose = KernelConfig::new(1e-3, 1e-5, 1e-12, 1024).unwrap();
    let rect = AARectangle::new_with(Vec3::ZERO, max, Axis::Z, true, &loose).unwrap();
    assert_eq!(rect.bounds().max().z, 0.0);
}

#[test]
fn nearly_coplanar_rectangles_touch() {
    let a = floor([0.0, 0.0], [1.0, 1.0]);
    let b = AARectangle::new(
        Vec3::new(0.5, 0.5, 1e-10),
        Vec3::new(2.0, 2.0, 1e-10),
        Axis::Z,
        true,
    )
    .unwrap();
    assert!(a.touches(&b).unwrap());
    assert!(a.overlaps(&b).unwrap());
}

#[test]
fn mismatched_orientation_fails_fast() {
    let a = floor([0.0, 0.0], [1.0, 1.0]);
    let wall = AARectangle::new(Vec3::ZERO, Vec3::new(0.0, 1.0, 1.0), Axis::X, true).unwrap();
    assert!(matches!(a.touches(&wall), Err(GeometryError::PreconditionMismatch(_))));
    assert!(matches!(a.overlaps(&wall), Err(GeometryError::PreconditionMismatch(_))));
    assert!(matches!(a.clip_on(&wall), Err(GeometryError::PreconditionMismatch(_))));
}

#[test]
fn touching_edges_do_not_overlap() {
    let a = floor([0.0, 0.0], [1.0, 1.0]);
    let b = floor([1.0, 0.0], [2.0, 1.0]);
    assert!(a.touches(&b).unwrap());
    assert!(!a.overlaps(&b).unwrap());
}

#[test]
fn parallel_planes_never_touch() {
    let a = floor([0.0, 0.0], [1.0, 1.0]);
    let lifted = AARectangle::new(Vec3::new(0.0, 0.0, 1.0), Vec3::ONE, Axis::Z, true).unwrap();
    assert!(!a.touches(&lifted).unwrap());
    assert_eq!(a.clip_on(&lifted).unwrap(), vec![a]);
}

#[test]
fn clip_cases() {
    let big = floor([0.0, 0.0], [4.0, 4.0]);
    let hole = floor([1.0, 1.0], [2.0, 2.0]);
    let fragments = big.clip_on(&hole).unwrap();
    assert_eq!(fragments.len(), 4);
    let area: f64 = fragments.iter().map(AARectangle::area).sum();
    assert_eq!(area, 16.0 - 1.0);
    for (i, a) in fragments.iter().enumerate() {
        assert_eq!(a.perpendicular_dimension(), Axis::Z);
        assert!(!a.overlaps(&hole).unwrap());
        for b in &fragments[i + 1..] {
            assert!(!a.overlaps(b).unwrap());
        }
    }

    assert!(hole.clip_on(&big).unwrap().is_empty());
}

#[test]
fn ray_hits_inside_only() {
    let rect = floor([0.0, 0.0], [1.0, 1.0]);
    let hits = rect.intersect_ray(&Ray::new(Vec3::new(0.5, 0.5, 3.0), -Vec3::Z));
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].position, Vec3::new(0.5, 0.5, 0.0));
    assert!(rect
        .intersect_ray(&Ray::new(Vec3::new(1.5, 0.5, 3.0), -Vec3::Z))
        .is_empty());
    assert!(rect
        .intersect_ray(&Ray::new(Vec3::new(0.5, 0.5, 3.0), Vec3::X))
        .is_empty());
}

#[test]
fn mesh_winding_follows_normal() {
    for positive in [true, false] {
        for axis in Axis::ALL {
            let mut max = Vec3::splat(2.0);
            max[axis.index()] = 0.0;
            let rect = AARectangle::new(Vec3::ZERO, max, axis, positive).unwrap();
            let mesh = rect.to_mesh();
            assert_eq!(mesh.face_count(), 2);
            for face in mesh.faces() {
                assert_eq!(face.triangle().normal(), rect.normal());
            }
            let area: f64 = mesh.size_weights().iter().sum();
            assert_eq!(area, rect.area());
        }
    }
}
