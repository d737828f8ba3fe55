use std::f64::consts::FRAC_PI_4;

use approx::assert_abs_diff_eq;

use super::*;
use crate::mesh::Mesh;
use crate::point_cloud::PointCloud;
use crate::primitives::point::Point;
use crate::primitives::triangle::Triangle;
use crate::spatial::BruteForceIndex;

#[test]
fn normal_angles_ignore_sign_and_length() {
    let diagonal = Vec3::new(1.0, 0.0, 1.0);
    assert_abs_diff_eq!(angle_between_normals(Vec3::Z * 3.0, diagonal).unwrap(), FRAC_PI_4, epsilon = 1e-12);
    assert_abs_diff_eq!(angle_between_normals(-Vec3::Z, diagonal).unwrap(), FRAC_PI_4, epsilon = 1e-12);
    assert_abs_diff_eq!(
        angle_between_normals(Vec3::X, Vec3::Y).unwrap(),
        std::f64::consts::FRAC_PI_2,
        epsilon = 1e-12
    );
    assert!(angle_between_normals(Vec3::ZERO, Vec3::X).is_err());
}

#[test]
fn plane_angle_matches_normal_angle() {
    let a = Plane::new(Vec3::ZERO, Vec3::Z).unwrap();
    let b = Plane::new(Vec3::ONE, Vec3::new(0.0, 1.0, 1.0)).unwrap();
    assert_abs_diff_eq!(angle_between_planes(&a, &b), FRAC_PI_4, epsilon = 1e-12);
    assert_abs_diff_eq!(angle_between_planes(&a, &a.flipped()), 0.0, epsilon = 1e-12);
}

#[test]
fn cloud_above_triangle_is_one_unit_away() {
    let floor = Mesh::from_triangles(
        vec![
            Vec3::new(-10.0, -10.0, 0.0),
            Vec3::new(10.0, -10.0, 0.0),
            Vec3::new(0.0, 10.0, 0.0),
        ],
        vec![[0, 1, 2]],
    )
    .unwrap();
    let cloud = PointCloud::from_positions(vec![
        Vec3::new(0.0, 0.0, 1.0),
        Vec3::new(1.0, 0.0, 1.0),
        Vec3::new(0.0, 1.0, -1.0),
    ]);
    let mean = mean_weighted_distance(&cloud, &floor, None).unwrap();
    assert_abs_diff_eq!(mean, 1.0, epsilon = 1e-12);
}

#[test]
fn faces_are_weighted_by_area() {
    let target = PointCloud::new(vec![Point::from(Vec3::ZERO)], BruteForceIndex::new());
    // A large face centred 3 away and a small one centred 1 away
    let big = Triangle::new(
        Vec3::new(3.0, -3.0, -3.0),
        Vec3::new(3.0, 3.0, -3.0),
        Vec3::new(3.0, 0.0, 6.0),
    );
    let small = Triangle::new(
        Vec3::new(-1.0, -0.1, -0.1),
        Vec3::new(-1.0, 0.1, -0.1),
        Vec3::new(-1.0, 0.0, 0.2),
    );
    let positions = [big.corners(), small.corners()].concat();
    let mesh = Mesh::from_triangles(positions, vec![[0, 1, 2], [3, 4, 5]]).unwrap();
    let expected = (big.area() * 3.0 + small.area() * 1.0) / (big.area() + small.area());
    let mean = mean_weighted_distance(&mesh, &target, None).unwrap();
    assert_abs_diff_eq!(mean, expected, epsilon = 1e-9);
}

#[test]
fn cutoff_drops_far_elements() {
    let target = PointCloud::from_positions(vec![Vec3::ZERO]);
    let source = PointCloud::from_positions(vec![Vec3::X, Vec3::X * 10.0]);
    assert_abs_diff_eq!(
        mean_weighted_distance(&source, &target, Some(2.0)).unwrap(),
        1.0,
        epsilon = 1e-12
    );
    assert!(mean_weighted_distance(&source, &target, Some(0.5)).is_none());
    let empty: PointCloud = PointCloud::default();
    assert!(mean_weighted_distance(&source, &empty, None).is_none());
}
