//! Tests for the rigid pose algebra.

use std::f64::consts::{FRAC_PI_2, PI};

use approx::assert_abs_diff_eq;
use glam::{DMat3, DMat4, DQuat};
use proptest::prelude::*;

use super::*;

fn assert_vec_eq(a: Vec3, b: Vec3, tolerance: f64) {
    assert!((a - b).length() < tolerance, "{a} != {b}");
}

// =============================================================================
// CONSTRUCTION
// =============================================================================

#[test]
fn identity_leaves_points_untouched() {
    let p = Vec3::new(1.0, -2.0, 3.0);
    assert_eq!(Pose::identity() * p, p);
    assert_eq!(Pose::default(), Pose::IDENTITY);
}

#[test]
fn rejects_scaled_matrix() {
    let scaled = DMat4::from_scale(Vec3::splat(2.0));
    assert!(matches!(
        Pose::from_matrix(scaled, Validation::Enforce),
        Err(GeometryError::InvalidPose(_))
    ));
}

#[test]
fn skip_validation_accepts_scaled_matrix() {
    let scaled = DMat4::from_scale(Vec3::splat(2.0));
    let pose = Pose::from_matrix(scaled, Validation::Skip).unwrap();
    assert_eq!(pose * Vec3::ONE, Vec3::splat(2.0));
}

#[test]
fn rejects_projective_last_row() {
    let mut matrix = DMat4::IDENTITY;
    matrix.x_axis.w = 0.5;
    assert!(Pose::from_matrix(matrix, Validation::Enforce).is_err());
}

#[test]
fn accepts_mirrored_frame() {
    let mirror = DMat3::from_diagonal(Vec3::new(1.0, 1.0, -1.0));
    let pose = Pose::from_rotation_translation(mirror, Vec3::ZERO, Validation::Enforce).unwrap();
    assert!(pose.is_mirrored());
    assert!(pose.quaternion().is_err());
}

#[test]
fn tolerates_small_drift() {
    let mut rotation = DMat3::from_rotation_z(0.3);
    rotation.x_axis.x += 1e-7;
    assert!(Pose::from_rotation_translation(rotation, Vec3::ZERO, Validation::Enforce).is_ok());
}

#[test]
fn rejects_zero_quaternion() {
    let zero = DQuat::from_xyzw(0.0, 0.0, 0.0, 0.0);
    assert!(Pose::from_quaternion(zero, Vec3::ZERO).is_err());
}

#[test]
fn row_major_layout_puts_translation_in_last_column() {
    let values = [
        1.0, 0.0, 0.0, 4.0, //
        0.0, 1.0, 0.0, 5.0, //
        0.0, 0.0, 1.0, 6.0, //
        0.0, 0.0, 0.0, 1.0,
    ];
    let pose = Pose::from_row_major(&values, Validation::Enforce).unwrap();
    assert_eq!(pose.translation(), Vec3::new(4.0, 5.0, 6.0));
    assert_eq!(pose.to_row_major(), values);
}

// =============================================================================
// COMPOSITION & INVERSION
// =============================================================================

#[test]
fn composition_applies_right_pose_first() {
    let rotate = Pose::from_rodrigues(Vec3::new(0.0, 0.0, FRAC_PI_2), Vec3::ZERO);
    let shift = Pose::from_rodrigues(Vec3::ZERO, Vec3::X);

    // shift then rotate: (1,0,0) -> (2,0,0) -> (0,2,0)
    assert_vec_eq((rotate * shift) * Vec3::X, Vec3::new(0.0, 2.0, 0.0), 1e-12);
    // rotate then shift: (1,0,0) -> (0,1,0) -> (1,1,0)
    assert_vec_eq((shift * rotate) * Vec3::X, Vec3::new(1.0, 1.0, 0.0), 1e-12);
}

#[test]
fn composition_stays_rigid() {
    let a = Pose::from_euler(0.1, 0.2, 0.3, Vec3::new(1.0, 2.0, 3.0));
    let b = Pose::from_euler(-0.4, 0.5, 1.3, Vec3::new(-3.0, 0.0, 1.0));
    assert!(check_rigid(&(a * b).matrix(), 1e-9).is_ok());
}

#[test]
fn inverse_composes_to_identity() {
    let pose = Pose::from_euler(0.7, -0.2, 2.1, Vec3::new(5.0, -1.0, 0.5));
    let inverse = pose.inverted().unwrap();
    assert!((pose * inverse).approx_eq(&Pose::IDENTITY, 1e-12));
}

#[test]
fn singular_matrix_cannot_be_inverted() {
    let flat = DMat4::from_scale(Vec3::new(1.0, 1.0, 0.0));
    let pose = Pose::from_matrix(flat, Validation::Skip).unwrap();
    assert!(matches!(pose.inverted(), Err(GeometryError::InvalidPose(_))));
}

// =============================================================================
// ORIENTATION REPRESENTATIONS
// =============================================================================

#[test]
fn quaternion_round_trip() {
    let q = DQuat::from_axis_angle(Vec3::new(1.0, 2.0, 3.0).normalize(), 0.8);
    let mut pose = Pose::identity();
    pose.set_quaternion(q).unwrap();
    let back = pose.quaternion().unwrap();
    // q and -q are the same rotation
    assert_abs_diff_eq!(back.dot(q).abs(), 1.0, epsilon = 1e-12);
}

#[test]
fn euler_round_trip() {
    let mut pose = Pose::from_rodrigues(Vec3::ZERO, Vec3::new(1.0, 1.0, 1.0));
    pose.set_euler_angles(0.1, -0.3, 0.5).unwrap();
    let (x, y, z) = pose.euler_angles().unwrap();
    assert_abs_diff_eq!(x, 0.1, epsilon = 1e-12);
    assert_abs_diff_eq!(y, -0.3, epsilon = 1e-12);
    assert_abs_diff_eq!(z, 0.5, epsilon = 1e-12);
    assert_eq!(pose.translation(), Vec3::new(1.0, 1.0, 1.0));
}

#[test]
fn rodrigues_round_trip() {
    let vector = Vec3::new(0.2, -0.4, 0.9);
    let pose = Pose::from_rodrigues(vector, Vec3::ZERO);
    assert_vec_eq(pose.rodrigues().unwrap(), vector, 1e-12);
}

#[test]
fn orientation_setter_rejects_shear() {
    let mut pose = Pose::identity();
    let shear = DMat3::from_cols(Vec3::X, Vec3::new(0.5, 1.0, 0.0), Vec3::Z);
    assert!(pose.set_orientation_matrix(shear, Validation::Enforce).is_err());
    assert_eq!(pose, Pose::IDENTITY, "failed setter must not commit");
}

#[test]
fn in_place_helpers() {
    let mut pose = Pose::identity();
    pose.translate(Vec3::X);
    pose.rotate(DMat3::from_rotation_z(PI), Validation::Enforce).unwrap();
    assert_vec_eq(pose.translation(), Vec3::new(-1.0, 0.0, 0.0), 1e-12);
    assert_vec_eq(pose.transform_direction(Vec3::X), Vec3::new(-1.0, 0.0, 0.0), 1e-12);
}

#[test]
fn serde_uses_row_major_array_and_validates() {
    let pose = Pose::from_euler(0.3, 0.2, 0.1, Vec3::new(1.0, 2.0, 3.0));
    let json = serde_json::to_string(&pose).unwrap();
    let back: Pose = serde_json::from_str(&json).unwrap();
    assert!(back.approx_eq(&pose, 1e-12));

    let scaled = "[2.0,0.0,0.0,0.0, 0.0,1.0,0.0,0.0, 0.0,0.0,1.0,0.0, 0.0,0.0,0.0,1.0]";
    assert!(serde_json::from_str::<Pose>(scaled).is_err());
}

// =============================================================================
// PROPERTIES
// =============================================================================

proptest! {
    #[test]
    fn inverse_round_trips_points(
        rx in -PI..PI, ry in -PI..PI, rz in -PI..PI,
        tx in -100.0..100.0f64, ty in -100.0..100.0f64, tz in -100.0..100.0f64,
        px in -100.0..100.0f64, py in -100.0..100.0f64, pz in -100.0..100.0f64,
    ) {
        let rotation = DMat3::from_quat(DQuat::from_euler(EulerRot::XYZ, rx, ry, rz));
        let pose = Pose::from_rotation_translation(rotation, Vec3::new(tx, ty, tz), Validation::Enforce).unwrap();
        let p = Vec3::new(px, py, pz);
        let back = pose.inverted().unwrap() * (pose * p);
        prop_assert!((back - p).length() < 1e-9);
    }
}
