//! # Tests for Config Constants
//!
//! Unit tests verifying the relationships between configuration constants.

use crate::constants::*;

// =============================================================================
// PRECISION TESTS
// =============================================================================

#[test]
fn test_epsilon_is_small() {
    assert!(EPSILON_TOLERANCE < 1e-6, "EPSILON_TOLERANCE should be small for precision");
}

#[test]
fn test_pose_tolerance_looser_than_epsilon() {
    assert!(
        POSE_ORTHONORMALITY_TOLERANCE > EPSILON_TOLERANCE,
        "pose checks must tolerate accumulated drift"
    );
}

#[test]
fn test_ray_delta_below_epsilon() {
    assert!(RAY_DELTA <= EPSILON_TOLERANCE);
}

// =============================================================================
// SPATIAL INDEX TESTS
// =============================================================================

#[test]
fn test_octree_limits_reasonable() {
    assert!(OCTREE_MAX_DEPTH >= 4);
    assert!(OCTREE_MAX_DEPTH <= 32);
    assert!(OCTREE_MAX_LEAF_ELEMENTS >= 1);
}

// =============================================================================
// HELPER TESTS
// =============================================================================

#[test]
fn test_approx_equal() {
    assert!(approx_equal(1.0, 1.0));
    assert!(approx_equal(1.0, 1.0 + EPSILON_TOLERANCE / 2.0));
    assert!(!approx_equal(1.0, 1.0 + EPSILON_TOLERANCE * 2.0));
}

#[test]
fn test_approx_zero() {
    assert!(approx_zero(0.0));
    assert!(approx_zero(-EPSILON_TOLERANCE / 2.0));
    assert!(!approx_zero(EPSILON_TOLERANCE * 2.0));
}
