//! Tests for the Vec3 helpers.

use super::*;

#[test]
fn min_max_of_empty_is_none() {
    assert!(min_max(std::iter::empty()).is_none());
}

#[test]
fn min_max_of_single_point_is_degenerate() {
    let p = Vec3::new(1.0, 2.0, 3.0);
    assert_eq!(min_max([p]), Some((p, p)));
}

#[test]
fn approx_eq_rejects_distant_points() {
    assert!(!approx_eq(Vec3::ZERO, Vec3::X, 1e-3));
}
