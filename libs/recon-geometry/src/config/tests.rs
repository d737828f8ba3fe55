//! Tests covering kernel configuration behavior.

use super::*;
use crate::error::GeometryError;
use config::constants::{ConfigError, EPSILON_TOLERANCE, PARALLEL_MIN_CHUNK, POSE_ORTHONORMALITY_TOLERANCE};

#[test]
fn default_matches_constants() {
    let cfg = KernelConfig::default();
    assert_eq!(cfg.tolerance, EPSILON_TOLERANCE);
    assert_eq!(cfg.pose_tolerance, POSE_ORTHONORMALITY_TOLERANCE);
    assert_eq!(cfg.parallel_min_chunk, PARALLEL_MIN_CHUNK);
}

#[test]
fn builder_validates_input() {
    let err = KernelConfig::new(0.0, 1.0e-5, 1.0e-12, 24).unwrap_err();
    assert_eq!(err, GeometryError::Config(ConfigError::InvalidTolerance(0.0)));
}

#[test]
fn chunk_override_keeps_tolerances() {
    let cfg = KernelConfig::default().with_parallel_min_chunk(3).unwrap();
    assert_eq!(cfg.parallel_min_chunk, 3);
    assert_eq!(cfg.tolerance, EPSILON_TOLERANCE);
    assert!(KernelConfig::default().with_parallel_min_chunk(0).is_err());
}
