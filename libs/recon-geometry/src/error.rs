//! # Error Types
//!
//! Error types for kernel operations. All errors are explicit and provide
//! clear debugging information.
//!
//! ## Error Policy
//!
//! - Invariant violations (non-rigid pose, `min > max` box) fail at the point
//!   of construction or mutation, values are never clamped
//! - Queries without a result (ray miss, filtered nearest) are `None` or an
//!   empty `Vec`, never an error
//! - Precondition mismatches fail fast instead of guessing the caller's intent

use thiserror::Error;

use crate::core::vec3::Vec3;
use config::constants::ConfigError;

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur during kernel operations.
///
/// ## Example
///
/// ```rust
/// use recon_geometry::{AABox, GeometryError, Vec3};
///
/// match AABox::new(Vec3::ONE, Vec3::ZERO) {
///     Err(GeometryError::InvalidBox { .. }) => {}
///     other => panic!("unexpected: {other:?}"),
/// }
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// The matrix is not a rigid transform, or cannot be inverted.
    #[error("Invalid pose: {0}")]
    InvalidPose(String),

    /// A box corner pair with `min > max` on some axis.
    #[error("Invalid box: min {min} exceeds max {max}")]
    InvalidBox {
        /// Requested minimum corner
        min: Vec3,
        /// Requested maximum corner
        max: Vec3,
    },

    /// A rectangle that is not flat along its perpendicular axis.
    #[error("Invalid rectangle: {0}")]
    InvalidRectangle(String),

    /// Arguments that are individually valid but cannot be combined.
    #[error("Precondition mismatch: {0}")]
    PreconditionMismatch(String),

    /// A reduction or fit was asked for over zero elements.
    #[error("Empty input: {0}")]
    EmptyInput(&'static str),

    /// A face references a vertex beyond the vertex arena.
    #[error("Vertex index {index} out of range for {len} vertices")]
    IndexOutOfRange {
        /// Offending vertex index
        index: usize,
        /// Number of vertices available
        len: usize,
    },

    /// Geometry too degenerate for the requested operation.
    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// A worker of a parallel reduction failed.
    #[error("Parallel reduction failed: {0}")]
    Parallel(String),

    /// Invalid configuration values.
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

// =============================================================================
// RESULT TYPE ALIAS
// =============================================================================

/// Result type alias for kernel operations.
pub type GeometryResult<T> = Result<T, GeometryError>;

// =============================================================================
// TESTS
// =============================================================================
