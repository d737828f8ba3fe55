//! Centralized configuration values shared across the geometry kernel.
//!
//! Each public item in this module documents its purpose and provides a minimal
//! usage example so that downstream crates can remain declarative and avoid
//! scattering literals.

use std::fmt;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Numerical tolerance used for generic float comparisons in geometry kernels.
///
/// # Examples
/// ```
/// use config::constants::EPSILON_TOLERANCE;
/// assert!(EPSILON_TOLERANCE < 1.0e-6);
/// ```
pub const EPSILON_TOLERANCE: f64 = 1.0e-9;

/// Tolerance of the rigid pose check: `R·Rᵀ = I` and `|det R| = 1` are
/// compared element-wise against this value.
///
/// Poses accumulate floating-point drift through long composition chains, so
/// this is much looser than [`EPSILON_TOLERANCE`].
///
/// # Examples
/// ```
/// use config::constants::POSE_ORTHONORMALITY_TOLERANCE;
/// assert_eq!(POSE_ORTHONORMALITY_TOLERANCE, 1.0e-5);
/// ```
pub const POSE_ORTHONORMALITY_TOLERANCE: f64 = 1.0e-5;

/// Default ray epsilon (`Delta`).
///
/// Denominators below this magnitude (near-parallel ray/plane, near-zero
/// direction components in the slab test) are treated as "no intersection"
/// instead of being divided by.
///
/// # Examples
/// ```
/// use config::constants::RAY_DELTA;
/// assert!(RAY_DELTA > 0.0);
/// ```
pub const RAY_DELTA: f64 = 1.0e-12;

// =============================================================================
// PARALLELISM
// =============================================================================

/// Minimum number of elements per partition in parallel reductions.
///
/// Partitions smaller than this cost more in scheduling and merge locking
/// than they save.
///
/// # Examples
/// ```
/// use config::constants::PARALLEL_MIN_CHUNK;
/// assert!(PARALLEL_MIN_CHUNK >= 1);
/// ```
pub const PARALLEL_MIN_CHUNK: usize = 1024;

// =============================================================================
// SPATIAL INDEX LIMITS
// =============================================================================

/// Maximum subdivision depth of the octree spatial index.
///
/// # Examples
/// ```
/// use config::constants::OCTREE_MAX_DEPTH;
/// assert!(OCTREE_MAX_DEPTH > 0);
/// ```
pub const OCTREE_MAX_DEPTH: usize = 12;

/// Number of elements a leaf may hold before the octree splits it.
///
/// # Examples
/// ```
/// use config::constants::OCTREE_MAX_LEAF_ELEMENTS;
/// assert!(OCTREE_MAX_LEAF_ELEMENTS >= 1);
/// ```
pub const OCTREE_MAX_LEAF_ELEMENTS: usize = 8;

// =============================================================================
// GLOBAL CONFIG
// =============================================================================

/// Immutable snapshot of global configuration settings that can be shared
/// between crates.
///
/// # Examples
/// ```
/// use config::constants::GlobalConfig;
/// let config = GlobalConfig::default();
/// assert!(config.tolerance > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobalConfig {
    /// Generic numeric tolerance propagated into geometry kernels.
    pub tolerance: f64,
    /// Tolerance of the rigid pose orthonormality check.
    pub pose_tolerance: f64,
    /// Default ray epsilon.
    pub ray_delta: f64,
    /// Minimum partition size for parallel reductions.
    pub parallel_min_chunk: usize,
}

impl GlobalConfig {
    /// Builds a configuration enforcing strict validation of the supplied
    /// values.
    ///
    /// # Examples
    /// ```
    /// use config::constants::GlobalConfig;
    /// let cfg = GlobalConfig::new(1.0e-6, 1.0e-4, 1.0e-10, 256).expect("valid config");
    /// assert_eq!(cfg.parallel_min_chunk, 256);
    /// ```
    pub fn new(
        tolerance: f64,
        pose_tolerance: f64,
        ray_delta: f64,
        parallel_min_chunk: usize,
    ) -> Result<Self, ConfigError> {
        if !(tolerance > 0.0) {
            return Err(ConfigError::InvalidTolerance(tolerance));
        }
        if !(pose_tolerance > 0.0) {
            return Err(ConfigError::InvalidPoseTolerance(pose_tolerance));
        }
        if !(ray_delta > 0.0) {
            return Err(ConfigError::InvalidRayDelta(ray_delta));
        }
        if parallel_min_chunk == 0 {
            return Err(ConfigError::InvalidChunkSize(parallel_min_chunk));
        }
        Ok(Self {
            tolerance,
            pose_tolerance,
            ray_delta,
            parallel_min_chunk,
        })
    }
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            tolerance: EPSILON_TOLERANCE,
            pose_tolerance: POSE_ORTHONORMALITY_TOLERANCE,
            ray_delta: RAY_DELTA,
            parallel_min_chunk: PARALLEL_MIN_CHUNK,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Raised when the generic tolerance is zero, negative or NaN.
    InvalidTolerance(f64),
    /// Raised when the pose tolerance is zero, negative or NaN.
    InvalidPoseTolerance(f64),
    /// Raised when the ray epsilon is zero, negative or NaN.
    InvalidRayDelta(f64),
    /// Raised when the parallel partition size is zero.
    InvalidChunkSize(usize),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidTolerance(value) => {
                write!(f, "tolerance must be positive: {value}")
            }
            ConfigError::InvalidPoseTolerance(value) => {
                write!(f, "pose_tolerance must be positive: {value}")
            }
            ConfigError::InvalidRayDelta(value) => {
                write!(f, "ray_delta must be positive: {value}")
            }
            ConfigError::InvalidChunkSize(value) => {
                write!(f, "parallel_min_chunk must be >= 1: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Checks if two floats are approximately equal using [`EPSILON_TOLERANCE`].
///
/// # Examples
/// ```
/// use config::constants::approx_equal;
/// assert!(approx_equal(1.0, 1.0 + 1e-12));
/// assert!(!approx_equal(1.0, 1.001));
/// ```
#[inline]
pub fn approx_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON_TOLERANCE
}

/// Checks if a float is approximately zero using [`EPSILON_TOLERANCE`].
///
/// # Examples
/// ```
/// use config::constants::approx_zero;
/// assert!(approx_zero(1e-12));
/// ```
#[inline]
pub fn approx_zero(value: f64) -> bool {
    value.abs() < EPSILON_TOLERANCE
}
