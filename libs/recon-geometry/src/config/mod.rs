//! Kernel-level configuration helpers building on the shared `config` crate.
//!
//! Geometry components take a [`KernelConfig`] instead of reading literal
//! constants, so callers can tighten or loosen tolerances per call site.

use config::constants::GlobalConfig;

use crate::error::GeometryResult;

/// Geometry kernel configuration wrapper.
///
/// # Examples
/// ```
/// use recon_geometry::config::KernelConfig;
/// let cfg = KernelConfig::default();
/// assert!(cfg.tolerance > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KernelConfig {
    /// Generic numeric tolerance forwarded to predicates.
    pub tolerance: f64,
    /// Tolerance of the rigid pose orthonormality check.
    pub pose_tolerance: f64,
    /// Epsilon given to rays built by kernel helpers.
    pub ray_delta: f64,
    /// Minimum partition size of parallel reductions.
    pub parallel_min_chunk: usize,
}

impl KernelConfig {
    /// Creates a new configuration from explicit values.
    ///
    /// # Examples
    /// ```
    /// use recon_geometry::config::KernelConfig;
    /// let cfg = KernelConfig::new(1.0e-8, 1.0e-5, 1.0e-12, 64).unwrap();
    /// assert_eq!(cfg.parallel_min_chunk, 64);
    /// ```
    pub fn new(
        tolerance: f64,
        pose_tolerance: f64,
        ray_delta: f64,
        parallel_min_chunk: usize,
    ) -> GeometryResult<Self> {
        let cfg = GlobalConfig::new(tolerance, pose_tolerance, ray_delta, parallel_min_chunk)?;
        Ok(cfg.into())
    }

    /// Returns a copy with a different parallel partition size.
    pub fn with_parallel_min_chunk(self, parallel_min_chunk: usize) -> GeometryResult<Self> {
        Self::new(
            self.tolerance,
            self.pose_tolerance,
            self.ray_delta,
            parallel_min_chunk,
        )
    }
}

impl From<GlobalConfig> for KernelConfig {
    fn from(cfg: GlobalConfig) -> Self {
        Self {
            tolerance: cfg.tolerance,
            pose_tolerance: cfg.pose_tolerance,
            ray_delta: cfg.ray_delta,
            parallel_min_chunk: cfg.parallel_min_chunk,
        }
    }
}

impl Default for KernelConfig {
    fn default() -> Self {
        GlobalConfig::default().into()
    }
}

#[cfg(test)]
mod tests;
