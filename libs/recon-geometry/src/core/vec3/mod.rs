//! Thin wrapper around `glam::DVec3` shared across kernel modules.
//!
//! The helper functions keep componentwise reductions readable while avoiding
//! direct dependencies on `glam` from higher layers.

pub use glam::DVec3 as Vec3;

/// Componentwise minimum and maximum of a non-empty run of points.
///
/// Returns `None` for an empty iterator.
///
/// # Examples
/// ```
/// use recon_geometry::core::vec3::{min_max, Vec3};
/// let (lo, hi) = min_max([Vec3::new(1.0, -2.0, 0.0), Vec3::new(-1.0, 2.0, 3.0)]).unwrap();
/// assert_eq!(lo, Vec3::new(-1.0, -2.0, 0.0));
/// assert_eq!(hi, Vec3::new(1.0, 2.0, 3.0));
/// ```
pub fn min_max<I>(points: I) -> Option<(Vec3, Vec3)>
where
    I: IntoIterator<Item = Vec3>,
{
    let mut iter = points.into_iter();
    let first = iter.next()?;
    Some(iter.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p))))
}

/// Returns `true` if every component of `a` is within `tolerance` of `b`.
///
/// # Examples
/// ```
/// use recon_geometry::core::vec3::{approx_eq, Vec3};
/// assert!(approx_eq(Vec3::ONE, Vec3::splat(1.0 + 1e-12), 1e-9));
/// ```
pub fn approx_eq(a: Vec3, b: Vec3, tolerance: f64) -> bool {
    a.abs_diff_eq(b, tolerance)
}

#[cfg(test)]
mod tests;
