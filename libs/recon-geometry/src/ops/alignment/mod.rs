//! # Alignment Measures
//!
//! Kernel-level pieces of surface accuracy metrics, written once against the
//! capability traits so a mesh and a point cloud compare the same way.

use tracing::debug;

use crate::core::vec3::Vec3;
use crate::error::{GeometryError, GeometryResult};
use crate::geometry::{FiniteGeometry, GeometryCollection, Shape};
use crate::primitives::plane::Plane;

/// Unsigned angle between two normals, in radians within `[0, π/2]`.
///
/// Opposite normals describe the same orientation and give zero.
///
/// # Examples
/// ```
/// use recon_geometry::ops::alignment::angle_between_normals;
/// use recon_geometry::Vec3;
///
/// let angle = angle_between_normals(Vec3::Z, -Vec3::Z).unwrap();
/// assert!(angle.abs() < 1e-12);
/// ```
pub fn angle_between_normals(a: Vec3, b: Vec3) -> GeometryResult<f64> {
    let (a, b) = (a.normalize_or_zero(), b.normalize_or_zero());
    if a == Vec3::ZERO || b == Vec3::ZERO {
        return Err(GeometryError::DegenerateGeometry(
            "angle between a zero normal".to_string(),
        ));
    }
    // atan2 stays accurate near zero where acos does not
    Ok(a.cross(b).length().atan2(a.dot(b).abs()))
}

/// Unsigned angle between two planes.
pub fn angle_between_planes(a: &Plane, b: &Plane) -> f64 {
    let (n, m) = (a.normal(), b.normal());
    n.cross(m).length().atan2(n.dot(m).abs())
}

/// Size-weighted mean distance from the elements of `source` to `target`.
///
/// Each element of `source` contributes the distance from its centroid to the
/// nearest element of `target`, weighted by its size weight. Elements with no
/// target element within `max_distance` are left out. Returns `None` when no
/// weight remains.
pub fn mean_weighted_distance<S, T, C>(
    source: &S,
    target: &C,
    max_distance: Option<f64>,
) -> Option<f64>
where
    S: Shape,
    T: FiniteGeometry,
    C: GeometryCollection<T>,
{
    let weights = source.size_weights();
    let mut weighted_sum = 0.0;
    let mut total_weight = 0.0;
    let mut unmatched = 0usize;
    for (element, weight) in source.geometries().iter().zip(weights) {
        match target.nearest(element.centroid(), None, max_distance) {
            Some(hit) => {
                weighted_sum += weight * hit.distance;
                total_weight += weight;
            }
            None => unmatched += 1,
        }
    }
    debug!(
        elements = source.geometries().len(),
        unmatched, total_weight, "weighted distance"
    );
    (total_weight > 0.0).then(|| weighted_sum / total_weight)
}

#[cfg(test)]
mod tests;
