//! # Plane Fitting
//!
//! Least-squares plane through a weighted point set: the plane passes through
//! the weighted centroid and its normal is the eigenvector of the weighted
//! covariance matrix with the smallest eigenvalue.
//!
//! The covariance is a `nalgebra` matrix and the symmetric eigenproblem is
//! solved by its `symmetric_eigen` decomposition.
//!
//! The sign of the fitted normal is unspecified.

use nalgebra::{Matrix3, Vector3};
use tracing::trace;

use crate::config::KernelConfig;
use crate::core::vec3::Vec3;
use crate::error::{GeometryError, GeometryResult};
use crate::geometry::{FiniteGeometry, Shape};
use crate::primitives::plane::Plane;

/// Fits a plane to equally weighted points.
///
/// # Examples
/// ```
/// use recon_geometry::ops::plane_fit::fit_plane;
/// use recon_geometry::Vec3;
///
/// let points = [Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::new(1.0, 1.0, 0.0)];
/// let plane = fit_plane(&points).unwrap();
/// assert!((plane.normal().z.abs() - 1.0).abs() < 1e-12);
/// ```
pub fn fit_plane(points: &[Vec3]) -> GeometryResult<Plane> {
    let weights = vec![1.0; points.len()];
    fit_plane_weighted(points, &weights)
}

/// Fits a plane to points with non-negative weights.
pub fn fit_plane_weighted(points: &[Vec3], weights: &[f64]) -> GeometryResult<Plane> {
    fit_plane_weighted_with(points, weights, &KernelConfig::default())
}

/// [`fit_plane_weighted`] with the tolerances of `config`.
///
/// The point set is rejected as collinear when the middle covariance
/// eigenvalue is within `config.tolerance` of zero relative to the largest.
pub fn fit_plane_weighted_with(
    points: &[Vec3],
    weights: &[f64],
    config: &KernelConfig,
) -> GeometryResult<Plane> {
    if points.is_empty() {
        return Err(GeometryError::EmptyInput("plane fit over zero points"));
    }
    if points.len() != weights.len() {
        return Err(GeometryError::PreconditionMismatch(format!(
            "{} points but {} weights",
            points.len(),
            weights.len()
        )));
    }
    if points.len() < 3 {
        return Err(GeometryError::DegenerateGeometry(format!(
            "plane fit needs at least 3 points, got {}",
            points.len()
        )));
    }
    if let Some(bad) = weights.iter().find(|w| !(w.is_finite() && **w >= 0.0)) {
        return Err(GeometryError::PreconditionMismatch(format!(
            "plane fit weight {bad} is not a finite non-negative number"
        )));
    }

    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return Err(GeometryError::DegenerateGeometry(
            "plane fit weights sum to zero".to_string(),
        ));
    }
    let centroid = points
        .iter()
        .zip(weights)
        .fold(Vec3::ZERO, |acc, (p, w)| acc + *p * *w)
        / total;

    let covariance = points
        .iter()
        .zip(weights)
        .fold(Matrix3::<f64>::zeros(), |acc, (p, w)| {
            let d = *p - centroid;
            let d = Vector3::new(d.x, d.y, d.z);
            acc + d * d.transpose() * *w
        });

    let eigen = covariance.symmetric_eigen();
    let values = eigen.eigenvalues;
    let mut order = [0, 1, 2];
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));
    let [smallest, middle, largest] = order.map(|i| values[i]);
    trace!(smallest, middle, largest, "plane fit eigenvalues");

    if largest <= f64::MIN_POSITIVE || middle <= config.tolerance * largest {
        return Err(GeometryError::DegenerateGeometry(
            "points are coincident or collinear".to_string(),
        ));
    }

    let column = eigen.eigenvectors.column(order[0]);
    let normal = Vec3::new(column[0], column[1], column[2]);
    Plane::new_with(centroid, normal, config)
}

/// Fits a plane to the elements of a shape, each element contributing its
/// centroid with its size weight (faces by area, points equally).
pub fn fit_plane_to_shape<S: Shape>(shape: &S) -> GeometryResult<Plane> {
    let centroids: Vec<Vec3> = shape
        .geometries()
        .iter()
        .map(FiniteGeometry::centroid)
        .collect();
    fit_plane_weighted(&centroids, &shape.size_weights())
}

/// Root-mean-square distance of `points` to `plane`; zero when empty.
pub fn rms_residual(plane: &Plane, points: &[Vec3]) -> f64 {
    if points.is_empty() {
        return 0.0;
    }
    let sum: f64 = points
        .iter()
        .map(|p| plane.signed_distance(*p).powi(2))
        .sum();
    (sum / points.len() as f64).sqrt()
}
