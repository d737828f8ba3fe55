//! # Rays and Hit Records
//!
//! A [`Ray`] carries its precomputed inverse direction for the slab test and
//! an epsilon (`delta`): denominators smaller than `delta` mean "no
//! intersection", never a division.

use serde::{Deserialize, Serialize};

use crate::config::KernelConfig;
use crate::core::vec3::Vec3;
use config::constants::RAY_DELTA;

// =============================================================================
// RAY
// =============================================================================

/// Half-line from `origin` along a unit `direction`.
///
/// # Examples
/// ```
/// use recon_geometry::{Ray, Vec3};
/// let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 2.0));
/// assert_eq!(ray.direction(), Vec3::Z);
/// assert_eq!(ray.at(3.0), Vec3::new(0.0, 0.0, 3.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    origin: Vec3,
    direction: Vec3,
    inverse_direction: Vec3,
    delta: f64,
}

impl Ray {
    /// Creates a ray with the default epsilon.
    ///
    /// The direction is normalized; a zero direction stays zero and hits
    /// nothing.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self::with_delta(origin, direction, RAY_DELTA)
    }

    /// Creates a ray with the epsilon of `config`.
    pub fn from_config(origin: Vec3, direction: Vec3, config: &KernelConfig) -> Self {
        Self::with_delta(origin, direction, config.ray_delta)
    }

    /// Creates a ray with an explicit epsilon.
    pub fn with_delta(origin: Vec3, direction: Vec3, delta: f64) -> Self {
        let direction = direction.normalize_or_zero();
        Self {
            origin,
            direction,
            inverse_direction: direction.recip(),
            delta: delta.abs(),
        }
    }

    /// Ray origin.
    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Unit direction (zero for a degenerate ray).
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Componentwise reciprocal of the direction; infinite for zero components.
    #[inline]
    pub fn inverse_direction(&self) -> Vec3 {
        self.inverse_direction
    }

    /// Epsilon below which denominators count as zero.
    #[inline]
    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Point at distance `t` along the ray.
    #[inline]
    pub fn at(&self, t: f64) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Returns `true` if the direction is (near) zero.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.direction.length_squared() < self.delta * self.delta
    }
}

// =============================================================================
// HIT RECORDS
// =============================================================================

/// A single ray hit: distance along the ray and world-space position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Intersection {
    /// Distance from the ray origin.
    pub distance: f64,
    /// World-space hit position.
    pub position: Vec3,
}

impl Intersection {
    /// Creates a hit record.
    pub fn new(distance: f64, position: Vec3) -> Self {
        Self { distance, position }
    }

    /// Builds the hit record at distance `t` along `ray`.
    pub fn on_ray(ray: &Ray, t: f64) -> Self {
        Self::new(t, ray.at(t))
    }
}

/// A ray hit that also identifies which collection element was struck.
#[derive(Debug)]
pub struct MultiGeometryIntersection<'a, T> {
    /// Hit distance and position.
    pub intersection: Intersection,
    /// Position of the element in its collection.
    pub index: usize,
    /// The element that was hit.
    pub geometry: &'a T,
}

impl<T> Clone for MultiGeometryIntersection<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for MultiGeometryIntersection<'_, T> {}

impl<'a, T> MultiGeometryIntersection<'a, T> {
    /// Creates a hit record for element `index`.
    pub fn new(intersection: Intersection, index: usize, geometry: &'a T) -> Self {
        Self {
            intersection,
            index,
            geometry,
        }
    }

    /// Hit distance along the ray.
    #[inline]
    pub fn distance(&self) -> f64 {
        self.intersection.distance
    }
}

/// Picks the hit closest to the ray origin.
///
/// # Examples
/// ```
/// use recon_geometry::ray::{closest_intersection, Intersection, MultiGeometryIntersection};
/// use recon_geometry::Vec3;
///
/// let (a, b) = ("far", "near");
/// let hits = [
///     MultiGeometryIntersection::new(Intersection::new(5.0, Vec3::ZERO), 0, &a),
///     MultiGeometryIntersection::new(Intersection::new(2.0, Vec3::ZERO), 1, &b),
/// ];
/// assert_eq!(closest_intersection(&hits).unwrap().index, 1);
/// ```
pub fn closest_intersection<'h, 'a, T>(
    hits: &'h [MultiGeometryIntersection<'a, T>],
) -> Option<&'h MultiGeometryIntersection<'a, T>> {
    hits.iter().min_by(|a, b| {
        a.distance()
            .total_cmp(&b.distance())
            .then(a.index.cmp(&b.index))
    })
}

/// Sorts hits by distance, then by element index.
pub fn sort_hits<T>(hits: &mut [MultiGeometryIntersection<'_, T>]) {
    hits.sort_by(|a, b| {
        a.distance()
            .total_cmp(&b.distance())
            .then(a.index.cmp(&b.index))
    });
}

// =============================================================================
// NEAREST
// =============================================================================

/// Result of a nearest-element query.
#[derive(Debug)]
pub struct NearestHit<'a, T> {
    /// Position of the element in its collection.
    pub index: usize,
    /// The nearest element.
    pub geometry: &'a T,
    /// Distance from the query point to the element.
    pub distance: f64,
    /// Closest point of the element to the query point.
    pub point: Vec3,
}

impl<T> Clone for NearestHit<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NearestHit<'_, T> {}

impl<'a, T> NearestHit<'a, T> {
    /// Returns `true` if `self` is strictly better than `other`: smaller
    /// distance, or equal distance and lower index.
    pub fn is_better_than(&self, other: &NearestHit<'a, T>) -> bool {
        match self.distance.total_cmp(&other.distance) {
            std::cmp::Ordering::Less => true,
            std::cmp::Ordering::Equal => self.index < other.index,
            std::cmp::Ordering::Greater => false,
        }
    }
}
