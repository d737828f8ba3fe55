//! Infinite plane through an origin with a unit normal.
//!
//! A plane has no bounding box, so it implements [`Geometry`] but not
//! `FiniteGeometry`.

use serde::{Deserialize, Serialize};

use crate::config::KernelConfig;
use crate::core::vec3::Vec3;
use crate::error::{GeometryError, GeometryResult};
use crate::geometry::Geometry;
use crate::primitives::aabox::AABox;
use crate::ray::{Intersection, Ray};
use config::constants::approx_zero;

/// Plane given by a point on it and a unit normal.
///
/// # Examples
/// ```
/// use recon_geometry::{Plane, Vec3};
///
/// let plane = Plane::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 4.0)).unwrap();
/// assert_eq!(plane.signed_distance(Vec3::new(3.0, 1.0, -2.0)), -2.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    origin: Vec3,
    normal: Vec3,
}

impl Plane {
    /// Creates a plane; the normal is normalized and must not be zero.
    pub fn new(origin: Vec3, normal: Vec3) -> GeometryResult<Self> {
        Self::new_with(origin, normal, &KernelConfig::default())
    }

    /// [`Plane::new`] rejecting normals shorter than `config.tolerance`.
    pub fn new_with(origin: Vec3, normal: Vec3, config: &KernelConfig) -> GeometryResult<Self> {
        let length = normal.length();
        if !length.is_finite() || length < config.tolerance {
            return Err(GeometryError::DegenerateGeometry(format!(
                "plane normal {normal} cannot be normalized"
            )));
        }
        Ok(Self {
            origin,
            normal: normal / length,
        })
    }

    /// Plane through three points, normal following their winding.
    pub fn from_points(a: Vec3, b: Vec3, c: Vec3) -> GeometryResult<Self> {
        Self::new(a, (b - a).cross(c - a))
    }

    /// A point on the plane.
    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Unit normal.
    #[inline]
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Distance along the normal; positive on the normal side.
    pub fn signed_distance(&self, point: Vec3) -> f64 {
        (point - self.origin).dot(self.normal)
    }

    /// Orthogonal projection of `point` onto the plane.
    pub fn project(&self, point: Vec3) -> Vec3 {
        point - self.normal * self.signed_distance(point)
    }

    /// The same plane with the normal reversed.
    pub fn flipped(&self) -> Self {
        Self {
            origin: self.origin,
            normal: -self.normal,
        }
    }
}

impl Geometry for Plane {
    fn closest_point(&self, point: Vec3) -> Vec3 {
        self.project(point)
    }

    fn distance_to(&self, point: Vec3) -> f64 {
        self.signed_distance(point).abs()
    }

    /// Corners on both sides, or any corner on the plane, count as a hit.
    fn intersects_box(&self, bbox: &AABox) -> bool {
        let mut above = false;
        let mut below = false;
        for corner in bbox.corners() {
            let d = self.signed_distance(corner);
            if approx_zero(d) {
                return true;
            }
            above |= d > 0.0;
            below |= d < 0.0;
        }
        above && below
    }

    fn intersect_ray(&self, ray: &Ray) -> Vec<Intersection> {
        let denom = self.normal.dot(ray.direction());
        if denom.abs() < ray.delta() {
            return Vec::new();
        }
        let t = (self.origin - ray.origin()).dot(self.normal) / denom;
        if t < 0.0 {
            return Vec::new();
        }
        vec![Intersection::on_ray(ray, t)]
    }
}
