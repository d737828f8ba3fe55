//! Point primitive: a position with an optional surface normal.
//!
//! Points are the elements of a [`PointCloud`](crate::point_cloud::PointCloud)
//! and the vertex arena of a [`Mesh`].

use serde::{Deserialize, Serialize};

use crate::core::vec3::Vec3;
use crate::geometry::{FiniteGeometry, Geometry};
use crate::mesh::Mesh;
use crate::primitives::aabox::AABox;
use crate::ray::{Intersection, Ray};

/// A single point in space.
///
/// # Examples
/// ```
/// use recon_geometry::{Geometry, Point, Vec3};
///
/// let p = Point::new(Vec3::new(1.0, 2.0, 2.0));
/// assert_eq!(p.distance_to(Vec3::ZERO), 3.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Position in world space.
    pub position: Vec3,
    /// Surface normal, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normal: Option<Vec3>,
}

impl Point {
    /// Creates a point without a normal.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            normal: None,
        }
    }

    /// Creates a point with a normal; the normal is normalized.
    pub fn with_normal(position: Vec3, normal: Vec3) -> Self {
        Self {
            position,
            normal: Some(normal.normalize_or_zero()),
        }
    }

    /// Normal, or zero when unknown.
    #[inline]
    pub fn normal_or_zero(&self) -> Vec3 {
        self.normal.unwrap_or(Vec3::ZERO)
    }
}

impl From<Vec3> for Point {
    fn from(position: Vec3) -> Self {
        Self::new(position)
    }
}

impl Geometry for Point {
    fn closest_point(&self, _point: Vec3) -> Vec3 {
        self.position
    }

    fn intersects_box(&self, bbox: &AABox) -> bool {
        bbox.contains(self.position)
    }

    /// A ray hits a point when it passes within the ray's delta of it,
    /// ahead of the origin.
    fn intersect_ray(&self, ray: &Ray) -> Vec<Intersection> {
        if ray.is_degenerate() {
            return Vec::new();
        }
        let t = (self.position - ray.origin()).dot(ray.direction());
        if t < 0.0 {
            return Vec::new();
        }
        let foot = ray.at(t);
        if (foot - self.position).length() > ray.delta() {
            return Vec::new();
        }
        vec![Intersection::new(t, self.position)]
    }
}

impl FiniteGeometry for Point {
    fn bbox(&self) -> AABox {
        AABox::at_point(self.position)
    }

    fn to_mesh(&self) -> Mesh {
        Mesh::assemble(vec![self.position], &[])
    }

    fn centroid(&self) -> Vec3 {
        self.position
    }
}

#[cfg(test)]
mod tests;
