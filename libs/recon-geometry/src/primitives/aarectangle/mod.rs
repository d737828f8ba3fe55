//! # Axis-Aligned Rectangle
//!
//! A box that is flat along one axis, tagged with that axis and the sign of
//! its normal. Rectangles only combine with rectangles perpendicular to the
//! same axis; mixing orientations is a [`GeometryError::PreconditionMismatch`].

use serde::{Deserialize, Serialize};

use crate::config::KernelConfig;
use crate::core::axis::Axis;
use crate::core::vec3::Vec3;
use crate::error::{GeometryError, GeometryResult};
use crate::geometry::{FiniteGeometry, Geometry};
use crate::mesh::Mesh;
use crate::primitives::aabox::{self, AABox};
use crate::ray::{Intersection, Ray};
use config::constants::{approx_equal, EPSILON_TOLERANCE};

/// Flat axis-aligned rectangle.
///
/// # Examples
/// ```
/// use recon_geometry::{AARectangle, Vec3};
/// use recon_geometry::core::axis::Axis;
///
/// let floor = AARectangle::new(Vec3::ZERO, Vec3::new(4.0, 2.0, 0.0), Axis::Z, true).unwrap();
/// assert_eq!(floor.area(), 8.0);
/// assert_eq!(floor.normal(), Vec3::Z);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AARectangle {
    bounds: AABox,
    perpendicular: Axis,
    normal_positive: bool,
}

impl AARectangle {
    /// Creates a rectangle from its corners.
    ///
    /// `min` and `max` must agree on the `perpendicular` component (within
    /// tolerance; `max` is snapped onto `min`).
    pub fn new(
        min: Vec3,
        max: Vec3,
        perpendicular: Axis,
        normal_positive: bool,
    ) -> GeometryResult<Self> {
        Self::new_with(min, max, perpendicular, normal_positive, &KernelConfig::default())
    }

    /// [`AARectangle::new`] with the flatness tolerance of `config`.
    pub fn new_with(
        min: Vec3,
        max: Vec3,
        perpendicular: Axis,
        normal_positive: bool,
        config: &KernelConfig,
    ) -> GeometryResult<Self> {
        let i = perpendicular.index();
        if (max[i] - min[i]).abs() > config.tolerance {
            return Err(GeometryError::InvalidRectangle(format!(
                "extent {} along perpendicular axis {perpendicular:?} is not flat",
                max[i] - min[i]
            )));
        }
        let mut max = max;
        max[i] = min[i];
        Ok(Self {
            bounds: AABox::new(min, max)?,
            perpendicular,
            normal_positive,
        })
    }

    /// Wraps a flat box.
    pub fn from_box(
        bounds: AABox,
        perpendicular: Axis,
        normal_positive: bool,
    ) -> GeometryResult<Self> {
        Self::new(bounds.min(), bounds.max(), perpendicular, normal_positive)
    }

    /// The flat box spanned by the rectangle.
    #[inline]
    pub fn bounds(&self) -> AABox {
        self.bounds
    }

    /// Axis the rectangle is perpendicular to.
    #[inline]
    pub fn perpendicular_dimension(&self) -> Axis {
        self.perpendicular
    }

    /// Returns `true` if the normal points along the positive axis.
    #[inline]
    pub fn is_normal_direction_positive(&self) -> bool {
        self.normal_positive
    }

    /// Unit normal.
    pub fn normal(&self) -> Vec3 {
        let unit = self.perpendicular.unit();
        if self.normal_positive {
            unit
        } else {
            -unit
        }
    }

    /// Coordinate of the rectangle along its perpendicular axis.
    #[inline]
    pub fn plane_coordinate(&self) -> f64 {
        self.bounds.min()[self.perpendicular.index()]
    }

    /// Surface area.
    pub fn area(&self) -> f64 {
        let size = self.bounds.size();
        let [u, v] = self.perpendicular.others();
        size[u.index()] * size[v.index()]
    }

    fn check_compatible(&self, other: &AARectangle) -> GeometryResult<()> {
        if self.perpendicular != other.perpendicular {
            return Err(GeometryError::PreconditionMismatch(format!(
                "rectangle perpendicular to {:?} cannot be combined with one perpendicular to {:?}",
                self.perpendicular, other.perpendicular
            )));
        }
        Ok(())
    }

    fn coplanar(&self, other: &AARectangle) -> bool {
        approx_equal(self.plane_coordinate(), other.plane_coordinate())
    }

    /// Closed test: coplanar rectangles sharing at least an edge or corner.
    ///
    /// Normal signs are not compared.
    pub fn touches(&self, other: &AARectangle) -> GeometryResult<bool> {
        self.check_compatible(other)?;
        Ok(self.coplanar(other)
            && self
                .bounds
                .intersects_on(&other.bounds, &self.perpendicular.others()))
    }

    /// Open test: coplanar rectangles with a positive-area common interior.
    pub fn overlaps(&self, other: &AARectangle) -> GeometryResult<bool> {
        self.check_compatible(other)?;
        Ok(self.coplanar(other)
            && self
                .bounds
                .overlaps_on(&other.bounds, &self.perpendicular.others()))
    }

    /// Splits `self` into the parts lying outside `other`: no fragments when
    /// covered, `[self]` without interior overlap, otherwise up to four
    /// disjoint strips.
    pub fn clip_on(&self, other: &AARectangle) -> GeometryResult<Vec<AARectangle>> {
        if !self.overlaps(other)? {
            return Ok(vec![*self]);
        }
        let fragments =
            aabox::subtract_slabs(self.bounds, &other.bounds, &self.perpendicular.others());
        Ok(fragments
            .into_iter()
            .map(|bounds| AARectangle { bounds, ..*self })
            .collect())
    }

    /// Corners counter-clockwise around the in-plane axes.
    fn corners(&self) -> [Vec3; 4] {
        let [u, v] = self.perpendicular.others();
        let (lo, hi) = (self.bounds.min(), self.bounds.max());
        let corner = |a: f64, b: f64| {
            let mut p = lo;
            p[u.index()] = a;
            p[v.index()] = b;
            p
        };
        let (u0, u1) = (lo[u.index()], hi[u.index()]);
        let (v0, v1) = (lo[v.index()], hi[v.index()]);
        [corner(u0, v0), corner(u1, v0), corner(u1, v1), corner(u0, v1)]
    }
}

impl Geometry for AARectangle {
    fn closest_point(&self, point: Vec3) -> Vec3 {
        self.bounds.closest_point(point)
    }

    fn intersects_box(&self, bbox: &AABox) -> bool {
        self.bounds.intersects(bbox)
    }

    fn intersect_ray(&self, ray: &Ray) -> Vec<Intersection> {
        let i = self.perpendicular.index();
        let denom = ray.direction()[i];
        if denom.abs() < ray.delta() {
            return Vec::new();
        }
        let t = (self.plane_coordinate() - ray.origin()[i]) / denom;
        if t < 0.0 {
            return Vec::new();
        }
        let hit = ray.at(t);
        let inside = self.perpendicular.others().iter().all(|axis| {
            let j = axis.index();
            hit[j] >= self.bounds.min()[j] - EPSILON_TOLERANCE
                && hit[j] <= self.bounds.max()[j] + EPSILON_TOLERANCE
        });
        if !inside {
            return Vec::new();
        }
        vec![Intersection::on_ray(ray, t)]
    }
}

impl FiniteGeometry for AARectangle {
    fn bbox(&self) -> AABox {
        self.bounds
    }

    fn to_mesh(&self) -> Mesh {
        let [u, v] = self.perpendicular.others();
        let winding_normal = u.unit().cross(v.unit());
        let triangles = if winding_normal.dot(self.normal()) > 0.0 {
            [[0, 1, 2], [0, 2, 3]]
        } else {
            [[0, 2, 1], [0, 3, 2]]
        };
        Mesh::assemble(self.corners().to_vec(), &triangles)
    }

    fn centroid(&self) -> Vec3 {
        self.bounds.center()
    }
}

#[cfg(test)]
mod tests;
