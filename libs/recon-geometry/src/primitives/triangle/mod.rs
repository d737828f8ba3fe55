//! # Triangle
//!
//! Value triangle with three corners. Mesh faces cache one of these per face
//! so queries never chase vertex indices.
//!
//! - Closest point: Voronoi-region walk over vertices, edges and interior
//! - Box test: separating axis theorem with the 13 candidate axes
//! - Ray test: Möller–Trumbore

use serde::{Deserialize, Serialize};

use crate::core::vec3::Vec3;
use crate::geometry::{FiniteGeometry, Geometry};
use crate::mesh::Mesh;
use crate::primitives::aabox::AABox;
use crate::ray::{Intersection, Ray};
use config::constants::EPSILON_TOLERANCE;

/// Triangle given by its corners, wound counter-clockwise around [`normal`].
///
/// [`normal`]: Triangle::normal
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Triangle {
    /// First corner.
    pub a: Vec3,
    /// Second corner.
    pub b: Vec3,
    /// Third corner.
    pub c: Vec3,
}

impl Triangle {
    /// Creates a triangle from its corners.
    pub fn new(a: Vec3, b: Vec3, c: Vec3) -> Self {
        Self { a, b, c }
    }

    /// The corners in order.
    #[inline]
    pub fn corners(&self) -> [Vec3; 3] {
        [self.a, self.b, self.c]
    }

    /// Unnormalized normal; its length is twice the area.
    #[inline]
    pub fn scaled_normal(&self) -> Vec3 {
        (self.b - self.a).cross(self.c - self.a)
    }

    /// Unit normal, zero for a degenerate triangle.
    pub fn normal(&self) -> Vec3 {
        self.scaled_normal().normalize_or_zero()
    }

    /// Surface area.
    pub fn area(&self) -> f64 {
        0.5 * self.scaled_normal().length()
    }

    /// Mean of the corners.
    pub fn center(&self) -> Vec3 {
        (self.a + self.b + self.c) / 3.0
    }

    /// Returns `true` if the corners are (nearly) collinear.
    pub fn is_degenerate(&self) -> bool {
        self.scaled_normal().length_squared() < EPSILON_TOLERANCE * EPSILON_TOLERANCE
    }
}

// =============================================================================
// CLOSEST POINT
// =============================================================================

impl Triangle {
    fn closest_point_to(&self, p: Vec3) -> Vec3 {
        let (a, b, c) = (self.a, self.b, self.c);
        let ab = b - a;
        let ac = c - a;

        let ap = p - a;
        let d1 = ab.dot(ap);
        let d2 = ac.dot(ap);
        if d1 <= 0.0 && d2 <= 0.0 {
            return a;
        }

        let bp = p - b;
        let d3 = ab.dot(bp);
        let d4 = ac.dot(bp);
        if d3 >= 0.0 && d4 <= d3 {
            return b;
        }

        let vc = d1 * d4 - d3 * d2;
        if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
            let v = d1 / (d1 - d3);
            return a + ab * v;
        }

        let cp = p - c;
        let d5 = ab.dot(cp);
        let d6 = ac.dot(cp);
        if d6 >= 0.0 && d5 <= d6 {
            return c;
        }

        let vb = d5 * d2 - d1 * d6;
        if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
            let w = d2 / (d2 - d6);
            return a + ac * w;
        }

        let va = d3 * d6 - d5 * d4;
        if va <= 0.0 && (d4 - d3) >= 0.0 && (d5 - d6) >= 0.0 {
            let w = (d4 - d3) / ((d4 - d3) + (d5 - d6));
            return b + (c - b) * w;
        }

        let denom = va + vb + vc;
        if denom.abs() < f64::MIN_POSITIVE {
            // Collinear corners already fell into a vertex or edge region
            // unless the triangle collapsed to a point.
            return a;
        }
        let v = vb / denom;
        let w = vc / denom;
        a + ab * v + ac * w
    }
}

// =============================================================================
// BOX TEST
// =============================================================================

impl Triangle {
    fn separated_on(axis: Vec3, corners: &[Vec3; 3], half: Vec3) -> bool {
        if axis.length_squared() < f64::EPSILON {
            // Parallel edges give no axis; the remaining axes decide.
            return false;
        }
        let p = corners.map(|v| v.dot(axis));
        let radius = half.dot(axis.abs());
        let lo = p[0].min(p[1]).min(p[2]);
        let hi = p[0].max(p[1]).max(p[2]);
        lo > radius || hi < -radius
    }

    fn touches_box(&self, bbox: &AABox) -> bool {
        let center = bbox.center();
        let half = bbox.size() * 0.5;
        let corners = self.corners().map(|v| v - center);

        // Box face normals
        for i in 0..3 {
            let lo = corners[0][i].min(corners[1][i]).min(corners[2][i]);
            let hi = corners[0][i].max(corners[1][i]).max(corners[2][i]);
            if lo > half[i] || hi < -half[i] {
                return false;
            }
        }

        // Triangle normal
        let normal = (corners[1] - corners[0]).cross(corners[2] - corners[0]);
        if Self::separated_on(normal, &corners, half) {
            return false;
        }

        // Edge cross products
        let edges = [
            corners[1] - corners[0],
            corners[2] - corners[1],
            corners[0] - corners[2],
        ];
        for edge in edges {
            for unit in [Vec3::X, Vec3::Y, Vec3::Z] {
                if Self::separated_on(unit.cross(edge), &corners, half) {
                    return false;
                }
            }
        }
        true
    }
}

// =============================================================================
// RAY TEST
// =============================================================================

impl Triangle {
    /// Möller–Trumbore; returns the hit distance.
    ///
    /// Rays within `ray.delta()` radians of the plane miss: the determinant
    /// is compared against the delta scaled by both edge lengths.
    pub fn ray_distance(&self, ray: &Ray) -> Option<f64> {
        self.ray_distance_with(ray, EPSILON_TOLERANCE)
    }

    /// [`Triangle::ray_distance`] accepting barycentric coordinates up to
    /// `tolerance` outside the triangle.
    pub fn ray_distance_with(&self, ray: &Ray, tolerance: f64) -> Option<f64> {
        if ray.is_degenerate() {
            return None;
        }
        let e1 = self.b - self.a;
        let e2 = self.c - self.a;
        let p = ray.direction().cross(e2);
        let det = e1.dot(p);
        if det.abs() <= ray.delta() * e1.length() * e2.length() {
            return None;
        }
        let inv_det = 1.0 / det;
        let s = ray.origin() - self.a;
        let u = s.dot(p) * inv_det;
        if !(-tolerance..=1.0 + tolerance).contains(&u) {
            return None;
        }
        let q = s.cross(e1);
        let v = ray.direction().dot(q) * inv_det;
        if v < -tolerance || u + v > 1.0 + tolerance {
            return None;
        }
        let t = e2.dot(q) * inv_det;
        (t >= 0.0).then_some(t)
    }
}

impl Geometry for Triangle {
    fn closest_point(&self, point: Vec3) -> Vec3 {
        self.closest_point_to(point)
    }

    fn intersects_box(&self, bbox: &AABox) -> bool {
        self.touches_box(bbox)
    }

    fn intersect_ray(&self, ray: &Ray) -> Vec<Intersection> {
        self.ray_distance(ray)
            .map(|t| Intersection::on_ray(ray, t))
            .into_iter()
            .collect()
    }
}

impl FiniteGeometry for Triangle {
    fn bbox(&self) -> AABox {
        AABox::from_corners(self.a.min(self.b).min(self.c), self.a.max(self.b).max(self.c))
    }

    fn to_mesh(&self) -> Mesh {
        Mesh::assemble(self.corners().to_vec(), &[[0, 1, 2]])
    }

    fn centroid(&self) -> Vec3 {
        self.center()
    }
}
