//! # Axis-Aligned Box
//!
//! `AABox` keeps `min <= max` componentwise; constructors that could break
//! this return [`GeometryError::InvalidBox`].
//!
//! ## Touching vs. overlapping
//!
//! - [`AABox::intersects`] uses closed intervals: boxes sharing a face intersect
//! - [`AABox::overlaps`] uses open intervals: only interior overlap counts
//!
//! Clipping relies on the difference: touching boxes are already disjoint
//! and are never split.

use serde::{Deserialize, Serialize};

use crate::core::axis::Axis;
use crate::core::pose::Pose;
use crate::core::vec3::{self, Vec3};
use crate::error::{GeometryError, GeometryResult};
use crate::geometry::{FiniteGeometry, Geometry};
use crate::mesh::Mesh;
use crate::ops::bbox;
use crate::ray::{Intersection, Ray};

/// Triangles of the box surface over the corner order of [`AABox::corners`],
/// wound counter-clockwise seen from outside.
pub(crate) const BOX_TRIANGLES: [[usize; 3]; 12] = [
    // Bottom (z = min)
    [0, 2, 1],
    [0, 3, 2],
    // Top (z = max)
    [4, 5, 6],
    [4, 6, 7],
    // Front (y = min)
    [0, 1, 5],
    [0, 5, 4],
    // Back (y = max)
    [2, 3, 7],
    [2, 7, 6],
    // Left (x = min)
    [3, 0, 4],
    [3, 4, 7],
    // Right (x = max)
    [1, 2, 6],
    [1, 6, 5],
];

/// Axis-aligned bounding box.
///
/// # Examples
/// ```
/// use recon_geometry::{AABox, Vec3};
///
/// let a = AABox::new(Vec3::ZERO, Vec3::splat(10.0)).unwrap();
/// let b = AABox::new(Vec3::splat(5.0), Vec3::splat(15.0)).unwrap();
/// let fragments = a.clip_on(&b);
/// assert_eq!(fragments.len(), 3);
/// let volume: f64 = fragments.iter().map(AABox::volume).sum();
/// assert_eq!(volume, 1000.0 - 125.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[Vec3; 2]", into = "[Vec3; 2]")]
pub struct AABox {
    min: Vec3,
    max: Vec3,
}

// =============================================================================
// CONSTRUCTION
// =============================================================================

impl AABox {
    /// Creates a box from its corners, rejecting `min > max` and NaN.
    pub fn new(min: Vec3, max: Vec3) -> GeometryResult<Self> {
        // Written so that NaN components fail the check
        let valid = (0..3).all(|i| min[i] <= max[i]);
        if !valid {
            return Err(GeometryError::InvalidBox { min, max });
        }
        Ok(Self { min, max })
    }

    /// Zero-size box at `point`.
    pub fn at_point(point: Vec3) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    /// Smallest box containing two arbitrary corner points.
    pub fn from_corners(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Box centered at `center` with edge lengths `size`.
    pub fn from_center_and_size(center: Vec3, size: Vec3) -> GeometryResult<Self> {
        let half = size * 0.5;
        Self::new(center - half, center + half)
    }

    /// Min/max reduction over a point set.
    pub fn from_points(points: &[Vec3], use_parallel: bool) -> GeometryResult<Self> {
        bbox::min_max_of_points(points, use_parallel)
    }

    /// Bounding box of the bounding boxes of `geometries`.
    ///
    /// Parallel and sequential reductions produce identical corners.
    pub fn from_contained_geometries<G>(geometries: &[G], use_parallel: bool) -> GeometryResult<Self>
    where
        G: FiniteGeometry + Sync,
    {
        bbox::bbox_of_geometries(geometries, use_parallel)
    }
}

impl TryFrom<[Vec3; 2]> for AABox {
    type Error = GeometryError;

    fn try_from([min, max]: [Vec3; 2]) -> GeometryResult<Self> {
        Self::new(min, max)
    }
}

impl From<AABox> for [Vec3; 2] {
    fn from(bbox: AABox) -> Self {
        [bbox.min, bbox.max]
    }
}

// =============================================================================
// MEASURES
// =============================================================================

impl AABox {
    /// Minimum corner.
    #[inline]
    pub fn min(&self) -> Vec3 {
        self.min
    }

    /// Maximum corner.
    #[inline]
    pub fn max(&self) -> Vec3 {
        self.max
    }

    /// Center point.
    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Edge lengths.
    #[inline]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Enclosed volume.
    pub fn volume(&self) -> f64 {
        let size = self.size();
        size.x * size.y * size.z
    }

    /// The eight corners, counter-clockwise around the bottom face starting
    /// at `min`, then the same around the top face.
    pub fn corners(&self) -> [Vec3; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            Vec3::new(lo.x, lo.y, lo.z),
            Vec3::new(hi.x, lo.y, lo.z),
            Vec3::new(hi.x, hi.y, lo.z),
            Vec3::new(lo.x, hi.y, lo.z),
            Vec3::new(lo.x, lo.y, hi.z),
            Vec3::new(hi.x, lo.y, hi.z),
            Vec3::new(hi.x, hi.y, hi.z),
            Vec3::new(lo.x, hi.y, hi.z),
        ]
    }

    /// The eight child boxes obtained by splitting at the center.
    pub fn octants(&self) -> [AABox; 8] {
        let center = self.center();
        std::array::from_fn(|i| {
            let pick = |bit: usize, axis: usize| {
                if i & bit == 0 {
                    (self.min[axis], center[axis])
                } else {
                    (center[axis], self.max[axis])
                }
            };
            let (x0, x1) = pick(1, 0);
            let (y0, y1) = pick(2, 1);
            let (z0, z1) = pick(4, 2);
            AABox {
                min: Vec3::new(x0, y0, z0),
                max: Vec3::new(x1, y1, z1),
            }
        })
    }
}

// =============================================================================
// PREDICATES
// =============================================================================

impl AABox {
    /// Closed containment test for a point.
    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Returns `true` if `other` lies inside `self` (faces may coincide).
    pub fn contains_box(&self, other: &AABox) -> bool {
        other.min.cmpge(self.min).all() && other.max.cmple(self.max).all()
    }

    /// Closed-interval test: boxes sharing only a face, edge or corner intersect.
    pub fn intersects(&self, other: &AABox) -> bool {
        self.min.cmple(other.max).all() && other.min.cmple(self.max).all()
    }

    /// Open-interval test: only a positive-volume common interior counts.
    pub fn overlaps(&self, other: &AABox) -> bool {
        self.min.cmplt(other.max).all() && other.min.cmplt(self.max).all()
    }

    /// Open-interval overlap restricted to the given axes.
    pub(crate) fn overlaps_on(&self, other: &AABox, axes: &[Axis]) -> bool {
        axes.iter().all(|axis| {
            let i = axis.index();
            self.min[i] < other.max[i] && other.min[i] < self.max[i]
        })
    }

    /// Closed-interval intersection restricted to the given axes.
    pub(crate) fn intersects_on(&self, other: &AABox, axes: &[Axis]) -> bool {
        axes.iter().all(|axis| {
            let i = axis.index();
            self.min[i] <= other.max[i] && other.min[i] <= self.max[i]
        })
    }
}

// =============================================================================
// COMBINATION
// =============================================================================

impl AABox {
    /// Smallest box containing both boxes.
    pub fn union(&self, other: &AABox) -> AABox {
        AABox {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Common region of two boxes, if they intersect.
    pub fn intersection(&self, other: &AABox) -> Option<AABox> {
        if !self.intersects(other) {
            return None;
        }
        Some(AABox {
            min: self.min.max(other.min),
            max: self.max.min(other.max),
        })
    }

    /// Grows the box by `margin` on every side; negative margins shrink it.
    pub fn inflate(&self, margin: f64) -> GeometryResult<AABox> {
        let delta = Vec3::splat(margin);
        AABox::new(self.min - delta, self.max + delta)
    }

    /// Axis-aligned bound of the box after a rigid transform.
    pub fn transformed(&self, pose: &Pose) -> AABox {
        let corners = self.corners().map(|c| pose.transform_point(c));
        // Eight corners are never empty
        let (min, max) = vec3::min_max(corners).unwrap_or((self.min, self.max));
        AABox { min, max }
    }

    /// Splits `self` into the parts lying outside `other`.
    ///
    /// - `self` inside `other`: no fragments
    /// - no interior overlap (touching included): `[self]`
    /// - partial overlap: up to six disjoint slabs that, together with
    ///   `self ∩ other`, reconstruct `self` exactly
    pub fn clip_on(&self, other: &AABox) -> Vec<AABox> {
        if !self.overlaps(other) {
            return vec![*self];
        }
        subtract_slabs(*self, other, &Axis::ALL)
    }
}

/// Peels slabs off `source` along `axes` until what remains lies inside
/// `cutter`. Fragments are pairwise disjoint.
pub(crate) fn subtract_slabs(source: AABox, cutter: &AABox, axes: &[Axis]) -> Vec<AABox> {
    let mut remaining = source;
    let mut fragments = Vec::with_capacity(axes.len() * 2);
    for axis in axes {
        let i = axis.index();
        if remaining.min[i] < cutter.min[i] {
            let mut slab = remaining;
            slab.max[i] = cutter.min[i];
            fragments.push(slab);
            remaining.min[i] = cutter.min[i];
        }
        if remaining.max[i] > cutter.max[i] {
            let mut slab = remaining;
            slab.min[i] = cutter.max[i];
            fragments.push(slab);
            remaining.max[i] = cutter.max[i];
        }
    }
    fragments
}

// =============================================================================
// GEOMETRY
// =============================================================================

impl AABox {
    /// Slab test: the `[t_entry, t_exit]` parameter interval of the ray
    /// inside the box.
    ///
    /// Direction components smaller than the ray's delta make the ray
    /// parallel to that slab: it misses if the origin lies outside the slab,
    /// otherwise the slab does not constrain `t`.
    pub fn ray_interval(&self, ray: &Ray) -> Option<(f64, f64)> {
        if ray.is_degenerate() {
            return None;
        }
        let origin = ray.origin();
        let direction = ray.direction();
        let inverse = ray.inverse_direction();
        let mut t_min = f64::NEG_INFINITY;
        let mut t_max = f64::INFINITY;
        for i in 0..3 {
            if direction[i].abs() < ray.delta() {
                if origin[i] < self.min[i] || origin[i] > self.max[i] {
                    return None;
                }
                continue;
            }
            let t1 = (self.min[i] - origin[i]) * inverse[i];
            let t2 = (self.max[i] - origin[i]) * inverse[i];
            t_min = t_min.max(t1.min(t2));
            t_max = t_max.min(t1.max(t2));
        }
        if t_max < 0.0 || t_max < t_min {
            return None;
        }
        Some((t_min, t_max))
    }
}

impl Geometry for AABox {
    fn closest_point(&self, point: Vec3) -> Vec3 {
        point.clamp(self.min, self.max)
    }

    fn intersects_box(&self, bbox: &AABox) -> bool {
        self.intersects(bbox)
    }

    /// Entry and exit hits; a ray starting inside reports only the exit.
    fn intersect_ray(&self, ray: &Ray) -> Vec<Intersection> {
        let Some((t_entry, t_exit)) = self.ray_interval(ray) else {
            return Vec::new();
        };
        let mut hits = Vec::with_capacity(2);
        if t_entry >= 0.0 {
            hits.push(Intersection::on_ray(ray, t_entry));
        }
        if t_exit > t_entry || hits.is_empty() {
            hits.push(Intersection::on_ray(ray, t_exit));
        }
        hits
    }
}

impl FiniteGeometry for AABox {
    fn bbox(&self) -> AABox {
        *self
    }

    fn to_mesh(&self) -> Mesh {
        Mesh::assemble(self.corners().to_vec(), &BOX_TRIANGLES)
    }

    fn centroid(&self) -> Vec3 {
        self.center()
    }
}
