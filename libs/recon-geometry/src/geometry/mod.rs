//! # Geometry Capability Traits
//!
//! The trait ladder every algorithm in the kernel is written against:
//!
//! ```text
//! Geometry            distance, box test, ray hits
//!   └─ FiniteGeometry     + bounding box, triangulated view
//!        ├─ Shape             + points, normals, size weights, elements
//!        └─ (collections)     GeometryCollection<T>: nearest, multi-hit ray, box query
//! ```
//!
//! `Mesh` and `PointCloud` implement both `Shape` and `GeometryCollection`,
//! so a plane fit or a bounding-box reduction works over either store.

use crate::core::vec3::Vec3;
use crate::mesh::Mesh;
use crate::primitives::aabox::AABox;
use crate::ray::{Intersection, MultiGeometryIntersection, NearestHit, Ray};

/// Predicate restricting which collection elements a nearest query may return.
pub type ElementFilter<'f, T> = &'f dyn Fn(&T) -> bool;

/// Distance, box and ray queries shared by every primitive.
pub trait Geometry {
    /// Closest point of the geometry to `point`.
    fn closest_point(&self, point: Vec3) -> Vec3;

    /// Euclidean distance from `point` to the geometry.
    fn distance_to(&self, point: Vec3) -> f64 {
        (self.closest_point(point) - point).length()
    }

    /// Returns `true` if the geometry touches or crosses `bbox`.
    fn intersects_box(&self, bbox: &AABox) -> bool;

    /// All hits of `ray` with the geometry, ordered by distance.
    ///
    /// A single primitive may report several hits (a box's entry and exit).
    fn intersect_ray(&self, ray: &Ray) -> Vec<Intersection>;
}

/// Geometry with a well-defined bounding box.
pub trait FiniteGeometry: Geometry {
    /// Axis-aligned bounding box.
    fn bbox(&self) -> AABox;

    /// Rebuilds any cached bounding data after in-place mutation.
    ///
    /// Value primitives recompute on every call, so the default does nothing.
    fn update_bbox(&mut self) {}

    /// Triangulated view for export and visualization.
    fn to_mesh(&self) -> Mesh;

    /// Representative point used by weighted fits.
    fn centroid(&self) -> Vec3 {
        self.bbox().center()
    }
}

/// A finite geometry backed by a list of elements.
///
/// `size_weights()` has one entry per element of `geometries()`: 1.0 for a
/// point, the triangle area for a face, so representations contribute fairly
/// to weighted statistics.
pub trait Shape: FiniteGeometry + Clone {
    /// Element type of the shape.
    type Element: FiniteGeometry;

    /// Vertex positions, in stable storage order.
    fn points(&self) -> Vec<Vec3>;

    /// One normal per point; zero where unknown.
    fn normals(&self) -> Vec<Vec3>;

    /// One weight per element.
    fn size_weights(&self) -> Vec<f64>;

    /// The elements, in stable storage order.
    fn geometries(&self) -> &[Self::Element];
}

/// Element-level queries of a collection, all answered by its spatial index.
pub trait GeometryCollection<T: FiniteGeometry>: Geometry {
    /// Nearest element to `position`.
    ///
    /// Elements rejected by `filter` are skipped. If the nearest remaining
    /// element is farther than `max_distance`, the result is `None`.
    fn nearest(
        &self,
        position: Vec3,
        filter: Option<ElementFilter<'_, T>>,
        max_distance: Option<f64>,
    ) -> Option<NearestHit<'_, T>>;

    /// Every element hit by `ray` within `max_distance`, nearest first.
    fn intersect_ray_elements(
        &self,
        ray: &Ray,
        max_distance: Option<f64>,
    ) -> Vec<MultiGeometryIntersection<'_, T>>;

    /// Every element touching `bbox`, in storage order.
    fn intersect_box_elements(&self, bbox: &AABox) -> Vec<&T>;
}

/// A collection that is itself a finite geometry.
pub trait FiniteGeometryCollection<T: FiniteGeometry>: GeometryCollection<T> + FiniteGeometry {}

impl<T, C> FiniteGeometryCollection<T> for C
where
    T: FiniteGeometry,
    C: GeometryCollection<T> + FiniteGeometry,
{
}
