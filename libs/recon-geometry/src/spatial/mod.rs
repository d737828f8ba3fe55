//! # Spatial Index
//!
//! Pluggable acceleration structures behind [`Mesh`](crate::mesh::Mesh) and
//! [`PointCloud`](crate::point_cloud::PointCloud). Collections hold no query
//! logic of their own; every nearest, box and ray query is answered here.
//!
//! ## Contract
//!
//! - An index owns its elements and reports them in load order
//! - `bbox()` is recomputed on every load; empty indices report a zero box
//!   at the origin
//! - Every strategy returns the same results for the same query:
//!   - ray hits sorted by distance, then element index
//!   - box hits in element order
//!   - nearest ties resolved towards the lower element index
//!
//! ## Strategies
//!
//! - [`BruteForceIndex`]: linear scans, no build cost
//! - [`OctreeIndex`]: elements stored at the deepest octant containing them

pub mod brute_force;
pub mod octree;

pub use brute_force::BruteForceIndex;
pub use octree::{OctreeConfig, OctreeIndex};

use tracing::warn;

use crate::core::vec3::Vec3;
use crate::geometry::{ElementFilter, FiniteGeometry};
use crate::ops::bbox;
use crate::primitives::aabox::AABox;
use crate::ray::{MultiGeometryIntersection, NearestHit, Ray};
use config::constants::PARALLEL_MIN_CHUNK;

/// Query strategy over a set of owned finite geometries.
pub trait SpatialIndex<T: FiniteGeometry> {
    /// Replaces the indexed elements and rebuilds the structure.
    fn load(&mut self, elements: Vec<T>);

    /// Rebuilds the structure from the current elements, after they were
    /// mutated through [`elements_mut`](SpatialIndex::elements_mut).
    fn rebuild(&mut self);

    /// The elements in load order.
    fn elements(&self) -> &[T];

    /// Mutable access to the elements.
    ///
    /// Queries are stale until [`rebuild`](SpatialIndex::rebuild) is called.
    fn elements_mut(&mut self) -> &mut [T];

    /// Aggregate bounding box of the elements.
    fn bbox(&self) -> AABox;

    /// Nearest element to `point`, honoring `filter` and `max_distance`.
    fn nearest(
        &self,
        point: Vec3,
        filter: Option<ElementFilter<'_, T>>,
        max_distance: Option<f64>,
    ) -> Option<NearestHit<'_, T>>;

    /// Elements touching `bbox`, in element order.
    fn intersect_box(&self, bbox: &AABox) -> Vec<&T>;

    /// Ray hits within `max_distance`, sorted by distance then element index.
    fn intersect_ray(
        &self,
        ray: &Ray,
        max_distance: Option<f64>,
    ) -> Vec<MultiGeometryIntersection<'_, T>>;

    /// An empty index with the same configuration.
    fn copy_empty(&self) -> Self
    where
        Self: Sized;

    /// Short strategy name for logs.
    fn strategy(&self) -> &'static str;

    /// Number of elements.
    fn len(&self) -> usize {
        self.elements().len()
    }

    /// Returns `true` if no elements are loaded.
    fn is_empty(&self) -> bool {
        self.elements().is_empty()
    }

    /// Returns `true` if any element touches `bbox`.
    fn intersects(&self, bbox: &AABox) -> bool {
        !self.is_empty() && self.bbox().intersects(bbox) && !self.intersect_box(bbox).is_empty()
    }

    /// Distance to the nearest element; infinite when empty.
    fn distance_to(&self, point: Vec3) -> f64 {
        self.nearest(point, None, None)
            .map_or(f64::INFINITY, |hit| hit.distance)
    }
}

/// Aggregate bounds used by every index on load.
pub(crate) fn aggregate_bbox<T>(elements: &[T]) -> AABox
where
    T: FiniteGeometry + Sync,
{
    if elements.is_empty() {
        return AABox::at_point(Vec3::ZERO);
    }
    let use_parallel = elements.len() >= 2 * PARALLEL_MIN_CHUNK;
    match bbox::bbox_of_geometries(elements, use_parallel) {
        Ok(bbox) => bbox,
        Err(err) => {
            warn!(%err, "bbox reduction failed, reporting an empty box");
            AABox::at_point(Vec3::ZERO)
        }
    }
}

/// Hit of an element at `index` if it beats the current best.
pub(crate) fn consider<'a, T: FiniteGeometry>(
    best: &mut Option<NearestHit<'a, T>>,
    index: usize,
    element: &'a T,
    point: Vec3,
) {
    let closest = element.closest_point(point);
    let candidate = NearestHit {
        index,
        geometry: element,
        distance: (closest - point).length(),
        point: closest,
    };
    let better = best
        .as_ref()
        .map_or(true, |current| candidate.is_better_than(current));
    if better {
        *best = Some(candidate);
    }
}

/// Applies the `max_distance` cutoff to a nearest candidate.
pub(crate) fn within<'a, T>(
    hit: Option<NearestHit<'a, T>>,
    max_distance: Option<f64>,
) -> Option<NearestHit<'a, T>> {
    hit.filter(|hit| max_distance.map_or(true, |max| hit.distance <= max))
}

/// Ray hits of a single element, tagged and cut at `max_distance`.
pub(crate) fn element_hits<'a, T: FiniteGeometry>(
    ray: &Ray,
    index: usize,
    element: &'a T,
    max_distance: Option<f64>,
    out: &mut Vec<MultiGeometryIntersection<'a, T>>,
) {
    out.extend(
        element
            .intersect_ray(ray)
            .into_iter()
            .filter(|hit| max_distance.map_or(true, |max| hit.distance <= max))
            .map(|hit| MultiGeometryIntersection::new(hit, index, element)),
    );
}
