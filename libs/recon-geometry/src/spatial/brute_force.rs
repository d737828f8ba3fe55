//! Linear-scan index. Every query visits every element.

use tracing::debug;

use super::{aggregate_bbox, consider, element_hits, within, SpatialIndex};
use crate::core::vec3::Vec3;
use crate::geometry::{ElementFilter, FiniteGeometry};
use crate::primitives::aabox::AABox;
use crate::ray::{sort_hits, MultiGeometryIntersection, NearestHit, Ray};

/// Index that answers queries by scanning all elements.
#[derive(Debug, Clone)]
pub struct BruteForceIndex<T> {
    elements: Vec<T>,
    bbox: AABox,
}

impl<T> Default for BruteForceIndex<T> {
    fn default() -> Self {
        Self {
            elements: Vec::new(),
            bbox: AABox::at_point(Vec3::ZERO),
        }
    }
}

impl<T> BruteForceIndex<T> {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T: FiniteGeometry + Sync> SpatialIndex<T> for BruteForceIndex<T> {
    fn load(&mut self, elements: Vec<T>) {
        self.elements = elements;
        self.rebuild();
    }

    fn rebuild(&mut self) {
        self.bbox = aggregate_bbox(&self.elements);
        debug!(elements = self.elements.len(), strategy = "brute-force", "index loaded");
    }

    fn elements(&self) -> &[T] {
        &self.elements
    }

    fn elements_mut(&mut self) -> &mut [T] {
        &mut self.elements
    }

    fn bbox(&self) -> AABox {
        self.bbox
    }

    fn nearest(
        &self,
        point: Vec3,
        filter: Option<ElementFilter<'_, T>>,
        max_distance: Option<f64>,
    ) -> Option<NearestHit<'_, T>> {
        let mut best = None;
        for (index, element) in self.elements.iter().enumerate() {
            if filter.is_some_and(|keep| !keep(element)) {
                continue;
            }
            consider(&mut best, index, element, point);
        }
        within(best, max_distance)
    }

    fn intersect_box(&self, bbox: &AABox) -> Vec<&T> {
        self.elements
            .iter()
            .filter(|element| element.intersects_box(bbox))
            .collect()
    }

    fn intersect_ray(
        &self,
        ray: &Ray,
        max_distance: Option<f64>,
    ) -> Vec<MultiGeometryIntersection<'_, T>> {
        let mut hits = Vec::new();
        for (index, element) in self.elements.iter().enumerate() {
            element_hits(ray, index, element, max_distance, &mut hits);
        }
        sort_hits(&mut hits);
        hits
    }

    fn copy_empty(&self) -> Self {
        Self::default()
    }

    fn strategy(&self) -> &'static str {
        "brute-force"
    }
}
