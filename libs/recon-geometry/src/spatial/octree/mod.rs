//! # Octree Index
//!
//! Each element lives at the deepest node whose box fully contains the
//! element's bounding box, so large elements stay near the root and no
//! element is duplicated.
//!
//! ## Build
//!
//! A node is split while it is shallower than `max_depth`, holds more than
//! `max_leaf_elements` items and at least one item fits inside an octant.
//! Nodes are stored in a flat arena and refer to children by position.
//!
//! ## Queries
//!
//! Box and ray queries prune with node boxes grown by a small margin, then
//! test elements exactly as the brute-force scan does. Nearest queries are
//! best-first over node distances and stop once the closest unvisited node
//! is strictly farther than the best hit, so distance ties still resolve to
//! the lower element index.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use tracing::debug;

use super::{aggregate_bbox, consider, element_hits, within, SpatialIndex};
use crate::core::vec3::Vec3;
use crate::error::{GeometryError, GeometryResult};
use crate::geometry::{ElementFilter, FiniteGeometry, Geometry};
use crate::primitives::aabox::AABox;
use crate::ray::{sort_hits, MultiGeometryIntersection, NearestHit, Ray};
use config::constants::{OCTREE_MAX_DEPTH, OCTREE_MAX_LEAF_ELEMENTS};

/// Relative growth of node boxes used for pruning, above the barycentric and
/// in-bounds tolerances of the element tests. Ray queries add the ray delta
/// on top.
const PRUNE_MARGIN: f64 = 1e-6;

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Octree build limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OctreeConfig {
    max_depth: usize,
    max_leaf_elements: usize,
}

impl OctreeConfig {
    /// Creates a configuration; both limits must be positive.
    pub fn new(max_depth: usize, max_leaf_elements: usize) -> GeometryResult<Self> {
        if max_depth == 0 || max_leaf_elements == 0 {
            return Err(GeometryError::PreconditionMismatch(format!(
                "octree limits must be positive (max_depth = {max_depth}, max_leaf_elements = {max_leaf_elements})"
            )));
        }
        Ok(Self {
            max_depth,
            max_leaf_elements,
        })
    }

    /// Deepest level a node may be split to.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Item count above which a node is split.
    pub fn max_leaf_elements(&self) -> usize {
        self.max_leaf_elements
    }
}

impl Default for OctreeConfig {
    fn default() -> Self {
        Self {
            max_depth: OCTREE_MAX_DEPTH,
            max_leaf_elements: OCTREE_MAX_LEAF_ELEMENTS,
        }
    }
}

// =============================================================================
// NODES
// =============================================================================

#[derive(Debug, Clone)]
struct Node {
    bounds: AABox,
    /// `bounds` grown by the pruning margin.
    loose: AABox,
    children: Vec<usize>,
    items: Vec<usize>,
}

impl Node {
    fn new(bounds: AABox) -> Self {
        let margin = Vec3::splat(PRUNE_MARGIN * (1.0 + bounds.size().max_element()));
        Self {
            bounds,
            loose: AABox::from_corners(bounds.min() - margin, bounds.max() + margin),
            children: Vec::new(),
            items: Vec::new(),
        }
    }
}

/// Heap entry ordered by distance, then node position.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    distance: f64,
    node: usize,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then(self.node.cmp(&other.node))
    }
}

// =============================================================================
// INDEX
// =============================================================================

/// Octree over owned elements.
#[derive(Debug, Clone)]
pub struct OctreeIndex<T> {
    config: OctreeConfig,
    elements: Vec<T>,
    nodes: Vec<Node>,
    bbox: AABox,
}

impl<T> Default for OctreeIndex<T> {
    fn default() -> Self {
        Self::with_config(OctreeConfig::default())
    }
}

impl<T> OctreeIndex<T> {
    /// Creates an empty octree with default limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty octree with the given limits.
    pub fn with_config(config: OctreeConfig) -> Self {
        Self {
            config,
            elements: Vec::new(),
            nodes: Vec::new(),
            bbox: AABox::at_point(Vec3::ZERO),
        }
    }

    /// Build limits.
    pub fn config(&self) -> OctreeConfig {
        self.config
    }

    /// Number of nodes of the current tree.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Depth of the current tree; 0 for a single leaf or an empty tree.
    pub fn depth(&self) -> usize {
        fn walk(nodes: &[Node], node: usize) -> usize {
            nodes[node]
                .children
                .iter()
                .map(|&child| 1 + walk(nodes, child))
                .max()
                .unwrap_or(0)
        }
        if self.nodes.is_empty() {
            0
        } else {
            walk(&self.nodes, 0)
        }
    }
}

impl<T: FiniteGeometry> OctreeIndex<T> {
    fn build(&mut self) {
        self.nodes.clear();
        if self.elements.is_empty() {
            return;
        }
        let boxes: Vec<AABox> = self.elements.iter().map(FiniteGeometry::bbox).collect();
        self.nodes.push(Node::new(self.bbox));

        let mut pending = vec![(0usize, (0..self.elements.len()).collect::<Vec<_>>(), 0usize)];
        while let Some((node, items, depth)) = pending.pop() {
            if depth >= self.config.max_depth || items.len() <= self.config.max_leaf_elements {
                self.nodes[node].items = items;
                continue;
            }

            let octants = self.nodes[node].bounds.octants();
            let mut stay = Vec::new();
            let mut down: [Vec<usize>; 8] = Default::default();
            for item in items {
                match octants.iter().position(|o| o.contains_box(&boxes[item])) {
                    Some(octant) => down[octant].push(item),
                    None => stay.push(item),
                }
            }
            self.nodes[node].items = stay;
            if down.iter().all(Vec::is_empty) {
                continue;
            }

            for (octant, child_items) in octants.into_iter().zip(down) {
                if child_items.is_empty() {
                    continue;
                }
                let child = self.nodes.len();
                self.nodes.push(Node::new(octant));
                self.nodes[node].children.push(child);
                pending.push((child, child_items, depth + 1));
            }
        }
    }
}

impl<T: FiniteGeometry + Sync> SpatialIndex<T> for OctreeIndex<T> {
    fn load(&mut self, elements: Vec<T>) {
        self.elements = elements;
        self.rebuild();
    }

    fn rebuild(&mut self) {
        self.bbox = aggregate_bbox(&self.elements);
        self.build();
        debug!(
            elements = self.elements.len(),
            nodes = self.nodes.len(),
            strategy = "octree",
            "index loaded"
        );
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
        if self.nodes.is_empty() {
            return None;
        }
        let mut best: Option<NearestHit<'_, T>> = None;
        let mut queue = BinaryHeap::new();
        queue.push(Reverse(Candidate {
            distance: self.nodes[0].loose.distance_to(point),
            node: 0,
        }));

        while let Some(Reverse(Candidate { distance, node })) = queue.pop() {
            if best.as_ref().is_some_and(|hit| distance > hit.distance)
                || max_distance.is_some_and(|max| distance > max)
            {
                break;
            }
            let node = &self.nodes[node];
            for &index in &node.items {
                let element = &self.elements[index];
                if filter.is_some_and(|keep| !keep(element)) {
                    continue;
                }
                consider(&mut best, index, element, point);
            }
            for &child in &node.children {
                queue.push(Reverse(Candidate {
                    distance: self.nodes[child].loose.distance_to(point),
                    node: child,
                }));
            }
        }
        within(best, max_distance)
    }

    fn intersect_box(&self, bbox: &AABox) -> Vec<&T> {
        let mut found = Vec::new();
        let mut stack = if self.nodes.is_empty() { vec![] } else { vec![0] };
        while let Some(node) = stack.pop() {
            let node = &self.nodes[node];
            if !node.loose.intersects(bbox) {
                continue;
            }
            found.extend(
                node.items
                    .iter()
                    .copied()
                    .filter(|&index| self.elements[index].intersects_box(bbox)),
            );
            stack.extend(node.children.iter().copied());
        }
        found.sort_unstable();
        found.into_iter().map(|index| &self.elements[index]).collect()
    }

    fn intersect_ray(
        &self,
        ray: &Ray,
        max_distance: Option<f64>,
    ) -> Vec<MultiGeometryIntersection<'_, T>> {
        let mut hits = Vec::new();
        // Elements accept hits up to `ray.delta()` off their surface
        let reach = Vec3::splat(ray.delta());
        let mut stack = if self.nodes.is_empty() { vec![] } else { vec![0] };
        while let Some(node) = stack.pop() {
            let node = &self.nodes[node];
            let reachable = AABox::from_corners(node.loose.min() - reach, node.loose.max() + reach);
            let Some((t_entry, _)) = reachable.ray_interval(ray) else {
                continue;
            };
            if max_distance.is_some_and(|max| t_entry > max) {
                continue;
            }
            for &index in &node.items {
                element_hits(ray, index, &self.elements[index], max_distance, &mut hits);
            }
            stack.extend(node.children.iter().copied());
        }
        // Hits arrive in tree order; restore element order before the stable sort
        hits.sort_by_key(|hit| hit.index);
        sort_hits(&mut hits);
        hits
    }

    fn copy_empty(&self) -> Self {
        Self::with_config(self.config)
    }

    fn strategy(&self) -> &'static str {
        "octree"
    }
}
