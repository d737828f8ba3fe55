//! # Point Cloud
//!
//! Unordered points held by a pluggable spatial index. Like
//! [`Mesh`], a point cloud is both a [`Shape`] (points, normals, unit
//! weights) and a [`GeometryCollection`] over its points.
//!
//! Points edited through [`PointCloud::points_mut`] are not seen by queries
//! until [`update_bbox`](FiniteGeometry::update_bbox) reloads the index.

pub mod creator;

pub use creator::PointCloudCreator;

use crate::core::pose::Pose;
use crate::core::vec3::Vec3;
use crate::geometry::{ElementFilter, FiniteGeometry, Geometry, GeometryCollection, Shape};
use crate::mesh::Mesh;
use crate::primitives::aabox::AABox;
use crate::primitives::point::Point;
use crate::ray::{Intersection, MultiGeometryIntersection, NearestHit, Ray};
use crate::spatial::{BruteForceIndex, SpatialIndex};

/// Point set generic over its index.
///
/// # Examples
/// ```
/// use recon_geometry::{GeometryCollection, PointCloud, Vec3};
///
/// let cloud = PointCloud::from_positions(vec![Vec3::ZERO, Vec3::X, Vec3::Y]);
/// let hit = cloud.nearest(Vec3::new(0.9, 0.2, 0.0), None, None).unwrap();
/// assert_eq!(hit.index, 1);
/// ```
#[derive(Debug)]
pub struct PointCloud<I = BruteForceIndex<Point>> {
    index: I,
}

impl PointCloud {
    /// Point cloud over bare positions, with the brute-force index.
    pub fn from_positions(positions: Vec<Vec3>) -> Self {
        Self::new(
            positions.into_iter().map(Point::new).collect(),
            BruteForceIndex::new(),
        )
    }
}

impl<I: SpatialIndex<Point>> PointCloud<I> {
    /// Loads `points` into `index`.
    pub fn new(points: Vec<Point>, mut index: I) -> Self {
        index.load(points);
        Self { index }
    }

    /// Points in construction order.
    pub fn points(&self) -> &[Point] {
        self.index.elements()
    }

    /// Mutable points. Call `update_bbox` after editing them.
    pub fn points_mut(&mut self) -> &mut [Point] {
        self.index.elements_mut()
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns `true` if the cloud holds no points.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// The point index.
    pub fn index(&self) -> &I {
        &self.index
    }

    /// Applies a rigid transform to every point and rebuilds the index.
    pub fn transform(&mut self, pose: &Pose) {
        for point in self.index.elements_mut() {
            point.position = pose.transform_point(point.position);
            if let Some(normal) = point.normal.as_mut() {
                *normal = pose.transform_direction(*normal).normalize_or_zero();
            }
        }
        self.index.rebuild();
    }
}

impl<I: SpatialIndex<Point>> Clone for PointCloud<I> {
    fn clone(&self) -> Self {
        Self::new(self.points().to_vec(), self.index.copy_empty())
    }
}

impl<I: SpatialIndex<Point> + Default> Default for PointCloud<I> {
    fn default() -> Self {
        Self {
            index: I::default(),
        }
    }
}

impl<I: SpatialIndex<Point>> Geometry for PointCloud<I> {
    /// Nearest point; `point` itself for an empty cloud.
    fn closest_point(&self, point: Vec3) -> Vec3 {
        self.index
            .nearest(point, None, None)
            .map_or(point, |hit| hit.point)
    }

    fn distance_to(&self, point: Vec3) -> f64 {
        self.index.distance_to(point)
    }

    fn intersects_box(&self, bbox: &AABox) -> bool {
        self.index.intersects(bbox)
    }

    fn intersect_ray(&self, ray: &Ray) -> Vec<Intersection> {
        self.index
            .intersect_ray(ray, None)
            .into_iter()
            .map(|hit| hit.intersection)
            .collect()
    }
}

impl<I: SpatialIndex<Point>> FiniteGeometry for PointCloud<I> {
    fn bbox(&self) -> AABox {
        self.index.bbox()
    }

    fn update_bbox(&mut self) {
        self.index.rebuild();
    }

    /// Vertices only; a point cloud has no faces.
    fn to_mesh(&self) -> Mesh {
        let positions = self.points().iter().map(|p| p.position).collect();
        Mesh::assemble(positions, &[])
    }

    /// Mean position; the bbox center when empty.
    fn centroid(&self) -> Vec3 {
        if self.is_empty() {
            return self.bbox().center();
        }
        let sum: Vec3 = self.points().iter().map(|p| p.position).sum();
        sum / self.len() as f64
    }
}

impl<I: SpatialIndex<Point>> Shape for PointCloud<I> {
    type Element = Point;

    fn points(&self) -> Vec<Vec3> {
        self.index.elements().iter().map(|p| p.position).collect()
    }

    fn normals(&self) -> Vec<Vec3> {
        self.index
            .elements()
            .iter()
            .map(Point::normal_or_zero)
            .collect()
    }

    /// One unit weight per point.
    fn size_weights(&self) -> Vec<f64> {
        vec![1.0; self.len()]
    }

    fn geometries(&self) -> &[Point] {
        self.index.elements()
    }
}

impl<I: SpatialIndex<Point>> GeometryCollection<Point> for PointCloud<I> {
    fn nearest(
        &self,
        position: Vec3,
        filter: Option<ElementFilter<'_, Point>>,
        max_distance: Option<f64>,
    ) -> Option<NearestHit<'_, Point>> {
        self.index.nearest(position, filter, max_distance)
    }

    fn intersect_ray_elements(
        &self,
        ray: &Ray,
        max_distance: Option<f64>,
    ) -> Vec<MultiGeometryIntersection<'_, Point>> {
        self.index.intersect_ray(ray, max_distance)
    }

    fn intersect_box_elements(&self, bbox: &AABox) -> Vec<&Point> {
        self.index.intersect_box(bbox)
    }
}
