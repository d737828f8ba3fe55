//! # Mesh Module
//!
//! Triangle mesh over a shared vertex arena, with faces held by a pluggable
//! spatial index.
//!
//! ## Structure
//!
//! - `Mesh` - vertex arena plus index of [`Face`]s
//! - `face` - faces referencing vertices by position
//! - `creator` - incremental builder and mesh merging
//!
//! ## Bounding box invalidation
//!
//! The bounding box always comes from the index. Code that moves vertices
//! through [`Mesh::vertices_mut`] must call
//! [`update_bbox`](crate::geometry::FiniteGeometry::update_bbox) afterwards;
//! that re-resolves every face and reloads the whole index.
//!
//! ## Example
//!
//! ```rust
//! use recon_geometry::{FiniteGeometry, Mesh, Vec3};
//!
//! let mesh = Mesh::from_triangles(
//!     vec![Vec3::ZERO, Vec3::X, Vec3::Y],
//!     vec![[0, 1, 2]],
//! )
//! .unwrap();
//! assert_eq!(mesh.face_count(), 1);
//! assert_eq!(mesh.bbox().max(), Vec3::new(1.0, 1.0, 0.0));
//! ```

pub mod creator;
pub mod face;

pub use creator::MeshCreator;
pub use face::{Face, FaceProperties};

use tracing::debug;

use crate::core::pose::Pose;
use crate::core::vec3::Vec3;
use crate::error::{GeometryError, GeometryResult};
use crate::geometry::{ElementFilter, FiniteGeometry, Geometry, GeometryCollection, Shape};
use crate::point_cloud::PointCloud;
use crate::primitives::aabox::AABox;
use crate::primitives::point::Point;
use crate::ray::{Intersection, MultiGeometryIntersection, NearestHit, Ray};
use crate::spatial::{BruteForceIndex, SpatialIndex};

// =============================================================================
// MESH STRUCT
// =============================================================================

/// Triangle mesh generic over its face index.
///
/// Vertex and face order is preserved from construction, so persistence
/// layers can round-trip a mesh by position.
#[derive(Debug)]
pub struct Mesh<I = BruteForceIndex<Face>> {
    vertices: Vec<Point>,
    index: I,
}

impl Mesh {
    /// Builds a mesh with the brute-force index from positions and
    /// vertex-index triples.
    pub fn from_triangles(positions: Vec<Vec3>, triangles: Vec<[usize; 3]>) -> GeometryResult<Self> {
        Self::from_triangles_with_index(positions, triangles, BruteForceIndex::new())
    }

    /// Builds a mesh from trusted, in-range triangles.
    pub(crate) fn assemble(positions: Vec<Vec3>, triangles: &[[usize; 3]]) -> Self {
        let vertices: Vec<Point> = positions.into_iter().map(Point::new).collect();
        let faces = triangles
            .iter()
            .map(|&indices| {
                let mut face = Face::new(indices);
                face.refresh(&vertices);
                face
            })
            .collect();
        let mut index = BruteForceIndex::new();
        index.load(faces);
        Self { vertices, index }
    }
}

impl<I: SpatialIndex<Face>> Mesh<I> {
    // =========================================================================
    // CONSTRUCTORS
    // =========================================================================

    /// Creates a mesh, loading `faces` into `index`.
    ///
    /// Every face index must address a vertex, otherwise
    /// [`GeometryError::IndexOutOfRange`] is returned.
    pub fn new(vertices: Vec<Point>, mut faces: Vec<Face>, mut index: I) -> GeometryResult<Self> {
        let len = vertices.len();
        for face in &faces {
            if let Some(&bad) = face.indices().iter().find(|&&i| i >= len) {
                return Err(GeometryError::IndexOutOfRange { index: bad, len });
            }
        }
        for face in &mut faces {
            face.refresh(&vertices);
        }
        debug!(
            vertices = len,
            faces = faces.len(),
            strategy = index.strategy(),
            "mesh created"
        );
        index.load(faces);
        Ok(Self { vertices, index })
    }

    /// [`Mesh::from_triangles`] with an explicit index.
    pub fn from_triangles_with_index(
        positions: Vec<Vec3>,
        triangles: Vec<[usize; 3]>,
        index: I,
    ) -> GeometryResult<Self> {
        let vertices = positions.into_iter().map(Point::new).collect();
        let faces = triangles.into_iter().map(Face::new).collect();
        Self::new(vertices, faces, index)
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    /// The vertex arena.
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Mutable vertices. Call `update_bbox` after moving any of them.
    pub fn vertices_mut(&mut self) -> &mut [Point] {
        &mut self.vertices
    }

    /// Faces in construction order.
    pub fn faces(&self) -> &[Face] {
        self.index.elements()
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of faces.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.index.len()
    }

    /// Returns `true` if the mesh has no faces.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// The face index.
    pub fn index(&self) -> &I {
        &self.index
    }

    /// Corner positions of face `face`.
    pub fn face_corners(&self, face: usize) -> Option<[Vec3; 3]> {
        self.faces().get(face).map(|f| f.triangle().corners())
    }

    /// Sets a custom property on face `face`.
    pub fn set_face_property(
        &mut self,
        face: usize,
        key: impl Into<String>,
        value: f64,
    ) -> GeometryResult<Option<f64>> {
        let len = self.face_count();
        let face = self
            .index
            .elements_mut()
            .get_mut(face)
            .ok_or(GeometryError::IndexOutOfRange { index: face, len })?;
        Ok(face.set_property(key, value))
    }

    // =========================================================================
    // MEASURES
    // =========================================================================

    /// Area-weighted vertex normals; zero for vertices without faces.
    pub fn vertex_normals(&self) -> Vec<Vec3> {
        let mut normals = vec![Vec3::ZERO; self.vertices.len()];
        for face in self.faces() {
            let scaled = face.triangle().scaled_normal();
            for i in face.indices() {
                normals[i] += scaled;
            }
        }
        normals.into_iter().map(Vec3::normalize_or_zero).collect()
    }

    /// Sum of the face areas.
    pub fn surface_area(&self) -> f64 {
        self.faces().iter().map(|f| f.triangle().area()).sum()
    }

    // =========================================================================
    // TRANSFORM
    // =========================================================================

    /// Applies a rigid transform to every vertex and rebuilds the index.
    pub fn transform(&mut self, pose: &Pose) {
        for vertex in &mut self.vertices {
            vertex.position = pose.transform_point(vertex.position);
            if let Some(normal) = vertex.normal.as_mut() {
                *normal = pose.transform_direction(*normal).normalize_or_zero();
            }
        }
        self.update_bbox();
    }

    /// Vertices as a point cloud; missing normals are filled from the faces.
    pub fn to_point_cloud(&self) -> PointCloud {
        let computed = self.vertex_normals();
        let points = self
            .vertices
            .iter()
            .zip(computed)
            .map(|(vertex, normal)| Point {
                position: vertex.position,
                normal: vertex.normal.or((normal != Vec3::ZERO).then_some(normal)),
            })
            .collect();
        PointCloud::new(points, BruteForceIndex::new())
    }
}

impl<I: SpatialIndex<Face>> Clone for Mesh<I> {
    fn clone(&self) -> Self {
        let mut index = self.index.copy_empty();
        index.load(self.faces().to_vec());
        Self {
            vertices: self.vertices.clone(),
            index,
        }
    }
}

impl<I: SpatialIndex<Face> + Default> Default for Mesh<I> {
    fn default() -> Self {
        Self {
            vertices: Vec::new(),
            index: I::default(),
        }
    }
}

// =============================================================================
// GEOMETRY CONTRACTS
// =============================================================================

impl<I: SpatialIndex<Face>> Geometry for Mesh<I> {
    /// Closest point on any face; `point` itself for a mesh without faces.
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

impl<I: SpatialIndex<Face>> FiniteGeometry for Mesh<I> {
    fn bbox(&self) -> AABox {
        self.index.bbox()
    }

    /// Re-resolves every face from the vertex arena and reloads the index.
    fn update_bbox(&mut self) {
        let vertices = &self.vertices;
        for face in self.index.elements_mut() {
            face.refresh(vertices);
        }
        self.index.rebuild();
    }

    fn to_mesh(&self) -> Mesh {
        let mut index = BruteForceIndex::new();
        index.load(self.faces().to_vec());
        Mesh {
            vertices: self.vertices.clone(),
            index,
        }
    }

    /// Area-weighted mean of the face centroids.
    fn centroid(&self) -> Vec3 {
        let (sum, area) = self
            .faces()
            .iter()
            .fold((Vec3::ZERO, 0.0), |(sum, area), face| {
                let a = face.triangle().area();
                (sum + face.centroid() * a, area + a)
            });
        if area > 0.0 {
            sum / area
        } else {
            self.bbox().center()
        }
    }
}

impl<I: SpatialIndex<Face>> Shape for Mesh<I> {
    type Element = Face;

    fn points(&self) -> Vec<Vec3> {
        self.vertices.iter().map(|v| v.position).collect()
    }

    /// Stored vertex normals, falling back to area-weighted face normals.
    fn normals(&self) -> Vec<Vec3> {
        self.vertices
            .iter()
            .zip(self.vertex_normals())
            .map(|(vertex, computed)| vertex.normal.unwrap_or(computed))
            .collect()
    }

    /// Face areas.
    fn size_weights(&self) -> Vec<f64> {
        self.faces().iter().map(|f| f.triangle().area()).collect()
    }

    fn geometries(&self) -> &[Face] {
        self.faces()
    }
}

impl<I: SpatialIndex<Face>> GeometryCollection<Face> for Mesh<I> {
    fn nearest(
        &self,
        position: Vec3,
        filter: Option<ElementFilter<'_, Face>>,
        max_distance: Option<f64>,
    ) -> Option<NearestHit<'_, Face>> {
        self.index.nearest(position, filter, max_distance)
    }

    fn intersect_ray_elements(
        &self,
        ray: &Ray,
        max_distance: Option<f64>,
    ) -> Vec<MultiGeometryIntersection<'_, Face>> {
        self.index.intersect_ray(ray, max_distance)
    }

    fn intersect_box_elements(&self, bbox: &AABox) -> Vec<&Face> {
        self.index.intersect_box(bbox)
    }
}

#[cfg(test)]
mod tests;
