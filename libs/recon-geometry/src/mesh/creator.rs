//! Incremental mesh builder.
//!
//! Appending a mesh concatenates its vertices and shifts each of its face
//! indices by the number of vertices already present. Face properties are
//! carried through unchanged.

use tracing::debug;

use super::{Face, FaceProperties, Mesh};
use crate::core::vec3::Vec3;
use crate::error::GeometryResult;
use crate::primitives::point::Point;
use crate::spatial::{BruteForceIndex, SpatialIndex};

/// Collects vertices and faces, then builds a [`Mesh`].
///
/// # Examples
/// ```
/// use recon_geometry::{Mesh, MeshCreator, Vec3};
///
/// let tri = Mesh::from_triangles(vec![Vec3::ZERO, Vec3::X, Vec3::Y], vec![[0, 1, 2]]).unwrap();
/// let mut creator = MeshCreator::new();
/// creator.append_mesh(&tri);
/// creator.append_mesh(&tri);
/// let merged = creator.build().unwrap();
/// assert_eq!(merged.vertex_count(), 6);
/// assert_eq!(merged.faces()[1].indices(), [3, 4, 5]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MeshCreator {
    vertices: Vec<Point>,
    faces: Vec<Face>,
    merged: usize,
}

impl MeshCreator {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a vertex and returns its index.
    pub fn add_vertex(&mut self, vertex: impl Into<Point>) -> usize {
        self.vertices.push(vertex.into());
        self.vertices.len() - 1
    }

    /// Adds a face over existing or future vertices and returns its index.
    ///
    /// Indices are validated by [`build`](MeshCreator::build).
    pub fn add_face(&mut self, indices: [usize; 3]) -> usize {
        self.add_face_with_properties(indices, FaceProperties::new())
    }

    /// Adds a face carrying custom properties.
    pub fn add_face_with_properties(
        &mut self,
        indices: [usize; 3],
        properties: FaceProperties,
    ) -> usize {
        self.faces.push(Face::with_properties(indices, properties));
        self.faces.len() - 1
    }

    /// Adds a triangle as three new vertices and one face.
    pub fn add_triangle(&mut self, a: Vec3, b: Vec3, c: Vec3) -> usize {
        let base = self.vertices.len();
        self.vertices.extend([a, b, c].map(Point::new));
        self.add_face([base, base + 1, base + 2])
    }

    /// Appends all vertices and faces of `mesh`.
    pub fn append_mesh<I: SpatialIndex<Face>>(&mut self, mesh: &Mesh<I>) {
        let offset = self.vertices.len();
        self.vertices.extend_from_slice(mesh.vertices());
        self.faces
            .extend(mesh.faces().iter().map(|face| face.offset(offset)));
        self.merged += 1;
    }

    /// Number of vertices collected so far.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of faces collected so far.
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Builds a mesh with the brute-force index.
    pub fn build(self) -> GeometryResult<Mesh> {
        self.build_with_index(BruteForceIndex::new())
    }

    /// Builds a mesh with the given index.
    pub fn build_with_index<I: SpatialIndex<Face>>(self, index: I) -> GeometryResult<Mesh<I>> {
        debug!(
            vertices = self.vertices.len(),
            faces = self.faces.len(),
            merged_meshes = self.merged,
            "building mesh"
        );
        Mesh::new(self.vertices, self.faces, index)
    }

    /// Merges meshes into one brute-force mesh, in iteration order.
    pub fn merge<'a, I, M>(meshes: M) -> GeometryResult<Mesh>
    where
        I: SpatialIndex<Face> + 'a,
        M: IntoIterator<Item = &'a Mesh<I>>,
    {
        let mut creator = Self::new();
        for mesh in meshes {
            creator.append_mesh(mesh);
        }
        creator.build()
    }
}
