//! Mesh faces: three vertex indices into the owning mesh's vertex arena.
//!
//! A face caches the [`Triangle`] its indices resolve to, so spatial queries
//! never need the arena. The cache is refreshed by the owning mesh whenever
//! its bounding box is rebuilt.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::vec3::Vec3;
use crate::geometry::{FiniteGeometry, Geometry};
use crate::mesh::Mesh;
use crate::primitives::aabox::AABox;
use crate::primitives::point::Point;
use crate::primitives::triangle::Triangle;
use crate::ray::{Intersection, Ray};

/// Custom per-face values carried through merges (evaluation metadata).
pub type FaceProperties = BTreeMap<String, f64>;

/// Triangle face referencing three mesh vertices.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Face {
    indices: [usize; 3],
    #[serde(skip)]
    triangle: Triangle,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    properties: FaceProperties,
}

impl Face {
    /// Creates a face over vertex indices; geometry is resolved by the mesh.
    pub fn new(indices: [usize; 3]) -> Self {
        Self {
            indices,
            triangle: Triangle::default(),
            properties: FaceProperties::new(),
        }
    }

    /// Creates a face carrying custom properties.
    pub fn with_properties(indices: [usize; 3], properties: FaceProperties) -> Self {
        Self {
            properties,
            ..Self::new(indices)
        }
    }

    /// Vertex indices.
    #[inline]
    pub fn indices(&self) -> [usize; 3] {
        self.indices
    }

    /// The resolved triangle.
    #[inline]
    pub fn triangle(&self) -> &Triangle {
        &self.triangle
    }

    /// Custom properties.
    pub fn properties(&self) -> &FaceProperties {
        &self.properties
    }

    /// Looks up a single property.
    pub fn property(&self, key: &str) -> Option<f64> {
        self.properties.get(key).copied()
    }

    /// Sets a property, returning the previous value.
    pub fn set_property(&mut self, key: impl Into<String>, value: f64) -> Option<f64> {
        self.properties.insert(key.into(), value)
    }

    /// Re-resolves the cached triangle. Indices must be in range.
    pub(crate) fn refresh(&mut self, vertices: &[Point]) {
        let [a, b, c] = self.indices.map(|i| vertices[i].position);
        self.triangle = Triangle::new(a, b, c);
    }

    /// The same face with every index shifted by `offset`.
    pub(crate) fn offset(&self, offset: usize) -> Face {
        Face {
            indices: self.indices.map(|i| i + offset),
            triangle: self.triangle,
            properties: self.properties.clone(),
        }
    }
}

impl Geometry for Face {
    fn closest_point(&self, point: Vec3) -> Vec3 {
        self.triangle.closest_point(point)
    }

    fn intersects_box(&self, bbox: &AABox) -> bool {
        self.triangle.intersects_box(bbox)
    }

    fn intersect_ray(&self, ray: &Ray) -> Vec<Intersection> {
        self.triangle.intersect_ray(ray)
    }
}

impl FiniteGeometry for Face {
    fn bbox(&self) -> AABox {
        self.triangle.bbox()
    }

    fn to_mesh(&self) -> Mesh {
        self.triangle.to_mesh()
    }

    fn centroid(&self) -> Vec3 {
        self.triangle.center()
    }
}
