//! # Recon Geometry
//!
//! Finite geometry and spatial query kernel for 3-D reconstruction research.
//!
//! ## Architecture
//!
//! ```text
//! Pose / Ray / primitives (Point, AABox, AARectangle, Plane, Triangle)
//!       ↓
//! Geometry → FiniteGeometry → Shape / GeometryCollection
//!       ↓
//! SpatialIndex (BruteForceIndex | OctreeIndex)
//!       ↓
//! Mesh / PointCloud (+ MeshCreator / PointCloudCreator)
//!       ↓
//! ops: bbox reduction, clipping, plane fitting, alignment measures
//! ```
//!
//! Collections own their elements through their spatial index, so every
//! query a mesh or point cloud answers is answered by the index it was built
//! with. Swapping the index changes performance, never results.
//!
//! ## Usage
//!
//! ```
//! use recon_geometry::{AABox, FiniteGeometry, GeometryCollection, PointCloud, Ray, Vec3};
//!
//! let cube = AABox::new(Vec3::ZERO, Vec3::ONE).unwrap();
//! let cloud = PointCloud::from_positions(cube.corners().to_vec());
//! assert_eq!(cloud.bbox(), cube);
//!
//! let nearest = cloud.nearest(Vec3::splat(3.0), None, None).unwrap();
//! assert_eq!(nearest.geometry.position, Vec3::ONE);
//!
//! let ray = Ray::new(Vec3::new(-1.0, 0.25, 0.3), Vec3::X);
//! let mesh = cube.to_mesh();
//! let hits = mesh.intersect_ray_elements(&ray, None);
//! assert_eq!(hits.len(), 2);
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod geometry;
pub mod mesh;
pub mod ops;
pub mod point_cloud;
pub mod primitives;
pub mod ray;
pub mod spatial;

pub use crate::config::KernelConfig;
pub use crate::core::axis::Axis;
pub use crate::core::pose::{Pose, Validation};
pub use crate::core::vec3::Vec3;
pub use error::{GeometryError, GeometryResult};
pub use geometry::{
    ElementFilter, FiniteGeometry, FiniteGeometryCollection, Geometry, GeometryCollection, Shape,
};
pub use mesh::{Face, FaceProperties, Mesh, MeshCreator};
pub use point_cloud::{PointCloud, PointCloudCreator};
pub use primitives::aabox::AABox;
pub use primitives::aarectangle::AARectangle;
pub use primitives::plane::Plane;
pub use primitives::point::Point;
pub use primitives::triangle::Triangle;
pub use ray::{Intersection, MultiGeometryIntersection, NearestHit, Ray};
pub use spatial::{BruteForceIndex, OctreeConfig, OctreeIndex, SpatialIndex};
