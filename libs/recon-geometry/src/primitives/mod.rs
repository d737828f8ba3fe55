//! Primitive geometries.
//!
//! Every primitive implements [`Geometry`](crate::geometry::Geometry); all but
//! the infinite [`Plane`](plane::Plane) also implement
//! [`FiniteGeometry`](crate::geometry::FiniteGeometry).

pub mod aabox;
pub mod aarectangle;
pub mod plane;
pub mod point;
pub mod triangle;
