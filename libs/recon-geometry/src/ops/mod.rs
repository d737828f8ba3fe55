//! Bulk algorithms over collections of geometries.
//!
//! - [`bbox`]: parallel bounding-box and min/max reductions
//! - [`clip`]: partitioning overlapping regions
//! - [`plane_fit`]: weighted least-squares planes
//! - [`alignment`]: normal angles and weighted surface distances

pub mod alignment;
pub mod bbox;
pub mod clip;
pub mod plane_fit;
