//! Core value types for the kernel.
//!
//! Includes vector aliases (`Vec3`), the `Axis` selector and the rigid `Pose`.

pub mod axis;
pub mod pose;
pub mod vec3;
