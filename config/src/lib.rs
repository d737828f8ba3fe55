//! # Config Crate
//!
//! Centralized numeric constants for the reconstruction geometry kernel.
//! Tolerances, parallel partition sizes and spatial index limits are defined
//! here once so that every geometry module compares floats the same way.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{EPSILON_TOLERANCE, POSE_ORTHONORMALITY_TOLERANCE};
//!
//! // Generic float comparisons
//! let value: f64 = 1e-12;
//! assert!(value.abs() < EPSILON_TOLERANCE);
//!
//! // Rigid pose checks are deliberately looser than generic comparisons
//! assert!(POSE_ORTHONORMALITY_TOLERANCE > EPSILON_TOLERANCE);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Validated Overrides**: Runtime overrides go through [`constants::GlobalConfig::new`]
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;

#[cfg(test)]
mod tests;
