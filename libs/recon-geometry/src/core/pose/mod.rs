//! # Rigid Pose
//!
//! A position plus orientation stored as a 4×4 homogeneous matrix.
//!
//! ## Invariant
//!
//! - The upper-left 3×3 block is orthonormal with `|det| = 1` (mirrored,
//!   left-handed frames are allowed)
//! - The last row is `[0, 0, 0, 1]`
//!
//! Every constructor and setter takes a [`Validation`] so a call site can opt
//! out of the check explicitly. The check compares `R·Rᵀ` against identity and
//! `|det R|` against one with the configured pose tolerance.
//!
//! ## Composition
//!
//! `a * b` applies `b` first, then `a`. `pose * point` applies the rigid
//! transform to a point.

use std::ops::Mul;

use glam::{DMat3, DMat4, DQuat, DVec4, EulerRot};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::config::KernelConfig;
use crate::core::vec3::Vec3;
use crate::error::{GeometryError, GeometryResult};

/// Whether a pose constructor or setter checks the rigid invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Validation {
    /// Reject non-rigid matrices with [`GeometryError::InvalidPose`].
    #[default]
    Enforce,
    /// Accept the matrix as given.
    Skip,
}

/// Rigid transform wrapping a homogeneous 4×4 matrix.
///
/// # Examples
/// ```
/// use recon_geometry::{Pose, Vec3};
///
/// let pose = Pose::from_rodrigues(Vec3::new(0.0, 0.0, std::f64::consts::FRAC_PI_2), Vec3::X);
/// let p = pose * Vec3::X;
/// assert!((p - Vec3::new(1.0, 1.0, 0.0)).length() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 16]", into = "[f64; 16]")]
pub struct Pose {
    matrix: DMat4,
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

// =============================================================================
// CONSTRUCTION
// =============================================================================

impl Pose {
    /// The identity pose.
    pub const IDENTITY: Pose = Pose {
        matrix: DMat4::IDENTITY,
    };

    /// Returns the identity pose.
    pub fn identity() -> Self {
        Self::IDENTITY
    }

    /// Wraps a homogeneous matrix.
    pub fn from_matrix(matrix: DMat4, validation: Validation) -> GeometryResult<Self> {
        Self::from_matrix_with(matrix, validation, &KernelConfig::default())
    }

    /// Wraps a homogeneous matrix, checking with the tolerance of `config`.
    pub fn from_matrix_with(
        matrix: DMat4,
        validation: Validation,
        config: &KernelConfig,
    ) -> GeometryResult<Self> {
        match validation {
            Validation::Enforce => check_rigid(&matrix, config.pose_tolerance)?,
            Validation::Skip => trace!("pose constructed without rigid check"),
        }
        Ok(Self { matrix })
    }

    /// Builds a pose from a rotation matrix and a translation.
    pub fn from_rotation_translation(
        rotation: DMat3,
        translation: Vec3,
        validation: Validation,
    ) -> GeometryResult<Self> {
        Self::from_matrix(compose(rotation, translation), validation)
    }

    /// Builds a pose from a quaternion and a translation.
    ///
    /// The quaternion is normalized first; a zero or non-finite quaternion is
    /// rejected.
    pub fn from_quaternion(rotation: DQuat, translation: Vec3) -> GeometryResult<Self> {
        let length = rotation.length();
        if !length.is_finite() || length < f64::EPSILON {
            return Err(GeometryError::InvalidPose(format!(
                "quaternion cannot be normalized: {rotation}"
            )));
        }
        Ok(Self {
            matrix: DMat4::from_rotation_translation(rotation / length, translation),
        })
    }

    /// Builds a pose from intrinsic XYZ Euler angles (radians).
    pub fn from_euler(x: f64, y: f64, z: f64, translation: Vec3) -> Self {
        Self {
            matrix: DMat4::from_rotation_translation(
                DQuat::from_euler(EulerRot::XYZ, x, y, z),
                translation,
            ),
        }
    }

    /// Builds a pose from a Rodrigues rotation vector (axis scaled by angle).
    pub fn from_rodrigues(rotation: Vec3, translation: Vec3) -> Self {
        Self {
            matrix: DMat4::from_rotation_translation(DQuat::from_scaled_axis(rotation), translation),
        }
    }

    /// Builds a pose from 16 row-major values, as stored by pose files.
    pub fn from_row_major(values: &[f64; 16], validation: Validation) -> GeometryResult<Self> {
        Self::from_matrix(DMat4::from_cols_array(values).transpose(), validation)
    }

    /// Returns the 16 row-major matrix values.
    pub fn to_row_major(&self) -> [f64; 16] {
        self.matrix.transpose().to_cols_array()
    }
}

// =============================================================================
// ACCESSORS
// =============================================================================

impl Pose {
    /// Returns the homogeneous matrix.
    #[inline]
    pub fn matrix(&self) -> DMat4 {
        self.matrix
    }

    /// Returns the translation component.
    #[inline]
    pub fn translation(&self) -> Vec3 {
        self.matrix.w_axis.truncate()
    }

    /// Replaces the translation component.
    pub fn set_translation(&mut self, translation: Vec3) {
        self.matrix.w_axis = translation.extend(1.0);
    }

    /// Returns the 3×3 orientation block.
    #[inline]
    pub fn orientation_matrix(&self) -> DMat3 {
        DMat3::from_mat4(self.matrix)
    }

    /// Replaces the orientation block.
    pub fn set_orientation_matrix(
        &mut self,
        rotation: DMat3,
        validation: Validation,
    ) -> GeometryResult<()> {
        let matrix = compose(rotation, self.translation());
        *self = Self::from_matrix(matrix, validation)?;
        Ok(())
    }

    /// Returns `true` for a left-handed (mirrored) frame.
    pub fn is_mirrored(&self) -> bool {
        self.orientation_matrix().determinant() < 0.0
    }

    /// Returns the orientation as a unit quaternion.
    ///
    /// Mirrored frames have no quaternion and are rejected.
    pub fn quaternion(&self) -> GeometryResult<DQuat> {
        if self.is_mirrored() {
            return Err(GeometryError::InvalidPose(
                "mirrored frame has no quaternion representation".to_string(),
            ));
        }
        Ok(DQuat::from_mat3(&self.orientation_matrix()).normalize())
    }

    /// Replaces the orientation with a quaternion.
    pub fn set_quaternion(&mut self, rotation: DQuat) -> GeometryResult<()> {
        *self = Self::from_quaternion(rotation, self.translation())?;
        Ok(())
    }

    /// Returns intrinsic XYZ Euler angles (radians).
    pub fn euler_angles(&self) -> GeometryResult<(f64, f64, f64)> {
        Ok(self.quaternion()?.to_euler(EulerRot::XYZ))
    }

    /// Replaces the orientation with intrinsic XYZ Euler angles (radians).
    pub fn set_euler_angles(&mut self, x: f64, y: f64, z: f64) -> GeometryResult<()> {
        let rotation = DMat3::from_quat(DQuat::from_euler(EulerRot::XYZ, x, y, z));
        self.set_orientation_matrix(rotation, Validation::Enforce)
    }

    /// Returns the orientation as a Rodrigues vector (axis scaled by angle).
    pub fn rodrigues(&self) -> GeometryResult<Vec3> {
        Ok(self.quaternion()?.to_scaled_axis())
    }

    /// Replaces the orientation with a Rodrigues vector.
    pub fn set_rodrigues(&mut self, rotation: Vec3) -> GeometryResult<()> {
        let rotation = DMat3::from_quat(DQuat::from_scaled_axis(rotation));
        self.set_orientation_matrix(rotation, Validation::Enforce)
    }
}

// =============================================================================
// OPERATIONS
// =============================================================================

impl Pose {
    /// Returns the inverse pose.
    ///
    /// Uses the full 4×4 inverse rather than transpose-and-negate, so a pose
    /// built with [`Validation::Skip`] inverts correctly too. Singular matrices
    /// are rejected.
    pub fn inverted(&self) -> GeometryResult<Pose> {
        let det = self.matrix.determinant();
        if !det.is_finite() || det.abs() < f64::EPSILON {
            return Err(GeometryError::InvalidPose(format!(
                "cannot invert singular matrix (det = {det})"
            )));
        }
        Ok(Pose {
            matrix: self.matrix.inverse(),
        })
    }

    /// Applies the pose to a point.
    #[inline]
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.matrix.transform_point3(point)
    }

    /// Applies only the orientation to a direction.
    #[inline]
    pub fn transform_direction(&self, direction: Vec3) -> Vec3 {
        self.matrix.transform_vector3(direction)
    }

    /// Rotates the pose in place about the world origin.
    pub fn rotate(&mut self, rotation: DMat3, validation: Validation) -> GeometryResult<()> {
        let rotated = DMat4::from_mat3(rotation) * self.matrix;
        *self = Self::from_matrix(rotated, validation)?;
        Ok(())
    }

    /// Translates the pose in place.
    pub fn translate(&mut self, offset: Vec3) {
        let translation = self.translation() + offset;
        self.set_translation(translation);
    }

    /// Element-wise comparison of the two matrices.
    pub fn approx_eq(&self, other: &Pose, tolerance: f64) -> bool {
        self.matrix.abs_diff_eq(other.matrix, tolerance)
    }
}

impl Mul for Pose {
    type Output = Pose;

    /// Composes two poses; `rhs` is applied first.
    fn mul(self, rhs: Pose) -> Pose {
        Pose {
            matrix: self.matrix * rhs.matrix,
        }
    }
}

impl Mul<Vec3> for Pose {
    type Output = Vec3;

    fn mul(self, rhs: Vec3) -> Vec3 {
        self.transform_point(rhs)
    }
}

impl TryFrom<[f64; 16]> for Pose {
    type Error = GeometryError;

    fn try_from(values: [f64; 16]) -> GeometryResult<Self> {
        Self::from_row_major(&values, Validation::Enforce)
    }
}

impl From<Pose> for [f64; 16] {
    fn from(pose: Pose) -> Self {
        pose.to_row_major()
    }
}

// =============================================================================
// VALIDATION
// =============================================================================

/// Checks the rigid invariant of a homogeneous matrix.
///
/// # Examples
/// ```
/// use glam::DMat4;
/// use recon_geometry::core::pose::check_rigid;
///
/// assert!(check_rigid(&DMat4::IDENTITY, 1e-5).is_ok());
/// assert!(check_rigid(&DMat4::from_scale(glam::DVec3::splat(2.0)), 1e-5).is_err());
/// ```
pub fn check_rigid(matrix: &DMat4, tolerance: f64) -> GeometryResult<()> {
    if !matrix.is_finite() {
        return Err(GeometryError::InvalidPose(
            "matrix has non-finite entries".to_string(),
        ));
    }
    if !matrix.row(3).abs_diff_eq(DVec4::W, tolerance) {
        return Err(GeometryError::InvalidPose(format!(
            "last row must be [0, 0, 0, 1], got {}",
            matrix.row(3)
        )));
    }
    let rotation = DMat3::from_mat4(*matrix);
    if !(rotation * rotation.transpose()).abs_diff_eq(DMat3::IDENTITY, tolerance) {
        return Err(GeometryError::InvalidPose(
            "orientation block is not orthonormal".to_string(),
        ));
    }
    let det = rotation.determinant();
    if (det.abs() - 1.0).abs() > tolerance {
        return Err(GeometryError::InvalidPose(format!(
            "orientation determinant must be ±1, got {det}"
        )));
    }
    Ok(())
}

fn compose(rotation: DMat3, translation: Vec3) -> DMat4 {
    let mut matrix = DMat4::from_mat3(rotation);
    matrix.w_axis = translation.extend(1.0);
    matrix
}

#[cfg(test)]
mod tests;
