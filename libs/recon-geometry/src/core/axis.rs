//! Coordinate axis selector.

use serde::{Deserialize, Serialize};

use crate::core::vec3::Vec3;

/// One of the three coordinate axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// The X axis (component 0).
    X,
    /// The Y axis (component 1).
    Y,
    /// The Z axis (component 2).
    Z,
}

impl Axis {
    /// All axes in component order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Component index of the axis.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Unit vector along the axis.
    #[inline]
    pub fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }

    /// The two remaining axes, in component order.
    #[inline]
    pub fn others(self) -> [Axis; 2] {
        match self {
            Axis::X => [Axis::Y, Axis::Z],
            Axis::Y => [Axis::X, Axis::Z],
            Axis::Z => [Axis::X, Axis::Y],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn others_exclude_self() {
        for axis in Axis::ALL {
            assert!(!axis.others().contains(&axis));
        }
    }

    #[test]
    fn unit_matches_index() {
        for axis in Axis::ALL {
            assert_eq!(axis.unit()[axis.index()], 1.0);
        }
    }
}
