//! Incremental point cloud builder.

use tracing::debug;

use super::PointCloud;
use crate::primitives::point::Point;
use crate::spatial::{BruteForceIndex, SpatialIndex};

/// Collects points, then builds a [`PointCloud`].
#[derive(Debug, Clone, Default)]
pub struct PointCloudCreator {
    points: Vec<Point>,
    merged: usize,
}

impl PointCloudCreator {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a point and returns its index.
    pub fn add_point(&mut self, point: impl Into<Point>) -> usize {
        self.points.push(point.into());
        self.points.len() - 1
    }

    /// Appends all points of `cloud`, keeping their order.
    pub fn append_point_cloud<I: SpatialIndex<Point>>(&mut self, cloud: &PointCloud<I>) {
        self.points.extend_from_slice(cloud.points());
        self.merged += 1;
    }

    /// Number of points collected so far.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if no points were added.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Builds a point cloud with the brute-force index.
    pub fn build(self) -> PointCloud {
        self.build_with_index(BruteForceIndex::new())
    }

    /// Builds a point cloud with the given index.
    pub fn build_with_index<I: SpatialIndex<Point>>(self, index: I) -> PointCloud<I> {
        debug!(
            points = self.points.len(),
            merged_clouds = self.merged,
            "building point cloud"
        );
        PointCloud::new(self.points, index)
    }

    /// Merges point clouds into one brute-force cloud, in iteration order.
    pub fn merge<'a, I, C>(clouds: C) -> PointCloud
    where
        I: SpatialIndex<Point> + 'a,
        C: IntoIterator<Item = &'a PointCloud<I>>,
    {
        let mut creator = Self::new();
        for cloud in clouds {
            creator.append_point_cloud(cloud);
        }
        creator.build()
    }
}
