//! # Bounding-Box Reduction
//!
//! Min/max reduction over point sets and over the bounding boxes of finite
//! geometries, sequential or data-parallel.
//!
//! ## Parallel scheme
//!
//! ```text
//! elements ──par_chunks──▶ partition 0 ─fold─▶ local (min, max) ─┐
//!                          partition 1 ─fold─▶ local (min, max) ─┼─lock─▶ shared (min, max)
//!                          ...                                    ┘
//! ```
//!
//! Each partition folds into its own accumulator and takes the shared lock
//! once, at partition end. Componentwise min/max is commutative and
//! associative, so the result does not depend on scheduling.

use std::sync::Mutex;

use rayon::prelude::*;
use tracing::debug;

use crate::config::KernelConfig;
use crate::core::vec3::Vec3;
use crate::error::{GeometryError, GeometryResult};
use crate::geometry::FiniteGeometry;
use crate::primitives::aabox::AABox;

type Bounds = (Vec3, Vec3);

/// Bounding box of a point set.
///
/// # Examples
/// ```
/// use recon_geometry::ops::bbox::min_max_of_points;
/// use recon_geometry::Vec3;
///
/// let points = [Vec3::new(1.0, 5.0, -1.0), Vec3::new(-2.0, 0.0, 3.0)];
/// let bbox = min_max_of_points(&points, true).unwrap();
/// assert_eq!(bbox.min(), Vec3::new(-2.0, 0.0, -1.0));
/// assert_eq!(bbox.max(), Vec3::new(1.0, 5.0, 3.0));
/// ```
pub fn min_max_of_points(points: &[Vec3], use_parallel: bool) -> GeometryResult<AABox> {
    min_max_of_points_with(points, use_parallel, &KernelConfig::default())
}

/// [`min_max_of_points`] with an explicit partition size.
pub fn min_max_of_points_with(
    points: &[Vec3],
    use_parallel: bool,
    config: &KernelConfig,
) -> GeometryResult<AABox> {
    reduce(points, use_parallel, config.parallel_min_chunk, |p| (*p, *p))
}

/// Bounding box of the bounding boxes of `geometries`.
pub fn bbox_of_geometries<G>(geometries: &[G], use_parallel: bool) -> GeometryResult<AABox>
where
    G: FiniteGeometry + Sync,
{
    bbox_of_geometries_with(geometries, use_parallel, &KernelConfig::default())
}

/// [`bbox_of_geometries`] with an explicit partition size.
pub fn bbox_of_geometries_with<G>(
    geometries: &[G],
    use_parallel: bool,
    config: &KernelConfig,
) -> GeometryResult<AABox>
where
    G: FiniteGeometry + Sync,
{
    reduce(geometries, use_parallel, config.parallel_min_chunk, |g| {
        let bbox = g.bbox();
        (bbox.min(), bbox.max())
    })
}

fn merge((lo_a, hi_a): Bounds, (lo_b, hi_b): Bounds) -> Bounds {
    (lo_a.min(lo_b), hi_a.max(hi_b))
}

fn fold_partition<T, F>(items: &[T], bounds_of: &F) -> Option<Bounds>
where
    F: Fn(&T) -> Bounds,
{
    items
        .iter()
        .map(bounds_of)
        .reduce(merge)
}

fn reduce<T, F>(
    items: &[T],
    use_parallel: bool,
    min_chunk: usize,
    bounds_of: F,
) -> GeometryResult<AABox>
where
    T: Sync,
    F: Fn(&T) -> Bounds + Sync,
{
    if items.is_empty() {
        return Err(GeometryError::EmptyInput("bounding box of zero elements"));
    }

    let (min, max) = if use_parallel {
        let chunk = min_chunk.max(1);
        debug!(
            elements = items.len(),
            partitions = items.len().div_ceil(chunk),
            "parallel bbox reduction"
        );
        let shared: Mutex<Option<Bounds>> = Mutex::new(None);
        items.par_chunks(chunk).try_for_each(|partition| {
            let Some(local) = fold_partition(partition, &bounds_of) else {
                return Ok(());
            };
            let mut guard = shared.lock().map_err(|_| {
                GeometryError::Parallel("bbox accumulator lock poisoned".to_string())
            })?;
            *guard = Some(match *guard {
                Some(current) => merge(current, local),
                None => local,
            });
            Ok::<(), GeometryError>(())
        })?;
        shared
            .into_inner()
            .map_err(|_| GeometryError::Parallel("bbox accumulator lock poisoned".to_string()))?
            .ok_or(GeometryError::EmptyInput("bounding box of zero elements"))?
    } else {
        fold_partition(items, &bounds_of)
            .ok_or(GeometryError::EmptyInput("bounding box of zero elements"))?
    };

    AABox::new(min, max)
}
