//! # Region Clipping
//!
//! Turns a list of possibly overlapping regions into a list of pairwise
//! non-overlapping ones covering the same area or volume.
//!
//! ## Algorithm
//!
//! ```text
//! i = 0
//! while i < len:
//!     j = first index after i whose region overlaps regions[i]
//!     none  -> i += 1
//!     found -> replace regions[i] by regions[i].clip_against(regions[j]),
//!              rescan from i (the prefix before i stays resolved)
//! ```
//!
//! Fragments of `regions[i]` never overlap each other nor `regions[j]`, so
//! the prefix `[0, i)` is overlap-free at every step and the scan never
//! restarts from zero.

use tracing::debug;

use crate::error::GeometryResult;
use crate::primitives::aabox::AABox;
use crate::primitives::aarectangle::AARectangle;

/// A region that can be clipped against another region of the same kind.
pub trait Clippable: Sized {
    /// Returns `true` if the regions share interior.
    fn overlaps_with(&self, other: &Self) -> GeometryResult<bool>;

    /// Parts of `self` outside `other`, pairwise non-overlapping.
    fn clip_against(&self, other: &Self) -> GeometryResult<Vec<Self>>;
}

impl Clippable for AABox {
    fn overlaps_with(&self, other: &Self) -> GeometryResult<bool> {
        Ok(self.overlaps(other))
    }

    fn clip_against(&self, other: &Self) -> GeometryResult<Vec<Self>> {
        Ok(self.clip_on(other))
    }
}

impl Clippable for AARectangle {
    fn overlaps_with(&self, other: &Self) -> GeometryResult<bool> {
        self.overlaps(other)
    }

    fn clip_against(&self, other: &Self) -> GeometryResult<Vec<Self>> {
        self.clip_on(other)
    }
}

/// Clips `regions` until no two of them overlap.
///
/// Later regions win: where two regions overlap, the earlier one is cut.
/// Rectangles with different orientations fail with
/// [`GeometryError::PreconditionMismatch`](crate::error::GeometryError::PreconditionMismatch).
///
/// # Examples
/// ```
/// use recon_geometry::ops::clip::clip_all;
/// use recon_geometry::{AABox, Vec3};
///
/// let a = AABox::new(Vec3::ZERO, Vec3::splat(2.0)).unwrap();
/// let b = AABox::new(Vec3::ONE, Vec3::splat(3.0)).unwrap();
/// let parts = clip_all(vec![a, b]).unwrap();
/// let volume: f64 = parts.iter().map(AABox::volume).sum();
/// assert_eq!(volume, 8.0 + 8.0 - 1.0);
/// ```
pub fn clip_all<T: Clippable>(mut regions: Vec<T>) -> GeometryResult<Vec<T>> {
    let input = regions.len();
    let mut clips = 0usize;
    let mut i = 0;
    while i < regions.len() {
        let mut overlapping = None;
        for j in i + 1..regions.len() {
            if regions[i].overlaps_with(&regions[j])? {
                overlapping = Some(j);
                break;
            }
        }
        match overlapping {
            Some(j) => {
                let fragments = regions[i].clip_against(&regions[j])?;
                regions.splice(i..=i, fragments);
                clips += 1;
            }
            None => i += 1,
        }
    }
    debug!(input, output = regions.len(), clips, "clipped regions");
    Ok(regions)
}
