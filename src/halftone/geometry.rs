//! # Dot Geometry
//!
//! Models a single halftone dot as the set of integer pixel offsets inside a
//! circle, sorted by distance from the dot center. The sorted order is the
//! fill order: a dot of pixel count `n` is exactly the first `n` offsets, so
//! growing a dot never un-paints a pixel.

use crate::error::LunaresError;

/// One pixel of the maximum-size dot, positioned relative to the dot center
/// at (0, 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelOffset {
    pub dx: i32,
    pub dy: i32,
    /// Squared distance from the dot center. Sorting by squared distance
    /// orders the same as sorting by distance, with no square roots.
    pub dist_sq: i32,
}

/// Derived geometry for one dot pitch: bounding-box size, center, and the
/// distance-sorted pixel offsets of the maximum-size dot.
#[derive(Debug, Clone)]
pub struct DotGeometry {
    pitch: usize,
    dot_width: usize,
    dot_center: usize,
    offsets: Vec<PixelOffset>,
}

impl DotGeometry {
    /// Enumerate and sort the pixels of a dot for the given pitch.
    ///
    /// The dot's square bounding box is `pitch + 2` wide, rounded up to the
    /// next odd size so the dot has a single well-defined center pixel. A
    /// grid position belongs to the dot when its squared distance from the
    /// center is strictly below `center²`.
    ///
    /// Fails with [`LunaresError::InvalidPitch`] when `pitch < 2`; a smaller
    /// dot is too small to be meaningful.
    pub fn build(pitch: usize) -> Result<Self, LunaresError> {
        if pitch < 2 {
            return Err(LunaresError::InvalidPitch(pitch));
        }

        let mut dot_width = pitch + 2;
        if dot_width % 2 == 0 {
            dot_width += 1;
        }
        let dot_center = (dot_width - 1) / 2;
        let center_sq = (dot_center * dot_center) as i32;

        let mut offsets = Vec::with_capacity(dot_width * dot_width);
        for y in 0..dot_width {
            for x in 0..dot_width {
                let dx = x as i32 - dot_center as i32;
                let dy = y as i32 - dot_center as i32;
                let dist_sq = dx * dx + dy * dy;
                if dist_sq < center_sq {
                    offsets.push(PixelOffset { dx, dy, dist_sq });
                }
            }
        }
        // Stable sort keeps scan order among equidistant pixels, so the fill
        // order is deterministic.
        offsets.sort_by_key(|offset| offset.dist_sq);

        Ok(Self {
            pitch,
            dot_width,
            dot_center,
            offsets,
        })
    }

    /// Center-to-center dot spacing this geometry was built for.
    pub fn pitch(&self) -> usize {
        self.pitch
    }

    /// Side length of the square dot bounding box. Always odd.
    pub fn dot_width(&self) -> usize {
        self.dot_width
    }

    /// Index of the center pixel on either axis of the bounding box.
    pub fn dot_center(&self) -> usize {
        self.dot_center
    }

    /// Pixel offsets of the maximum-size dot, sorted by ascending squared
    /// distance from the center.
    pub fn offsets(&self) -> &[PixelOffset] {
        &self.offsets
    }

    /// Pixel count of the maximum-size dot.
    pub fn max_pixels_in_dot(&self) -> usize {
        self.offsets.len()
    }
}
