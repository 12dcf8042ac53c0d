//! # Precomputed Dot Bitmaps
//!
//! One dot bitmap per luminance value, materialized up front so the grid
//! renderer stamps with a plain slice lookup. All 256 bitmaps live in one
//! contiguous allocation.
//!
//! Construction walks luminance from white to black. Dots only ever grow in
//! that direction (the luminance map is non-increasing), so each bitmap is
//! the previous one plus zero or more pixels: copy the finished bitmap
//! forward, advance a cursor through the distance-sorted offsets until the
//! next pixel count is reached, repeat. No bitmap is ever rebuilt from
//! scratch.

use crate::bitmap::{BLACK, LUMINANCES, WHITE, alloc_pixels};
use crate::error::LunaresError;
use crate::halftone::calibrate::LuminanceMap;
use crate::halftone::geometry::DotGeometry;

/// 256 dot bitmaps, each `dot_width` × `dot_width` bytes of [`BLACK`] /
/// [`WHITE`], indexed by source luminance.
#[derive(Debug, Clone)]
pub struct DotBitmapTable {
    dot_width: usize,
    bitmap_len: usize,
    data: Vec<u8>,
}

impl DotBitmapTable {
    /// Materialize the dot bitmap for every luminance value.
    ///
    /// Fails only on allocation failure.
    pub fn precompute(
        geometry: &DotGeometry,
        map: &LuminanceMap,
    ) -> Result<Self, LunaresError> {
        let dot_width = geometry.dot_width();
        let bitmap_len = dot_width * dot_width;
        let mut data = alloc_pixels(LUMINANCES * bitmap_len, WHITE)?;
        let center = geometry.dot_center() as i32;

        // The cursor into the sorted offsets only ever advances; it carries
        // the painted-so-far state from each luminance level to the next.
        let mut cursor = 0usize;
        for luminance in (0..LUMINANCES).rev() {
            let base = luminance * bitmap_len;
            let target = map.pixel_count(luminance as u8);
            while cursor < target {
                let offset = geometry.offsets()[cursor];
                let x = (center + offset.dx) as usize;
                let y = (center + offset.dy) as usize;
                data[base + y * dot_width + x] = BLACK;
                cursor += 1;
            }
            if luminance > 0 {
                data.copy_within(base..base + bitmap_len, base - bitmap_len);
            }
        }

        Ok(Self {
            dot_width,
            bitmap_len,
            data,
        })
    }

    /// Side length of each dot bitmap.
    pub fn dot_width(&self) -> usize {
        self.dot_width
    }

    /// The `dot_width` × `dot_width` bitmap for a source luminance.
    pub fn bitmap(&self, luminance: u8) -> &[u8] {
        let base = luminance as usize * self.bitmap_len;
        &self.data[base..base + self.bitmap_len]
    }
}
