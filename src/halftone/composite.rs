//! # Channel Compositing
//!
//! Expands the monochrome dot layer back into the region's channel layout
//! and writes it out in fixed-height horizontal strips, so peak memory stays
//! bounded by one strip regardless of image size.
//!
//! Layouts with an alpha channel (and the plain RGB layout, which shares the
//! code path) first re-read the destination rectangle into the strip buffer
//! and then overwrite only the color channels; alpha bytes pass through from
//! the source untouched. This read-modify-write avoids holding a second
//! full-resolution multi-channel buffer.

use crate::bitmap::{MonoBitmap, alloc_pixels};
use crate::error::LunaresError;
use crate::region::{ChannelLayout, PixelRegion};

/// Rows per compositing strip. Fixed, independent of image size; the last
/// strip of an image may be shorter.
pub(crate) const STRIP_HEIGHT: usize = 64;

/// Write the monochrome dot layer into the region, strip by strip.
pub(crate) fn composite_strips<R: PixelRegion + ?Sized>(
    region: &mut R,
    output: &MonoBitmap,
) -> Result<(), LunaresError> {
    let bounds = region.bounds();
    let width = bounds.width();
    let height = bounds.height();
    let layout = region.layout();
    let channels = layout.channels();

    let mut strip = alloc_pixels(STRIP_HEIGHT * width * channels, 0)?;
    let mono = output.pixels();

    let mut y = 0usize;
    while y < height {
        let rows = STRIP_HEIGHT.min(height - y);
        let strip_len = rows * width * channels;
        let mono_strip = &mono[y * width..(y + rows) * width];

        // Populate the strip from the source first so the channels this
        // pass does not own (alpha) keep their original bytes.
        if layout != ChannelLayout::Gray {
            region.read_rect(
                bounds.x1,
                bounds.y1 + y as i32,
                width,
                rows,
                &mut strip[..strip_len],
            )?;
        }

        match layout {
            ChannelLayout::Gray => strip[..strip_len].copy_from_slice(mono_strip),
            ChannelLayout::GrayAlpha => {
                for (pixel, &value) in strip[..strip_len].chunks_exact_mut(2).zip(mono_strip) {
                    pixel[0] = value;
                }
            }
            ChannelLayout::Rgb | ChannelLayout::RgbAlpha => {
                for (pixel, &value) in
                    strip[..strip_len].chunks_exact_mut(channels).zip(mono_strip)
                {
                    pixel[0] = value;
                    pixel[1] = value;
                    pixel[2] = value;
                }
            }
        }

        region.write_rect(
            bounds.x1,
            bounds.y1 + y as i32,
            width,
            rows,
            &strip[..strip_len],
        )?;
        y += rows;
    }

    Ok(())
}
