//! # Two-Phase Grid Renderer
//!
//! Walks the selection on two interleaved square grids and stamps a
//! precomputed dot bitmap at every grid point. Phase 0 places dots at
//! multiples of the pitch; phase 1 repeats the walk shifted by half a pitch
//! on both axes, landing in the centers of the phase-0 cells. Together the
//! two phases form the 45°-rotated dot lattice of an analog halftone screen.
//!
//! One source row is fetched per grid row, the luminance sample at each grid
//! column picks the dot bitmap, and the stamp is clipped against the output
//! edges. Progress is reported per grid row: phase 0 covers [0, 0.5), phase
//! 1 covers [0.5, 1.0].

use crate::bitmap::{MonoBitmap, alloc_pixels};
use crate::error::LunaresError;
use crate::halftone::dots::DotBitmapTable;
use crate::halftone::geometry::DotGeometry;
use crate::region::PixelRegion;

/// Render the region's selection into a monochrome dot layer.
pub(crate) fn render_grid<R: PixelRegion + ?Sized>(
    region: &mut R,
    geometry: &DotGeometry,
    dots: &DotBitmapTable,
) -> Result<MonoBitmap, LunaresError> {
    let bounds = region.bounds();
    let width = bounds.width();
    let height = bounds.height();
    let layout = region.layout();
    let channels = layout.channels();
    let pitch = geometry.pitch();
    let center = geometry.dot_center() as isize;

    let mut output = MonoBitmap::white(width, height)?;
    let mut row = alloc_pixels(width * channels, 0)?;

    for phase in 0..2usize {
        let start = phase * pitch / 2;
        for y in (start..height).step_by(pitch) {
            region.read_row(bounds.x1, bounds.y1 + y as i32, width, &mut row)?;
            for x in (start..width).step_by(pitch) {
                let pixel = &row[x * channels..x * channels + channels];
                let luminance = layout.luminance(pixel);
                output.stamp(
                    dots.bitmap(luminance),
                    dots.dot_width(),
                    x as isize - center,
                    y as isize - center,
                );
            }
            region.report_progress(y as f64 / height as f64 * 0.5 + phase as f64 * 0.5);
        }
    }

    Ok(output)
}
