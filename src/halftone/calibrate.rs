//! # Luminance Calibration
//!
//! Discovers which output shades a given dot pitch can actually produce, and
//! maps every 8-bit luminance onto the dot pixel count that reproduces it
//! with unbiased average tone.
//!
//! The discovery runs on a synthetic pitch × pitch white tile standing in
//! for one unit cell of the staggered grid: painting the same offset at the
//! four corners (the wrapped neighbor dots) and at the tile center (the
//! cell's own dot) makes the tile behave like a torus, so the black/white
//! ratio after each growth step is exactly the coverage an endless plane of
//! dots would have. Each time the simulated shade drops, a breakpoint is
//! recorded pairing that shade with the pixel count that produced it.
//!
//! Breakpoints then become the 256-entry map by midpoint remapping: a
//! breakpoint's luminance range runs from halfway to the previous shade down
//! to halfway to the next, so summing the mapped output shades over all 256
//! input luminances reproduces the sum of the inputs. Without the halfway
//! split, midtones would drift toward whichever reachable shade sat nearest.

use crate::bitmap::{LUMINANCES, MonoBitmap, WHITE};
use crate::error::LunaresError;
use crate::halftone::geometry::DotGeometry;

/// Luminance → dot pixel count lookup, one entry per 8-bit luminance.
///
/// Monotonically non-increasing: luminance 255 (white) maps to 0 pixels,
/// luminance 0 (black) to the full dot.
#[derive(Debug, Clone)]
pub struct LuminanceMap {
    counts: [usize; LUMINANCES],
}

impl LuminanceMap {
    /// Dot pixel count for a source luminance.
    pub fn pixel_count(&self, luminance: u8) -> usize {
        self.counts[luminance as usize]
    }

    pub fn counts(&self) -> &[usize; LUMINANCES] {
        &self.counts
    }
}

/// A reachable output shade and the dot pixel count that produces it.
#[derive(Debug, Clone, Copy)]
struct ShadeRange {
    shade: i32,
    pixel_count: usize,
}

/// Build the luminance → pixel-count map for a dot geometry.
///
/// Fails only if the synthetic test tile cannot be allocated.
pub fn calibrate(geometry: &DotGeometry) -> Result<LuminanceMap, LunaresError> {
    let breakpoints = shade_breakpoints(geometry)?;
    Ok(remap(&breakpoints))
}

/// Grow the dot one pixel at a time on the toroidal test tile and record a
/// breakpoint at every strict shade decrease, stopping once the tile is
/// fully black. The final breakpoint is pinned to the full offset count:
/// solid black input paints every pixel the dot has.
fn shade_breakpoints(geometry: &DotGeometry) -> Result<Vec<ShadeRange>, LunaresError> {
    let pitch = geometry.pitch() as i32;
    let center = pitch / 2;
    let area = pitch * pitch;
    let mut tile = MonoBitmap::white(geometry.pitch(), geometry.pitch())?;

    let mut breakpoints = vec![ShadeRange {
        shade: WHITE as i32,
        pixel_count: 0,
    }];
    let mut black_pixels = 0i32;
    let mut previous_shade = WHITE as i32;

    for (index, offset) in geometry.offsets().iter().enumerate() {
        let (dx, dy) = (offset.dx, offset.dy);
        // Four wrapped neighbor dots on the corners plus the cell's own dot
        // at the center. A pixel painted by two of them counts once.
        black_pixels += tile.paint_pixel(dx, dy)
            + tile.paint_pixel(pitch + dx, dy)
            + tile.paint_pixel(dx, pitch + dy)
            + tile.paint_pixel(pitch + dx, pitch + dy)
            + tile.paint_pixel(center + dx, center + dy);

        let shade = WHITE as i32 - WHITE as i32 * black_pixels / area;
        if shade < previous_shade {
            breakpoints.push(ShadeRange {
                shade,
                pixel_count: index + 1,
            });
            previous_shade = shade;
        }
        if shade == 0 {
            break;
        }
    }

    if let Some(last) = breakpoints.last_mut() {
        last.pixel_count = geometry.max_pixels_in_dot();
    }
    Ok(breakpoints)
}

/// Midpoint remapping of shade breakpoints into the 256-entry map.
///
/// A breakpoint with shade `s` between neighbors `prev > s > next` owns the
/// luminance range from `(prev + s) / 2` down to `(s + next) / 2 + 1`
/// (integer division). The topmost range stays at pixel count 0, the
/// bottommost extends to luminance 0.
fn remap(breakpoints: &[ShadeRange]) -> LuminanceMap {
    let mut counts = [0usize; LUMINANCES];

    // Top range: luminances closer to white than to the first reachable
    // shade paint no dot at all.
    let first_shade = breakpoints.get(1).map_or(0, |range| range.shade);
    let mut floor = (first_shade + WHITE as i32) / 2;
    let mut luminance = WHITE as i32;
    while luminance > floor {
        counts[luminance as usize] = 0;
        luminance -= 1;
    }

    for window in breakpoints.windows(3) {
        let [previous, current, next] = window else {
            break;
        };
        debug_assert_eq!(luminance, (previous.shade + current.shade) / 2);
        floor = (next.shade + current.shade) / 2;
        while luminance > floor {
            counts[luminance as usize] = current.pixel_count;
            luminance -= 1;
        }
    }

    // Bottom range: everything at or below the last halfway point is the
    // full-size dot.
    let last_count = breakpoints.last().map_or(0, |range| range.pixel_count);
    while luminance >= 0 {
        counts[luminance as usize] = last_count;
        luminance -= 1;
    }

    LuminanceMap { counts }
}
