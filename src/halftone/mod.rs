//! # Halftone Engine
//!
//! Simulates analog halftoning by literally painting black dots on a white
//! background, varying dot size with source lightness. No digital
//! halftoning cells. The grid angle is 45 degrees and color input collapses
//! to one luminance channel, replicated into R/G/B on output with alpha
//! preserved.
//!
//! ## Pipeline
//!
//! | Stage | Module |
//! |-------|--------|
//! | Dot pixel enumeration | [`geometry`] |
//! | Luminance → dot size calibration | [`calibrate`] |
//! | Per-luminance dot bitmaps | [`dots`] |
//! | Two-phase grid rendering | [`grid`] |
//! | Channel expansion / alpha pass-through | [`composite`] |
//!
//! All derived state is owned by a [`HalftoneEngine`] built for one dot
//! pitch. Changing the pitch means building a new engine; nothing survives
//! between engine instances.

pub mod calibrate;
pub mod composite;
pub mod dots;
pub mod geometry;
pub mod grid;

use crate::bitmap::MonoBitmap;
use crate::error::LunaresError;
use crate::region::PixelRegion;
use calibrate::{LuminanceMap, calibrate};
use dots::DotBitmapTable;
use geometry::DotGeometry;

/// A halftone renderer for one dot pitch.
///
/// Construction runs the full setup chain (dot geometry, luminance
/// calibration, bitmap precomputation), so a built engine renders any number
/// of regions without further allocation of derived state.
#[derive(Debug, Clone)]
pub struct HalftoneEngine {
    geometry: DotGeometry,
    luminance_map: LuminanceMap,
    dots: DotBitmapTable,
}

impl HalftoneEngine {
    /// Build an engine for the given dot pitch (center-to-center dot
    /// spacing in pixels, at least 2).
    pub fn new(pitch: usize) -> Result<Self, LunaresError> {
        let geometry = DotGeometry::build(pitch)?;
        let luminance_map = calibrate(&geometry)?;
        let dots = DotBitmapTable::precompute(&geometry, &luminance_map)?;
        Ok(Self {
            geometry,
            luminance_map,
            dots,
        })
    }

    /// Dot pitch this engine was built for.
    pub fn pitch(&self) -> usize {
        self.geometry.pitch()
    }

    pub fn geometry(&self) -> &DotGeometry {
        &self.geometry
    }

    pub fn luminance_map(&self) -> &LuminanceMap {
        &self.luminance_map
    }

    /// Render the region's selection and return the raw monochrome dot
    /// layer without writing anything back.
    pub fn render_monochrome<R: PixelRegion + ?Sized>(
        &self,
        region: &mut R,
    ) -> Result<MonoBitmap, LunaresError> {
        grid::render_grid(region, &self.geometry, &self.dots)
    }

    /// Render the region's selection and write the result back through the
    /// region in strips, expanded to the region's channel layout with alpha
    /// preserved.
    ///
    /// The whole selection rectangle is written before this returns. On
    /// error nothing further is retried and no partial-progress state is
    /// kept; transient buffers are released either way.
    pub fn render<R: PixelRegion + ?Sized>(&self, region: &mut R) -> Result<(), LunaresError> {
        let output = self.render_monochrome(region)?;
        composite::composite_strips(region, &output)
    }
}

/// Dot pitch for a printing setup, from printer resolution and screen
/// frequency: `DPI / LPI × √2`, the 45°-grid correction. Size 14 gives a 60
/// LPI screen on a 600 DPI image.
///
/// Fails with [`LunaresError::InvalidPitch`] when either parameter is zero
/// or the derived pitch falls below the minimum of 2.
pub fn pitch_for_print(dpi: u32, lpi: u32) -> Result<usize, LunaresError> {
    if dpi == 0 || lpi == 0 {
        return Err(LunaresError::InvalidPitch(0));
    }
    let pitch = (dpi as f64 / lpi as f64 * std::f64::consts::SQRT_2).round() as usize;
    if pitch < 2 {
        return Err(LunaresError::InvalidPitch(pitch));
    }
    Ok(pitch)
}
