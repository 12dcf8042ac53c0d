//! # Lunares - Analog Halftone Rendering
//!
//! Lunares renders a grayscale or color raster image as a simulated analog
//! halftone: a 45°-rotated grid of variable-size black circular dots on a
//! white background, where dot size encodes local luminance. It targets
//! print-oriented reproduction (dot pitch derived from DPI/LPI) rather than
//! digital ordered-dithering cells. It provides:
//!
//! - **Dot modeling**: circular dots as distance-sorted pixel sets
//! - **Tone calibration**: unbiased luminance → dot-size mapping
//! - **Grid rendering**: two-phase staggered stamping with edge clipping
//! - **Channel handling**: grayscale/RGB with alpha passed through intact
//!
//! ## Quick Start
//!
//! ```
//! use lunares::{ChannelLayout, HalftoneEngine, MemoryRegion};
//!
//! // A 64x64 mid-gray RGB image held in memory
//! let pixels = vec![128u8; 64 * 64 * 3];
//! let mut region = MemoryRegion::new(ChannelLayout::Rgb, 64, 64, pixels)?;
//!
//! // Build an engine for an 8-pixel dot pitch and render in place
//! let engine = HalftoneEngine::new(8)?;
//! engine.render(&mut region)?;
//!
//! let halftoned = region.into_pixels();
//! # assert!(halftoned.iter().all(|&p| p == 0 || p == 255));
//! # Ok::<(), lunares::LunaresError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`halftone`] | The rendering engine and its pipeline stages |
//! | [`region`] | Host pixel access trait and in-memory adapter |
//! | [`bitmap`] | Black-on-white raster primitives |
//! | [`error`] | Error types |
//!
//! ## Choosing a Dot Pitch
//!
//! The pitch is the center-to-center dot spacing in pixels, practically
//! 2–100. For print work derive it from the printer resolution and the
//! desired screen frequency with [`halftone::pitch_for_print`]
//! (`DPI / LPI × √2`; e.g. 600 DPI at 60 LPI → pitch 14).

pub mod bitmap;
pub mod error;
pub mod halftone;
pub mod region;

// Re-exports for convenience
pub use bitmap::MonoBitmap;
pub use error::LunaresError;
pub use halftone::HalftoneEngine;
pub use region::{Bounds, ChannelLayout, MemoryRegion, PixelRegion};
