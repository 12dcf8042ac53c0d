//! # Lunares CLI
//!
//! Command-line interface for halftoning image files.
//!
//! ## Usage
//!
//! ```bash
//! # Halftone with the default 8-pixel dot pitch
//! lunares render photo.png
//!
//! # Choose the dot pitch directly
//! lunares render --size 14 photo.png --output screened.png
//!
//! # Derive the pitch from print parameters (DPI / LPI x sqrt 2)
//! lunares render --dpi 600 --lpi 60 photo.png
//! ```

use clap::{Parser, Subcommand};
use image::DynamicImage;
use std::path::{Path, PathBuf};

use lunares::{
    Bounds, ChannelLayout, HalftoneEngine, LunaresError, MemoryRegion, PixelRegion,
    halftone::pitch_for_print,
};

/// Lunares - analog halftone rendering utility
#[derive(Parser, Debug)]
#[command(name = "lunares")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render an image file as an analog halftone
    Render {
        /// Image to process (PNG, JPEG, ... anything the image crate decodes)
        input: PathBuf,

        /// Dot pitch: center-to-center dot spacing in pixels
        #[arg(long, default_value = "8", value_parser = clap::value_parser!(u32).range(2..=100))]
        size: u32,

        /// Printer resolution; with --lpi, overrides --size
        #[arg(long, requires = "lpi", conflicts_with = "size")]
        dpi: Option<u32>,

        /// Screen frequency in lines per inch; with --dpi, overrides --size
        #[arg(long, requires = "dpi", conflicts_with = "size")]
        lpi: Option<u32>,

        /// Output file path (defaults to <input>-halftone.png)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), LunaresError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            input,
            size,
            dpi,
            lpi,
            output,
        } => {
            let pitch = match (dpi, lpi) {
                (Some(dpi), Some(lpi)) => {
                    let derived = pitch_for_print(dpi, lpi)?;
                    println!("[render] {} DPI at {} LPI -> dot pitch {}", dpi, lpi, derived);
                    derived
                }
                _ => size as usize,
            };

            let output = output.unwrap_or_else(|| default_output(&input));
            let inner = load_region(&input)?;
            println!(
                "[render] {} ({}x{}, {} channels), dot pitch {}",
                input.display(),
                inner.width(),
                inner.height(),
                inner.layout().channels(),
                pitch
            );

            let engine = HalftoneEngine::new(pitch)?;
            let mut region = ProgressPrinter {
                inner,
                last_percent: 0,
            };
            engine.render(&mut region)?;

            save_region(region.inner, &output)?;
            println!("[render] wrote {}", output.display());
            Ok(())
        }
    }
}

/// Default output path: the input with a `-halftone.png` suffix.
fn default_output(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    input.with_file_name(format!("{}-halftone.png", stem))
}

/// Decode an image file into an in-memory region, keeping its channel
/// layout. Grayscale stays grayscale and alpha channels are kept so they
/// can pass through the render untouched; only exotic bit depths are
/// converted, to 8-bit RGB(A).
fn load_region(path: &Path) -> Result<MemoryRegion, LunaresError> {
    let decoded = image::open(path).map_err(|e| LunaresError::Image(e.to_string()))?;
    let (layout, width, height, pixels) = match decoded {
        DynamicImage::ImageLuma8(buf) => {
            (ChannelLayout::Gray, buf.width(), buf.height(), buf.into_raw())
        }
        DynamicImage::ImageLumaA8(buf) => (
            ChannelLayout::GrayAlpha,
            buf.width(),
            buf.height(),
            buf.into_raw(),
        ),
        DynamicImage::ImageRgb8(buf) => {
            (ChannelLayout::Rgb, buf.width(), buf.height(), buf.into_raw())
        }
        DynamicImage::ImageRgba8(buf) => (
            ChannelLayout::RgbAlpha,
            buf.width(),
            buf.height(),
            buf.into_raw(),
        ),
        other if other.color().has_alpha() => {
            let buf = other.to_rgba8();
            (
                ChannelLayout::RgbAlpha,
                buf.width(),
                buf.height(),
                buf.into_raw(),
            )
        }
        other => {
            let buf = other.to_rgb8();
            (ChannelLayout::Rgb, buf.width(), buf.height(), buf.into_raw())
        }
    };
    MemoryRegion::new(layout, width as usize, height as usize, pixels)
}

/// Encode a rendered region back to an image file in its own layout.
fn save_region(region: MemoryRegion, path: &Path) -> Result<(), LunaresError> {
    let layout = region.layout();
    let width = region.width() as u32;
    let height = region.height() as u32;
    let pixels = region.into_pixels();

    let truncated = || LunaresError::Image("pixel buffer does not match image size".to_string());
    let encoded = match layout {
        ChannelLayout::Gray => DynamicImage::ImageLuma8(
            image::ImageBuffer::from_raw(width, height, pixels).ok_or_else(truncated)?,
        ),
        ChannelLayout::GrayAlpha => DynamicImage::ImageLumaA8(
            image::ImageBuffer::from_raw(width, height, pixels).ok_or_else(truncated)?,
        ),
        ChannelLayout::Rgb => DynamicImage::ImageRgb8(
            image::ImageBuffer::from_raw(width, height, pixels).ok_or_else(truncated)?,
        ),
        ChannelLayout::RgbAlpha => DynamicImage::ImageRgba8(
            image::ImageBuffer::from_raw(width, height, pixels).ok_or_else(truncated)?,
        ),
    };
    encoded.save(path).map_err(|e| LunaresError::Image(e.to_string()))
}

/// Region wrapper that prints coarse progress through the advisory hook.
struct ProgressPrinter<R> {
    inner: R,
    last_percent: u32,
}

impl<R: PixelRegion> PixelRegion for ProgressPrinter<R> {
    fn bounds(&self) -> Bounds {
        self.inner.bounds()
    }

    fn layout(&self) -> ChannelLayout {
        self.inner.layout()
    }

    fn read_row(
        &mut self,
        x: i32,
        y: i32,
        width: usize,
        out: &mut [u8],
    ) -> Result<(), LunaresError> {
        self.inner.read_row(x, y, width, out)
    }

    fn read_rect(
        &mut self,
        x: i32,
        y: i32,
        width: usize,
        height: usize,
        out: &mut [u8],
    ) -> Result<(), LunaresError> {
        self.inner.read_rect(x, y, width, height, out)
    }

    fn write_rect(
        &mut self,
        x: i32,
        y: i32,
        width: usize,
        height: usize,
        data: &[u8],
    ) -> Result<(), LunaresError> {
        self.inner.write_rect(x, y, width, height, data)
    }

    fn report_progress(&mut self, fraction: f64) {
        let percent = (fraction * 100.0) as u32;
        if percent / 10 > self.last_percent / 10 {
            self.last_percent = percent;
            println!("[render] {}%", percent - percent % 10);
        }
    }
}
