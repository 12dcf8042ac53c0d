//! # End-to-End Render Tests
//!
//! Full-pipeline scenarios: build an engine, render an in-memory region,
//! check the written pixels. These complement the per-module unit tests by
//! exercising the engine exactly the way the CLI does.

use pretty_assertions::assert_eq;

use lunares::{ChannelLayout, HalftoneEngine, LunaresError, MemoryRegion};

const BLACK: u8 = 0;
const WHITE: u8 = 255;

/// Render a uniform single-channel image and return the written pixels.
fn render_uniform_gray(pitch: usize, side: usize, luminance: u8) -> Vec<u8> {
    let engine = HalftoneEngine::new(pitch).unwrap();
    let mut region =
        MemoryRegion::new(ChannelLayout::Gray, side, side, vec![luminance; side * side]).unwrap();
    engine.render(&mut region).unwrap();
    region.into_pixels()
}

fn black_fraction(pixels: &[u8]) -> f64 {
    let black = pixels.iter().filter(|&&p| p == BLACK).count();
    black as f64 / pixels.len() as f64
}

#[test]
fn pitch_below_minimum_is_rejected() {
    for pitch in [0, 1] {
        assert!(matches!(
            HalftoneEngine::new(pitch),
            Err(LunaresError::InvalidPitch(p)) if p == pitch
        ));
    }
    assert!(HalftoneEngine::new(2).is_ok());
}

#[test]
fn output_is_strictly_black_and_white() {
    let pixels = render_uniform_gray(8, 64, 128);
    assert!(pixels.iter().all(|&p| p == BLACK || p == WHITE));
}

#[test]
fn uniform_gray_render_is_deterministic() {
    // Identical input, two independently built engines: byte-identical
    // output. Nothing in the pipeline is randomized or time-dependent.
    let first = render_uniform_gray(8, 64, 128);
    let second = render_uniform_gray(8, 64, 128);
    assert_eq!(first, second);
}

#[test]
fn uniform_gray_pattern_repeats_at_the_pitch() {
    // A uniform source produces one dot size everywhere, so away from the
    // clipped borders the pattern is periodic in the pitch on both axes.
    let side = 64;
    let pitch = 8;
    let pixels = render_uniform_gray(pitch, side, 128);
    let margin = pitch; // clear of edge-clipped dots
    for y in margin..side - margin - pitch {
        for x in margin..side - margin - pitch {
            assert_eq!(
                pixels[y * side + x],
                pixels[y * side + x + pitch],
                "horizontal period break at ({}, {})",
                x,
                y
            );
            assert_eq!(
                pixels[y * side + x],
                pixels[(y + pitch) * side + x],
                "vertical period break at ({}, {})",
                x,
                y
            );
        }
    }
}

#[test]
fn white_input_renders_all_white() {
    let pixels = render_uniform_gray(8, 64, WHITE);
    assert!(pixels.iter().all(|&p| p == WHITE));
}

#[test]
fn black_input_renders_near_total_coverage() {
    let pixels = render_uniform_gray(8, 64, BLACK);
    assert!(black_fraction(&pixels) > 0.9);
    // Maximal dots overlap heavily, but clipped cells along the border
    // still leave residual white; the frame is never one solid block.
    assert!(pixels.iter().any(|&p| p == WHITE));
}

#[test]
fn darker_input_never_reduces_coverage() {
    let mut previous = -1.0f64;
    for luminance in [255, 192, 128, 64, 0u8] {
        let coverage = black_fraction(&render_uniform_gray(8, 64, luminance));
        assert!(
            coverage >= previous,
            "coverage dropped from {} to {} at luminance {}",
            previous,
            coverage,
            luminance
        );
        previous = coverage;
    }
}

#[test]
fn rgb_color_collapses_to_replicated_gray() {
    let side = 48;
    let engine = HalftoneEngine::new(8).unwrap();

    // 50% gray as RGB
    let mut rgb_region =
        MemoryRegion::new(ChannelLayout::Rgb, side, side, vec![128; side * side * 3]).unwrap();
    engine.render(&mut rgb_region).unwrap();
    let rgb = rgb_region.into_pixels();

    // Every pixel has R == G == B, matching the single-channel render.
    let gray = render_uniform_gray(8, side, 128);
    for (pixel, &expected) in rgb.chunks_exact(3).zip(&gray) {
        assert_eq!(pixel, &[expected, expected, expected]);
    }
}

#[test]
fn rgba_alpha_passes_through_byte_exact() {
    let side = 40;
    let mut pixels = Vec::with_capacity(side * side * 4);
    for i in 0..side * side {
        pixels.extend_from_slice(&[200, 100, 50, (i * 11 % 256) as u8]);
    }
    let alpha_before: Vec<u8> = pixels.iter().skip(3).step_by(4).copied().collect();

    let engine = HalftoneEngine::new(6).unwrap();
    let mut region = MemoryRegion::new(ChannelLayout::RgbAlpha, side, side, pixels).unwrap();
    engine.render(&mut region).unwrap();
    let rendered = region.into_pixels();

    let alpha_after: Vec<u8> = rendered.iter().skip(3).step_by(4).copied().collect();
    assert_eq!(alpha_after, alpha_before);
    // Color channels are pure black/white replicas.
    for pixel in rendered.chunks_exact(4) {
        assert!(pixel[0] == BLACK || pixel[0] == WHITE);
        assert_eq!(pixel[0], pixel[1]);
        assert_eq!(pixel[1], pixel[2]);
    }
}

#[test]
fn gray_alpha_passes_through_byte_exact() {
    let width = 30;
    let height = 70; // spans a strip boundary
    let mut pixels = Vec::with_capacity(width * height * 2);
    for i in 0..width * height {
        pixels.extend_from_slice(&[90, (255 - i % 256) as u8]);
    }
    let alpha_before: Vec<u8> = pixels.iter().skip(1).step_by(2).copied().collect();

    let engine = HalftoneEngine::new(4).unwrap();
    let mut region = MemoryRegion::new(ChannelLayout::GrayAlpha, width, height, pixels).unwrap();
    engine.render(&mut region).unwrap();
    let rendered = region.into_pixels();

    let alpha_after: Vec<u8> = rendered.iter().skip(1).step_by(2).copied().collect();
    assert_eq!(alpha_after, alpha_before);
    for pixel in rendered.chunks_exact(2) {
        assert!(pixel[0] == BLACK || pixel[0] == WHITE);
    }
}

#[test]
fn monochrome_layer_matches_composited_gray_output() {
    let side = 32;
    let engine = HalftoneEngine::new(8).unwrap();
    let source = vec![100u8; side * side];

    let mut region =
        MemoryRegion::new(ChannelLayout::Gray, side, side, source.clone()).unwrap();
    let mono = engine.render_monochrome(&mut region).unwrap();

    let mut full = MemoryRegion::new(ChannelLayout::Gray, side, side, source).unwrap();
    engine.render(&mut full).unwrap();

    assert_eq!(mono.into_pixels(), full.into_pixels());
}

#[test]
fn minimum_and_large_pitch_render_without_panic() {
    for pitch in [2, 3, 50] {
        let pixels = render_uniform_gray(pitch, 128, 77);
        assert_eq!(pixels.len(), 128 * 128);
        assert!(pixels.iter().all(|&p| p == BLACK || p == WHITE));
    }
}

#[test]
fn non_square_and_odd_sized_images_render_fully() {
    let engine = HalftoneEngine::new(8).unwrap();
    let (width, height) = (61, 37);
    let mut region =
        MemoryRegion::new(ChannelLayout::Rgb, width, height, vec![0; width * height * 3])
            .unwrap();
    engine.render(&mut region).unwrap();
    let pixels = region.into_pixels();
    assert_eq!(pixels.len(), width * height * 3);
    // Black input darkens pixels in every quadrant, including the partial
    // cells along the far edges.
    let quadrant_black = |x0: usize, y0: usize, x1: usize, y1: usize| {
        (y0..y1)
            .flat_map(|y| (x0..x1).map(move |x| (x, y)))
            .any(|(x, y)| pixels[(y * width + x) * 3] == BLACK)
    };
    assert!(quadrant_black(0, 0, width / 2, height / 2));
    assert!(quadrant_black(width / 2, 0, width, height / 2));
    assert!(quadrant_black(0, height / 2, width / 2, height));
    assert!(quadrant_black(width / 2, height / 2, width, height));
}
