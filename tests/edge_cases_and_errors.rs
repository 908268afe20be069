//! Edge case and error condition tests
//!
//! This test suite focuses on boundary values, error conditions, and degenerate
//! inputs to ensure failures are surfaced and never silently coerced.

use image::{Luma, Rgb, Rgba};
use imageops_cutout::{
    apply_stroke, grow_background, rgba_image_from_raw, segment, ApplyAlphaMask, BackgroundColor,
    BrushMode, BrushStroke, ClassificationStrategy, CutoutPreview, DetectEdges, EdgeMap, Error,
    EstimateBorderColor, GrowParams, Image, Mask, MaskEditor, ModifyAlpha, SegmentationConfig,
    Segmenter, DEFAULT_BORDER_BAND, DEFAULT_EDGE_THRESHOLD,
};

/// Helper to create minimal 1x1 image
fn create_minimal_rgba_image() -> Image<Rgba<u8>> {
    let mut image: Image<Rgba<u8>> = Image::new(1, 1);
    image.put_pixel(0, 0, Rgba([128, 128, 128, 255]));
    image
}

#[test]
fn raw_buffer_with_wrong_length_is_rejected() {
    let result = rgba_image_from_raw(3, 3, vec![0; 3 * 3 * 4 - 1]);
    assert_eq!(
        result.unwrap_err(),
        Error::BufferLengthMismatch {
            width: 3,
            height: 3,
            expected: 36,
            actual: 35,
        }
    );

    // RGB-sized buffer for an RGBA declaration
    assert!(rgba_image_from_raw(4, 4, vec![0; 4 * 4 * 3]).is_err());
}

#[test]
fn raw_buffer_with_overflowing_dimensions_is_rejected() {
    let result = rgba_image_from_raw(u32::MAX, u32::MAX, vec![0; 4]);
    assert!(matches!(result, Err(Error::BufferLengthMismatch { .. })));
}

#[test]
fn minimum_image_size_segments_as_background() {
    let image = create_minimal_rgba_image();
    let mask = segment(&image).unwrap();
    assert_eq!(mask.dimensions(), (1, 1));
    assert_eq!(mask.get_pixel(0, 0), &Luma([0]));
}

#[test]
fn image_narrower_than_border_band_does_not_panic() {
    let mut image: Image<Rgb<u8>> = Image::from_pixel(3, 40, Rgb([10, 10, 10]));
    image.put_pixel(1, 20, Rgb([250, 250, 250]));

    assert_eq!(
        image.estimate_border_color(DEFAULT_BORDER_BAND),
        Some(BackgroundColor::new(10, 10, 10))
    );
    let mask = segment(&image).unwrap();
    assert_eq!(mask.dimensions(), (3, 40));
    // The odd pixel and its interior neighbors are edges; the rest is one uniform region
    assert_eq!(mask.get_pixel(1, 20), &Luma([255]));
    assert_eq!(mask.get_pixel(0, 20), &Luma([0]));
}

#[test]
fn busy_image_keeps_interior_as_foreground() {
    // Checkerboard: every interior pixel is an edge
    let mut image: Image<Rgb<u8>> = Image::new(30, 30);
    for (x, y, pixel) in image.enumerate_pixels_mut() {
        *pixel = if (x + y) % 2 == 0 {
            Rgb([0, 0, 0])
        } else {
            Rgb([255, 255, 255])
        };
    }

    let edges = image.detect_edges(DEFAULT_EDGE_THRESHOLD);
    assert_eq!(edges.count(), 28 * 28);

    let mask = segment(&image).unwrap();
    let opaque = mask.pixels().filter(|p| p[0] == 255).count();
    assert_eq!(opaque, 28 * 28);
    // Only the outer ring is reachable, one isolated seed at a time
    assert!(mask.enumerate_pixels().all(|(x, y, p)| {
        let outer = x == 0 || y == 0 || x == 29 || y == 29;
        (p[0] == 0) == outer
    }));
}

#[test]
fn composite_dimension_mismatch_is_an_error() {
    let image = create_minimal_rgba_image();
    let wrong_mask: Mask = Image::from_pixel(2, 2, Luma([128]));

    let result = image.apply_alpha_mask(&wrong_mask);
    assert!(matches!(
        result.unwrap_err(),
        Error::DimensionMismatch {
            expected: (1, 1),
            actual: (2, 2)
        }
    ));

    let mut target = image;
    assert!(target.replace_alpha_mut(&wrong_mask).is_err());
    assert_eq!(target.get_pixel(0, 0), &Rgba([128, 128, 128, 255]));
}

#[test]
fn edge_map_of_other_image_is_rejected() {
    let image: Image<Rgb<u8>> = Image::new(6, 6);
    let edges = EdgeMap::new(6, 5);
    let result = grow_background(
        &image,
        &edges,
        BackgroundColor::default(),
        &ClassificationStrategy::EdgeFloodFill,
        &GrowParams::default(),
    );
    assert!(matches!(result, Err(Error::DimensionMismatch { .. })));
}

#[test]
fn invalid_configuration_surfaces_invalid_parameter() {
    let config = SegmentationConfig::default().with_edge_threshold(f32::INFINITY);
    let error = Segmenter::new(config).unwrap_err();
    assert!(error.to_string().contains("edge_threshold"));
}

#[test]
fn zero_radius_stroke_touches_single_pixel() {
    let mut mask: Mask = Image::from_pixel(3, 3, Luma([255]));
    let written = apply_stroke(&mut mask, &BrushStroke::new((1.0, 1.0), 0.0, BrushMode::Erase));

    assert_eq!(written, 1);
    assert_eq!(mask.get_pixel(1, 1), &Luma([0]));
    assert_eq!(mask.pixels().filter(|p| p[0] == 0).count(), 1);
}

#[test]
fn stroke_straddling_edge_is_partially_applied() {
    let mut mask: Mask = Image::from_pixel(10, 10, Luma([255]));
    let written = apply_stroke(&mut mask, &BrushStroke::new((9.0, 5.0), 2.0, BrushMode::Erase));

    // Of the 13 offsets in a radius-2 disc, the center column and everything left of it fit
    assert_eq!(written, 9);
    assert_eq!(mask.get_pixel(9, 5), &Luma([0]));
    assert_eq!(mask.get_pixel(7, 5), &Luma([0]));
    assert_eq!(mask.get_pixel(6, 5), &Luma([255]));
}

#[test]
fn editor_bound_to_wrong_size_image_fails() {
    let image: Image<Rgba<u8>> = Image::new(4, 4);
    let mask: Mask = Image::new(5, 4);
    assert!(matches!(
        CutoutPreview::new(image, &mask),
        Err(Error::DimensionMismatch { .. })
    ));

    let mut editor = MaskEditor::new(Image::new(4, 4), ()).unwrap();
    assert!(editor.reset(mask).is_err());
}

#[test]
fn oversized_and_infinite_radii_are_clamped_or_ignored() {
    let mut mask: Mask = Image::from_pixel(5, 5, Luma([255]));
    let stroke = BrushStroke::new((2.0, 2.0), f32::INFINITY, BrushMode::Erase);
    assert_eq!(apply_stroke(&mut mask, &stroke), 0);
    assert!(mask.pixels().all(|p| p[0] == 255));

    let stroke = BrushStroke::new((2.0, 2.0), 1e9, BrushMode::Erase);
    assert_eq!(apply_stroke(&mut mask, &stroke), 25);
    assert!(mask.pixels().all(|p| p[0] == 0));
}
