//! Internal utility functions for imageops-cutout.
//!
//! This module contains common functionality used across different image operations.

use image::Pixel;

/// Squared Euclidean distance between two RGB triples.
///
/// Distances are compared in squared form so the hot loops never call `sqrt`.
#[inline]
pub fn rgb_distance_squared(a: [u8; 3], b: [u8; 3]) -> u32 {
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| {
            let d = i32::from(x) - i32::from(y);
            (d * d) as u32
        })
        .sum()
}

/// Euclidean distance between two RGB triples.
#[inline]
pub fn rgb_distance(a: [u8; 3], b: [u8; 3]) -> f32 {
    (rgb_distance_squared(a, b) as f32).sqrt()
}

/// Extracts the RGB channels of any 8-bit pixel, ignoring alpha.
#[inline]
pub fn rgb_of<P>(pixel: &P) -> [u8; 3]
where
    P: Pixel<Subpixel = u8>,
{
    pixel.to_rgb().0
}

/// Validates that two images have matching dimensions.
///
/// # Arguments
///
/// * `width1` - The width of the first image
/// * `height1` - The height of the first image
/// * `width2` - The width of the second image
/// * `height2` - The height of the second image
/// * `context` - A description of the context for error messages
///
/// # Returns
///
/// `Ok(())` if the dimensions match, otherwise an error
pub fn validate_matching_dimensions(
    width1: u32,
    height1: u32,
    width2: u32,
    height2: u32,
    context: &str,
) -> Result<(), String> {
    if width1 != width2 || height1 != height2 {
        Err(format!(
            "{}: Image dimensions must match. Got {}x{} and {}x{}",
            context, width1, height1, width2, height2
        ))
    } else {
        Ok(())
    }
}

/// Validates that a threshold is a finite, non-negative number.
pub fn validate_threshold(value: f32, name: &str) -> Result<(), String> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(format!("{} must be finite and non-negative, got {}", name, value))
    }
}
