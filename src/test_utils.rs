//! Test utilities for imageops-cutout
//!
//! This module provides common fixtures for testing segmentation and mask editing.
//! It is only compiled when running tests.

#[cfg(test)]
use image::{Luma, Rgba};
#[cfg(test)]
use imageproc::definitions::Image;

/// Creates an opaque RGBA image filled with a single color.
#[cfg(test)]
pub fn create_solid_rgba_image(width: u32, height: u32, rgb: [u8; 3]) -> Image<Rgba<u8>> {
    let [r, g, b] = rgb;
    Image::from_pixel(width, height, Rgba([r, g, b, 255]))
}

/// Creates an image with a `frame`-pixel wide border of `outer` around an `inner` rectangle.
#[cfg(test)]
pub fn create_framed_image(
    width: u32,
    height: u32,
    frame: u32,
    outer: [u8; 3],
    inner: [u8; 3],
) -> Image<Rgba<u8>> {
    let mut image = create_solid_rgba_image(width, height, outer);
    let [r, g, b] = inner;
    for y in frame..height.saturating_sub(frame) {
        for x in frame..width.saturating_sub(frame) {
            image.put_pixel(x, y, Rgba([r, g, b, 255]));
        }
    }
    image
}

/// Creates the 10x10 white image with a 2x2 black square at its center.
///
/// The square covers pixels (4..6, 4..6).
#[cfg(test)]
pub fn create_center_square_image() -> Image<Rgba<u8>> {
    create_framed_image(10, 10, 4, [255, 255, 255], [0, 0, 0])
}

/// Creates a mask filled with a single opacity value.
#[cfg(test)]
pub fn create_uniform_mask(width: u32, height: u32, value: u8) -> Image<Luma<u8>> {
    Image::from_pixel(width, height, Luma([value]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_center_square_image_places_square_in_middle() {
        let image = create_center_square_image();
        assert_eq!(image.dimensions(), (10, 10));
        assert_eq!(image.get_pixel(4, 4), &Rgba([0, 0, 0, 255]));
        assert_eq!(image.get_pixel(5, 5), &Rgba([0, 0, 0, 255]));
        assert_eq!(image.get_pixel(3, 4), &Rgba([255, 255, 255, 255]));
        assert_eq!(image.get_pixel(6, 5), &Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn create_uniform_mask_with_valid_input_creates_mask() {
        let mask = create_uniform_mask(3, 2, 7);
        assert_eq!(mask.dimensions(), (3, 2));
        assert!(mask.pixels().all(|p| p[0] == 7));
    }
}
