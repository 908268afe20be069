use image::{ImageBuffer, Rgba};

use crate::{error::Error, Image};

/// Wraps a raw RGBA sample buffer as an image
///
/// The buffer must hold exactly `width * height * 4` bytes in row-major order.
/// Buffers of any other length are rejected, never truncated or padded.
///
/// # Errors
///
/// * `Error::BufferLengthMismatch` - When the buffer length does not match the dimensions
///
/// # Examples
///
/// ```no_run
/// use imageops_cutout::rgba_image_from_raw;
///
/// let image = rgba_image_from_raw(2, 1, vec![255, 0, 0, 255, 0, 255, 0, 255]).unwrap();
/// assert_eq!(image.dimensions(), (2, 1));
/// assert!(rgba_image_from_raw(2, 2, vec![0; 15]).is_err());
/// ```
pub fn rgba_image_from_raw(width: u32, height: u32, samples: Vec<u8>) -> Result<Image<Rgba<u8>>, Error> {
    let actual = samples.len();
    let mismatch = |expected| Error::BufferLengthMismatch {
        width,
        height,
        expected,
        actual,
    };

    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|pixels| pixels.checked_mul(4))
        .ok_or_else(|| mismatch(usize::MAX))?;
    if actual != expected {
        return Err(mismatch(expected));
    }

    ImageBuffer::from_raw(width, height, samples).ok_or_else(|| mismatch(expected))
}
