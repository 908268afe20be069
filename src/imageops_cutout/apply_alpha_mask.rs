use image::{GenericImageView, ImageBuffer, Luma, Pixel, Rgb, Rgba};
use imageproc::map::map_colors2;

use crate::{
    error::Error, imageops_cutout::binary_map::BackgroundMap,
    utils::validate_matching_dimensions, Image, Mask,
};

/// Mask value of a background pixel
pub const TRANSPARENT: u8 = 0;
/// Mask value of a foreground pixel
pub const OPAQUE: u8 = 255;

impl BackgroundMap {
    /// Converts the background classification into a hard binary mask
    ///
    /// Background pixels become [`TRANSPARENT`], everything else [`OPAQUE`].
    ///
    /// # Errors
    ///
    /// * `Error::ProcessingFailure` - When the mask buffer cannot be created
    pub fn to_mask(&self) -> Result<Mask, Error> {
        let (width, height) = self.dimensions();
        let samples = self
            .as_slice()
            .iter()
            .map(|&is_background| if is_background { TRANSPARENT } else { OPAQUE })
            .collect();

        ImageBuffer::from_raw(width, height, samples)
            .ok_or_else(|| Error::ProcessingFailure("mask buffer size mismatch".to_string()))
    }
}

/// Trait providing cutout composition from an image and a mask
///
/// The cutout keeps the RGB channels of the source unchanged and takes its
/// alpha channel from the mask.
pub trait ApplyAlphaMask {
    /// Produces the cutout of the image under the given mask
    ///
    /// # Arguments
    ///
    /// * `mask` - Opacity mask with the image's dimensions
    ///
    /// # Returns
    ///
    /// RGBA image whose alpha channel equals the mask
    ///
    /// # Errors
    ///
    /// * `Error::DimensionMismatch` - When image and mask dimensions don't match
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use imageops_cutout::{ApplyAlphaMask, Image, Mask};
    /// use image::{ImageBuffer, Rgba};
    ///
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let image: Image<Rgba<u8>> = ImageBuffer::new(10, 10);
    /// let mask: Mask = ImageBuffer::new(10, 10);
    ///
    /// let cutout = image.apply_alpha_mask(&mask)?;
    /// # Ok(())
    /// # }
    /// ```
    fn apply_alpha_mask(&self, mask: &Mask) -> Result<Image<Rgba<u8>>, Error>;
}

/// Trait for modifying alpha channel of existing RGBA images
pub trait ModifyAlpha {
    /// Replaces the alpha channel with the provided mask in-place
    ///
    /// # Errors
    ///
    /// * `Error::DimensionMismatch` - When image and mask dimensions don't match
    fn replace_alpha_mut(&mut self, mask: &Mask) -> Result<&mut Self, Error>;
}

impl ApplyAlphaMask for Image<Rgb<u8>> {
    fn apply_alpha_mask(&self, mask: &Mask) -> Result<Image<Rgba<u8>>, Error> {
        validate_dimensions(self, mask)?;

        Ok(map_colors2(self, mask, |Rgb([red, green, blue]), Luma([alpha])| {
            Rgba([red, green, blue, alpha])
        }))
    }
}

impl ApplyAlphaMask for Image<Rgba<u8>> {
    fn apply_alpha_mask(&self, mask: &Mask) -> Result<Image<Rgba<u8>>, Error> {
        validate_dimensions(self, mask)?;

        Ok(map_colors2(self, mask, |Rgba([red, green, blue, _]), Luma([alpha])| {
            Rgba([red, green, blue, alpha])
        }))
    }
}

impl ModifyAlpha for Image<Rgba<u8>> {
    fn replace_alpha_mut(&mut self, mask: &Mask) -> Result<&mut Self, Error> {
        validate_dimensions(self, mask)?;

        self.pixels_mut()
            .zip(mask.pixels())
            .for_each(|(pixel, Luma([alpha]))| {
                pixel.channels_mut()[3] = *alpha;
            });

        Ok(self)
    }
}

/// Function to validate dimensions
#[inline]
pub(crate) fn validate_dimensions<I>(image: &I, mask: &Mask) -> Result<(), Error>
where
    I: GenericImageView,
{
    let (img_w, img_h) = image.dimensions();
    let (mask_w, mask_h) = mask.dimensions();

    validate_matching_dimensions(img_w, img_h, mask_w, mask_h, "ApplyAlphaMask").map_err(|_| {
        Error::DimensionMismatch {
            expected: (img_w, img_h),
            actual: (mask_w, mask_h),
        }
    })
}
