use image::Pixel;
use itertools::iproduct;

use crate::{utils::rgb_of, Image};

/// Width in pixels of the band sampled along each border
pub const DEFAULT_BORDER_BAND: u32 = 10;

/// Estimated background color of an image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BackgroundColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl BackgroundColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 3]> for BackgroundColor {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

/// Trait providing background color estimation from an image border
pub trait EstimateBorderColor {
    /// Estimates the background color as the per-channel median of a border band
    ///
    /// The band is `band` pixels wide along all four sides. When the image is
    /// narrower or shorter than two bands the sides overlap and some pixels are
    /// sampled more than once.
    ///
    /// # Arguments
    ///
    /// * `band` - Width of the sampled border band in pixels
    ///
    /// # Returns
    ///
    /// The median color, or `None` when the image has no pixels or `band` is zero
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use imageops_cutout::{EstimateBorderColor, Image, DEFAULT_BORDER_BAND};
    /// use image::{ImageBuffer, Rgba};
    ///
    /// let image: Image<Rgba<u8>> = ImageBuffer::from_pixel(32, 32, Rgba([250, 250, 250, 255]));
    /// let background = image.estimate_border_color(DEFAULT_BORDER_BAND);
    /// assert_eq!(background.map(|c| c.to_array()), Some([250, 250, 250]));
    /// ```
    fn estimate_border_color(&self, band: u32) -> Option<BackgroundColor>;
}

impl<P> EstimateBorderColor for Image<P>
where
    P: Pixel<Subpixel = u8>,
{
    fn estimate_border_color(&self, band: u32) -> Option<BackgroundColor> {
        let (width, height) = self.dimensions();
        if width == 0 || height == 0 || band == 0 {
            return None;
        }

        let rows = band.min(height);
        let columns = band.min(width);

        // Top, bottom, left, right. Corner pixels land in two bands.
        let top = iproduct!(0..rows, 0..width);
        let bottom = iproduct!(height - rows..height, 0..width);
        let left = iproduct!(0..height, 0..columns);
        let right = iproduct!(0..height, width - columns..width);

        let capacity = 2 * (rows as usize * width as usize + columns as usize * height as usize);
        let mut channels: [Vec<u8>; 3] = [
            Vec::with_capacity(capacity),
            Vec::with_capacity(capacity),
            Vec::with_capacity(capacity),
        ];

        for (y, x) in top.chain(bottom).chain(left).chain(right) {
            let rgb = rgb_of(self.get_pixel(x, y));
            channels
                .iter_mut()
                .zip(rgb)
                .for_each(|(samples, value)| samples.push(value));
        }

        let [r, g, b] = channels.map(|mut samples| {
            samples.sort_unstable();
            samples[samples.len() / 2]
        });

        Some(BackgroundColor { r, g, b })
    }
}
