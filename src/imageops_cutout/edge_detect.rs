use image::Pixel;
use itertools::iproduct;

use crate::{imageops_cutout::binary_map::EdgeMap, utils::rgb_distance_squared, utils::rgb_of, Image};

/// Gradient magnitude above which a pixel is treated as an edge
pub const DEFAULT_EDGE_THRESHOLD: f32 = 40.0;

/// Trait providing a binary edge map from local color gradients
pub trait DetectEdges {
    /// Computes the edge map of the image
    ///
    /// For every interior pixel the gradient magnitude is the largest Euclidean
    /// RGB distance to its four direct neighbors. A pixel is an edge when that
    /// magnitude is strictly greater than `threshold`, so a negative threshold
    /// marks every interior pixel. Pixels on the outermost row and column are
    /// never edges.
    ///
    /// # Arguments
    ///
    /// * `threshold` - Gradient magnitude threshold
    ///
    /// # Returns
    ///
    /// Edge map with the same dimensions as the image
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use imageops_cutout::{DetectEdges, Image, DEFAULT_EDGE_THRESHOLD};
    /// use image::{ImageBuffer, Rgb};
    ///
    /// let image: Image<Rgb<u8>> = ImageBuffer::new(8, 8);
    /// let edges = image.detect_edges(DEFAULT_EDGE_THRESHOLD);
    /// assert_eq!(edges.count(), 0);
    /// ```
    fn detect_edges(&self, threshold: f32) -> EdgeMap;
}

impl<P> DetectEdges for Image<P>
where
    P: Pixel<Subpixel = u8>,
{
    fn detect_edges(&self, threshold: f32) -> EdgeMap {
        let (width, height) = self.dimensions();
        let mut edges = EdgeMap::new(width, height);
        if width < 3 || height < 3 {
            return edges;
        }

        let threshold_squared = threshold * threshold;
        let exceeds = |magnitude_squared: u32| {
            threshold < 0.0 || magnitude_squared as f32 > threshold_squared
        };

        for (y, x) in iproduct!(1..height - 1, 1..width - 1) {
            let center = rgb_of(self.get_pixel(x, y));
            let magnitude_squared = [(x, y - 1), (x, y + 1), (x - 1, y), (x + 1, y)]
                .into_iter()
                .map(|(nx, ny)| rgb_distance_squared(center, rgb_of(self.get_pixel(nx, ny))))
                .max()
                .unwrap_or(0);

            if exceeds(magnitude_squared) {
                edges.set(x, y, true);
            }
        }

        edges
    }
}
