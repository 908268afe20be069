use image::Pixel;

use crate::{
    error::Error,
    imageops_cutout::{
        binary_map::{BinaryMap, EdgeMap},
        border_color::BackgroundColor,
    },
    utils::{rgb_distance, rgb_of, validate_threshold},
    Image,
};

/// Tuning for the heuristic-scored background classification
///
/// A pixel's score is its RGB distance to the estimated background color, plus
/// `variance_weight` times the luma standard deviation of its 3x3 neighborhood,
/// plus `skin_penalty` when the pixel looks like skin. Low scores look like
/// background.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HeuristicConfig {
    /// Maximum score of a background candidate
    pub score_threshold: f32,
    pub variance_weight: f32,
    pub skin_penalty: f32,
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        Self {
            score_threshold: 60.0,
            variance_weight: 1.0,
            skin_penalty: 255.0,
        }
    }
}

impl HeuristicConfig {
    pub fn validate(&self) -> Result<(), Error> {
        validate_threshold(self.score_threshold, "score_threshold")
            .and_then(|_| validate_threshold(self.variance_weight, "variance_weight"))
            .and_then(|_| validate_threshold(self.skin_penalty, "skin_penalty"))
            .map_err(Error::InvalidParameter)
    }
}

/// Classic RGB skin-tone rule for uniformly lit images
#[inline]
pub fn is_skin_tone([r, g, b]: [u8; 3]) -> bool {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    r > 95 && g > 40 && b > 20 && max - min > 15 && r.abs_diff(g) > 15 && r > g && r > b
}

/// Computes the heuristic score of every pixel, row-major
pub fn score_pixels<P>(image: &Image<P>, background: BackgroundColor, config: &HeuristicConfig) -> Vec<f32>
where
    P: Pixel<Subpixel = u8>,
{
    let (width, height) = image.dimensions();
    let luma: Vec<f32> = image
        .pixels()
        .map(|pixel| f32::from(pixel.to_luma().0[0]))
        .collect();
    let background = background.to_array();

    image
        .enumerate_pixels()
        .map(|(x, y, pixel)| {
            let rgb = rgb_of(pixel);
            let mut score = rgb_distance(rgb, background);
            score += config.variance_weight * local_std_dev(&luma, width, height, x, y);
            if is_skin_tone(rgb) {
                score += config.skin_penalty;
            }
            score
        })
        .collect()
}

/// Marks non-edge pixels whose score is within the threshold
pub fn background_candidates<P>(
    image: &Image<P>,
    edges: &EdgeMap,
    background: BackgroundColor,
    config: &HeuristicConfig,
) -> BinaryMap
where
    P: Pixel<Subpixel = u8>,
{
    let (width, height) = image.dimensions();
    let mut candidates = BinaryMap::new(width, height);
    for (index, score) in score_pixels(image, background, config).into_iter().enumerate() {
        if !edges.get_index(index) && score <= config.score_threshold {
            candidates.set_index(index, true);
        }
    }
    candidates
}

/// Standard deviation of luma over the 3x3 window clipped to the image
fn local_std_dev(luma: &[f32], width: u32, height: u32, x: u32, y: u32) -> f32 {
    let x_range = x.saturating_sub(1)..(x + 2).min(width);
    let y_range = y.saturating_sub(1)..(y + 2).min(height);

    let mut sum = 0.0;
    let mut sum_squared = 0.0;
    let mut count = 0.0;
    for wy in y_range {
        for wx in x_range.clone() {
            let value = luma[wy as usize * width as usize + wx as usize];
            sum += value;
            sum_squared += value * value;
            count += 1.0;
        }
    }

    let mean = sum / count;
    (sum_squared / count - mean * mean).max(0.0).sqrt()
}
