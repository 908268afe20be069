use image::Pixel;
use tracing::{debug, debug_span};

use crate::{
    error::Error,
    imageops_cutout::{
        border_color::{BackgroundColor, EstimateBorderColor, DEFAULT_BORDER_BAND},
        edge_detect::{DetectEdges, DEFAULT_EDGE_THRESHOLD},
        region_grow::{
            grow_background, ClassificationStrategy, GrowParams, DEFAULT_COLOR_TOLERANCE,
            DEFAULT_SEED_BAND,
        },
    },
    utils::validate_threshold,
    Image, Mask,
};

/// Tunable parameters of a segmentation run
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SegmentationConfig {
    /// Width of the border band sampled for the background color
    pub border_band: u32,
    /// Width of the border band whose pixels seed flood fills
    pub seed_band: u32,
    pub edge_threshold: f32,
    pub color_tolerance: f32,
    pub strategy: ClassificationStrategy,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            border_band: DEFAULT_BORDER_BAND,
            seed_band: DEFAULT_SEED_BAND,
            edge_threshold: DEFAULT_EDGE_THRESHOLD,
            color_tolerance: DEFAULT_COLOR_TOLERANCE,
            strategy: ClassificationStrategy::default(),
        }
    }
}

impl SegmentationConfig {
    pub fn with_border_band(mut self, border_band: u32) -> Self {
        self.border_band = border_band;
        self
    }

    pub fn with_seed_band(mut self, seed_band: u32) -> Self {
        self.seed_band = seed_band;
        self
    }

    pub fn with_edge_threshold(mut self, edge_threshold: f32) -> Self {
        self.edge_threshold = edge_threshold;
        self
    }

    pub fn with_color_tolerance(mut self, color_tolerance: f32) -> Self {
        self.color_tolerance = color_tolerance;
        self
    }

    pub fn with_strategy(mut self, strategy: ClassificationStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Checks that every parameter is usable
    ///
    /// # Errors
    ///
    /// * `Error::InvalidParameter` - On a zero band or a negative or non-finite threshold
    pub fn validate(&self) -> Result<(), Error> {
        if self.border_band == 0 {
            return Err(Error::InvalidParameter("border_band must be at least 1".to_string()));
        }
        if self.seed_band == 0 {
            return Err(Error::InvalidParameter("seed_band must be at least 1".to_string()));
        }
        validate_threshold(self.edge_threshold, "edge_threshold")
            .and_then(|_| validate_threshold(self.color_tolerance, "color_tolerance"))
            .map_err(Error::InvalidParameter)?;
        match &self.strategy {
            ClassificationStrategy::EdgeFloodFill => Ok(()),
            ClassificationStrategy::HeuristicScored(config) => config.validate(),
        }
    }
}

/// Result of a segmentation run with its intermediate statistics
#[derive(Debug, Clone, PartialEq)]
pub struct Segmentation {
    pub mask: Mask,
    pub background_color: BackgroundColor,
    pub edge_count: usize,
    pub background_count: usize,
}

/// Background segmentation engine
///
/// Runs border color estimation, edge detection, border-seeded region growing
/// and mask conversion in sequence. Each stage is a single O(width * height)
/// pass; scratch grids live only for the duration of one call.
#[derive(Debug, Clone, Default)]
pub struct Segmenter {
    config: SegmentationConfig,
}

impl Segmenter {
    /// Creates a segmenter after validating its configuration
    ///
    /// # Errors
    ///
    /// * `Error::InvalidParameter` - When the configuration is invalid
    pub fn new(config: SegmentationConfig) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SegmentationConfig {
        &self.config
    }

    /// Computes the cutout mask of an image
    ///
    /// # Returns
    ///
    /// Binary mask where background pixels are 0 and foreground pixels are 255
    ///
    /// # Errors
    ///
    /// * `Error::ProcessingFailure` - On an internal fault; no partial mask is returned
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use imageops_cutout::{Image, SegmentationConfig, Segmenter};
    /// use image::{ImageBuffer, Rgba};
    ///
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let image: Image<Rgba<u8>> = ImageBuffer::from_pixel(64, 64, Rgba([255, 255, 255, 255]));
    /// let segmenter = Segmenter::new(SegmentationConfig::default())?;
    /// let mask = segmenter.segment(&image)?;
    /// assert!(mask.pixels().all(|p| p[0] == 0));
    /// # Ok(())
    /// # }
    /// ```
    pub fn segment<P>(&self, image: &Image<P>) -> Result<Mask, Error>
    where
        P: Pixel<Subpixel = u8>,
    {
        self.segment_detailed(image).map(|segmentation| segmentation.mask)
    }

    /// Like [`segment`](Self::segment), also reporting intermediate statistics
    pub fn segment_detailed<P>(&self, image: &Image<P>) -> Result<Segmentation, Error>
    where
        P: Pixel<Subpixel = u8>,
    {
        let (width, height) = image.dimensions();
        let _span = debug_span!("segment", width, height).entered();

        let background_color = {
            let _span = debug_span!("border_color").entered();
            image
                .estimate_border_color(self.config.border_band)
                .unwrap_or_default()
        };
        debug!(?background_color, "estimated background color");

        let edges = {
            let _span = debug_span!("edges").entered();
            image.detect_edges(self.config.edge_threshold)
        };
        let edge_count = edges.count();
        debug!(edge_count, "detected edges");

        let background = {
            let _span = debug_span!("region_grow", strategy = ?self.config.strategy).entered();
            let params = GrowParams {
                color_tolerance: self.config.color_tolerance,
                seed_band: self.config.seed_band,
            };
            grow_background(image, &edges, background_color, &self.config.strategy, &params)
                .map_err(|error| Error::ProcessingFailure(error.to_string()))?
        };
        let background_count = background.count();
        debug!(
            background_count,
            foreground_count = background.as_slice().len() - background_count,
            "classified pixels"
        );

        let mask = background.to_mask()?;

        Ok(Segmentation {
            mask,
            background_color,
            edge_count,
            background_count,
        })
    }
}

/// Segments an image with the default configuration
///
/// Deterministic: identical input samples always produce an identical mask.
///
/// # Errors
///
/// * `Error::ProcessingFailure` - On an internal fault
pub fn segment<P>(image: &Image<P>) -> Result<Mask, Error>
where
    P: Pixel<Subpixel = u8>,
{
    Segmenter::default().segment(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_center_square_image, create_solid_rgba_image};
    use crate::HeuristicConfig;
    use image::Rgba;

    #[test]
    fn solid_white_image_is_fully_transparent() {
        let image = create_solid_rgba_image(4, 4, [255, 255, 255]);
        let segmentation = Segmenter::default().segment_detailed(&image).unwrap();

        assert_eq!(segmentation.background_color, BackgroundColor::new(255, 255, 255));
        assert_eq!(segmentation.edge_count, 0);
        assert_eq!(segmentation.background_count, 16);
        assert!(segmentation.mask.pixels().all(|p| p[0] == 0));
    }

    #[test]
    fn center_square_keeps_square_and_edge_ring() {
        let image = create_center_square_image();
        let mask = segment(&image).unwrap();

        let opaque: Vec<(u32, u32)> = mask
            .enumerate_pixels()
            .filter(|(_, _, p)| p[0] == 255)
            .map(|(x, y, _)| (x, y))
            .collect();
        assert_eq!(opaque.len(), 12);
        for (x, y) in [(4, 4), (5, 4), (4, 5), (5, 5), (4, 3), (3, 4), (6, 5), (5, 6)] {
            assert!(opaque.contains(&(x, y)), "({x}, {y}) should be opaque");
        }
        assert!(mask.pixels().all(|p| p[0] == 0 || p[0] == 255));
    }

    #[test]
    fn empty_image_produces_empty_mask() {
        let image: Image<Rgba<u8>> = Image::new(0, 0);
        let mask = segment(&image).unwrap();
        assert_eq!(mask.dimensions(), (0, 0));
    }

    #[test]
    fn heuristic_strategy_is_selectable() {
        let config = SegmentationConfig::default()
            .with_strategy(ClassificationStrategy::HeuristicScored(HeuristicConfig::default()));
        let segmenter = Segmenter::new(config).unwrap();
        let mask = segmenter.segment(&create_center_square_image()).unwrap();

        assert_eq!(mask.get_pixel(0, 0)[0], 0);
        assert_eq!(mask.get_pixel(4, 4)[0], 255);
    }

    #[test]
    fn builder_sets_every_field() {
        let config = SegmentationConfig::default()
            .with_border_band(3)
            .with_seed_band(2)
            .with_edge_threshold(12.5)
            .with_color_tolerance(20.0);

        assert_eq!(config.border_band, 3);
        assert_eq!(config.seed_band, 2);
        assert_eq!(config.edge_threshold, 12.5);
        assert_eq!(config.color_tolerance, 20.0);
        assert_eq!(config.strategy, ClassificationStrategy::EdgeFloodFill);
    }

    #[test]
    fn invalid_configuration_is_rejected() {
        for config in [
            SegmentationConfig::default().with_border_band(0),
            SegmentationConfig::default().with_seed_band(0),
            SegmentationConfig::default().with_edge_threshold(-1.0),
            SegmentationConfig::default().with_color_tolerance(f32::NAN),
        ] {
            assert!(matches!(
                Segmenter::new(config),
                Err(Error::InvalidParameter(_))
            ));
        }
    }
}
