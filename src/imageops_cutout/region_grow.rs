use image::Pixel;
use itertools::iproduct;

use crate::{
    error::Error,
    imageops_cutout::{
        binary_map::{BackgroundMap, EdgeMap},
        border_color::BackgroundColor,
        heuristic::{background_candidates, HeuristicConfig},
    },
    utils::{rgb_distance_squared, rgb_of, validate_matching_dimensions},
    Image,
};

/// Maximum RGB distance between a pixel and its region's seed color
pub const DEFAULT_COLOR_TOLERANCE: f32 = 35.0;

/// Width in pixels of the border band whose pixels seed flood fills
pub const DEFAULT_SEED_BAND: u32 = 5;

/// Policy deciding which border-connected pixels are background
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClassificationStrategy {
    /// Grow from each border seed while pixels stay within the color tolerance
    /// of that seed's own color and are not edges
    #[default]
    EdgeFloodFill,
    /// Grow from the border through pixels whose heuristic score marks them as
    /// background candidates
    HeuristicScored(HeuristicConfig),
}

/// Parameters shared by both classification strategies
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowParams {
    pub color_tolerance: f32,
    pub seed_band: u32,
}

impl Default for GrowParams {
    fn default() -> Self {
        Self {
            color_tolerance: DEFAULT_COLOR_TOLERANCE,
            seed_band: DEFAULT_SEED_BAND,
        }
    }
}

/// Classifies background pixels by flood filling from the image border
///
/// Every pixel within `params.seed_band` of any side seeds a 4-connected fill
/// unless an earlier fill already reached it. A pixel joins a fill when it is
/// unvisited and accepted by the strategy; joined pixels are background.
/// Everything no fill reaches is foreground.
///
/// # Arguments
///
/// * `image` - Source image
/// * `edges` - Edge map of `image`, acting as a fill barrier
/// * `background` - Estimated background color, used by the heuristic strategy
/// * `strategy` - Classification policy
/// * `params` - Color tolerance and seed band width
///
/// # Errors
///
/// * `Error::DimensionMismatch` - When the edge map and image sizes differ
pub fn grow_background<P>(
    image: &Image<P>,
    edges: &EdgeMap,
    background: BackgroundColor,
    strategy: &ClassificationStrategy,
    params: &GrowParams,
) -> Result<BackgroundMap, Error>
where
    P: Pixel<Subpixel = u8>,
{
    let (width, height) = image.dimensions();
    let (edge_width, edge_height) = edges.dimensions();
    validate_matching_dimensions(width, height, edge_width, edge_height, "grow_background")
        .map_err(|_| Error::DimensionMismatch {
            expected: (width, height),
            actual: (edge_width, edge_height),
        })?;

    let background_map = match strategy {
        ClassificationStrategy::EdgeFloodFill => {
            let colors: Vec<[u8; 3]> = image.pixels().map(rgb_of).collect();
            let tolerance_squared = params.color_tolerance * params.color_tolerance;
            flood_from_border(width, height, params.seed_band, |seed, candidate| {
                !edges.get_index(candidate)
                    && rgb_distance_squared(colors[seed], colors[candidate]) as f32
                        <= tolerance_squared
            })
        }
        ClassificationStrategy::HeuristicScored(config) => {
            let candidates = background_candidates(image, edges, background, config);
            flood_from_border(width, height, params.seed_band, |_, candidate| {
                candidates.get_index(candidate)
            })
        }
    };

    Ok(background_map)
}

/// Depth-first 4-connected flood fill seeded from every border band pixel
///
/// `joins(seed, candidate)` receives flat indices of the fill's seed pixel and
/// an unvisited in-bounds candidate.
fn flood_from_border<F>(width: u32, height: u32, seed_band: u32, mut joins: F) -> BackgroundMap
where
    F: FnMut(usize, usize) -> bool,
{
    let mut background = BackgroundMap::new(width, height);
    let mut visited = vec![false; width as usize * height as usize];
    let mut stack: Vec<(u32, u32)> = Vec::new();

    let in_band = |x: u32, y: u32| {
        x < seed_band
            || y < seed_band
            || x >= width.saturating_sub(seed_band)
            || y >= height.saturating_sub(seed_band)
    };

    for (seed_y, seed_x) in iproduct!(0..height, 0..width) {
        if !in_band(seed_x, seed_y) {
            continue;
        }
        let seed = background.index(seed_x, seed_y);
        if visited[seed] {
            continue;
        }

        stack.push((seed_x, seed_y));
        while let Some((x, y)) = stack.pop() {
            let index = background.index(x, y);
            if visited[index] || !joins(seed, index) {
                continue;
            }
            visited[index] = true;
            background.set_index(index, true);

            if x > 0 {
                stack.push((x - 1, y));
            }
            if x + 1 < width {
                stack.push((x + 1, y));
            }
            if y > 0 {
                stack.push((x, y - 1));
            }
            if y + 1 < height {
                stack.push((x, y + 1));
            }
        }
    }

    background
}
