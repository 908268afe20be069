mod error;
mod imageops_cutout;
#[cfg(test)]
mod test_utils;
mod utils;

use image::{ImageBuffer, Luma, Pixel};

pub use error::Error;
pub use imageops_cutout::apply_alpha_mask::{ApplyAlphaMask, ModifyAlpha, OPAQUE, TRANSPARENT};
pub use imageops_cutout::binary_map::{BackgroundMap, BinaryMap, EdgeMap};
pub use imageops_cutout::border_color::{BackgroundColor, EstimateBorderColor, DEFAULT_BORDER_BAND};
pub use imageops_cutout::edge_detect::{DetectEdges, DEFAULT_EDGE_THRESHOLD};
pub use imageops_cutout::heuristic::{is_skin_tone, HeuristicConfig};
pub use imageops_cutout::mask_editor::{
    apply_stroke, BrushMode, BrushStroke, CursorPreview, CutoutPreview, EditorState, MaskEditor,
    MaskSink, DEFAULT_BRUSH_RADIUS,
};
pub use imageops_cutout::raw_image::rgba_image_from_raw;
pub use imageops_cutout::region_grow::{
    grow_background, ClassificationStrategy, GrowParams, DEFAULT_COLOR_TOLERANCE, DEFAULT_SEED_BAND,
};
pub use imageops_cutout::segment::{segment, Segmentation, SegmentationConfig, Segmenter};

pub type Image<P> = ImageBuffer<P, Vec<<P as Pixel>::Subpixel>>;

/// Per-pixel opacity paired with an image of identical dimensions
pub type Mask = Image<Luma<u8>>;
