use image::Rgba;
use tracing::{trace, warn};

use crate::{
    error::Error,
    imageops_cutout::apply_alpha_mask::{validate_dimensions, ModifyAlpha, OPAQUE, TRANSPARENT},
    Image, Mask,
};

/// What a brush stroke writes into the mask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BrushMode {
    /// Make pixels fully transparent
    #[default]
    Erase,
    /// Make pixels fully opaque
    Restore,
}

impl BrushMode {
    /// Mask value written by this mode
    pub const fn value(self) -> u8 {
        match self {
            Self::Erase => TRANSPARENT,
            Self::Restore => OPAQUE,
        }
    }
}

/// One circular, hard-edged overwrite of mask values
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushStroke {
    /// Center in pixel coordinates
    pub center: (f32, f32),
    pub radius: f32,
    pub mode: BrushMode,
}

impl BrushStroke {
    pub fn new(center: (f32, f32), radius: f32, mode: BrushMode) -> Self {
        Self {
            center,
            radius,
            mode,
        }
    }
}

/// Stamps a brush stroke into the mask
///
/// Every integer offset `(dx, dy)` with `dx² + dy² <= radius²` targets the pixel
/// at the half-up rounded position `center + (dx, dy)`. In-bounds targets are
/// overwritten with the mode's value; the rest of the stroke is clipped, and
/// only offsets that can land on the canvas are visited.
/// A negative or non-finite radius, or a non-finite center, leaves the mask
/// unchanged.
///
/// # Returns
///
/// Number of in-bounds pixel writes
///
/// # Examples
///
/// ```no_run
/// use imageops_cutout::{apply_stroke, BrushMode, BrushStroke, Mask};
/// use image::{ImageBuffer, Luma};
///
/// let mut mask: Mask = ImageBuffer::from_pixel(5, 5, Luma([0]));
/// apply_stroke(&mut mask, &BrushStroke::new((2.0, 2.0), 1.0, BrushMode::Restore));
/// assert_eq!(mask.get_pixel(2, 1)[0], 255);
/// assert_eq!(mask.get_pixel(1, 1)[0], 0);
/// ```
pub fn apply_stroke(mask: &mut Mask, stroke: &BrushStroke) -> usize {
    let BrushStroke {
        center: (cx, cy),
        radius,
        mode,
    } = *stroke;

    if !radius.is_finite() || radius < 0.0 || !cx.is_finite() || !cy.is_finite() {
        warn!(?stroke, "ignoring degenerate brush stroke");
        return 0;
    }

    let (width, height) = mask.dimensions();
    let value = mode.value();
    let (cx, cy, radius) = (f64::from(cx), f64::from(cy), f64::from(radius));
    let radius_squared = radius * radius;
    let reach = radius.floor() as i64;
    let (dx_min, dx_max) = offset_span(cx, width, reach);
    let (dy_min, dy_max) = offset_span(cy, height, reach);
    let mut written = 0;

    for dy in dy_min..=dy_max {
        for dx in dx_min..=dx_max {
            let (fx, fy) = (dx as f64, dy as f64);
            if fx * fx + fy * fy > radius_squared {
                continue;
            }
            let x = round_half_up(cx + fx);
            let y = round_half_up(cy + fy);
            if (0..i64::from(width)).contains(&x) && (0..i64::from(height)).contains(&y) {
                mask.get_pixel_mut(x as u32, y as u32).0[0] = value;
                written += 1;
            }
        }
    }

    written
}

/// Offsets along one axis that stay within `reach` and can round onto `0..extent`
fn offset_span(center: f64, extent: u32, reach: i64) -> (i64, i64) {
    let low = (-center - 1.0).floor() as i64;
    let high = (f64::from(extent) - center + 1.0).ceil() as i64;
    (low.max(-reach), high.min(reach))
}

#[inline]
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Receiver of every mask revision produced by the editor
pub trait MaskSink {
    /// Called with the updated mask after each applied stroke
    ///
    /// # Errors
    ///
    /// Implementations return `Error::DimensionMismatch` when the mask does not
    /// fit the bound image.
    fn publish(&mut self, mask: &Mask) -> Result<(), Error>;
}

impl MaskSink for () {
    fn publish(&mut self, _mask: &Mask) -> Result<(), Error> {
        Ok(())
    }
}

/// Cutout kept in sync with the edited mask
///
/// Holds a copy of the source image whose alpha channel is replaced on every
/// publish, so [`cutout`](Self::cutout) always reflects the latest mask.
#[derive(Debug, Clone)]
pub struct CutoutPreview {
    cutout: Image<Rgba<u8>>,
    revision: u64,
}

impl CutoutPreview {
    /// Binds a source image to its initial mask
    ///
    /// # Errors
    ///
    /// * `Error::DimensionMismatch` - When image and mask dimensions don't match
    pub fn new(image: Image<Rgba<u8>>, mask: &Mask) -> Result<Self, Error> {
        let mut cutout = image;
        cutout.replace_alpha_mut(mask)?;
        Ok(Self {
            cutout,
            revision: 0,
        })
    }

    pub fn cutout(&self) -> &Image<Rgba<u8>> {
        &self.cutout
    }

    pub fn into_cutout(self) -> Image<Rgba<u8>> {
        self.cutout
    }

    /// Number of masks published since creation
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

impl MaskSink for CutoutPreview {
    fn publish(&mut self, mask: &Mask) -> Result<(), Error> {
        self.cutout.replace_alpha_mut(mask)?;
        self.revision += 1;
        Ok(())
    }
}

/// Pointer interaction state of the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorState {
    /// No pointer engaged
    #[default]
    Idle,
    /// Pointer over the canvas but not pressed
    Hover,
    /// Pointer pressed, strokes are applied on every move
    Drawing,
}

/// Brush outline shown under the pointer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorPreview {
    pub center: (f32, f32),
    pub radius: f32,
    pub mode: BrushMode,
}

/// Brush-driven mask editor
///
/// Consumes a single pointer event stream. Strokes are applied only while
/// drawing, once per received event, without interpolation between
/// consecutive positions; fast pointer motion can therefore leave gaps.
#[derive(Debug)]
pub struct MaskEditor<S = ()> {
    mask: Mask,
    sink: S,
    state: EditorState,
    cursor: Option<(f32, f32)>,
    radius: f32,
    mode: BrushMode,
}

/// Brush radius a new editor starts with
pub const DEFAULT_BRUSH_RADIUS: f32 = 20.0;

impl<S: MaskSink> MaskEditor<S> {
    /// Creates an editor and publishes the initial mask to `sink`
    ///
    /// # Errors
    ///
    /// Propagates errors from [`MaskSink::publish`].
    pub fn new(mask: Mask, mut sink: S) -> Result<Self, Error> {
        sink.publish(&mask)?;
        Ok(Self {
            mask,
            sink,
            state: EditorState::Idle,
            cursor: None,
            radius: DEFAULT_BRUSH_RADIUS,
            mode: BrushMode::default(),
        })
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    pub fn mask(&self) -> &Mask {
        &self.mask
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_mask(self) -> Mask {
        self.mask
    }

    pub fn brush_radius(&self) -> f32 {
        self.radius
    }

    /// Sets the radius used by subsequent strokes
    ///
    /// A negative or non-finite radius is kept but turns every stroke into a no-op.
    pub fn set_brush_radius(&mut self, radius: f32) {
        if !radius.is_finite() || radius < 0.0 {
            warn!(radius, "brush radius will not paint");
        }
        self.radius = radius;
    }

    pub fn brush_mode(&self) -> BrushMode {
        self.mode
    }

    pub fn set_brush_mode(&mut self, mode: BrushMode) {
        self.mode = mode;
    }

    /// Brush outline at the last known pointer position, if the pointer is on the canvas
    pub fn cursor_preview(&self) -> Option<CursorPreview> {
        self.cursor.map(|center| CursorPreview {
            center,
            radius: self.radius,
            mode: self.mode,
        })
    }

    /// Starts drawing and stamps the brush at the press position
    ///
    /// A press while already drawing is ignored.
    pub fn pointer_down(&mut self, x: f32, y: f32) -> Result<(), Error> {
        if self.state == EditorState::Drawing {
            trace!("pointer down while drawing ignored");
            return Ok(());
        }
        trace!(from = ?self.state, "start drawing");
        self.state = EditorState::Drawing;
        self.cursor = Some((x, y));
        self.stroke_at(x, y)
    }

    /// Stamps the brush when drawing; otherwise only moves the cursor preview
    pub fn pointer_move(&mut self, x: f32, y: f32) -> Result<(), Error> {
        self.cursor = Some((x, y));
        match self.state {
            EditorState::Drawing => self.stroke_at(x, y),
            EditorState::Idle | EditorState::Hover => {
                self.state = EditorState::Hover;
                Ok(())
            }
        }
    }

    /// Stops drawing
    pub fn pointer_up(&mut self) {
        if self.state == EditorState::Drawing {
            trace!("stop drawing");
            self.state = EditorState::Idle;
        }
    }

    /// Pointer left the canvas: stops drawing and clears the cursor preview
    pub fn pointer_leave(&mut self) {
        trace!(from = ?self.state, "pointer left canvas");
        self.state = EditorState::Idle;
        self.cursor = None;
    }

    /// Replaces the edited mask, e.g. after a fresh segmentation run
    ///
    /// # Errors
    ///
    /// * `Error::DimensionMismatch` - When the new mask has a different size
    pub fn reset(&mut self, mask: Mask) -> Result<(), Error> {
        validate_dimensions(&self.mask, &mask)?;
        self.sink.publish(&mask)?;
        self.mask = mask;
        self.state = EditorState::Idle;
        self.cursor = None;
        Ok(())
    }

    fn stroke_at(&mut self, x: f32, y: f32) -> Result<(), Error> {
        let stroke = BrushStroke::new((x, y), self.radius, self.mode);
        let written = apply_stroke(&mut self.mask, &stroke);
        trace!(?stroke, written, "applied stroke");
        self.sink.publish(&self.mask)
    }
}
