use thiserror::Error;

/// Error type for segmentation, compositing and mask editing operations
///
/// Every variant is fatal to the call that produced it. The crate never
/// retries internally and never returns a partially computed mask.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Image and mask dimensions do not match
    ///
    /// This error occurs when a mask is paired with an image of a
    /// different size, e.g. when compositing or binding an editor.
    #[error("Image and mask dimensions do not match: expected {expected:?}, actual {actual:?}")]
    DimensionMismatch {
        /// Expected dimensions (width, height)
        expected: (u32, u32),
        /// Actual dimensions (width, height)
        actual: (u32, u32),
    },

    /// Raw sample buffer length does not equal `width * height * 4`
    ///
    /// Buffers are never truncated or padded to fit the declared size.
    #[error("Buffer length {actual} does not match {width}x{height} RGBA image (expected {expected})")]
    BufferLengthMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    /// Invalid parameter provided to the operation
    ///
    /// This error is returned when a configuration value is invalid
    /// or outside the acceptable range for the operation.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Unexpected internal fault during segmentation
    #[error("Processing failed: {0}")]
    ProcessingFailure(String),
}
