//! Image transformation logic
//!
//! This module post-processes downloaded PNG images before they are written
//! to the export directory. Four operations are supported, applied in a
//! fixed order when enabled for a job:
//!
//! - **Auto-crop**: Crop to the bounding box of non-transparent pixels
//! - **Expand**: Add transparent padding on every side
//! - **Resize**: Stretch to exact target dimensions
//! - **Expand to power of two**: Grow the canvas to power-of-two dimensions
//!
//! Jobs with no transforms enabled write downloaded bytes unchanged, so
//! untouched images never go through a decode and re-encode cycle.

pub mod chain;
pub mod ops;

use crate::domain::Result;
use image::codecs::png::PngEncoder;
use image::{ImageFormat, RgbaImage};

pub use chain::TransformChain;
pub use ops::{AutoCrop, Expand, ExpandToPowerOfTwo, Resize};

/// Trait for one image transformation step
///
/// Implementations consume the input image and return the transformed one.
/// Steps that have nothing to do for a given image return it unchanged.
pub trait ImageTransform: Send + Sync {
    /// Short step name used in logs
    fn name(&self) -> &'static str;

    /// Apply the transformation
    ///
    /// # Errors
    ///
    /// Returns an error if the image cannot be transformed.
    fn apply(&self, image: RgbaImage) -> Result<RgbaImage>;
}

/// Decode PNG bytes into an RGBA image
///
/// # Errors
///
/// Returns an error if the bytes are not a valid PNG.
pub fn decode_png(bytes: &[u8]) -> Result<RgbaImage> {
    let image = image::load_from_memory_with_format(bytes, ImageFormat::Png)?;
    Ok(image.to_rgba8())
}

/// Encode an RGBA image as PNG bytes
///
/// # Errors
///
/// Returns an error if encoding fails.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    let encoder = PngEncoder::new(&mut bytes);
    image.write_with_encoder(encoder)?;
    Ok(bytes)
}
