//! Individual image transformation steps
//!
//! Each step implements [`ImageTransform`] and is an identity operation when
//! it has nothing to do, so chains never shrink images accidentally or fail
//! on degenerate inputs.

use super::ImageTransform;
use crate::domain::Result;
use image::imageops::{self, FilterType};
use image::RgbaImage;

/// Crop to the bounding box of non-transparent pixels
///
/// Pixels with any alpha above zero count as content. Fully transparent
/// images pass through unchanged.
pub struct AutoCrop;

impl ImageTransform for AutoCrop {
    fn name(&self) -> &'static str {
        "auto_crop"
    }

    fn apply(&self, image: RgbaImage) -> Result<RgbaImage> {
        match alpha_bounding_box(&image) {
            Some((x, y, width, height)) => {
                if (width, height) == image.dimensions() {
                    return Ok(image);
                }
                Ok(imageops::crop_imm(&image, x, y, width, height).to_image())
            }
            None => Ok(image),
        }
    }
}

/// Add transparent padding on every side
pub struct Expand {
    padding: u32,
}

impl Expand {
    /// Create an expand step with the given per-side padding in pixels
    pub fn new(padding: u32) -> Self {
        Self { padding }
    }
}

impl ImageTransform for Expand {
    fn name(&self) -> &'static str {
        "expand"
    }

    fn apply(&self, image: RgbaImage) -> Result<RgbaImage> {
        if self.padding == 0 {
            return Ok(image);
        }

        let (width, height) = image.dimensions();
        let mut canvas = RgbaImage::new(width + 2 * self.padding, height + 2 * self.padding);
        imageops::overlay(&mut canvas, &image, self.padding as i64, self.padding as i64);
        Ok(canvas)
    }
}

/// Stretch to exact target dimensions
///
/// Aspect ratio is not preserved; the caller asked for these dimensions.
pub struct Resize {
    width: u32,
    height: u32,
}

impl Resize {
    /// Create a resize step with exact target dimensions
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl ImageTransform for Resize {
    fn name(&self) -> &'static str {
        "resize"
    }

    fn apply(&self, image: RgbaImage) -> Result<RgbaImage> {
        if image.dimensions() == (self.width, self.height) {
            return Ok(image);
        }
        Ok(imageops::resize(
            &image,
            self.width,
            self.height,
            FilterType::Lanczos3,
        ))
    }
}

/// Grow the canvas so both dimensions are powers of two
///
/// The original image is centered on the new canvas; odd remainders land on
/// the bottom-right.
pub struct ExpandToPowerOfTwo;

impl ImageTransform for ExpandToPowerOfTwo {
    fn name(&self) -> &'static str {
        "expand_to_power_of_two"
    }

    fn apply(&self, image: RgbaImage) -> Result<RgbaImage> {
        let (width, height) = image.dimensions();
        let target_width = width.next_power_of_two();
        let target_height = height.next_power_of_two();

        if (target_width, target_height) == (width, height) {
            return Ok(image);
        }

        let mut canvas = RgbaImage::new(target_width, target_height);
        let x = (target_width - width) / 2;
        let y = (target_height - height) / 2;
        imageops::overlay(&mut canvas, &image, x as i64, y as i64);
        Ok(canvas)
    }
}

/// Bounding box of pixels with non-zero alpha as (x, y, width, height)
///
/// Returns `None` for fully transparent images.
fn alpha_bounding_box(image: &RgbaImage) -> Option<(u32, u32, u32, u32)> {
    let mut min_x = u32::MAX;
    let mut min_y = u32::MAX;
    let mut max_x = 0u32;
    let mut max_y = 0u32;
    let mut found = false;

    for (x, y, pixel) in image.enumerate_pixels() {
        if pixel[3] > 0 {
            found = true;
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
    }

    found.then(|| (min_x, min_y, max_x - min_x + 1, max_y - min_y + 1))
}
