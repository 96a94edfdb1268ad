//! Transform chain assembly and execution
//!
//! A [`TransformChain`] is built once per job from its configuration and
//! applied to every image the job downloads. Steps always run in the same
//! order: crop, pad, resize, power-of-two expansion.

use super::ops::{AutoCrop, Expand, ExpandToPowerOfTwo, Resize};
use super::{decode_png, encode_png, ImageTransform};
use crate::config::JobConfig;
use crate::domain::Result;
use image::RgbaImage;

/// Ordered list of image transformation steps for one job
pub struct TransformChain {
    transforms: Vec<Box<dyn ImageTransform>>,
}

impl TransformChain {
    /// Build the chain a job's configuration asks for
    ///
    /// Steps are added in processing order; disabled steps are left out
    /// entirely so an unconfigured job produces an empty chain.
    pub fn from_job(job: &JobConfig) -> Self {
        let mut transforms: Vec<Box<dyn ImageTransform>> = Vec::new();

        if job.auto_crop {
            transforms.push(Box::new(AutoCrop));
        }
        if job.padding > 0 {
            transforms.push(Box::new(Expand::new(job.padding)));
        }
        if let Some(target) = &job.resize_to {
            transforms.push(Box::new(Resize::new(target.width, target.height)));
        }
        if job.expand_to_power_of_two {
            transforms.push(Box::new(ExpandToPowerOfTwo));
        }

        Self { transforms }
    }

    /// Whether the chain has no steps
    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    /// Number of configured steps
    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    /// Step names in processing order, for logging
    pub fn describe(&self) -> String {
        if self.transforms.is_empty() {
            return "passthrough".to_string();
        }
        self.transforms
            .iter()
            .map(|t| t.name())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Apply all steps to a decoded image
    ///
    /// # Errors
    ///
    /// Returns the first step error encountered.
    pub fn apply(&self, image: RgbaImage) -> Result<RgbaImage> {
        let mut image = image;

        for transform in &self.transforms {
            image = transform.apply(image)?;

            let (width, height) = image.dimensions();
            tracing::trace!(
                step = transform.name(),
                width = width,
                height = height,
                "Applied image transform"
            );
        }

        Ok(image)
    }

    /// Process downloaded PNG bytes through the chain
    ///
    /// Empty chains return the input unchanged, so untouched images are
    /// written byte-for-byte as Figma rendered them.
    ///
    /// # Errors
    ///
    /// Returns an error if decoding, any step, or re-encoding fails.
    pub fn process(&self, bytes: Vec<u8>) -> Result<Vec<u8>> {
        if self.transforms.is_empty() {
            return Ok(bytes);
        }

        let image = decode_png(&bytes)?;
        let image = self.apply(image)?;
        encode_png(&image)
    }
}
