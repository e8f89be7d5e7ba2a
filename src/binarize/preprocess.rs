use crate::decompose::BinaryMask;
use crate::error::ConfigError;
use image::{imageops, DynamicImage, GrayImage};

/// Converts decoded frames into binary masks.
///
/// Steps:
/// 1. Convert to 8-bit greyscale
/// 2. Resize to the target width, keeping the aspect ratio
/// 3. Mark pixels brighter than `threshold × 255` as foreground
#[derive(Debug, Clone, Copy)]
pub struct Binarizer {
    target_width: u32,
    threshold: f32,
}

impl Binarizer {
    pub fn new(target_width: u32, threshold: f32) -> Result<Self, ConfigError> {
        if target_width == 0 {
            return Err(ConfigError::ZeroWidth);
        }
        if !(0.0..=1.0).contains(&threshold) {
            return Err(ConfigError::Threshold(threshold));
        }
        Ok(Self {
            target_width,
            threshold,
        })
    }

    pub fn target_width(&self) -> u32 {
        self.target_width
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Output dimensions for a source frame of `width` x `height`.
    ///
    /// Height is `target_width / (width / height)` rounded down, and may be
    /// zero for very wide frames.
    pub fn output_size(&self, width: u32, height: u32) -> (u32, u32) {
        if width == 0 {
            return (self.target_width, 0);
        }
        let ratio = width as f64 / height as f64;
        (self.target_width, (self.target_width as f64 / ratio) as u32)
    }

    pub fn binarize(&self, frame: &DynamicImage) -> BinaryMask {
        let _span = tracing::debug_span!("binarize").entered();

        let grey = frame.to_luma8();
        let (width, height) = self.output_size(grey.width(), grey.height());
        if height == 0 {
            return BinaryMask::filled(width, 0, false);
        }

        let resized = if grey.dimensions() != (width, height) {
            imageops::resize(&grey, width, height, imageops::FilterType::CatmullRom)
        } else {
            grey
        };

        self.threshold_grey(&resized)
    }

    /// Apply the threshold to an image that is already the right size.
    pub fn threshold_grey(&self, grey: &GrayImage) -> BinaryMask {
        let cutoff = self.threshold * 255.0;
        BinaryMask::from_fn(grey.width(), grey.height(), |x, y| {
            grey.get_pixel(x, y)[0] as f32 > cutoff
        })
    }
}
