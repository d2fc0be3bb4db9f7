use image::RgbaImage;

use crate::{DiffError, Options, compare};

pub struct DiffReport {
    /// Number of pixels that differ above the threshold.
    pub diff_pixels: u64,
    /// Total number of pixels in the image.
    pub total_pixels: u64,
    /// 0.0 = identical, 1.0 = completely different.
    pub score: f64,
    /// Visual diff image (if produced by the engine).
    pub diff_image: Option<RgbaImage>,
}

pub trait DiffEngine {
    fn name(&self) -> &str;
    fn diff(&self, left: &RgbaImage, right: &RgbaImage) -> Result<DiffReport, DiffError>;
}

/// YIQ diff with anti-aliasing detection, rendering a diff image.
#[derive(Debug, Clone, Default)]
pub struct PixelmatchEngine {
    pub options: Options,
}

impl PixelmatchEngine {
    pub fn new(options: Options) -> Self {
        Self { options }
    }
}

impl DiffEngine for PixelmatchEngine {
    fn name(&self) -> &str {
        "pixelmatch"
    }

    fn diff(&self, left: &RgbaImage, right: &RgbaImage) -> Result<DiffReport, DiffError> {
        if left.dimensions() != right.dimensions() {
            return Err(DiffError::ImageSizeMismatch {
                left_w: left.width(),
                left_h: left.height(),
                right_w: right.width(),
                right_h: right.height(),
            });
        }

        let (w, h) = left.dimensions();
        let total_pixels = u64::from(w) * u64::from(h);

        // Starts fully transparent so mask mode yields a clean overlay.
        let mut diff_image = RgbaImage::new(w, h);
        let diff_pixels = compare(left, right, Some(&mut *diff_image), w, h, &self.options)?;

        let score = if total_pixels > 0 {
            diff_pixels as f64 / total_pixels as f64
        } else {
            0.0
        };

        Ok(DiffReport {
            diff_pixels,
            total_pixels,
            score,
            diff_image: Some(diff_image),
        })
    }
}
