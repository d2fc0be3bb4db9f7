use anyhow::{Context, Result};
use image::RgbaImage;
use snapmatch_diff::{DiffEngine, Options, PixelmatchEngine};

use super::MatchStatus;
use crate::region::Region;

pub struct CompareResult {
    pub is_match: bool,
    pub diff_pixels: u64,
    pub total_pixels: u64,
    pub score: f64,
    pub diff_image: Option<RgbaImage>,
    /// `Some((ref_w, ref_h, cur_w, cur_h))` when images have different dimensions.
    pub dimension_mismatch: Option<(u32, u32, u32, u32)>,
}

impl CompareResult {
    pub fn status(&self) -> MatchStatus {
        if self.is_match {
            MatchStatus::Match {
                diff_pixels: self.diff_pixels,
            }
        } else {
            MatchStatus::Mismatch {
                diff_pixels: self.diff_pixels,
                score: self.score,
                dimension_mismatch: self.dimension_mismatch,
            }
        }
    }
}

/// Crop both images to `region`, diff them and apply the pixel tolerance.
///
/// Runs synchronously — call via `spawn_blocking`.
pub fn compare(
    reference: &RgbaImage,
    current: &RgbaImage,
    region: Option<Region>,
    options: &Options,
    tolerance: u64,
) -> Result<CompareResult> {
    let (left, right) = match region {
        Some(region) => (
            region.crop(reference).context("Failed to crop reference image")?,
            region.crop(current).context("Failed to crop current image")?,
        ),
        None => (reference.clone(), current.clone()),
    };

    let dimension_mismatch = if left.dimensions() != right.dimensions() {
        Some((left.width(), left.height(), right.width(), right.height()))
    } else {
        None
    };

    // Pad both images to the same canvas size if dimensions differ.
    // Fill colour is magenta (#FF00FF) so the size delta is obvious in the diff overlay.
    let (left, right) = if dimension_mismatch.is_some() {
        let max_w = left.width().max(right.width());
        let max_h = left.height().max(right.height());
        (pad_to(&left, max_w, max_h), pad_to(&right, max_w, max_h))
    } else {
        (left, right)
    };

    let report = PixelmatchEngine::new(*options).diff(&left, &right)?;

    Ok(CompareResult {
        is_match: dimension_mismatch.is_none() && report.diff_pixels <= tolerance,
        diff_pixels: report.diff_pixels,
        total_pixels: report.total_pixels,
        score: report.score,
        diff_image: report.diff_image,
        dimension_mismatch,
    })
}

/// Paste `src` onto a magenta canvas of `w x h`, anchored at top-left.
fn pad_to(src: &RgbaImage, w: u32, h: u32) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(w, h, image::Rgba([255, 0, 255, 255]));
    image::imageops::overlay(&mut canvas, src, 0, 0);
    canvas
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn solid(w: u32, h: u32, color: Rgba<u8>) -> RgbaImage {
        RgbaImage::from_pixel(w, h, color)
    }

    /// Flip `n` scattered pixels to red.
    fn with_pixel_diffs(img: &RgbaImage, n: u32) -> RgbaImage {
        let mut img = img.clone();
        let (w, h) = img.dimensions();
        for i in 0..n {
            let x = ((i as u64 * 7919) % w as u64) as u32;
            let y = ((i as u64 * 6271) % h as u64) as u32;
            img.put_pixel(x, y, Rgba([255, 0, 0, 255]));
        }
        img
    }

    // -- verdict --

    #[test]
    fn identical_images_match() {
        let img = solid(20, 20, Rgba([200, 200, 200, 255]));
        let r = compare(&img, &img, None, &Options::default(), 0).unwrap();
        assert!(r.is_match);
        assert_eq!(r.diff_pixels, 0);
        assert_eq!(r.total_pixels, 400);
        assert_eq!(r.status(), MatchStatus::Match { diff_pixels: 0 });
    }

    #[test]
    fn pixel_diffs_detected() {
        let reference = solid(100, 100, Rgba([200, 200, 200, 255]));
        let current = with_pixel_diffs(&reference, 50);
        let r = compare(&reference, &current, None, &Options::default(), 0).unwrap();
        assert!(!r.is_match);
        assert!(r.diff_pixels > 0);
        assert!(r.score > 0.0);
        assert!(r.diff_image.is_some());
        assert!(!r.status().is_match());
    }

    #[test]
    fn tolerance_absorbs_small_diffs() {
        let reference = solid(10, 10, Rgba([255, 255, 255, 255]));
        let mut current = reference.clone();
        current.put_pixel(2, 2, Rgba([0, 0, 0, 255]));
        current.put_pixel(7, 7, Rgba([0, 0, 0, 255]));

        let strict = compare(&reference, &current, None, &Options::default(), 1).unwrap();
        assert_eq!(strict.diff_pixels, 2);
        assert!(!strict.is_match);

        let lenient = compare(&reference, &current, None, &Options::default(), 2).unwrap();
        assert!(lenient.is_match);
    }

    #[test]
    fn perceptually_identical_is_match() {
        let a = solid(50, 50, Rgba([128, 128, 128, 255]));
        let mut b = a.clone();
        // Nudge one pixel by 1 — below YIQ threshold.
        b.put_pixel(0, 0, Rgba([129, 128, 128, 255]));
        let r = compare(&a, &b, None, &Options::default(), 0).unwrap();
        assert_eq!(r.diff_pixels, 0);
        assert!(r.is_match);
    }

    // -- region --

    #[test]
    fn region_ignores_changes_outside() {
        let reference = solid(40, 40, Rgba([255, 255, 255, 255]));
        let mut current = reference.clone();
        current.put_pixel(30, 30, Rgba([0, 0, 0, 255]));
        current.put_pixel(5, 5, Rgba([0, 0, 0, 255]));

        let region: Region = "0,0,10,10".parse().unwrap();
        let r = compare(&reference, &current, Some(region), &Options::default(), 0).unwrap();
        assert_eq!(r.diff_pixels, 1);
        assert_eq!(r.total_pixels, 100);
    }

    #[test]
    fn region_outside_image_is_an_error() {
        let img = solid(10, 10, Rgba([0, 0, 0, 255]));
        let region: Region = "5,5,10,10".parse().unwrap();
        let err = compare(&img, &img, Some(region), &Options::default(), 0).err();
        assert!(format!("{:#}", err.unwrap()).contains("crop reference"));
    }

    // -- dimension mismatch + padding --

    #[test]
    fn dimension_mismatch_detected() {
        let a = solid(100, 100, Rgba([200, 200, 200, 255]));
        let b = solid(100, 120, Rgba([200, 200, 200, 255]));
        let r = compare(&a, &b, None, &Options::default(), 0).unwrap();
        assert_eq!(r.dimension_mismatch, Some((100, 100, 100, 120)));
        assert!(!r.is_match);
    }

    #[test]
    fn dimension_mismatch_pads_with_magenta() {
        let a = solid(10, 10, Rgba([200, 200, 200, 255]));
        let b = solid(10, 12, Rgba([200, 200, 200, 255]));
        let r = compare(&a, &b, None, &Options::default(), 1_000).unwrap();
        // The 2-row padding area (magenta vs grey) produces diff pixels.
        assert!(r.diff_pixels > 0, "padding should cause diff pixels");
        // Total canvas is 10x12 = 120 pixels.
        assert_eq!(r.total_pixels, 120);
        // A size change never passes, whatever the tolerance.
        assert!(!r.is_match);
    }
}
