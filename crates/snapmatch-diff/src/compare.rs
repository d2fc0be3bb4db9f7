use tracing::{debug, trace};

use crate::antialias::is_antialiased;
use crate::color::{color_delta, pixel_at};
use crate::render::{draw_gray_pixel, draw_pixel};
use crate::{DiffError, Options, PixelData};

/// Count the pixels that differ between `img1` and `img2`.
///
/// Both images are `width * height` RGBA pixels in row-major order. When
/// `output` is given it receives the diff visualisation; with
/// [`Options::diff_mask`] only differing pixels are written to it.
///
/// All input checks run before any pixel is read or written.
pub fn compare<A, B>(
    img1: &A,
    img2: &B,
    mut output: Option<&mut [u8]>,
    width: u32,
    height: u32,
    options: &Options,
) -> Result<u64, DiffError>
where
    A: PixelData + ?Sized,
    B: PixelData + ?Sized,
{
    let img1 = img1.rgba_bytes()?;
    let img2 = img2.rgba_bytes()?;
    validate(img1, img2, output.as_deref(), width, height)?;

    let (width, height) = (width as usize, height as usize);

    if identical(img1, img2) {
        debug!(width, height, "images are identical");
        if let Some(out) = output.as_deref_mut().filter(|_| !options.diff_mask) {
            for pos in (0..img1.len()).step_by(4) {
                draw_gray_pixel(img1, pos, options.alpha, out);
            }
        }
        return Ok(0);
    }

    let max_delta = options.max_delta();
    let mut diff = 0u64;
    let mut antialiased = 0u64;

    for y in 0..height {
        for x in 0..width {
            let pos = (y * width + x) * 4;
            let delta = color_delta(pixel_at(img1, pos), pixel_at(img2, pos), false);

            if delta.abs() > max_delta {
                if !options.include_aa
                    && (is_antialiased(img1, x, y, width, height, img2)
                        || is_antialiased(img2, x, y, width, height, img1))
                {
                    // anti-aliasing is never part of a mask
                    antialiased += 1;
                    if let Some(out) = output.as_deref_mut().filter(|_| !options.diff_mask) {
                        draw_pixel(out, pos, options.aa_color);
                    }
                } else {
                    if let Some(out) = output.as_deref_mut() {
                        draw_pixel(out, pos, options.diff_color_for(delta));
                    }
                    diff += 1;
                }
            } else if let Some(out) = output.as_deref_mut().filter(|_| !options.diff_mask) {
                draw_gray_pixel(img1, pos, options.alpha, out);
            }
        }
    }

    trace!(diff, antialiased, max_delta, "pixel comparison done");
    Ok(diff)
}

fn validate(
    img1: &[u8],
    img2: &[u8],
    output: Option<&[u8]>,
    width: u32,
    height: u32,
) -> Result<(), DiffError> {
    if img1.len() != img2.len() {
        return Err(DiffError::SizeMismatch {
            left: img1.len(),
            right: img2.len(),
        });
    }
    if let Some(out) = output.filter(|out| out.len() != img1.len()) {
        return Err(DiffError::SizeMismatch {
            left: img1.len(),
            right: out.len(),
        });
    }

    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(4));
    if expected != Some(img1.len()) {
        return Err(DiffError::DimensionMismatch {
            len: img1.len(),
            width,
            height,
        });
    }
    Ok(())
}

/// Compare whole pixels as 32-bit words.
fn identical(img1: &[u8], img2: &[u8]) -> bool {
    let word = |px: &[u8]| u32::from_ne_bytes([px[0], px[1], px[2], px[3]]);
    img1.chunks_exact(4)
        .zip(img2.chunks_exact(4))
        .all(|(a, b)| word(a) == word(b))
}
