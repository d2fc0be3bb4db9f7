use crate::Rgb;
use crate::color::{blend, rgb_to_y};

/// Write an opaque pixel at byte offset `pos`.
#[inline]
pub fn draw_pixel(output: &mut [u8], pos: usize, [r, g, b]: Rgb) {
    output[pos] = r;
    output[pos + 1] = g;
    output[pos + 2] = b;
    output[pos + 3] = 255;
}

/// Draw the pixel of `img` at `pos` as gray, faded toward white.
///
/// `alpha` scales the source pixel's own opacity; 0.0 gives pure white.
pub fn draw_gray_pixel(img: &[u8], pos: usize, alpha: f64, output: &mut [u8]) {
    let r = f64::from(img[pos]);
    let g = f64::from(img[pos + 1]);
    let b = f64::from(img[pos + 2]);
    let a = f64::from(img[pos + 3]);
    let val = to_channel(blend(rgb_to_y(r, g, b), alpha * a / 255.0));
    draw_pixel(output, pos, [val, val, val]);
}

/// Round half to even and clamp, like a canvas clamped byte array.
fn to_channel(v: f64) -> u8 {
    v.round_ties_even().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draw_pixel_forces_opaque() {
        let mut out = vec![9u8; 8];
        draw_pixel(&mut out, 4, [1, 2, 3]);
        assert_eq!(out, [9, 9, 9, 9, 1, 2, 3, 255]);
    }

    #[test]
    fn gray_pixel_with_zero_alpha_is_white() {
        let img = [10, 200, 30, 255];
        let mut out = [0u8; 4];
        draw_gray_pixel(&img, 0, 0.0, &mut out);
        assert_eq!(out, [255, 255, 255, 255]);
    }

    #[test]
    fn gray_pixel_with_full_alpha_is_luma() {
        let img = [0, 0, 0, 255];
        let mut out = [0u8; 4];
        draw_gray_pixel(&img, 0, 1.0, &mut out);
        assert_eq!(out, [0, 0, 0, 255]);

        let img = [100, 100, 100, 255];
        draw_gray_pixel(&img, 0, 1.0, &mut out);
        assert_eq!(out, [100, 100, 100, 255]);
    }

    #[test]
    fn gray_pixel_partial_fade() {
        // 255 + (0 - 255) * 0.2
        let img = [0, 0, 0, 255];
        let mut out = [0u8; 4];
        draw_gray_pixel(&img, 0, 0.2, &mut out);
        assert_eq!(out, [204, 204, 204, 255]);
    }

    #[test]
    fn transparent_source_renders_white() {
        let img = [0, 0, 0, 0];
        let mut out = [0u8; 4];
        draw_gray_pixel(&img, 0, 1.0, &mut out);
        assert_eq!(out, [255, 255, 255, 255]);
    }
}
