//! YIQ color distance.
//!
//! Based on "Measuring perceived color difference using YIQ NTSC transmission
//! color space in mobile applications" (Kotsarenko, Ramos).

/// Maximum possible value of [`color_delta`] for two opaque pixels.
pub const MAX_YIQ_DELTA: f64 = 35215.0;

/// One RGBA pixel.
pub type Pixel = [u8; 4];

/// Read the pixel starting at byte offset `pos`.
#[inline]
pub fn pixel_at(img: &[u8], pos: usize) -> Pixel {
    [img[pos], img[pos + 1], img[pos + 2], img[pos + 3]]
}

/// Squared YIQ distance between two pixels.
///
/// The result is negative when the first pixel is brighter than the second.
/// With `brightness_only` the plain luma difference `Y1 - Y2` is returned.
pub fn color_delta(p1: Pixel, p2: Pixel, brightness_only: bool) -> f64 {
    if p1 == p2 {
        return 0.0;
    }

    let (r1, g1, b1) = composite_on_white(p1);
    let (r2, g2, b2) = composite_on_white(p2);

    let y1 = rgb_to_y(r1, g1, b1);
    let y2 = rgb_to_y(r2, g2, b2);
    let y = y1 - y2;

    if brightness_only {
        return y;
    }

    let i = rgb_to_i(r1, g1, b1) - rgb_to_i(r2, g2, b2);
    let q = rgb_to_q(r1, g1, b1) - rgb_to_q(r2, g2, b2);

    let delta = 0.5053 * y * y + 0.299 * i * i + 0.1957 * q * q;

    if y1 > y2 { -delta } else { delta }
}

pub fn rgb_to_y(r: f64, g: f64, b: f64) -> f64 {
    r * 0.29889531 + g * 0.58662247 + b * 0.11448223
}

pub fn rgb_to_i(r: f64, g: f64, b: f64) -> f64 {
    r * 0.59597799 - g * 0.27417610 - b * 0.32180189
}

pub fn rgb_to_q(r: f64, g: f64, b: f64) -> f64 {
    r * 0.21147017 - g * 0.52261711 + b * 0.31114694
}

/// Blend a channel value toward white by opacity `a` (0.0-1.0).
#[inline]
pub fn blend(c: f64, a: f64) -> f64 {
    255.0 + (c - 255.0) * a
}

fn composite_on_white([r, g, b, a]: Pixel) -> (f64, f64, f64) {
    let (r, g, b) = (f64::from(r), f64::from(g), f64::from(b));
    if a == 255 {
        return (r, g, b);
    }
    let a = f64::from(a) / 255.0;
    (blend(r, a), blend(g, a), blend(b, a))
}
