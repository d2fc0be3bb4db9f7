//! Anti-aliasing detection.
//!
//! Based on "Anti-aliased Pixel and Intensity Slope Detector" (V. Vysniauskas,
//! 2009). A pixel is anti-aliasing when it sits on a brightness slope between
//! a darker and a brighter neighbour, and one of those extremes lies inside a
//! flat area in both images.

use crate::color::{color_delta, pixel_at};

/// Clamped 3x3 window around a pixel.
struct Window {
    x0: usize,
    y0: usize,
    x2: usize,
    y2: usize,
    /// A window touching the image border starts with one equal sibling.
    border: bool,
}

impl Window {
    fn around(x: usize, y: usize, width: usize, height: usize) -> Self {
        let x0 = x.saturating_sub(1);
        let y0 = y.saturating_sub(1);
        let x2 = (x + 1).min(width - 1);
        let y2 = (y + 1).min(height - 1);
        Self {
            x0,
            y0,
            x2,
            y2,
            border: x == x0 || x == x2 || y == y0 || y == y2,
        }
    }

    fn initial_count(&self) -> u32 {
        u32::from(self.border)
    }

    /// Neighbours column by column, skipping the centre.
    fn neighbours(&self, cx: usize, cy: usize) -> impl Iterator<Item = (usize, usize)> {
        let (y0, y2) = (self.y0, self.y2);
        (self.x0..=self.x2)
            .flat_map(move |x| (y0..=y2).map(move |y| (x, y)))
            .filter(move |&p| p != (cx, cy))
    }
}

/// Whether the pixel at `(x, y)` of `img` is likely anti-aliasing.
///
/// `other` is the image being compared against; the flat area next to the
/// slope has to exist in both.
pub fn is_antialiased(
    img: &[u8],
    x: usize,
    y: usize,
    width: usize,
    height: usize,
    other: &[u8],
) -> bool {
    let window = Window::around(x, y, width, height);
    let center = pixel_at(img, (y * width + x) * 4);
    let mut zeroes = window.initial_count();
    let mut min = 0.0;
    let mut max = 0.0;
    // Negative deltas mean the neighbour is brighter than the centre.
    let mut brightest = None;
    let mut darkest = None;

    for (nx, ny) in window.neighbours(x, y) {
        let delta = color_delta(center, pixel_at(img, (ny * width + nx) * 4), true);

        if delta == 0.0 {
            zeroes += 1;
            // flat area, not a slope
            if zeroes > 2 {
                return false;
            }
        } else if delta < min {
            min = delta;
            brightest = Some((nx, ny));
        } else if delta > max {
            max = delta;
            darkest = Some((nx, ny));
        }
    }

    let (Some(brightest), Some(darkest)) = (brightest, darkest) else {
        return false;
    };

    let flat_in_both = |(px, py): (usize, usize)| {
        has_many_siblings(img, px, py, width, height)
            && has_many_siblings(other, px, py, width, height)
    };

    flat_in_both(darkest) || flat_in_both(brightest)
}

/// Whether the pixel at `(x, y)` has 3+ neighbours of exactly the same color.
pub fn has_many_siblings(img: &[u8], x: usize, y: usize, width: usize, height: usize) -> bool {
    let window = Window::around(x, y, width, height);
    let center = pixel_at(img, (y * width + x) * 4);
    let mut zeroes = window.initial_count();

    for (nx, ny) in window.neighbours(x, y) {
        if pixel_at(img, (ny * width + nx) * 4) == center {
            zeroes += 1;
        }
        if zeroes > 2 {
            return true;
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: usize = 5;
    const H: usize = 5;

    fn image(f: impl Fn(usize, usize) -> [u8; 4]) -> Vec<u8> {
        let mut img = Vec::with_capacity(W * H * 4);
        for y in 0..H {
            for x in 0..W {
                img.extend_from_slice(&f(x, y));
            }
        }
        img
    }

    fn gray(v: u8) -> [u8; 4] {
        [v, v, v, 255]
    }

    /// Black left half, white right half, a gray column at x = 2.
    fn soft_edge() -> Vec<u8> {
        image(|x, _| match x {
            0 | 1 => gray(0),
            2 => gray(128),
            _ => gray(255),
        })
    }

    #[test]
    fn flat_area_is_not_antialiased() {
        let img = image(|_, _| gray(40));
        assert!(!is_antialiased(&img, 2, 2, W, H, &img));
    }

    #[test]
    fn blended_edge_pixel_is_antialiased() {
        let img = soft_edge();
        assert!(is_antialiased(&img, 2, 2, W, H, &img));
    }

    #[test]
    fn lone_dark_pixel_has_no_brighter_side() {
        let img = image(|x, y| if (x, y) == (2, 2) { gray(0) } else { gray(255) });
        assert!(!is_antialiased(&img, 2, 2, W, H, &img));
    }

    #[test]
    fn slope_needs_flat_neighbour_in_other_image() {
        let img = soft_edge();
        // No pixel here has an equal neighbour.
        let noisy = image(|x, y| gray(((x * 37 + y * 91) % 251) as u8));
        assert!(!is_antialiased(&img, 2, 2, W, H, &noisy));
    }

    #[test]
    fn siblings_counted_exactly() {
        let img = image(|_, _| gray(7));
        assert!(has_many_siblings(&img, 2, 2, W, H));

        let unique = image(|x, y| gray((y * W + x) as u8));
        assert!(!has_many_siblings(&unique, 2, 2, W, H));
    }

    #[test]
    fn border_counts_as_one_sibling() {
        // Corner pixel with two equal neighbours out of three: 1 + 2 > 2.
        let img = image(|x, y| if (x, y) == (1, 1) { gray(9) } else { gray(0) });
        assert!(has_many_siblings(&img, 0, 0, W, H));

        // Same neighbourhood in the interior only reaches 2.
        let img = image(|x, y| match (x, y) {
            (2, 2) | (1, 1) | (2, 1) => gray(0),
            _ => gray((10 + y * W + x) as u8),
        });
        assert!(!has_many_siblings(&img, 2, 2, W, H));
    }

    #[test]
    fn single_row_image_is_handled() {
        let img: Vec<u8> = [gray(0), gray(128), gray(255)].concat();
        assert!(!is_antialiased(&img, 1, 0, 3, 1, &img));
        assert!(!has_many_siblings(&img, 0, 0, 3, 1));
    }
}
