//! Perceptual pixel diff for RGBA screenshots.
//!
//! Counts the pixels that differ between two equally sized images, measured
//! in YIQ space, and skips pixels that look like anti-aliasing on an edge.
//! Optionally renders the result into an output buffer: red for real
//! differences, yellow for anti-aliasing, a faded grayscale copy of the first
//! image everywhere else.
//!
//! ```
//! use snapmatch_diff::{Options, compare};
//!
//! let (w, h) = (4, 4);
//! let white = vec![255u8; w * h * 4];
//! let mut black_dot = white.clone();
//! black_dot[20..23].copy_from_slice(&[0, 0, 0]);
//!
//! let mut out = vec![0u8; white.len()];
//! let n = compare(&white, &black_dot, Some(&mut out), w as u32, h as u32, &Options::default())
//!     .unwrap();
//! assert_eq!(n, 1);
//! assert_eq!(&out[20..24], &[255, 0, 0, 255]);
//! ```

pub mod antialias;
pub mod color;
pub mod compare;
pub mod engine;
pub mod render;

mod options;
mod pixels;

use thiserror::Error;

pub use self::compare::compare;
pub use self::engine::{DiffEngine, DiffReport, PixelmatchEngine};
pub use self::options::{Options, Rgb};
pub use self::pixels::PixelData;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DiffError {
    #[error("image data: 8-bit RGBA pixel data expected, got {0}")]
    InvalidInputType(String),

    #[error("image sizes do not match: {left} vs {right} bytes")]
    SizeMismatch { left: usize, right: usize },

    #[error("image data size does not match width/height: {len} bytes for {width}x{height}")]
    DimensionMismatch { len: usize, width: u32, height: u32 },

    #[error("images have different sizes: {left_w}x{left_h} vs {right_w}x{right_h}")]
    ImageSizeMismatch {
        left_w: u32,
        left_h: u32,
        right_w: u32,
        right_h: u32,
    },
}
