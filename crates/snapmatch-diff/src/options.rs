use serde::{Deserialize, Serialize};

/// An RGB triple used for highlight colors.
pub type Rgb = [u8; 3];

/// Comparison settings.
///
/// Every field has a default, so a partial `[diff]` table deserializes into a
/// complete value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Matching threshold (0.0-1.0); smaller is more sensitive.
    pub threshold: f64,
    /// Count anti-aliased pixels as differences instead of skipping them.
    pub include_aa: bool,
    /// Opacity of the first image in the grayscale background.
    pub alpha: f64,
    /// Color of anti-aliased pixels in the output.
    pub aa_color: Rgb,
    /// Color of differing pixels in the output.
    pub diff_color: Rgb,
    /// Color used instead of `diff_color` where the second image is darker.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_color_alt: Option<Rgb>,
    /// Draw only differing pixels, leaving the rest of the output untouched.
    pub diff_mask: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            include_aa: false,
            alpha: 0.1,
            aa_color: [255, 255, 0],
            diff_color: [255, 0, 0],
            diff_color_alt: None,
            diff_mask: false,
        }
    }
}

impl Options {
    /// Largest squared YIQ distance still treated as "the same color".
    pub fn max_delta(&self) -> f64 {
        crate::color::MAX_YIQ_DELTA * self.threshold * self.threshold
    }

    /// Highlight color for a true difference with the given signed delta.
    pub(crate) fn diff_color_for(&self, delta: f64) -> Rgb {
        match self.diff_color_alt {
            Some(alt) if delta < 0.0 => alt,
            _ => self.diff_color,
        }
    }
}
