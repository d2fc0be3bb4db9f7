pub mod diff;

/// Verdict of a single comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchStatus {
    Match {
        diff_pixels: u64,
    },
    Mismatch {
        diff_pixels: u64,
        score: f64,
        dimension_mismatch: Option<(u32, u32, u32, u32)>,
    },
    Error(String),
}

impl MatchStatus {
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Match { .. })
    }
}
