use serde::Serialize;

use crate::compare::diff::CompareResult;
use crate::region::Region;

/// Machine-readable result of `snapmatch compare --json`.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub reference: &'a str,
    pub current: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<Region>,
    pub is_match: bool,
    pub diff_pixels: u64,
    pub total_pixels: u64,
    pub score: f64,
    pub tolerance: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimension_mismatch: Option<[u32; 4]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_image: Option<&'a str>,
}

impl<'a> JsonReport<'a> {
    pub fn new(
        reference: &'a str,
        current: &'a str,
        region: Option<Region>,
        tolerance: u64,
        result: &CompareResult,
        diff_image: Option<&'a str>,
    ) -> Self {
        Self {
            reference,
            current,
            region,
            is_match: result.is_match,
            diff_pixels: result.diff_pixels,
            total_pixels: result.total_pixels,
            score: result.score,
            tolerance,
            dimension_mismatch: result
                .dimension_mismatch
                .map(|(rw, rh, cw, ch)| [rw, rh, cw, ch]),
            diff_image,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
