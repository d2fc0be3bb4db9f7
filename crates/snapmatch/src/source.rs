//! Image sources: file paths or `data:` URLs from a tab capture.

use anyhow::{Context, Result, bail};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::RgbaImage;

/// Read the encoded image bytes behind `source`.
pub fn read(source: &str) -> Result<Vec<u8>> {
    if let Some(rest) = source.strip_prefix("data:") {
        return decode_data_url(rest).context("Failed to decode data URL");
    }
    std::fs::read(source).with_context(|| format!("Failed to read {source}"))
}

/// Decode PNG/JPEG bytes into RGBA pixels.
pub fn decode(bytes: &[u8]) -> Result<RgbaImage> {
    Ok(image::load_from_memory(bytes)
        .context("Failed to decode image")?
        .to_rgba8())
}

pub fn load(source: &str) -> Result<RgbaImage> {
    let bytes = read(source)?;
    decode(&bytes).with_context(|| format!("Failed to load {}", describe(source)))
}

/// Short printable name; data URLs are truncated.
pub fn describe(source: &str) -> String {
    if source.starts_with("data:") {
        let head: String = source.chars().take(24).collect();
        format!("{head}...")
    } else {
        source.to_string()
    }
}

fn decode_data_url(rest: &str) -> Result<Vec<u8>> {
    let Some((header, payload)) = rest.split_once(',') else {
        bail!("missing ',' after the media type");
    };
    if !header.ends_with(";base64") {
        bail!("only base64 data URLs are supported, got {header:?}");
    }
    STANDARD
        .decode(payload.trim())
        .context("invalid base64 payload")
}
