use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::compare::diff;
use crate::config::ResolvedConfig;
use crate::report::json::JsonReport;
use crate::report::terminal;
use crate::source;

/// `snapmatch compare` — load, diff, report.
/// Returns exit code: 0 = match, 1 = mismatch.
pub async fn compare(
    config: ResolvedConfig,
    reference: String,
    current: String,
    output: Option<PathBuf>,
    json: bool,
) -> Result<i32> {
    let start = Instant::now();
    let options = config.options;
    let region = config.region;
    let tolerance = config.tolerance;

    let (ref_src, cur_src) = (reference.clone(), current.clone());
    let result = tokio::task::spawn_blocking(move || -> Result<diff::CompareResult> {
        let reference = source::load(&ref_src)?;
        let current = source::load(&cur_src)?;
        debug!(
            reference = ?reference.dimensions(),
            current = ?current.dimensions(),
            "images loaded"
        );
        diff::compare(&reference, &current, region, &options, tolerance)
    })
    .await
    .context("Diff task panicked")??;

    if let Some(path) = &output {
        if let Some(diff_img) = &result.diff_image {
            diff_img
                .save(path)
                .with_context(|| format!("Failed to save diff image: {}", path.display()))?;
            info!(path = %path.display(), "diff image written");
        }
    }

    if json {
        let diff_path = output.as_ref().and_then(|p| p.to_str());
        let report = JsonReport::new(&reference, &current, region, tolerance, &result, diff_path);
        println!("{}", report.to_json().context("Failed to serialize report")?);
    } else {
        let name = format!("{} vs {}", source::describe(&reference), source::describe(&current));
        terminal::print_line(&name, &result.status(), tolerance, start.elapsed());
    }

    Ok(if result.is_match { 0 } else { 1 })
}
