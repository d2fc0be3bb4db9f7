use std::time::Duration;

use anyhow::{Context, Result};
use snapmatch_diff::{Options, Rgb};

use super::{Config, load, validate_unit};
use crate::region::Region;

/// Values extracted from the CLI that participate in the merge.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub threshold: Option<f64>,
    pub include_aa: bool,
    pub alpha: Option<f64>,
    pub diff_mask: bool,
    pub aa_color: Option<Rgb>,
    pub diff_color: Option<Rgb>,
    pub diff_color_alt: Option<Rgb>,
    pub tolerance: Option<u64>,
    pub region: Option<Region>,
    pub interval_ms: Option<u64>,
}

/// Values read from `SNAPMATCH_*` environment variables.
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    pub threshold: Option<f64>,
    pub tolerance: Option<u64>,
}

impl EnvOverrides {
    pub fn from_env() -> Result<Self> {
        let threshold = std::env::var("SNAPMATCH_THRESHOLD")
            .ok()
            .map(|v| v.parse::<f64>())
            .transpose()
            .context("SNAPMATCH_THRESHOLD must be a valid float")?;
        let tolerance = std::env::var("SNAPMATCH_TOLERANCE")
            .ok()
            .map(|v| v.parse::<u64>())
            .transpose()
            .context("SNAPMATCH_TOLERANCE must be a non-negative integer")?;
        Ok(Self {
            threshold,
            tolerance,
        })
    }
}

/// Fully resolved config after CLI > env > file > defaults merge.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub options: Options,
    pub tolerance: u64,
    pub region: Option<Region>,
    pub interval: Duration,
}

impl ResolvedConfig {
    pub fn new(cli: CliOverrides) -> Result<Self> {
        let file_config = load()?;
        let env = EnvOverrides::from_env()?;
        Self::merge(file_config, env, cli)
    }

    pub fn merge(file: Config, env: EnvOverrides, cli: CliOverrides) -> Result<Self> {
        let mut options = file.diff;

        options.threshold = cli.threshold.or(env.threshold).unwrap_or(options.threshold);
        validate_unit("threshold", options.threshold).map_err(anyhow::Error::msg)?;

        if let Some(alpha) = cli.alpha {
            options.alpha = alpha;
        }
        if cli.include_aa {
            options.include_aa = true;
        }
        if cli.diff_mask {
            options.diff_mask = true;
        }
        if let Some(color) = cli.aa_color {
            options.aa_color = color;
        }
        if let Some(color) = cli.diff_color {
            options.diff_color = color;
        }
        if cli.diff_color_alt.is_some() {
            options.diff_color_alt = cli.diff_color_alt;
        }

        let tolerance = cli
            .tolerance
            .or(env.tolerance)
            .unwrap_or(file.matching.tolerance);

        let region = cli.region.or(file.matching.region);

        let interval_ms = cli.interval_ms.unwrap_or(file.watch.interval_ms).max(1);

        Ok(Self {
            options,
            tolerance,
            region,
            interval: Duration::from_millis(interval_ms),
        })
    }
}
