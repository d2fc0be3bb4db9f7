pub mod resolve;
pub mod template;

use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use snapmatch_diff::Options;

use crate::region::Region;

pub use self::resolve::{CliOverrides, ResolvedConfig};
pub use self::template::{config_file_exists, write_template};

pub(crate) const CONFIG_DIR: &str = ".snapmatch";
const CONFIG_FILE: &str = "config.toml";

/// When a comparison counts as a match.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Differing pixels still accepted as a match.
    #[serde(default)]
    pub tolerance: u64,
    /// Rectangle cropped from both images before comparing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<Region>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
        }
    }
}

fn default_interval_ms() -> u64 {
    3000
}

/// Check a 0.0-1.0 setting such as `threshold` or `alpha`.
pub fn validate_unit(name: &str, v: f64) -> Result<f64, String> {
    if !(0.0..=1.0).contains(&v) {
        return Err(format!("{name} must be between 0.0 and 1.0, got {v}"));
    }
    Ok(v)
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub diff: Options,
    #[serde(default, rename = "match")]
    pub matching: MatchConfig,
    #[serde(default)]
    pub watch: WatchConfig,
}

impl Config {
    /// Validate semantic constraints that serde cannot express.
    fn validate(&self) -> Result<()> {
        validate_unit("diff.threshold", self.diff.threshold).map_err(anyhow::Error::msg)?;
        validate_unit("diff.alpha", self.diff.alpha).map_err(anyhow::Error::msg)?;

        if let Some(region) = &self.matching.region {
            if region.width == 0 || region.height == 0 {
                bail!(
                    "match.region has invalid dimensions ({}x{}). \
                     Both width and height must be > 0",
                    region.width,
                    region.height,
                );
            }
        }

        if self.watch.interval_ms == 0 {
            bail!("watch.interval_ms must be > 0");
        }

        Ok(())
    }
}

pub fn parse(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Load `.snapmatch/config.toml`, falling back to defaults when it is absent.
pub fn load() -> Result<Config> {
    load_from(&Path::new(CONFIG_DIR).join(CONFIG_FILE))
}

pub fn load_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse(&content).with_context(|| format!("Failed to parse {}", path.display()))
}
