use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use snapmatch_diff::Rgb;

use crate::config::{self, CliOverrides};
use crate::region::Region;

fn parse_threshold(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|e| format!("{e}"))?;
    config::validate_unit("threshold", v)
}

fn parse_alpha(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|e| format!("{e}"))?;
    config::validate_unit("alpha", v)
}

fn parse_rgb(s: &str) -> Result<Rgb, String> {
    let channels = s
        .split(',')
        .map(|c| c.trim().parse::<u8>().map_err(|e| format!("{c:?}: {e}")))
        .collect::<Result<Vec<u8>, String>>()?;
    Rgb::try_from(channels.as_slice()).map_err(|_| format!("expected R,G,B, got {s:?}"))
}

#[derive(Parser)]
#[command(
    name = "snapmatch",
    about = "Perceptual screenshot comparison with anti-aliasing detection"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create .snapmatch/config.toml with default settings
    Init {
        /// Initial diff threshold (0.0–1.0)
        #[arg(long, default_value_t = 0.1, value_parser = parse_threshold)]
        threshold: f64,
        /// Overwrite existing config
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Compare a capture against a reference image (exit 0 = match, 1 = mismatch)
    Compare {
        /// Reference image (path or data URL)
        reference: String,
        /// Current image (path or data URL)
        current: String,
        /// Write the diff visualisation to this PNG
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        diff: DiffArgs,
    },

    /// Re-compare a capture on an interval and report match/mismatch changes
    Watch {
        /// Reference image (path or data URL)
        reference: String,
        /// Capture file that is re-read on every poll
        current: String,
        /// Poll interval in milliseconds (default 3000)
        #[arg(long)]
        interval_ms: Option<u64>,
        /// Stop after this many comparisons
        #[arg(long)]
        polls: Option<u64>,
        #[command(flatten)]
        diff: DiffArgs,
    },
}

/// Comparison flags shared by `compare` and `watch`; all override config.
#[derive(Clone, Debug, Default, Args)]
pub struct DiffArgs {
    /// Matching threshold (0.0–1.0); smaller is more sensitive
    #[arg(long, value_parser = parse_threshold)]
    pub threshold: Option<f64>,
    /// Count anti-aliased pixels as differences
    #[arg(long)]
    pub include_aa: bool,
    /// Opacity of the unchanged background in the diff image (0.0–1.0)
    #[arg(long, value_parser = parse_alpha)]
    pub alpha: Option<f64>,
    /// Draw only differences on a transparent canvas
    #[arg(long)]
    pub diff_mask: bool,
    /// Color of anti-aliased pixels, as R,G,B
    #[arg(long, value_parser = parse_rgb)]
    pub aa_color: Option<Rgb>,
    /// Color of differing pixels, as R,G,B
    #[arg(long, value_parser = parse_rgb)]
    pub diff_color: Option<Rgb>,
    /// Color of pixels where the current image is darker, as R,G,B
    #[arg(long, value_parser = parse_rgb)]
    pub diff_color_alt: Option<Rgb>,
    /// Differing pixels still accepted as a match
    #[arg(long)]
    pub tolerance: Option<u64>,
    /// Compare only this rectangle, as X,Y,WIDTH,HEIGHT
    #[arg(long)]
    pub region: Option<Region>,
}

impl DiffArgs {
    pub fn overrides(&self, interval_ms: Option<u64>) -> CliOverrides {
        CliOverrides {
            threshold: self.threshold,
            include_aa: self.include_aa,
            alpha: self.alpha,
            diff_mask: self.diff_mask,
            aa_color: self.aa_color,
            diff_color: self.diff_color,
            diff_color_alt: self.diff_color_alt,
            tolerance: self.tolerance,
            region: self.region,
            interval_ms,
        }
    }
}
