use std::path::Path;

use anyhow::{Context, Result};

use super::{CONFIG_DIR, CONFIG_FILE};

/// Hand-crafted config template with commented-out keys.
/// Used by `snapmatch init` so that users can see the available knobs.
const CONFIG_TEMPLATE: &str = r#"# ─────────────────────────────────────────────────────────
# Pixel comparison — all fields optional.
# ─────────────────────────────────────────────────────────
[diff]
threshold = {threshold}                    # 0.0-1.0, smaller is more sensitive
# include_aa = false                # count anti-aliased pixels as differences
# alpha = 0.1                       # opacity of the unchanged background in diff images
# aa_color = [255, 255, 0]
# diff_color = [255, 0, 0]
# diff_color_alt = [0, 255, 0]      # color where the current image is darker
# diff_mask = false                 # draw only differences on a transparent canvas

# ─────────────────────────────────────────────────────────
# Verdict
# ─────────────────────────────────────────────────────────
[match]
# tolerance = 0                     # differing pixels still accepted as a match
# region = { x = 0, y = 0, width = 100, height = 100 }

# ─────────────────────────────────────────────────────────
# Watch mode
# ─────────────────────────────────────────────────────────
[watch]
# interval_ms = 3000
"#;

pub fn config_file_exists() -> bool {
    Path::new(CONFIG_DIR).join(CONFIG_FILE).exists()
}

pub fn render(threshold: f64) -> String {
    CONFIG_TEMPLATE.replace("{threshold}", &format!("{threshold:?}"))
}

/// Write the hand-crafted config template into `dir`.
pub fn write_template_to(dir: &Path, threshold: f64) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;
    let path = dir.join(CONFIG_FILE);
    std::fs::write(&path, render(threshold))
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

pub fn write_template(threshold: f64) -> Result<()> {
    write_template_to(Path::new(CONFIG_DIR), threshold)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{load_from, parse};

    #[test]
    fn template_parses_to_defaults() {
        let config = parse(&render(0.1)).unwrap();
        assert_eq!(config.diff, snapmatch_diff::Options::default());
        assert_eq!(config.matching.tolerance, 0);
        assert_eq!(config.watch.interval_ms, 3000);
    }

    #[test]
    fn written_template_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join(".snapmatch");
        write_template_to(&target, 0.25).unwrap();
        let config = load_from(&target.join(CONFIG_FILE)).unwrap();
        assert_eq!(config.diff.threshold, 0.25);
    }
}
