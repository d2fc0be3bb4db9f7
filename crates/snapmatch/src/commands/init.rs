use anyhow::{Result, bail};

use crate::config;

/// `snapmatch init` — create .snapmatch/config.toml.
pub fn init(threshold: f64, force: bool) -> Result<()> {
    if !force && config::config_file_exists() {
        bail!(".snapmatch/config.toml already exists (use --force to overwrite)");
    }

    config::write_template(threshold)?;

    let verb = if force { "Regenerated" } else { "Created" };
    println!("{verb} .snapmatch/config.toml");
    println!("  diff.threshold = {threshold}");
    Ok(())
}
