//! `menuscan config` subcommands.

use std::path::Path;

use anyhow::{bail, Context, Result};
use menuscan_config::{apply_all_defaults, collect_redacted_paths, redact, write_config, MenuScanConfig};

use crate::terminal_output::{note_info, note_success};

/// The effective config as YAML with credentials masked.
pub fn render_redacted(config: &MenuScanConfig) -> Result<String> {
    let value = serde_json::to_value(config).context("Failed to serialize config")?;
    serde_yaml::to_string(&redact(&value)).context("Failed to render config as YAML")
}

pub fn show(config: &MenuScanConfig, config_path: &Path) -> Result<()> {
    println!("# {}", config_path.display());
    print!("{}", render_redacted(config)?);

    let value = serde_json::to_value(config)?;
    let masked = collect_redacted_paths(&value);
    if !masked.is_empty() {
        note_info(&format!("masked: {}", masked.join(", ")));
    }
    Ok(())
}

/// Write a starter config with every default filled in.
pub async fn init(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        bail!(
            "{} already exists; pass --force to overwrite (a .bak copy is kept)",
            config_path.display()
        );
    }
    write_config(&starter_config(), config_path).await?;
    note_success(&format!("Wrote {}", config_path.display()));
    note_info("Set CLOVA_OCR_API_URL, CLOVA_OCR_SECRET_KEY and OPENAI_API_KEY, or edit the file.");
    Ok(())
}

fn starter_config() -> MenuScanConfig {
    apply_all_defaults(MenuScanConfig::default())
}
