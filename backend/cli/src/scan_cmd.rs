//! `menuscan ocr` and `menuscan menu`.

use std::path::Path;

use anyhow::{Context, Result};
use menuscan_config::MenuScanConfig;
use menuscan_core::ExtractionRequest;
use tracing::debug;

use crate::config::{build_analyzer, ensure_valid};
use crate::terminal_output::{render_menu, render_scan};

/// Read an image from disk into an extraction request named after the file.
pub async fn read_upload(path: &Path, content_type: Option<String>) -> Result<ExtractionRequest> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read image: {}", path.display()))?;
    let mut request = ExtractionRequest::new(bytes);
    if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
        request = request.with_filename(name);
    }
    if let Some(content_type) = content_type {
        request = request.with_content_type(content_type);
    }
    debug!(path = %path.display(), bytes = request.bytes.len(), "Read upload");
    Ok(request)
}

pub async fn run_ocr(
    config: &MenuScanConfig,
    image: &Path,
    content_type: Option<String>,
    json: bool,
) -> Result<()> {
    ensure_valid(config)?;
    let request = read_upload(image, content_type).await?;
    let report = build_analyzer(config)?.scan(&request).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_scan(&report));
    }
    Ok(())
}

pub async fn run_menu(
    config: &MenuScanConfig,
    image: &Path,
    content_type: Option<String>,
    json: bool,
) -> Result<()> {
    ensure_valid(config)?;
    let request = read_upload(image, content_type).await?;
    let analysis = build_analyzer(config)?.analyze(&request).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        print!("{}", render_menu(&analysis));
    }
    Ok(())
}
