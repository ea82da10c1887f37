//! Scan and menu-analysis composition.
//!
//! [`MenuAnalyzer`] validates an upload, runs OCR, and for menu analysis
//! hands the extracted lines to the distillation client. Each stage reports
//! a [`PipelineEvent`].

use std::sync::Arc;
use std::time::Instant;

use menuscan_core::{ExtractionRequest, MenuScanError, Result, TextEntry, TextExtractor};
use menuscan_logging::{EventLogger, PipelineEvent};
use serde::Serialize;
use tracing::info;

use crate::distill::TextDistillationClient;
use crate::mime::{is_image, resolve_content_type};

pub const MSG_NO_TEXT: &str = "No text was found in the image. Try a sharper photo.";
pub const MSG_NO_ITEMS: &str = "No menu items were found. Try another image.";

/// Plain OCR output for one image.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub file_name: String,
    pub file_size: String,
    pub extracted_texts: Vec<String>,
    pub text_boxes: Vec<TextEntry>,
    /// Every entry in reading order, boxed or not.
    #[serde(skip)]
    pub lines: Vec<TextEntry>,
}

/// OCR plus distilled menu items for one image.
#[derive(Debug, Clone, Serialize)]
pub struct MenuAnalysis {
    pub file_name: String,
    pub file_size: String,
    pub extracted_texts: Vec<String>,
    pub text_boxes: Vec<TextEntry>,
    pub menu_items: Vec<String>,
    pub message: String,
}

pub struct MenuAnalyzer {
    extractor: Arc<dyn TextExtractor>,
    distiller: TextDistillationClient,
}

impl MenuAnalyzer {
    pub fn new(extractor: Arc<dyn TextExtractor>, distiller: TextDistillationClient) -> Self {
        Self {
            extractor,
            distiller,
        }
    }

    /// Run OCR only.
    pub async fn scan(&self, request: &ExtractionRequest) -> Result<ScanReport> {
        let request_id = new_request_id();
        validate_upload(request)?;
        self.extract(&request_id, request).await
    }

    /// Run OCR, then distill menu items from the extracted lines.
    ///
    /// Distillation is skipped when OCR finds no text.
    pub async fn analyze(&self, request: &ExtractionRequest) -> Result<MenuAnalysis> {
        let request_id = new_request_id();
        validate_upload(request)?;
        let scan = self.extract(&request_id, request).await?;

        if scan.extracted_texts.is_empty() {
            info!(request_id = %request_id, "No text extracted; skipping distillation");
            return Ok(MenuAnalysis::from_scan(scan, Vec::new(), MSG_NO_TEXT.to_string()));
        }

        let start = Instant::now();
        let distilled = self
            .distiller
            .distill(&scan.extracted_texts)
            .await
            .inspect_err(|e| log_failure(&request_id, "distill", e))?;
        EventLogger::log_event(
            &request_id,
            PipelineEvent::DistillationCompleted {
                input_lines: scan.extracted_texts.len(),
                items: distilled.len(),
                latency_ms: start.elapsed().as_millis() as u64,
            },
        );

        let message = if distilled.is_empty() {
            MSG_NO_ITEMS.to_string()
        } else {
            format!("Found {} menu items.", distilled.len())
        };
        Ok(MenuAnalysis::from_scan(scan, distilled.items, message))
    }

    async fn extract(&self, request_id: &str, request: &ExtractionRequest) -> Result<ScanReport> {
        let file_name = request.filename.clone().unwrap_or_default();
        let start = Instant::now();
        let result = self
            .extractor
            .extract(request)
            .await
            .inspect_err(|e| log_failure(request_id, "ocr", e))?;

        let text_boxes: Vec<TextEntry> = result.boxed().cloned().collect();
        EventLogger::log_event(
            request_id,
            PipelineEvent::OcrCompleted {
                file_name: file_name.clone(),
                entries: result.len(),
                boxed_entries: text_boxes.len(),
                latency_ms: start.elapsed().as_millis() as u64,
            },
        );

        Ok(ScanReport {
            file_name,
            file_size: format_file_size(request.bytes.len() as u64),
            extracted_texts: result.texts(),
            text_boxes,
            lines: result.entries,
        })
    }
}

impl MenuAnalysis {
    fn from_scan(scan: ScanReport, menu_items: Vec<String>, message: String) -> Self {
        Self {
            file_name: scan.file_name,
            file_size: scan.file_size,
            extracted_texts: scan.extracted_texts,
            text_boxes: scan.text_boxes,
            menu_items,
            message,
        }
    }
}

/// Reject empty uploads and non-image content types before any remote call.
pub fn validate_upload(request: &ExtractionRequest) -> Result<()> {
    if request.bytes.is_empty() {
        return Err(MenuScanError::InvalidUpload("select an image file".into()));
    }
    if !is_image(&resolve_content_type(request)) {
        return Err(MenuScanError::InvalidUpload(
            "only image files can be uploaded".into(),
        ));
    }
    Ok(())
}

/// Human-readable size: bytes below 1 KiB, one decimal of KB below 1 MiB, else MB.
pub fn format_file_size(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = 1024 * 1024;
    if bytes < KIB {
        format!("{bytes} bytes")
    } else if bytes < MIB {
        format!("{:.1} KB", bytes as f64 / KIB as f64)
    } else {
        format!("{:.1} MB", bytes as f64 / MIB as f64)
    }
}

fn new_request_id() -> String {
    chrono::Utc::now().timestamp_millis().to_string()
}

fn log_failure(request_id: &str, stage: &str, error: &MenuScanError) {
    EventLogger::log_event(
        request_id,
        PipelineEvent::Failed {
            stage: stage.to_string(),
            error_msg: error.to_string(),
        },
    );
}
