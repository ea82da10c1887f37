//! Menu understanding for MenuScan.
//!
//! OCR extraction over the CLOVA-style multipart protocol, distillation of
//! OCR lines into menu-item names through a chat completion provider, and
//! the analyzer that composes the two.

pub mod analysis;
pub mod distill;
pub mod line_clean;
pub mod mime;
pub mod ocr;
pub mod ocr_response;
pub mod providers;
pub mod recover;

#[cfg(test)]
mod test_support;

pub use analysis::{MenuAnalysis, MenuAnalyzer, ScanReport, format_file_size, validate_upload};
pub use distill::TextDistillationClient;
pub use line_clean::LineCleaner;
pub use ocr::OcrExtractionClient;
pub use providers::{MockProvider, OpenAiProvider};
pub use recover::recover_items;
