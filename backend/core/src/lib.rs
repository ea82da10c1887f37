pub mod error;
pub mod traits;
pub mod types;

pub use error::{MenuScanError, Result};
pub use traits::{LlmProvider, LlmRequest, LlmResponse, TextExtractor};
pub use types::{
    DistillationResult, ExtractionRequest, ExtractionResult, Point, Quad, TextEntry,
};
