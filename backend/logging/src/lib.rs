//! Structured logging components for MenuScan.
//!
//! Handles subscriber setup (console + rolling NDJSON file), redaction of
//! credentials, and pipeline milestone events.

pub mod event_logger;
pub mod logger;
pub mod redact;

pub use event_logger::{EventLogEntry, EventLogger, PipelineEvent};
pub use logger::{init_logger, LoggerOptions};
pub use redact::redact_sensitive_data;
