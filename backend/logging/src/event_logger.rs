//! Pipeline Event Logger
//!
//! Structured milestones of a scan (OCR done, distillation done, failure),
//! emitted on the `pipeline_events` target so they can be filtered apart.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::redact::redact_sensitive_data;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum PipelineEvent {
    OcrCompleted {
        file_name: String,
        entries: usize,
        boxed_entries: usize,
        latency_ms: u64,
    },
    DistillationCompleted {
        input_lines: usize,
        items: usize,
        latency_ms: u64,
    },
    Failed {
        stage: String,
        error_msg: String,
    },
}

#[derive(Debug, Serialize)]
pub struct EventLogEntry {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
    pub event: PipelineEvent,
}

pub struct EventLogger;

impl EventLogger {
    /// Logs a pipeline event, redacting error text first.
    pub fn log_event(request_id: &str, mut event: PipelineEvent) -> EventLogEntry {
        if let PipelineEvent::Failed { error_msg, .. } = &mut event {
            *error_msg = redact_sensitive_data(error_msg);
        }

        let entry = EventLogEntry {
            request_id: request_id.into(),
            timestamp: Utc::now(),
            event,
        };

        let json = serde_json::to_string(&entry).unwrap_or_default();
        match entry.event {
            PipelineEvent::Failed { .. } => {
                warn!(target: "pipeline_events", event = %json, "Pipeline event")
            }
            _ => info!(target: "pipeline_events", event = %json, "Pipeline event"),
        }
        entry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_message_is_redacted() {
        let entry = EventLogger::log_event(
            "1718000000000",
            PipelineEvent::Failed {
                stage: "distill".into(),
                error_msg: "401 for Bearer abc.def.ghi".into(),
            },
        );
        match entry.event {
            PipelineEvent::Failed { error_msg, .. } => {
                assert!(!error_msg.contains("abc.def.ghi"));
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn serializes_with_type_tag() {
        let entry = EventLogger::log_event(
            "1",
            PipelineEvent::DistillationCompleted {
                input_lines: 12,
                items: 4,
                latency_ms: 850,
            },
        );
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["event"]["type"], "DistillationCompleted");
        assert_eq!(json["event"]["items"], 4);
    }
}
