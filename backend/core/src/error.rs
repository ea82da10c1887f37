use thiserror::Error;

/// Top-level error type for the MenuScan pipeline.
#[derive(Debug, Error)]
pub enum MenuScanError {
    /// An endpoint or credential the client needs is not set.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The remote service answered with a non-success status.
    #[error("{service} returned {status}: {body}")]
    Service {
        service: String,
        status: u16,
        body: String,
    },

    /// The request could not be sent or the response could not be read.
    #[error("{service} I/O error: {message}")]
    Io { service: String, message: String },

    /// The upload was rejected before any remote call.
    #[error("invalid upload: {0}")]
    InvalidUpload(String),
}

pub type Result<T> = std::result::Result<T, MenuScanError>;

impl MenuScanError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn io(service: impl Into<String>, message: impl ToString) -> Self {
        Self::Io {
            service: service.into(),
            message: message.to_string(),
        }
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    pub fn is_service(&self) -> bool {
        matches!(self, Self::Service { .. })
    }

    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    /// HTTP status of a `Service` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Service { status, .. } => Some(*status),
            _ => None,
        }
    }
}
