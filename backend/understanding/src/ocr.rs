//! OCR extraction client.
//!
//! Sends an image to the OCR service as `multipart/form-data` with two parts:
//! `message` (a JSON envelope naming the image and its format) and `file`
//! (the raw bytes). Authentication is the shared `X-OCR-SECRET` header.

use async_trait::async_trait;
use menuscan_core::{ExtractionRequest, ExtractionResult, MenuScanError, Result, TextExtractor};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use serde_json::json;
use tracing::{debug, info};

use crate::mime::resolve_content_type;
use crate::ocr_response::parse_ocr_response;

/// Service label used in errors and logs.
pub const OCR_SERVICE: &str = "ocr";

/// Protocol version sent in the message envelope.
pub const OCR_API_VERSION: &str = "V2";

/// Format sent when the filename has no extension.
pub const DEFAULT_IMAGE_FORMAT: &str = "jpg";

/// Image name used when the upload carries no filename.
const DEFAULT_IMAGE_NAME: &str = "image";

const SECRET_HEADER: &str = "X-OCR-SECRET";

pub struct OcrExtractionClient {
    client: Client,
    api_url: String,
    secret_key: String,
}

impl OcrExtractionClient {
    pub fn new(api_url: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_url: api_url.into(),
            secret_key: secret_key.into(),
        }
    }

    /// Use a preconfigured HTTP client (proxy, timeouts, ...).
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Extract text entries from an image.
    ///
    /// Fails with a configuration error before any network call when the
    /// endpoint or secret is empty.
    pub async fn extract_image(&self, request: &ExtractionRequest) -> Result<ExtractionResult> {
        self.ensure_configured()?;

        let name = request
            .filename
            .clone()
            .unwrap_or_else(|| DEFAULT_IMAGE_NAME.to_string());
        let format = format_hint(request.filename.as_deref());
        let content_type = resolve_content_type(request);
        let message = build_message(&name, &format, chrono::Utc::now().timestamp_millis());

        info!(
            file = %name,
            format = %format,
            content_type = %content_type,
            bytes = request.bytes.len(),
            "Sending image to OCR service"
        );

        let form = build_form(message, request.bytes.clone(), &name, &content_type)?;

        let response = self
            .client
            .post(&self.api_url)
            .header(SECRET_HEADER, &self.secret_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| MenuScanError::io(OCR_SERVICE, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| MenuScanError::io(OCR_SERVICE, e))?;

        if status != StatusCode::OK {
            return Err(MenuScanError::Service {
                service: OCR_SERVICE.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let result = parse_ocr_response(&body)?;
        debug!(
            entries = result.len(),
            boxed = result.boxed().count(),
            "Parsed OCR response"
        );
        Ok(result)
    }

    fn ensure_configured(&self) -> Result<()> {
        if self.api_url.trim().is_empty() || self.secret_key.trim().is_empty() {
            return Err(MenuScanError::configuration(
                "OCR endpoint and secret key are not set; configure ocr.apiUrl/ocr.secretKey \
                 or CLOVA_OCR_API_URL/CLOVA_OCR_SECRET_KEY",
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl TextExtractor for OcrExtractionClient {
    async fn extract(&self, request: &ExtractionRequest) -> Result<ExtractionResult> {
        self.extract_image(request).await
    }
}

/// Lowercased filename extension, or [`DEFAULT_IMAGE_FORMAT`].
pub fn format_hint(filename: Option<&str>) -> String {
    filename
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext.trim())
        .filter(|ext| !ext.is_empty())
        .map(str::to_lowercase)
        .unwrap_or_else(|| DEFAULT_IMAGE_FORMAT.to_string())
}

/// The `message` part: a JSON envelope correlating the request by wall-clock time.
///
/// `requestId` is only a correlation id; two requests in the same millisecond share it.
pub fn build_message(name: &str, format: &str, now_ms: i64) -> String {
    json!({
        "version": OCR_API_VERSION,
        "requestId": now_ms.to_string(),
        "timestamp": now_ms,
        "images": [{ "format": format, "name": name }],
    })
    .to_string()
}

fn build_form(message: String, bytes: Vec<u8>, name: &str, content_type: &str) -> Result<Form> {
    let message_part = Part::text(message)
        .mime_str("text/plain; charset=UTF-8")
        .map_err(|e| MenuScanError::io(OCR_SERVICE, e))?;
    let file_part = Part::bytes(bytes)
        .file_name(name.to_string())
        .mime_str(content_type)
        .map_err(|_| MenuScanError::InvalidUpload(format!("invalid content type '{content_type}'")))?;
    Ok(Form::new().part("message", message_part).part("file", file_part))
}
