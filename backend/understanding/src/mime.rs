//! Content-type inference for uploaded images.

use menuscan_core::ExtractionRequest;

/// Content type assumed when neither the caller nor the filename says otherwise.
pub const FALLBACK_CONTENT_TYPE: &str = "image/jpeg";

/// Guess a MIME type from a filename's extension.
pub fn infer_content_type(filename: &str) -> Option<&'static str> {
    let (_, ext) = filename.rsplit_once('.')?;
    let mime = match ext.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png"          => "image/png",
        "gif"          => "image/gif",
        "webp"         => "image/webp",
        "bmp"          => "image/bmp",
        "tiff" | "tif" => "image/tiff",
        "heic"         => "image/heic",

        "pdf"          => "application/pdf",
        "txt"          => "text/plain",
        "html" | "htm" => "text/html",
        "json"         => "application/json",

        _ => return None,
    };
    Some(mime)
}

/// The declared content type, else one inferred from the filename, else
/// [`FALLBACK_CONTENT_TYPE`].
pub fn resolve_content_type(request: &ExtractionRequest) -> String {
    request
        .content_type
        .as_deref()
        .map(str::trim)
        .filter(|ct| !ct.is_empty())
        .or_else(|| request.filename.as_deref().and_then(infer_content_type))
        .unwrap_or(FALLBACK_CONTENT_TYPE)
        .to_string()
}

/// Whether a MIME type is for an image.
pub fn is_image(mime: &str) -> bool {
    mime.trim().to_ascii_lowercase().starts_with("image/")
}
