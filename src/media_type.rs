//! Media type classification for staged images
//!
//! The file extension decides first. Files without a recognized extension
//! are sniffed by their leading bytes, and anything still unknown is
//! reported as `application/octet-stream` rather than rejected.

use std::path::Path;

use crate::document::OCTET_STREAM_MIME_TYPE;

/// Media type for a known image extension
pub fn mime_type_from_extension(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    let mime = match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        _ => return None,
    };
    Some(mime)
}

/// Media type guessed from the file contents
pub fn mime_type_from_contents(data: &[u8]) -> Option<&'static str> {
    image::guess_format(data)
        .ok()
        .map(|format| format.to_mime_type())
}

/// Classify a staged file, never failing
pub fn classify(path: &Path, data: &[u8]) -> &'static str {
    mime_type_from_extension(path)
        .or_else(|| mime_type_from_contents(data))
        .unwrap_or(OCTET_STREAM_MIME_TYPE)
}

/// Lowercase extension with its leading dot, `.png` when the file has none
pub fn output_extension(path: &Path) -> String {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if !ext.is_empty() => format!(".{}", ext.to_lowercase()),
        _ => ".png".to_string(),
    }
}
