//! Image file encoding for button icons.

use std::fs;
use std::path::Path;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use dg_base::DeckError;

/// MIME type guessed from the file extension, case-insensitive.
pub fn mime_for_path(path: &Path) -> &'static str {
    let ext = path.extension().and_then(|e| e.to_str()).map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("bmp") => "image/bmp",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        _ => "application/octet-stream",
    }
}

/// Bare base64 of `bytes`, standard alphabet with padding.
pub fn encode_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// `data:<mime>;base64,<payload>`
pub fn encode_data_uri(bytes: &[u8], mime: &str) -> String {
    format!("data:{};base64,{}", mime, encode_base64(bytes))
}

/// Read an image file and encode it as a data URI.
pub fn read_icon_data_uri(path: &Path) -> Result<String, DeckError> {
    let bytes = fs::read(path).map_err(|e| DeckError::io(path.display().to_string(), e))?;
    Ok(encode_data_uri(&bytes, mime_for_path(path)))
}
