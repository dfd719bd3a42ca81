//! Image attachments travel inside message bodies as data URLs.

use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as B64;

use crate::error::{ClientError, Result};

pub const ACCEPTED_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/jpg"];

const NOT_AN_IMAGE: &str = "provided file is not a png, jpg or jpeg image.";

/// Picks the image MIME type from the file extension.
pub fn mime_for_path(path: &Path) -> Result<&'static str> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png") => Ok("image/png"),
        Some("jpg") => Ok("image/jpg"),
        Some("jpeg") => Ok("image/jpeg"),
        _ => Err(ClientError::Validation(NOT_AN_IMAGE.into())),
    }
}

pub fn data_url(mime: &str, bytes: &[u8]) -> Result<String> {
    if !ACCEPTED_TYPES.contains(&mime) {
        return Err(ClientError::Validation(NOT_AN_IMAGE.into()));
    }
    Ok(format!("data:{};base64,{}", mime, B64.encode(bytes)))
}
