//! Base64 data URIs: export an image file as `data:<mime>;base64,...`, and restore an
//! image that was embedded in a source file as a string constant.

use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::ImageFormat;
use regex::Regex;

use crate::error::{IconError, IconResult};

/// Name of the constant the web front-end embeds its logo under.
pub const DEFAULT_CONSTANT: &str = "LOGO_BASE64";

/// MIME type for `path`, from its image extension; `application/octet-stream` otherwise.
pub fn mime_for(path: &Path) -> &'static str {
    ImageFormat::from_path(path)
        .map(|format| format.to_mime_type())
        .unwrap_or("application/octet-stream")
}

/// `data:<mime>;base64,<payload>` for `bytes`.
pub fn encode_data_uri(bytes: &[u8], mime: &str) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Find `export const <name> = '<payload>';` in `source` and decode the payload.
///
/// A `data:...;base64,` prefix on the payload is stripped before decoding.
pub fn extract_embedded_image(source: &str, name: &str) -> IconResult<Vec<u8>> {
    let pattern = format!(r"export const {} = '(.*?)';", regex::escape(name));
    let re = Regex::new(&pattern)
        .map_err(|e| IconError::asset("restore embedded image", e.to_string()))?;

    let payload = re
        .captures(source)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| {
            IconError::asset(
                "restore embedded image",
                format!("no `export const {} = '...';` found", name),
            )
        })?;

    let encoded = match payload.split_once("base64,") {
        Some((_, rest)) => rest,
        None => payload,
    };

    STANDARD
        .decode(encoded.trim())
        .map_err(|e| IconError::asset("restore embedded image", format!("invalid base64: {}", e)))
}
