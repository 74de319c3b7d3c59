//! Upload validation.
//!
//! Mirrors the backend's accepted document types so obviously bad
//! uploads are rejected before any bytes leave the client.

use crate::error::{DomainError, DomainResult};

/// Maximum accepted upload size: 10 MiB.
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Content types the analysis backend can parse.
pub const ALLOWED_CONTENT_TYPES: [&str; 3] = [
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

/// Validates a candidate upload.
///
/// # Errors
///
/// Returns [`DomainError::EmptyFileName`], [`DomainError::FileTooLarge`],
/// or [`DomainError::UnsupportedFileType`] when the file cannot be
/// uploaded.
pub fn validate_upload(file_name: &str, content_type: &str, size: u64) -> DomainResult<()> {
    if file_name.trim().is_empty() {
        return Err(DomainError::EmptyFileName);
    }

    if size > MAX_UPLOAD_BYTES {
        return Err(DomainError::FileTooLarge {
            size,
            limit: MAX_UPLOAD_BYTES,
        });
    }

    if !ALLOWED_CONTENT_TYPES.contains(&content_type) {
        return Err(DomainError::UnsupportedFileType(content_type.to_string()));
    }

    Ok(())
}

/// Formats a byte count for display, e.g. `2.5 MB`.
#[must_use]
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    if (value - value.trunc()).abs() < f64::EPSILON {
        format!("{} {}", value as u64, UNITS[unit])
    } else {
        format!("{:.2} {}", value, UNITS[unit])
    }
}
