//! Introspection of uploaded files.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Bytes per reported kilobyte.
pub const BYTES_PER_KILOBYTE: f64 = 1024.0;

/// Largest upload accepted, in bytes (20 MiB).
pub const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Size of `byte_len` bytes in kilobytes, rounded to three decimals.
///
/// # Examples
/// ```
/// use people_api::domain::upload::size_in_kilobytes;
///
/// assert_eq!(size_in_kilobytes(2048), 2.0);
/// assert_eq!(size_in_kilobytes(1000), 0.977);
/// ```
pub fn size_in_kilobytes(byte_len: usize) -> f64 {
    let bytes = byte_len as f64;
    (bytes / BYTES_PER_KILOBYTE * 1000.0).round() / 1000.0
}

/// Summary of an uploaded file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UploadReport {
    /// Client-supplied file name.
    #[serde(rename = "Filename")]
    #[schema(example = "portrait.png")]
    pub filename: Option<String>,
    /// Declared content type.
    #[serde(rename = "Format")]
    #[schema(example = "image/png")]
    pub format: Option<String>,
    /// Size in kilobytes, rounded to three decimals.
    #[serde(rename = "Size(kb)")]
    #[schema(example = 2.0)]
    pub size_kb: f64,
}

impl UploadReport {
    /// Describe a file from its metadata and contents.
    pub fn describe(filename: Option<String>, format: Option<String>, contents: &[u8]) -> Self {
        Self {
            filename,
            format,
            size_kb: size_in_kilobytes(contents.len()),
        }
    }
}
