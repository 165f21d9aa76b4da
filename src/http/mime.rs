//! Content types served, keyed by file extension.
//!
//! The table is closed: files with any other extension are refused with
//! 415 Unsupported Media Type.

use std::path::Path;

pub static CONTENT_TYPES: &[(&str, &str)] = &[
    (".html", "text/html"),
    (".js", "application/javascript"),
    (".css", "text/css"),
    (".jpeg", "image/jpeg"),
    (".jpg", "image/jpeg"),
    (".png", "image/png"),
    (".gif", "image/gif"),
    (".swf", "application/x-shockwave-flash"),
    (".txt", "text/plain"),
];

/// Looks up a content type by extension, dot included. Case-sensitive.
///
/// # Example
///
/// ```
/// # use static_httpd::http::mime::content_type_for;
/// assert_eq!(content_type_for(".css"), Some("text/css"));
/// assert_eq!(content_type_for(".conf"), None);
/// ```
pub fn content_type_for(extension: &str) -> Option<&'static str> {
    CONTENT_TYPES
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, mime)| *mime)
}

/// The extension of `path` with its leading dot, or an empty string.
pub fn suffix(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}
