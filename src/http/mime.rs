//! MIME type detection based on file extensions.

/// Fallback for unrecognized suffixes.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

const CONTENT_TYPES: &[(&str, &str)] = &[
    (".htm", "text/html"),
    (".html", "text/html"),
    (".gif", "image/gif"),
    (".png", "image/png"),
    (".jpg", "image/jpeg"),
    (".jpeg", "image/jpeg"),
];

/// Returns the media type for a file name, matching the suffix case-insensitively.
///
/// # Example
///
/// ```
/// # use labserver::http::mime::content_type;
/// assert_eq!(content_type("INDEX.HTML"), "text/html");
/// assert_eq!(content_type("notes.txt"), "application/octet-stream");
/// ```
pub fn content_type(file_name: &str) -> &'static str {
    let name = file_name.to_ascii_lowercase();

    CONTENT_TYPES
        .iter()
        .find(|(suffix, _)| name.ends_with(suffix))
        .map(|(_, ty)| *ty)
        .unwrap_or(DEFAULT_CONTENT_TYPE)
}
