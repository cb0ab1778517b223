//! Static extension → MIME type registry.
//!
//! Lookups are case-insensitive and fall back to [`DEFAULT_MIME`]. The table is ordered, and
//! reverse lookups ([`extension_for`]) return the first extension registered for a type, so
//! `image/jpeg` maps back to `jpeg` and `text/plain` maps back to `txt`.

use crate::constants::DEFAULT_MIME;

/// Known extensions and their MIME types, in registration order.
pub const TYPES: &[(&str, &str)] = &[
    // audio and video
    ("avi", "video/avi"),
    ("3gp", "video/3gpp"),
    ("mp4", "video/mp4"),
    ("mov", "video/quicktime"),
    ("wmv", "video/x-ms-wmv"),
    ("flv", "video/x-flv"),
    ("ogv", "video/ogg"),
    ("mpeg", "video/mpeg"),
    ("midi", "audio/midi"),
    ("mid", "audio/midi"),
    ("acc", "audio/aac"),
    ("mp3", "audio/mpeg"),
    ("wav", "audio/wav"),
    ("oga", "audio/ogg"),
    // images
    ("jpeg", "image/jpeg"),
    ("jpg", "image/jpeg"),
    ("png", "image/png"),
    ("bmp", "image/bmp"),
    ("ico", "image/x-icon"),
    ("tiff", "image/tiff"),
    ("svg", "image/svg+xml"),
    ("psd", "image/vnd.adobe.photoshop"),
    ("gif", "image/gif"),
    // documents
    ("pdf", "application/pdf"),
    ("rtf", "application/rtf"),
    ("doc", "application/msword"),
    (
        "docx",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    ),
    ("xls", "application/vnd.ms-excel"),
    ("ppt", "application/vnd.ms-powerpoint"),
    (
        "pptx",
        "application/vnd.openxmlformats-officedocument.presentationml.presentation",
    ),
    (
        "xlsx",
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    ),
    // text
    ("txt", "text/plain"),
    ("php", "text/plain"),
    ("log", "text/plain"),
    ("ini", "text/plain"),
    ("css", "text/css"),
    ("js", "text/javascript"),
    ("asm", "text/x-asm"),
    ("java", "text/x-java-source"),
    ("htaccess", "application/x-extension-htaccess"),
    ("asp", "text/asp"),
    ("c", "text/x-c"),
    ("cpp", "text/x-c"),
    ("csv", "text/csv"),
    ("htm", "text/html"),
    ("html", "text/html"),
    // archives, fonts and everything else
    ("sql", "application/sql"),
    ("jar", "application/java-archive"),
    ("zip", "application/zip"),
    ("rar", "application/x-rar-compressed"),
    ("tar", "application/x-tar"),
    ("7z", "application/x-7z-compressed"),
    ("exe", "application/vnd.microsoft.portable-executable"),
    ("bin", "application/octet-stream"),
    ("woff", "font/woff"),
    ("woff2", "font/woff2"),
    ("otf", "font/otf"),
    ("ttf", "font/ttf"),
    ("ai", "application/postscript"),
    ("swf", "application/x-shockwave-flash"),
    ("ogx", "application/ogg"),
];

/// Returns the MIME type registered for `extension`.
///
/// The extension is given without its dot. Unknown or empty extensions yield
/// `application/octet-stream`.
pub fn lookup(extension: &str) -> &'static str {
    if extension.is_empty() {
        return DEFAULT_MIME;
    }
    TYPES
        .iter()
        .find(|(ext, _)| ext.eq_ignore_ascii_case(extension))
        .map(|(_, mime)| *mime)
        .unwrap_or(DEFAULT_MIME)
}

/// Returns the first extension registered for `mime`, if any.
pub fn extension_for(mime: &str) -> Option<&'static str> {
    TYPES
        .iter()
        .find(|(_, registered)| *registered == mime)
        .map(|(ext, _)| *ext)
}

/// Best-effort MIME detection from the leading bytes of some content.
///
/// This inspects magic numbers only and should not be considered authoritative. Returns
/// `None` if the content is not recognised.
pub fn sniff(content: &[u8]) -> Option<&'static str> {
    infer::get(content).map(|kind| kind.mime_type())
}
