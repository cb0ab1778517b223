//! Per-file upload outcomes.

use crate::constants::{
    ALREADY_UPLOADED, NOT_ALLOWED_TYPE, NO_SUCH_DIR, REPLACE_MOVE_FAILED, TEMP_FILE_NOT_MOVED,
};
use filekit_files::{mime, path};
use serde::{Serialize, Serializer};
use std::borrow::Cow;

/// Why a submitted file was not placed in the upload directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    /// The transport reported a failure; carries its numeric status code.
    Transport(u16),
    NotAllowedType,
    NoSuchDir,
    TempFileNotMoved,
    AlreadyUploaded,
    ReplaceMoveFailed,
}

impl UploadError {
    /// The error code stored in a record's `upload-error` field.
    pub fn code(&self) -> Cow<'static, str> {
        match self {
            UploadError::Transport(code) => Cow::Owned(code.to_string()),
            UploadError::NotAllowedType => Cow::Borrowed(NOT_ALLOWED_TYPE),
            UploadError::NoSuchDir => Cow::Borrowed(NO_SUCH_DIR),
            UploadError::TempFileNotMoved => Cow::Borrowed(TEMP_FILE_NOT_MOVED),
            UploadError::AlreadyUploaded => Cow::Borrowed(ALREADY_UPLOADED),
            UploadError::ReplaceMoveFailed => Cow::Borrowed(REPLACE_MOVE_FAILED),
        }
    }
}

impl std::fmt::Display for UploadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.code())
    }
}

impl Serialize for UploadError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.code())
    }
}

fn serialize_optional_error<S: Serializer>(
    error: &Option<UploadError>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match error {
        Some(error) => error.serialize(serializer),
        None => serializer.serialize_str(""),
    }
}

/// The outcome of processing one submitted file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadRecord {
    pub name: String,
    pub size: u64,
    #[serde(rename = "upload-path")]
    pub upload_path: String,
    #[serde(rename = "upload-error", serialize_with = "serialize_optional_error")]
    pub error: Option<UploadError>,
    #[serde(rename = "is-exist")]
    pub exists: bool,
    #[serde(rename = "is-replace")]
    pub replaced: bool,
    pub mime: String,
    pub uploaded: bool,
}

impl UploadRecord {
    /// Starts a record for a declared name and size, before any policy is applied.
    ///
    /// The MIME type comes from the name's suffix.
    pub fn new(name: &str, declared_size: &str, upload_path: &str) -> Self {
        let mime = mime::lookup(path::extension_of(name).unwrap_or(""));
        Self {
            name: name.to_owned(),
            size: sanitize_size(declared_size),
            upload_path: upload_path.to_owned(),
            error: None,
            exists: false,
            replaced: false,
            mime: mime.to_owned(),
            uploaded: false,
        }
    }

    /// Marks the record as not uploaded because of `error`.
    pub fn rejected(mut self, error: UploadError) -> Self {
        self.uploaded = false;
        self.error = Some(error);
        self
    }

    /// The error code, or an empty string if there was no error.
    pub fn error_code(&self) -> Cow<'static, str> {
        self.error
            .as_ref()
            .map_or(Cow::Borrowed(""), UploadError::code)
    }
}

/// Keeps only the digits of a declared size. Anything unparseable counts as zero.
fn sanitize_size(declared: &str) -> u64 {
    let digits: String = declared.chars().filter(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_defaults() {
        let record = UploadRecord::new("report.pdf", "1024", "/srv/uploads");
        assert_eq!(record.name, "report.pdf");
        assert_eq!(record.size, 1024);
        assert_eq!(record.mime, "application/pdf");
        assert_eq!(record.error, None);
        assert_eq!(record.error_code(), "");
        assert!(!record.uploaded && !record.exists && !record.replaced);
    }

    #[test]
    fn test_name_without_suffix_gets_default_mime() {
        let record = UploadRecord::new("README", "1", "/srv");
        assert_eq!(record.mime, "application/octet-stream");
    }

    #[test]
    fn test_size_is_sanitised() {
        assert_eq!(sanitize_size("51"), 51);
        assert_eq!(sanitize_size(" 1,024 bytes"), 1024);
        assert_eq!(sanitize_size("-7"), 7);
        assert_eq!(sanitize_size("lots"), 0);
        assert_eq!(sanitize_size(""), 0);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(UploadError::Transport(4).code(), "4");
        assert_eq!(UploadError::NotAllowedType.code(), "not_allowed_type");
        assert_eq!(UploadError::NoSuchDir.to_string(), "no_such_dir");
        assert_eq!(UploadError::TempFileNotMoved.code(), "temp_file_not_moved");
        assert_eq!(UploadError::AlreadyUploaded.code(), "already_uploaded");
        assert_eq!(UploadError::ReplaceMoveFailed.code(), "replace_move_failed");
    }

    #[test]
    fn test_record_json_keys() {
        let record = UploadRecord::new("a.txt", "3", "/srv").rejected(UploadError::AlreadyUploaded);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["name"], "a.txt");
        assert_eq!(json["size"], 3);
        assert_eq!(json["upload-path"], "/srv");
        assert_eq!(json["upload-error"], "already_uploaded");
        assert_eq!(json["is-exist"], false);
        assert_eq!(json["is-replace"], false);
        assert_eq!(json["mime"], "text/plain");
        assert_eq!(json["uploaded"], false);

        let clean = serde_json::to_value(UploadRecord::new("a.txt", "3", "/srv")).unwrap();
        assert_eq!(clean["upload-error"], "");
    }
}
