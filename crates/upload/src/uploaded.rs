//! A [`File`] that resulted from an upload.

use crate::record::{UploadError, UploadRecord};
use filekit_files::File;
use serde_json::Value;

/// An uploaded file: the file itself plus the outcome of its upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    file: File,
    uploaded: bool,
    replaced: bool,
    error: Option<UploadError>,
}

impl UploadedFile {
    pub fn new(name: &str, directory: &str) -> Self {
        Self {
            file: File::new(name, directory),
            uploaded: false,
            replaced: false,
            error: None,
        }
    }

    /// Builds the file described by an upload record.
    pub fn from_record(record: &UploadRecord) -> Self {
        let mut uploaded = Self::new(&record.name, &record.upload_path);
        uploaded.file.set_mime(&record.mime);
        uploaded.uploaded = record.uploaded;
        uploaded.replaced = record.replaced;
        uploaded.error = record.error.clone();
        uploaded
    }

    pub fn file(&self) -> &File {
        &self.file
    }

    pub fn file_mut(&mut self) -> &mut File {
        &mut self.file
    }

    pub fn into_file(self) -> File {
        self.file
    }

    pub fn is_uploaded(&self) -> bool {
        self.uploaded
    }

    pub fn set_uploaded(&mut self, uploaded: bool) {
        self.uploaded = uploaded;
    }

    /// Whether an existing file with the same name was replaced.
    pub fn is_replace(&self) -> bool {
        self.replaced
    }

    pub fn set_replace(&mut self, replaced: bool) {
        self.replaced = replaced;
    }

    pub fn error(&self) -> Option<&UploadError> {
        self.error.as_ref()
    }

    pub fn set_error(&mut self, error: Option<UploadError>) {
        self.error = error;
    }

    /// The file's JSON projection extended with `uploaded`, `isReplace` and `uploadError`.
    pub fn to_json(&self) -> Value {
        let mut json = self.file.to_json();
        if let Value::Object(map) = &mut json {
            map.insert("uploaded".into(), Value::Bool(self.uploaded));
            map.insert("isReplace".into(), Value::Bool(self.replaced));
            let code = self.error.as_ref().map(|e| e.code().into_owned());
            map.insert("uploadError".into(), Value::String(code.unwrap_or_default()));
        }
        json
    }
}

impl std::fmt::Display for UploadedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_record() {
        let mut record = UploadRecord::new("photo.png", "10", "uploads");
        record.uploaded = true;
        record.replaced = true;

        let uploaded = UploadedFile::from_record(&record);
        assert_eq!(uploaded.file().name(), "photo.png");
        assert_eq!(uploaded.file().directory(), "uploads");
        assert_eq!(uploaded.file().mime(), "image/png");
        assert!(uploaded.is_uploaded());
        assert!(uploaded.is_replace());
        assert_eq!(uploaded.error(), None);
    }

    #[test]
    fn test_to_json_adds_upload_fields() {
        let record =
            UploadRecord::new("a.txt", "1", "uploads").rejected(UploadError::NotAllowedType);
        let json = UploadedFile::from_record(&record).to_json();

        assert_eq!(json["name"], "a.txt");
        assert_eq!(json["mime"], "text/plain");
        assert_eq!(json["id"], -1);
        assert_eq!(json["uploaded"], false);
        assert_eq!(json["isReplace"], false);
        assert_eq!(json["uploadError"], "not_allowed_type");
    }

    #[test]
    fn test_setters() {
        let mut uploaded = UploadedFile::new("a.txt", "dir");
        uploaded.set_uploaded(true);
        uploaded.set_replace(true);
        uploaded.set_error(Some(UploadError::Transport(3)));
        uploaded.file_mut().set_id("9");

        assert!(uploaded.is_uploaded());
        assert!(uploaded.is_replace());
        assert_eq!(uploaded.to_json()["uploadError"], "3");
        assert_eq!(uploaded.into_file().id().to_string(), "9");
    }
}
