//! The upload coordinator.
//!
//! An [`Uploader`] owns an upload directory, an allow-list of extensions and the name of the
//! form field that carries files. [`Uploader::upload`] walks every file submitted under that
//! field, in payload order, and turns each one into an [`UploadRecord`]:
//!
//! 1. a failed transport status is recorded as its numeric code
//! 2. an extension outside the allow-list is rejected with `not_allowed_type`
//! 3. a missing upload directory is rejected with `no_such_dir`
//! 4. otherwise the file is transferred, unless a file with the same name is already there
//!    and replacing was not requested (`already_uploaded`)
//!
//! A single bad file never aborts the batch; only configuration problems are returned as
//! errors.

use crate::config::UploaderConfig;
use crate::constants::{DEFAULT_FIELD_NAME, NO_ACTION_MESSAGE, UPLOAD_METHOD};
use crate::payload::{RequestPayload, SubmittedFile};
use crate::record::{UploadError, UploadRecord};
use crate::transfer::{MoveTransfer, TransferStrategy};
use crate::uploaded::UploadedFile;
use filekit_files::{path, FileError, FileResult};
use filekit_types::{Extension, NonEmptyText};
use serde_json::{json, Value};
use std::path::Path;

#[derive(Debug)]
pub struct Uploader {
    upload_dir: String,
    extensions: Vec<Extension>,
    field_name: String,
    status_message: String,
    records: Vec<UploadRecord>,
    transfer: Box<dyn TransferStrategy>,
}

impl Default for Uploader {
    fn default() -> Self {
        Self {
            upload_dir: String::new(),
            extensions: Vec::new(),
            field_name: DEFAULT_FIELD_NAME.to_owned(),
            status_message: NO_ACTION_MESSAGE.to_owned(),
            records: Vec::new(),
            transfer: Box::new(MoveTransfer),
        }
    }
}

impl Uploader {
    /// Creates an uploader for `upload_dir` accepting `extensions`.
    ///
    /// An empty `upload_dir` leaves the directory unset. Malformed extensions are skipped.
    ///
    /// # Errors
    ///
    /// Returns `FileError::InvalidUploadDirectory` if `upload_dir` is given but is not an
    /// existing directory.
    pub fn new(upload_dir: &str, extensions: &[&str]) -> FileResult<Self> {
        let mut uploader = Self::default();
        if !upload_dir.trim().is_empty() {
            uploader.set_upload_dir(upload_dir)?;
        }
        uploader.add_extensions(extensions.iter().copied());
        Ok(uploader)
    }

    /// Creates an uploader from startup configuration.
    pub fn from_config(config: &UploaderConfig) -> FileResult<Self> {
        let mut uploader = Self::new(config.upload_dir().unwrap_or(""), &[])?;
        uploader.add_extensions(config.allowed_extensions());
        uploader.set_field_name(config.field_name());
        Ok(uploader)
    }

    /// Replaces the strategy used to place temporary files at their destination.
    pub fn with_transfer(mut self, transfer: impl TransferStrategy + 'static) -> Self {
        self.transfer = Box::new(transfer);
        self
    }

    pub fn upload_dir(&self) -> &str {
        &self.upload_dir
    }

    /// Sets the upload directory.
    ///
    /// The directory is normalised first. If it is not a directory as given, it is tried
    /// again as an absolute path.
    ///
    /// # Errors
    ///
    /// Returns `FileError` if the directory is empty or does not resolve to an existing
    /// directory. The previous directory is kept in both cases.
    pub fn set_upload_dir(&mut self, dir: &str) -> FileResult<()> {
        let normalized = path::normalize(dir);
        if normalized.is_empty() {
            return Err(FileError::EmptyUploadDirectory);
        }

        let resolved = if path::is_directory(&normalized, false) {
            normalized
        } else {
            let absolute = format!("{}{}", path::SEPARATOR, normalized);
            if !path::is_directory(&absolute, false) {
                return Err(FileError::InvalidUploadDirectory(dir.to_owned()));
            }
            absolute
        };

        tracing::debug!(directory = %resolved, "upload directory set");
        self.upload_dir = resolved;
        Ok(())
    }

    /// Returns the allow-list in insertion order.
    pub fn extensions(&self) -> &[Extension] {
        &self.extensions
    }

    /// Adds an extension to the allow-list.
    ///
    /// Leading dots are stripped. Returns `false` and stores nothing if what remains is empty
    /// or contains characters other than letters, digits and `_`.
    pub fn add_extension(&mut self, ext: &str) -> bool {
        match Extension::parse(ext) {
            Ok(ext) => {
                self.extensions.push(ext);
                true
            }
            Err(e) => {
                tracing::debug!(extension = ext, error = %e, "rejected extension");
                false
            }
        }
    }

    /// Adds several extensions, reporting whether each one was accepted, in input order.
    pub fn add_extensions<I, S>(&mut self, exts: I) -> Vec<(String, bool)>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        exts.into_iter()
            .map(|ext| {
                let ext = ext.as_ref();
                (ext.to_owned(), self.add_extension(ext))
            })
            .collect()
    }

    /// Removes the first allow-list entry equal to `ext` (leading dots ignored).
    pub fn remove_extension(&mut self, ext: &str) -> bool {
        let ext = ext.trim_start_matches('.');
        match self.extensions.iter().position(|e| e.as_str() == ext) {
            Some(idx) => {
                self.extensions.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Returns the form field that files are read from.
    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    /// Sets the form field name. Blank names are ignored; others are trimmed.
    pub fn set_field_name(&mut self, name: &str) {
        if let Ok(name) = NonEmptyText::new(name) {
            self.field_name = name.as_str().to_owned();
        }
    }

    /// The transport status message of the last processed file.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Records produced by the last upload.
    pub fn records(&self) -> &[UploadRecord] {
        &self.records
    }

    /// Records produced by the last upload, as uploaded files.
    pub fn files(&self) -> Vec<UploadedFile> {
        self.records.iter().map(UploadedFile::from_record).collect()
    }

    /// Processes every file submitted in `payload`.
    ///
    /// Previous records are discarded first. Requests that are not `POST`, and requests
    /// without files under the field name, produce no records.
    ///
    /// # Errors
    ///
    /// Returns `FileError::UploadPathNotSet` if no upload directory is set.
    pub fn upload(
        &mut self,
        payload: &dyn RequestPayload,
        replace_if_exist: bool,
    ) -> FileResult<&[UploadRecord]> {
        self.records.clear();

        if self.upload_dir.is_empty() {
            return Err(FileError::UploadPathNotSet);
        }

        if !payload.method().eq_ignore_ascii_case(UPLOAD_METHOD) {
            tracing::debug!(method = payload.method(), "not an upload request");
            return Ok(&self.records);
        }

        if let Some(field) = payload.field_override() {
            self.set_field_name(field);
        }

        let Some(submitted) = payload.files(&self.field_name) else {
            tracing::debug!(field = %self.field_name, "no files submitted");
            return Ok(&self.records);
        };

        for file in submitted.iter() {
            let record = self.process(file, replace_if_exist);
            self.records.push(record);
        }

        Ok(&self.records)
    }

    /// Same as [`Uploader::upload`], returning the outcome as uploaded files.
    pub fn upload_as_files(
        &mut self,
        payload: &dyn RequestPayload,
        replace_if_exist: bool,
    ) -> FileResult<Vec<UploadedFile>> {
        self.upload(payload, replace_if_exist)?;
        Ok(self.files())
    }

    fn process(&mut self, submitted: &SubmittedFile, replace_if_exist: bool) -> UploadRecord {
        let name = path::base_name(&submitted.name);
        let record = UploadRecord::new(name, &submitted.size, &self.upload_dir);
        self.status_message = submitted.status.message().to_owned();

        if !submitted.status.is_ok() {
            tracing::warn!(
                name,
                status = submitted.status.code(),
                "transport reported a failed upload"
            );
            return record.rejected(UploadError::Transport(submitted.status.code()));
        }

        if !self.is_allowed(name) {
            tracing::warn!(name, "file type not allowed");
            return record.rejected(UploadError::NotAllowedType);
        }

        if !path::is_directory(&self.upload_dir, false) {
            tracing::warn!(directory = %self.upload_dir, "upload directory does not exist");
            return record.rejected(UploadError::NoSuchDir);
        }

        let destination = path::join(&self.upload_dir, name);
        if path::exists(&destination) {
            self.replace(record, submitted, &destination, replace_if_exist)
        } else {
            self.place(record, submitted, &destination)
        }
    }

    fn place(
        &self,
        mut record: UploadRecord,
        submitted: &SubmittedFile,
        destination: &str,
    ) -> UploadRecord {
        match self.transfer.transfer(&submitted.temp_path, Path::new(destination)) {
            Ok(()) => {
                tracing::info!(path = destination, size = record.size, "file uploaded");
                record.uploaded = true;
                record
            }
            Err(e) => {
                tracing::warn!(path = destination, error = %e, "temporary file not moved");
                record.rejected(UploadError::TempFileNotMoved)
            }
        }
    }

    fn replace(
        &self,
        mut record: UploadRecord,
        submitted: &SubmittedFile,
        destination: &str,
        replace_if_exist: bool,
    ) -> UploadRecord {
        record.exists = true;

        if !replace_if_exist {
            tracing::warn!(path = destination, "file already uploaded");
            return record.rejected(UploadError::AlreadyUploaded);
        }

        let result = std::fs::remove_file(destination)
            .and_then(|()| self.transfer.transfer(&submitted.temp_path, Path::new(destination)));

        match result {
            Ok(()) => {
                tracing::info!(path = destination, size = record.size, "file replaced");
                record.uploaded = true;
                record.replaced = true;
                record
            }
            Err(e) => {
                tracing::warn!(path = destination, error = %e, "existing file not replaced");
                record.rejected(UploadError::ReplaceMoveFailed)
            }
        }
    }

    /// Checks the name's extension against the allow-list, as given or lowercased.
    fn is_allowed(&self, name: &str) -> bool {
        let Some(ext) = path::extension_of(name) else {
            return false;
        };
        let lower = ext.to_lowercase();
        self.extensions
            .iter()
            .any(|allowed| allowed.as_str() == ext || allowed.as_str() == lower)
    }

    /// Returns `{uploadDirectory, associatedFileName, allowedTypes, files}`, where each file is
    /// the JSON of its [`UploadedFile`].
    pub fn to_json(&self) -> Value {
        let allowed: Vec<&str> = self.extensions.iter().map(Extension::as_str).collect();
        let files: Vec<Value> = self.files().iter().map(UploadedFile::to_json).collect();
        json!({
            "uploadDirectory": self.upload_dir,
            "associatedFileName": self.field_name,
            "allowedTypes": allowed,
            "files": files,
        })
    }
}

impl std::fmt::Display for Uploader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::{MemoryPayload, TransportStatus};
    use crate::transfer::CopyTransfer;
    use std::fs;
    use tempfile::TempDir;

    /// A source directory holding "received" temp files and an empty upload directory.
    struct Fixture {
        source: TempDir,
        target: TempDir,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                source: TempDir::new().expect("Failed to create source dir"),
                target: TempDir::new().expect("Failed to create target dir"),
            }
        }

        fn target_dir(&self) -> String {
            self.target.path().to_string_lossy().into_owned()
        }

        fn uploader(&self, exts: &[&str]) -> Uploader {
            Uploader::new(&self.target_dir(), exts)
                .expect("Failed to create uploader")
                .with_transfer(CopyTransfer)
        }

        /// Writes a temp file and returns a descriptor declaring it as `name`.
        fn submitted(&self, name: &str, content: &[u8]) -> SubmittedFile {
            let temp = self.source.path().join(format!("tmp-{}", path::base_name(name)));
            fs::write(&temp, content).expect("Failed to write temp file");
            SubmittedFile::new(name, content.len(), temp)
        }

        fn payload(&self, name: &str, content: &[u8]) -> MemoryPayload {
            let mut payload = MemoryPayload::post();
            payload.push("files", self.submitted(name, content));
            payload
        }
    }

    #[test]
    fn test_defaults() {
        let uploader = Uploader::new("", &[]).unwrap();
        assert_eq!(uploader.upload_dir(), "");
        assert_eq!(uploader.field_name(), "files");
        assert!(uploader.extensions().is_empty());
        assert!(uploader.records().is_empty());
        assert_eq!(uploader.status_message(), "NO ACTION");
    }

    #[test]
    fn test_invalid_upload_directory() {
        let err = Uploader::new("Not Exist", &[]).unwrap_err();
        assert_eq!(err.to_string(), "Invalid upload directory: Not Exist");
    }

    #[test]
    fn test_set_upload_dir_keeps_previous_on_error() {
        let fixture = Fixture::new();
        let mut uploader = fixture.uploader(&[]);

        assert!(matches!(
            uploader.set_upload_dir("  "),
            Err(FileError::EmptyUploadDirectory)
        ));
        assert!(uploader.set_upload_dir("/definitely/not/here").is_err());
        assert_eq!(uploader.upload_dir(), fixture.target_dir());
    }

    #[test]
    fn test_upload_dir_is_normalised() {
        let fixture = Fixture::new();
        let mut uploader = Uploader::new("", &[]).unwrap();
        uploader
            .set_upload_dir(&format!("{}//", fixture.target_dir()))
            .unwrap();
        assert_eq!(uploader.upload_dir(), path::normalize(&fixture.target_dir()));
    }

    #[test]
    fn test_extension_management() {
        let mut uploader = Uploader::new("", &["txt", ".pdf", ".PD F", ".&sup"]).unwrap();
        let names: Vec<&str> = uploader.extensions().iter().map(Extension::as_str).collect();
        assert_eq!(names, vec!["txt", "pdf"]);

        assert!(!uploader.add_extension("  "));
        assert!(!uploader.add_extension("..."));
        assert!(uploader.add_extension("..png"));

        let results = uploader.add_extensions(["doc", "x-y", "doc"]);
        assert_eq!(
            results,
            vec![
                ("doc".to_string(), true),
                ("x-y".to_string(), false),
                ("doc".to_string(), true),
            ]
        );
        assert!(uploader.remove_extension("doc"));

        assert!(uploader.remove_extension(".pdf"));
        assert!(!uploader.remove_extension("pdf"));
        let names: Vec<&str> = uploader.extensions().iter().map(Extension::as_str).collect();
        assert_eq!(names, vec!["txt", "png", "doc"]);
    }

    #[test]
    fn test_malformed_extension_leaves_list_unchanged() {
        let mut uploader = Uploader::new("", &["txt"]).unwrap();
        assert!(!uploader.add_extension(".PD F"));
        assert_eq!(uploader.extensions().len(), 1);
    }

    #[test]
    fn test_duplicate_extensions_allowed() {
        let mut uploader = Uploader::new("", &["txt", "txt"]).unwrap();
        assert_eq!(uploader.extensions().len(), 2);
        assert!(uploader.remove_extension("txt"));
        assert_eq!(uploader.extensions().len(), 1);
    }

    #[test]
    fn test_field_name() {
        let mut uploader = Uploader::default();
        uploader.set_field_name("\n ");
        assert_eq!(uploader.field_name(), "files");
        uploader.set_field_name("super-files ");
        assert_eq!(uploader.field_name(), "super-files");
    }

    #[test]
    fn test_upload_without_directory_fails() {
        let mut uploader = Uploader::new("", &["txt"]).unwrap();
        let err = uploader.upload(&MemoryPayload::post(), false).unwrap_err();
        assert_eq!(err.to_string(), "Upload path is not set.");
    }

    #[test]
    fn test_disallowed_type() {
        let fixture = Fixture::new();
        let mut uploader = fixture.uploader(&["txt"]);
        let payload = fixture.payload("report.pdf", b"%PDF");

        let records = uploader.upload(&payload, false).unwrap();
        assert_eq!(records.len(), 1);
        assert!(!records[0].uploaded);
        assert_eq!(records[0].error, Some(UploadError::NotAllowedType));
        assert_eq!(records[0].mime, "application/pdf");
        assert!(!fixture.target.path().join("report.pdf").exists());
    }

    #[test]
    fn test_new_file_uploaded() {
        let fixture = Fixture::new();
        let mut uploader = fixture.uploader(&["txt"]);
        let content = b"Testing the class 'Uploader'. A plain text upload.";
        let payload = fixture.payload("a.txt", content);

        let records = uploader.upload(&payload, false).unwrap();
        let record = &records[0];
        assert!(record.uploaded);
        assert!(!record.exists);
        assert!(!record.replaced);
        assert_eq!(record.error, None);
        assert_eq!(record.size, content.len() as u64);
        assert_eq!(record.mime, "text/plain");
        assert_eq!(record.upload_path, fixture.target_dir());

        let stored = fs::read(fixture.target.path().join("a.txt")).unwrap();
        assert_eq!(stored, content);
        assert_eq!(uploader.status_message(), "File Uploaded");
    }

    #[test]
    fn test_existing_file_not_replaced() {
        let fixture = Fixture::new();
        let destination = fixture.target.path().join("a.txt");
        fs::write(&destination, b"original").unwrap();

        let mut uploader = fixture.uploader(&["txt"]);
        let payload = fixture.payload("a.txt", b"newer");

        let record = &uploader.upload(&payload, false).unwrap()[0];
        assert!(!record.uploaded);
        assert!(record.exists);
        assert!(!record.replaced);
        assert_eq!(record.error, Some(UploadError::AlreadyUploaded));
        assert_eq!(fs::read(&destination).unwrap(), b"original");
    }

    #[test]
    fn test_existing_file_replaced() {
        let fixture = Fixture::new();
        let destination = fixture.target.path().join("a.txt");
        fs::write(&destination, b"original").unwrap();

        let mut uploader = fixture.uploader(&["txt"]);
        let payload = fixture.payload("a.txt", b"newer");

        let record = &uploader.upload(&payload, true).unwrap()[0];
        assert!(record.uploaded);
        assert!(record.exists);
        assert!(record.replaced);
        assert_eq!(record.error, None);
        assert_eq!(fs::read(&destination).unwrap(), b"newer");
    }

    #[test]
    fn test_failed_replacement_has_error_code() {
        let fixture = Fixture::new();
        fs::write(fixture.target.path().join("a.txt"), b"original").unwrap();

        let mut uploader = fixture.uploader(&["txt"]);
        let mut payload = MemoryPayload::post();
        payload.push(
            "files",
            SubmittedFile::new("a.txt", 5, fixture.source.path().join("vanished")),
        );

        let record = &uploader.upload(&payload, true).unwrap()[0];
        assert!(!record.uploaded);
        assert!(!record.replaced);
        assert_eq!(record.error, Some(UploadError::ReplaceMoveFailed));
    }

    #[test]
    fn test_missing_temp_file() {
        let fixture = Fixture::new();
        let mut uploader = fixture.uploader(&["txt"]);
        let mut payload = MemoryPayload::post();
        payload.push(
            "files",
            SubmittedFile::new("a.txt", 5, fixture.source.path().join("vanished")),
        );

        let record = &uploader.upload(&payload, false).unwrap()[0];
        assert!(!record.uploaded);
        assert_eq!(record.error, Some(UploadError::TempFileNotMoved));
    }

    #[test]
    fn test_transport_failure_recorded_as_code() {
        let fixture = Fixture::new();
        let mut uploader = fixture.uploader(&["txt"]);
        let mut payload = MemoryPayload::post();
        payload.push(
            "files",
            fixture
                .submitted("a.txt", b"abc")
                .with_status(TransportStatus::NoFile),
        );

        let record = &uploader.upload(&payload, false).unwrap()[0];
        assert!(!record.uploaded);
        assert_eq!(record.error_code(), "4");
        assert_eq!(uploader.status_message(), "No File was Uploaded");
        assert!(!fixture.target.path().join("a.txt").exists());
    }

    #[test]
    fn test_upload_directory_removed_after_configuration() {
        let fixture = Fixture::new();
        let nested = fixture.target.path().join("inbox");
        fs::create_dir(&nested).unwrap();

        let mut uploader = Uploader::new(&nested.to_string_lossy(), &["txt"])
            .unwrap()
            .with_transfer(CopyTransfer);
        fs::remove_dir(&nested).unwrap();

        let payload = fixture.payload("a.txt", b"abc");
        let record = &uploader.upload(&payload, false).unwrap()[0];
        assert_eq!(record.error, Some(UploadError::NoSuchDir));
    }

    #[test]
    fn test_extension_matches_lowercase() {
        let fixture = Fixture::new();
        let mut uploader = fixture.uploader(&["txt"]);
        let payload = fixture.payload("SHOUT.TXT", b"abc");

        let record = &uploader.upload(&payload, false).unwrap()[0];
        assert!(record.uploaded);
    }

    #[test]
    fn test_name_without_extension_not_allowed() {
        let fixture = Fixture::new();
        let mut uploader = fixture.uploader(&["txt"]);
        let payload = fixture.payload("README", b"abc");

        let record = &uploader.upload(&payload, false).unwrap()[0];
        assert_eq!(record.error, Some(UploadError::NotAllowedType));
        assert_eq!(record.mime, "application/octet-stream");
    }

    #[test]
    fn test_declared_name_cannot_escape_upload_dir() {
        let fixture = Fixture::new();
        let mut uploader = fixture.uploader(&["txt"]);
        let payload = fixture.payload("../../escape.txt", b"abc");

        let record = &uploader.upload(&payload, false).unwrap()[0];
        assert!(record.uploaded);
        assert_eq!(record.name, "escape.txt");
        assert!(fixture.target.path().join("escape.txt").exists());
    }

    #[test]
    fn test_multiple_files_in_order() {
        let fixture = Fixture::new();
        let mut uploader = fixture.uploader(&["txt"]);
        let mut payload = MemoryPayload::post();
        payload.push("files", fixture.submitted("one.txt", b"1"));
        payload.push("files", fixture.submitted("two.pdf", b"2"));
        payload.push("files", fixture.submitted("three.txt", b"3"));

        let records = uploader.upload(&payload, false).unwrap();
        let outcome: Vec<(&str, bool)> = records
            .iter()
            .map(|r| (r.name.as_str(), r.uploaded))
            .collect();
        assert_eq!(
            outcome,
            vec![("one.txt", true), ("two.pdf", false), ("three.txt", true)]
        );
    }

    #[test]
    fn test_non_post_request_is_ignored() {
        let fixture = Fixture::new();
        let mut uploader = fixture.uploader(&["txt"]);
        let mut payload = MemoryPayload::new("GET");
        payload.push("files", fixture.submitted("a.txt", b"abc"));

        assert!(uploader.upload(&payload, false).unwrap().is_empty());
        assert!(!fixture.target.path().join("a.txt").exists());
    }

    #[test]
    fn test_missing_field_yields_no_records() {
        let fixture = Fixture::new();
        let mut uploader = fixture.uploader(&["txt"]);
        let mut payload = MemoryPayload::post();
        payload.push("other", fixture.submitted("a.txt", b"abc"));

        assert!(uploader.upload(&payload, false).unwrap().is_empty());
    }

    #[test]
    fn test_field_override() {
        let fixture = Fixture::new();
        let mut uploader = fixture.uploader(&["txt"]);
        let mut payload = MemoryPayload::post().with_field_override("attachments");
        payload.push("attachments", fixture.submitted("a.txt", b"abc"));

        let records = uploader.upload(&payload, false).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(uploader.field_name(), "attachments");
    }

    #[test]
    fn test_previous_records_cleared() {
        let fixture = Fixture::new();
        let mut uploader = fixture.uploader(&["txt"]);
        uploader
            .upload(&fixture.payload("a.txt", b"abc"), false)
            .unwrap();
        assert_eq!(uploader.records().len(), 1);

        uploader.upload(&MemoryPayload::post(), false).unwrap();
        assert!(uploader.records().is_empty());
    }

    #[test]
    fn test_upload_as_files() {
        let fixture = Fixture::new();
        let mut uploader = fixture.uploader(&["txt"]);
        let payload = fixture.payload("a.txt", b"abc");

        let files = uploader.upload_as_files(&payload, false).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].is_uploaded());
        assert_eq!(files[0].file().name(), "a.txt");
        assert_eq!(files[0].file().size(), Some(3));
        assert_eq!(files[0].file().mime(), "text/plain");
        assert_eq!(uploader.files(), files);
    }

    #[test]
    fn test_default_transfer_moves() {
        let fixture = Fixture::new();
        let mut uploader = Uploader::new(&fixture.target_dir(), &["txt"]).unwrap();
        let submitted = fixture.submitted("a.txt", b"abc");
        let temp = submitted.temp_path.clone();
        let mut payload = MemoryPayload::post();
        payload.push("files", submitted);

        assert!(uploader.upload(&payload, false).unwrap()[0].uploaded);
        assert!(!temp.exists());
    }

    #[test]
    fn test_from_config() {
        let fixture = Fixture::new();
        let config = UploaderConfig::from_env_values(
            Some(fixture.target_dir()),
            Some("txt,bad ext".into()),
            Some("docs".into()),
            None,
        );
        let uploader = Uploader::from_config(&config).unwrap();
        assert_eq!(uploader.upload_dir(), path::normalize(&fixture.target_dir()));
        assert_eq!(uploader.extensions().len(), 1);
        assert_eq!(uploader.field_name(), "docs");
    }

    #[test]
    fn test_to_json() {
        let fixture = Fixture::new();
        let mut uploader = fixture.uploader(&["txt", "md"]);
        uploader
            .upload(&fixture.payload("a.txt", b"abc"), false)
            .unwrap();

        let json = uploader.to_json();
        assert_eq!(json["uploadDirectory"], fixture.target_dir());
        assert_eq!(json["associatedFileName"], "files");
        assert_eq!(json["allowedTypes"], json!(["txt", "md"]));

        let file = &json["files"][0];
        assert_eq!(file["id"], -1);
        assert_eq!(file["name"], "a.txt");
        assert_eq!(file["directory"], fixture.target_dir());
        assert_eq!(file["mime"], "text/plain");
        assert_eq!(file["sizeInBytes"], 3);
        assert_eq!(file["uploaded"], true);
        assert_eq!(file["isReplace"], false);
        assert_eq!(file["uploadError"], "");
        assert!(file.get("upload-path").is_none());
        assert!(file.get("is-exist").is_none());
    }
}
