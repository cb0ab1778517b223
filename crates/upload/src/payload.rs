//! Request payload sources.
//!
//! An [`Uploader`](crate::Uploader) never reads request state from the process. The web
//! framework (or a test, or the CLI) hands it a [`RequestPayload`] that describes the request
//! method and the files submitted under each form field.

use filekit_files::{path, FileError, FileResult};
use std::collections::HashMap;
use std::path::PathBuf;

/// Per-file status reported by the transport that received a multipart upload.
///
/// The numbering follows the conventional multipart status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportStatus {
    Ok,
    ExceedsServerLimit,
    ExceedsFormLimit,
    Partial,
    NoFile,
    MissingTempDir,
    CannotWrite,
    StoppedByExtension,
    Other(u16),
}

impl TransportStatus {
    pub fn from_code(code: u16) -> Self {
        match code {
            0 => TransportStatus::Ok,
            1 => TransportStatus::ExceedsServerLimit,
            2 => TransportStatus::ExceedsFormLimit,
            3 => TransportStatus::Partial,
            4 => TransportStatus::NoFile,
            6 => TransportStatus::MissingTempDir,
            7 => TransportStatus::CannotWrite,
            8 => TransportStatus::StoppedByExtension,
            other => TransportStatus::Other(other),
        }
    }

    pub fn code(self) -> u16 {
        match self {
            TransportStatus::Ok => 0,
            TransportStatus::ExceedsServerLimit => 1,
            TransportStatus::ExceedsFormLimit => 2,
            TransportStatus::Partial => 3,
            TransportStatus::NoFile => 4,
            TransportStatus::MissingTempDir => 6,
            TransportStatus::CannotWrite => 7,
            TransportStatus::StoppedByExtension => 8,
            TransportStatus::Other(code) => code,
        }
    }

    pub fn is_ok(self) -> bool {
        self == TransportStatus::Ok
    }

    /// Human-readable description of the status.
    pub fn message(self) -> &'static str {
        match self {
            TransportStatus::Ok => "File Uploaded",
            TransportStatus::ExceedsServerLimit => "File Size is Larger Than the Server Limit",
            TransportStatus::ExceedsFormLimit => "File Size is Larger Than the Form Limit",
            TransportStatus::Partial => "File Uploaded Partially",
            TransportStatus::NoFile => "No File was Uploaded",
            TransportStatus::MissingTempDir => "Temporary Folder is Missing",
            TransportStatus::CannotWrite => "Failed to Write File to Disk",
            TransportStatus::StoppedByExtension => "File Upload Stopped by Extension",
            TransportStatus::Other(_) => "No File was Uploaded",
        }
    }
}

/// One file as submitted by the client.
///
/// `name` and `size` are the client's declared values and are not trusted: the name is reduced
/// to its final component and the size is sanitised before they reach a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedFile {
    pub name: String,
    pub size: String,
    pub status: TransportStatus,
    pub temp_path: PathBuf,
}

impl SubmittedFile {
    /// Creates a descriptor with an `Ok` transport status.
    pub fn new(name: impl Into<String>, size: impl ToString, temp_path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            size: size.to_string(),
            status: TransportStatus::Ok,
            temp_path: temp_path.into(),
        }
    }

    pub fn with_status(mut self, status: TransportStatus) -> Self {
        self.status = status;
        self
    }
}

/// The files submitted under one form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilePayload {
    Single(SubmittedFile),
    Multiple(Vec<SubmittedFile>),
}

impl FilePayload {
    /// Iterates over the submitted files in payload order, whatever the shape.
    pub fn iter(&self) -> std::slice::Iter<'_, SubmittedFile> {
        match self {
            FilePayload::Single(file) => std::slice::from_ref(file).iter(),
            FilePayload::Multiple(files) => files.iter(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            FilePayload::Single(_) => 1,
            FilePayload::Multiple(files) => files.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn push(&mut self, file: SubmittedFile) {
        match self {
            FilePayload::Single(existing) => {
                let first = existing.clone();
                *self = FilePayload::Multiple(vec![first, file]);
            }
            FilePayload::Multiple(files) => files.push(file),
        }
    }
}

/// Source of the request state an upload needs.
pub trait RequestPayload {
    /// The request method, such as `POST`.
    fn method(&self) -> &str;

    /// The files submitted under `field`, if any.
    fn files(&self, field: &str) -> Option<&FilePayload>;

    /// A field name sent by the client that replaces the configured one.
    fn field_override(&self) -> Option<&str> {
        None
    }
}

/// An in-memory [`RequestPayload`], used by tests and the command-line front end.
#[derive(Debug, Clone, Default)]
pub struct MemoryPayload {
    method: String,
    field_override: Option<String>,
    files: HashMap<String, FilePayload>,
}

impl MemoryPayload {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            ..Self::default()
        }
    }

    /// Creates an empty `POST` payload.
    pub fn post() -> Self {
        Self::new(crate::constants::UPLOAD_METHOD)
    }

    pub fn with_field_override(mut self, field: impl Into<String>) -> Self {
        self.field_override = Some(field.into());
        self
    }

    /// Adds a file under `field`. A second file turns the field into a multi-file payload.
    pub fn push(&mut self, field: &str, file: SubmittedFile) {
        match self.files.get_mut(field) {
            Some(existing) => existing.push(file),
            None => {
                self.files.insert(field.to_owned(), FilePayload::Single(file));
            }
        }
    }

    /// Adds an existing local file under `field` as if it had just been received.
    ///
    /// The declared name is the file's base name, the declared size is its on-disk length,
    /// and the temporary location is the file itself.
    ///
    /// # Errors
    ///
    /// Returns `FileError::NotFound` if nothing exists at `file_path`.
    pub fn add_file(&mut self, field: &str, file_path: &str) -> FileResult<()> {
        if !path::exists(file_path) {
            return Err(FileError::NotFound(file_path.to_owned()));
        }
        let size = std::fs::metadata(file_path)?.len();
        let name = path::base_name(file_path);

        tracing::debug!(field, name, size, "added local file to payload");
        self.push(field, SubmittedFile::new(name, size, file_path));
        Ok(())
    }
}

impl RequestPayload for MemoryPayload {
    fn method(&self) -> &str {
        &self.method
    }

    fn files(&self, field: &str) -> Option<&FilePayload> {
        self.files.get(field)
    }

    fn field_override(&self) -> Option<&str> {
        self.field_override.as_deref()
    }
}
