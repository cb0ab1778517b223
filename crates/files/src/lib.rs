//! filekit File Abstraction
//!
//! This crate wraps local file-system primitives into a single [`File`] type that tracks a
//! file's identity, location, MIME type, size and in-memory content.
//!
//! ## Design Principles
//!
//! - In-memory raw data and on-disk content are independent until explicitly synchronised
//!   with [`File::read`] or [`File::write`]
//! - Directories are stored in a single canonical form (see [`path::normalize`])
//! - File-system probes never fail: a garbled path simply does not exist
//! - Every failing operation returns one error type, [`FileError`], with a descriptive message
//! - File handles are scoped to the operation that opens them
//!
//! ## Example Usage
//!
//! ```no_run
//! use filekit_files::File;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut file = File::from_path("/srv/uploads/report.txt");
//! file.read()?;
//! println!("{} is {:?} bytes of {}", file.name(), file.size(), file.mime());
//!
//! // Read bytes 2..4 only
//! file.read_range(Some(2), Some(4))?;
//! assert_eq!(file.raw_data().len(), 2);
//! # Ok(())
//! # }
//! ```

mod constants;
mod files;
pub mod mime;
pub mod path;
pub mod response;

pub use constants::{DEFAULT_CHUNK_SIZE, DEFAULT_EXTENSION, DEFAULT_MIME, ENCODED_SUFFIX};
pub use files::{File, FileId};
pub use response::{ByteRange, RawResponse, ResponseSink};

/// Errors that can occur during file and upload operations
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    /// The file name is not set
    #[error("File name cannot be empty string.")]
    EmptyName,

    /// The file directory is not set
    #[error("Path cannot be empty string.")]
    EmptyPath,

    /// Nothing exists at the resolved path
    #[error("File not found: '{0}'.")]
    NotFound(String),

    /// A ranged read asked for more bytes than the file holds
    #[error("Reached end of file while trying to read {0} byte(s).")]
    OutOfRange(u64),

    /// The file could not be created
    #[error("Unable to create a file at '{path}'.")]
    Create {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The file could not be opened
    #[error("Unable to open the file at '{path}'.")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A write was requested with no raw data in memory
    #[error("No data is set to write.")]
    NoData,

    /// Strict base64 decoding found characters outside the alphabet
    #[error("Base 64 decoding failed due to characters outside base 64 alphabet.")]
    Decode(#[source] base64::DecodeError),

    /// A `Range` request header could not be parsed
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    /// An upload was attempted before an upload directory was configured
    #[error("Upload path is not set.")]
    UploadPathNotSet,

    /// An empty upload directory was supplied
    #[error("Upload directory should not be an empty string.")]
    EmptyUploadDirectory,

    /// The upload directory does not resolve to an existing directory
    #[error("Invalid upload directory: {0}")]
    InvalidUploadDirectory(String),

    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for file operations.
pub type FileResult<T> = Result<T, FileError>;
