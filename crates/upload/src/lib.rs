//! # filekit upload
//!
//! Receives files submitted through a request and places them in an upload directory.
//!
//! The request itself is abstracted behind [`RequestPayload`], so web frameworks, tests and
//! command-line tools all drive the same [`Uploader`]. How a temporary file reaches its
//! destination is a [`TransferStrategy`]: [`MoveTransfer`] by default, [`CopyTransfer`] when
//! the source must be kept.
//!
//! ```no_run
//! use filekit_upload::{CopyTransfer, MemoryPayload, Uploader};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut uploader = Uploader::new("/srv/uploads", &["txt", "pdf"])?.with_transfer(CopyTransfer);
//!
//! let mut payload = MemoryPayload::post();
//! payload.add_file("files", "/tmp/report.pdf")?;
//!
//! for record in uploader.upload(&payload, false)? {
//!     println!("{}: uploaded={} error={}", record.name, record.uploaded, record.error_code());
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
mod constants;
mod payload;
mod record;
mod transfer;
mod uploaded;
mod uploader;

pub use config::UploaderConfig;
pub use constants::{
    ALREADY_UPLOADED, DEFAULT_FIELD_NAME, NOT_ALLOWED_TYPE, NO_ACTION_MESSAGE, NO_SUCH_DIR,
    REPLACE_MOVE_FAILED, TEMP_FILE_NOT_MOVED, UPLOAD_METHOD,
};
pub use filekit_files::{FileError, FileResult};
pub use payload::{FilePayload, MemoryPayload, RequestPayload, SubmittedFile, TransportStatus};
pub use record::{UploadError, UploadRecord};
pub use transfer::{CopyTransfer, MoveTransfer, TransferStrategy};
pub use uploaded::UploadedFile;
pub use uploader::Uploader;
