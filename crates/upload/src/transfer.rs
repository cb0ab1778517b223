//! Strategies for placing a received temporary file at its destination.

use std::fs;
use std::io;
use std::path::Path;

/// Places the file at `from` at `to`.
pub trait TransferStrategy: std::fmt::Debug {
    fn transfer(&self, from: &Path, to: &Path) -> io::Result<()>;
}

/// Moves the temporary file into place.
///
/// A rename is tried first; if it fails (for example across devices) the file is copied and
/// the original removed.
#[derive(Debug, Default, Clone, Copy)]
pub struct MoveTransfer;

impl TransferStrategy for MoveTransfer {
    fn transfer(&self, from: &Path, to: &Path) -> io::Result<()> {
        match fs::rename(from, to) {
            Ok(()) => Ok(()),
            Err(e) => {
                tracing::debug!(
                    from = %from.display(),
                    to = %to.display(),
                    error = %e,
                    "rename failed, falling back to copy"
                );
                fs::copy(from, to)?;
                fs::remove_file(from)
            }
        }
    }
}

/// Copies the temporary file into place, leaving the original untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct CopyTransfer;

impl TransferStrategy for CopyTransfer {
    fn transfer(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::copy(from, to).map(|_| ())
    }
}
