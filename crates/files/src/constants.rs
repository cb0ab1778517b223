//! Constants used throughout the files crate.

/// MIME type of every file whose type is not known.
pub const DEFAULT_MIME: &str = "application/octet-stream";

/// Extension reported for files with no suffix and no recognisable MIME type.
pub const DEFAULT_EXTENSION: &str = "bin";

/// Chunk size used by `File::chunks` when a non-positive size is requested.
pub const DEFAULT_CHUNK_SIZE: usize = 50;

/// Suffix appended to the file name by `File::write_encoded`.
pub const ENCODED_SUFFIX: &str = ".bin";
