//! Constants used throughout the upload crate.

/// Form field that submitted files are looked up under when none is configured.
pub const DEFAULT_FIELD_NAME: &str = "files";

/// Status message reported before any file has been processed.
pub const NO_ACTION_MESSAGE: &str = "NO ACTION";

/// The only request method that triggers an upload.
pub const UPLOAD_METHOD: &str = "POST";

/// Record error: the declared extension is not in the allow-list.
pub const NOT_ALLOWED_TYPE: &str = "not_allowed_type";

/// Record error: the upload directory no longer exists.
pub const NO_SUCH_DIR: &str = "no_such_dir";

/// Record error: the temporary file could not be moved into place.
pub const TEMP_FILE_NOT_MOVED: &str = "temp_file_not_moved";

/// Record error: a file with the same name exists and replacing was not requested.
pub const ALREADY_UPLOADED: &str = "already_uploaded";

/// Record error: the existing file could not be replaced.
pub const REPLACE_MOVE_FAILED: &str = "replace_move_failed";
