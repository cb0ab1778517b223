//! The [`File`] type: a single file's identity, location and in-memory content.
//!
//! A `File` is a plain value. It holds a name, a canonical directory, a MIME type, a size and
//! a buffer of raw bytes, and performs blocking I/O only when one of its operations is
//! called. Handles are opened, used and closed inside a single call; nothing is kept open
//! between calls.
//!
//! # Size tracking
//!
//! The size is `None` until something determines it. It is refreshed:
//!
//! - at construction, if the file already exists on disk
//! - by every successful read (from the on-disk size)
//! - by every raw-data assignment (from the buffer length)
//!
//! # MIME tracking
//!
//! The MIME type starts as `application/octet-stream` and is re-derived from the name's
//! suffix whenever the name is set and whenever the file is read. [`File::set_mime`]
//! overrides it until the next re-derivation.
//!
//! # Ranged reads
//!
//! [`File::read_range`] reads the half-open byte interval `[from, to)`. With no `to`, the
//! whole file size is requested starting at `from`. Requests that reach past the end of the
//! file fail with [`FileError::OutOfRange`] instead of returning short data.

use crate::constants::{DEFAULT_CHUNK_SIZE, DEFAULT_EXTENSION, DEFAULT_MIME, ENCODED_SUFFIX};
use crate::response::{ByteRange, RawResponse, ResponseSink};
use crate::{mime, path, FileError, FileResult};
use base64::engine::{general_purpose, DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::{alphabet, Engine as _};
use chrono::{DateTime, Utc};
use serde_json::json;
use std::borrow::Cow;
use std::fs::{self, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};

/// Decoder used when invalid characters should be discarded rather than rejected.
const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Opaque external identifier of a file, such as a database key.
///
/// The identifier plays no part in file-system behaviour. An unset id serialises as `-1`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FileId {
    #[default]
    Unset,
    Key(String),
}

impl std::fmt::Display for FileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileId::Unset => write!(f, "-1"),
            FileId::Key(key) => write!(f, "{}", key),
        }
    }
}

impl serde::Serialize for FileId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            FileId::Unset => serializer.serialize_i64(-1),
            FileId::Key(key) => serializer.serialize_str(key),
        }
    }
}

/// A file on the local file system together with an in-memory copy of its content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    id: FileId,
    name: String,
    directory: String,
    mime_type: String,
    size: Option<u64>,
    raw_data: Vec<u8>,
}

impl Default for File {
    fn default() -> Self {
        Self {
            id: FileId::Unset,
            name: String::new(),
            directory: String::new(),
            mime_type: DEFAULT_MIME.to_owned(),
            size: None,
            raw_data: Vec::new(),
        }
    }
}

impl File {
    /// Creates a file from a name and the directory that contains it.
    ///
    /// If `directory` is empty, `name` is treated as a path and split into directory and
    /// name. If the resulting file exists, its size is read from the file system.
    pub fn new(name: &str, directory: &str) -> Self {
        let mut file = Self::default();

        if file.set_directory(directory) {
            file.set_name(name);
        } else {
            let (directory, name) = path::split(name);
            file.set_directory(&directory);
            file.set_name(&name);
        }

        if file.is_exist() {
            file.size = fs::metadata(file.absolute_path()).map(|m| m.len()).ok();
        }

        file
    }

    /// Creates a file from a single path such as `/srv/uploads/report.pdf`.
    pub fn from_path(path: &str) -> Self {
        Self::new(path, "")
    }

    pub fn id(&self) -> &FileId {
        &self.id
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = FileId::Key(id.into());
    }

    /// Returns the file name, including its extension.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sets the file name and re-derives the MIME type from its suffix.
    ///
    /// Empty or whitespace-only names are ignored. A name without a suffix leaves the MIME
    /// type untouched.
    pub fn set_name(&mut self, name: &str) {
        if name.trim().is_empty() {
            return;
        }
        self.name = name.to_owned();

        if let Some(ext) = path::extension_of(&self.name) {
            let mime = mime::lookup(ext);
            self.set_mime(mime);
        }
    }

    /// Returns the canonical directory that contains the file.
    pub fn directory(&self) -> &str {
        &self.directory
    }

    /// Normalises and stores the directory.
    ///
    /// Returns `false` (keeping the previous value) if the normalised directory is empty.
    pub fn set_directory(&mut self, directory: &str) -> bool {
        let normalized = path::normalize(directory);
        if normalized.is_empty() {
            return false;
        }
        self.directory = normalized;
        true
    }

    /// Returns `directory + separator + name`, or an empty string if either part is unset.
    pub fn absolute_path(&self) -> String {
        path::join(&self.directory, &self.name)
    }

    pub fn mime(&self) -> &str {
        &self.mime_type
    }

    /// Overrides the MIME type. Empty values are ignored.
    pub fn set_mime(&mut self, mime_type: &str) {
        if !mime_type.is_empty() {
            self.mime_type = mime_type.to_owned();
        }
    }

    /// Best-effort MIME detection from the magic bytes of the in-memory raw data.
    ///
    /// This never changes the stored MIME type.
    pub fn detect_mime(&self) -> Option<&'static str> {
        mime::sniff(&self.raw_data)
    }

    /// Returns the size in bytes, or `None` if it has not been determined.
    pub fn size(&self) -> Option<u64> {
        self.size
    }

    /// Returns the file's extension.
    ///
    /// This is the name's last dot-suffix if it has one. Otherwise the extension registered
    /// for the current MIME type is used, falling back to `bin`.
    pub fn extension(&self) -> String {
        if let Some(ext) = path::extension_of(&self.name) {
            return ext.to_owned();
        }
        mime::extension_for(&self.mime_type)
            .unwrap_or(DEFAULT_EXTENSION)
            .to_owned()
    }

    /// Returns the name with its last dot-suffix removed.
    pub fn name_without_extension(&self) -> &str {
        path::strip_extension(&self.name)
    }

    /// Checks whether the file exists on disk.
    pub fn is_exist(&self) -> bool {
        path::exists(&self.absolute_path())
    }

    /// Returns the on-disk modification time, or `None` if the file does not exist.
    pub fn last_modified(&self) -> Option<DateTime<Utc>> {
        if !self.is_exist() {
            return None;
        }
        fs::metadata(self.absolute_path())
            .and_then(|m| m.modified())
            .ok()
            .map(DateTime::<Utc>::from)
    }

    /// Returns the modification time rendered with a `chrono` format string.
    pub fn last_modified_formatted(&self, format: &str) -> Option<String> {
        self.last_modified()
            .map(|time| time.format(format).to_string())
    }

    /// Returns the in-memory raw data.
    pub fn raw_data(&self) -> &[u8] {
        &self.raw_data
    }

    /// Returns the in-memory raw data encoded as base64.
    pub fn raw_data_encoded(&self) -> String {
        general_purpose::STANDARD.encode(&self.raw_data)
    }

    /// Replaces the in-memory raw data and updates the size.
    ///
    /// Empty input is ignored.
    pub fn set_raw_data(&mut self, raw: impl Into<Vec<u8>>) {
        let raw = raw.into();
        if raw.is_empty() {
            return;
        }
        self.size = Some(raw.len() as u64);
        self.raw_data = raw;
    }

    /// Decodes base64 text and stores the result as raw data.
    ///
    /// # Errors
    ///
    /// In strict mode, returns `FileError::Decode` if the input contains anything outside the
    /// base64 alphabet. In lenient mode, such characters are discarded and decoding cannot
    /// fail.
    pub fn set_raw_data_decoded(&mut self, encoded: impl AsRef<[u8]>, strict: bool) -> FileResult<()> {
        let decoded = if strict {
            general_purpose::STANDARD
                .decode(encoded.as_ref())
                .map_err(FileError::Decode)?
        } else {
            let mut filtered: Vec<u8> = encoded
                .as_ref()
                .iter()
                .copied()
                .filter(|b| b.is_ascii_alphanumeric() || *b == b'+' || *b == b'/')
                .collect();
            // A lone trailing symbol carries fewer than 8 bits.
            if filtered.len() % 4 == 1 {
                filtered.pop();
            }
            LENIENT_BASE64.decode(&filtered).map_err(FileError::Decode)?
        };

        self.size = Some(decoded.len() as u64);
        self.raw_data = decoded;
        Ok(())
    }

    /// Appends bytes to the in-memory raw data.
    pub fn append(&mut self, data: impl AsRef<[u8]>) {
        self.raw_data.extend_from_slice(data.as_ref());
        self.size = Some(self.raw_data.len() as u64);
    }

    /// Appends several byte slices in order.
    pub fn append_all<I, D>(&mut self, parts: I)
    where
        I: IntoIterator<Item = D>,
        D: AsRef<[u8]>,
    {
        for part in parts {
            self.append(part);
        }
    }

    /// Creates an empty file on disk if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns `FileError` if:
    /// - the name or directory is unset
    /// - the directory is missing and `create_dir_if_missing` is false, or it cannot be created
    /// - the file cannot be opened for writing
    pub fn create(&mut self, create_dir_if_missing: bool) -> FileResult<()> {
        let abs_path = self.checked_path()?;

        if self.is_exist() {
            return Ok(());
        }

        if !path::is_directory(&self.directory, create_dir_if_missing) {
            return Err(FileError::Create {
                path: abs_path,
                source: io::Error::new(io::ErrorKind::NotFound, "directory does not exist"),
            });
        }

        fs::File::create(&abs_path).map_err(|source| FileError::Create {
            path: abs_path.clone(),
            source,
        })?;

        tracing::debug!(path = %abs_path, "created empty file");
        Ok(())
    }

    /// Reads the whole file into memory.
    ///
    /// # Errors
    ///
    /// See [`File::read_range`].
    pub fn read(&mut self) -> FileResult<()> {
        self.read_range(None, None)
    }

    /// Reads the byte interval `[from, to)` into memory.
    ///
    /// `from` defaults to the start of the file. Without `to`, the full file size is
    /// requested starting at `from`, stopping at the end of the file. The size is refreshed
    /// from disk before the bounds are checked, and the MIME type is re-derived from the
    /// name's suffix afterwards.
    ///
    /// # Errors
    ///
    /// Returns `FileError` if:
    /// - the name is unset (`EmptyName`), then if the directory is unset (`EmptyPath`)
    /// - nothing exists at the path (`NotFound`)
    /// - `to` or `to - from` exceeds the file size (`OutOfRange`)
    /// - the file cannot be opened or read
    pub fn read_range(&mut self, from: Option<u64>, to: Option<u64>) -> FileResult<()> {
        let abs_path = self.checked_path()?;

        if !self.is_exist() {
            return Err(FileError::NotFound(abs_path));
        }

        let on_disk = fs::metadata(&abs_path)
            .map_err(|source| FileError::Open {
                path: abs_path.clone(),
                source,
            })?
            .len();
        self.size = Some(on_disk);

        let from = from.unwrap_or(0);
        let span = to.map_or(0, |to| to.saturating_sub(from));
        let bytes_to_read = if span > 0 { span } else { on_disk };

        if bytes_to_read > on_disk || to.is_some_and(|to| to > on_disk) {
            return Err(FileError::OutOfRange(bytes_to_read));
        }

        let mut handle = fs::File::open(&abs_path).map_err(|source| FileError::Open {
            path: abs_path.clone(),
            source,
        })?;

        let mut buffer = Vec::with_capacity(usize::try_from(bytes_to_read).unwrap_or(0));
        if bytes_to_read > 0 {
            handle.seek(SeekFrom::Start(from))?;
            Read::by_ref(&mut handle)
                .take(bytes_to_read)
                .read_to_end(&mut buffer)?;
        }

        tracing::debug!(
            path = %abs_path,
            from,
            requested = bytes_to_read,
            read = buffer.len(),
            "read file"
        );

        self.raw_data = buffer;
        let mime = mime::lookup(path::extension_of(&self.name).unwrap_or(""));
        self.set_mime(mime);
        Ok(())
    }

    /// Reads the whole file and base64-decodes its content in place.
    ///
    /// Decoding is lenient: characters outside the base64 alphabet are discarded.
    pub fn read_decoded(&mut self) -> FileResult<()> {
        self.read()?;
        if self.raw_data.is_empty() {
            return Ok(());
        }
        let encoded = std::mem::take(&mut self.raw_data);
        self.set_raw_data_decoded(encoded, false)
    }

    /// Deletes the file from disk and clears the in-memory raw data.
    ///
    /// Returns `Ok(false)` without side effects if the file does not exist.
    pub fn remove(&mut self) -> FileResult<bool> {
        if !self.is_exist() {
            return Ok(false);
        }

        let abs_path = self.absolute_path();
        fs::remove_file(&abs_path)?;
        self.raw_data.clear();

        tracing::debug!(path = %abs_path, "removed file");
        Ok(true)
    }

    /// Writes the in-memory raw data to disk.
    ///
    /// With `append`, the data is added to the end of the file; otherwise the file is
    /// truncated first. With `create_if_missing`, the file and its directory tree are
    /// created when absent.
    ///
    /// # Errors
    ///
    /// Returns `FileError` if:
    /// - the name or directory is unset
    /// - no raw data is set (`NoData`)
    /// - the file does not exist and `create_if_missing` is false (`NotFound`)
    /// - the file cannot be opened or written
    pub fn write(&mut self, append: bool, create_if_missing: bool) -> FileResult<()> {
        let abs_path = self.checked_path()?;

        if self.raw_data.is_empty() {
            return Err(FileError::NoData);
        }

        if create_if_missing {
            self.create(true)?;
        }

        self.write_to(&abs_path, append, false)
    }

    /// Writes the base64-encoded raw data to `<name>.bin` next to the file.
    ///
    /// The `.bin` file is created (with its directory) if needed and overwritten otherwise.
    /// The file's own name is unchanged once this returns.
    pub fn write_encoded(&mut self) -> FileResult<()> {
        self.checked_path()?;

        let original_name = self.name.clone();
        let original_mime = self.mime_type.clone();
        self.set_name(&format!("{}{}", original_name, ENCODED_SUFFIX));
        let result = self.write_encoded_target();
        self.name = original_name;
        self.mime_type = original_mime;
        result
    }

    fn write_encoded_target(&mut self) -> FileResult<()> {
        if self.raw_data.is_empty() {
            return Err(FileError::NoData);
        }
        self.create(true)?;
        let abs_path = self.checked_path()?;
        self.write_to(&abs_path, false, true)
    }

    fn write_to(&self, abs_path: &str, append: bool, encode: bool) -> FileResult<()> {
        if !path::exists(abs_path) {
            return Err(FileError::NotFound(abs_path.to_owned()));
        }

        let mut options = OpenOptions::new();
        if append {
            options.append(true);
        } else {
            options.write(true).truncate(true);
        }

        let mut handle = options.open(abs_path).map_err(|source| FileError::Open {
            path: abs_path.to_owned(),
            source,
        })?;

        let data: Cow<'_, [u8]> = if encode {
            Cow::Owned(self.raw_data_encoded().into_bytes())
        } else {
            Cow::Borrowed(&self.raw_data)
        };
        handle.write_all(&data)?;

        tracing::debug!(path = %abs_path, bytes = data.len(), append, encode, "wrote file");
        Ok(())
    }

    /// Splits the raw data into chunks of `chunk_size` bytes.
    ///
    /// With `encode`, the base64 form of the data is split instead. A non-positive
    /// `chunk_size` falls back to 50. The last chunk may be shorter; empty data yields no
    /// chunks.
    pub fn chunks(&self, chunk_size: isize, encode: bool) -> Vec<Vec<u8>> {
        let chunk_size = usize::try_from(chunk_size)
            .ok()
            .filter(|size| *size > 0)
            .unwrap_or(DEFAULT_CHUNK_SIZE);

        let data: Cow<'_, [u8]> = if encode {
            Cow::Owned(self.raw_data_encoded().into_bytes())
        } else {
            Cow::Borrowed(&self.raw_data)
        };

        data.chunks(chunk_size).map(<[u8]>::to_vec).collect()
    }

    /// Returns the raw data as a list of byte values.
    pub fn to_bytes_array(&self) -> Vec<u8> {
        self.raw_data.clone()
    }

    /// Returns the raw data as two-character uppercase hex strings, one per byte.
    pub fn to_hex_array(&self) -> Vec<String> {
        self.raw_data
            .iter()
            .map(|byte| hex::encode_upper([*byte]))
            .collect()
    }

    /// Returns the JSON projection of the file.
    ///
    /// Sizes are reported as `0` while the size is unknown.
    pub fn to_json(&self) -> serde_json::Value {
        let size = self.size.unwrap_or(0);
        let kbytes = size as f64 / 1024.0;

        json!({
            "id": self.id,
            "mime": self.mime_type,
            "name": self.name,
            "directory": self.directory,
            "sizeInBytes": size,
            "sizeInKBytes": kbytes,
            "sizeInMBytes": kbytes / 1024.0,
        })
    }

    /// Streams the file to a response sink.
    ///
    /// If no raw data is in memory, the file is read first. With a `range` header value
    /// (`bytes=<from>-<to>`), only that range is read and sent with status 206 and a
    /// `content-range` header.
    ///
    /// # Errors
    ///
    /// Returns `FileError` if the file cannot be read, the range is malformed, empty, reversed
    /// or out of bounds, or the sink fails to send.
    pub fn view<S>(&mut self, sink: &mut S, range: Option<&str>, as_attachment: bool) -> FileResult<()>
    where
        S: ResponseSink + ?Sized,
    {
        if self.raw_data.is_empty() {
            self.read()?;
        }

        sink.add_header("Accept-Ranges", "bytes");
        sink.add_header("content-type", &self.mime_type);

        match range {
            Some(header) => {
                let range = ByteRange::parse(header)?;
                let to = range.to.unwrap_or(self.size.unwrap_or(0));
                if range.from >= to {
                    return Err(FileError::InvalidRange(header.to_owned()));
                }
                self.read_range(Some(range.from), Some(to))?;

                sink.set_status_code(206);
                sink.add_header(
                    "content-range",
                    &format!(
                        "bytes {}-{}/{}",
                        range.from,
                        to,
                        self.size.unwrap_or(0)
                    ),
                );
                sink.add_header("content-length", &self.raw_data.len().to_string());
            }
            None => {
                sink.add_header("Content-Length", &self.raw_data.len().to_string());
            }
        }

        let disposition = if as_attachment { "attachment" } else { "inline" };
        sink.add_header(
            "Content-Disposition",
            &format!("{}; filename=\"{}\"", disposition, self.name),
        );

        sink.write(&self.raw_data);
        sink.send()
    }

    /// Streams the file as raw header lines followed by the body into `writer`.
    ///
    /// Returns the status code that a full HTTP response would carry.
    pub fn view_raw<W: Write>(&mut self, writer: W, range: Option<&str>, as_attachment: bool) -> FileResult<u16> {
        let mut response = RawResponse::new(writer);
        self.view(&mut response, range, as_attachment)?;
        Ok(response.status_code())
    }

    fn checked_path(&self) -> FileResult<String> {
        if self.name.is_empty() {
            return Err(FileError::EmptyName);
        }
        if self.directory.is_empty() {
            return Err(FileError::EmptyPath);
        }
        Ok(self.absolute_path())
    }
}

impl std::fmt::Display for File {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_json())
    }
}
