//! Response sinks used to stream a file to an HTTP client.
//!
//! [`File::view`](crate::File::view) only talks to the [`ResponseSink`] trait. Web framework
//! integrations implement it over their own response type; [`RawResponse`] is the minimal
//! fallback that writes header lines followed directly by the body bytes.

use crate::{FileError, FileResult};
use std::io::Write;

/// Destination for a file view.
pub trait ResponseSink {
    /// Adds a response header.
    fn add_header(&mut self, name: &str, value: &str);

    /// Sets the HTTP status code.
    fn set_status_code(&mut self, code: u16);

    /// Appends bytes to the response body.
    fn write(&mut self, body: &[u8]);

    /// Flushes the response to the client.
    fn send(&mut self) -> FileResult<()>;
}

/// Minimal sink that emits `Name: value` header lines, a blank line, then the body.
///
/// The status line is not written; the status code is kept so callers can report it.
#[derive(Debug)]
pub struct RawResponse<W: Write> {
    writer: W,
    status_code: u16,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl<W: Write> RawResponse<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            status_code: 200,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Returns the first header value matching `name`, ignoring case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ResponseSink for RawResponse<W> {
    fn add_header(&mut self, name: &str, value: &str) {
        self.headers.push((name.to_owned(), value.to_owned()));
    }

    fn set_status_code(&mut self, code: u16) {
        self.status_code = code;
    }

    fn write(&mut self, body: &[u8]) {
        self.body.extend_from_slice(body);
    }

    fn send(&mut self) -> FileResult<()> {
        for (name, value) in &self.headers {
            write!(self.writer, "{}: {}\r\n", name, value)?;
        }
        self.writer.write_all(b"\r\n")?;
        self.writer.write_all(&self.body)?;
        self.writer.flush()?;
        self.body.clear();
        Ok(())
    }
}

/// A parsed `Range: bytes=<from>-<to>` request header.
///
/// `to` is exclusive; `None` means "to the end of the file".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub from: u64,
    pub to: Option<u64>,
}

impl ByteRange {
    /// Parses a range header value such as `bytes=0-10` or `bytes=20-`.
    ///
    /// # Errors
    ///
    /// Returns `FileError::InvalidRange` if the value has no `=`, no `-`, or bounds that are
    /// not non-negative integers.
    pub fn parse(header: &str) -> FileResult<Self> {
        let invalid = || FileError::InvalidRange(header.to_owned());

        let (_, bounds) = header.split_once('=').ok_or_else(invalid)?;
        let (from, to) = bounds.split_once('-').ok_or_else(invalid)?;

        let from = from.trim();
        let from = if from.is_empty() {
            0
        } else {
            from.parse::<u64>().map_err(|_| invalid())?
        };

        let to = to.trim();
        let to = if to.is_empty() {
            None
        } else {
            Some(to.parse::<u64>().map_err(|_| invalid())?)
        };

        Ok(Self { from, to })
    }
}
