//! Path normalisation and file-system probes.
//!
//! Paths arrive from callers with mixed separators (`C:/uploads\\2024`, `home\\user/docs/`).
//! Everything in this crate stores directories in a single canonical form produced by
//! [`normalize`]:
//!
//! - every `/` and `\` becomes the platform separator
//! - surrounding whitespace is trimmed
//! - all trailing separators are removed
//! - a single leading separator is kept if the input started with one
//!
//! The probes ([`exists`], [`is_directory`]) never fail: any stat error is reported as `false`.

use std::fs;
use std::path::{Path, MAIN_SEPARATOR};

/// The platform directory separator used in every normalised path.
pub const SEPARATOR: char = MAIN_SEPARATOR;

fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

/// Converts a mixed-separator path into canonical form.
///
/// Empty (or whitespace-only) input produces an empty string. Input made only of separators
/// also produces an empty string, so a normalised path never ends in a separator.
pub fn normalize(path: &str) -> String {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let leading = trimmed.starts_with(is_separator);
    let body = trimmed.trim_matches(is_separator);
    if body.is_empty() {
        return String::new();
    }

    let mut normalized = String::with_capacity(body.len() + 1);
    if leading {
        normalized.push(SEPARATOR);
    }
    normalized.extend(body.chars().map(|c| if is_separator(c) { SEPARATOR } else { c }));
    normalized
}

/// Splits a path into its normalised directory and its final component.
///
/// `"/home/user/report.pdf"` yields `("/home/user", "report.pdf")`. A path without any
/// separator yields an empty directory.
pub fn split(path: &str) -> (String, String) {
    let trimmed = path.trim();
    match trimmed.rfind(is_separator) {
        Some(idx) => (normalize(&trimmed[..idx]), trimmed[idx + 1..].to_owned()),
        None => (String::new(), trimmed.to_owned()),
    }
}

/// Joins a directory and a file name with the platform separator.
///
/// Returns an empty string if either part is empty.
pub fn join(directory: &str, name: &str) -> String {
    if directory.is_empty() || name.is_empty() {
        return String::new();
    }
    format!("{}{}{}", directory, SEPARATOR, name)
}

/// Returns the last component of a name that may contain separators.
///
/// `"../../etc/passwd"` yields `"passwd"`.
pub fn base_name(name: &str) -> &str {
    let trimmed = name.trim();
    match trimmed.rfind(is_separator) {
        Some(idx) => &trimmed[idx + 1..],
        None => trimmed,
    }
}

/// Returns the text after the last dot of a file name, if the name has a dot.
pub fn extension_of(name: &str) -> Option<&str> {
    name.rsplit_once('.').map(|(_, ext)| ext)
}

/// Returns the file name with its last dot-suffix removed.
pub fn strip_extension(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((stem, _)) => stem,
        None => name,
    }
}

/// Checks whether anything exists at `path`.
///
/// Invalid or garbled paths (including the empty string) report `false`.
pub fn exists(path: &str) -> bool {
    if path.is_empty() {
        return false;
    }
    matches!(Path::new(path).try_exists(), Ok(true))
}

/// Checks whether `dir` is an existing directory.
///
/// Separators are normalised first. When `create_if_missing` is set and the directory is
/// absent, the whole directory tree is created and the result reflects whether that
/// succeeded.
pub fn is_directory(dir: &str, create_if_missing: bool) -> bool {
    let dir = normalize(dir);
    if dir.is_empty() {
        return false;
    }

    let path = Path::new(&dir);
    if path.is_dir() {
        return true;
    }

    if create_if_missing {
        return match fs::create_dir_all(path) {
            Ok(()) => {
                tracing::debug!(directory = %dir, "created directory tree");
                true
            }
            Err(e) => {
                tracing::debug!(directory = %dir, error = %e, "failed to create directory tree");
                false
            }
        };
    }

    false
}
