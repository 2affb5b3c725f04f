//! Registry path helpers.
//!
//! Paths are separator-delimited sequences of names. Empty segments (from
//! leading, trailing, or doubled separators) carry no meaning and are skipped.

use crate::error::{Error, Result};

/// Separator used unless a registry is configured otherwise.
pub const DEFAULT_SEPARATOR: char = '/';

/// Iterates the non-empty segments of `path`.
pub fn segments(path: &str, separator: char) -> impl Iterator<Item = &str> {
    path.split(separator).filter(|segment| !segment.is_empty())
}

/// Joins a parent path and a child name.
#[must_use]
pub fn join(parent: &str, name: &str, separator: char) -> String {
    let mut path = String::with_capacity(parent.len() + name.len() + 1);
    path.push_str(parent.trim_end_matches(separator));
    path.push(separator);
    path.push_str(name);
    path
}

/// Returns the parent portion of `path`, or `None` for a top-level path.
#[must_use]
pub fn parent(path: &str, separator: char) -> Option<&str> {
    let trimmed = path.trim_end_matches(separator);
    let cut = trimmed.rfind(separator)?;
    if cut == 0 { None } else { Some(&trimmed[..cut]) }
}

/// Checks that `name` can be used as a single path segment.
///
/// # Errors
///
/// Returns [`crate::ErrorKind::InvalidName`] for empty names and names
/// containing the separator.
pub fn validate_name(name: &str, separator: char) -> Result<()> {
    if name.is_empty() {
        return Err(Error::invalid_name(name, "name must not be empty"));
    }
    if name.contains(separator) {
        return Err(Error::invalid_name(
            name,
            "name must not contain the path separator",
        ));
    }
    Ok(())
}
