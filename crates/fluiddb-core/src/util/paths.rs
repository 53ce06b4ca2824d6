//! Resource path utilities.
//!
//! FluidDB paths are `/`-separated (`/namespaces/alice/books`). These
//! helpers assemble them from segments and recover the final name.

use crate::error::{Error, Result};

/// Path separator used by FluidDB resource paths.
pub const SEPARATOR: char = '/';

/// Join path segments with `/`, collapsing runs of separators.
///
/// Leading and trailing separators of the joined result are preserved
/// (collapsed to one); empty segments disappear.
///
/// # Examples
///
/// ```
/// use fluiddb_core::util::paths::uri_join;
///
/// assert_eq!(uri_join(&["/foo", "bar/", "/baz"]), "/foo/bar/baz");
/// assert_eq!(uri_join(&["/namespaces", "", "alice"]), "/namespaces/alice");
/// assert_eq!(uri_join(&["foo"]), "foo");
/// ```
pub fn uri_join<S: AsRef<str>>(segments: &[S]) -> String {
    let mut joined = String::new();
    for (i, segment) in segments.iter().enumerate() {
        if i > 0 {
            joined.push(SEPARATOR);
        }
        joined.push_str(segment.as_ref());
    }
    collapse_separators(&joined)
}

fn collapse_separators(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut previous_was_separator = false;
    for c in path.chars() {
        if c == SEPARATOR {
            if !previous_was_separator {
                out.push(c);
            }
            previous_was_separator = true;
        } else {
            out.push(c);
            previous_was_separator = false;
        }
    }
    out
}

/// Extract the final segment of a path.
///
/// Trailing separators are ignored. Fails with [`Error::Format`] when
/// nothing but separators (or nothing at all) is left.
///
/// # Examples
///
/// ```
/// use fluiddb_core::util::paths::name_from_path;
///
/// assert_eq!(name_from_path("/foo/bar/baz/").unwrap(), "baz");
/// assert_eq!(name_from_path("foo").unwrap(), "foo");
/// assert!(name_from_path("//").is_err());
/// ```
pub fn name_from_path(path: &str) -> Result<String> {
    let trimmed = path.trim_end_matches(SEPARATOR);
    let name = trimmed.rsplit(SEPARATOR).next().unwrap_or("");
    if name.is_empty() {
        return Err(Error::format(format!(
            "unable to get a name from the path '{path}'"
        )));
    }
    Ok(name.to_string())
}
