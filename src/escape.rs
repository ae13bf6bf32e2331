//! Percent-encoding for embedding path segments in URLs.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Bytes escaped inside a single path segment.
///
/// Unreserved characters plus `$ & + : = @` stay as-is. `/ ; , ?`, `%`,
/// space and everything non-ASCII get encoded.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b':')
    .remove(b'=')
    .remove(b'@');

/// Escape a string so it can be used as one URL path segment.
pub fn escape(s: &str) -> String {
    utf8_percent_encode(s, PATH_SEGMENT).to_string()
}

/// Reverse [`escape`].
///
/// Malformed `%` sequences are left untouched and invalid UTF-8 is replaced,
/// so this never fails.
pub fn unescape(s: &str) -> String {
    percent_decode_str(s).decode_utf8_lossy().into_owned()
}
