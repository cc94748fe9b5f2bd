//! Character encoding detection and transcoding.
//!
//! Modern pages are UTF-8, but mbasic pages in the wild still declare legacy
//! charsets. The bytes entry point sniffs the declaration and converts to
//! UTF-8 before parsing, replacing invalid sequences with U+FFFD instead of
//! failing.

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use std::sync::LazyLock;

/// Matches the charset declaration in either meta form:
/// `<meta charset="...">` or
/// `<meta http-equiv="Content-Type" content="...; charset=...">`.
#[allow(clippy::expect_used)]
static CHARSET_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s;>]+)"#).expect("CHARSET_DECL regex")
});

/// Detect character encoding from the first 1024 bytes of an HTML document.
///
/// Defaults to UTF-8 when no recognizable declaration is present.
#[must_use]
pub fn detect_encoding(html: &[u8]) -> &'static Encoding {
    let head = &html[..html.len().min(1024)];
    let head_str = String::from_utf8_lossy(head);

    CHARSET_DECL
        .captures(&head_str)
        .and_then(|c| c.get(1))
        .and_then(|m| Encoding::for_label(m.as_str().as_bytes()))
        .unwrap_or(UTF_8)
}

/// Transcode HTML bytes to a UTF-8 string, lossily.
#[must_use]
pub fn transcode_to_utf8(html: &[u8]) -> String {
    let encoding = detect_encoding(html);

    if encoding == UTF_8 {
        return String::from_utf8_lossy(html).into_owned();
    }

    let (decoded, _encoding_used, _had_errors) = encoding.decode(html);
    decoded.into_owned()
}
