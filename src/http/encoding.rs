//! Accept-Encoding inspection
//!
//! Only one question is ever asked of the header: does it mention `gzip`
//! as a whole word.

const GZIP: &str = "gzip";

/// Whether `accept_encoding` contains the token `gzip` bounded by non-word
/// characters (or the ends of the string), like the regex `\bgzip\b`.
///
/// An absent header is treated as the empty string.
pub fn accepts_gzip(accept_encoding: Option<&str>) -> bool {
    let header = accept_encoding.unwrap_or("");
    let bytes = header.as_bytes();

    header.match_indices(GZIP).any(|(start, _)| {
        let end = start + GZIP.len();
        let before = start == 0 || !is_word_byte(bytes[start - 1]);
        let after = end == bytes.len() || !is_word_byte(bytes[end]);
        before && after
    })
}

const fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}
