//! Content classification module
//!
//! Maps a path suffix to the `Content-Type` to send and whether the file is
//! stored gzip-compressed on disk. Only the path is inspected, never content.

use std::path::Path;

/// Placeholder type for precompressed files.
///
/// Browsers only transparently inflate a `Content-Encoding: gzip` body fetched
/// over XHR when it is declared as `text/plain`.
pub const PRECOMPRESSED_CONTENT_TYPE: &str = "text/plain";

/// Result of classifying a path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContentDescriptor {
    pub mime_type: Option<&'static str>,
    pub precompressed: bool,
}

/// One row of the suffix policy
#[derive(Debug, Clone, Copy)]
pub struct SuffixRule {
    pub suffix: &'static str,
    pub mime_type: &'static str,
    pub precompressed: bool,
}

/// Suffix policy, first match wins. Matching is case-sensitive.
pub const SUFFIX_RULES: &[SuffixRule] = &[
    SuffixRule {
        suffix: ".gz",
        mime_type: PRECOMPRESSED_CONTENT_TYPE,
        precompressed: true,
    },
    SuffixRule {
        suffix: ".js",
        mime_type: "text/javascript",
        precompressed: false,
    },
    SuffixRule {
        suffix: ".css",
        mime_type: "text/css",
        precompressed: false,
    },
];

/// Classify a path by the first rule whose suffix it ends with
///
/// # Examples
/// ```
/// use static_responder::http::mime::classify;
/// assert_eq!(classify("app.js".as_ref()).mime_type, Some("text/javascript"));
/// assert!(classify("mesh.bin.gz".as_ref()).precompressed);
/// assert_eq!(classify("photo.png".as_ref()).mime_type, None);
/// ```
pub fn classify(path: &Path) -> ContentDescriptor {
    classify_with(SUFFIX_RULES, &path.to_string_lossy())
}

/// Classify `name` against an explicit rule table
pub fn classify_with(rules: &[SuffixRule], name: &str) -> ContentDescriptor {
    rules
        .iter()
        .find(|rule| name.ends_with(rule.suffix))
        .map_or_else(ContentDescriptor::default, |rule| ContentDescriptor {
            mime_type: Some(rule.mime_type),
            precompressed: rule.precompressed,
        })
}
