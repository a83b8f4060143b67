//! HTTP protocol layer module
//!
//! Content classification, `Accept-Encoding` inspection and response
//! construction, independent of how paths are resolved.

pub mod encoding;
pub mod mime;
pub mod response;

// Re-export commonly used items
pub use encoding::accepts_gzip;
pub use mime::{classify, ContentDescriptor};
pub use response::{build_file_response, build_status_response, file_body, ResponseBody};
