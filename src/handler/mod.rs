//! Request handler module
//!
//! Path normalization, boundary guard, file opening and request dispatch.

pub mod error;
pub mod path;
pub mod router;
pub mod static_files;

// Re-export main entry point
pub use error::ServeError;
pub use router::handle_request;
