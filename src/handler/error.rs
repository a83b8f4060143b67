//! Request failure kinds
//!
//! Each kind maps to exactly one status code. The client only ever sees the
//! status; details stay in the server log.

use hyper::StatusCode;
use std::fmt;
use std::io;

#[derive(Debug)]
pub enum ServeError {
    /// Traversal outside the root or a hidden segment
    Forbidden,
    /// Nothing exists at the resolved path (or it vanished before open)
    NotFound,
    /// Any other filesystem failure
    Io(io::Error),
}

impl ServeError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<io::Error> for ServeError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound | io::ErrorKind::NotADirectory => Self::NotFound,
            _ => Self::Io(err),
        }
    }
}

impl fmt::Display for ServeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Forbidden => f.write_str("access forbidden"),
            Self::NotFound => f.write_str("not found"),
            Self::Io(err) => write!(f, "i/o error: {err}"),
        }
    }
}

impl std::error::Error for ServeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ServeError::Forbidden.status(), StatusCode::FORBIDDEN);
        assert_eq!(ServeError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ServeError::Io(io::Error::other("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let missing = ServeError::from(io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(missing, ServeError::NotFound));

        let denied = ServeError::from(io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(matches!(denied, ServeError::Io(_)));
        assert_eq!(denied.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
