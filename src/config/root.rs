// Serve root module
// Immutable per-process view of where content is served from

use std::io;
use std::path::{Path, PathBuf};

/// Read-only serving configuration shared by every request.
///
/// Built once at startup; the root is canonical so the boundary guard can
/// compare lexically normalized request paths against it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServeRoot {
    root: PathBuf,
    index_file: String,
}

impl ServeRoot {
    /// Canonicalize `root` and fail if it is not a directory.
    pub fn new(root: impl AsRef<Path>, index_file: impl Into<String>) -> io::Result<Self> {
        let root = root.as_ref().canonicalize()?;
        if !root.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("serve root is not a directory: {}", root.display()),
            ));
        }

        Ok(Self {
            root,
            index_file: index_file.into(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn index_file(&self) -> &str {
        &self.index_file
    }
}
