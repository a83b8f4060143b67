//! Static file serving module
//!
//! Resolves a request target to an opened file ready to be streamed.

use std::fs::Metadata;
use std::io;
use std::path::Path;
use tokio::fs::File;

use super::error::ServeError;
use super::path::{self, ResolvedPath};
use crate::config::ServeRoot;
use crate::http::mime::{self, ContentDescriptor};

/// An opened file and what to tell the client about it
#[derive(Debug)]
pub struct ServedFile {
    pub resolved: ResolvedPath,
    pub file: File,
    pub len: u64,
    pub content: ContentDescriptor,
}

/// Resolve, guard, open and classify `target`.
///
/// The guard runs before any filesystem access. The target is then opened
/// exactly once; a directory is swapped for its index file only after that
/// open showed it is one.
pub async fn open_target(root: &ServeRoot, target: &str) -> Result<ServedFile, ServeError> {
    let mut resolved = path::resolve(root.root(), target)?;

    let (mut file, mut metadata) = open_with_metadata(&resolved.path).await?;
    if metadata.is_dir() {
        resolved.is_dir = true;
        resolved.path.push(root.index_file());
        (file, metadata) = open_with_metadata(&resolved.path).await?;
        if metadata.is_dir() {
            return Err(ServeError::Io(io::Error::other(format!(
                "index is a directory: {}",
                resolved.path.display()
            ))));
        }
    }

    let content = mime::classify(&resolved.path);
    Ok(ServedFile {
        resolved,
        file,
        len: metadata.len(),
        content,
    })
}

async fn open_with_metadata(path: &Path) -> Result<(File, Metadata), ServeError> {
    let file = File::open(path).await?;
    let metadata = file.metadata().await.map_err(ServeError::Io)?;
    Ok((file, metadata))
}
