//! Request path resolution
//!
//! Turns a request target into a filesystem path under the serve root and
//! decides whether that path may be touched at all. Nothing here performs
//! I/O, so a rejected request never reveals whether its target exists.

use percent_encoding::percent_decode_str;
use std::path::{Component, Path, PathBuf};

use super::error::ServeError;

/// A path that passed the boundary guard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    pub path: PathBuf,
    /// Set once opening the path showed it is a directory
    pub is_dir: bool,
}

/// Drop the query component (everything from the first `?`)
pub fn strip_query(target: &str) -> &str {
    target.split_once('?').map_or(target, |(path, _)| path)
}

/// Resolve `target` against `root` without touching the filesystem.
///
/// The path is percent-decoded, then `.` and empty segments are dropped and
/// `..` removes the previous component. The result may lie outside `root`;
/// [`guard`] decides. Targets that do not decode to UTF-8 are forbidden.
pub fn normalize_target(root: &Path, target: &str) -> Result<PathBuf, ServeError> {
    let decoded = percent_decode_str(strip_query(target))
        .decode_utf8()
        .map_err(|_| ServeError::Forbidden)?;

    let mut resolved = root.to_path_buf();
    for segment in decoded.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                resolved.pop();
            }
            name => resolved.push(name),
        }
    }

    Ok(resolved)
}

/// Admit `candidate` only if it stays inside `root` and no segment below
/// the root is hidden (starts with `.`).
pub fn guard(root: &Path, candidate: PathBuf) -> Result<ResolvedPath, ServeError> {
    let Ok(relative) = candidate.strip_prefix(root) else {
        return Err(ServeError::Forbidden);
    };

    for component in relative.components() {
        let Component::Normal(name) = component else {
            return Err(ServeError::Forbidden);
        };
        let name = name.to_string_lossy();
        if name.starts_with('.') || name.contains(['\0', '\\']) {
            return Err(ServeError::Forbidden);
        }
    }

    Ok(ResolvedPath {
        path: candidate,
        is_dir: false,
    })
}

/// Normalize then guard
pub fn resolve(root: &Path, target: &str) -> Result<ResolvedPath, ServeError> {
    guard(root, normalize_target(root, target)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root() -> PathBuf {
        PathBuf::from("/srv/www")
    }

    fn resolved(target: &str) -> Result<PathBuf, ServeError> {
        resolve(&root(), target).map(|r| r.path)
    }

    #[test]
    fn test_strip_query() {
        assert_eq!(strip_query("/a/b.js?v=1?x"), "/a/b.js");
        assert_eq!(strip_query("/a"), "/a");
        assert_eq!(strip_query("?only"), "");
    }

    #[test]
    fn test_root_target() {
        assert_eq!(resolved("/").unwrap(), root());
        assert_eq!(resolved("").unwrap(), root());
        assert_eq!(resolved("/?page=2").unwrap(), root());
    }

    #[test]
    fn test_dot_segments_are_normalized() {
        assert_eq!(
            resolved("/data/./sub//file.bin").unwrap(),
            root().join("data/sub/file.bin")
        );
        assert_eq!(
            resolved("/data/../style.css").unwrap(),
            root().join("style.css")
        );
    }

    #[test]
    fn test_query_is_ignored() {
        assert_eq!(
            resolved("/scripts/app.js?cache=../../etc").unwrap(),
            root().join("scripts/app.js")
        );
    }

    #[test]
    fn test_percent_decoding() {
        assert_eq!(
            resolved("/my%20file.txt").unwrap(),
            root().join("my file.txt")
        );
        assert!(matches!(resolved("/bad%FF"), Err(ServeError::Forbidden)));
    }

    #[test]
    fn test_traversal_is_forbidden() {
        for target in [
            "/../etc/passwd",
            "/../../../../etc/passwd",
            "/data/../../secret",
            "/%2e%2e/etc/passwd",
            "/..%2f..%2fetc/passwd",
        ] {
            assert!(
                matches!(resolved(target), Err(ServeError::Forbidden)),
                "{target} should be forbidden"
            );
        }
    }

    #[test]
    fn test_sibling_with_common_prefix_is_forbidden() {
        // /srv/www-private shares a string prefix with /srv/www
        assert!(matches!(
            resolved("/../www-private/key.pem"),
            Err(ServeError::Forbidden)
        ));
    }

    #[test]
    fn test_reentering_root_is_allowed() {
        assert_eq!(
            resolved("/../www/index.html").unwrap(),
            root().join("index.html")
        );
    }

    #[test]
    fn test_hidden_segments_are_forbidden() {
        for target in ["/.git/config", "/data/.hidden/file", "/.env", "/%2egit/HEAD"] {
            assert!(
                matches!(resolved(target), Err(ServeError::Forbidden)),
                "{target} should be forbidden"
            );
        }
    }

    #[test]
    fn test_dotted_root_is_not_hidden() {
        let dotted = PathBuf::from("/home/user/.site");
        let resolved = resolve(&dotted, "/index.html").unwrap();
        assert_eq!(resolved.path, dotted.join("index.html"));
        assert!(!resolved.is_dir);
    }

    #[test]
    fn test_control_characters_are_forbidden() {
        assert!(matches!(resolved("/a%00b"), Err(ServeError::Forbidden)));
        assert!(matches!(resolved("/a%5C..%5Cb"), Err(ServeError::Forbidden)));
    }

    #[test]
    fn test_dots_inside_names_are_allowed() {
        assert_eq!(
            resolved("/mesh.v2.bin.gz").unwrap(),
            root().join("mesh.v2.bin.gz")
        );
        assert_eq!(resolved("/a..b").unwrap(), root().join("a..b"));
    }
}
