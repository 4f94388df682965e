//! Completion marker handling.
//!
//! A marker is a zero-length file next to the destination, named after it with
//! an `.ok` suffix. It is only ever created once the destination has been fully
//! written and verified, and its presence alone makes later runs skip.

use std::io;
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tracing::{debug, warn};

/// Suffix appended to the destination path to name its marker.
pub const MARKER_SUFFIX: &str = ".ok";

/// Returns the marker path for `path`.
///
/// ```rust
/// use std::path::Path;
/// use stashget::download::marker::marker_path;
///
/// assert_eq!(marker_path(Path::new("/tmp/file.bin")), Path::new("/tmp/file.bin.ok"));
/// ```
pub fn marker_path(path: &Path) -> PathBuf {
    let mut marker = path.as_os_str().to_owned();
    marker.push(MARKER_SUFFIX);
    PathBuf::from(marker)
}

/// Checks whether the marker for `path` exists.
pub async fn is_marked(path: &Path) -> bool {
    fs::try_exists(marker_path(path)).await.unwrap_or(false)
}

/// Creates the marker for `path` if it does not exist yet.
///
/// A marker that already exists counts as created.
pub async fn create_marker(path: &Path) -> io::Result<()> {
    let marker = marker_path(path);
    match OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&marker)
        .await
    {
        Ok(_) => {
            debug!("Created completion marker {:?}", marker);
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(()),
        Err(e) => Err(e),
    }
}

/// Creates the marker, logging instead of failing.
pub(crate) async fn mark_complete(path: &Path) {
    if let Err(e) = create_marker(path).await {
        warn!("Could not create completion marker for {:?}: {}", path, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_path_keeps_extension() {
        assert_eq!(
            marker_path(Path::new("out/archive.tar.gz")),
            PathBuf::from("out/archive.tar.gz.ok")
        );
        assert_eq!(marker_path(Path::new("noext")), PathBuf::from("noext.ok"));
    }

    #[tokio::test]
    async fn test_create_marker_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("file.bin");

        assert!(!is_marked(&path).await);
        create_marker(&path).await.unwrap();
        assert!(is_marked(&path).await);
        create_marker(&path).await.unwrap();

        let meta = std::fs::metadata(marker_path(&path)).unwrap();
        assert_eq!(meta.len(), 0);
    }

    #[tokio::test]
    async fn test_create_marker_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("file.bin");
        assert!(create_marker(&path).await.is_err());
    }
}
