//! Atomic feed file writes.

use std::io::Write;
use std::path::Path;

use crate::error::FeedError;

/// Write `contents` to `path` as UTF-8, replacing any existing file.
///
/// The data goes to a temporary file in the destination directory which is
/// then renamed over `path`, so readers never observe a partial feed. An
/// existing file keeps its permissions; a new one gets the umask default,
/// like a plain `std::fs::write`.
pub fn write_atomic(path: &Path, contents: &str) -> Result<(), FeedError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    std::fs::create_dir_all(dir).map_err(|e| FeedError::write(path, e))?;

    let mut builder = tempfile::Builder::new();
    // Requested mode is masked by the umask on open.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }

    let mut file = builder.tempfile_in(dir).map_err(|e| FeedError::write(path, e))?;
    file.write_all(contents.as_bytes())
        .and_then(|_| file.as_file().sync_all())
        .map_err(|e| FeedError::write(path, e))?;

    if let Ok(existing) = std::fs::metadata(path) {
        if existing.is_file() {
            file.as_file()
                .set_permissions(existing.permissions())
                .map_err(|e| FeedError::write(path, e))?;
        }
    }

    file.persist(path).map_err(|e| FeedError::write(path, e.error))?;
    tracing::debug!(path = %path.display(), bytes = contents.len(), "Feed file written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_creates_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("feed.xml");

        write_atomic(&path, "<rss/>").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<rss/>");
    }

    #[test]
    fn test_write_overwrites_existing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("feed.xml");
        std::fs::write(&path, "old content that is longer than the new one").unwrap();

        write_atomic(&path, "new").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/deeper/feed.xml");

        write_atomic(&path, "ünïcødé").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "ünïcødé");
    }

    #[test]
    fn test_write_leaves_no_temp_files() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("feed.xml");

        write_atomic(&path, "a").unwrap();
        write_atomic(&path, "b").unwrap();
        let entries = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn test_write_to_directory_path_fails() {
        let dir = tempdir().unwrap();
        let result = write_atomic(dir.path(), "x");
        assert!(matches!(result, Err(FeedError::Write { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_new_file_gets_default_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("feed.xml");
        let plain = dir.path().join("plain.xml");

        write_atomic(&path, "<rss/>").unwrap();
        std::fs::write(&plain, "<rss/>").unwrap();

        let mode = |p: &Path| std::fs::metadata(p).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode(&path), mode(&plain));
    }

    #[cfg(unix)]
    #[test]
    fn test_overwrite_keeps_existing_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("feed.xml");
        std::fs::write(&path, "old").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o640)).unwrap();

        write_atomic(&path, "new").unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o640);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
    }
}
