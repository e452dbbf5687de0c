use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::ScribeError;

const PRIVATE_PREFIX: &str = "yt-";

/// Directory the extractor writes caption files into.
///
/// A private directory is removed when the guard drops, on every exit path.
/// A caller-owned directory is left untouched.
#[derive(Debug)]
pub(crate) enum ScratchDir {
    Private(Option<TempDir>),
    CallerOwned(PathBuf),
}

impl ScratchDir {
    /// Use `caller_dir` verbatim, or create a fresh private directory under `root`
    /// (the system temp directory when `root` is `None`)
    pub fn acquire(caller_dir: Option<&Path>, root: Option<&Path>) -> Result<Self, ScribeError> {
        if let Some(dir) = caller_dir {
            return Ok(Self::CallerOwned(dir.to_path_buf()));
        }

        let mut builder = tempfile::Builder::new();
        builder.prefix(PRIVATE_PREFIX);
        let dir = match root {
            Some(root) => builder.tempdir_in(root),
            None => builder.tempdir(),
        }
        .map_err(|e| ScribeError::ScratchDir(e.to_string()))?;

        tracing::debug!("Created scratch directory: {}", dir.path().display());
        Ok(Self::Private(Some(dir)))
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::Private(Some(dir)) => dir.path(),
            Self::Private(None) => Path::new(""),
            Self::CallerOwned(path) => path,
        }
    }

    #[cfg(test)]
    fn is_private(&self) -> bool {
        matches!(self, Self::Private(_))
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        if let Self::Private(dir) = self {
            if let Some(dir) = dir.take() {
                let path = dir.path().to_path_buf();
                match dir.close() {
                    Ok(()) => tracing::debug!("Removed scratch directory: {}", path.display()),
                    Err(e) => tracing::warn!(
                        "Failed to remove scratch directory {}: {}",
                        path.display(),
                        e
                    ),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_private_dir_removed_on_drop() {
        let scratch = ScratchDir::acquire(None, None).unwrap();
        let path = scratch.path().to_path_buf();
        assert!(scratch.is_private());
        assert!(path.is_dir());

        fs_err::write(path.join("abc.en.vtt"), "WEBVTT\n").unwrap();
        drop(scratch);

        assert!(!path.exists());
    }

    #[test]
    fn test_private_dir_under_root() {
        let root = tempfile::tempdir().unwrap();
        let scratch = ScratchDir::acquire(None, Some(root.path())).unwrap();

        assert!(scratch.path().starts_with(root.path()));
        let name = scratch.path().file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with(PRIVATE_PREFIX));
    }

    #[test]
    fn test_caller_dir_survives_drop() {
        let caller = tempfile::tempdir().unwrap();
        let scratch = ScratchDir::acquire(Some(caller.path()), None).unwrap();
        assert!(!scratch.is_private());
        assert_eq!(scratch.path(), caller.path());

        drop(scratch);
        assert!(caller.path().is_dir());
    }

    #[test]
    fn test_private_path_is_never_empty() {
        let scratch = ScratchDir::acquire(None, None).unwrap();
        assert!(!scratch.path().as_os_str().is_empty());
        assert!(scratch.path().is_absolute());
    }

    #[test]
    fn test_missing_root_fails() {
        let root = tempfile::tempdir().unwrap();
        let missing = root.path().join("does-not-exist");

        let err = ScratchDir::acquire(None, Some(missing.as_path())).unwrap_err();
        assert!(matches!(err, ScribeError::ScratchDir(_)));
    }
}
