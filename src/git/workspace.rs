//! Workspace discovery.

use std::path::{Path, PathBuf};

use git2::Repository;
use tracing::debug;

use crate::error::GitError;

/// The working tree root of the repository containing `start`, or the
/// current directory when `start` is `None`.
pub fn discover_workspace(start: Option<&Path>) -> Result<PathBuf, GitError> {
    let start = match start {
        Some(path) => path.to_path_buf(),
        None => std::env::current_dir().map_err(GitError::CurrentDir)?,
    };

    let repo = Repository::discover(&start).map_err(|source| GitError::NotARepository {
        path: start.clone(),
        source,
    })?;

    let workdir = repo
        .workdir()
        .ok_or_else(|| GitError::BareRepository {
            path: repo.path().to_path_buf(),
        })?
        .to_path_buf();

    debug!("Discovered workspace {} from {}", workdir.display(), start.display());
    Ok(workdir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discover_from_subdirectory() {
        let dir = tempfile::tempdir().unwrap();
        Repository::init(dir.path()).unwrap();
        let nested = dir.path().join("src").join("deep");
        std::fs::create_dir_all(&nested).unwrap();

        let root = discover_workspace(Some(&nested)).unwrap();

        assert_eq!(
            root.canonicalize().unwrap(),
            dir.path().canonicalize().unwrap()
        );
    }

    #[test]
    fn test_discover_outside_repository() {
        let dir = tempfile::tempdir().unwrap();
        let err = discover_workspace(Some(dir.path())).unwrap_err();
        assert!(matches!(err, GitError::NotARepository { .. }));
        assert!(err.to_string().contains("Run hotcommit from within a git repository"));
    }

    #[test]
    fn test_discover_bare_repository() {
        let dir = tempfile::tempdir().unwrap();
        Repository::init_bare(dir.path()).unwrap();
        let err = discover_workspace(Some(dir.path())).unwrap_err();
        assert!(matches!(err, GitError::BareRepository { .. }));
    }
}
