//! Call-scoped staging directory
//!
//! A [`TransientWorkspace`] owns a uniquely named directory for the lifetime
//! of one extraction call. Release happens exactly once: either explicitly
//! through [`TransientWorkspace::release`], which reports failures, or on
//! drop, which logs them.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::{debug, warn};

#[derive(Debug)]
pub struct TransientWorkspace {
    dir: Option<TempDir>,
    path: PathBuf,
}

impl TransientWorkspace {
    /// Creates a fresh directory under `root` (the system temp dir when `None`)
    pub fn create(root: Option<&Path>, prefix: &str) -> io::Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(prefix);

        let dir = match root {
            Some(root) => {
                fs::create_dir_all(root)?;
                builder.tempdir_in(root)?
            }
            None => builder.tempdir()?,
        };
        let path = dir.path().to_path_buf();
        debug!(workspace = %path.display(), "created transient workspace");

        Ok(Self {
            dir: Some(dir),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Lists the regular files staged in the workspace, in directory order
    pub fn staged_files(&self) -> io::Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(&self.path)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                files.push(entry.path());
            }
        }
        Ok(files)
    }

    /// Removes the directory and everything in it
    pub fn release(mut self) -> io::Result<()> {
        match self.dir.take() {
            Some(dir) => {
                dir.close()?;
                debug!(workspace = %self.path.display(), "released transient workspace");
                Ok(())
            }
            None => Ok(()),
        }
    }
}

impl Drop for TransientWorkspace {
    fn drop(&mut self) {
        if let Some(dir) = self.dir.take() {
            match dir.close() {
                Ok(()) => {
                    debug!(workspace = %self.path.display(), "released transient workspace on drop")
                }
                Err(e) => warn!(
                    workspace = %self.path.display(),
                    error = %e,
                    "failed to remove transient workspace"
                ),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_removes_directory_and_contents() {
        let root = tempfile::tempdir().unwrap();
        let workspace = TransientWorkspace::create(Some(root.path()), "ws-").unwrap();
        let path = workspace.path().to_path_buf();
        fs::write(path.join("image1.png"), b"png").unwrap();

        workspace.release().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_drop_removes_directory() {
        let root = tempfile::tempdir().unwrap();
        let path = {
            let workspace = TransientWorkspace::create(Some(root.path()), "ws-").unwrap();
            workspace.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[test]
    fn test_workspaces_are_unique() {
        let root = tempfile::tempdir().unwrap();
        let first = TransientWorkspace::create(Some(root.path()), "ws-").unwrap();
        let second = TransientWorkspace::create(Some(root.path()), "ws-").unwrap();
        assert_ne!(first.path(), second.path());
        assert!(first
            .path()
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with("ws-")));
    }

    #[test]
    fn test_staged_files_skips_directories() {
        let workspace = TransientWorkspace::create(None, "ws-").unwrap();
        fs::write(workspace.path().join("a.png"), b"a").unwrap();
        fs::create_dir(workspace.path().join("nested")).unwrap();

        let files = workspace.staged_files().unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("a.png"));
    }
}
