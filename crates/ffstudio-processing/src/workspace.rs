//! Scoped working directory
//!
//! [`WorkDir`] is created once at startup and shared by every request.
//! [`RequestScope`] owns the paths one request allocates inside it and removes
//! them when dropped, whichever way the request ends.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct WorkDir {
    path: Arc<PathBuf>,
}

impl WorkDir {
    /// Create the directory (and parents) if needed
    pub fn create(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();
        std::fs::create_dir_all(&path)
            .with_context(|| format!("Failed to create work dir {}", path.display()))?;
        Ok(Self {
            path: Arc::new(path),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn scope(&self) -> RequestScope {
        RequestScope {
            dir: self.path.clone(),
            paths: Vec::new(),
        }
    }

    /// Write and remove a probe file
    pub async fn check_writable(&self) -> io::Result<()> {
        let probe = self.path.join(format!(".ready-{}", Uuid::new_v4()));
        tokio::fs::write(&probe, b"ok").await?;
        tokio::fs::remove_file(&probe).await
    }
}

/// Every temporary path of one request
#[derive(Debug)]
pub struct RequestScope {
    dir: Arc<PathBuf>,
    paths: Vec<PathBuf>,
}

impl RequestScope {
    /// Reserve `<work_dir>/<uuid>.<ext>`. The file is not created.
    pub fn allocate(&mut self, extension: &str) -> PathBuf {
        let path = self.dir.join(format!("{}.{}", Uuid::new_v4(), extension));
        self.paths.push(path.clone());
        path
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }
}

impl Drop for RequestScope {
    fn drop(&mut self) {
        for path in &self.paths {
            match std::fs::remove_file(path) {
                Ok(()) => tracing::trace!(path = %path.display(), "Removed temp file"),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to remove temp file")
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_removes_files_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let work = WorkDir::create(dir.path().join("work")).unwrap();

        let written;
        {
            let mut scope = work.scope();
            written = scope.allocate("mp3");
            let never_written = scope.allocate("mp4");
            std::fs::write(&written, b"data").unwrap();
            assert!(written.starts_with(work.path()));
            assert_ne!(written, never_written);
            assert_eq!(scope.paths().len(), 2);
        }

        assert!(!written.exists());
        assert_eq!(std::fs::read_dir(work.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_allocations_are_unique_across_scopes() {
        let dir = tempfile::tempdir().unwrap();
        let work = WorkDir::create(dir.path()).unwrap();
        let mut a = work.scope();
        let mut b = work.scope();
        assert_ne!(a.allocate("png"), b.allocate("png"));
    }

    #[tokio::test]
    async fn test_check_writable() {
        let dir = tempfile::tempdir().unwrap();
        let work = WorkDir::create(dir.path()).unwrap();
        work.check_writable().await.unwrap();
        assert_eq!(std::fs::read_dir(work.path()).unwrap().count(), 0);
    }
}
