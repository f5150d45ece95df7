//! In-memory file service.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use anyhow::{Result, anyhow};
use futures::FutureExt;
use futures::future::BoxFuture;

use crate::app::FileService;

/// A [`FileService`] over a map of paths to contents.
///
/// Paths are stored as given to [`with_file`](Self::with_file), e.g. `files/pages/a.md`
/// for a `file: {path: pages, name: a.md}` directive under the default folder layout.
/// Every read is recorded.
#[derive(Debug, Default)]
pub struct MemoryFileService {
    files: HashMap<PathBuf, String>,
    reads: Mutex<Vec<PathBuf>>,
}

impl MemoryFileService {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.files.insert(path.into(), content.into());
        self
    }

    /// Paths read so far, in order.
    #[must_use]
    pub fn reads(&self) -> Vec<PathBuf> {
        self.reads.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl FileService for MemoryFileService {
    fn get_file<'a>(&'a self, dir: &'a Path, name: &'a str) -> BoxFuture<'a, Result<String>> {
        async move {
            let path = dir.join(name);
            self.reads.lock().unwrap_or_else(PoisonError::into_inner).push(path.clone());
            self.files
                .get(&path)
                .cloned()
                .ok_or_else(|| anyhow!("Failed to read file {}", path.display()))
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_file_records_reads() {
        let files = MemoryFileService::new().with_file("files/a/b.txt", "hello");

        let content = files.get_file(Path::new("files/a"), "b.txt").await.unwrap();
        assert_eq!(content, "hello");
        assert!(files.get_file(Path::new("files/a"), "missing.txt").await.is_err());
        assert_eq!(files.reads().len(), 2);
    }
}
