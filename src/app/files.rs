//! File access for directive handlers.
//!
//! The engine never touches the file system directly; `file` and `njk` go through a
//! [`FileService`]. [`LocalFileService`] is the disk-backed implementation the CLI uses.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use futures::FutureExt;
use futures::future::BoxFuture;
use tokio::fs;

/// Path joining and file reading, as consumed by directive handlers.
pub trait FileService: Send + Sync {
    /// Join `relative` onto `base`.
    fn join(&self, base: &Path, relative: &Path) -> PathBuf {
        base.join(relative)
    }

    /// Read the file `name` inside directory `dir` as text.
    fn get_file<'a>(&'a self, dir: &'a Path, name: &'a str) -> BoxFuture<'a, Result<String>>;
}

/// Reads files from disk, resolving relative paths against a project root.
#[derive(Debug, Clone)]
pub struct LocalFileService {
    root: PathBuf,
}

impl LocalFileService {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl FileService for LocalFileService {
    fn get_file<'a>(&'a self, dir: &'a Path, name: &'a str) -> BoxFuture<'a, Result<String>> {
        async move {
            let path = self.root.join(dir).join(name);
            tracing::trace!("Reading {}", path.display());
            fs::read_to_string(&path)
                .await
                .with_context(|| format!("Failed to read file {}", path.display()))
        }
        .boxed()
    }
}
