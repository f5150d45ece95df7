//! Temporary project directories.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;

use crate::constants::{CONFIG_FILE_NAME, DEFAULT_FILE_FOLDER, DEFAULT_RC_FOLDER};

/// A project laid out the way `rcengine` expects, removed on drop.
pub struct TestProject {
    temp_dir: TempDir,
}

impl TestProject {
    /// Create an empty project with the default `files/` and `resources/` folders.
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        std::fs::create_dir_all(temp_dir.path().join(DEFAULT_FILE_FOLDER))?;
        std::fs::create_dir_all(temp_dir.path().join(DEFAULT_RC_FOLDER))?;
        Ok(Self {
            temp_dir,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write `content` to `relative`, creating parent directories.
    pub fn write_file(&self, relative: impl AsRef<Path>, content: &str) -> Result<PathBuf> {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    /// Write a content file under `files/`.
    pub fn write_content(&self, relative: impl AsRef<Path>, content: &str) -> Result<PathBuf> {
        self.write_file(Path::new(DEFAULT_FILE_FOLDER).join(relative), content)
    }

    /// Write the definition of resource `name` to `resources/<name>.yml`.
    pub fn write_resource(&self, name: &str, yaml: &str) -> Result<PathBuf> {
        self.write_file(Path::new(DEFAULT_RC_FOLDER).join(format!("{name}.yml")), yaml)
    }

    /// Write `rcengine.toml`.
    pub fn write_config(&self, toml: &str) -> Result<PathBuf> {
        self.write_file(CONFIG_FILE_NAME, toml)
    }
}
