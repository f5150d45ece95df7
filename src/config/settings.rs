//! Project settings (`rcengine.toml`).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::constants::{DEFAULT_FILE_FOLDER, DEFAULT_RC_FOLDER};

fn default_file_folder() -> PathBuf {
    PathBuf::from(DEFAULT_FILE_FOLDER)
}

fn default_rc_folder() -> PathBuf {
    PathBuf::from(DEFAULT_RC_FOLDER)
}

const fn default_true() -> bool {
    true
}

/// Folder layout of a project, relative to its root directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folders {
    /// Content root for `file`, `njk` and `custom` paths.
    #[serde(default = "default_file_folder")]
    pub file: PathBuf,

    /// Directory holding resource definitions (one per resource).
    #[serde(default = "default_rc_folder")]
    pub rc: PathBuf,
}

impl Default for Folders {
    fn default() -> Self {
        Self {
            file: default_file_folder(),
            rc: default_rc_folder(),
        }
    }
}

/// Markdown extensions enabled for the `md` directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkdownSettings {
    #[serde(default = "default_true")]
    pub tables: bool,
    #[serde(default = "default_true")]
    pub strikethrough: bool,
    #[serde(default = "default_true")]
    pub tasklists: bool,
}

impl Default for MarkdownSettings {
    fn default() -> Self {
        Self {
            tables: true,
            strikethrough: true,
            tasklists: true,
        }
    }
}

/// Settings of one project.
///
/// Every field is optional in the file; missing ones take their defaults.
///
/// ```toml
/// [folders]
/// file = "files"
/// rc = "resources"
///
/// [markdown]
/// tables = false
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub folders: Folders,

    #[serde(default)]
    pub markdown: MarkdownSettings,
}

impl Settings {
    /// Load settings from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse settings from {}", path.display()))
    }

    /// Load settings from `path` if it exists, defaults otherwise.
    pub async fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from(path).await
        } else {
            tracing::debug!("No settings at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }
}
