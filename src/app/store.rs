//! Resource definitions and the store that holds them.
//!
//! A resource is defined in YAML with a `main` operation list:
//!
//! ```yaml
//! main:
//!   - file: { path: pages, name: header.html }
//!   - md: ~
//!     with:
//!       - file: { path: pages, name: body.md }
//!   - out: raw
//! ```
//!
//! On disk, the store reads `<rc>/<name>/resource.yml` and `<rc>/<name>.yml`
//! (or `.yaml`), where `<rc>` is the `folders.rc` setting.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::constants::RESOURCE_FILE_NAME;
use crate::core::RcError;
use crate::resource::Operation;

/// The stored, immutable definition of one resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceDefinition {
    /// Ordered operation list
    #[serde(default)]
    pub main: Vec<Operation>,
}

impl ResourceDefinition {
    #[must_use]
    pub fn new(main: Vec<Operation>) -> Self {
        Self {
            main,
        }
    }

    /// Parse a definition from YAML text.
    pub fn from_yaml(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }
}

/// Named resource definitions, read once per top-level evaluation.
#[derive(Debug, Clone, Default)]
pub struct ResourceStore {
    resources: BTreeMap<String, ResourceDefinition>,
}

impl ResourceStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, definition: ResourceDefinition) {
        self.resources.insert(name.into(), definition);
    }

    /// Look up a definition by name.
    pub fn get(&self, name: &str) -> Result<&ResourceDefinition, RcError> {
        self.resources.get(name).ok_or_else(|| RcError::ResourceNotFound {
            name: name.to_string(),
        })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.resources.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ResourceDefinition)> {
        self.resources.iter().map(|(name, definition)| (name.as_str(), definition))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Load every resource definition found directly under `dir`.
    ///
    /// A missing directory yields an empty store.
    pub async fn load_dir(dir: &Path) -> Result<Self> {
        let mut store = Self::new();

        if !dir.exists() {
            tracing::warn!("Resource directory {} does not exist", dir.display());
            return Ok(store);
        }

        let mut entries = fs::read_dir(dir)
            .await
            .with_context(|| format!("Failed to read resource directory {}", dir.display()))?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()).map(str::to_string) else {
                continue;
            };

            let definition_path = if entry.file_type().await?.is_dir() {
                let candidate = path.join(RESOURCE_FILE_NAME);
                if !candidate.exists() {
                    tracing::debug!("Skipping {}: no {}", path.display(), RESOURCE_FILE_NAME);
                    continue;
                }
                candidate
            } else if matches!(path.extension().and_then(|e| e.to_str()), Some("yml" | "yaml")) {
                path.clone()
            } else {
                continue;
            };

            let content = fs::read_to_string(&definition_path).await.with_context(|| {
                format!("Failed to read resource definition {}", definition_path.display())
            })?;
            let definition = ResourceDefinition::from_yaml(&content).with_context(|| {
                format!("Failed to parse resource definition {}", definition_path.display())
            })?;

            tracing::debug!(
                "Loaded resource '{}' ({} operations) from {}",
                stem,
                definition.main.len(),
                definition_path.display()
            );
            store.insert(stem, definition);
        }

        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_definition_from_yaml() {
        let definition = ResourceDefinition::from_yaml(
            r#"
main:
  - raw: hello
  - out: first_serve
"#,
        )
        .unwrap();

        assert_eq!(definition.main.len(), 2);
        assert_eq!(definition.main[0].argument("raw"), Some(&json!("hello")));
    }

    #[test]
    fn test_store_get_missing() {
        let store = ResourceStore::new();
        let err = store.get("nope").unwrap_err();
        assert_eq!(
            err,
            RcError::ResourceNotFound {
                name: "nope".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_load_dir() -> Result<()> {
        let temp = TempDir::new()?;
        let rc = temp.path().join("resources");
        std::fs::create_dir_all(rc.join("index"))?;
        std::fs::write(rc.join("index").join(RESOURCE_FILE_NAME), "main:\n  - raw: a\n")?;
        std::fs::write(rc.join("about.yml"), "main:\n  - raw: b\n")?;
        std::fs::write(rc.join("notes.txt"), "ignored")?;
        std::fs::create_dir_all(rc.join("empty"))?;

        let store = ResourceStore::load_dir(&rc).await?;
        let names: Vec<&str> = store.names().collect();
        assert_eq!(names, vec!["about", "index"]);
        assert_eq!(store.get("index")?.main[0].argument("raw"), Some(&json!("a")));
        Ok(())
    }

    #[tokio::test]
    async fn test_load_dir_missing() -> Result<()> {
        let temp = TempDir::new()?;
        let store = ResourceStore::load_dir(&temp.path().join("nothing")).await?;
        assert!(store.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_load_dir_invalid_yaml() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("bad.yml"), "main: [unclosed").unwrap();

        let err = ResourceStore::load_dir(temp.path()).await.unwrap_err();
        assert!(err.to_string().contains("Failed to parse resource definition"));
    }
}
