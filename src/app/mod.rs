//! The host application that resource contexts run inside.
//!
//! [`App`] bundles every collaborator the engine consumes:
//!
//! - [`FileService`] - path joining and file reads (`file`, `njk`)
//! - [`TemplateRenderer`] - template rendering (`njk`)
//! - structured-data parsing (`yml`), markdown (`md`) and SCSS (`scss`)
//! - [`ResourceStore`] - named resource definitions
//! - [`CustomRegistry`] - host callbacks for `custom`
//! - [`Settings`] - folder layout and renderer options
//!
//! # Examples
//!
//! ```rust,no_run
//! use rcengine::app::App;
//! use rcengine::resource::ResourceContext;
//! use serde_json::Value;
//! use std::sync::Arc;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let app = Arc::new(App::load("./site", None).await?);
//! let mut context = ResourceContext::new(Arc::clone(&app), "index", Value::Null)?;
//! let html = context.process().await?;
//! println!("{html}");
//! # Ok(())
//! # }
//! ```

mod custom;
mod files;
mod store;

pub use custom::{CustomCall, CustomHandler, CustomRegistry};
pub use files::{FileService, LocalFileService};
pub use store::{ResourceDefinition, ResourceStore};

use std::fmt;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use serde_json::Value;

use crate::config::Settings;
use crate::constants::CONFIG_FILE_NAME;
use crate::render;
use crate::templating::TemplateRenderer;

/// Host application: services, settings and resource definitions.
pub struct App {
    root_dir: PathBuf,
    settings: Settings,
    files: Arc<dyn FileService>,
    templates: TemplateRenderer,
    resources: ResourceStore,
    custom: CustomRegistry,
}

impl App {
    /// Start building an application rooted at `root_dir`.
    #[must_use]
    pub fn builder(root_dir: impl Into<PathBuf>) -> AppBuilder {
        AppBuilder::new(root_dir)
    }

    /// Load a project from disk.
    ///
    /// Reads settings from `config` (default `<root>/rcengine.toml`, optional) and every
    /// resource definition under `<root>/<folders.rc>`.
    pub async fn load(root_dir: impl Into<PathBuf>, config: Option<PathBuf>) -> Result<Self> {
        let root_dir = root_dir.into();
        let config = config.unwrap_or_else(|| root_dir.join(CONFIG_FILE_NAME));
        let settings = Settings::load_or_default(&config).await?;
        let resources = ResourceStore::load_dir(&root_dir.join(&settings.folders.rc)).await?;

        tracing::debug!(
            "Loaded project {} with {} resource(s)",
            root_dir.display(),
            resources.len()
        );

        Ok(Self::builder(root_dir).settings(settings).resources(resources).build())
    }

    /// Absolute base path for file and custom-handler resolution.
    #[must_use]
    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub fn files(&self) -> &dyn FileService {
        self.files.as_ref()
    }

    #[must_use]
    pub fn resources(&self) -> &ResourceStore {
        &self.resources
    }

    #[must_use]
    pub fn custom(&self) -> &CustomRegistry {
        &self.custom
    }

    /// Resolve `relative` against the content root (`folders.file`).
    #[must_use]
    pub fn content_path(&self, relative: &Path) -> PathBuf {
        self.files.join(&self.settings.folders.file, relative)
    }

    /// Read template `name` in `dir` and render it with `context`.
    pub async fn render_template(
        &self,
        dir: &Path,
        name: &str,
        context: Option<&Value>,
    ) -> Result<String> {
        let source = self.files.get_file(dir, name).await?;
        let context = TemplateRenderer::build_context(name, context)?;
        Ok(self.templates.render(name, &source, &context)?)
    }

    /// Parse structured data.
    pub fn parse_yaml(&self, text: &str) -> Result<Value> {
        render::parse_yaml(text)
    }

    #[must_use]
    pub fn render_markdown(&self, markdown: &str) -> String {
        render::render_markdown(markdown, &self.settings.markdown)
    }

    /// Compile SCSS; compiler errors surface as `Box<grass::Error>` inside the `anyhow::Error`.
    pub fn compile_scss(&self, scss: &str) -> Result<String> {
        Ok(render::compile_scss(scss)?)
    }
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("root_dir", &self.root_dir)
            .field("settings", &self.settings)
            .field("resources", &self.resources.len())
            .field("custom", &self.custom)
            .finish_non_exhaustive()
    }
}

/// Builder for [`App`].
pub struct AppBuilder {
    root_dir: PathBuf,
    settings: Settings,
    files: Option<Arc<dyn FileService>>,
    templates: TemplateRenderer,
    resources: ResourceStore,
    custom: CustomRegistry,
}

impl AppBuilder {
    #[must_use]
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
            settings: Settings::default(),
            files: None,
            templates: TemplateRenderer::new(),
            resources: ResourceStore::new(),
            custom: CustomRegistry::new(),
        }
    }

    #[must_use]
    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Use a custom file service instead of reading from `root_dir` on disk.
    #[must_use]
    pub fn files(mut self, files: Arc<dyn FileService>) -> Self {
        self.files = Some(files);
        self
    }

    #[must_use]
    pub fn templates(mut self, templates: TemplateRenderer) -> Self {
        self.templates = templates;
        self
    }

    #[must_use]
    pub fn resources(mut self, resources: ResourceStore) -> Self {
        self.resources = resources;
        self
    }

    /// Add or replace a single resource definition.
    #[must_use]
    pub fn resource(mut self, name: impl Into<String>, definition: ResourceDefinition) -> Self {
        self.resources.insert(name, definition);
        self
    }

    /// Register a handler for `custom` directives addressed as `key` (`path/name`).
    #[must_use]
    pub fn custom<F, Fut>(mut self, key: impl Into<String>, handler: F) -> Self
    where
        F: Fn(CustomCall) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value>> + Send + 'static,
    {
        self.custom.register(key, handler);
        self
    }

    #[must_use]
    pub fn build(self) -> App {
        let files = self
            .files
            .unwrap_or_else(|| Arc::new(LocalFileService::new(self.root_dir.clone())));

        App {
            root_dir: self.root_dir,
            settings: self.settings,
            files,
            templates: self.templates,
            resources: self.resources,
            custom: self.custom,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::Operation;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_project() -> Result<()> {
        let temp = TempDir::new()?;
        std::fs::write(temp.path().join(CONFIG_FILE_NAME), "[folders]\nrc = \"defs\"\n")?;
        std::fs::create_dir_all(temp.path().join("defs"))?;
        std::fs::write(temp.path().join("defs/home.yml"), "main:\n  - raw: hi\n")?;

        let app = App::load(temp.path(), None).await?;
        assert_eq!(app.settings().folders.rc, PathBuf::from("defs"));
        assert_eq!(app.resources().names().collect::<Vec<_>>(), vec!["home"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_render_template_from_disk() -> Result<()> {
        let temp = TempDir::new()?;
        std::fs::create_dir_all(temp.path().join("files/tpl"))?;
        std::fs::write(temp.path().join("files/tpl/page.njk"), "<b>{{ name }}</b>")?;

        let app = App::builder(temp.path()).build();
        let dir = app.content_path(Path::new("tpl"));
        let out = app
            .render_template(&dir, "page.njk", Some(&serde_json::json!({"name": "x"})))
            .await?;
        assert_eq!(out, "<b>x</b>");
        Ok(())
    }

    #[test]
    fn test_builder_resource() {
        let app = App::builder("/tmp/project")
            .resource("a", ResourceDefinition::new(vec![Operation::new().with_directive("raw", "a")]))
            .custom("scripts/x", |_| async { Ok(Value::Null) })
            .build();

        assert!(app.resources().get("a").is_ok());
        assert!(app.custom().contains("scripts/x"));
        assert_eq!(app.content_path(Path::new("pages")), PathBuf::from("files/pages"));
    }
}
