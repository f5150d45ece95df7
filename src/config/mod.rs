//! Configuration management for rcengine
//!
//! A project is a directory with an optional `rcengine.toml`, a content folder and a
//! resource folder:
//!
//! ```text
//! project/
//! ├── rcengine.toml
//! ├── files/            # folders.file - content read by file/njk directives
//! │   └── pages/intro.md
//! └── resources/        # folders.rc - one definition per resource
//!     ├── index/resource.yml
//!     └── about.yml
//! ```
//!
//! # Examples
//!
//! ```rust,no_run
//! use rcengine::config::Settings;
//! use std::path::Path;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let settings = Settings::load_or_default(Path::new("rcengine.toml")).await?;
//! println!("content root: {}", settings.folders.file.display());
//! # Ok(())
//! # }
//! ```

mod settings;

pub use settings::{Folders, MarkdownSettings, Settings};
