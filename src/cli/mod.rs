//! Command-line interface for rcengine.
//!
//! # Commands
//!
//! - `render` - evaluate a resource and print its output
//! - `list` - list the resources of a project
//! - `validate` - check resource definitions without executing them
//!
//! # Global Options
//!
//! - `--root <DIR>` - project root (default: current directory, `~` and `$VAR` expanded)
//! - `--config <FILE>` - settings file (default: `<root>/rcengine.toml`)
//! - `--verbose` - debug logging
//! - `--quiet` - errors only
//!
//! ```bash
//! rcengine --root ~/site render index
//! rcengine render card --input '{"title": "Hello"}'
//! rcengine validate --format json
//! ```

pub mod list;
pub mod render;
pub mod validate;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::app::App;

/// Default log filter when neither a flag nor `RUST_LOG` is given.
const DEFAULT_LOG_LEVEL: &str = "warn";

/// Output format shared by `list` and `validate`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text with colored markers
    Text,
    /// Structured JSON for scripts
    Json,
}

/// Runtime configuration derived from the global flags.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Explicit log filter; `None` defers to `RUST_LOG`.
    pub log_level: Option<String>,
    /// Expanded project root.
    pub root: PathBuf,
    /// Settings file override.
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Install the global tracing subscriber, writing to stderr.
    ///
    /// Does nothing if a subscriber is already installed.
    pub fn init_logging(&self) {
        let filter = match &self.log_level {
            Some(level) => EnvFilter::new(level),
            None => EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL)),
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }

    /// Load the project at `root`.
    pub async fn load_app(&self) -> Result<App> {
        App::load(&self.root, self.config_path.clone()).await
    }
}

/// Top-level parser.
#[derive(Parser)]
#[command(
    name = "rcengine",
    about = "Render declarative resources",
    version,
    long_about = "rcengine evaluates resource definitions (lists of directive operations) \
                  and prints the rendered output."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Project root directory.
    #[arg(long, global = true, value_name = "DIR", env = "RCENGINE_ROOT")]
    root: Option<String>,

    /// Path to the settings file.
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a resource and print its output.
    Render(render::RenderCommand),

    /// List the resources of the project.
    List(list::ListCommand),

    /// Check resource definitions without executing any directive.
    Validate(validate::ValidateCommand),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config()?;
        self.execute_with_config(config).await
    }

    /// Translate global flags into a [`CliConfig`].
    pub fn build_config(&self) -> Result<CliConfig> {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            Some("error".to_string())
        } else {
            None
        };

        let root = match &self.root {
            Some(root) => expand_path(root)?,
            None => std::env::current_dir().context("Failed to determine current directory")?,
        };
        let config_path = self.config.as_deref().map(expand_path).transpose()?;

        Ok(CliConfig {
            log_level,
            root,
            config_path,
        })
    }

    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        config.init_logging();
        tracing::debug!("Project root: {}", config.root.display());

        match self.command {
            Commands::Render(cmd) => cmd.execute(&config).await,
            Commands::List(cmd) => cmd.execute(&config).await,
            Commands::Validate(cmd) => cmd.execute(&config).await,
        }
    }
}

/// Expand `~` and environment variables in a path argument.
fn expand_path(raw: &str) -> Result<PathBuf> {
    let expanded = shellexpand::full(raw)
        .with_context(|| format!("Failed to expand path: {raw}"))?;
    Ok(PathBuf::from(expanded.as_ref()))
}
