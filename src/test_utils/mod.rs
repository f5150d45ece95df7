//! Test utilities for rcengine
//!
//! Helpers shared by unit tests and the integration suite:
//! - [`init_test_logging`] - one-time tracing setup honoring `RUST_LOG`
//! - [`MemoryFileService`] - an in-memory [`FileService`](crate::app::FileService)
//! - [`TestProject`] - a temporary project directory with resources and content files
//!
//! # Example
//!
//! ```rust,ignore
//! use rcengine::test_utils::TestProject;
//!
//! let project = TestProject::new().unwrap();
//! project.write_resource("home", "main:\n  - raw: hi\n").unwrap();
//! assert!(project.path().join("resources/home.yml").exists());
//! ```

pub mod files;
pub mod project;

pub use files::MemoryFileService;
pub use project::TestProject;

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests, once per process.
///
/// Uses `level` if given, otherwise `RUST_LOG`; with neither, logging stays off.
///
/// ```bash
/// RUST_LOG=rcengine=trace cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true)
            .try_init();
    });
}
