//! Integration test suite for rcengine
//!
//! End-to-end tests that run the `rcengine` binary against temporary projects.
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **render**: rendering resources from disk, seed input, failures
//! - **list**: listing the resource store
//! - **validate**: static validation of definitions

mod list;
mod render;
mod validate;

use assert_cmd::Command;
use rcengine::test_utils::TestProject;

/// `rcengine --root <project>` with logging pinned to errors.
pub fn rcengine(project: &TestProject) -> Command {
    let mut cmd = Command::cargo_bin("rcengine").unwrap();
    cmd.env_remove("RCENGINE_ROOT")
        .env("RUST_LOG", "error")
        .env("NO_COLOR", "1")
        .env("CLICOLOR", "0")
        .arg("--root")
        .arg(project.path());
    cmd
}
