//! rcengine - declarative resource rendering
//!
//! A resource is a named, ordered list of operations. Each operation is a mapping from
//! directive names to arguments: read a file, render markdown, compile SCSS, render a
//! template, parse YAML, call a host-registered handler. rcengine evaluates a resource
//! in phases and reduces the per-operation results into one output value.
//!
//! ```yaml
//! # resources/page.yml
//! main:
//!   - md: ~
//!     with:
//!       - file: { path: pages, name: intro.md }
//!   - njk: { path: templates, name: footer.njk }
//!     with:
//!       - raw: '{"year": 2024}'
//!       - out: object
//!   - out: raw
//! ```
//!
//! # Core Modules
//!
//! - [`core`] - directive classification and the error type
//! - [`resource`] - operations, the resource context and output reduction
//! - [`app`] - the host application: file service, resource store, custom handlers
//! - [`render`] - markdown, SCSS and YAML renderers
//! - [`templating`] - template rendering for the `njk` directive
//! - [`config`] - `rcengine.toml` settings
//! - [`cli`] - the `rcengine` command line

// Engine
pub mod core;
pub mod resource;

// Host application and collaborators
pub mod app;
pub mod render;
pub mod templating;

// Supporting modules
pub mod cli;
pub mod config;
pub mod constants;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
