//! Core types for rcengine
//!
//! - `error` - [`RcError`], [`ErrorContext`] and [`user_friendly_error`]
//! - `directive` - the closed directive table ([`Directive`], [`DirectiveKind`])
//!
//! Engine errors travel inside `anyhow::Result`; match on them with
//! `err.downcast_ref::<RcError>()`.

pub mod directive;
pub mod error;

pub use directive::{AUXILIARY_FIELDS, Directive, DirectiveKind, PrimaryDirective, SecondaryDirective};
pub use error::{ErrorContext, RcError, user_friendly_error};
