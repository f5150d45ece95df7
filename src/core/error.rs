//! Error handling for rcengine
//!
//! Two layers, mirroring how the rest of the crate reports failures:
//! - [`RcError`] - strongly-typed engine errors, carried through `anyhow::Result`
//!   so callers can `downcast_ref::<RcError>()` when they need to branch on them
//! - [`ErrorContext`] - a user-facing wrapper with optional details and a suggestion,
//!   produced by [`user_friendly_error`] and printed by the CLI
//!
//! Collaborator errors (I/O, YAML, template, custom handlers) are never wrapped by the
//! engine; they travel unchanged inside the `anyhow::Error` and are only classified here
//! for display.
//!
//! # Examples
//!
//! ```rust,no_run
//! use rcengine::core::{RcError, user_friendly_error};
//!
//! let err = anyhow::Error::from(RcError::UnsupportedOutputMode {
//!     mode: "xml".to_string(),
//! });
//! user_friendly_error(err).display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for engine operations.
///
/// Every variant is fatal to the current `process()` call; there is no retry and no
/// partial output.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RcError {
    /// An operation carries more than one primary directive, or its primary marker
    /// was set twice.
    #[error("Operation {operation} of resource '{resource}' has more than one primary directive (second: '{directive}')")]
    DuplicatePrimary {
        /// Resource being processed
        resource: String,
        /// Index of the offending operation in the working list
        operation: usize,
        /// The primary directive that was rejected
        directive: String,
    },

    /// A key on an operation is not a known directive.
    #[error("Unknown directive '{directive}' in operation {operation} of resource '{resource}'")]
    UnknownDirective {
        /// Resource being processed
        resource: String,
        /// Index of the offending operation
        operation: usize,
        /// The unrecognized key
        directive: String,
    },

    /// The `out` directive argument does not name a reduction mode.
    #[error("Unsupported output mode '{mode}'")]
    UnsupportedOutputMode {
        /// Textual form of the rejected argument
        mode: String,
    },

    /// The `object` reduction produced text that is not valid JSON.
    #[error("Output of mode 'object' is not valid structured data: {reason}")]
    MalformedObjectOutput {
        /// Parser message
        reason: String,
    },

    /// No resource with this name exists in the store.
    #[error("Resource '{name}' not found")]
    ResourceNotFound {
        /// Requested resource name
        name: String,
    },

    /// A directive argument has the wrong shape.
    #[error("Invalid argument for directive '{directive}': {reason}")]
    InvalidArgument {
        /// Directive whose argument was rejected
        directive: String,
        /// What was wrong with it
        reason: String,
    },

    /// A primary directive needs a `with` result that was never computed.
    #[error("Directive '{directive}' requires input from a 'with' directive")]
    MissingInput {
        /// Directive that lacked input
        directive: String,
    },

    /// A `custom` directive names a handler the host never registered.
    #[error("No custom handler registered for '{key}'")]
    CustomHandlerNotFound {
        /// Registry key built from the directive's path and name
        key: String,
    },

    /// Fallback for messages that carry no specific variant.
    #[error("{message}")]
    Other {
        /// Free-form message
        message: String,
    },
}

/// User-facing wrapper around an [`RcError`] with optional details and a suggestion.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: RcError,
    /// What the user can do about it
    pub suggestion: Option<String>,
    /// Additional explanation
    pub details: Option<String>,
}

impl ErrorContext {
    #[must_use]
    pub const fn new(error: RcError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr with colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into a user-friendly [`ErrorContext`].
///
/// Engine errors get a tailored suggestion. Known collaborator errors (I/O, YAML, JSON,
/// TOML, template) are recognized by downcasting; anything else is reported with its
/// full cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(rc_error) = error.downcast_ref::<RcError>() {
        return create_error_context(rc_error.clone());
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        if io_error.kind() == std::io::ErrorKind::NotFound {
            return ErrorContext::new(RcError::Other {
                message: chain_message(&error),
            })
            .with_suggestion("Check that the file exists under the configured 'folders.file' directory")
            .with_details("A 'file' or 'njk' directive points at a path that could not be read");
        }
    }

    if error.downcast_ref::<serde_yaml::Error>().is_some() {
        return ErrorContext::new(RcError::Other {
            message: chain_message(&error),
        })
        .with_suggestion("Check the YAML syntax: indentation, quoting and list markers")
        .with_details("Either a resource definition or the input of a 'yml' directive is not valid YAML");
    }

    if error.downcast_ref::<toml::de::Error>().is_some() {
        return ErrorContext::new(RcError::Other {
            message: chain_message(&error),
        })
        .with_suggestion("Check the TOML syntax in rcengine.toml");
    }

    if error.downcast_ref::<Box<grass::Error>>().is_some() {
        return ErrorContext::new(RcError::Other {
            message: chain_message(&error),
        })
        .with_suggestion("Check the SCSS produced by the 'with' directive of the 'scss' operation");
    }

    if error.downcast_ref::<crate::templating::TemplateError>().is_some() {
        return ErrorContext::new(RcError::Other {
            message: chain_message(&error),
        })
        .with_suggestion(
            "Check template syntax: variables use {{ var }}, control flow uses {% %}. \
             The 'with' result of the operation is the template context",
        );
    }

    ErrorContext::new(RcError::Other {
        message: chain_message(&error),
    })
}

/// Render an error and its causes as one message.
fn chain_message(error: &anyhow::Error) -> String {
    let mut message = error.to_string();
    let chain: Vec<String> = error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    message
}

fn create_error_context(error: RcError) -> ErrorContext {
    match &error {
        RcError::DuplicatePrimary {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Split the operation so that each one has a single primary directive")
            .with_details("Primary directives are: file, scss, md, njk, raw, yml, custom"),
        RcError::UnknownDirective {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Check the directive name for typos")
            .with_details(
                "Known directives: file, scss, md, njk, raw, yml, custom, with, as, in, out",
            ),
        RcError::UnsupportedOutputMode {
            ..
        } => ErrorContext::new(error).with_suggestion(
            "Use one of: raw, string, first_serve, object, property (or leave it empty)",
        ),
        RcError::MalformedObjectOutput {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Make sure the concatenated operation results form one JSON document")
            .with_details("Mode 'object' joins every operation's data as text and parses the result"),
        RcError::ResourceNotFound {
            ..
        } => ErrorContext::new(error).with_suggestion(
            "Run 'rcengine list' to see the available resources, or check 'folders.rc' in rcengine.toml",
        ),
        RcError::InvalidArgument {
            ..
        } => ErrorContext::new(error)
            .with_details("'file', 'njk' and 'custom' expect a mapping with 'path' and 'name'"),
        RcError::MissingInput {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Add a 'with' directive to the same operation to supply the text"),
        RcError::CustomHandlerNotFound {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Register the handler on the application with AppBuilder::custom"),
        RcError::Other {
            ..
        } => ErrorContext::new(error),
    }
}
