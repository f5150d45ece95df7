//! Directive classification
//!
//! Every key on an operation is a directive. Directives fall into four executable
//! classes, and the table is closed:
//!
//! | class | directives |
//! |---|---|
//! | primary | `file`, `scss`, `md`, `njk`, `raw`, `yml`, `custom` |
//! | secondary | `with`, `as` |
//! | input | `in` |
//! | output | `out` |
//!
//! A handful of auxiliary names (`data`, `_with`, `_as`, `primaryCounter`) are computed
//! fields rather than directives. They classify as [`DirectiveKind::Auxiliary`] and are
//! skipped during discovery.
//!
//! # Examples
//!
//! ```rust
//! use rcengine::core::{Directive, DirectiveKind, PrimaryDirective};
//!
//! let directive: Directive = "md".parse().unwrap();
//! assert_eq!(directive, Directive::Primary(PrimaryDirective::Md));
//!
//! assert_eq!(DirectiveKind::classify("data"), DirectiveKind::Auxiliary);
//! assert_eq!(DirectiveKind::classify("fiel"), DirectiveKind::Unknown);
//! ```

use serde::{Deserialize, Serialize};

use crate::core::RcError;

/// Names that are computed operation fields, never directives.
pub const AUXILIARY_FIELDS: &[&str] = &["data", "primaryCounter", "_with", "_as"];

/// Directives that produce an operation's `data`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimaryDirective {
    /// Read a file through the host file service
    File,
    /// Compile the `with` text as SCSS
    Scss,
    /// Render the `with` text as markdown
    Md,
    /// Render a template with the `with` value as context
    Njk,
    /// Pass the argument through unchanged
    Raw,
    /// Parse the `with` text as YAML
    Yml,
    /// Invoke a host-registered handler
    Custom,
}

/// Directives that prepare input for the primary directive of the same operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecondaryDirective {
    /// Evaluate a nested operation list; its output becomes `_with`
    With,
    /// Capture the resource input as the property-selector key `_as`
    As,
}

/// An executable directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Directive {
    Primary(PrimaryDirective),
    Secondary(SecondaryDirective),
    Input,
    Output,
}

/// Result of classifying an operation key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectiveKind {
    Primary(PrimaryDirective),
    Secondary(SecondaryDirective),
    Input,
    Output,
    /// A computed field name; ignored during discovery
    Auxiliary,
    /// Not a directive at all; the resource definition is malformed
    Unknown,
}

impl PrimaryDirective {
    pub const ALL: [PrimaryDirective; 7] = [
        PrimaryDirective::File,
        PrimaryDirective::Scss,
        PrimaryDirective::Md,
        PrimaryDirective::Njk,
        PrimaryDirective::Raw,
        PrimaryDirective::Yml,
        PrimaryDirective::Custom,
    ];

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            PrimaryDirective::File => "file",
            PrimaryDirective::Scss => "scss",
            PrimaryDirective::Md => "md",
            PrimaryDirective::Njk => "njk",
            PrimaryDirective::Raw => "raw",
            PrimaryDirective::Yml => "yml",
            PrimaryDirective::Custom => "custom",
        }
    }

    /// Whether the handler consumes the operation's `_with` value as its input text.
    #[must_use]
    pub const fn reads_with(&self) -> bool {
        matches!(self, PrimaryDirective::Scss | PrimaryDirective::Md | PrimaryDirective::Yml)
    }

    /// Whether the argument is a `{path, name}` reference.
    #[must_use]
    pub const fn takes_file_ref(&self) -> bool {
        matches!(self, PrimaryDirective::File | PrimaryDirective::Njk | PrimaryDirective::Custom)
    }
}

impl SecondaryDirective {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            SecondaryDirective::With => "with",
            SecondaryDirective::As => "as",
        }
    }
}

impl Directive {
    /// The key this directive is written as.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Directive::Primary(primary) => primary.name(),
            Directive::Secondary(secondary) => secondary.name(),
            Directive::Input => "in",
            Directive::Output => "out",
        }
    }
}

impl DirectiveKind {
    /// Classify an operation key against the closed directive table.
    #[must_use]
    pub fn classify(name: &str) -> Self {
        match name {
            "file" => DirectiveKind::Primary(PrimaryDirective::File),
            "scss" => DirectiveKind::Primary(PrimaryDirective::Scss),
            "md" => DirectiveKind::Primary(PrimaryDirective::Md),
            "njk" => DirectiveKind::Primary(PrimaryDirective::Njk),
            "raw" => DirectiveKind::Primary(PrimaryDirective::Raw),
            "yml" => DirectiveKind::Primary(PrimaryDirective::Yml),
            "custom" => DirectiveKind::Primary(PrimaryDirective::Custom),
            "with" => DirectiveKind::Secondary(SecondaryDirective::With),
            "as" => DirectiveKind::Secondary(SecondaryDirective::As),
            "in" => DirectiveKind::Input,
            "out" => DirectiveKind::Output,
            _ if AUXILIARY_FIELDS.contains(&name) => DirectiveKind::Auxiliary,
            _ => DirectiveKind::Unknown,
        }
    }

    /// The executable directive, if this kind is one.
    #[must_use]
    pub const fn directive(&self) -> Option<Directive> {
        match *self {
            DirectiveKind::Primary(primary) => Some(Directive::Primary(primary)),
            DirectiveKind::Secondary(secondary) => Some(Directive::Secondary(secondary)),
            DirectiveKind::Input => Some(Directive::Input),
            DirectiveKind::Output => Some(Directive::Output),
            DirectiveKind::Auxiliary | DirectiveKind::Unknown => None,
        }
    }
}

impl std::fmt::Display for Directive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::fmt::Display for PrimaryDirective {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for Directive {
    type Err = RcError;

    /// Parse an executable directive. Auxiliary names are rejected too, since they are
    /// fields and not directives.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DirectiveKind::classify(s).directive().ok_or_else(|| RcError::UnknownDirective {
            resource: String::new(),
            operation: 0,
            directive: s.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_primary() {
        for primary in PrimaryDirective::ALL {
            assert_eq!(DirectiveKind::classify(primary.name()), DirectiveKind::Primary(primary));
        }
    }

    #[test]
    fn test_classify_other_classes() {
        assert_eq!(
            DirectiveKind::classify("with"),
            DirectiveKind::Secondary(SecondaryDirective::With)
        );
        assert_eq!(DirectiveKind::classify("as"), DirectiveKind::Secondary(SecondaryDirective::As));
        assert_eq!(DirectiveKind::classify("in"), DirectiveKind::Input);
        assert_eq!(DirectiveKind::classify("out"), DirectiveKind::Output);
    }

    #[test]
    fn test_classify_auxiliary() {
        for name in AUXILIARY_FIELDS {
            assert_eq!(DirectiveKind::classify(name), DirectiveKind::Auxiliary);
        }
    }

    #[test]
    fn test_classify_is_case_sensitive() {
        assert_eq!(DirectiveKind::classify("File"), DirectiveKind::Unknown);
        assert_eq!(DirectiveKind::classify(""), DirectiveKind::Unknown);
        assert_eq!(DirectiveKind::classify("template"), DirectiveKind::Unknown);
    }

    #[test]
    fn test_directive_from_str() {
        use std::str::FromStr;

        assert_eq!(Directive::from_str("in").unwrap(), Directive::Input);
        assert_eq!(
            Directive::from_str("custom").unwrap(),
            Directive::Primary(PrimaryDirective::Custom)
        );

        let err = Directive::from_str("data").unwrap_err();
        assert!(matches!(err, RcError::UnknownDirective { directive, .. } if directive == "data"));
    }

    #[test]
    fn test_directive_name_round_trip() {
        for name in ["file", "scss", "md", "njk", "raw", "yml", "custom", "with", "as", "in", "out"]
        {
            let directive: Directive = name.parse().unwrap();
            assert_eq!(directive.to_string(), name);
        }
    }

    #[test]
    fn test_reads_with() {
        assert!(PrimaryDirective::Md.reads_with());
        assert!(PrimaryDirective::Scss.reads_with());
        assert!(PrimaryDirective::Yml.reads_with());
        assert!(!PrimaryDirective::Raw.reads_with());
        assert!(!PrimaryDirective::Njk.reads_with());
    }
}
