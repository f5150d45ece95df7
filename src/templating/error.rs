//! Template error type.

use std::fmt;

/// Failure while rendering an `njk` template.
#[derive(Debug)]
pub enum TemplateError {
    /// The template did not parse or failed while rendering.
    SyntaxError {
        /// Template file name
        template: String,
        /// Cleaned-up Tera message chain
        message: String,
        /// 1-indexed line, when Tera reported one
        line_number: Option<usize>,
    },

    /// The `with` value could not be turned into a template context.
    InvalidContext {
        /// Template file name
        template: String,
        message: String,
    },
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateError::SyntaxError {
                template,
                message,
                line_number: Some(line),
            } => write!(f, "Template error in '{}' at line {}: {}", template, line, message),
            TemplateError::SyntaxError {
                template,
                message,
                line_number: None,
            } => write!(f, "Template error in '{}': {}", template, message),
            TemplateError::InvalidContext {
                template,
                message,
            } => write!(f, "Invalid context for template '{}': {}", template, message),
        }
    }
}

impl std::error::Error for TemplateError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_line() {
        let err = TemplateError::SyntaxError {
            template: "page.njk".to_string(),
            message: "unexpected end".to_string(),
            line_number: Some(4),
        };
        assert_eq!(err.to_string(), "Template error in 'page.njk' at line 4: unexpected end");
    }

    #[test]
    fn test_display_invalid_context() {
        let err = TemplateError::InvalidContext {
            template: "page.njk".to_string(),
            message: "bad".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid context for template 'page.njk': bad");
    }
}
