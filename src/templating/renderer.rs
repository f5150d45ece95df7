//! Template rendering with Tera.
//!
//! Templates are read through the host file service and rendered from source, so a
//! fresh Tera instance is built per render. The operation's `with` value is the
//! context: a mapping becomes top-level variables, any other value is exposed as
//! `value`, and an absent one renders with an empty context.

use regex::Regex;
use serde_json::Value;
use tera::{Context as TeraContext, Tera};

use super::error::TemplateError;
use crate::constants::TEMPLATE_VALUE_KEY;

/// Renders `njk` templates.
#[derive(Debug, Clone, Default)]
pub struct TemplateRenderer {
    autoescape: bool,
}

impl TemplateRenderer {
    /// Create a renderer. HTML autoescaping is off: `with` values are usually
    /// already-rendered markup.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable HTML autoescaping of interpolated values.
    #[must_use]
    pub fn with_autoescape(mut self, autoescape: bool) -> Self {
        self.autoescape = autoescape;
        self
    }

    /// Build the Tera context for a template from an optional `with` value.
    pub fn build_context(
        template: &str,
        value: Option<&Value>,
    ) -> Result<TeraContext, TemplateError> {
        match value {
            None | Some(Value::Null) => Ok(TeraContext::new()),
            Some(object @ Value::Object(_)) => {
                TeraContext::from_value(object.clone()).map_err(|e| TemplateError::InvalidContext {
                    template: template.to_string(),
                    message: e.to_string(),
                })
            }
            Some(other) => {
                let mut context = TeraContext::new();
                context.insert(TEMPLATE_VALUE_KEY, other);
                Ok(context)
            }
        }
    }

    /// Render template source `content`, registered under `name` for error messages.
    pub fn render(
        &self,
        name: &str,
        content: &str,
        context: &TeraContext,
    ) -> Result<String, TemplateError> {
        tracing::debug!("Rendering template '{}' ({} bytes)", name, content.len());

        let mut tera = Tera::default();
        if self.autoescape {
            tera.autoescape_on(vec![""]);
        } else {
            tera.autoescape_on(vec![]);
        }

        tera.add_raw_template(name, content)
            .and_then(|()| tera.render(name, context))
            .map_err(|e| TemplateError::SyntaxError {
                template: name.to_string(),
                message: Self::format_tera_error(&e),
                line_number: Self::extract_line_from_tera_error(&e),
            })
    }

    /// Extract the line number from a Tera error.
    ///
    /// Tera includes `line:column` in parse error messages, e.g. "1:7" or "15:23".
    fn extract_line_from_tera_error(error: &tera::Error) -> Option<usize> {
        let error_msg = format!("{:?}", error);
        let re = Regex::new(r"(\d+):(\d+)").ok()?;
        re.captures(&error_msg)
            .and_then(|caps| caps.get(1))
            .and_then(|line| line.as_str().parse::<usize>().ok())
    }

    /// Flatten a Tera error chain into one readable message.
    pub fn format_tera_error(error: &tera::Error) -> String {
        use std::error::Error;

        let mut messages = vec![error.to_string()];
        let mut current: Option<&dyn Error> = error.source();
        while let Some(err) = current {
            messages.push(err.to_string());
            current = err.source();
        }

        let messages: Vec<String> = messages
            .into_iter()
            .map(|msg| msg.trim().to_string())
            .filter(|msg| !msg.is_empty())
            .collect();

        if messages.is_empty() {
            "Template syntax error".to_string()
        } else {
            messages.join("\n  -> ")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_with_object_context() {
        let renderer = TemplateRenderer::new();
        let context = TemplateRenderer::build_context("t", Some(&json!({"title": "Hi"}))).unwrap();
        let out = renderer.render("t", "<h1>{{ title }}</h1>", &context).unwrap();
        assert_eq!(out, "<h1>Hi</h1>");
    }

    #[test]
    fn test_render_with_scalar_context() {
        let renderer = TemplateRenderer::new();
        let context = TemplateRenderer::build_context("t", Some(&json!("<p>x</p>"))).unwrap();
        let out = renderer.render("t", "<main>{{ value }}</main>", &context).unwrap();
        assert_eq!(out, "<main><p>x</p></main>");
    }

    #[test]
    fn test_render_autoescape() {
        let renderer = TemplateRenderer::new().with_autoescape(true);
        let context = TemplateRenderer::build_context("t", Some(&json!("<b>"))).unwrap();
        let out = renderer.render("t", "{{ value }}", &context).unwrap();
        assert_eq!(out, "&lt;b&gt;");
    }

    #[test]
    fn test_render_without_context() {
        let renderer = TemplateRenderer::new();
        let context = TemplateRenderer::build_context("t", None).unwrap();
        let out = renderer.render("t", "static {% if x is defined %}x{% endif %}", &context).unwrap();
        assert_eq!(out, "static ");
    }

    #[test]
    fn test_render_missing_variable() {
        let renderer = TemplateRenderer::new();
        let err = renderer.render("page.njk", "{{ missing }}", &TeraContext::new()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("page.njk"), "unexpected message: {msg}");
        assert!(msg.contains("missing"), "unexpected message: {msg}");
    }

    #[test]
    fn test_render_syntax_error() {
        let renderer = TemplateRenderer::new();
        let err = renderer.render("page.njk", "line one\n{{ broken", &TeraContext::new()).unwrap_err();
        assert!(matches!(err, TemplateError::SyntaxError { .. }));
    }
}
