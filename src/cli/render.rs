//! `rcengine render`: evaluate one resource.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;

use super::CliConfig;
use crate::resource::ResourceContext;

#[derive(Args, Debug)]
pub struct RenderCommand {
    /// Name of the resource to render
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Seed data for the resource, as JSON
    #[arg(long, value_name = "JSON")]
    pub input: Option<String>,

    /// Pretty-print structured output
    #[arg(long)]
    pub pretty: bool,
}

impl RenderCommand {
    pub async fn execute(self, config: &CliConfig) -> Result<()> {
        let seed = self.seed()?;
        let app = Arc::new(config.load_app().await?);

        let mut context = ResourceContext::new(app, self.name.as_str(), seed)?;
        let out = context.process().await?;
        tracing::debug!("Rendered '{}' through {} context(s)", self.name, context.tree().len());

        println!("{}", format_output(&out, self.pretty)?);
        Ok(())
    }

    fn seed(&self) -> Result<Value> {
        match &self.input {
            Some(text) => serde_json::from_str(text)
                .with_context(|| format!("Invalid JSON passed to --input: {text}")),
            None => Ok(Value::Null),
        }
    }
}

/// Text for a rendered value: strings verbatim, anything else as JSON.
pub fn format_output(value: &Value, pretty: bool) -> Result<String> {
    Ok(match value {
        Value::String(text) => text.clone(),
        other if pretty => serde_json::to_string_pretty(other)?,
        other => serde_json::to_string(other)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_output() {
        assert_eq!(format_output(&json!("<p>hi</p>"), false).unwrap(), "<p>hi</p>");
        assert_eq!(format_output(&json!({"a": 1}), false).unwrap(), "{\"a\":1}");
        assert_eq!(format_output(&json!({"a": 1}), true).unwrap(), "{\n  \"a\": 1\n}");
        assert_eq!(format_output(&Value::Null, false).unwrap(), "null");
    }

    #[test]
    fn test_seed_parsing() {
        let cmd = RenderCommand {
            name: "page".to_string(),
            input: Some("{\"title\": \"x\"}".to_string()),
            pretty: false,
        };
        assert_eq!(cmd.seed().unwrap(), json!({"title": "x"}));

        let bad = RenderCommand {
            name: "page".to_string(),
            input: Some("{".to_string()),
            pretty: false,
        };
        assert!(bad.seed().is_err());
    }
}
