//! `rcengine list`: show the resources of a project.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::Serialize;

use super::{CliConfig, OutputFormat};
use crate::app::ResourceStore;

#[derive(Args, Debug)]
pub struct ListCommand {
    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct ListEntry<'a> {
    name: &'a str,
    operations: usize,
}

impl ListCommand {
    pub async fn execute(self, config: &CliConfig) -> Result<()> {
        let app = config.load_app().await?;
        println!("{}", self.render(app.resources())?);
        Ok(())
    }

    fn render(&self, store: &ResourceStore) -> Result<String> {
        let entries: Vec<ListEntry<'_>> = store
            .iter()
            .map(|(name, definition)| ListEntry {
                name,
                operations: definition.main.len(),
            })
            .collect();

        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&entries)?),
            OutputFormat::Text if entries.is_empty() => Ok("No resources found.".to_string()),
            OutputFormat::Text => Ok(entries
                .iter()
                .map(|entry| {
                    format!("{} ({} operation(s))", entry.name.bold(), entry.operations)
                })
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::ResourceDefinition;
    use crate::resource::Operation;

    fn store() -> ResourceStore {
        let mut store = ResourceStore::new();
        store.insert(
            "b",
            ResourceDefinition::new(vec![Operation::new().with_directive("raw", "x")]),
        );
        store.insert("a", ResourceDefinition::new(Vec::new()));
        store
    }

    #[test]
    fn test_render_json() {
        let cmd = ListCommand {
            format: OutputFormat::Json,
        };
        let value: serde_json::Value = serde_json::from_str(&cmd.render(&store()).unwrap()).unwrap();
        assert_eq!(
            value,
            serde_json::json!([{"name": "a", "operations": 0}, {"name": "b", "operations": 1}])
        );
    }

    #[test]
    fn test_render_text_empty() {
        let cmd = ListCommand {
            format: OutputFormat::Text,
        };
        assert_eq!(cmd.render(&ResourceStore::new()).unwrap(), "No resources found.");
    }
}
