//! `rcengine validate`: static checks over resource definitions.
//!
//! Runs directive classification on every selected resource and every nested `with`
//! list, and checks `in`/`out` modes and `{path, name}` arguments. Nothing is executed.

use anyhow::{Result, bail};
use clap::Args;
use colored::Colorize;
use serde::Serialize;

use super::{CliConfig, OutputFormat};
use crate::app::ResourceStore;
use crate::resource::validate_operations;

#[derive(Args, Debug)]
pub struct ValidateCommand {
    /// Resources to validate (default: all)
    #[arg(value_name = "NAME")]
    pub names: Vec<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Outcome for one resource.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ValidationResult {
    pub name: String,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ValidateCommand {
    pub async fn execute(self, config: &CliConfig) -> Result<()> {
        let app = config.load_app().await?;
        let results = self.check(app.resources());
        let failed = results.iter().filter(|result| !result.valid).count();

        match self.format {
            OutputFormat::Json => println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "valid": failed == 0,
                    "resources": results,
                }))?
            ),
            OutputFormat::Text => {
                for result in &results {
                    match &result.error {
                        None => println!("{} {}", "✓".green(), result.name),
                        Some(error) => println!("{} {}: {}", "✗".red(), result.name, error),
                    }
                }
            }
        }

        if failed > 0 {
            bail!("{failed} of {} resource(s) failed validation", results.len());
        }
        Ok(())
    }

    /// Validate the selected resources; unknown names are reported as failures.
    #[must_use]
    pub fn check(&self, store: &ResourceStore) -> Vec<ValidationResult> {
        let names: Vec<String> = if self.names.is_empty() {
            store.names().map(str::to_string).collect()
        } else {
            self.names.clone()
        };

        names
            .into_iter()
            .map(|name| {
                let outcome = store
                    .get(&name)
                    .and_then(|definition| validate_operations(&name, &definition.main));
                tracing::debug!("Validated '{}': {:?}", name, outcome);
                ValidationResult {
                    valid: outcome.is_ok(),
                    error: outcome.err().map(|e| e.to_string()),
                    name,
                }
            })
            .collect()
    }
}
