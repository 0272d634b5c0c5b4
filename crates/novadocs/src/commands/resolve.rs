//! `novadocs resolve` command implementation.

use std::path::PathBuf;

use clap::Args;
use novadocs_config::{CliSettings, Config};
use novadocs_meta::{ResolvedPage, resolve_all};

use crate::error::CliError;
use crate::output::Output;
use crate::site::resolver_from_config;

/// Arguments for the resolve command.
#[derive(Args)]
pub(crate) struct ResolveArgs {
    /// Content paths to resolve (e.g. `2.0/resources/fields`).
    #[arg(required = true)]
    paths: Vec<String>,

    /// Site base path (overrides config).
    #[arg(long)]
    base: Option<String>,

    /// Print results as JSON.
    #[arg(long)]
    json: bool,

    /// Path to configuration file (default: auto-discover novadocs.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl ResolveArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            base: self.base,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let resolver = resolver_from_config(&config)?;

        let result = resolve_all(&resolver, self.paths.as_slice());

        if self.json {
            output.result(&serde_json::to_string_pretty(&result.resolved)?);
        } else {
            for page in &result.resolved {
                print_page(&output, page);
            }
        }

        for err in &result.errors {
            output.error(&err.to_string());
        }
        if !result.is_complete() {
            return Err(CliError::Validation(format!(
                "{} of {} paths could not be resolved",
                result.errors.len(),
                self.paths.len()
            )));
        }
        Ok(())
    }
}

fn print_page(output: &Output, page: &ResolvedPage) {
    output.result_heading(&page.path);
    let version = page
        .head
        .version
        .as_ref()
        .map_or("(unversioned)", |v| v.as_str());
    output.result_field("version", version);
    for tag in &page.head.metadata {
        output.result_field("meta", &format!("{}={}", tag.name, tag.content));
    }
    output.result_field(
        "canonical",
        page.head.canonical.as_deref().unwrap_or("(none)"),
    );
}
