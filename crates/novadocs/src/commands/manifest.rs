//! `novadocs manifest` command implementation.

use std::path::PathBuf;

use clap::Args;
use novadocs_config::{CliSettings, Config};
use novadocs_meta::{ResolvedPage, VersionResolver, resolve_all};
use serde::Serialize;

use crate::error::CliError;
use crate::output::Output;
use crate::scan::Scanner;
use crate::site::resolver_from_config;

/// Arguments for the manifest command.
#[derive(Args)]
pub(crate) struct ManifestArgs {
    /// Markdown source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Output file (default: stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover novadocs.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

/// Per-page version metadata for the whole site.
#[derive(Debug, Serialize)]
struct Manifest<'a> {
    base: &'a str,
    current: &'a str,
    versions: Vec<&'a str>,
    pages: &'a [ResolvedPage],
}

impl<'a> Manifest<'a> {
    fn new(resolver: &'a VersionResolver, pages: &'a [ResolvedPage]) -> Self {
        Self {
            base: resolver.base_prefix(),
            current: resolver.versions().current().as_str(),
            versions: resolver
                .versions()
                .labels()
                .iter()
                .map(|v| v.as_str())
                .collect(),
            pages,
        }
    }
}

impl ManifestArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let resolver = resolver_from_config(&config)?;

        let source_dir = &config.docs_resolved.source_dir;
        if !source_dir.is_dir() {
            return Err(CliError::Validation(format!(
                "Source directory not found: {}",
                source_dir.display()
            )));
        }

        let paths = Scanner::new(source_dir.clone()).scan();
        tracing::info!(pages = paths.len(), source = %source_dir.display(), "Scanned pages");

        let result = resolve_all(&resolver, paths.as_slice());
        let json = serde_json::to_string_pretty(&Manifest::new(&resolver, &result.resolved))?;

        match &self.output {
            Some(path) => {
                std::fs::write(path, format!("{json}\n"))?;
                output.success(&format!(
                    "Wrote {} pages to {}",
                    result.resolved.len(),
                    path.display()
                ));
            }
            None => output.result(&json),
        }

        for err in &result.errors {
            output.error(&err.to_string());
        }
        if !result.is_complete() {
            return Err(CliError::Validation(format!(
                "{} of {} pages could not be resolved",
                result.errors.len(),
                paths.len()
            )));
        }
        Ok(())
    }
}
