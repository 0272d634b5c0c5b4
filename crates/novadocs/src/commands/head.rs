//! `novadocs head` command implementation.

use std::path::PathBuf;

use clap::Args;
use novadocs_config::{CliSettings, Config};
use novadocs_meta::render_head;

use crate::error::CliError;
use crate::output::Output;
use crate::site::{head_tags_from_config, resolver_from_config};

/// Arguments for the head command.
#[derive(Args)]
pub(crate) struct HeadArgs {
    /// Content path of the page (e.g. `2.0/resources/fields`).
    path: String,

    /// Public origin for absolute canonical URLs (overrides config).
    #[arg(long, env = "NOVADOCS_HOSTNAME")]
    hostname: Option<String>,

    /// Path to configuration file (default: auto-discover novadocs.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl HeadArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            hostname: self.hostname,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let resolver = resolver_from_config(&config)?;
        let tags = head_tags_from_config(&config)?;

        let page = resolver.page_head(&self.path)?;
        let html = render_head(&tags, &page, config.site.hostname.as_deref());

        output.result(html.trim_end());
        Ok(())
    }
}
