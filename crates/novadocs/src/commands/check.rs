//! `novadocs check` command implementation.

use std::collections::HashSet;
use std::path::PathBuf;

use clap::Args;
use novadocs_config::{CliSettings, Config, NavLink};
use novadocs_meta::resolve_all;

use crate::error::CliError;
use crate::output::Output;
use crate::scan::Scanner;
use crate::site::{head_tags_from_config, resolver_from_config};

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Markdown source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Treat broken navigation links as errors.
    #[arg(long)]
    strict: bool,

    /// Path to configuration file (default: auto-discover novadocs.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl CheckArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        match &config.config_path {
            Some(path) => output.info(&format!("Config: {}", path.display())),
            None => output.info("Config: defaults (no novadocs.toml found)"),
        }

        // Fails on incomplete [search] or [chat] sections
        let head_tags = head_tags_from_config(&config)?;
        output.info(&format!("Head tags: {}", head_tags.len()));

        let pages = Scanner::new(config.docs_resolved.source_dir.clone()).scan();
        output.info(&format!(
            "Pages: {} in {}",
            pages.len(),
            config.docs_resolved.source_dir.display()
        ));

        let mut failed = false;

        if config.versions.known.is_empty() {
            output.warning("No versions configured; all pages are unversioned");
        } else {
            let resolver = resolver_from_config(&config)?;
            output.info(&format!(
                "Versions: {} (current {})",
                config.versions.known.join(", "),
                resolver.versions().current()
            ));

            let result = resolve_all(&resolver, pages.as_slice());
            for err in &result.errors {
                output.error(&err.to_string());
            }
            failed |= !result.is_complete();
        }

        let broken = broken_links(&config, &pages);
        for link in &broken {
            let msg = format!("{}: \"{}\" -> {} (no such page)", link.location, link.text, link.target);
            if self.strict {
                output.error(&msg);
            } else {
                output.warning(&msg);
            }
        }
        failed |= self.strict && !broken.is_empty();

        if failed {
            return Err(CliError::Validation("check failed".to_owned()));
        }
        output.success("Configuration OK");
        Ok(())
    }
}

/// Navigation link that points at a page that does not exist.
#[derive(Debug, PartialEq, Eq)]
struct BrokenLink {
    location: String,
    text: String,
    target: String,
}

/// Internal nav and sidebar links with no matching page.
fn broken_links(config: &Config, pages: &[String]) -> Vec<BrokenLink> {
    let pages: HashSet<&str> = pages.iter().map(String::as_str).collect();
    let mut broken = Vec::new();

    let mut check = |location: String, link: &NavLink| {
        if link.is_external() || page_exists(&pages, &link.link) {
            return;
        }
        broken.push(BrokenLink {
            location,
            text: link.text.clone(),
            target: link.link.clone(),
        });
    };

    for entry in &config.nav {
        for link in entry.links() {
            check("nav".to_owned(), link);
        }
    }
    for (version, groups) in &config.sidebar {
        for group in groups {
            for link in &group.items {
                check(format!("sidebar \"{version}\" / {}", group.text), link);
            }
        }
    }

    broken
}

/// Whether a site-absolute link resolves to a scanned page.
fn page_exists(pages: &HashSet<&str>, link: &str) -> bool {
    let target = link.split(['#', '?']).next().unwrap_or(link);
    let target = target
        .strip_suffix(".html")
        .or_else(|| target.strip_suffix(".md"))
        .unwrap_or(target);

    if pages.contains(target) {
        return true;
    }
    !target.ends_with('/') && pages.contains(format!("{target}/").as_str())
}
