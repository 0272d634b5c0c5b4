//! Bridges the loaded configuration to the resolver and head tags.

use novadocs_config::Config;
use novadocs_meta::{HeadTag, VersionResolver, VersionSet};

use crate::error::CliError;

/// Build the version resolver from `[versions]` and `site.base`.
pub(crate) fn resolver_from_config(config: &Config) -> Result<VersionResolver, CliError> {
    let mut versions = VersionSet::new(config.versions.known.iter().cloned())?;
    if let Some(current) = &config.versions.current {
        versions = versions.with_current(current)?;
    }
    Ok(VersionResolver::new(versions, config.site.base.clone())?)
}

/// Site-wide head tags: search preconnect, configured `[[head]]` entries,
/// then the chat widget bootstrap.
pub(crate) fn head_tags_from_config(config: &Config) -> Result<Vec<HeadTag>, CliError> {
    let mut tags = Vec::with_capacity(config.head.len() + 2);

    if config.search.is_some()
        && let Some(origin) = config.require_search()?.preconnect_origin()
    {
        tags.push(
            HeadTag::new("link")
                .attr("rel", "preconnect")
                .attr("href", origin)
                .attr("crossorigin", ""),
        );
    }

    for entry in &config.head {
        let mut tag = HeadTag::new(entry.tag.as_str());
        for (name, value) in &entry.attrs {
            tag = tag.attr(name.as_str(), value.as_str());
        }
        if let Some(content) = &entry.content {
            tag = tag.content(content.as_str());
        }
        tags.push(tag);
    }

    if config.chat.is_some() {
        let chat = config.require_chat()?;
        tags.push(HeadTag::new("script").content(chat.bootstrap_script()));
    }

    Ok(tags)
}
