//! Configuration management for novadocs.
//!
//! Parses `novadocs.toml` with serde and provides auto-discovery of the
//! config file in parent directories. CLI settings can be applied during
//! load via [`CliSettings`].
//!
//! The file describes the documentation site: its base path, the ordered
//! list of documentation versions, search provider credentials, extra head
//! tags, navigation and per-version sidebars, and the live-chat widget.
//!
//! ## Environment Variable Expansion
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `site.hostname`
//! - `search.app_id`
//! - `search.api_key`
//! - `search.index_name`
//! - `chat.app_id`

mod chat;
mod expand;
mod nav;

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use serde::Deserialize;

pub use chat::{ChatButton, ChatConfig, ChatLink, ChatPosition};
pub use nav::{NavEntry, NavLink, SidebarGroup};

/// CLI settings that override configuration file values.
///
/// Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override site base path.
    pub base: Option<String>,
    /// Override site hostname.
    pub hostname: Option<String>,
    /// Override docs source directory.
    pub source_dir: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "novadocs.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site-wide settings.
    pub site: SiteConfig,
    /// Documentation source (paths are relative strings from TOML).
    docs: DocsConfigRaw,
    /// Documentation versions.
    pub versions: VersionsConfig,
    /// Search provider (optional section).
    pub search: Option<SearchConfig>,
    /// Extra tags injected into every page head.
    pub head: Vec<HeadTagConfig>,
    /// Top navigation.
    pub nav: Vec<NavEntry>,
    /// Sidebars keyed by version label.
    pub sidebar: BTreeMap<String, Vec<SidebarGroup>>,
    /// Live-chat widget (optional section).
    pub chat: Option<ChatConfig>,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Site-wide configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site title.
    pub title: String,
    /// Content language.
    pub lang: String,
    /// Base path the site is deployed under. Starts and ends with `/`.
    pub base: String,
    /// Public origin (e.g. `https://nova.laravel.com`), used for absolute canonical URLs.
    pub hostname: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Documentation".to_owned(),
            lang: "en-US".to_owned(),
            base: "/".to_owned(),
            hostname: None,
        }
    }
}

/// Raw docs configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    source_dir: Option<String>,
}

/// Resolved documentation configuration with absolute paths.
#[derive(Debug, Default)]
pub struct DocsConfig {
    /// Source directory for markdown files.
    pub source_dir: PathBuf,
}

/// Documentation versions, oldest first.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct VersionsConfig {
    /// Known version labels, ordered oldest to newest.
    pub known: Vec<String>,
    /// Current version. Defaults to the last known label.
    pub current: Option<String>,
}

impl VersionsConfig {
    /// The current version label, if any versions are configured.
    #[must_use]
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref().or_else(|| self.known.last().map(String::as_str))
    }
}

/// Search provider.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SearchProvider {
    /// Hosted DocSearch index.
    Algolia,
    /// Client-side index built by the site generator.
    Local,
}

/// Search configuration (`[search]`).
#[derive(Debug, Deserialize)]
pub struct SearchConfig {
    /// Search provider.
    pub provider: SearchProvider,
    /// Application id (Algolia only).
    #[serde(default)]
    pub app_id: Option<String>,
    /// Search-only API key (Algolia only).
    #[serde(default)]
    pub api_key: Option<String>,
    /// Index name (Algolia only).
    #[serde(default)]
    pub index_name: Option<String>,
}

impl SearchConfig {
    /// Validate provider credentials.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.provider == SearchProvider::Algolia {
            for (value, field) in [
                (&self.app_id, "search.app_id"),
                (&self.api_key, "search.api_key"),
                (&self.index_name, "search.index_name"),
            ] {
                let value = value.as_deref().ok_or_else(|| {
                    ConfigError::Validation(format!("{field} is required for algolia search"))
                })?;
                require_non_empty(value, field)?;
            }
        }
        Ok(())
    }

    /// Origin the browser should preconnect to, if the provider is hosted.
    #[must_use]
    pub fn preconnect_origin(&self) -> Option<String> {
        match self.provider {
            SearchProvider::Algolia => self
                .app_id
                .as_deref()
                .map(|id| format!("https://{id}-dsn.algolia.net")),
            SearchProvider::Local => None,
        }
    }
}

/// Extra tag for the page head (`[[head]]`).
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct HeadTagConfig {
    /// Element name (`meta`, `link`, `script`, ...).
    pub tag: String,
    /// Attributes, emitted in key order.
    #[serde(default)]
    pub attrs: BTreeMap<String, String>,
    /// Inner content for non-void elements.
    #[serde(default)]
    pub content: Option<String>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`search.api_key`").
        field: String,
        /// Error message (e.g., "${`ALGOLIA_KEY`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
pub(crate) fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
pub(crate) fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `novadocs.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, and the
    /// result is validated again so overrides cannot bypass validation.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(base) = &settings.base {
            self.site.base.clone_from(base);
        }
        if let Some(hostname) = &settings.hostname {
            self.site.hostname = Some(hostname.clone());
        }
        if let Some(source_dir) = &settings.source_dir {
            self.docs_resolved.source_dir.clone_from(source_dir);
        }
    }

    /// Get validated search configuration.
    ///
    /// Use this instead of the `search` field when the caller needs search.
    pub fn require_search(&self) -> Result<&SearchConfig, ConfigError> {
        let search = self
            .search
            .as_ref()
            .ok_or_else(|| ConfigError::Validation("[search] section required in config".into()))?;
        search.validate()?;
        Ok(search)
    }

    /// Get validated chat widget configuration.
    pub fn require_chat(&self) -> Result<&ChatConfig, ConfigError> {
        let chat = self
            .chat
            .as_ref()
            .ok_or_else(|| ConfigError::Validation("[chat] section required in config".into()))?;
        chat.validate()?;
        Ok(chat)
    }

    /// Sidebar for a version, empty if none is configured.
    #[must_use]
    pub fn sidebar_for(&self, version: &str) -> &[SidebarGroup] {
        self.sidebar
            .get(version)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            site: SiteConfig::default(),
            docs: DocsConfigRaw::default(),
            versions: VersionsConfig::default(),
            search: None,
            head: Vec::new(),
            nav: Vec::new(),
            sidebar: BTreeMap::new(),
            chat: None,
            docs_resolved: DocsConfig {
                source_dir: base.join("docs"),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file. Search and chat
    /// credentials are only checked through [`Config::require_search`] and
    /// [`Config::require_chat`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_site()?;
        self.validate_versions()?;
        self.validate_head()?;
        self.validate_navigation()?;
        Ok(())
    }

    fn validate_site(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.site.base, "site.base")?;
        if !self.site.base.starts_with('/') || !self.site.base.ends_with('/') {
            return Err(ConfigError::Validation(format!(
                "site.base must start and end with /, got \"{}\"",
                self.site.base
            )));
        }
        if let Some(hostname) = &self.site.hostname {
            require_http_url(hostname, "site.hostname")?;
        }
        Ok(())
    }

    fn validate_versions(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for label in &self.versions.known {
            require_non_empty(label, "versions.known")?;
            if label.contains('/') {
                return Err(ConfigError::Validation(format!(
                    "versions.known: \"{label}\" cannot contain /"
                )));
            }
            if !seen.insert(label.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "versions.known: \"{label}\" is listed twice"
                )));
            }
        }

        if let Some(current) = &self.versions.current
            && !seen.contains(current.as_str())
        {
            return Err(ConfigError::Validation(format!(
                "versions.current \"{current}\" is not in versions.known"
            )));
        }

        for version in self.sidebar.keys() {
            if !seen.contains(version.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "sidebar.\"{version}\" does not match any known version"
                )));
            }
        }

        Ok(())
    }

    fn validate_head(&self) -> Result<(), ConfigError> {
        for (i, tag) in self.head.iter().enumerate() {
            if tag.tag.is_empty() || !tag.tag.chars().all(|c| c.is_ascii_alphanumeric()) {
                return Err(ConfigError::Validation(format!(
                    "head[{i}].tag must be a plain element name, got \"{}\"",
                    tag.tag
                )));
            }
        }
        Ok(())
    }

    fn validate_navigation(&self) -> Result<(), ConfigError> {
        for entry in &self.nav {
            for link in entry.links() {
                nav::validate_link(link, "nav")?;
            }
        }
        for (version, groups) in &self.sidebar {
            for group in groups {
                for link in &group.items {
                    nav::validate_link(link, &format!("sidebar.\"{version}\""))?;
                }
            }
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        expand::expand_opt(&mut self.site.hostname, "site.hostname")?;

        if let Some(ref mut search) = self.search {
            expand::expand_opt(&mut search.app_id, "search.app_id")?;
            expand::expand_opt(&mut search.api_key, "search.api_key")?;
            expand::expand_opt(&mut search.index_name, "search.index_name")?;
        }

        if let Some(ref mut chat) = self.chat {
            chat.app_id = expand::expand_env(&chat.app_id, "chat.app_id")?;
        }

        Ok(())
    }

    /// Resolve relative paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.docs_resolved = DocsConfig {
            source_dir: config_dir.join(self.docs.source_dir.as_deref().unwrap_or("docs")),
        };
    }
}
