//! Top navigation and per-version sidebar trees.
//!
//! These are passed through to the site generator as data. The only logic
//! here is link validation.

use serde::Deserialize;

use crate::ConfigError;

/// A single navigation link.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct NavLink {
    /// Link label.
    pub text: String,
    /// Target, either site-absolute (`/4.0/installation`) or an external URL.
    pub link: String,
}

impl NavLink {
    /// Whether the link points outside the site.
    #[must_use]
    pub fn is_external(&self) -> bool {
        self.link.starts_with("http://")
            || self.link.starts_with("https://")
            || self.link.starts_with("mailto:")
    }
}

/// Top navigation entry: a plain link or a dropdown of links.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum NavEntry {
    /// Single link.
    Link(NavLink),
    /// Dropdown menu.
    Menu {
        /// Menu label.
        text: String,
        /// Menu items.
        items: Vec<NavLink>,
    },
}

impl NavEntry {
    /// Links reachable from this entry.
    pub fn links(&self) -> impl Iterator<Item = &NavLink> {
        let slice = match self {
            Self::Link(link) => std::slice::from_ref(link),
            Self::Menu { items, .. } => items.as_slice(),
        };
        slice.iter()
    }
}

/// Sidebar group for one documentation version.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct SidebarGroup {
    /// Group heading.
    pub text: String,
    /// Whether the group starts collapsed. `None` means not collapsible.
    #[serde(default)]
    pub collapsed: Option<bool>,
    /// Pages in the group.
    #[serde(default)]
    pub items: Vec<NavLink>,
}

/// Check that a link is either external or site-absolute.
pub(crate) fn validate_link(link: &NavLink, field: &str) -> Result<(), ConfigError> {
    if link.text.is_empty() {
        return Err(ConfigError::Validation(format!(
            "{field}: link text cannot be empty"
        )));
    }
    if !link.is_external() && !link.link.starts_with('/') {
        return Err(ConfigError::Validation(format!(
            "{field}: link \"{}\" must start with / or be an absolute URL",
            link.link
        )));
    }
    Ok(())
}
