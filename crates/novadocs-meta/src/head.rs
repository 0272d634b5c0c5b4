//! Page head tags and their HTML form.
//!
//! [`PageHead`] is what the resolver hands back per page: the version it
//! belongs to, the `<meta>` tags to attach, and the canonical URL if the
//! page is an older copy of a current page. [`HeadTag`] covers the
//! site-wide extras configured once for every page.

use std::fmt::Write;

use serde::Serialize;

use crate::VersionLabel;

/// Name of the meta tag search crawlers use to facet results by version.
pub const DOCSEARCH_VERSION: &str = "docsearch:version";

/// A `<meta name=".." content="..">` pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MetaTag {
    pub name: String,
    pub content: String,
}

impl MetaTag {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// Ordered meta tags for one page.
pub type PageMetadata = Vec<MetaTag>;

/// Version-derived head data for one page.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PageHead {
    /// Version the page belongs to. `None` for unversioned pages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<VersionLabel>,
    /// Meta tags to emit.
    pub metadata: PageMetadata,
    /// Canonical URL when the page is not on the current version.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical: Option<String>,
}

impl PageHead {
    /// Canonical URL, made absolute when a hostname is given.
    #[must_use]
    pub fn canonical_href(&self, hostname: Option<&str>) -> Option<String> {
        let canonical = self.canonical.as_deref()?;
        Some(match hostname {
            Some(host) if canonical.starts_with('/') => {
                format!("{}{canonical}", host.trim_end_matches('/'))
            }
            _ => canonical.to_owned(),
        })
    }

    /// Render the meta tags and canonical link.
    #[must_use]
    pub fn render_html(&self, hostname: Option<&str>) -> String {
        let mut html = String::new();
        for tag in &self.metadata {
            let _ = writeln!(
                html,
                "<meta name=\"{}\" content=\"{}\">",
                escape(&tag.name),
                escape(&tag.content)
            );
        }
        if let Some(href) = self.canonical_href(hostname) {
            let _ = writeln!(html, "<link rel=\"canonical\" href=\"{}\">", escape(&href));
        }
        html
    }
}

/// Elements that never have a closing tag.
const VOID_ELEMENTS: &[&str] = &["base", "link", "meta"];

/// Elements whose content is raw text rather than markup.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Arbitrary head element configured for every page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeadTag {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub content: Option<String>,
}

impl HeadTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            content: None,
        }
    }

    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Append the element's HTML to `html`.
    pub fn render_into(&self, html: &mut String) {
        let _ = write!(html, "<{}", self.tag);
        for (name, value) in &self.attrs {
            let _ = write!(html, " {}=\"{}\"", name, escape(value));
        }
        html.push('>');

        if VOID_ELEMENTS.contains(&self.tag.as_str()) {
            html.push('\n');
            return;
        }

        if let Some(content) = &self.content {
            if RAW_TEXT_ELEMENTS.contains(&self.tag.as_str()) {
                html.push_str(&content.replace("</", "<\\/"));
            } else {
                html.push_str(&escape(content));
            }
        }
        let _ = writeln!(html, "</{}>", self.tag);
    }
}

/// Render site-wide tags followed by the page's own head data.
#[must_use]
pub fn render_head(tags: &[HeadTag], page: &PageHead, hostname: Option<&str>) -> String {
    let mut html = String::with_capacity(256);
    for tag in tags {
        tag.render_into(&mut html);
    }
    html.push_str(&page.render_html(hostname));
    html
}

/// Escape HTML special characters.
fn escape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn old_page() -> PageHead {
        PageHead {
            version: Some(VersionLabel::new("2.0").unwrap()),
            metadata: vec![MetaTag::new(DOCSEARCH_VERSION, "2.0")],
            canonical: Some("/docs/4.0/resources/fields".to_owned()),
        }
    }

    #[test]
    fn render_relative_canonical() {
        assert_eq!(
            old_page().render_html(None),
            "<meta name=\"docsearch:version\" content=\"2.0\">\n\
             <link rel=\"canonical\" href=\"/docs/4.0/resources/fields\">\n"
        );
    }

    #[test]
    fn render_absolute_canonical() {
        let html = old_page().render_html(Some("https://nova.laravel.com/"));
        assert!(html.contains("href=\"https://nova.laravel.com/docs/4.0/resources/fields\""));
    }

    #[test]
    fn unversioned_page_renders_nothing() {
        assert_eq!(PageHead::default().render_html(Some("https://x.test")), "");
    }

    #[test]
    fn canonical_href_keeps_absolute_urls() {
        let page = PageHead {
            canonical: Some("https://other.test/4.0/".to_owned()),
            ..PageHead::default()
        };
        assert_eq!(
            page.canonical_href(Some("https://nova.laravel.com")).as_deref(),
            Some("https://other.test/4.0/")
        );
    }

    #[test]
    fn meta_values_are_escaped() {
        let page = PageHead {
            metadata: vec![MetaTag::new("description", "a \"quoted\" <b>")],
            ..PageHead::default()
        };
        assert_eq!(
            page.render_html(None),
            "<meta name=\"description\" content=\"a &quot;quoted&quot; &lt;b&gt;\">\n"
        );
    }

    #[test]
    fn void_tag_has_no_closing_tag() {
        let mut html = String::new();
        HeadTag::new("link")
            .attr("rel", "icon")
            .attr("href", "/docs/favicon.ico")
            .render_into(&mut html);
        assert_eq!(html, "<link rel=\"icon\" href=\"/docs/favicon.ico\">\n");
    }

    #[test]
    fn script_content_is_raw_but_cannot_close_early() {
        let mut html = String::new();
        HeadTag::new("script")
            .content("if (a < b) { x = '</script>'; }")
            .render_into(&mut html);
        assert_eq!(
            html,
            "<script>if (a < b) { x = '<\\/script>'; }</script>\n"
        );
    }

    #[test]
    fn title_content_is_escaped() {
        let mut html = String::new();
        HeadTag::new("title").content("Fields & Filters").render_into(&mut html);
        assert_eq!(html, "<title>Fields &amp; Filters</title>\n");
    }

    #[test]
    fn render_head_puts_site_tags_first() {
        let tags = vec![HeadTag::new("meta").attr("name", "theme-color").attr("content", "#00E1FF")];
        let html = render_head(&tags, &old_page(), None);
        let theme = html.find("theme-color").unwrap();
        let version = html.find(DOCSEARCH_VERSION).unwrap();
        let canonical = html.find("canonical").unwrap();
        assert!(theme < version && version < canonical);
    }

    #[test]
    fn page_head_serializes_without_empty_fields() {
        let json = serde_json::to_value(PageHead::default()).unwrap();
        assert_eq!(json, serde_json::json!({ "metadata": [] }));

        let json = serde_json::to_value(old_page()).unwrap();
        assert_eq!(json["version"], "2.0");
        assert_eq!(json["metadata"][0]["name"], DOCSEARCH_VERSION);
    }
}
