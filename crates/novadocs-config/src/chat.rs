//! Live-chat widget settings and bootstrap script.
//!
//! The widget SDK is loaded from the vendor CDN and initialised with the
//! options below. Nothing here talks to the chat service.

use serde::Deserialize;
use serde_json::{Map, Value, json};

use crate::{ConfigError, require_http_url, require_non_empty};

/// Default SDK location.
const DEFAULT_SCRIPT_SRC: &str = "https://chat.cdn-plain.com/index.js";

/// Global object exposed by the SDK once loaded.
const SDK_GLOBAL: &str = "Plain";

/// Chat widget configuration (`[chat]`).
#[derive(Debug, Deserialize)]
pub struct ChatConfig {
    /// Widget application id.
    pub app_id: String,
    /// SDK script URL.
    #[serde(default = "default_script_src")]
    pub script_src: String,
    /// Widget theme (`auto`, `light` or `dark`).
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Require the visitor to sign in before chatting.
    #[serde(default)]
    pub require_authentication: bool,
    /// Brand colour used for the chat button and header.
    #[serde(default)]
    pub brand_color: Option<String>,
    /// Colour of the icon inside the chat button.
    #[serde(default)]
    pub button_icon_color: Option<String>,
    /// Button offset from the viewport edges.
    #[serde(default)]
    pub position: Option<ChatPosition>,
    /// Labels attached to every thread.
    #[serde(default)]
    pub label_type_ids: Vec<String>,
    /// Quick links shown in the widget.
    #[serde(default)]
    pub links: Vec<ChatLink>,
    /// Entry buttons, each creating a thread with its own labels.
    #[serde(default)]
    pub chat_buttons: Vec<ChatButton>,
    /// CSS selector of a page link that should open the widget instead of navigating.
    #[serde(default)]
    pub open_selector: Option<String>,
}

/// Widget offset from the bottom-right corner.
#[derive(Debug, Deserialize)]
pub struct ChatPosition {
    pub right: String,
    pub bottom: String,
}

/// Quick link shown in the widget.
#[derive(Debug, Deserialize)]
pub struct ChatLink {
    pub icon: String,
    pub text: String,
    pub url: String,
}

/// Entry button in the widget.
#[derive(Debug, Deserialize)]
pub struct ChatButton {
    pub icon: String,
    pub text: String,
    #[serde(default)]
    pub label_type_ids: Vec<String>,
}

fn default_script_src() -> String {
    DEFAULT_SCRIPT_SRC.to_owned()
}

fn default_theme() -> String {
    "auto".to_owned()
}

impl ChatConfig {
    /// Validate that the widget can be bootstrapped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.app_id, "chat.app_id")?;
        require_http_url(&self.script_src, "chat.script_src")?;
        if !matches!(self.theme.as_str(), "auto" | "light" | "dark") {
            return Err(ConfigError::Validation(format!(
                "chat.theme must be auto, light or dark, got \"{}\"",
                self.theme
            )));
        }
        for (value, field) in [
            (&self.brand_color, "chat.brand_color"),
            (&self.button_icon_color, "chat.button_icon_color"),
        ] {
            if let Some(color) = value
                && !color.starts_with('#')
            {
                return Err(ConfigError::Validation(format!(
                    "{field} must be a hex colour"
                )));
            }
        }
        for (i, link) in self.links.iter().enumerate() {
            require_http_url(&link.url, &format!("chat.links[{i}].url"))?;
        }
        Ok(())
    }

    /// SDK `init` options as JSON.
    #[must_use]
    pub fn init_options(&self) -> Value {
        let mut options = Map::new();
        options.insert("appId".to_owned(), json!(self.app_id));

        if !self.links.is_empty() {
            let links: Vec<Value> = self
                .links
                .iter()
                .map(|l| json!({ "icon": l.icon, "text": l.text, "url": l.url }))
                .collect();
            options.insert("links".to_owned(), Value::Array(links));
        }

        let mut style = Map::new();
        if let Some(color) = &self.brand_color {
            style.insert("brandColor".to_owned(), json!(color));
            style.insert("chatButtonColor".to_owned(), json!(color));
        }
        if let Some(color) = &self.button_icon_color {
            style.insert("chatButtonIconColor".to_owned(), json!(color));
        }
        if !style.is_empty() {
            options.insert("style".to_owned(), Value::Object(style));
        }

        if !self.label_type_ids.is_empty() {
            options.insert(
                "threadDetails".to_owned(),
                json!({ "labelTypeIds": self.label_type_ids }),
            );
        }
        options.insert("theme".to_owned(), json!(self.theme));
        if let Some(position) = &self.position {
            options.insert(
                "position".to_owned(),
                json!({ "right": position.right, "bottom": position.bottom }),
            );
        }
        options.insert(
            "requireAuthentication".to_owned(),
            json!(self.require_authentication),
        );

        if !self.chat_buttons.is_empty() {
            let buttons: Vec<Value> = self
                .chat_buttons
                .iter()
                .map(|b| {
                    let mut button = json!({ "icon": b.icon, "text": b.text });
                    if !b.label_type_ids.is_empty() {
                        button["threadDetails"] = json!({ "labelTypeIds": b.label_type_ids });
                    }
                    button
                })
                .collect();
            options.insert("chatButtons".to_owned(), Value::Array(buttons));
        }

        Value::Object(options)
    }

    /// Inline script that loads the SDK and initialises the widget.
    ///
    /// Safe to embed in a `<script>` element: `</` never appears unescaped.
    #[must_use]
    pub fn bootstrap_script(&self) -> String {
        let options = script_safe(&self.init_options().to_string());
        let src = script_safe(&Value::String(self.script_src.clone()).to_string());

        let mut script = String::with_capacity(512);
        script.push_str("(function(d, script) {\n");
        script.push_str("  script = d.createElement('script');\n");
        script.push_str("  script.async = false;\n");
        script.push_str(&format!(
            "  script.onload = function () {{ {SDK_GLOBAL}.init({options}); }};\n"
        ));
        script.push_str(&format!("  script.src = {src};\n"));
        script.push_str("  d.getElementsByTagName('head')[0].appendChild(script);\n");

        if let Some(selector) = &self.open_selector {
            let selector = script_safe(&Value::String(selector.clone()).to_string());
            script.push_str(&format!("  var opener = d.querySelector({selector});\n"));
            script.push_str("  if (opener) {\n");
            script.push_str("    opener.onclick = function (e) {\n");
            script.push_str(&format!(
                "      if (typeof window.{SDK_GLOBAL} !== 'undefined') {{\n"
            ));
            script.push_str("        e.preventDefault();\n");
            script.push_str(&format!("        {SDK_GLOBAL}.open();\n"));
            script.push_str("      }\n");
            script.push_str("    };\n");
            script.push_str("  }\n");
        }

        script.push_str("}(document));");
        script
    }
}

/// Escape `</` so JSON literals cannot terminate the enclosing script element.
fn script_safe(json: &str) -> String {
    json.replace("</", "<\\/")
}
