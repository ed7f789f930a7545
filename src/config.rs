//! Lightbox configuration module.
//!
//! Handles loading, validating, and merging the `config.toml` that sits next
//! to the gallery images. Stock defaults are the base layer; the user file is
//! merged over them key by key, so it only needs the values it changes.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! placeholder_title = "Gallery Image"  # Title for images without one
//! close_on_backdrop = true             # Clicking the dimmed backdrop closes
//!
//! [keys]
//! next = ["ArrowRight"]
//! previous = ["ArrowLeft"]
//! close = ["Escape"]
//!
//! [overlay]
//! backdrop = "rgba(0, 0, 0, 0.9)"
//! panel_background = "#ffffff"
//! caption_text = "#666666"
//! control_background = "rgba(0, 0, 0, 0.5)"
//! control_text = "#ffffff"
//! image_width = "80vw"
//! image_max_width = "1100px"
//! image_height = "60vh"
//! z_index = 10002
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::keyboard::{Key, KeyAction, KeyBindings};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Lightbox configuration loaded from `config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LightboxConfig {
    /// Title substituted for images that have none.
    pub placeholder_title: String,
    /// Whether a click whose target is the backdrop dismisses the overlay.
    pub close_on_backdrop: bool,
    /// Key names bound to lightbox actions.
    pub keys: KeysConfig,
    /// Overlay colors and sizing.
    pub overlay: OverlayConfig,
}

impl Default for LightboxConfig {
    fn default() -> Self {
        Self {
            placeholder_title: crate::types::DEFAULT_TITLE.to_string(),
            close_on_backdrop: true,
            keys: KeysConfig::default(),
            overlay: OverlayConfig::default(),
        }
    }
}

impl LightboxConfig {
    /// Validate config values after merging.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.placeholder_title.trim().is_empty() {
            return Err(ConfigError::Validation(
                "placeholder_title must not be empty".into(),
            ));
        }
        self.overlay.validate()?;
        self.key_bindings().map(|_| ())
    }

    /// Resolve the `[keys]` table into typed bindings.
    ///
    /// Fails on unknown key names, empty binding lists, and a key bound to
    /// more than one action.
    pub fn key_bindings(&self) -> Result<KeyBindings, ConfigError> {
        let mut bindings = KeyBindings::empty();
        for (action, names) in [
            (KeyAction::Next, &self.keys.next),
            (KeyAction::Previous, &self.keys.previous),
            (KeyAction::Close, &self.keys.close),
        ] {
            if names.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "keys.{} must list at least one key",
                    action.config_name()
                )));
            }
            for name in names {
                let key = Key::from_name(name).ok_or_else(|| {
                    ConfigError::Validation(format!(
                        "keys.{}: unknown key name '{name}'",
                        action.config_name()
                    ))
                })?;
                if let Some(existing) = bindings.action_for(key) {
                    return Err(ConfigError::Validation(format!(
                        "key '{name}' is bound to both keys.{} and keys.{}",
                        existing.config_name(),
                        action.config_name()
                    )));
                }
                bindings.bind(key, action);
            }
        }
        Ok(bindings)
    }
}

/// Key names per action, using DOM `KeyboardEvent.key` spelling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KeysConfig {
    pub next: Vec<String>,
    pub previous: Vec<String>,
    pub close: Vec<String>,
}

impl Default for KeysConfig {
    fn default() -> Self {
        Self {
            next: vec!["ArrowRight".to_string()],
            previous: vec!["ArrowLeft".to_string()],
            close: vec!["Escape".to_string()],
        }
    }
}

/// Overlay presentation settings. Values are emitted verbatim into CSS.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OverlayConfig {
    /// Dimmed full-screen backdrop behind the panel.
    pub backdrop: String,
    pub panel_background: String,
    pub caption_text: String,
    /// Close/prev/next button fill.
    pub control_background: String,
    pub control_text: String,
    pub image_width: String,
    pub image_max_width: String,
    pub image_height: String,
    /// Stacking order; must sit above the site header and toasts.
    pub z_index: i32,
}

/// Characters that would let a value escape its declaration or the `<style>`
/// element it is written into.
const CSS_VALUE_FORBIDDEN: &[char] = &['<', ';', '{', '}'];

impl OverlayConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("backdrop", &self.backdrop),
            ("panel_background", &self.panel_background),
            ("caption_text", &self.caption_text),
            ("control_background", &self.control_background),
            ("control_text", &self.control_text),
            ("image_width", &self.image_width),
            ("image_max_width", &self.image_max_width),
            ("image_height", &self.image_height),
        ] {
            if let Some(c) = value.chars().find(|c| CSS_VALUE_FORBIDDEN.contains(c)) {
                return Err(ConfigError::Validation(format!(
                    "overlay.{name} must not contain '{c}'"
                )));
            }
        }
        if self.z_index < 0 {
            return Err(ConfigError::Validation(
                "overlay.z_index must not be negative".into(),
            ));
        }
        Ok(())
    }
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            backdrop: "rgba(0, 0, 0, 0.9)".to_string(),
            panel_background: "#ffffff".to_string(),
            caption_text: "#666666".to_string(),
            control_background: "rgba(0, 0, 0, 0.5)".to_string(),
            control_text: "#ffffff".to_string(),
            image_width: "80vw".to_string(),
            image_max_width: "1100px".to_string(),
            image_height: "60vh".to_string(),
            z_index: 10002,
        }
    }
}

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(LightboxConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// Tables merge key by key; any other overlay value replaces the base value.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut table), toml::Value::Table(overrides)) => {
            for (key, value) in overrides {
                let merged = match table.remove(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => value,
                };
                table.insert(key, merged);
            }
            toml::Value::Table(table)
        }
        (_, overlay) => overlay,
    }
}

/// Read `config.toml` from a gallery directory, if there is one.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    Ok(Some(toml::from_str(&content)?))
}

/// Merge an optional user table over the defaults, deserialize, validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<LightboxConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: LightboxConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load the config for a gallery directory (stock defaults when absent).
pub fn load_config(dir: &Path) -> Result<LightboxConfig, ConfigError> {
    resolve_config(stock_defaults_value(), load_raw_config(dir)?)
}

/// CSS custom properties consumed by the overlay stylesheet.
pub fn generate_overlay_css(overlay: &OverlayConfig) -> String {
    format!(
        r#":root {{
    --lightbox-backdrop: {};
    --lightbox-panel-bg: {};
    --lightbox-caption: {};
    --lightbox-control-bg: {};
    --lightbox-control-text: {};
    --lightbox-image-width: {};
    --lightbox-image-max-width: {};
    --lightbox-image-height: {};
    --lightbox-z: {};
}}"#,
        overlay.backdrop,
        overlay.panel_background,
        overlay.caption_text,
        overlay.control_background,
        overlay.control_text,
        overlay.image_width,
        overlay.image_max_width,
        overlay.image_height,
        overlay.z_index,
    )
}

/// Returns a fully commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Gallery Lightbox Configuration
# ==============================
# Place this file as config.toml inside the gallery directory.
# All settings are optional; values shown are the defaults.
# Unknown keys will cause an error.

# Title shown for images whose filename carries no title.
placeholder_title = "Gallery Image"

# Clicking the dimmed area around the picture closes the lightbox.
# Clicks on the picture panel itself never close it.
close_on_backdrop = true

# ---------------------------------------------------------------------------
# Keyboard
# ---------------------------------------------------------------------------
# Key names use the browser's KeyboardEvent.key spelling, e.g. "ArrowRight",
# "Escape", "Enter", " " (space), or a single character such as "j".
# A key may be bound to only one action.
[keys]
next = ["ArrowRight"]
previous = ["ArrowLeft"]
close = ["Escape"]

# ---------------------------------------------------------------------------
# Overlay appearance
# ---------------------------------------------------------------------------
# Any CSS value without '<', ';', '{' or '}' is accepted.
[overlay]
backdrop = "rgba(0, 0, 0, 0.9)"
panel_background = "#ffffff"
caption_text = "#666666"
control_background = "rgba(0, 0, 0, 0.5)"
control_text = "#ffffff"
image_width = "80vw"
image_max_width = "1100px"
image_height = "60vh"

# Stacking order. Keep it above the site header and notifications.
z_index = 10002
"##
}
