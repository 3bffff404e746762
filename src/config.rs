//! Plugin options and per-tooltip configuration.
//!
//! `PluginOptions` are the process-wide defaults, fixed at install time and
//! mutated afterwards only through the manager's explicit setters. A
//! `TooltipConfig` is overlaid on them once, at creation, yielding the
//! instance's `EffectiveConfig`. JSON field names are camelCase; unknown
//! fields are ignored.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::tooltip::{Placement, Trigger};

/// Show and hide delays in milliseconds.
///
/// Deserializes from either a single number (both delays) or `{show, hide}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "DelaySpec")]
pub struct Delay {
    pub show: u64,
    pub hide: u64,
}

impl Delay {
    pub fn new(show: u64, hide: u64) -> Self {
        Self { show, hide }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DelaySpec {
    Uniform(u64),
    Split {
        #[serde(default)]
        show: u64,
        #[serde(default)]
        hide: u64,
    },
}

impl From<DelaySpec> for Delay {
    fn from(spec: DelaySpec) -> Self {
        match spec {
            DelaySpec::Uniform(ms) => Self { show: ms, hide: ms },
            DelaySpec::Split { show, hide } => Self { show, hide },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreventOverflow {
    /// Minimum distance kept between the tooltip and the viewport edge.
    #[serde(default = "default_padding")]
    pub padding: f32,
}

impl Default for PreventOverflow {
    fn default() -> Self {
        Self { padding: default_padding() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flip {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for Flip {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Modifiers {
    #[serde(default)]
    pub prevent_overflow: PreventOverflow,
    #[serde(default)]
    pub flip: Flip,
}

/// Options passed through to the positioning engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PopperOptions {
    #[serde(default)]
    pub modifiers: Modifiers,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopoverOptions {
    #[serde(default)]
    pub default_popper_options: PopperOptions,
}

/// Process-wide defaults supplied at install time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginOptions {
    /// Milliseconds a hidden tooltip may stay unused before it is destroyed.
    /// `null` disables auto-dispose.
    #[serde(default = "default_dispose_timeout")]
    pub dispose_timeout: Option<u64>,
    #[serde(default)]
    pub default_delay: Delay,
    #[serde(default)]
    pub default_placement: Placement,
    #[serde(default = "default_trigger")]
    pub default_trigger: Trigger,
    #[serde(default)]
    pub default_offset: f32,
    #[serde(default = "default_class")]
    pub default_class: String,
    #[serde(default = "default_true")]
    pub default_html: bool,
    #[serde(default = "default_true")]
    pub default_hide_on_target_click: bool,
    #[serde(default)]
    pub popover: PopoverOptions,
}

fn default_dispose_timeout() -> Option<u64> { Some(5000) }
fn default_trigger() -> Trigger { Trigger::HOVER_FOCUS }
fn default_class() -> String { "tooltip-theme".into() }
fn default_padding() -> f32 { 5.0 }
fn default_true() -> bool { true }

impl Default for PluginOptions {
    fn default() -> Self {
        Self {
            dispose_timeout: default_dispose_timeout(),
            default_delay: Delay::default(),
            default_placement: Placement::default(),
            default_trigger: default_trigger(),
            default_offset: 0.0,
            default_class: default_class(),
            default_html: true,
            default_hide_on_target_click: true,
            popover: PopoverOptions::default(),
        }
    }
}

impl PluginOptions {
    /// Default options file location.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tooltip-manager")
            .join("options.json")
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Load from disk, falling back to defaults on any error.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::from_path(path) {
            Ok(options) => options,
            Err(e) => {
                tracing::warn!("Using default tooltip options ({}): {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

/// Options recognized by `create_tooltip`. Anything left unset falls back to
/// the plugin defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TooltipConfig {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub placement: Option<Placement>,
    #[serde(default)]
    pub trigger: Option<Trigger>,
    #[serde(default)]
    pub delay: Option<Delay>,
    #[serde(default)]
    pub offset: Option<f32>,
    #[serde(default)]
    pub classes: Vec<String>,
    #[serde(default)]
    pub html: Option<bool>,
    #[serde(default)]
    pub hide_on_target_click: Option<bool>,
    #[serde(default)]
    pub popper_options: Option<PopperOptions>,
}

impl TooltipConfig {
    pub fn new(content: impl Into<String>) -> Self {
        Self { content: content.into(), ..Self::default() }
    }

    pub fn placement(mut self, placement: Placement) -> Self {
        self.placement = Some(placement);
        self
    }

    pub fn trigger(mut self, trigger: Trigger) -> Self {
        self.trigger = Some(trigger);
        self
    }

    pub fn delay(mut self, delay: Delay) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn offset(mut self, offset: f32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn hide_on_target_click(mut self, enabled: bool) -> Self {
        self.hide_on_target_click = Some(enabled);
        self
    }

    /// Overlay this config on the plugin defaults.
    pub fn resolve(&self, defaults: &PluginOptions) -> EffectiveConfig {
        let popper = self
            .popper_options
            .as_ref()
            .unwrap_or(&defaults.popover.default_popper_options);
        let mut classes: Vec<String> = defaults
            .default_class
            .split_whitespace()
            .map(str::to_string)
            .collect();
        classes.extend(self.classes.iter().cloned());

        EffectiveConfig {
            content: self.content.clone(),
            placement: self.placement.unwrap_or(defaults.default_placement),
            trigger: self.trigger.unwrap_or(defaults.default_trigger),
            delay: self.delay.unwrap_or(defaults.default_delay),
            offset: self.offset.unwrap_or(defaults.default_offset),
            classes,
            html: self.html.unwrap_or(defaults.default_html),
            hide_on_target_click: self
                .hide_on_target_click
                .unwrap_or(defaults.default_hide_on_target_click),
            padding: popper.modifiers.prevent_overflow.padding,
            flip: popper.modifiers.flip.enabled,
            dispose_timeout: defaults.dispose_timeout,
        }
    }
}

/// Configuration of a live instance: explicit config merged over defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveConfig {
    pub content: String,
    pub placement: Placement,
    pub trigger: Trigger,
    pub delay: Delay,
    pub offset: f32,
    pub classes: Vec<String>,
    pub html: bool,
    pub hide_on_target_click: bool,
    pub padding: f32,
    pub flip: bool,
    pub dispose_timeout: Option<u64>,
}
