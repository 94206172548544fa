#![forbid(unsafe_code)]

//! Reader configuration.
//!
//! Every field has a default matching the site the reader was written for,
//! so an empty JSON object (or no config at all) is a valid configuration.

use serde::{Deserialize, Serialize};

use crate::error::{ReaderError, Result};
use crate::scroll_hint::ScrollHintConfig;

/// CSS selectors used during entry discovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub poem_list: String,
    pub item: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            poem_list: ".poem-list".to_owned(),
            item: "li".to_owned(),
        }
    }
}

/// Reserved element ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementIds {
    pub overlay: String,
    pub scroll_hint: String,
    pub embedded_content: String,
    pub title: String,
    pub body: String,
    pub prev: String,
    pub next: String,
    pub count: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            overlay: "poem-overlay".to_owned(),
            scroll_hint: "overlay-scroll-tip".to_owned(),
            embedded_content: "poems-json".to_owned(),
            title: "poem-title".to_owned(),
            body: "poem-body".to_owned(),
            prev: "modal-prev".to_owned(),
            next: "modal-next".to_owned(),
            count: "page-count".to_owned(),
        }
    }
}

impl ElementIds {
    fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("overlay", self.overlay.as_str()),
            ("scroll_hint", self.scroll_hint.as_str()),
            ("embedded_content", self.embedded_content.as_str()),
            ("title", self.title.as_str()),
            ("body", self.body.as_str()),
            ("prev", self.prev.as_str()),
            ("next", self.next.as_str()),
            ("count", self.count.as_str()),
        ]
        .into_iter()
    }
}

/// Class names toggled by the reader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassNames {
    pub overlay: String,
    pub open: String,
    pub no_scroll: String,
    pub hidden: String,
    pub link: String,
    pub active: String,
}

impl Default for ClassNames {
    fn default() -> Self {
        Self {
            overlay: "modal-overlay".to_owned(),
            open: "open".to_owned(),
            no_scroll: "no-scroll".to_owned(),
            hidden: "hidden".to_owned(),
            link: "poem-link".to_owned(),
            active: "active".to_owned(),
        }
    }
}

/// User-visible strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    pub close: String,
    pub previous: String,
    pub next: String,
    pub scroll_hint: String,
    pub scroll_hint_aria: String,
    pub placeholder: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            close: "Zavřít".to_owned(),
            previous: "← Předchozí".to_owned(),
            next: "Další →".to_owned(),
            scroll_hint: "↓ Posunout".to_owned(),
            scroll_hint_aria: "Posunout níže".to_owned(),
            placeholder: "Text této básně zatím není k dispozici.".to_owned(),
        }
    }
}

/// Maximum log level emitted by the reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl LogLevel {
    #[must_use]
    pub const fn as_tracing(self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

/// Full reader configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    pub selectors: Selectors,
    pub ids: ElementIds,
    pub classes: ClassNames,
    pub labels: Labels,
    pub scroll_hint: ScrollHintConfig,
    pub log_level: LogLevel,
}

impl ReaderConfig {
    /// Parse and validate a JSON configuration. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the reader cannot operate with.
    pub fn validate(&self) -> Result<()> {
        if self.selectors.poem_list.trim().is_empty() {
            return Err(ReaderError::invalid_config("selectors.poem_list is empty"));
        }
        if self.selectors.item.trim().is_empty() {
            return Err(ReaderError::invalid_config("selectors.item is empty"));
        }
        for (name, id) in self.ids.iter() {
            if id.is_empty() || id.contains(char::is_whitespace) {
                return Err(ReaderError::invalid_config(format!(
                    "ids.{name} must be a non-empty token, got {id:?}"
                )));
            }
        }

        let hint = &self.scroll_hint;
        for (name, value) in [
            ("overflow_tolerance_px", hint.overflow_tolerance_px),
            ("bottom_tolerance_px", hint.bottom_tolerance_px),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ReaderError::invalid_config(format!(
                    "scroll_hint.{name} must be finite and >= 0, got {value}"
                )));
            }
        }
        if !(hint.step_fraction > 0.0 && hint.step_fraction <= 1.0) {
            return Err(ReaderError::invalid_config(format!(
                "scroll_hint.step_fraction must be in (0, 1], got {}",
                hint.step_fraction
            )));
        }
        Ok(())
    }
}
