//! Page-level configuration.
//!
//! The archive template may embed overrides as JSON:
//! ```html
//! <script type="application/json" id="archive-ui-config">
//!   {"highlight_delay_ms": 300, "colors": {"kind": "polynomial"}}
//! </script>
//! ```
//! Missing fields keep their defaults.

use crate::dom::{Document, Element as _};
use crate::error::EnhanceError;
use crate::util::color::ColorStrategy;
use log::debug;
use serde::Deserialize;

pub const CONFIG_ELEMENT_ID: &str = "archive-ui-config";

/// Restarting the highlight animation needs a gap between remove and add.
pub const DEFAULT_HIGHLIGHT_DELAY_MS: u32 = 200;

/// Selectors and class names of the rendered archive.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Markup {
    pub reply_link: String,
    /// Attribute of the reply link naming its target.
    pub reply_target_attribute: String,
    pub highlight_class: String,
    pub log_entry: String,
    pub reply_preview: String,
    pub speaker: String,
    pub character: String,
}

impl Default for Markup {
    fn default() -> Self {
        Self {
            reply_link: ".reply-to-link".to_string(),
            reply_target_attribute: "href".to_string(),
            highlight_class: "highlight".to_string(),
            log_entry: ".log".to_string(),
            reply_preview: ".reply-to".to_string(),
            speaker: ".speaker, .reply-to-speaker".to_string(),
            character: ".entity-character".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EnhanceConfig {
    pub markup: Markup,
    pub highlight_delay_ms: u32,
    pub colors: ColorStrategy,
}

impl Default for EnhanceConfig {
    fn default() -> Self {
        Self {
            markup: Markup::default(),
            highlight_delay_ms: DEFAULT_HIGHLIGHT_DELAY_MS,
            colors: ColorStrategy::default(),
        }
    }
}

impl EnhanceConfig {
    pub fn from_json(json: &str) -> Result<Self, EnhanceError> {
        let config: Self = serde_json::from_str(json)?;
        config.colors.validate()?;
        Ok(config)
    }

    /// Reads the embedded configuration element, falling back to defaults when absent.
    pub fn load<D: Document>(document: &D) -> Result<Self, EnhanceError> {
        match document.element_by_id(CONFIG_ELEMENT_ID) {
            Some(element) => {
                debug!("Loading configuration from #{CONFIG_ELEMENT_ID}");
                Self::from_json(&element.text())
            }
            None => Ok(Self::default()),
        }
    }
}
