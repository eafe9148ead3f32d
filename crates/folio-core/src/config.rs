//! Page configuration.
//!
//! The page may embed a JSON block that overrides any of these settings:
//!
//! ```json
//! {
//!   "relay": { "service_id": "service_x", "template_id": "template_y", "public_key": "abc" },
//!   "reveal": { "threshold": 0.15, "root_margin": "0px 0px -100px 0px" },
//!   "scroll": { "anchor_duration_ms": 800, "top_duration_ms": 600 },
//!   "log_level": "info"
//! }
//! ```
//!
//! Missing fields fall back to their defaults, so an empty object (or no
//! block at all) yields a working page whose contact form reports that the
//! relay is not configured.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::relay::RelayConfig;
use crate::reveal::RevealOptions;
use crate::scroll::{ANCHOR_SCROLL_MS, TOP_SCROLL_MS};

/// Element id of the embedded configuration block.
pub const CONFIG_ELEMENT_ID: &str = "folio-config";

/// Smooth scroll durations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Duration of in-page anchor navigation.
    pub anchor_duration_ms: f64,
    /// Duration of the scroll-to-top animation.
    pub top_duration_ms: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            anchor_duration_ms: ANCHOR_SCROLL_MS,
            top_duration_ms: TOP_SCROLL_MS,
        }
    }
}

/// Everything the page controllers can be configured with.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Email relay credentials.
    pub relay: RelayConfig,
    /// Reveal observer options.
    pub reveal: RevealOptions,
    /// Scroll animation durations.
    pub scroll: ScrollConfig,
    /// Console log level name (`error`, `warn`, `info`, `debug`, `trace`).
    pub log_level: Option<String>,
}

impl PageConfig {
    /// Parse and validate a JSON configuration block.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: PageConfig = serde_json::from_str(json)?;
        config.reveal.validate()?;
        Ok(config)
    }

    /// Configured log level, `Info` when unset or unrecognised.
    pub fn log_level(&self) -> log::Level {
        self.log_level
            .as_deref()
            .and_then(|level| level.parse().ok())
            .unwrap_or(log::Level::Info)
    }
}
