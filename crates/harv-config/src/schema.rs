//! Configuration schema types for the panel.
//!
//! All structs use `serde(default)` so partial configs work correctly.

use harv_common::QuestionScope;
use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Selection popup geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PopupConfig {
    /// Fixed popup width in viewport units.
    pub width: f64,
    /// Fixed popup height in viewport units.
    pub height: f64,
    /// Gap between the anchor rectangle and the popup.
    pub margin: f64,
}

impl Default for PopupConfig {
    fn default() -> Self {
        Self {
            width: 300.0,
            height: 150.0,
            margin: 10.0,
        }
    }
}

/// Panel activation and interaction policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    /// Fetch a fresh page summary on every activation. When false, a
    /// summary restored from the previous session suppresses the fetch.
    pub summarize_on_activate: bool,
    /// Scope used for questions until the user picks another.
    pub default_scope: QuestionScope,
    /// Theme applied when no persisted theme flag exists yet.
    pub dark_mode_default: bool,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            summarize_on_activate: true,
            default_scope: QuestionScope::Page,
            dark_mode_default: false,
        }
    }
}

/// Answer oracle endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Base URL of the answer service.
    pub endpoint: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8787".into(),
            timeout_secs: 60,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HarvConfig {
    pub popup: PopupConfig,
    pub panel: PanelConfig,
    pub service: ServiceConfig,
}
