//! Application configuration.
//!
//! The configuration is loaded from a JSON file
//! (`$XDG_CONFIG_HOME/tabset/config.json`).  Each concern lives under its
//! own top-level key so the file can be extended with additional sections
//! later without breaking backward compatibility.

use crate::geometry::Rect;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration.
///
/// Every field is optional: a minimal `{}` file is valid and all sections
/// fall back to their compiled-in defaults.
///
/// # Example
///
/// ```json
/// {
///   "tabbing": { "strip_height": 48 },
///   "workspaces": { "supported_schema_major": 1 },
///   "headless": {
///     "monitors": [{ "left": 0, "top": 0, "right": 2560, "bottom": 1440 }]
///   }
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Tab strip and drag overlay settings.
    #[serde(default)]
    pub tabbing: TabbingConfig,

    /// Workspace restore settings.
    #[serde(default)]
    pub workspaces: WorkspaceConfig,

    /// Monitors simulated by the headless host.
    #[serde(default)]
    pub headless: HeadlessConfig,
}

/// Tab strip and drag overlay settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TabbingConfig {
    /// Height of a tab strip in pixels, unless a group overrides it.
    pub strip_height: f64,
    /// Page loaded into new tab strip windows.
    pub strip_url: String,
    /// Window name of the drag overlay.
    pub drag_window_name: String,
    /// Application uuid that owns the strip and overlay windows.
    pub service_uuid: String,
}

impl Default for TabbingConfig {
    fn default() -> Self {
        Self {
            strip_height: 60.0,
            strip_url: "about:blank".into(),
            drag_window_name: "TabbingDragWindow".into(),
            service_uuid: "tabset-service".into(),
        }
    }
}

/// Workspace restore settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    /// Snapshots whose `schemaVersion` has a different major are rejected.
    pub supported_schema_major: u64,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            supported_schema_major: 1,
        }
    }
}

/// Headless host settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadlessConfig {
    pub monitors: Vec<Rect>,
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            monitors: vec![Rect::new(0.0, 0.0, 1920.0, 1080.0)],
        }
    }
}

impl Config {
    /// Load configuration from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError(format!("failed to read {}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| ConfigError(format!("failed to parse {}: {}", path.display(), e)))?;
        Ok(config)
    }
}

/// Error from loading or parsing a configuration file.
#[derive(Debug, thiserror::Error)]
#[error("config error: {0}")]
pub struct ConfigError(String);
