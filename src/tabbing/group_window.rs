//! The tab strip window.
//!
//! A [`GroupWindow`] is the chrome that hosts the tabs.  Its bounds are the
//! strip itself; member windows sit directly below it, as wide as the strip
//! and `app_height` tall.

use super::TabError;
use crate::geometry::Rect;
use crate::identity::WindowIdentity;
use crate::traits::{WindowHost, WindowOptions, WindowSpec};
use log::debug;
use serde::{Deserialize, Serialize};

/// Strip configuration as persisted in a snapshot: either a named preset
/// (`"default"`) or a custom page and height.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TabStripConfig {
    Named(String),
    Custom {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        url: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        height: Option<f64>,
    },
}

impl Default for TabStripConfig {
    fn default() -> Self {
        TabStripConfig::Named("default".into())
    }
}

impl TabStripConfig {
    pub fn height(&self, default: f64) -> f64 {
        match self {
            TabStripConfig::Custom {
                height: Some(h), ..
            } => *h,
            _ => default,
        }
    }

    pub fn url<'a>(&'a self, default: &'a str) -> &'a str {
        match self {
            TabStripConfig::Custom { url: Some(u), .. } => u,
            _ => default,
        }
    }
}

/// Persisted strip geometry: top-left corner and width of the strip, and
/// the height of the member windows below it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabGroupDimensions {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub app_height: f64,
}

/// How a group window is created.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupWindowOptions {
    /// Bounds of the strip.  Its height is the strip height.
    pub bounds: Rect,
    /// Height of the member windows below the strip.
    pub app_height: f64,
    /// Page rendered in the strip.
    pub url: String,
    /// Opacity of the strip.  `0.0` means the strip has not drawn yet.
    pub opacity: f64,
}

impl GroupWindowOptions {
    /// Strip placed on top of `window`, which keeps its own size below it.
    pub fn above(window: Rect, strip_height: f64, url: impl Into<String>) -> Self {
        Self {
            bounds: Rect::from_xywh(
                window.left,
                window.top - strip_height,
                window.width(),
                strip_height,
            ),
            app_height: window.height(),
            url: url.into(),
            opacity: 1.0,
        }
    }

    /// Options for a strip restored from a snapshot.
    pub fn from_dimensions(
        dimensions: &TabGroupDimensions,
        config: &TabStripConfig,
        default_height: f64,
        default_url: &str,
    ) -> Self {
        Self {
            bounds: Rect::from_xywh(
                dimensions.x,
                dimensions.y,
                dimensions.width,
                config.height(default_height),
            ),
            app_height: dimensions.app_height,
            url: config.url(default_url).to_string(),
            opacity: 1.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GroupWindow {
    identity: WindowIdentity,
    bounds: Rect,
    app_height: f64,
    url: String,
    options: WindowOptions,
}

impl GroupWindow {
    pub fn new(identity: WindowIdentity, options: GroupWindowOptions) -> Self {
        Self {
            identity,
            bounds: options.bounds,
            app_height: options.app_height,
            url: options.url,
            options: WindowOptions {
                frame: false,
                opacity: options.opacity,
            },
        }
    }

    /// Create the native strip window.  It stays hidden until the group
    /// gets its first tab.
    pub fn init<H: WindowHost>(&self, host: &H) -> Result<(), TabError> {
        let spec = WindowSpec {
            identity: self.identity.clone(),
            url: self.url.clone(),
            bounds: self.bounds,
            options: self.options,
            always_on_top: false,
            show_taskbar_icon: false,
        };
        host.create_window(&spec)
            .map_err(|e| TabError::init(&self.identity, e))?;
        debug!("created tab strip {}", self.identity);
        Ok(())
    }

    pub fn identity(&self) -> &WindowIdentity {
        &self.identity
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn strip_height(&self) -> f64 {
        self.bounds.height()
    }

    pub fn app_height(&self) -> f64 {
        self.app_height
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn options(&self) -> WindowOptions {
        self.options
    }

    pub fn dimensions(&self) -> TabGroupDimensions {
        TabGroupDimensions {
            x: self.bounds.left,
            y: self.bounds.top,
            width: self.bounds.width(),
            app_height: self.app_height,
        }
    }

    /// Where every member window belongs.
    pub fn member_bounds(&self) -> Rect {
        Rect::from_xywh(
            self.bounds.left,
            self.bounds.bottom,
            self.bounds.width(),
            self.app_height,
        )
    }

    pub fn show<H: WindowHost>(&self, host: &H) -> Result<(), TabError> {
        host.show_window(&self.identity).map_err(TabError::host)
    }

    /// Move the strip.  Member windows are not touched; see
    /// [`TabGroup::realign_apps`](super::tab_group::TabGroup::realign_apps).
    pub fn set_bounds<H: WindowHost>(&mut self, host: &H, bounds: Rect) -> Result<(), TabError> {
        host.set_bounds(&self.identity, bounds)
            .map_err(TabError::host)?;
        self.bounds = bounds;
        Ok(())
    }

    pub fn close<H: WindowHost>(&self, host: &H) -> Result<(), TabError> {
        host.close_window(&self.identity).map_err(TabError::host)
    }
}
