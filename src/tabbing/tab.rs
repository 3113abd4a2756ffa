//! A single application window as a member of a tab group.

use super::group_window::GroupWindow;
use super::{GroupId, TabError};
use crate::identity::WindowIdentity;
use crate::traits::{WindowHost, WindowOptions};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Strip-only metadata for a tab.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TabProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// Everything needed to add a window to a group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabPackage {
    pub window: WindowIdentity,
    #[serde(default)]
    pub properties: TabProperties,
}

impl TabPackage {
    pub fn new(window: WindowIdentity) -> Self {
        Self {
            window,
            properties: TabProperties::default(),
        }
    }
}

/// Proxy for the native window behind a tab.
#[derive(Debug, Clone, PartialEq)]
pub struct TabWindow {
    identity: WindowIdentity,
}

impl TabWindow {
    pub fn new(identity: WindowIdentity) -> Self {
        Self { identity }
    }

    pub fn identity(&self) -> &WindowIdentity {
        &self.identity
    }

    pub fn options<H: WindowHost>(&self, host: &H) -> Result<WindowOptions, TabError> {
        host.window_options(&self.identity).map_err(TabError::host)
    }

    pub fn update_options<H: WindowHost>(
        &self,
        host: &H,
        options: WindowOptions,
    ) -> Result<(), TabError> {
        host.update_window_options(&self.identity, options)
            .map_err(TabError::host)
    }

    pub fn show<H: WindowHost>(&self, host: &H) -> Result<(), TabError> {
        host.show_window(&self.identity).map_err(TabError::host)
    }

    pub fn hide<H: WindowHost>(&self, host: &H) -> Result<(), TabError> {
        host.hide_window(&self.identity).map_err(TabError::host)
    }

    pub fn bring_to_front<H: WindowHost>(&self, host: &H) -> Result<(), TabError> {
        host.bring_to_front(&self.identity).map_err(TabError::host)
    }

    /// Snap the window into the member area below the group's strip.
    pub fn align_to<H: WindowHost>(&self, host: &H, group: &GroupWindow) -> Result<(), TabError> {
        host.set_bounds(&self.identity, group.member_bounds())
            .map_err(TabError::host)
    }

    pub fn close<H: WindowHost>(&self, host: &H) -> Result<(), TabError> {
        host.close_window(&self.identity).map_err(TabError::host)
    }
}

/// One member of a [`TabGroup`](super::tab_group::TabGroup).
///
/// The group is referenced by id only; the group owns the tab.
#[derive(Debug, Clone)]
pub struct Tab {
    window: TabWindow,
    group: GroupId,
    properties: TabProperties,
}

impl Tab {
    pub fn new(package: TabPackage, group: GroupId) -> Self {
        let mut properties = package.properties;
        if properties.title.is_none() {
            properties.title = Some(package.window.name.clone());
        }
        Self {
            window: TabWindow::new(package.window),
            group,
            properties,
        }
    }

    /// Attach to the native window: strip its frame and align it below the
    /// strip.  Returns the options the window had before attaching.
    pub fn init<H: WindowHost>(
        &self,
        host: &H,
        group_window: &GroupWindow,
    ) -> Result<WindowOptions, TabError> {
        let id = self.window.identity();
        let options = self
            .window
            .options(host)
            .map_err(|e| TabError::init(id, e))?;
        self.window
            .update_options(
                host,
                WindowOptions {
                    frame: false,
                    ..options
                },
            )
            .map_err(|e| TabError::init(id, e))?;
        self.window
            .align_to(host, group_window)
            .map_err(|e| TabError::init(id, e))?;
        Ok(options)
    }

    pub fn id(&self) -> &WindowIdentity {
        self.window.identity()
    }

    pub fn window(&self) -> &TabWindow {
        &self.window
    }

    pub fn group(&self) -> GroupId {
        self.group
    }

    pub fn properties(&self) -> &TabProperties {
        &self.properties
    }

    pub fn package(&self) -> TabPackage {
        TabPackage {
            window: self.id().clone(),
            properties: self.properties.clone(),
        }
    }

    /// Finalize a tab that has left its group.  The window is closed when
    /// `close_app` is set, otherwise it is shown again as a standalone
    /// window.
    pub fn remove<H: WindowHost>(self, host: &H, close_app: bool) {
        let result = if close_app {
            self.window.close(host)
        } else {
            self.window.show(host)
        };
        match result {
            Ok(()) => debug!("tab {} removed from {}", self.id(), self.group),
            Err(e) => warn!("finalizing tab {}: {}", self.id(), e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::headless::{HeadlessHost, HostCall};
    use crate::tabbing::group_window::GroupWindowOptions;

    fn group_window() -> GroupWindow {
        GroupWindow::new(
            WindowIdentity::new("svc", "tabgroup-1"),
            GroupWindowOptions {
                bounds: Rect::new(0.0, 0.0, 300.0, 60.0),
                app_height: 200.0,
                url: "about:blank".into(),
                opacity: 1.0,
            },
        )
    }

    #[test]
    fn title_defaults_to_window_name() {
        let tab = Tab::new(TabPackage::new(WindowIdentity::new("app", "editor")), GroupId(1));
        assert_eq!(tab.properties().title.as_deref(), Some("editor"));
        assert_eq!(tab.group(), GroupId(1));
    }

    #[test]
    fn init_strips_frame_and_aligns() {
        let host = HeadlessHost::default();
        let id = WindowIdentity::new("app", "editor");
        host.add_window(id.clone(), Rect::new(500.0, 500.0, 600.0, 600.0));
        let tab = Tab::new(TabPackage::new(id.clone()), GroupId(1));

        let before = tab.init(&host, &group_window()).unwrap();
        assert!(before.frame);

        let native = host.window(&id).unwrap();
        assert!(!native.options.frame);
        assert_eq!(native.bounds, Rect::new(0.0, 60.0, 300.0, 260.0));
    }

    #[test]
    fn init_of_missing_window_fails() {
        let host = HeadlessHost::default();
        let tab = Tab::new(TabPackage::new(WindowIdentity::new("app", "gone")), GroupId(1));
        assert!(matches!(
            tab.init(&host, &group_window()),
            Err(TabError::Initialization { .. })
        ));
    }

    #[test]
    fn remove_closes_only_when_asked() {
        let host = HeadlessHost::default();
        let a = WindowIdentity::new("app", "a");
        let b = WindowIdentity::new("app", "b");
        host.add_window(a.clone(), Rect::default());
        host.add_window(b.clone(), Rect::default());

        Tab::new(TabPackage::new(a.clone()), GroupId(1)).remove(&host, true);
        Tab::new(TabPackage::new(b.clone()), GroupId(1)).remove(&host, false);

        assert_eq!(
            host.calls(),
            vec![HostCall::Close(a.clone()), HostCall::Show(b.clone())]
        );
        assert!(!host.has_window(&a));
        assert!(host.has_window(&b));
    }

    #[test]
    fn window_proxy_round_trips_options() {
        let host = HeadlessHost::default();
        let id = WindowIdentity::new("app", "editor");
        host.add_window(id.clone(), Rect::default());
        let window = TabWindow::new(id.clone());

        let dimmed = WindowOptions {
            frame: false,
            opacity: 0.5,
        };
        window.update_options(&host, dimmed).unwrap();
        assert_eq!(window.options(&host).unwrap(), dimmed);

        let missing = TabWindow::new(WindowIdentity::new("app", "gone"));
        assert!(matches!(missing.options(&host), Err(TabError::Host(_))));
    }
}
