//! In-memory [`WindowHost`].
//!
//! [`HeadlessHost`] keeps a table of windows and records every call made to
//! it.  The daemon uses it when no desktop runtime is attached (windows are
//! registered and driven entirely over the command socket), and the tests
//! use it to observe what the tab groups and the overlay asked for.
//!
//! Pointer queries are only recorded: whoever drives the host answers them
//! by sending a [`Command::PointerPosition`](crate::command::Command).

use crate::geometry::Rect;
use crate::identity::WindowIdentity;
use crate::traits::{MonitorLayout, WindowHost, WindowOptions, WindowSpec};
use log::debug;
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

/// State of one window known to the host.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessWindow {
    pub bounds: Rect,
    pub options: WindowOptions,
    pub visible: bool,
}

/// One call received by the host, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    Create(WindowIdentity),
    UpdateOptions(WindowIdentity, WindowOptions),
    Show(WindowIdentity),
    Hide(WindowIdentity),
    Focus(WindowIdentity),
    BringToFront(WindowIdentity),
    Close(WindowIdentity),
    SetBounds(WindowIdentity, Rect),
    RequestPointer,
    Broadcast {
        channel: String,
        topic: String,
        payload: serde_json::Value,
    },
}

/// Errors produced by the headless host.
#[derive(Debug, thiserror::Error)]
pub enum HeadlessError {
    #[error("no such window: {0}")]
    NoSuchWindow(WindowIdentity),
    #[error("window already exists: {0}")]
    AlreadyExists(WindowIdentity),
    #[error("window creation refused for {0}")]
    CreationRefused(WindowIdentity),
}

/// Host that simulates windows in memory.
#[derive(Debug, Default)]
pub struct HeadlessHost {
    windows: RefCell<BTreeMap<WindowIdentity, HeadlessWindow>>,
    calls: RefCell<Vec<HostCall>>,
    monitors: RefCell<Vec<Rect>>,
    refuse_creation: Cell<bool>,
}

impl HeadlessHost {
    pub fn new(monitors: Vec<Rect>) -> Self {
        Self {
            monitors: RefCell::new(monitors),
            ..Self::default()
        }
    }

    /// Register an application window (visible, framed, opaque).
    pub fn add_window(&self, identity: WindowIdentity, bounds: Rect) {
        self.add_window_with(
            identity,
            HeadlessWindow {
                bounds,
                options: WindowOptions::default(),
                visible: true,
            },
        );
    }

    pub fn add_window_with(&self, identity: WindowIdentity, window: HeadlessWindow) {
        self.windows.borrow_mut().insert(identity, window);
    }

    pub fn window(&self, identity: &WindowIdentity) -> Option<HeadlessWindow> {
        self.windows.borrow().get(identity).cloned()
    }

    pub fn has_window(&self, identity: &WindowIdentity) -> bool {
        self.windows.borrow().contains_key(identity)
    }

    pub fn set_monitors(&self, monitors: Vec<Rect>) {
        *self.monitors.borrow_mut() = monitors;
    }

    /// Make every subsequent `create_window` fail.
    pub fn refuse_creation(&self, refuse: bool) {
        self.refuse_creation.set(refuse);
    }

    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.borrow().clone()
    }

    /// Return and forget the calls recorded so far.
    pub fn take_calls(&self) -> Vec<HostCall> {
        std::mem::take(&mut *self.calls.borrow_mut())
    }

    fn record(&self, call: HostCall) {
        debug!("host call {:?}", call);
        self.calls.borrow_mut().push(call);
    }

    fn with_window<T>(
        &self,
        identity: &WindowIdentity,
        f: impl FnOnce(&mut HeadlessWindow) -> T,
    ) -> Result<T, HeadlessError> {
        let mut windows = self.windows.borrow_mut();
        let window = windows
            .get_mut(identity)
            .ok_or_else(|| HeadlessError::NoSuchWindow(identity.clone()))?;
        Ok(f(window))
    }
}

impl WindowHost for HeadlessHost {
    type Error = HeadlessError;

    fn create_window(&self, spec: &WindowSpec) -> Result<(), HeadlessError> {
        self.record(HostCall::Create(spec.identity.clone()));
        if self.refuse_creation.get() {
            return Err(HeadlessError::CreationRefused(spec.identity.clone()));
        }
        let mut windows = self.windows.borrow_mut();
        if windows.contains_key(&spec.identity) {
            return Err(HeadlessError::AlreadyExists(spec.identity.clone()));
        }
        windows.insert(
            spec.identity.clone(),
            HeadlessWindow {
                bounds: spec.bounds,
                options: spec.options,
                visible: false,
            },
        );
        Ok(())
    }

    fn window_options(&self, window: &WindowIdentity) -> Result<WindowOptions, HeadlessError> {
        self.with_window(window, |w| w.options)
    }

    fn update_window_options(
        &self,
        window: &WindowIdentity,
        options: WindowOptions,
    ) -> Result<(), HeadlessError> {
        self.record(HostCall::UpdateOptions(window.clone(), options));
        self.with_window(window, |w| w.options = options)
    }

    fn show_window(&self, window: &WindowIdentity) -> Result<(), HeadlessError> {
        self.record(HostCall::Show(window.clone()));
        self.with_window(window, |w| w.visible = true)
    }

    fn hide_window(&self, window: &WindowIdentity) -> Result<(), HeadlessError> {
        self.record(HostCall::Hide(window.clone()));
        self.with_window(window, |w| w.visible = false)
    }

    fn focus_window(&self, window: &WindowIdentity) -> Result<(), HeadlessError> {
        self.record(HostCall::Focus(window.clone()));
        self.with_window(window, |_| ())
    }

    fn bring_to_front(&self, window: &WindowIdentity) -> Result<(), HeadlessError> {
        self.record(HostCall::BringToFront(window.clone()));
        self.with_window(window, |_| ())
    }

    fn close_window(&self, window: &WindowIdentity) -> Result<(), HeadlessError> {
        self.record(HostCall::Close(window.clone()));
        self.windows
            .borrow_mut()
            .remove(window)
            .map(|_| ())
            .ok_or_else(|| HeadlessError::NoSuchWindow(window.clone()))
    }

    fn set_bounds(&self, window: &WindowIdentity, bounds: Rect) -> Result<(), HeadlessError> {
        self.record(HostCall::SetBounds(window.clone(), bounds));
        self.with_window(window, |w| w.bounds = bounds)
    }

    fn window_bounds(&self, window: &WindowIdentity) -> Result<Rect, HeadlessError> {
        self.with_window(window, |w| w.bounds)
    }

    fn monitors(&self) -> Result<MonitorLayout, HeadlessError> {
        Ok(MonitorLayout::from_monitors(self.monitors.borrow().clone()))
    }

    fn request_pointer_position(&self) -> Result<(), HeadlessError> {
        self.record(HostCall::RequestPointer);
        Ok(())
    }

    fn broadcast(
        &self,
        channel: &str,
        topic: &str,
        payload: &serde_json::Value,
    ) -> Result<(), HeadlessError> {
        self.record(HostCall::Broadcast {
            channel: channel.to_string(),
            topic: topic.to_string(),
            payload: payload.clone(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(name: &str) -> WindowIdentity {
        WindowIdentity::new("app", name)
    }

    #[test]
    fn records_calls_in_order() {
        let host = HeadlessHost::default();
        host.add_window(id("a"), Rect::new(0.0, 0.0, 10.0, 10.0));
        host.hide_window(&id("a")).unwrap();
        host.show_window(&id("a")).unwrap();
        assert_eq!(
            host.take_calls(),
            vec![HostCall::Hide(id("a")), HostCall::Show(id("a"))]
        );
        assert!(host.calls().is_empty());
        assert!(host.window(&id("a")).unwrap().visible);
    }

    #[test]
    fn unknown_window_is_an_error() {
        let host = HeadlessHost::default();
        assert!(matches!(
            host.window_options(&id("missing")),
            Err(HeadlessError::NoSuchWindow(_))
        ));
    }

    #[test]
    fn created_windows_start_hidden() {
        let host = HeadlessHost::default();
        let spec = WindowSpec {
            identity: id("strip"),
            url: "about:blank".into(),
            bounds: Rect::new(0.0, 0.0, 100.0, 60.0),
            options: WindowOptions {
                frame: false,
                opacity: 1.0,
            },
            always_on_top: false,
            show_taskbar_icon: false,
        };
        host.create_window(&spec).unwrap();
        assert!(!host.window(&id("strip")).unwrap().visible);
        assert!(matches!(
            host.create_window(&spec),
            Err(HeadlessError::AlreadyExists(_))
        ));
    }

    #[test]
    fn refused_creation_leaves_no_window() {
        let host = HeadlessHost::default();
        host.refuse_creation(true);
        let spec = WindowSpec {
            identity: id("strip"),
            url: "about:blank".into(),
            bounds: Rect::default(),
            options: WindowOptions::default(),
            always_on_top: false,
            show_taskbar_icon: false,
        };
        assert!(host.create_window(&spec).is_err());
        assert!(!host.has_window(&id("strip")));
    }
}
