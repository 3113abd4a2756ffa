//! Core traits that decouple tabset from any specific windowing runtime or
//! transport mechanism.
//!
//! Every concrete backend (a desktop runtime, the in-memory
//! [`HeadlessHost`](crate::headless::HeadlessHost) or a test recorder)
//! implements one of these traits.  Tab groups, the drag overlay and the
//! workspace restore path only depend on these abstractions.

use crate::command::Command;
use crate::geometry::Rect;
use crate::identity::WindowIdentity;
use serde::{Deserialize, Serialize};
use std::sync::mpsc;

/// Options read from, or applied to, a native window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowOptions {
    /// Whether the window shows its native frame.
    pub frame: bool,
    /// `0.0` is fully transparent, `1.0` fully opaque.
    pub opacity: f64,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            frame: true,
            opacity: 1.0,
        }
    }
}

/// Everything needed to create a window owned by this service (tab strips
/// and the drag overlay).  Application windows are never created here.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowSpec {
    pub identity: WindowIdentity,
    pub url: String,
    pub bounds: Rect,
    pub options: WindowOptions,
    pub always_on_top: bool,
    pub show_taskbar_icon: bool,
}

/// Monitor geometry as reported by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorLayout {
    /// Bounding box of every monitor.
    pub virtual_screen: Rect,
    /// Available area of each monitor, in the host's order.
    pub monitors: Vec<Rect>,
}

impl MonitorLayout {
    /// Layout whose virtual screen is the union of `monitors`.
    pub fn from_monitors(monitors: Vec<Rect>) -> Self {
        let virtual_screen = Rect::bounding(monitors.iter()).unwrap_or_default();
        Self {
            virtual_screen,
            monitors,
        }
    }
}

/// Abstraction over the native windowing runtime.
///
/// Every method is a call across into the host.  Calls are made from a
/// single thread; implementations that need interior mutability use
/// `Cell`/`RefCell`.
pub trait WindowHost {
    /// The error type produced by this host.
    type Error: std::error::Error + Send + 'static;

    /// Create a window owned by the service.  The window starts hidden.
    fn create_window(&self, spec: &WindowSpec) -> Result<(), Self::Error>;

    /// Read the options of an existing window.  Fails if no such window
    /// exists, which is how attaching to an application window is checked.
    fn window_options(&self, window: &WindowIdentity) -> Result<WindowOptions, Self::Error>;

    fn update_window_options(
        &self,
        window: &WindowIdentity,
        options: WindowOptions,
    ) -> Result<(), Self::Error>;

    fn show_window(&self, window: &WindowIdentity) -> Result<(), Self::Error>;

    fn hide_window(&self, window: &WindowIdentity) -> Result<(), Self::Error>;

    fn focus_window(&self, window: &WindowIdentity) -> Result<(), Self::Error>;

    fn bring_to_front(&self, window: &WindowIdentity) -> Result<(), Self::Error>;

    fn close_window(&self, window: &WindowIdentity) -> Result<(), Self::Error>;

    fn set_bounds(&self, window: &WindowIdentity, bounds: Rect) -> Result<(), Self::Error>;

    /// Current bounds of a window.
    fn window_bounds(&self, window: &WindowIdentity) -> Result<Rect, Self::Error>;

    /// Current monitor geometry.
    fn monitors(&self) -> Result<MonitorLayout, Self::Error>;

    /// Ask for the global pointer position.
    ///
    /// The answer is delivered later as [`Command::PointerPosition`] (or
    /// [`Command::PointerPositionFailed`]); this call only issues the query.
    fn request_pointer_position(&self) -> Result<(), Self::Error>;

    /// Send an application-scoped message on `channel` under `topic`.
    fn broadcast(
        &self,
        channel: &str,
        topic: &str,
        payload: &serde_json::Value,
    ) -> Result<(), Self::Error>;
}

//  Command Source

/// A source of [`Command`]s.
///
/// Implementations listen on some transport (a Unix socket, a runtime's
/// event stream, an in-memory channel) and forward parsed commands into
/// the provided [`mpsc::Sender`].
///
/// # Contract
///
/// * [`run`](CommandSource::run) **blocks** until the source is exhausted or
///   an unrecoverable error occurs.
/// * Each received command must be sent through `sink` exactly once.
/// * Implementations must be [`Send`] so they can run on a dedicated thread.
pub trait CommandSource: Send {
    /// The error type produced by this source.
    type Error: std::error::Error + Send + 'static;

    /// Start listening and forward every incoming [`Command`] into `sink`.
    fn run(&mut self, sink: mpsc::Sender<Command>) -> Result<(), Self::Error>;
}
