//! The drag overlay.
//!
//! While a tab is being dragged, a borderless, nearly transparent window
//! covers the whole virtual screen and turns the host's drag input into two
//! notifications:
//!
//! | Signal                                   | Payload            |
//! |------------------------------------------|--------------------|
//! | [`on_drag_over`](DragWindowManager::on_drag_over) | dragged window + pointer |
//! | [`on_drag_drop`](DragWindowManager::on_drag_drop) | dragged window     |
//!
//! Coordinates attached to drag-over input are unreliable across monitors
//! with different scale factors, so every drag-over triggers a global
//! pointer query instead.  At most one query is in flight; its answer is
//! dropped if the overlay was hidden in the meantime.

use super::TabError;
use crate::geometry::{Point, Rect};
use crate::identity::WindowIdentity;
use crate::signal::Signal;
use crate::traits::{WindowHost, WindowOptions, WindowSpec};
use log::{debug, error, warn};

/// Overlay size while it waits offscreen.
const PARKED_SIZE: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayState {
    Hidden,
    Shown,
}

/// A dragged window is over `point`.
#[derive(Debug, Clone, PartialEq)]
pub struct DragOver {
    pub window: WindowIdentity,
    pub point: Point,
}

/// The dragged window was dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct DragDrop {
    pub window: WindowIdentity,
}

#[derive(Debug)]
pub struct DragWindowManager {
    identity: WindowIdentity,
    source: Option<WindowIdentity>,
    virtual_screen: Rect,
    active: bool,
    pending_pointer_query: bool,
    pub on_drag_over: Signal<DragOver>,
    pub on_drag_drop: Signal<DragDrop>,
}

impl DragWindowManager {
    pub fn new(identity: WindowIdentity) -> Self {
        Self {
            identity,
            source: None,
            virtual_screen: Rect::default(),
            active: false,
            pending_pointer_query: false,
            on_drag_over: Signal::new(),
            on_drag_drop: Signal::new(),
        }
    }

    /// Create the overlay window.
    ///
    /// It is first shown parked just outside the virtual screen so it can
    /// render without a flicker, then stretched over every monitor and
    /// hidden.
    pub fn init<H: WindowHost>(&mut self, host: &H) -> Result<(), TabError> {
        let layout = host
            .monitors()
            .map_err(|e| TabError::init(&self.identity, e))?;
        let screen = layout.virtual_screen;
        let spec = WindowSpec {
            identity: self.identity.clone(),
            url: "about:blank".into(),
            bounds: Rect::from_xywh(
                screen.left - PARKED_SIZE,
                screen.top - PARKED_SIZE,
                PARKED_SIZE,
                PARKED_SIZE,
            ),
            options: WindowOptions {
                frame: false,
                opacity: 0.01,
            },
            always_on_top: true,
            show_taskbar_icon: false,
        };
        host.create_window(&spec)
            .map_err(|e| TabError::init(&self.identity, e))?;
        host.show_window(&self.identity)
            .map_err(|e| TabError::init(&self.identity, e))?;
        self.on_monitors_changed(host, Some(screen))
    }

    /// Start a drag of `source`.
    pub fn show_window<H: WindowHost>(
        &mut self,
        host: &H,
        source: WindowIdentity,
    ) -> Result<(), TabError> {
        debug!("drag started for {}", source);
        self.source = Some(source);
        host.show_window(&self.identity).map_err(TabError::host)?;
        if let Err(e) = host.focus_window(&self.identity) {
            warn!("focusing drag window: {}", e);
        }
        self.active = true;
        Ok(())
    }

    /// End the drag.  Emits the drop notification if a drag was in
    /// progress; a duplicate or stray end-of-drag only hides the overlay.
    pub fn hide_window<H: WindowHost>(&mut self, host: &H) -> Result<(), TabError> {
        if self.active {
            if let Some(source) = self.source.clone() {
                self.on_drag_drop.emit(&DragDrop { window: source });
            }
        }
        self.active = false;
        self.source = None;
        host.hide_window(&self.identity).map_err(TabError::host)
    }

    /// Drag-over input from the overlay.  Queries the pointer only while
    /// shown and only when no other query is in flight.
    pub fn on_pointer_over<H: WindowHost>(&mut self, host: &H) {
        if !self.active || self.pending_pointer_query {
            return;
        }
        self.pending_pointer_query = true;
        if let Err(e) = host.request_pointer_position() {
            warn!("pointer query failed: {}", e);
            self.pending_pointer_query = false;
        }
    }

    /// Answer to the pointer query issued by
    /// [`on_pointer_over`](Self::on_pointer_over).
    pub fn resolve_pointer_position(&mut self, point: Point) {
        self.pending_pointer_query = false;
        if !self.active {
            debug!("discarding pointer position, drag already ended");
            return;
        }
        if let Some(source) = self.source.clone() {
            self.on_drag_over.emit(&DragOver {
                window: source,
                point,
            });
        }
    }

    pub fn pointer_position_failed(&mut self) {
        self.pending_pointer_query = false;
    }

    /// Drop input from the overlay.
    pub fn on_drop<H: WindowHost>(&mut self, host: &H) -> Result<(), TabError> {
        self.hide_window(host)
    }

    /// A plain click reached the overlay, which only happens when the end
    /// of a drag was never reported.
    pub fn on_click<H: WindowHost>(&mut self, host: &H) -> Result<(), TabError> {
        error!("drag window clicked; was endDrag called?");
        self.hide_window(host)
    }

    /// Stretch the overlay over the virtual screen and hide it.  Queries the
    /// host when `virtual_screen` is not given.
    pub fn on_monitors_changed<H: WindowHost>(
        &mut self,
        host: &H,
        virtual_screen: Option<Rect>,
    ) -> Result<(), TabError> {
        let screen = match virtual_screen {
            Some(screen) => screen,
            None => host.monitors().map_err(TabError::host)?.virtual_screen,
        };
        self.virtual_screen = screen;
        host.set_bounds(&self.identity, screen)
            .map_err(TabError::host)?;
        host.hide_window(&self.identity).map_err(TabError::host)
    }

    pub fn state(&self) -> OverlayState {
        if self.active {
            OverlayState::Shown
        } else {
            OverlayState::Hidden
        }
    }

    pub fn identity(&self) -> &WindowIdentity {
        &self.identity
    }

    pub fn source(&self) -> Option<&WindowIdentity> {
        self.source.as_ref()
    }

    pub fn virtual_screen(&self) -> Rect {
        self.virtual_screen
    }

    pub fn has_pending_query(&self) -> bool {
        self.pending_pointer_query
    }
}
