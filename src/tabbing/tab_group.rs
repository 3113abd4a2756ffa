//! The tab group state machine.
//!
//! A [`TabGroup`] owns an ordered list of [`Tab`]s (strip order, left to
//! right), the identity of the active tab and the [`GroupWindow`] hosting the
//! strip.  Only the active tab's window is ever visible.
//!
//! # States
//!
//! ```text
//! Empty ──add_tab──▶ Active ──last tab removed──▶ Empty
//!                      │
//!                      └──last tab removed, close requested──▶ Closing
//! ```
//!
//! `Closing` is terminal for the group itself: the owning
//! [`TabService`](super::service::TabService) drops the group and closes its
//! strip window when it sees [`RemoveOutcome::CloseRequested`].

use super::group_window::GroupWindow;
use super::tab::{Tab, TabPackage, TabWindow};
use super::{GroupId, TabError};
use crate::geometry::Rect;
use crate::identity::WindowIdentity;
use crate::signal::Signal;
use crate::traits::{WindowHost, WindowOptions};
use log::{debug, info, warn};

/// Topic of the message broadcast whenever the active tab changes.
pub const TAB_ACTIVATED_TOPIC: &str = "tab-activated";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupState {
    Empty,
    Active,
    Closing,
}

/// What [`TabGroup::remove_tab`] did.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// No member had that identity; nothing changed.
    NotFound,
    Removed,
    /// The group is now empty and asks its owner to tear it down.
    CloseRequested,
}

/// Notifications emitted by a group.
#[derive(Debug, Clone, PartialEq)]
pub enum TabGroupEvent {
    TabAdded(WindowIdentity),
    TabRemoved(WindowIdentity),
    TabActivated(WindowIdentity),
}

#[derive(Debug)]
pub struct TabGroup {
    id: GroupId,
    window: GroupWindow,
    tabs: Vec<Tab>,
    active: Option<WindowIdentity>,
    state: GroupState,
    events: Signal<TabGroupEvent>,
}

impl TabGroup {
    pub fn new(id: GroupId, window: GroupWindow) -> Self {
        Self {
            id,
            window,
            tabs: Vec::new(),
            active: None,
            state: GroupState::Empty,
            events: Signal::new(),
        }
    }

    /// Create the strip window.
    pub fn init<H: WindowHost>(&self, host: &H) -> Result<(), TabError> {
        self.window.init(host)
    }

    /// Append a tab for `package.window`.
    ///
    /// The first tab becomes active (and its window is revealed right away
    /// when it is fully transparent); any later tab is hidden behind the
    /// active one.  Adding a window that is already a member returns the
    /// existing tab.
    pub fn add_tab<H: WindowHost>(
        &mut self,
        host: &H,
        package: TabPackage,
    ) -> Result<&Tab, TabError> {
        if let Some(index) = self.tab_index(&package.window) {
            debug!("{} is already in {}", package.window, self.id);
            return Ok(&self.tabs[index]);
        }

        let tab = Tab::new(package, self.id);
        let options = tab.init(host, &self.window)?;
        let id = tab.id().clone();
        self.tabs.push(tab);
        self.events.emit(&TabGroupEvent::TabAdded(id.clone()));

        let index = self.tabs.len() - 1;
        if index == 0 {
            self.state = GroupState::Active;
            if let Err(e) = self.window.show(host) {
                warn!("showing strip of {}: {}", self.id, e);
            }
            if options.opacity == 0.0 {
                if let Err(e) = self.tabs[index].window().show(host) {
                    warn!("revealing {}: {}", id, e);
                }
            }
            self.set_active_tab(host, &id);
        } else if let Err(e) = self.tabs[index].window().hide(host) {
            warn!("hiding new tab {}: {}", id, e);
        }

        debug!("added {} to {} ({} tabs)", id, self.id, self.tabs.len());
        Ok(&self.tabs[index])
    }

    /// Remove the tab for `id`.
    ///
    /// If it was active, the tab now at the same index becomes active, or
    /// the one before it when the removed tab was last.  The window is
    /// closed only when `close_app` is set.  Unknown identities are ignored.
    pub fn remove_tab<H: WindowHost>(
        &mut self,
        host: &H,
        id: &WindowIdentity,
        close_app: bool,
        close_group_if_empty: bool,
    ) -> RemoveOutcome {
        let Some(index) = self.tab_index(id) else {
            debug!("remove: {} is not in {}", id, self.id);
            return RemoveOutcome::NotFound;
        };
        let tab = self.tabs.remove(index);

        let was_active = self.active.as_ref().is_some_and(|a| a.matches(tab.id()));
        if self.tabs.is_empty() {
            self.active = None;
            self.state = GroupState::Empty;
        } else if was_active {
            let next = self
                .tabs
                .get(index)
                .or_else(|| index.checked_sub(1).and_then(|i| self.tabs.get(i)))
                .map(|t| t.id().clone());
            if let Some(next) = next {
                if let Err(e) = self.switch_tab(host, &next, true) {
                    warn!("switching to {} after removing {}: {}", next, id, e);
                    self.set_active_tab(host, &next);
                }
            }
        }

        let removed = tab.id().clone();
        tab.remove(host, close_app);
        self.events.emit(&TabGroupEvent::TabRemoved(removed));

        if close_group_if_empty && self.tabs.is_empty() {
            info!("{} is empty, closing", self.id);
            self.state = GroupState::Closing;
            return RemoveOutcome::CloseRequested;
        }
        RemoveOutcome::Removed
    }

    /// Remove the tab and hand its window back as a normal standalone
    /// window (frame restored, fully opaque).
    pub fn deregister_tab<H: WindowHost>(&mut self, host: &H, id: &WindowIdentity) -> RemoveOutcome {
        let outcome = self.remove_tab(host, id, false, true);
        if outcome != RemoveOutcome::NotFound {
            let restored = WindowOptions {
                frame: true,
                opacity: 1.0,
            };
            if let Err(e) = TabWindow::new(id.clone()).update_options(host, restored) {
                warn!("restoring frame of {}: {}", id, e);
            }
        }
        outcome
    }

    /// Make `id` the active tab.
    ///
    /// The target is shown before the previous tab is hidden so the group
    /// never flashes empty.  No-op if `id` is already active or not a member.
    pub fn switch_tab<H: WindowHost>(
        &mut self,
        host: &H,
        id: &WindowIdentity,
        hide_active_tab: bool,
    ) -> Result<(), TabError> {
        let Some(index) = self.tab_index(id) else {
            debug!("switch: {} is not in {}", id, self.id);
            return Ok(());
        };
        if self.active.as_ref().is_some_and(|a| a.matches(id)) {
            return Ok(());
        }

        let target = self.tabs[index].window().clone();
        target.show(host)?;
        if hide_active_tab {
            if let Some(previous) = &self.active {
                if let Err(e) = host.hide_window(previous) {
                    warn!("hiding {}: {}", previous, e);
                }
            }
        }
        if let Err(e) = target.bring_to_front(host) {
            warn!("raising {}: {}", id, e);
        }
        self.set_active_tab(host, id);
        Ok(())
    }

    /// Remove every tab, closing the group once empty.
    pub fn remove_all_tabs<H: WindowHost>(&mut self, host: &H, close_app: bool) -> RemoveOutcome {
        let ids: Vec<WindowIdentity> = self.tabs.iter().map(|t| t.id().clone()).collect();
        let mut outcome = RemoveOutcome::NotFound;
        for id in &ids {
            let o = self.remove_tab(host, id, close_app, true);
            if o != RemoveOutcome::NotFound {
                outcome = o;
            }
        }
        outcome
    }

    /// Move every member window back under the strip.
    pub fn realign_apps<H: WindowHost>(&self, host: &H) -> Result<(), TabError> {
        for tab in &self.tabs {
            tab.window().align_to(host, &self.window)?;
        }
        Ok(())
    }

    /// Move the strip and bring the members along.
    pub fn move_to<H: WindowHost>(&mut self, host: &H, bounds: Rect) -> Result<(), TabError> {
        self.window.set_bounds(host, bounds)?;
        self.realign_apps(host)
    }

    /// Point the active marker at `id` and announce it.  Windows are not
    /// shown or hidden.
    pub fn set_active_tab<H: WindowHost>(&mut self, host: &H, id: &WindowIdentity) {
        if self.tab_index(id).is_none() {
            debug!("set active: {} is not in {}", id, self.id);
            return;
        }
        self.active = Some(id.clone());

        let payload = serde_json::json!({ "uuid": id.uuid, "name": id.name });
        if let Err(e) = host.broadcast(&self.id.to_string(), TAB_ACTIVATED_TOPIC, &payload) {
            warn!("announcing active tab of {}: {}", self.id, e);
        }
        self.events.emit(&TabGroupEvent::TabActivated(id.clone()));
    }

    /// Close the strip window.
    pub fn close<H: WindowHost>(&self, host: &H) -> Result<(), TabError> {
        self.window.close(host)
    }

    pub fn get_tab(&self, id: &WindowIdentity) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.id().matches(id))
    }

    pub fn tab_index(&self, id: &WindowIdentity) -> Option<usize> {
        self.tabs.iter().position(|t| t.id().matches(id))
    }

    pub fn contains(&self, id: &WindowIdentity) -> bool {
        self.tab_index(id).is_some()
    }

    pub fn active_tab(&self) -> Option<&Tab> {
        self.active.as_ref().and_then(|id| self.get_tab(id))
    }

    pub fn id(&self) -> GroupId {
        self.id
    }

    pub fn window(&self) -> &GroupWindow {
        &self.window
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn state(&self) -> GroupState {
        self.state
    }

    pub fn events_mut(&mut self) -> &mut Signal<TabGroupEvent> {
        &mut self.events
    }
}
