//! The owning registry of tab groups.
//!
//! [`TabService`] holds every live [`TabGroup`] and the single drag overlay,
//! and reacts to [`Command`]s by mutating them and issuing calls to the
//! [`WindowHost`].  Drag notifications from the overlay are queued on a
//! channel and drained after every command, so regrouping never runs while
//! the overlay is still emitting.  Group notifications travel the same way
//! and reach [`TabService::on_group_event`] subscribers once the command is
//! done.

use super::drag_window::{DragDrop, DragOver, DragWindowManager};
use super::group_window::{GroupWindow, GroupWindowOptions};
use super::tab::TabPackage;
use super::tab_group::{RemoveOutcome, TabGroup, TabGroupEvent};
use super::{GroupId, TabError};
use crate::command::Command;
use crate::config::{Config, TabbingConfig, WorkspaceConfig};
use crate::geometry::{Point, Rect};
use crate::identity::WindowIdentity;
use crate::signal::{Signal, SubscriptionId};
use crate::traits::WindowHost;
use crate::workspace::restore::restore_workspace;
use crate::workspace::RestoreError;
use log::{debug, info, warn};
use std::collections::BTreeMap;
use std::sync::mpsc;

/// Possible errors from [`TabService::handle`].
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Tab(#[from] TabError),

    #[error(transparent)]
    Restore(#[from] RestoreError),
}

#[derive(Debug)]
enum DragNotification {
    Over(DragOver),
    Drop(DragDrop),
}

/// A [`TabGroupEvent`] tagged with the group that emitted it.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupEvent {
    pub group: GroupId,
    pub event: TabGroupEvent,
}

/// Owns the tab groups and the drag overlay.
///
/// # Typical usage
///
/// ```ignore
/// let host = HeadlessHost::new(config.headless.monitors.clone());
/// let mut service = TabService::new(host, &config)?;
/// service.handle(Command::CreateTabGroup { windows, active: None })?;
/// ```
pub struct TabService<H: WindowHost> {
    host: H,
    tabbing: TabbingConfig,
    workspaces: WorkspaceConfig,
    groups: BTreeMap<GroupId, TabGroup>,
    next_group: u64,
    drag: DragWindowManager,
    drag_rx: mpsc::Receiver<DragNotification>,
    last_drag_point: Option<Point>,
    group_tx: mpsc::Sender<GroupEvent>,
    group_rx: mpsc::Receiver<GroupEvent>,
    group_events: Signal<GroupEvent>,
}

impl<H: WindowHost> TabService<H> {
    /// Create the service and its drag overlay.
    pub fn new(host: H, config: &Config) -> Result<Self, TabError> {
        let tabbing = config.tabbing.clone();
        let mut drag = DragWindowManager::new(WindowIdentity::new(
            tabbing.service_uuid.clone(),
            tabbing.drag_window_name.clone(),
        ));
        drag.init(&host)?;

        let (tx, drag_rx) = mpsc::channel();
        let over_tx = tx.clone();
        drag.on_drag_over.subscribe(move |e| {
            let _ = over_tx.send(DragNotification::Over(e.clone()));
        });
        drag.on_drag_drop.subscribe(move |e| {
            let _ = tx.send(DragNotification::Drop(e.clone()));
        });

        let (group_tx, group_rx) = mpsc::channel();
        Ok(Self {
            host,
            tabbing,
            workspaces: config.workspaces.clone(),
            groups: BTreeMap::new(),
            next_group: 0,
            drag,
            drag_rx,
            last_drag_point: None,
            group_tx,
            group_rx,
            group_events: Signal::new(),
        })
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn tabbing_config(&self) -> &TabbingConfig {
        &self.tabbing
    }

    pub fn workspace_config(&self) -> &WorkspaceConfig {
        &self.workspaces
    }

    pub fn groups(&self) -> impl Iterator<Item = &TabGroup> {
        self.groups.values()
    }

    pub fn group(&self, id: GroupId) -> Option<&TabGroup> {
        self.groups.get(&id)
    }

    pub fn drag(&self) -> &DragWindowManager {
        &self.drag
    }

    /// The group `window` is a tab of, if any.
    pub fn group_of(&self, window: &WindowIdentity) -> Option<GroupId> {
        self.groups
            .values()
            .find(|g| g.contains(window))
            .map(|g| g.id())
    }

    /// Create an empty group with its strip window.
    pub fn create_tab_group(&mut self, options: GroupWindowOptions) -> Result<GroupId, TabError> {
        let id = GroupId(self.next_group);
        self.next_group += 1;

        let window = GroupWindow::new(
            WindowIdentity::new(self.tabbing.service_uuid.clone(), id.to_string()),
            options,
        );
        let mut group = TabGroup::new(id, window);
        group.init(&self.host)?;
        let tx = self.group_tx.clone();
        group.events_mut().subscribe(move |e| {
            let _ = tx.send(GroupEvent {
                group: id,
                event: e.clone(),
            });
        });
        self.groups.insert(id, group);
        info!("created {}", id);
        Ok(id)
    }

    /// Add `package.window` to `group`, taking it out of any other group
    /// first.
    pub fn add_tab(&mut self, group: GroupId, package: TabPackage) -> Result<(), TabError> {
        if !self.groups.contains_key(&group) {
            return Err(TabError::UnknownGroup(group));
        }
        if let Some(current) = self.group_of(&package.window) {
            if current == group {
                return Ok(());
            }
            self.detach(current, &package.window);
        }
        let target = self
            .groups
            .get_mut(&group)
            .ok_or(TabError::UnknownGroup(group))?;
        target.add_tab(&self.host, package)?;
        Ok(())
    }

    /// Remove `window` from its group, closing it when `close_app` is set.
    pub fn remove_tab(&mut self, window: &WindowIdentity, close_app: bool) {
        let Some(id) = self.group_of(window) else {
            debug!("remove: {} is not tabbed", window);
            return;
        };
        if let Some(group) = self.groups.get_mut(&id) {
            let outcome = group.remove_tab(&self.host, window, close_app, true);
            self.settle(id, outcome);
        }
    }

    /// Turn `window` back into a standalone window.
    pub fn deregister_tab(&mut self, window: &WindowIdentity) {
        let Some(id) = self.group_of(window) else {
            debug!("deregister: {} is not tabbed", window);
            return;
        };
        if let Some(group) = self.groups.get_mut(&id) {
            let outcome = group.deregister_tab(&self.host, window);
            self.settle(id, outcome);
        }
    }

    pub fn switch_tab(&mut self, window: &WindowIdentity) -> Result<(), TabError> {
        let Some(id) = self.group_of(window) else {
            debug!("switch: {} is not tabbed", window);
            return Ok(());
        };
        match self.groups.get_mut(&id) {
            Some(group) => group.switch_tab(&self.host, window, true),
            None => Ok(()),
        }
    }

    /// Remove every tab of `group` and close its strip.
    pub fn remove_tab_group(&mut self, group: GroupId, close_apps: bool) -> Result<(), TabError> {
        let target = self
            .groups
            .get_mut(&group)
            .ok_or(TabError::UnknownGroup(group))?;
        let _ = target.remove_all_tabs(&self.host, close_apps);
        self.finalize_group(group);
        Ok(())
    }

    /// Move the strip of `group` to `bounds` and realign its members.
    pub fn move_group(&mut self, group: GroupId, bounds: Rect) -> Result<(), TabError> {
        self.groups
            .get_mut(&group)
            .ok_or(TabError::UnknownGroup(group))?
            .move_to(&self.host, bounds)
    }

    pub fn realign(&self, group: GroupId) -> Result<(), TabError> {
        self.groups
            .get(&group)
            .ok_or(TabError::UnknownGroup(group))?
            .realign_apps(&self.host)
    }

    /// Tab `windows` together under a new strip placed above the first
    /// window, then activate `active` (or the first window).
    ///
    /// Returns `None` when `windows` is empty.  Windows that cannot be
    /// attached are skipped; if none can be, the new group is torn down and
    /// the first error returned.
    pub fn tab_windows(
        &mut self,
        windows: &[WindowIdentity],
        active: Option<&WindowIdentity>,
    ) -> Result<Option<GroupId>, TabError> {
        let Some(first) = windows.first() else {
            debug!("tab_windows called without windows");
            return Ok(None);
        };

        for window in windows {
            self.deregister_tab(window);
        }

        let bounds = self
            .host
            .window_bounds(first)
            .map_err(|e| TabError::init(first, e))?;
        let options = GroupWindowOptions::above(
            bounds,
            self.tabbing.strip_height,
            self.tabbing.strip_url.clone(),
        );
        let id = self.create_tab_group(options)?;

        let mut first_error = None;
        if let Some(group) = self.groups.get_mut(&id) {
            for window in windows {
                if let Err(e) = group.add_tab(&self.host, TabPackage::new(window.clone())) {
                    warn!("tabbing {}: {}", window, e);
                    first_error.get_or_insert(e);
                }
            }
            if group.is_empty() {
                self.finalize_group(id);
                return Err(first_error.unwrap_or(TabError::EmptyGroup(id)));
            }
            let target = active.unwrap_or(first);
            group.switch_tab(&self.host, target, true)?;
        }
        Ok(Some(id))
    }

    /// Add `window` to the group of `target`, creating a group around
    /// `target` if it is not tabbed yet.
    pub fn add_to_group_of(
        &mut self,
        target: &WindowIdentity,
        window: &WindowIdentity,
    ) -> Result<(), TabError> {
        if target.matches(window) {
            return Ok(());
        }
        match self.group_of(target) {
            Some(group) => self.add_tab(group, TabPackage::new(window.clone())),
            None => self
                .tab_windows(&[target.clone(), window.clone()], Some(target))
                .map(|_| ()),
        }
    }

    /// Begin dragging the tab of `window`.
    pub fn start_drag(&mut self, window: &WindowIdentity) -> Result<(), TabError> {
        self.last_drag_point = None;
        self.drag.show_window(&self.host, window.clone())
    }

    /// End the current drag without a drop on the overlay.
    pub fn end_drag(&mut self) -> Result<(), TabError> {
        self.drag.hide_window(&self.host)?;
        self.process_drag_notifications()
    }

    /// Observe tab additions, removals and activations of every group.
    ///
    /// Handlers run after the [`handle`](Self::handle) call that caused the
    /// change, in emission order.
    pub fn on_group_event(&mut self, handler: impl FnMut(&GroupEvent) + 'static) -> SubscriptionId {
        self.group_events.subscribe(handler)
    }

    pub fn unsubscribe_group_event(&mut self, id: SubscriptionId) -> bool {
        self.group_events.unsubscribe(id)
    }

    /// Process a single [`Command`].
    pub fn handle(&mut self, cmd: Command) -> Result<(), ServiceError> {
        let result = self.dispatch(cmd);
        self.forward_group_events();
        result
    }

    fn dispatch(&mut self, cmd: Command) -> Result<(), ServiceError> {
        match cmd {
            Command::CreateTabGroup { windows, active } => {
                info!("tab {} windows", windows.len());
                self.tab_windows(&windows, active.as_ref())?;
            }
            Command::AddTab { target, window } => {
                info!("add {} to the group of {}", window, target);
                self.add_to_group_of(&target, &window)?;
            }
            Command::RemoveTab(window) => self.deregister_tab(&window),
            Command::CloseTab(window) => self.remove_tab(&window, true),
            Command::SwitchTab(window) => self.switch_tab(&window)?,
            Command::CloseTabGroup(window) => match self.group_of(&window) {
                Some(group) => self.remove_tab_group(group, true)?,
                None => debug!("close group: {} is not tabbed", window),
            },
            Command::MoveTabGroup { window, bounds } => match self.group_of(&window) {
                Some(group) => self.move_group(group, bounds)?,
                None => debug!("move group: {} is not tabbed", window),
            },
            Command::StartDrag(window) => self.start_drag(&window)?,
            Command::EndDrag => self.end_drag()?,
            Command::DragOver => self.drag.on_pointer_over(&self.host),
            Command::Drop => self.drag.on_drop(&self.host)?,
            Command::OverlayClick => self.drag.on_click(&self.host)?,
            Command::PointerPosition { x, y } => {
                self.drag.resolve_pointer_position(Point::new(x, y))
            }
            Command::PointerPositionFailed => self.drag.pointer_position_failed(),
            Command::MonitorsChanged { virtual_screen } => {
                self.drag.on_monitors_changed(&self.host, virtual_screen)?
            }
            Command::RestoreWorkspace(workspace) => {
                let report = restore_workspace(self, *workspace)?;
                info!(
                    "workspace restored: {} groups, {} failed",
                    report.groups_restored,
                    report.failed_groups.len()
                );
            }
        }
        self.process_drag_notifications()?;
        Ok(())
    }

    fn forward_group_events(&mut self) {
        let pending: Vec<GroupEvent> = self.group_rx.try_iter().collect();
        for event in &pending {
            self.group_events.emit(event);
        }
    }

    fn process_drag_notifications(&mut self) -> Result<(), TabError> {
        let pending: Vec<DragNotification> = self.drag_rx.try_iter().collect();
        for notification in pending {
            match notification {
                DragNotification::Over(over) => self.last_drag_point = Some(over.point),
                DragNotification::Drop(drop) => {
                    let point = self.last_drag_point.take();
                    self.drop_tab(&drop.window, point)?;
                }
            }
        }
        Ok(())
    }

    /// Finish a drag of `window` released at `point`.
    fn drop_tab(&mut self, window: &WindowIdentity, point: Option<Point>) -> Result<(), TabError> {
        let Some(point) = point else {
            debug!("drop of {} without a pointer position", window);
            return Ok(());
        };
        let source = self.group_of(window);
        let target = self
            .groups
            .values()
            .find(|g| g.window().bounds().contains_point(point))
            .map(|g| g.id());

        match (source, target) {
            (Some(s), Some(t)) if s == t => {
                debug!("{} dropped on its own strip", window);
            }
            (_, Some(t)) => {
                let package = source
                    .and_then(|s| self.groups.get(&s))
                    .and_then(|g| g.get_tab(window))
                    .map(|tab| tab.package())
                    .unwrap_or_else(|| TabPackage::new(window.clone()));
                info!("moving {} to {}", window, t);
                self.add_tab(t, package)?;
                if let Some(group) = self.groups.get_mut(&t) {
                    group.switch_tab(&self.host, window, true)?;
                }
            }
            (Some(s), None) => {
                let size = self
                    .groups
                    .get(&s)
                    .map(|g| g.window().member_bounds())
                    .unwrap_or_default();
                info!("ejecting {} from {}", window, s);
                self.deregister_tab(window);
                let bounds = Rect::from_xywh(point.x, point.y, size.width(), size.height());
                if let Err(e) = self.host.set_bounds(window, bounds) {
                    warn!("placing ejected {}: {}", window, e);
                }
            }
            (None, None) => debug!("{} dropped outside any group", window),
        }
        Ok(())
    }

    fn detach(&mut self, group: GroupId, window: &WindowIdentity) {
        if let Some(g) = self.groups.get_mut(&group) {
            let outcome = g.remove_tab(&self.host, window, false, true);
            self.settle(group, outcome);
        }
    }

    fn settle(&mut self, group: GroupId, outcome: RemoveOutcome) {
        if outcome == RemoveOutcome::CloseRequested {
            self.finalize_group(group);
        }
    }

    fn finalize_group(&mut self, group: GroupId) {
        if let Some(g) = self.groups.remove(&group) {
            if let Err(e) = g.close(&self.host) {
                warn!("closing strip of {}: {}", group, e);
            }
            info!("removed {}", group);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::{HeadlessHost, HostCall};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn id(name: &str) -> WindowIdentity {
        WindowIdentity::new("app", name)
    }

    fn strip(n: u64) -> WindowIdentity {
        WindowIdentity::new("tabset-service", GroupId(n).to_string())
    }

    fn service() -> TabService<HeadlessHost> {
        let host = HeadlessHost::new(vec![Rect::new(0.0, 0.0, 1920.0, 1080.0)]);
        host.add_window(id("a1"), Rect::new(0.0, 100.0, 300.0, 400.0));
        host.add_window(id("a2"), Rect::new(50.0, 150.0, 350.0, 450.0));
        host.add_window(id("b1"), Rect::new(600.0, 100.0, 900.0, 400.0));
        TabService::new(host, &Config::default()).unwrap()
    }

    fn two_groups() -> TabService<HeadlessHost> {
        let mut s = service();
        s.handle(Command::CreateTabGroup {
            windows: vec![id("a1"), id("a2")],
            active: None,
        })
        .unwrap();
        s.handle(Command::CreateTabGroup {
            windows: vec![id("b1")],
            active: None,
        })
        .unwrap();
        s
    }

    fn drag_to(s: &mut TabService<HeadlessHost>, window: &str, x: f64, y: f64) {
        s.handle(Command::StartDrag(id(window))).unwrap();
        s.handle(Command::DragOver).unwrap();
        s.handle(Command::PointerPosition { x, y }).unwrap();
        s.handle(Command::Drop).unwrap();
    }

    fn active_of(s: &TabService<HeadlessHost>, group: GroupId) -> Option<String> {
        s.group(group)?.active_tab().map(|t| t.id().name.clone())
    }

    #[test]
    fn new_creates_hidden_overlay() {
        let s = service();
        let overlay = WindowIdentity::new("tabset-service", "TabbingDragWindow");
        let native = s.host().window(&overlay).unwrap();
        assert!(!native.visible);
        assert_eq!(native.bounds, Rect::new(0.0, 0.0, 1920.0, 1080.0));
    }

    #[test]
    fn tab_windows_places_strip_above_first_window() {
        let s = two_groups();
        let a = s.group_of(&id("a1")).unwrap();
        assert_eq!(s.group_of(&id("a2")), Some(a));

        let group = s.group(a).unwrap();
        assert_eq!(group.window().bounds(), Rect::new(0.0, 40.0, 300.0, 100.0));
        assert_eq!(
            s.host().window(&id("a2")).unwrap().bounds,
            Rect::new(0.0, 100.0, 300.0, 400.0)
        );
        assert_eq!(active_of(&s, a).as_deref(), Some("a1"));
        assert!(!s.host().window(&id("a2")).unwrap().visible);
    }

    #[test]
    fn tab_windows_honours_requested_active() {
        let mut s = service();
        let g = s
            .tab_windows(&[id("a1"), id("a2")], Some(&id("a2")))
            .unwrap()
            .unwrap();
        assert_eq!(active_of(&s, g).as_deref(), Some("a2"));
        assert!(!s.host().window(&id("a1")).unwrap().visible);
    }

    #[test]
    fn tab_windows_without_any_attachable_window_fails() {
        let mut s = service();
        assert!(s.tab_windows(&[], None).unwrap().is_none());
        assert!(s.tab_windows(&[id("ghost")], None).is_err());
        assert_eq!(s.groups().count(), 0);
    }

    #[test]
    fn retabbing_moves_windows_out_of_old_group() {
        let mut s = two_groups();
        let old = s.group_of(&id("b1")).unwrap();
        s.handle(Command::CreateTabGroup {
            windows: vec![id("b1"), id("a2")],
            active: None,
        })
        .unwrap();

        assert!(s.group(old).is_none());
        assert!(!s.host().has_window(&strip(old.0)));
        let new = s.group_of(&id("b1")).unwrap();
        assert_eq!(s.group_of(&id("a2")), Some(new));
        assert_eq!(s.group(s.group_of(&id("a1")).unwrap()).unwrap().len(), 1);
    }

    #[test]
    fn closing_last_tab_tears_group_down() {
        let mut s = two_groups();
        let b = s.group_of(&id("b1")).unwrap();
        s.handle(Command::CloseTab(id("b1"))).unwrap();
        assert!(s.group(b).is_none());
        assert!(!s.host().has_window(&id("b1")));
        assert!(!s.host().has_window(&strip(b.0)));
    }

    #[test]
    fn unknown_windows_are_ignored() {
        let mut s = two_groups();
        s.host().take_calls();
        s.handle(Command::RemoveTab(id("nobody"))).unwrap();
        s.handle(Command::SwitchTab(id("nobody"))).unwrap();
        s.handle(Command::CloseTabGroup(id("nobody"))).unwrap();
        assert!(s.host().calls().is_empty());
        assert_eq!(s.groups().count(), 2);
    }

    #[test]
    fn unknown_group_is_an_error() {
        let mut s = service();
        assert!(matches!(
            s.move_group(GroupId(42), Rect::default()),
            Err(TabError::UnknownGroup(GroupId(42)))
        ));
    }

    #[test]
    fn add_tab_creates_group_around_untabbed_target() {
        let mut s = service();
        s.handle(Command::AddTab {
            target: id("b1"),
            window: id("a1"),
        })
        .unwrap();
        let g = s.group_of(&id("b1")).unwrap();
        assert_eq!(s.group_of(&id("a1")), Some(g));
        assert_eq!(active_of(&s, g).as_deref(), Some("b1"));
    }

    #[test]
    fn move_tab_group_realigns_members() {
        let mut s = two_groups();
        s.handle(Command::MoveTabGroup {
            window: id("a2"),
            bounds: Rect::new(500.0, 500.0, 800.0, 560.0),
        })
        .unwrap();
        let expected = Rect::new(500.0, 560.0, 800.0, 860.0);
        assert_eq!(s.host().window(&id("a1")).unwrap().bounds, expected);
        assert_eq!(s.host().window(&id("a2")).unwrap().bounds, expected);
    }

    #[test]
    fn close_tab_group_closes_every_app() {
        let mut s = two_groups();
        s.handle(Command::CloseTabGroup(id("a1"))).unwrap();
        assert!(s.group_of(&id("a1")).is_none());
        assert!(!s.host().has_window(&id("a1")));
        assert!(!s.host().has_window(&id("a2")));
        assert_eq!(s.groups().count(), 1);
    }

    #[test]
    fn dropping_on_another_strip_moves_the_tab() {
        let mut s = two_groups();
        let a = s.group_of(&id("a1")).unwrap();
        let b = s.group_of(&id("b1")).unwrap();

        drag_to(&mut s, "a2", 700.0, 70.0);

        assert_eq!(s.group_of(&id("a2")), Some(b));
        assert_eq!(active_of(&s, b).as_deref(), Some("a2"));
        assert_eq!(s.group(a).unwrap().len(), 1);
        assert!(s.host().window(&id("a2")).unwrap().visible);
        assert!(!s.host().window(&id("b1")).unwrap().visible);
        assert_eq!(
            s.host().window(&id("a2")).unwrap().bounds,
            Rect::new(600.0, 100.0, 900.0, 400.0)
        );
    }

    #[test]
    fn dropping_outside_every_strip_ejects_the_tab() {
        let mut s = two_groups();
        drag_to(&mut s, "a2", 1000.0, 600.0);

        assert!(s.group_of(&id("a2")).is_none());
        let native = s.host().window(&id("a2")).unwrap();
        assert!(native.visible);
        assert!(native.options.frame);
        assert_eq!(native.bounds, Rect::new(1000.0, 600.0, 1300.0, 900.0));
    }

    #[test]
    fn dropping_on_own_strip_changes_nothing() {
        let mut s = two_groups();
        let a = s.group_of(&id("a1")).unwrap();
        drag_to(&mut s, "a2", 10.0, 50.0);
        assert_eq!(s.group_of(&id("a2")), Some(a));
        assert_eq!(s.group(a).unwrap().len(), 2);
    }

    #[test]
    fn pointer_answer_after_drop_is_ignored() {
        let mut s = two_groups();
        s.handle(Command::StartDrag(id("a2"))).unwrap();
        s.handle(Command::DragOver).unwrap();
        s.handle(Command::EndDrag).unwrap();
        s.handle(Command::PointerPosition { x: 700.0, y: 70.0 })
            .unwrap();

        let a = s.group_of(&id("a1")).unwrap();
        assert_eq!(s.group_of(&id("a2")), Some(a));
    }

    #[test]
    fn drag_over_queries_pointer_once() {
        let mut s = two_groups();
        s.handle(Command::StartDrag(id("a2"))).unwrap();
        s.host().take_calls();
        s.handle(Command::DragOver).unwrap();
        s.handle(Command::DragOver).unwrap();
        assert_eq!(s.host().calls(), vec![HostCall::RequestPointer]);
    }

    #[test]
    fn group_events_reach_service_subscribers() {
        let mut s = service();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        s.on_group_event(move |e| sink.borrow_mut().push(e.clone()));

        s.handle(Command::CreateTabGroup {
            windows: vec![id("a1"), id("a2")],
            active: None,
        })
        .unwrap();
        let g = s.group_of(&id("a1")).unwrap();
        s.handle(Command::RemoveTab(id("a2"))).unwrap();

        let ev = |event| GroupEvent { group: g, event };
        assert_eq!(
            *seen.borrow(),
            vec![
                ev(TabGroupEvent::TabAdded(id("a1"))),
                ev(TabGroupEvent::TabActivated(id("a1"))),
                ev(TabGroupEvent::TabAdded(id("a2"))),
                ev(TabGroupEvent::TabRemoved(id("a2"))),
            ]
        );
    }

    #[test]
    fn unsubscribed_handler_sees_nothing() {
        let mut s = service();
        let seen = Rc::new(RefCell::new(0));
        let sink = seen.clone();
        let sub = s.on_group_event(move |_| *sink.borrow_mut() += 1);
        assert!(s.unsubscribe_group_event(sub));
        s.handle(Command::CreateTabGroup {
            windows: vec![id("b1")],
            active: None,
        })
        .unwrap();
        assert_eq!(*seen.borrow(), 0);
    }

    #[test]
    fn end_drag_without_position_leaves_groups_alone() {
        let mut s = two_groups();
        s.handle(Command::StartDrag(id("a2"))).unwrap();
        s.handle(Command::EndDrag).unwrap();
        assert_eq!(s.drag().state(), crate::tabbing::drag_window::OverlayState::Hidden);
        let a = s.group_of(&id("a1")).unwrap();
        assert_eq!(s.group_of(&id("a2")), Some(a));
    }
}
