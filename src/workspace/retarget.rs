//! Monitor retargeting.
//!
//! A snapshot saved on one monitor layout is rewritten in place so that it
//! can be restored on another.  Windows move together with their
//! window-group peers and their tab strip:
//!
//! 1. Windows are partitioned into components: window-group peers and tab
//!    group members are connected, transitively.  Each tab strip joins the
//!    component of its active tab.
//! 2. A component whose windows and strips each already lie on some
//!    monitor is left alone.
//! 3. Otherwise the component is sent to the monitor containing its center,
//!    or the nearest one.  If it fits there it is shifted by the smallest
//!    offset that brings it fully on screen.
//! 4. A component larger than that monitor is centred on it and broken up:
//!    every tab group and every remaining window becomes its own unit,
//!    scaled down (never up) until it fits and then shifted on screen.
//!    Window-group links between different units are dropped, since those
//!    windows no longer touch.
//!
//! Components, and windows within them, are visited in identity order, so
//! the output depends only on the input.

use super::snapshot::Workspace;
use crate::geometry::{Point, Rect};
use crate::identity::WindowIdentity;
use log::{debug, warn};
use std::collections::{BTreeMap, BTreeSet};

/// Strip height assumed for groups using the default strip.
pub const DEFAULT_STRIP_HEIGHT: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkspaceMonitorRetargeter {
    default_strip_height: f64,
}

impl Default for WorkspaceMonitorRetargeter {
    fn default() -> Self {
        Self::new(DEFAULT_STRIP_HEIGHT)
    }
}

/// Retarget `workspace` onto `monitors` with the default strip height.
pub fn retarget(workspace: &mut Workspace, monitors: &[Rect]) {
    WorkspaceMonitorRetargeter::default().retarget(workspace, monitors);
}

impl WorkspaceMonitorRetargeter {
    pub fn new(default_strip_height: f64) -> Self {
        Self {
            default_strip_height,
        }
    }

    /// Rewrite window bounds, tab strip dimensions and window groups of
    /// `workspace` for `monitors`.
    pub fn retarget(&self, workspace: &mut Workspace, monitors: &[Rect]) {
        if monitors.is_empty() {
            warn!("no monitors to retarget onto, leaving workspace as is");
            return;
        }

        let mut layout = Layout::build(workspace, self.default_strip_height);
        let components = layout.components();
        for (members, strips) in &components {
            layout.place(members, strips, monitors);
        }
        layout.write_back(workspace);
    }
}

//  Layout

#[derive(Debug)]
struct Strip {
    rect: Rect,
    height: f64,
    anchor: usize,
    members: Vec<usize>,
    app_height: Option<f64>,
}

#[derive(Debug)]
struct Unit {
    members: Vec<usize>,
    strip: Option<usize>,
}

/// Working copy of the geometry, indexed by position in the sorted list of
/// window identities.
#[derive(Debug)]
struct Layout {
    ids: Vec<WindowIdentity>,
    bounds: Vec<Rect>,
    /// One entry per tab group record; `None` when none of its tabs are in
    /// the snapshot.
    strips: Vec<Option<Strip>>,
    parent: Vec<usize>,
    unit_of: Vec<Option<usize>>,
    next_unit: usize,
}

impl Layout {
    fn build(workspace: &Workspace, default_strip_height: f64) -> Self {
        let mut nodes: BTreeMap<WindowIdentity, Rect> = BTreeMap::new();
        for window in workspace.windows() {
            let id = window.identity();
            if nodes.contains_key(&id) {
                warn!("{} is recorded more than once, keeping the first bounds", id);
                continue;
            }
            nodes.insert(id, window.bounds);
        }
        let (ids, bounds): (Vec<_>, Vec<_>) = nodes.into_iter().unzip();
        let n = ids.len();

        let mut layout = Layout {
            ids,
            bounds,
            strips: Vec::new(),
            parent: (0..n).collect(),
            unit_of: vec![None; n],
            next_unit: 0,
        };

        for window in workspace.windows() {
            let Some(a) = layout.index(&window.identity()) else {
                continue;
            };
            for peer in &window.window_group {
                if let Some(b) = layout.index(peer) {
                    layout.union(a, b);
                }
            }
        }

        for record in &workspace.tab_groups {
            let members: Vec<usize> = record
                .tabs
                .iter()
                .filter_map(|tab| layout.index(tab))
                .collect();
            let anchor = layout
                .index(&record.group_info.active)
                .filter(|a| members.contains(a))
                .or_else(|| members.first().copied());
            let strip = anchor.map(|anchor| {
                for &m in &members {
                    layout.union(anchor, m);
                }
                let info = &record.group_info;
                let height = info.config.height(default_strip_height);
                Strip {
                    rect: Rect::from_xywh(
                        info.dimensions.x,
                        info.dimensions.y,
                        info.dimensions.width,
                        height,
                    ),
                    height,
                    anchor,
                    members,
                    app_height: None,
                }
            });
            if strip.is_none() {
                debug!("tab group of {} has no windows in the snapshot", record.group_info.active);
            }
            layout.strips.push(strip);
        }

        layout
    }

    fn index(&self, id: &WindowIdentity) -> Option<usize> {
        self.ids.binary_search(id).ok()
    }

    fn find(&mut self, mut i: usize) -> usize {
        while self.parent[i] != i {
            self.parent[i] = self.parent[self.parent[i]];
            i = self.parent[i];
        }
        i
    }

    /// The smaller index becomes the root, so every root is the first
    /// identity of its component.
    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra != rb {
            let (lo, hi) = (ra.min(rb), ra.max(rb));
            self.parent[hi] = lo;
        }
    }

    /// Members and strips of every component, ordered by first identity.
    fn components(&mut self) -> Vec<(Vec<usize>, Vec<usize>)> {
        let mut by_root: BTreeMap<usize, (Vec<usize>, Vec<usize>)> = BTreeMap::new();
        for i in 0..self.ids.len() {
            let root = self.find(i);
            by_root.entry(root).or_default().0.push(i);
        }
        for g in 0..self.strips.len() {
            let Some(anchor) = self.strips[g].as_ref().map(|s| s.anchor) else {
                continue;
            };
            let root = self.find(anchor);
            by_root.entry(root).or_default().1.push(g);
        }
        by_root.into_values().collect()
    }

    fn strip_rect(&self, g: usize) -> Option<Rect> {
        self.strips[g].as_ref().map(|s| s.rect)
    }

    fn rects(&self, members: &[usize], strips: &[usize]) -> Vec<Rect> {
        members
            .iter()
            .map(|&i| self.bounds[i])
            .chain(strips.iter().filter_map(|&g| self.strip_rect(g)))
            .collect()
    }

    fn translate(&mut self, members: &[usize], strips: &[usize], dx: f64, dy: f64) {
        if dx == 0.0 && dy == 0.0 {
            return;
        }
        for &i in members {
            self.bounds[i] = self.bounds[i].translate(dx, dy);
        }
        for &g in strips {
            if let Some(strip) = self.strips[g].as_mut() {
                strip.rect = strip.rect.translate(dx, dy);
            }
        }
    }

    fn place(&mut self, members: &[usize], strips: &[usize], monitors: &[Rect]) {
        let rects = self.rects(members, strips);
        if rects.iter().all(|r| monitors.iter().any(|m| m.contains(r))) {
            debug!("{} already on screen", self.ids[members[0]]);
            return;
        }
        let Some(area) = Rect::bounding(&rects) else {
            return;
        };
        let target = target_monitor(monitors, area.center());

        if target.can_hold(&area) {
            let (dx, dy) = area.offset_into(&target);
            debug!("moving {} by ({}, {})", self.ids[members[0]], dx, dy);
            self.translate(members, strips, dx, dy);
            return;
        }

        debug!("splitting {} to fit {:?}", self.ids[members[0]], target);
        let (from, to) = (area.center(), target.center());
        self.translate(
            members,
            strips,
            (to.x - from.x).round(),
            (to.y - from.y).round(),
        );
        for unit in self.units(members, strips) {
            self.fit_unit(&unit, &target);
            let id = self.next_unit;
            self.next_unit += 1;
            for &i in &unit.members {
                self.unit_of[i] = Some(id);
            }
        }
    }

    /// Each tab group is one unit, every other window its own.
    fn units(&self, members: &[usize], strips: &[usize]) -> Vec<Unit> {
        let mut assigned = BTreeSet::new();
        let mut units = Vec::new();
        for &g in strips {
            if let Some(strip) = &self.strips[g] {
                let grouped = strip
                    .members
                    .iter()
                    .copied()
                    .filter(|i| members.contains(i) && assigned.insert(*i))
                    .collect();
                units.push(Unit {
                    members: grouped,
                    strip: Some(g),
                });
            }
        }
        for &i in members {
            if assigned.insert(i) {
                units.push(Unit {
                    members: vec![i],
                    strip: None,
                });
            }
        }
        units
    }

    fn fit_unit(&mut self, unit: &Unit, target: &Rect) {
        let Some(windows) = Rect::bounding(unit.members.iter().map(|&i| &self.bounds[i])) else {
            return;
        };
        let strip_height = unit
            .strip
            .and_then(|g| self.strips[g].as_ref())
            .map_or(0.0, |s| s.height);

        let mut scale: f64 = 1.0;
        if windows.width() > 0.0 {
            scale = scale.min(target.width() / windows.width());
        }
        if windows.height() > 0.0 {
            scale = scale.min((target.height() - strip_height) / windows.height());
        }

        if scale > 0.0 && scale < 1.0 {
            let origin = Point::new(windows.left, windows.top);
            for &i in &unit.members {
                self.bounds[i] = self.bounds[i].scale_about(origin, scale);
            }
            if let Some(strip) = unit.strip.and_then(|g| self.strips[g].as_mut()) {
                let anchor = self.bounds[strip.anchor];
                strip.rect = Rect::from_xywh(
                    anchor.left,
                    anchor.top - strip.height,
                    anchor.width(),
                    strip.height,
                );
                strip.app_height = Some(anchor.height());
            }
        }

        let strips: Vec<usize> = unit.strip.into_iter().collect();
        let Some(area) = Rect::bounding(&self.rects(&unit.members, &strips)) else {
            return;
        };
        let (dx, dy) = area.offset_into(target);
        self.translate(&unit.members, &strips, dx, dy);
    }

    fn write_back(&self, workspace: &mut Workspace) {
        for window in workspace.windows_mut() {
            let Some(i) = self.index(&window.identity()) else {
                continue;
            };
            window.bounds = self.bounds[i];
            if let Some(unit) = self.unit_of[i] {
                window
                    .window_group
                    .retain(|peer| self.index(peer).and_then(|j| self.unit_of[j]) == Some(unit));
            }
        }
        for (record, strip) in workspace.tab_groups.iter_mut().zip(&self.strips) {
            let Some(strip) = strip else {
                continue;
            };
            let dims = &mut record.group_info.dimensions;
            dims.x = strip.rect.left;
            dims.y = strip.rect.top;
            dims.width = strip.rect.width();
            if let Some(app_height) = strip.app_height {
                dims.app_height = app_height;
            }
        }
    }
}

/// First monitor containing `center`, else the nearest one.
fn target_monitor(monitors: &[Rect], center: Point) -> Rect {
    monitors
        .iter()
        .find(|m| m.contains_point(center))
        .or_else(|| {
            monitors
                .iter()
                .min_by(|a, b| a.distance_to(center).total_cmp(&b.distance_to(center)))
        })
        .copied()
        .unwrap_or_default()
}
