//! Serde model of a saved workspace.
//!
//! Field names follow the persisted JSON (`camelCase`).  Unknown keys on
//! the workspace, app, window and tab group records are kept in `extra` and
//! written back unchanged.  Window `bounds` are rewritten from their edges,
//! so a stored `width`/`height` always matches the retargeted rectangle.

use crate::geometry::Rect;
use crate::identity::WindowIdentity;
use crate::tabbing::group_window::{TabGroupDimensions, TabStripConfig};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<String>,
    #[serde(default)]
    pub apps: Vec<WorkspaceApp>,
    #[serde(default)]
    pub tab_groups: Vec<TabGroupRecord>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Workspace {
    /// Every window record, main windows before their children, in
    /// snapshot order.
    pub fn windows(&self) -> impl Iterator<Item = &WorkspaceWindow> {
        self.apps.iter().flat_map(WorkspaceApp::windows)
    }

    pub fn windows_mut(&mut self) -> impl Iterator<Item = &mut WorkspaceWindow> {
        self.apps.iter_mut().flat_map(WorkspaceApp::windows_mut)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceApp {
    pub uuid: String,
    pub main_window: WorkspaceWindow,
    #[serde(default)]
    pub child_windows: Vec<WorkspaceWindow>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WorkspaceApp {
    pub fn windows(&self) -> impl Iterator<Item = &WorkspaceWindow> {
        std::iter::once(&self.main_window).chain(self.child_windows.iter())
    }

    pub fn windows_mut(&mut self) -> impl Iterator<Item = &mut WorkspaceWindow> {
        std::iter::once(&mut self.main_window).chain(self.child_windows.iter_mut())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceWindow {
    pub uuid: String,
    pub name: String,
    pub bounds: Rect,
    /// Peers this window was snapped to when saved.
    #[serde(default)]
    pub window_group: Vec<WindowIdentity>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WorkspaceWindow {
    pub fn identity(&self) -> WindowIdentity {
        WindowIdentity::new(self.uuid.clone(), self.name.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabGroupRecord {
    pub group_info: TabGroupInfo,
    /// Members in strip order.
    pub tabs: Vec<WindowIdentity>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabGroupInfo {
    pub active: WindowIdentity,
    pub dimensions: TabGroupDimensions,
    #[serde(default)]
    pub config: TabStripConfig,
    #[serde(default)]
    pub state: GroupDisplayState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupDisplayState {
    #[default]
    Normal,
    Minimized,
    Maximized,
}
