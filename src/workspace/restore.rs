//! Restoring a saved workspace into live windows and tab groups.

use super::retarget::WorkspaceMonitorRetargeter;
use super::schema::check_schema_version;
use super::snapshot::{TabGroupRecord, Workspace};
use super::RestoreError;
use crate::identity::WindowIdentity;
use crate::tabbing::group_window::GroupWindowOptions;
use crate::tabbing::service::TabService;
use crate::tabbing::tab::TabPackage;
use crate::tabbing::{GroupId, TabError};
use crate::traits::WindowHost;
use log::{debug, info, warn};

/// A tab group that could not be rebuilt.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupFailure {
    /// Active tab recorded for the group.
    pub active: WindowIdentity,
    pub reason: String,
}

/// Outcome of [`restore_workspace`].
#[derive(Debug, Clone)]
pub struct RestoreReport {
    /// The snapshot as restored, after retargeting.
    pub workspace: Workspace,
    pub groups_restored: usize,
    pub failed_groups: Vec<GroupFailure>,
}

/// Restore `workspace` through `service`.
///
/// The schema version is checked before anything else; an unsupported
/// snapshot is rejected without a single host call.  After that the
/// snapshot is retargeted onto the current monitors, window bounds are
/// applied, and every tab group is rebuilt.  A window or group that fails
/// is logged and skipped; the rest of the workspace is still restored.
pub fn restore_workspace<H: WindowHost>(
    service: &mut TabService<H>,
    mut workspace: Workspace,
) -> Result<RestoreReport, RestoreError> {
    check_schema_version(
        workspace.schema_version.as_deref(),
        service.workspace_config().supported_schema_major,
    )?;

    let layout = service.host().monitors().map_err(RestoreError::host)?;
    WorkspaceMonitorRetargeter::new(service.tabbing_config().strip_height)
        .retarget(&mut workspace, &layout.monitors);

    for window in workspace.windows() {
        let id = window.identity();
        if let Err(e) = service.host().set_bounds(&id, window.bounds) {
            warn!("placing {}: {}", id, e);
        }
    }

    let mut groups_restored = 0;
    let mut failed_groups = Vec::new();
    for record in &workspace.tab_groups {
        match restore_group(service, record) {
            Ok(id) => {
                debug!("restored {} around {}", id, record.group_info.active);
                groups_restored += 1;
            }
            Err(e) => {
                warn!("restoring group of {}: {}", record.group_info.active, e);
                failed_groups.push(GroupFailure {
                    active: record.group_info.active.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    info!(
        "restored {} windows and {} tab groups",
        workspace.windows().count(),
        groups_restored
    );
    Ok(RestoreReport {
        workspace,
        groups_restored,
        failed_groups,
    })
}

fn restore_group<H: WindowHost>(
    service: &mut TabService<H>,
    record: &TabGroupRecord,
) -> Result<GroupId, TabError> {
    let info = &record.group_info;
    let tabbing = service.tabbing_config();
    let options = GroupWindowOptions::from_dimensions(
        &info.dimensions,
        &info.config,
        tabbing.strip_height,
        &tabbing.strip_url,
    );
    let id = service.create_tab_group(options)?;

    let mut added = 0;
    let mut first_error = None;
    for tab in &record.tabs {
        match service.add_tab(id, TabPackage::new(tab.clone())) {
            Ok(()) => added += 1,
            Err(e) => {
                warn!("adding {} to {}: {}", tab, id, e);
                first_error.get_or_insert(e);
            }
        }
    }
    if added == 0 {
        service.remove_tab_group(id, false)?;
        return Err(first_error.unwrap_or(TabError::EmptyGroup(id)));
    }

    service.switch_tab(&info.active)?;
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::geometry::Rect;
    use crate::headless::HeadlessHost;
    use serde_json::json;

    fn id(name: &str) -> WindowIdentity {
        WindowIdentity::new("app-1", name)
    }

    fn service() -> TabService<HeadlessHost> {
        let host = HeadlessHost::new(vec![Rect::new(0.0, 0.0, 500.0, 500.0)]);
        host.add_window(id("main-window"), Rect::default());
        host.add_window(id("child-window-1"), Rect::default());
        host.add_window(id("other"), Rect::default());
        let s = TabService::new(host, &Config::default()).unwrap();
        s.host().take_calls();
        s
    }

    fn tabbed(version: Option<&str>) -> Workspace {
        let mut value = json!({
            "apps": [{
                "uuid": "app-1",
                "mainWindow": {
                    "uuid": "app-1",
                    "name": "main-window",
                    "bounds": { "left": 100, "top": 500, "right": 400, "bottom": 800 },
                    "windowGroup": [{ "uuid": "app-1", "name": "child-window-1" }]
                },
                "childWindows": [{
                    "uuid": "app-1",
                    "name": "child-window-1",
                    "bounds": { "left": 100, "top": 500, "right": 400, "bottom": 800 },
                    "windowGroup": [{ "uuid": "app-1", "name": "main-window" }]
                }]
            }],
            "tabGroups": [{
                "groupInfo": {
                    "active": { "uuid": "app-1", "name": "child-window-1" },
                    "dimensions": { "x": 100, "y": 440, "width": 300, "appHeight": 300 },
                    "config": "default",
                    "state": "normal"
                },
                "tabs": [
                    { "uuid": "app-1", "name": "main-window" },
                    { "uuid": "app-1", "name": "child-window-1" }
                ]
            }]
        });
        if let Some(v) = version {
            value["schemaVersion"] = json!(v);
        }
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn schema_version_gate() {
        let cases = [
            (Some("1.0.0"), true),
            (Some("1.3.2"), true),
            (Some("2.0.0"), false),
            (Some("9.61.37.37"), false),
            (Some("invalid string"), false),
            (None, false),
        ];
        for (version, accepted) in cases {
            let mut s = service();
            let result = restore_workspace(&mut s, tabbed(version));
            assert_eq!(result.is_ok(), accepted, "version {:?}", version);
            if !accepted {
                assert!(s.host().calls().is_empty(), "version {:?} touched windows", version);
                assert_eq!(s.groups().count(), 0);
            }
        }
    }

    #[test]
    fn tabbed_window_is_retargeted_and_rehydrated() {
        let mut s = service();
        let report = restore_workspace(&mut s, tabbed(Some("1.0.0"))).unwrap();

        assert_eq!(report.groups_restored, 1);
        assert!(report.failed_groups.is_empty());
        assert_eq!(report.workspace.tab_groups[0].group_info.dimensions.y, 140.0);

        let group = s.groups().next().unwrap();
        assert_eq!(group.window().bounds(), Rect::new(100.0, 140.0, 400.0, 200.0));
        assert_eq!(group.len(), 2);
        assert_eq!(group.active_tab().unwrap().id(), &id("child-window-1"));

        let host = s.host();
        let expected = Rect::new(100.0, 200.0, 400.0, 500.0);
        assert_eq!(host.window(&id("main-window")).unwrap().bounds, expected);
        assert!(host.window(&id("child-window-1")).unwrap().visible);
        assert!(!host.window(&id("main-window")).unwrap().visible);
    }

    #[test]
    fn failed_group_does_not_stop_siblings() {
        let mut ws = tabbed(Some("1.0.0"));
        let mut broken = ws.tab_groups[0].clone();
        broken.group_info.active = id("ghost");
        broken.tabs = vec![id("ghost"), WindowIdentity::new("app-9", "gone")];
        ws.tab_groups.insert(0, broken);

        let mut s = service();
        let report = restore_workspace(&mut s, ws).unwrap();

        assert_eq!(report.groups_restored, 1);
        assert_eq!(report.failed_groups.len(), 1);
        assert_eq!(report.failed_groups[0].active, id("ghost"));
        assert_eq!(s.groups().count(), 1);
        assert_eq!(s.group_of(&id("child-window-1")), s.group_of(&id("main-window")));
    }

    #[test]
    fn missing_windows_are_skipped() {
        let mut ws = tabbed(Some("1.0.0"));
        ws.tab_groups[0].tabs.push(id("not-running"));
        let mut s = service();
        let report = restore_workspace(&mut s, ws).unwrap();
        assert_eq!(report.groups_restored, 1);
        assert_eq!(s.groups().next().unwrap().len(), 2);
    }

    #[test]
    fn handle_routes_restore() {
        let mut s = service();
        s.handle(crate::command::Command::RestoreWorkspace(Box::new(tabbed(Some(
            "1.0.0",
        )))))
        .unwrap();
        assert_eq!(s.groups().count(), 1);

        let err = s
            .handle(crate::command::Command::RestoreWorkspace(Box::new(tabbed(
                Some("2.0.0"),
            ))))
            .unwrap_err();
        assert!(err.to_string().contains("2.0.0"));
    }
}
