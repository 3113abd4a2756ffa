//! The command vocabulary of the tab service.
//!
//! [`Command`] describes every action the daemon can perform.  Commands
//! arrive as newline-delimited JSON in serde's externally tagged form:
//!
//! ```json
//! "EndDrag"
//! {"SwitchTab": "app-1/main-window"}
//! {"CreateTabGroup": {"windows": [{"uuid": "app-1", "name": "main"}, "app-2/main"]}}
//! {"PointerPosition": {"x": 120, "y": 40}}
//! ```
//!
//! Window identities accept both the object and the `"uuid/name"` string
//! form.

use crate::geometry::Rect;
use crate::identity::WindowIdentity;
use crate::workspace::Workspace;
use serde::{Deserialize, Serialize};

/// Every action the tab service can perform.
///
/// Commands are produced by [`CommandSource`](crate::traits::CommandSource)
/// implementations and consumed by the
/// [`TabService`](crate::tabbing::service::TabService).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Tab `windows` together under a new strip.  `active` defaults to the
    /// first window.
    CreateTabGroup {
        windows: Vec<WindowIdentity>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        active: Option<WindowIdentity>,
    },

    /// Add `window` to the group of `target`, grouping `target` first if
    /// needed.
    AddTab {
        target: WindowIdentity,
        window: WindowIdentity,
    },

    /// Take a window out of its group and restore it as a standalone window.
    RemoveTab(WindowIdentity),

    /// Remove a window from its group and close it.
    CloseTab(WindowIdentity),

    SwitchTab(WindowIdentity),

    /// Close the group the window belongs to, along with all its members.
    CloseTabGroup(WindowIdentity),

    /// Move the strip of the window's group; members follow.
    MoveTabGroup {
        window: WindowIdentity,
        bounds: Rect,
    },

    //  Drag overlay input

    /// A tab drag started for this window.
    StartDrag(WindowIdentity),

    /// The drag ended without the overlay seeing a drop.
    EndDrag,

    /// Drag-over input reached the overlay.
    DragOver,

    /// Drop input reached the overlay.
    Drop,

    /// A plain click reached the overlay.
    OverlayClick,

    /// Answer to a global pointer position query.
    PointerPosition { x: f64, y: f64 },

    /// A global pointer position query failed.
    PointerPositionFailed,

    /// The monitor configuration changed.  Without `virtual_screen` the
    /// host is asked for the new layout.
    MonitorsChanged {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        virtual_screen: Option<Rect>,
    },

    /// Restore a saved workspace.
    RestoreWorkspace(Box<Workspace>),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(uuid: &str, name: &str) -> WindowIdentity {
        WindowIdentity::new(uuid, name)
    }

    #[test]
    fn unit_commands_are_plain_strings() {
        let cmd: Command = serde_json::from_str(r#""EndDrag""#).unwrap();
        assert_eq!(cmd, Command::EndDrag);
        assert_eq!(serde_json::to_string(&Command::Drop).unwrap(), r#""Drop""#);
    }

    #[test]
    fn create_tab_group_accepts_mixed_identities() {
        let cmd: Command = serde_json::from_str(
            r#"{"CreateTabGroup": {"windows": [{"uuid": "app-1", "name": "main"}, "app-2/main"]}}"#,
        )
        .unwrap();
        assert_eq!(
            cmd,
            Command::CreateTabGroup {
                windows: vec![id("app-1", "main"), id("app-2", "main")],
                active: None,
            }
        );
    }

    #[test]
    fn switch_tab_from_string_identity() {
        let cmd: Command = serde_json::from_str(r#"{"SwitchTab": "app-1/child"}"#).unwrap();
        assert_eq!(cmd, Command::SwitchTab(id("app-1", "child")));
    }

    #[test]
    fn move_tab_group_carries_bounds() {
        let cmd: Command = serde_json::from_str(
            r#"{"MoveTabGroup": {"window": "a/b", "bounds": {"left": 0, "top": 0, "right": 300, "bottom": 60}}}"#,
        )
        .unwrap();
        assert_eq!(
            cmd,
            Command::MoveTabGroup {
                window: id("a", "b"),
                bounds: Rect::new(0.0, 0.0, 300.0, 60.0),
            }
        );
    }

    #[test]
    fn monitors_changed_layout_is_optional() {
        let cmd: Command = serde_json::from_str(r#"{"MonitorsChanged": {}}"#).unwrap();
        assert_eq!(cmd, Command::MonitorsChanged { virtual_screen: None });
    }

    #[test]
    fn restore_workspace_embeds_snapshot() {
        let cmd: Command = serde_json::from_str(
            r#"{"RestoreWorkspace": {"schemaVersion": "1.0.0", "apps": [], "tabGroups": []}}"#,
        )
        .unwrap();
        match cmd {
            Command::RestoreWorkspace(ws) => {
                assert_eq!(ws.schema_version.as_deref(), Some("1.0.0"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn unknown_command_is_rejected() {
        assert!(serde_json::from_str::<Command>(r#""Go""#).is_err());
    }
}
