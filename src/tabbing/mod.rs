//! Tab groups: several application windows sharing one tab strip, only the
//! active one visible.
//!
//! [`service::TabService`] owns every [`tab_group::TabGroup`] and the single
//! [`drag_window::DragWindowManager`]; each group owns its
//! [`tab::Tab`]s and its [`group_window::GroupWindow`].

pub mod drag_window;
pub mod group_window;
pub mod service;
pub mod tab;
pub mod tab_group;

use crate::identity::WindowIdentity;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a tab group, unique within one service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupId(pub u64);

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tabgroup-{}", self.0)
    }
}

/// Possible errors from tab and tab group operations.
///
/// Looking up a window that is not part of a group is never an error; those
/// operations succeed without effect.
#[derive(Debug, thiserror::Error)]
pub enum TabError {
    /// A window could not be attached to, or created for, a group.
    #[error("failed to initialize {window}: {reason}")]
    Initialization {
        window: WindowIdentity,
        reason: String,
    },

    /// The window host returned an error.
    #[error("window host error: {0}")]
    Host(String),

    #[error("unknown tab group {0}")]
    UnknownGroup(GroupId),

    /// None of the windows meant for a new group could be attached.
    #[error("{0} ended up without tabs")]
    EmptyGroup(GroupId),
}

impl TabError {
    pub(crate) fn host(e: impl fmt::Display) -> Self {
        TabError::Host(e.to_string())
    }

    pub(crate) fn init(window: &WindowIdentity, e: impl fmt::Display) -> Self {
        TabError::Initialization {
            window: window.clone(),
            reason: e.to_string(),
        }
    }
}
