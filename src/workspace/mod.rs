//! Saved workspaces: the snapshot model, its version gate, the monitor
//! retargeting transform and the restore path that turns a snapshot back
//! into live tab groups.

pub mod restore;
pub mod retarget;
pub mod schema;
pub mod snapshot;

pub use snapshot::Workspace;

use std::fmt;

/// Possible errors from restoring a workspace.
///
/// Every variant is raised before any window is moved or created, except
/// [`Host`](RestoreError::Host), which can only come from reading the
/// monitor layout.
#[derive(Debug, thiserror::Error)]
pub enum RestoreError {
    #[error("workspace has no schemaVersion")]
    MissingSchemaVersion,

    #[error("malformed schemaVersion {0:?}")]
    MalformedSchemaVersion(String),

    #[error("schemaVersion {found} is not supported (supported major version: {supported})")]
    SchemaIncompatible { found: String, supported: u64 },

    /// The window host returned an error.
    #[error("window host error: {0}")]
    Host(String),
}

impl RestoreError {
    pub(crate) fn host(e: impl fmt::Display) -> Self {
        RestoreError::Host(e.to_string())
    }
}
