//! **tabset**: tab groups for native windows.
//!
//! Independent application windows are stacked behind a shared tab strip
//! window so that only the active tab is visible.  Tabs are dragged
//! between strips through a transparent full-desktop overlay, and saved
//! workspaces are restored onto whatever monitors are present, with tab
//! groups rebuilt.
//!
//! # Architecture
//!
//! The crate is organised around two core traits:
//!
//! * [`traits::WindowHost`] abstracts window creation, geometry,
//!   visibility and pointer queries so the tabbing logic is not coupled
//!   to any specific windowing platform.  [`headless::HeadlessHost`] is an
//!   in-memory implementation used by the daemon and the tests.
//! * [`traits::CommandSource`] abstracts the transport that delivers
//!   commands.  [`ipc`] provides a Unix-socket listener.
//!
//! [`tabbing::service::TabService`] owns every tab group and the drag
//! overlay and processes [`command::Command`]s one at a time.
//! [`workspace`] holds the snapshot model, the monitor retargeter and the
//! restore pipeline.

pub mod command;
pub mod config;
pub mod geometry;
pub mod headless;
pub mod identity;
pub mod ipc;
pub mod signal;
pub mod tabbing;
pub mod traits;
pub mod workspace;
