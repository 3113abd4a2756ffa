//! Command transport over a Unix socket.
//!
//! Tab strip pages, drag helpers and scripts connect to the daemon socket
//! and send newline-delimited JSON commands.

pub mod listener;
