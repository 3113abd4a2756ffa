//! Unix-socket [`CommandSource`] implementation.
//!
//! Binds a Unix stream socket and accepts one connection at a time.
//! Each line received is parsed as a JSON-encoded [`Command`].
//!
//! # Wire format
//!
//! Every message is a single line of JSON followed by `\n`:
//!
//! ```json
//! {"CreateTabGroup":{"windows":["app-1/main","app-2/main"]}}
//! {"SwitchTab":"app-2/main"}
//! {"StartDrag":"app-2/main"}
//! "DragOver"
//! {"PointerPosition":{"x":640,"y":20}}
//! "Drop"
//! ```

use crate::command::Command;
use crate::traits::CommandSource;
use log::{debug, error, info};
use std::io::{BufRead, BufReader, Read};
use std::os::unix::net::UnixListener;
use std::path::{Path, PathBuf};
use std::sync::mpsc;

/// File name of the daemon socket inside the runtime directory.
pub const SOCKET_NAME: &str = "tabset.sock";

/// `$XDG_RUNTIME_DIR/tabset.sock`, falling back to the temp directory.
pub fn default_socket_path() -> PathBuf {
    std::env::var_os("XDG_RUNTIME_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(std::env::temp_dir)
        .join(SOCKET_NAME)
}

/// A [`CommandSource`] that listens on a Unix stream socket for
/// JSON-encoded commands.
///
/// Each accepted connection can send multiple newline-delimited JSON
/// commands.  When the connection closes, the listener waits for the
/// next one.
pub struct UnixSocketListener {
    path: PathBuf,
}

/// Errors produced by the Unix socket listener.
#[derive(Debug, thiserror::Error)]
pub enum UnixSocketError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl UnixSocketListener {
    /// Create a new listener bound to `path`.
    ///
    /// The socket file is created when [`run`](CommandSource::run) is called;
    /// a stale file at the same path is replaced.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// The filesystem path of the socket.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Forward every command read from `stream` into `sink`.
///
/// Returns `false` once the sink is gone.
fn serve_connection(stream: impl Read, sink: &mpsc::Sender<Command>) -> bool {
    for line in BufReader::new(stream).lines() {
        let text = match line {
            Ok(text) => text,
            Err(e) => {
                error!("read error: {}", e);
                break;
            }
        };
        if text.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<Command>(&text) {
            Ok(cmd) => {
                debug!("received {:?}", cmd);
                if sink.send(cmd).is_err() {
                    return false;
                }
            }
            Err(e) => error!("bad command {:?}: {}", text, e),
        }
    }
    true
}

impl CommandSource for UnixSocketListener {
    type Error = UnixSocketError;

    /// Bind the socket and start accepting connections.
    ///
    /// This method **blocks** indefinitely.  Run it on a dedicated thread.
    fn run(&mut self, sink: mpsc::Sender<Command>) -> Result<(), Self::Error> {
        let _ = std::fs::remove_file(&self.path);

        let listener = UnixListener::bind(&self.path)?;
        info!("listening on {}", self.path.display());

        for stream in listener.incoming() {
            match stream {
                Ok(stream) => {
                    debug!("client connected");
                    if !serve_connection(stream, &sink) {
                        info!("sink closed, shutting down");
                        return Ok(());
                    }
                    debug!("client disconnected");
                }
                Err(e) => error!("accept error: {}", e),
            }
        }
        Ok(())
    }
}

//  Tests
