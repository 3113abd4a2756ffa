//! Entry point for the **tabsetd** daemon.
//!
//! Spawns the socket [`CommandSource`](tabset::traits::CommandSource) on a
//! background thread and processes incoming commands on the main thread.

use tabset::command::Command;
use tabset::config::Config;
use tabset::headless::HeadlessHost;
use tabset::ipc::listener::{default_socket_path, UnixSocketListener};
use tabset::tabbing::service::TabService;
use tabset::traits::CommandSource;
use log::{error, info};
use std::path::PathBuf;
use std::sync::mpsc;

/// Resolve the config directory (`$XDG_CONFIG_HOME/tabset`).
fn config_dir() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME").unwrap_or_else(|_| {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        format!("{}/.config", home)
    });
    PathBuf::from(base).join("tabset")
}

/// Try to load the config from `$XDG_CONFIG_HOME/tabset/config.json`,
/// falling back to compiled-in defaults.
fn load_config() -> Config {
    let path = config_dir().join("config.json");
    match Config::load(&path) {
        Ok(cfg) => {
            info!("loaded config from {}", path.display());
            cfg
        }
        Err(e) => {
            info!("no config file ({}), using defaults", e);
            Config::default()
        }
    }
}

fn main() {
    env_logger::init();

    let config = load_config();
    let host = HeadlessHost::new(config.headless.monitors.clone());
    info!("simulating {} monitor(s)", config.headless.monitors.len());

    let mut service = match TabService::new(host, &config) {
        Ok(s) => s,
        Err(e) => {
            error!("failed to start tab service: {}", e);
            std::process::exit(1);
        }
    };

    let (cmd_tx, cmd_rx) = mpsc::channel::<Command>();
    spawn_command_sources(cmd_tx);

    info!("tabsetd running");
    for cmd in cmd_rx {
        if let Err(e) = service.handle(cmd) {
            error!("command error: {}", e);
        }
    }
    info!("all command sources closed, exiting");
}

fn spawn_command_sources(tx: mpsc::Sender<Command>) {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(default_socket_path);
    std::thread::spawn(move || {
        let mut source = UnixSocketListener::new(&path);
        if let Err(e) = source.run(tx) {
            error!("socket listener error: {}", e);
        }
    });
}
