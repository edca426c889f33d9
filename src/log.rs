// src/log.rs
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{
    filter::LevelFilter,
    fmt::{self, time::uptime},
    prelude::*,
    EnvFilter,
};

fn open_log(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global subscriber: stderr at `RUST_LOG` (default `info`) plus a
/// debug-level append-only file stamped with time since start.
/// Calling it twice is harmless; the second call is ignored.
pub fn init(log_file: &Path) {
    let console = fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")));

    let (file_layer, open_err) = match open_log(log_file) {
        Ok(f) => {
            let layer = fmt::layer()
                .with_writer(Mutex::new(f))
                .with_ansi(false)
                .with_timer(uptime())
                .with_filter(LevelFilter::DEBUG);
            (Some(layer), None)
        }
        Err(e) => (None, Some(e)),
    };

    let _ = tracing_subscriber::registry().with(console).with(file_layer).try_init();

    if let Some(e) = open_err {
        tracing::warn!("Log: {} unavailable, console only: {e}", log_file.display());
    }
}
