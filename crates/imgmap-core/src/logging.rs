//! Logging init for the CLI and relay.
//!
//! Events go to `~/.local/state/imgmap/imgmap.log` when the state dir is
//! writable, otherwise to stderr. `RUST_LOG` overrides the default filter.

use std::fs::{self, File};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

/// Opens the append-mode log file under the XDG state dir, creating the
/// directory as needed.
fn open_log_file() -> anyhow::Result<(PathBuf, File)> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("imgmap")?;
    let dir = xdg_dirs.get_state_home().join("imgmap");
    fs::create_dir_all(&dir)?;
    let path = dir.join("imgmap.log");
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)?;
    Ok((path, file))
}

/// Initialize structured logging, preferring the state-dir log file and
/// falling back to stderr when it cannot be opened. Never fails: an
/// unwritable state dir only changes where events land.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,imgmap=debug"));

    let (writer, destination) = match open_log_file() {
        Ok((path, file)) => (
            BoxMakeWriter::new(Mutex::new(file)),
            path.display().to_string(),
        ),
        Err(_) => (BoxMakeWriter::new(io::stderr), "stderr".to_string()),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();

    tracing::info!("imgmap logging initialized, writing to {}", destination);
}
