//! Logging setup.
//!
//! Logs go to stderr, since stdout carries the STDIO transport, or are
//! appended to a log file when one is configured. A log file that cannot be
//! opened is reported once on stderr and logging falls back to stderr.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::Level;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{EnvFilter, fmt};

use super::config::LoggingConfig;

/// Where log output ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

/// Initialize the logging subsystem.
///
/// Calling it again after a subscriber is installed leaves the first one in
/// place.
pub fn init_logging(config: &LoggingConfig) -> LogTarget {
    let filter = EnvFilter::from_default_env().add_directive(parse_level(&config.level).into());
    let (writer, target) = make_writer(config.file.as_deref());

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_ansi(target == LogTarget::Stderr)
        .with_writer(writer)
        .try_init();

    target
}

fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" | "warning" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Open `path` for appending, creating it if needed.
pub fn open_log_file(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

fn make_writer(file: Option<&Path>) -> (BoxMakeWriter, LogTarget) {
    match file {
        Some(path) => match open_log_file(path) {
            Ok(file) => (
                BoxMakeWriter::new(Mutex::new(file)),
                LogTarget::File(path.to_path_buf()),
            ),
            Err(e) => {
                // No subscriber exists yet, so this goes straight to stderr.
                eprintln!(
                    "failed to open log file {}: {}; logging to stderr",
                    path.display(),
                    e
                );
                (BoxMakeWriter::new(io::stderr), LogTarget::Stderr)
            }
        },
        None => (BoxMakeWriter::new(io::stderr), LogTarget::Stderr),
    }
}
