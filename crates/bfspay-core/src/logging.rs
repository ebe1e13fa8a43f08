//! Logging init: append to a log file (XDG state dir unless overridden), or
//! fall back to stderr.
//!
//! Source strings are logged at debug level so checksum mismatches can be
//! diagnosed from the log. Key material never reaches a log call.

use anyhow::{Context, Result};
use std::ffi::OsString;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Overrides the log file location.
pub const LOG_FILE_ENV: &str = "BFSPAY_LOG_FILE";

const DEFAULT_FILTER: &str = "info,bfspay=debug,bfspay_core=debug";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Path of the log file: `$BFSPAY_LOG_FILE`, else
/// `~/.local/state/bfspay/bfspay.log`.
pub fn log_path() -> Result<PathBuf> {
    resolve_log_path(std::env::var_os(LOG_FILE_ENV))
}

fn resolve_log_path(override_path: Option<OsString>) -> Result<PathBuf> {
    match override_path.filter(|p| !p.is_empty()) {
        Some(p) => Ok(PathBuf::from(p)),
        None => {
            let xdg_dirs = xdg::BaseDirectories::with_prefix("bfspay")?;
            Ok(xdg_dirs.get_state_home().join("bfspay.log"))
        }
    }
}

/// Open `path` for appending, creating parent directories.
fn open_log_file(path: &Path) -> Result<File> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("create log dir {}", dir.display()))?;
    }
    fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))
}

/// Initialize structured logging to [`log_path`].
/// On failure (e.g. log dir unwritable), returns Err so the caller can fall
/// back to [`init_logging_stderr`].
pub fn init_logging() -> Result<()> {
    let path = log_path()?;
    let file = open_log_file(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("install subscriber: {e}"))?;

    tracing::info!("bfspay logging to {}", path.display());
    Ok(())
}

/// Log to stderr only.
pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn override_wins_over_xdg() {
        let p = resolve_log_path(Some(OsString::from("/var/log/bfspay/gw.log"))).unwrap();
        assert_eq!(p, PathBuf::from("/var/log/bfspay/gw.log"));
    }

    #[test]
    fn empty_override_uses_state_dir() {
        let p = resolve_log_path(Some(OsString::new())).unwrap();
        assert!(p.ends_with("bfspay/bfspay.log"), "{}", p.display());
    }

    #[test]
    fn open_log_file_creates_dirs_and_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/state/bfspay.log");
        writeln!(open_log_file(&path).unwrap(), "first").unwrap();
        writeln!(open_log_file(&path).unwrap(), "second").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }
}
