//! Optional diagnostics. Nothing is installed unless asked for, and output
//! always goes to a file so it never lands on the editor's screen.

use std::fs::File;
use std::path::PathBuf;

use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Installs a file subscriber when `FAVICON_LOG=<file>` (debug level) or
/// `RUST_LOG` (its own filter, written to `<cache dir>/favicon/favicon.log`)
/// is set.
pub fn init() {
    let rust_log = std::env::var("RUST_LOG").ok();
    let Some(path) = log_file(
        std::env::var_os("FAVICON_LOG").map(PathBuf::from),
        rust_log.is_some(),
        dirs::cache_dir(),
    ) else {
        return;
    };
    let filter = match rust_log {
        Some(_) => EnvFilter::from_default_env(),
        None => EnvFilter::new("favicon=debug"),
    };
    if let Some(dir) = path.parent() {
        let _ = std::fs::create_dir_all(dir);
    }
    match File::create(&path) {
        Ok(file) => {
            let file_layer = tracing_subscriber::fmt::layer()
                .with_writer(file)
                .with_ansi(false);
            let _ = tracing_subscriber::registry()
                .with(file_layer.with_filter(filter))
                .try_init();
        }
        Err(err) => {
            eprintln!("Failed to create log file: {err}");
        }
    }
}

/// Where log output goes, if anywhere. An explicit `FAVICON_LOG` path wins;
/// `RUST_LOG` alone logs into the cache directory.
fn log_file(favicon_log: Option<PathBuf>, rust_log: bool, cache_dir: Option<PathBuf>) -> Option<PathBuf> {
    match favicon_log {
        Some(path) => Some(path),
        None if rust_log => cache_dir.map(|d| d.join("favicon").join("favicon.log")),
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_is_logged_by_default() {
        assert_eq!(log_file(None, false, Some(PathBuf::from("/cache"))), None);
    }

    #[test]
    fn rust_log_writes_to_the_cache_dir() {
        assert_eq!(
            log_file(None, true, Some(PathBuf::from("/cache"))),
            Some(PathBuf::from("/cache/favicon/favicon.log"))
        );
        // no cache dir means no log rather than stderr
        assert_eq!(log_file(None, true, None), None);
    }

    #[test]
    fn explicit_log_file_wins() {
        assert_eq!(
            log_file(Some(PathBuf::from("/tmp/f.log")), true, Some(PathBuf::from("/cache"))),
            Some(PathBuf::from("/tmp/f.log"))
        );
    }
}
