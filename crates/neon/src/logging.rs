//! File logging. The terminal is in raw mode, so nothing goes to stderr.

use std::fs::{self, File};
use std::path::PathBuf;

use directories::ProjectDirs;
use env_logger::{Builder, Target};

/// Environment variable holding the log filter, e.g. `NEON_LOG=debug`.
const LOG_ENV: &str = "NEON_LOG";

/// Checked when `NEON_LOG` is unset.
const FALLBACK_LOG_ENV: &str = "RUST_LOG";

const DEFAULT_FILTER: &str = "info";

/// First non-blank filter of `NEON_LOG`, then `RUST_LOG`, else `info`.
fn log_filter(neon: Option<String>, rust: Option<String>) -> String {
    [neon, rust]
        .into_iter()
        .flatten()
        .find(|filter| !filter.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}

pub fn log_path() -> Option<PathBuf> {
    let dirs = ProjectDirs::from("dev", "neon", "neon")?;
    Some(dirs.data_local_dir().join("neon.log"))
}

/// Send `log` output to the log file. Returns the path on success.
pub fn init() -> std::io::Result<PathBuf> {
    let path = log_path()
        .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::NotFound, "no data directory"))?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(&path)?;

    let filter = log_filter(
        std::env::var(LOG_ENV).ok(),
        std::env::var(FALLBACK_LOG_ENV).ok(),
    );
    Builder::new()
        .parse_filters(&filter)
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .map_err(std::io::Error::other)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_precedence() {
        let some = |s: &str| Some(s.to_string());
        assert_eq!(log_filter(some("debug"), some("warn")), "debug");
        assert_eq!(log_filter(None, some("neon=trace")), "neon=trace");
        assert_eq!(log_filter(some("  "), some("warn")), "warn");
        assert_eq!(log_filter(None, None), "info");
    }
}
