//! Log file setup. The dashboard owns the terminal, so `env_logger` writes to
//! a file instead of stderr.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::config::APP_DIR;
use crate::runtime::Runtime;

pub const LOG_FILE_NAME: &str = "ghrm.log";
pub const DEFAULT_FILTER: &str = "info";

/// Where log output goes: the explicit path, else the per-user cache
/// directory, else the temp directory.
pub fn log_file_path<R: Runtime>(runtime: &R, explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }

    if let Some(cache) = runtime.cache_dir() {
        let dir = cache.join(APP_DIR);
        match runtime.create_dir_all(&dir) {
            Ok(()) => return dir.join(LOG_FILE_NAME),
            Err(e) => eprintln!("Warning: {:#}", e),
        }
    }
    runtime.temp_dir().join(LOG_FILE_NAME)
}

/// Installs the global logger. `RUST_LOG` overrides the default filter.
pub fn init<R: Runtime>(runtime: &R, explicit: Option<&Path>) -> Result<PathBuf> {
    let path = log_file_path(runtime, explicit);
    let file = runtime.open_append(&path)?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(DEFAULT_FILTER))
        .target(env_logger::Target::Pipe(file))
        .format_timestamp_millis()
        .try_init()
        .context("Failed to install logger")?;

    log::info!("ghrm {} starting", env!("GHRM_VERSION"));
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::MockRuntime;
    use mockall::predicate::eq;

    #[test]
    fn test_explicit_log_path() {
        let runtime = MockRuntime::new();
        let path = log_file_path(&runtime, Some(Path::new("/var/log/ghrm.log")));
        assert_eq!(path, PathBuf::from("/var/log/ghrm.log"));
    }

    #[test]
    fn test_log_path_in_cache_dir() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_cache_dir()
            .returning(|| Some(PathBuf::from("/home/u/.cache")));
        runtime
            .expect_create_dir_all()
            .with(eq(PathBuf::from("/home/u/.cache/ghrm")))
            .returning(|_| Ok(()));

        let path = log_file_path(&runtime, None);
        assert_eq!(path, PathBuf::from("/home/u/.cache/ghrm/ghrm.log"));
    }

    #[test]
    fn test_log_path_falls_back_to_temp() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_cache_dir()
            .returning(|| Some(PathBuf::from("/readonly")));
        runtime
            .expect_create_dir_all()
            .returning(|_| Err(anyhow::anyhow!("permission denied")));
        runtime
            .expect_temp_dir()
            .returning(|| PathBuf::from("/tmp"));

        assert_eq!(log_file_path(&runtime, None), PathBuf::from("/tmp/ghrm.log"));

        let mut runtime = MockRuntime::new();
        runtime.expect_cache_dir().returning(|| None);
        runtime
            .expect_temp_dir()
            .returning(|| PathBuf::from("/tmp"));
        assert_eq!(log_file_path(&runtime, None), PathBuf::from("/tmp/ghrm.log"));
    }

    #[test]
    fn test_init_fails_when_file_cannot_be_opened() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_open_append()
            .returning(|_| Err(anyhow::anyhow!("read-only file system")));

        let err = init(&runtime, Some(Path::new("/ro/ghrm.log"))).unwrap_err();
        assert!(err.to_string().contains("read-only"));
    }
}
