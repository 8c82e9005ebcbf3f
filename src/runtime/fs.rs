//! File system operations.

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::Path;

use super::RealRuntime;

impl RealRuntime {
    #[tracing::instrument(skip(self))]
    pub(crate) fn read_to_string_impl(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read file {}", path.display()))
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn is_file_impl(&self, path: &Path) -> bool {
        path.is_file()
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn create_dir_all_impl(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path).context("Failed to create directory")?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn open_append_impl(&self, path: &Path) -> Result<Box<dyn Write + Send>> {
        let file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open {} for appending", path.display()))?;
        Ok(Box::new(file))
    }
}

#[cfg(test)]
mod tests {
    use crate::runtime::{RealRuntime, Runtime};
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_real_runtime_read_and_probe() {
        let runtime = RealRuntime;
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("config.txt");
        std::fs::write(&file_path, "pat=abc\n").unwrap();

        assert!(runtime.is_file(&file_path));
        assert!(!runtime.is_file(dir.path()));
        assert_eq!(runtime.read_to_string(&file_path).unwrap(), "pat=abc\n");
    }

    #[test]
    fn test_real_runtime_open_append_creates_and_appends() {
        let runtime = RealRuntime;
        let dir = tempdir().unwrap();
        let nested = dir.path().join("logs");
        runtime.create_dir_all(&nested).unwrap();
        let log_path = nested.join("ghrm.log");

        {
            let mut writer = runtime.open_append(&log_path).unwrap();
            writer.write_all(b"first\n").unwrap();
        }
        {
            let mut writer = runtime.open_append(&log_path).unwrap();
            writer.write_all(b"second\n").unwrap();
        }

        let content = runtime.read_to_string(&log_path).unwrap();
        assert_eq!(content, "first\nsecond\n");
    }

    #[test]
    fn test_real_runtime_errors() {
        let runtime = RealRuntime;

        let result = runtime.read_to_string(std::path::Path::new("/nonexistent/path/file.txt"));
        assert!(result.is_err());
        assert!(!runtime.is_file(std::path::Path::new("/nonexistent/path/file.txt")));
    }
}
