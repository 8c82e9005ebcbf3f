//! Configuration file: the access token and the repositories to monitor.
//!
//! One entry per line. Blank lines and lines starting with `#` are ignored,
//! `pat=<token>` sets the token and every other line must be `owner/name`.

use anyhow::Result;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

use crate::error::MonitorError;
use crate::github::RepoRef;
use crate::runtime::Runtime;

pub const APP_DIR: &str = "ghrm";
pub const CONFIG_FILE_NAME: &str = "config.txt";
/// Used when the configuration file carries no token.
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

const TOKEN_PREFIX: &str = "pat=";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub token: String,
    pub repos: Vec<RepoRef>,
}

impl Config {
    /// Parses configuration text. Invalid lines are skipped with a warning.
    pub fn parse(text: &str) -> Self {
        let mut config = Config::default();
        for (number, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(token) = line.strip_prefix(TOKEN_PREFIX) {
                config.token = token.trim().to_string();
                continue;
            }

            match line.parse::<RepoRef>() {
                Ok(repo) => {
                    debug!("Loading repository {}", repo);
                    config.repos.push(repo);
                }
                Err(_) => warn!(
                    "Invalid line {} in config (expected owner/repo or pat=): {}",
                    number + 1,
                    line
                ),
            }
        }
        config
    }

    /// Finds, reads, parses and validates the configuration.
    pub fn load<R: Runtime>(runtime: &R, explicit: Option<&Path>) -> Result<Self> {
        let path = resolve_config_path(runtime, explicit)?;
        let text = runtime.read_to_string(&path).map_err(|e| {
            MonitorError::Config(format!("Cannot open config file {}: {:#}", path.display(), e))
        })?;

        let mut config = Config::parse(&text);
        if config.token.is_empty() {
            if let Ok(token) = runtime.env_var(TOKEN_ENV) {
                debug!("No token in {}, using {}", path.display(), TOKEN_ENV);
                config.token = token.trim().to_string();
            }
        }

        config.validate()?;
        info!(
            "Loaded {} repositories from {}",
            config.repos.len(),
            path.display()
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.token.is_empty() {
            return Err(MonitorError::Config("PAT token is empty".into()).into());
        }
        if self.repos.is_empty() {
            return Err(MonitorError::Config("No repositories configured".into()).into());
        }
        Ok(())
    }
}

/// Picks the configuration file.
///
/// An explicit path is used as given. Otherwise the per-user config directory
/// is tried first, then the directory of the executable.
pub fn resolve_config_path<R: Runtime>(runtime: &R, explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    let mut candidates = Vec::new();
    if let Some(dir) = runtime.config_dir() {
        candidates.push(dir.join(APP_DIR).join(CONFIG_FILE_NAME));
    }
    match runtime.current_exe() {
        Ok(exe) => {
            let dir = exe.parent().map(Path::to_path_buf).unwrap_or_default();
            candidates.push(dir.join(CONFIG_FILE_NAME));
        }
        Err(e) => debug!("Skipping executable directory: {:#}", e),
    }

    if let Some(found) = candidates.iter().find(|path| runtime.is_file(path)) {
        return Ok(found.clone());
    }

    let searched: Vec<String> = candidates.iter().map(|p| p.display().to_string()).collect();
    Err(MonitorError::Config(format!(
        "No config file found (searched: {})",
        searched.join(", ")
    ))
    .into())
}
