use anyhow::Result;
use clap::Parser;
use ghrm::{
    config::Config,
    error::MonitorError,
    github::DEFAULT_API_URL,
    monitor::{self, Options},
    runtime::RealRuntime,
};
use std::{panic, path::PathBuf, process::ExitCode, time::Duration};

/// Exit status for configuration and terminal setup failures.
const FATAL_EXIT: u8 = 2;

/// ghrm - GitHub Release Monitor
///
/// Shows the latest release of every configured repository in a terminal
/// dashboard, newest first.
///
/// The configuration file lists one `owner/repo` per line plus a `pat=<token>`
/// line. GITHUB_TOKEN is used when the file has no token.
#[derive(Parser, Debug)]
#[command(author, version = env!("GHRM_VERSION"), about)]
struct Cli {
    /// Configuration file (also via GHRM_CONFIG)
    #[arg(long, short = 'c', env = "GHRM_CONFIG", value_name = "PATH")]
    config: Option<PathBuf>,

    /// GitHub API URL
    #[arg(long = "api-url", value_name = "URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Milliseconds between checks for new results (0: default)
    #[arg(long = "refresh-ms", value_name = "MS", default_value_t = 500)]
    refresh_ms: u64,

    /// Per-request timeout in seconds (0: default)
    #[arg(long = "timeout-secs", value_name = "SECS", default_value_t = 30)]
    timeout_secs: u64,

    /// Log file (defaults to the user cache directory)
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn options(&self) -> Options {
        let defaults = Options::default();
        Options {
            api_url: self.api_url.clone(),
            refresh_interval: match self.refresh_ms {
                0 => defaults.refresh_interval,
                ms => Duration::from_millis(ms),
            },
            timeout: match self.timeout_secs {
                0 => defaults.timeout,
                secs => Duration::from_secs(secs),
            },
        }
    }
}

/// Configuration and terminal errors exit with [`FATAL_EXIT`], anything else with 1.
fn exit_code(err: &anyhow::Error) -> ExitCode {
    match err.downcast_ref::<MonitorError>() {
        Some(root) if root.is_fatal() => ExitCode::from(FATAL_EXIT),
        _ => ExitCode::FAILURE,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            exit_code(&e)
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let runtime = RealRuntime;

    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = ghrm::ui::restore_terminal();
        original_hook(info);
    }));

    if let Err(e) = ghrm::logging::init(&runtime, cli.log_file.as_deref()) {
        eprintln!("Warning: logging disabled: {:#}", e);
    }

    let config = Config::load(&runtime, cli.config.as_deref())?;
    monitor::run(config, cli.options()).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["ghrm"]).unwrap();
        assert_eq!(cli.api_url, "https://api.github.com");
        assert_eq!(cli.refresh_ms, 500);
        assert_eq!(cli.timeout_secs, 30);
        assert!(cli.log_file.is_none());

        let options = cli.options();
        assert_eq!(options.refresh_interval, Duration::from_millis(500));
        assert_eq!(options.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::try_parse_from([
            "ghrm",
            "--config",
            "/tmp/repos.txt",
            "--api-url",
            "http://localhost:8080",
            "--refresh-ms",
            "100",
            "--timeout-secs",
            "5",
            "--log-file",
            "/tmp/ghrm.log",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/repos.txt")));
        assert_eq!(cli.options().api_url, "http://localhost:8080");
        assert_eq!(cli.options().refresh_interval, Duration::from_millis(100));
        assert_eq!(cli.options().timeout, Duration::from_secs(5));
        assert_eq!(cli.log_file, Some(PathBuf::from("/tmp/ghrm.log")));
    }

    #[test]
    fn test_zero_values_fall_back_to_defaults() {
        let cli = Cli::try_parse_from(["ghrm", "--refresh-ms", "0", "--timeout-secs", "0"]).unwrap();
        let options = cli.options();
        assert_eq!(options.refresh_interval, Options::default().refresh_interval);
        assert_eq!(options.timeout, Options::default().timeout);
    }

    #[test]
    fn test_exit_code_for_fatal_errors() {
        let config = anyhow::Error::from(MonitorError::Config("PAT token is empty".into()));
        assert_eq!(exit_code(&config), ExitCode::from(FATAL_EXIT));

        let ui = anyhow::Error::from(MonitorError::UiInit("not a tty".into()))
            .context("Failed to start dashboard");
        assert_eq!(exit_code(&ui), ExitCode::from(FATAL_EXIT));

        let other = anyhow::anyhow!("UI loop panicked");
        assert_eq!(exit_code(&other), ExitCode::FAILURE);
    }

    #[test]
    fn test_cli_rejects_bad_numbers() {
        assert!(Cli::try_parse_from(["ghrm", "--refresh-ms", "soon"]).is_err());
    }
}
