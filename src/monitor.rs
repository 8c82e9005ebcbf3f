//! Wires the fetch engine, the refresh ticker and the UI loop together and
//! shuts them down in order.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use log::{info, warn};

use crate::config::Config;
use crate::error::MonitorError;
use crate::fetch::FetchEngine;
use crate::github::{DEFAULT_API_URL, RepoRef};
use crate::http::{DEFAULT_TIMEOUT, HttpClient, ReqwestHttpClient};
use crate::release::ReleaseCollection;
use crate::signals::{RedrawSignal, RunFlag, spawn_ctrl_c_handler};
use crate::ticker::{DEFAULT_REFRESH_INTERVAL, RefreshTicker};
use crate::ui::{App, CrosstermRenderer, TerminalRenderer};

/// Runtime knobs that do not come from the configuration file.
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    pub api_url: String,
    pub refresh_interval: Duration,
    pub timeout: Duration,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Runs the dashboard on the real terminal until the user quits.
pub async fn run(config: Config, options: Options) -> Result<()> {
    let http = ReqwestHttpClient::new(&config.token, options.timeout)
        .map_err(|e| MonitorError::Config(format!("{:#}", e)))?;
    let engine = Arc::new(FetchEngine::new(http, options.api_url));

    // Nothing is fetched when the terminal cannot be set up
    let renderer = CrosstermRenderer::init().context("Failed to start dashboard")?;

    let collection =
        run_dashboard(engine, renderer, config.repos, options.refresh_interval).await?;
    info!(
        "Exiting with {} releases ({} repositories failed)",
        collection.len(),
        collection.failed_count()
    );
    Ok(())
}

/// Starts one fetch task per repository and the refresh ticker, runs the UI
/// loop on a blocking thread and, once it returns, waits for every task.
///
/// Returns the collection as it stands after all fetches settled.
pub async fn run_dashboard<H, T>(
    engine: Arc<FetchEngine<H>>,
    renderer: T,
    repos: Vec<RepoRef>,
    refresh_interval: Duration,
) -> Result<Arc<ReleaseCollection>>
where
    H: HttpClient + 'static,
    T: TerminalRenderer + Send + 'static,
{
    let collection = Arc::new(ReleaseCollection::with_capacity(repos.len()));
    let running = RunFlag::new();
    let redraw = RedrawSignal::new();

    let ctrl_c = spawn_ctrl_c_handler(running.clone());
    let fetches = engine.spawn_all(&repos, Arc::clone(&collection));
    let ticker = RefreshTicker::new(
        Arc::clone(&collection),
        redraw.clone(),
        running.clone(),
        refresh_interval,
    )
    .spawn();

    let mut app = App::new(
        renderer,
        Arc::clone(&collection),
        repos,
        running.clone(),
        redraw,
    );
    // The renderer is dropped on the UI thread, restoring the terminal
    // before anything below prints.
    let ui_result = tokio::task::spawn_blocking(move || app.run()).await;
    running.stop();

    let outstanding = fetches.outstanding();
    if outstanding > 0 {
        println!("Waiting for {} outstanding requests...", outstanding);
    }
    if let Err(e) = ticker.await {
        warn!("Refresh ticker did not stop cleanly: {}", e);
    }
    fetches.join().await;
    ctrl_c.abort();

    ui_result.context("UI loop panicked")??;
    Ok(collection)
}
