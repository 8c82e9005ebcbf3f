//! Concurrent release fetching.
//!
//! One task per configured repository, each issuing exactly one request and
//! writing at most one release into the shared [`ReleaseCollection`].
//! Failures are logged and isolated; nothing is retried.

mod mapping;

use std::sync::Arc;

use chrono::Utc;
use futures_util::future::join_all;
use log::{debug, info, warn};
use tokio::task::JoinHandle;

use crate::error::MonitorError;
use crate::github::{self, RepoRef};
use crate::http::HttpClient;
use crate::release::ReleaseCollection;

pub use mapping::{FetchOutcome, map_response};

/// Fetches the latest release of repositories through an [`HttpClient`].
pub struct FetchEngine<H: HttpClient> {
    http: H,
    api_url: String,
}

impl<H: HttpClient + 'static> FetchEngine<H> {
    pub fn new(http: H, api_url: impl Into<String>) -> Self {
        Self {
            http,
            api_url: api_url.into(),
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Performs the single request for `repo` and classifies the result.
    #[tracing::instrument(skip(self, repo), fields(repo = %repo))]
    pub async fn fetch_one(&self, repo: &RepoRef) -> FetchOutcome {
        let url = github::latest_release_url(&self.api_url, repo);
        debug!("Fetching latest release of {} from {}...", repo, url);

        match self.http.get(&url).await {
            Ok(response) => map_response(repo, &response, Utc::now()),
            Err(e) => FetchOutcome::Failed(MonitorError::Network(format!("{:#}", e))),
        }
    }

    /// Spawns one task per repository. Each task stores its outcome in
    /// `collection`; the returned handles must be joined before exit.
    pub fn spawn_all(
        self: &Arc<Self>,
        repos: &[RepoRef],
        collection: Arc<ReleaseCollection>,
    ) -> FetchHandles {
        info!(
            "Fetching latest releases for {} repositories from {}",
            repos.len(),
            self.api_url()
        );

        let handles = repos
            .iter()
            .cloned()
            .map(|repo| {
                let engine = Arc::clone(self);
                let collection = Arc::clone(&collection);
                tokio::spawn(async move {
                    let outcome = engine.fetch_one(&repo).await;
                    store_outcome(&collection, &repo, outcome);
                })
            })
            .collect();

        FetchHandles { handles }
    }
}

/// Writes an outcome into the collection, logging anything that is dropped.
pub fn store_outcome(collection: &ReleaseCollection, repo: &RepoRef, outcome: FetchOutcome) {
    match outcome {
        FetchOutcome::Found(release) | FetchOutcome::NotFound(release) => {
            let tag = release.tag_name.clone();
            if collection.append(release) {
                info!("Latest release of {}: {}", repo, tag);
            } else {
                warn!(
                    "Dropping release {} of {}: {}",
                    tag,
                    repo,
                    MonitorError::Allocation
                );
                collection.record_failure(repo.clone());
            }
        }
        FetchOutcome::Failed(e) => {
            warn!("Failed to fetch latest release of {}: {}", repo, e);
            collection.record_failure(repo.clone());
        }
    }
}

/// Handles of in-flight fetch tasks.
pub struct FetchHandles {
    handles: Vec<JoinHandle<()>>,
}

impl FetchHandles {
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Number of tasks that have not completed yet.
    pub fn outstanding(&self) -> usize {
        self.handles.iter().filter(|h| !h.is_finished()).count()
    }

    /// Waits for every task to finish on its own. Tasks are never cancelled;
    /// each one is bounded by the HTTP client's timeout.
    pub async fn join(self) {
        for result in join_all(self.handles).await {
            if let Err(e) = result {
                warn!("Fetch task did not complete: {}", e);
            }
        }
    }
}
