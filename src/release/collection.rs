//! Shared, append-only store of fetched releases.
//!
//! Fetch tasks append concurrently while the refresh ticker sorts and the UI
//! takes snapshots. Every operation holds the single mutex; the backing
//! vector never leaves it, readers get copies.

use std::sync::{Mutex, MutexGuard, PoisonError};

use log::debug;

use super::Release;
use crate::github::RepoRef;

#[derive(Debug, Default)]
struct Inner {
    releases: Vec<Release>,
    failed: Vec<RepoRef>,
}

/// Point-in-time copy of the collection, taken in one critical section.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectionView {
    pub releases: Vec<Release>,
    /// Repositories whose fetch failed and will never produce a release
    pub failed: Vec<RepoRef>,
}

#[derive(Debug, Default)]
pub struct ReleaseCollection {
    inner: Mutex<Inner>,
}

impl ReleaseCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a collection sized for `capacity` releases up front.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(Inner {
                releases: Vec::with_capacity(capacity),
                failed: Vec::new(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // Releases are immutable values; a panicking writer cannot leave one half-written.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Appends a release. Returns `false` if the collection could not grow.
    pub fn append(&self, release: Release) -> bool {
        let mut inner = self.lock();
        if inner.releases.try_reserve(1).is_err() {
            return false;
        }
        debug!("Storing release {} for {}", release.tag_name, release.repo);
        inner.releases.push(release);
        true
    }

    /// Records a repository whose fetch failed.
    pub fn record_failure(&self, repo: RepoRef) {
        self.lock().failed.push(repo);
    }

    /// Sorts newest first. Equal timestamps keep no particular order.
    pub fn sort_by_date_descending(&self) {
        let mut inner = self.lock();
        inner
            .releases
            .sort_unstable_by(|a, b| b.created_at.cmp(&a.created_at));
    }

    pub fn len(&self) -> usize {
        self.lock().releases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn failed_count(&self) -> usize {
        self.lock().failed.len()
    }

    /// Copy of the releases in their current order.
    pub fn snapshot(&self) -> Vec<Release> {
        self.lock().releases.clone()
    }

    /// Copy of releases and failed repositories, consistent with each other.
    pub fn view(&self) -> CollectionView {
        let inner = self.lock();
        CollectionView {
            releases: inner.releases.clone(),
            failed: inner.failed.clone(),
        }
    }
}
