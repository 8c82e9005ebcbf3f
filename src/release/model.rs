use chrono::{DateTime, Utc};

use crate::github::RepoRef;

/// Tag carried by a placeholder release (repository has no releases).
pub const PLACEHOLDER_TAG: &str = "None";

/// Body used when a release has no notes.
pub const NO_RELEASE_NOTES: &str = "No release notes available.";

/// The latest release of one repository, as shown on the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct Release {
    pub repo: RepoRef,
    /// Version tag (e.g., "v1.0.0"), or [`PLACEHOLDER_TAG`]
    pub tag_name: String,
    /// Release page on github.com
    pub url: String,
    pub body: String,
    pub prerelease: bool,
    pub created_at: DateTime<Utc>,
    /// Age at fetch time (e.g., "2h ago")
    pub time_difference: String,
    pub has_windows_asset: bool,
}

impl Release {
    /// Release recorded for a repository that has no published release.
    ///
    /// Its timestamp is the Unix epoch so it sorts after every real release.
    pub fn placeholder(repo: RepoRef) -> Self {
        Self {
            repo,
            tag_name: PLACEHOLDER_TAG.to_string(),
            url: String::new(),
            body: String::new(),
            prerelease: false,
            created_at: DateTime::<Utc>::UNIX_EPOCH,
            time_difference: String::new(),
            has_windows_asset: false,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.tag_name == PLACEHOLDER_TAG
    }

    /// Whether `created_at` came from the API rather than the epoch fallback.
    pub fn has_known_date(&self) -> bool {
        self.created_at != DateTime::<Utc>::UNIX_EPOCH
    }
}

const WINDOWS_MARKERS: [&str; 6] = [".exe", ".msi", "windows", "win", "msvc", "window"];

/// Whether an asset name looks like a Windows build.
pub fn is_windows_asset(name: &str) -> bool {
    let lower = name.to_lowercase();
    WINDOWS_MARKERS.iter().any(|marker| lower.contains(marker))
}
