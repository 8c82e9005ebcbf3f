//! GitHub API vocabulary: repository references, wire types and release ages.

mod age;
mod repo;
mod types;

pub use age::{format_age, time_difference_label};
pub use repo::RepoRef;
pub use types::{LatestRelease, ReleaseAsset};

/// Default GitHub REST API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Product token sent as the `User-Agent` header.
pub const USER_AGENT: &str = "ghrm/1.0";

/// Media type requested from the API.
pub const ACCEPT: &str = "application/vnd.github.v3+json";

/// URL of the latest-release endpoint for `repo`.
pub fn latest_release_url(api_url: &str, repo: &RepoRef) -> String {
    format!(
        "{}/repos/{}/{}/releases/latest",
        api_url.trim_end_matches('/'),
        repo.owner,
        repo.name
    )
}
