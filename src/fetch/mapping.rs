//! Turns an HTTP response into a fetch outcome.

use chrono::{DateTime, Utc};
use log::warn;

use crate::error::MonitorError;
use crate::github::{LatestRelease, RepoRef, time_difference_label};
use crate::http::HttpResponse;
use crate::release::{NO_RELEASE_NOTES, Release, is_windows_asset};

/// Result of fetching one repository's latest release.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// 200 with a decodable document
    Found(Release),
    /// 404: the repository has no published release
    NotFound(Release),
    /// Anything else; the repository contributes no release
    Failed(MonitorError),
}

impl FetchOutcome {
    pub fn release(&self) -> Option<&Release> {
        match self {
            FetchOutcome::Found(release) | FetchOutcome::NotFound(release) => Some(release),
            FetchOutcome::Failed(_) => None,
        }
    }
}

/// Maps a completed response. `now` anchors the age label.
pub fn map_response(repo: &RepoRef, response: &HttpResponse, now: DateTime<Utc>) -> FetchOutcome {
    match response.status {
        200 => match LatestRelease::from_json(&response.body) {
            Ok(document) => FetchOutcome::Found(release_from_document(repo, document, now)),
            Err(e) => FetchOutcome::Failed(MonitorError::Parse(format!("{:#}", e))),
        },
        404 => FetchOutcome::NotFound(Release::placeholder(repo.clone())),
        status => FetchOutcome::Failed(MonitorError::HttpStatus(status)),
    }
}

fn release_from_document(repo: &RepoRef, document: LatestRelease, now: DateTime<Utc>) -> Release {
    let has_windows_asset = document.asset_names().any(is_windows_asset);
    let created_at = match document.created_at.as_deref().map(parse_timestamp) {
        Some(Some(ts)) => Some(ts),
        Some(None) => {
            warn!(
                "Unparseable created_at {:?} for {}, treating as oldest",
                document.created_at, repo
            );
            None
        }
        None => {
            warn!("Release for {} has no created_at, treating as oldest", repo);
            None
        }
    };
    // An unknown date sorts last and carries no age label
    let time_difference = created_at
        .map(|ts| time_difference_label(now, ts))
        .unwrap_or_default();
    let created_at = created_at.unwrap_or(DateTime::<Utc>::UNIX_EPOCH);

    Release {
        repo: repo.clone(),
        tag_name: document.tag_name.unwrap_or_default(),
        url: document.html_url.unwrap_or_default(),
        body: document
            .body
            .unwrap_or_else(|| NO_RELEASE_NOTES.to_string()),
        prerelease: document.prerelease.unwrap_or(false),
        created_at,
        time_difference,
        has_windows_asset,
    }
}

/// Parses an ISO-8601 timestamp as UTC.
fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|ts| ts.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn repo() -> RepoRef {
        RepoRef::new("owner", "repo")
    }

    fn ok(body: &str) -> HttpResponse {
        HttpResponse {
            status: 200,
            body: body.to_string(),
        }
    }

    #[test]
    fn test_found_maps_all_fields() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 2, 0, 0).unwrap();
        let response = ok(r#"{
            "tag_name": "v1.0",
            "html_url": "https://github.com/owner/repo/releases/tag/v1.0",
            "body": "Bug fixes",
            "prerelease": true,
            "created_at": "2024-01-01T00:00:00Z",
            "assets": [{"name": "repo-linux.tar.gz"}, {"name": "repo-setup.MSI"}]
        }"#);

        let outcome = map_response(&repo(), &response, now);
        let release = match outcome {
            FetchOutcome::Found(release) => release,
            other => panic!("expected Found, got {:?}", other),
        };
        assert_eq!(release.repo, repo());
        assert_eq!(release.tag_name, "v1.0");
        assert_eq!(release.url, "https://github.com/owner/repo/releases/tag/v1.0");
        assert_eq!(release.body, "Bug fixes");
        assert!(release.prerelease);
        assert!(release.has_windows_asset);
        assert_eq!(
            release.created_at,
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(release.time_difference, "2h ago");
    }

    #[test]
    fn test_missing_optional_fields_use_defaults() {
        let now = Utc::now();
        let created = (now - Duration::seconds(30)).to_rfc3339();
        let response = ok(&format!(
            r#"{{"tag_name": "v2", "body": null, "created_at": "{}"}}"#,
            created
        ));

        let outcome = map_response(&repo(), &response, now);
        let release = outcome.release().unwrap();
        assert_eq!(release.body, NO_RELEASE_NOTES);
        assert!(!release.prerelease);
        assert!(!release.has_windows_asset);
        assert!(release.url.is_empty());
        assert_eq!(release.time_difference, "30s ago");
    }

    #[test]
    fn test_bad_timestamp_falls_back_to_epoch() {
        let now = Utc::now();
        let outcome = map_response(&repo(), &ok(r#"{"tag_name": "v3", "created_at": "yesterday"}"#), now);
        let release = outcome.release().unwrap();
        assert_eq!(release.created_at.timestamp(), 0);
        assert_eq!(release.tag_name, "v3");
        assert!(release.time_difference.is_empty());
        assert!(!release.has_known_date());

        let outcome = map_response(&repo(), &ok(r#"{"tag_name": "v4"}"#), now);
        let release = outcome.release().unwrap();
        assert!(release.time_difference.is_empty());
        assert!(!release.has_known_date());
    }

    #[test]
    fn test_wrongly_typed_fields_keep_release() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 2, 0, 0).unwrap();
        let response = ok(r#"{
            "tag_name": "v1.0",
            "created_at": "2024-01-01T00:00:00Z",
            "prerelease": "yes",
            "body": 42,
            "assets": [{"name": 7}, {"name": "repo-windows.zip"}]
        }"#);

        let release = match map_response(&repo(), &response, now) {
            FetchOutcome::Found(release) => release,
            other => panic!("expected Found, got {:?}", other),
        };
        assert_eq!(release.tag_name, "v1.0");
        assert!(!release.prerelease);
        assert_eq!(release.body, NO_RELEASE_NOTES);
        assert!(release.has_windows_asset);
        assert_eq!(release.time_difference, "2h ago");
    }

    #[test]
    fn test_not_found_yields_placeholder() {
        let response = HttpResponse {
            status: 404,
            body: r#"{"message": "Not Found"}"#.into(),
        };
        let outcome = map_response(&repo(), &response, Utc::now());
        let FetchOutcome::NotFound(release) = outcome else {
            panic!("expected NotFound");
        };
        assert!(release.is_placeholder());
        assert_eq!(release.repo, repo());
    }

    #[test]
    fn test_other_status_fails() {
        for status in [301, 401, 403, 429, 500, 502] {
            let response = HttpResponse {
                status,
                body: String::new(),
            };
            assert_eq!(
                map_response(&repo(), &response, Utc::now()),
                FetchOutcome::Failed(MonitorError::HttpStatus(status))
            );
        }
    }

    #[test]
    fn test_undecodable_body_fails_with_parse_error() {
        let outcome = map_response(&repo(), &ok("<html>rate limited</html>"), Utc::now());
        assert!(matches!(outcome, FetchOutcome::Failed(MonitorError::Parse(_))));
        assert!(outcome.release().is_none());
    }
}
