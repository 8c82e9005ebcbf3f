//! Wire types for the GitHub releases API.
//!
//! Every field is optional. A missing, null or wrongly typed field decodes as
//! `None`; only a body that is not a JSON object is rejected.

use anyhow::{Context, Result, bail};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Document returned by `GET /repos/{owner}/{repo}/releases/latest`.
#[derive(Deserialize, Debug, Default, PartialEq)]
pub struct LatestRelease {
    #[serde(default, deserialize_with = "lenient")]
    pub tag_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub html_url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub body: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub prerelease: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "lenient_assets")]
    pub assets: Option<Vec<ReleaseAsset>>,
}

/// A downloadable asset attached to a release.
#[derive(Deserialize, Debug, Default, PartialEq)]
pub struct ReleaseAsset {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
}

/// Decodes a field as `T`, or `None` when it has another JSON type.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Decodes the asset list, skipping entries that are not objects.
fn lenient_assets<'de, D>(deserializer: D) -> Result<Option<Vec<ReleaseAsset>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(Some(
            items
                .into_iter()
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect(),
        )),
        _ => Ok(None),
    }
}

impl LatestRelease {
    /// Decode a response body. Only a JSON object is accepted.
    pub fn from_json(text: &str) -> Result<Self> {
        let document: Value =
            serde_json::from_str(text).context("Response is not valid JSON")?;
        if !document.is_object() {
            bail!("Expected a JSON object, got {}", json_kind(&document));
        }
        serde_json::from_value(document).context("Failed to decode release document")
    }

    /// Names of all assets that carry one.
    pub fn asset_names(&self) -> impl Iterator<Item = &str> {
        self.assets
            .iter()
            .flatten()
            .filter_map(|asset| asset.name.as_deref())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_full_document() {
        let doc = LatestRelease::from_json(
            r#"{
                "tag_name": "v1.2.3",
                "html_url": "https://github.com/o/r/releases/tag/v1.2.3",
                "body": "Notes",
                "prerelease": true,
                "created_at": "2024-01-01T00:00:00Z",
                "assets": [{"name": "tool.exe", "size": 10}, {"name": "tool.tar.gz"}],
                "unrelated": {"nested": [1, 2, 3]}
            }"#,
        )
        .unwrap();

        assert_eq!(doc.tag_name.as_deref(), Some("v1.2.3"));
        assert_eq!(doc.body.as_deref(), Some("Notes"));
        assert_eq!(doc.prerelease, Some(true));
        assert_eq!(
            doc.asset_names().collect::<Vec<_>>(),
            vec!["tool.exe", "tool.tar.gz"]
        );
    }

    #[test]
    fn test_decode_sparse_and_null_fields() {
        let doc = LatestRelease::from_json(r#"{"tag_name": "v1", "body": null, "assets": null}"#)
            .unwrap();
        assert_eq!(doc.tag_name.as_deref(), Some("v1"));
        assert!(doc.body.is_none());
        assert!(doc.prerelease.is_none());
        assert_eq!(doc.asset_names().count(), 0);
    }

    #[test]
    fn test_decode_rejects_non_object() {
        let err = LatestRelease::from_json("[]").unwrap_err();
        assert!(err.to_string().contains("an array"));
        assert!(LatestRelease::from_json("not json").is_err());
        assert!(LatestRelease::from_json("42").is_err());
    }

    #[test]
    fn test_decode_wrongly_typed_fields_as_none() {
        let doc = LatestRelease::from_json(
            r#"{
                "tag_name": "v1.0",
                "html_url": ["not", "a", "string"],
                "body": 42,
                "prerelease": "yes",
                "created_at": 1704067200,
                "assets": [{"name": 7}, "stray", {"name": "tool-win64.zip"}]
            }"#,
        )
        .unwrap();

        assert_eq!(doc.tag_name.as_deref(), Some("v1.0"));
        assert!(doc.html_url.is_none());
        assert!(doc.body.is_none());
        assert!(doc.prerelease.is_none());
        assert!(doc.created_at.is_none());
        assert_eq!(doc.asset_names().collect::<Vec<_>>(), vec!["tool-win64.zip"]);
    }

    #[test]
    fn test_decode_assets_not_a_list() {
        let doc = LatestRelease::from_json(r#"{"tag_name": "v1", "assets": {"name": "x"}}"#)
            .unwrap();
        assert!(doc.assets.is_none());
    }
}
