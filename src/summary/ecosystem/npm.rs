use serde_json::Value;

use crate::license::spdx::normalize;
use crate::models::{Coordinates, Definition};
use crate::summary::text;

use super::{license_text, set_release_date, set_standard_urls, EcosystemHandler};

/// npm packages: everything comes from `registryData` and its `manifest`
/// (the package.json of the release).
pub struct NpmHandler;

impl EcosystemHandler for NpmHandler {
    fn extend(&self, result: &mut Definition, data: &Value, coordinates: &Coordinates) {
        let Some(registry_data) = data.get("registryData").filter(|v| !v.is_null()) else {
            return;
        };
        set_release_date(result, registry_data.get("releaseDate"));
        set_standard_urls(result, coordinates);

        let Some(manifest) = registry_data.get("manifest").filter(|v| v.is_object()) else {
            return;
        };

        if let Some(homepage) = homepage(manifest.get("homepage")) {
            result.described_mut().project_website = Some(homepage.to_string());
        }
        if let Some(tracker) = issue_tracker(manifest.get("bugs")) {
            result.described_mut().issue_tracker = Some(tracker.to_string());
        }
        result.set_declared(license_text(manifest.get("license")).and_then(normalize));
    }
}

/// `homepage` is occasionally published as a list; the first entry wins.
fn homepage(value: Option<&Value>) -> Option<&str> {
    match value? {
        Value::Array(pages) => text(pages.first()),
        other => text(Some(other)),
    }
}

/// `bugs` is either a URL string or `{url, email}`. Bare strings that are not
/// URLs are ignored.
fn issue_tracker(value: Option<&Value>) -> Option<&str> {
    match value? {
        Value::String(bugs) => Some(bugs.as_str()).filter(|b| b.starts_with("http")),
        bugs @ Value::Object(_) => text(bugs.get("url")).or_else(|| text(bugs.get("email"))),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::described::ClearlyDescribedSummarizer;
    use serde_json::json;

    fn summarize(data: Value) -> Definition {
        let coords: Coordinates = "npm/npmjs/-/redie/0.3.0".parse().unwrap();
        ClearlyDescribedSummarizer::new().summarize(&coords, &data)
    }

    #[test]
    fn test_license_object_and_release_date() {
        let def = summarize(json!({
            "registryData": {
                "releaseDate": "2020-01-01T00:00:00Z",
                "manifest": {"license": {"type": "MIT"}}
            }
        }));
        assert_eq!(def.declared(), Some("MIT"));
        let described = def.described.unwrap();
        assert_eq!(described.release_date.as_deref(), Some("2020-01-01"));
        let urls = described.urls.unwrap();
        assert_eq!(urls.registry.as_deref(), Some("https://npmjs.com/package/redie"));
        assert_eq!(
            urls.download.as_deref(),
            Some("https://registry.npmjs.com/redie/-/redie-0.3.0.tgz")
        );
    }

    #[test]
    fn test_homepage_and_bugs() {
        let def = summarize(json!({
            "registryData": {"manifest": {
                "homepage": ["https://a.example", "https://b.example"],
                "bugs": {"email": "bugs@example.com"},
                "license": "mit"
            }}
        }));
        let described = def.described.as_ref().unwrap();
        assert_eq!(described.project_website.as_deref(), Some("https://a.example"));
        assert_eq!(described.issue_tracker.as_deref(), Some("bugs@example.com"));
        assert_eq!(def.declared(), Some("MIT"));
    }

    #[test]
    fn test_bugs_string_must_be_url() {
        assert_eq!(issue_tracker(Some(&json!("https://x/issues"))), Some("https://x/issues"));
        assert_eq!(issue_tracker(Some(&json!("file a bug"))), None);
        assert_eq!(
            issue_tracker(Some(&json!({"url": "https://x/issues", "email": "a@b"}))),
            Some("https://x/issues")
        );
    }

    #[test]
    fn test_no_registry_data_skips_everything() {
        let def = summarize(json!({"manifest": {"license": "MIT"}}));
        assert!(def.is_empty());
    }
}
