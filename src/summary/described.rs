use std::collections::{BTreeMap, HashMap};

use serde_json::Value;
use tracing::debug;

use crate::license::files::is_license_file;
use crate::license::spdx::{is_declared_license, normalize};
use crate::models::{Coordinates, Definition, Facets, FileEntry, SourceLocation};
use crate::registry::{build_source_url, update_source_location};

use super::ecosystem::handler_for;
use super::merge::merge_into_definition;
use super::{items, text};

const LICENSE_NATURE: &str = "license";

/// Summarizes the package metadata collected by the harvester's own tool:
/// registry data, manifests, file listings and attachments.
///
/// The ecosystem-agnostic steps run for every package; the fields that only
/// make sense for one package type are added by its
/// [`EcosystemHandler`](super::ecosystem::EcosystemHandler).
#[derive(Debug, Default, Clone, Copy)]
pub struct ClearlyDescribedSummarizer;

impl ClearlyDescribedSummarizer {
    pub fn new() -> Self {
        Self
    }

    pub fn summarize(&self, coordinates: &Coordinates, data: &Value) -> Definition {
        let mut result = Definition::default();
        add_facet_info(&mut result, data);
        add_source_location(&mut result, data);
        add_summary_info(&mut result, data);
        add_files(&mut result, data);
        add_attached_files(&mut result, data, coordinates);
        add_interesting_files(&mut result, data, coordinates);
        add_license_from_files(&mut result, data, coordinates);

        match handler_for(&coordinates.kind) {
            Some(handler) => handler.extend(&mut result, data, coordinates),
            None => debug!(
                kind = %coordinates.kind,
                "no ecosystem handler; keeping package-agnostic fields only"
            ),
        }

        result
    }
}

fn add_facet_info(result: &mut Definition, data: &Value) {
    let Some(raw) = data.get("facets").filter(|v| !v.is_null()) else {
        return;
    };
    match serde_json::from_value::<Facets>(raw.clone()) {
        Ok(facets) if !facets.is_empty() => result.described_mut().facets = Some(facets),
        Ok(_) => {}
        Err(err) => debug!(error = %err, "ignoring malformed facets section"),
    }
}

fn add_source_location(result: &mut Definition, data: &Value) {
    let Some(raw) = data.get("sourceInfo").filter(|v| v.is_object()) else {
        return;
    };
    let mut spec: SourceLocation = match serde_json::from_value(raw.clone()) {
        Ok(spec) => spec,
        Err(err) => {
            debug!(error = %err, "ignoring malformed sourceInfo");
            return;
        }
    };
    update_source_location(&mut spec);
    // Providers without a URL shape keep the harvested url.
    spec.url = build_source_url(&spec).or(spec.url.take());
    result.described_mut().source_location = Some(spec);
}

fn hashes(value: Option<&Value>) -> Option<BTreeMap<String, String>> {
    let hashes: BTreeMap<String, String> = serde_json::from_value(value?.clone()).ok()?;
    (!hashes.is_empty()).then_some(hashes)
}

fn add_summary_info(result: &mut Definition, data: &Value) {
    let Some(summary) = data.get("summaryInfo") else {
        return;
    };
    if let Some(hashes) = hashes(summary.get("hashes")) {
        result.described_mut().hashes = Some(hashes);
    }
    if let Some(count) = summary.get("count").and_then(Value::as_u64) {
        result.described_mut().files = Some(count);
    }
}

fn add_files(result: &mut Definition, data: &Value) {
    let Some(raw) = data.get("files").and_then(Value::as_array) else {
        return;
    };
    let files = raw
        .iter()
        .filter_map(|file| {
            let path = file.get("path").and_then(Value::as_str)?;
            Some(FileEntry {
                hashes: hashes(file.get("hashes")),
                ..FileEntry::new(path)
            })
        })
        .collect();
    result.files = Some(files);
}

fn add_attached_files(result: &mut Definition, data: &Value, coordinates: &Coordinates) {
    let attachments = items(data.get("attachments"));
    let Some(files) = result.files.as_mut() else {
        return;
    };
    if attachments.is_empty() {
        return;
    }

    let mut index: HashMap<&str, usize> = HashMap::with_capacity(files.len());
    for (i, file) in files.iter().enumerate() {
        index.entry(file.path.as_str()).or_insert(i);
    }
    let matches: Vec<(usize, Option<String>, bool)> = attachments
        .iter()
        .filter_map(|attachment| {
            let path = attachment.get("path").and_then(Value::as_str)?;
            let i = *index.get(path)?;
            let token = text(attachment.get("token")).map(str::to_string);
            Some((i, token, is_license_file(path, coordinates)))
        })
        .collect();

    for (i, token, license_file) in matches {
        let file = &mut files[i];
        if token.is_some() {
            file.token = token;
        }
        if license_file {
            file.add_nature(LICENSE_NATURE);
        }
    }
}

// Deprecated: interestingFiles predates attachments and is only read until
// harvested data stops carrying it.
fn add_interesting_files(result: &mut Definition, data: &Value, coordinates: &Coordinates) {
    let Some(raw) = data.get("interestingFiles").and_then(Value::as_array) else {
        return;
    };

    let interesting: Vec<FileEntry> = raw
        .iter()
        .filter_map(|file| serde_json::from_value::<FileEntry>(file.clone()).ok())
        .map(|mut file| {
            file.license = file.license.as_deref().and_then(normalize);
            if file.license.is_some() && is_license_file(&file.path, coordinates) {
                file.add_nature(LICENSE_NATURE);
            }
            file
        })
        .collect();

    merge_into_definition(result, interesting);
}

// Deprecated alongside add_interesting_files.
fn add_license_from_files(result: &mut Definition, data: &Value, coordinates: &Coordinates) {
    let mut licenses: Vec<&str> = Vec::new();
    for file in items(data.get("interestingFiles")) {
        let (Some(path), Some(license)) = (
            file.get("path").and_then(Value::as_str),
            file.get("license").and_then(Value::as_str),
        ) else {
            continue;
        };
        if is_declared_license(license)
            && is_license_file(path, coordinates)
            && !licenses.contains(&license)
        {
            licenses.push(license);
        }
    }
    if !licenses.is_empty() {
        result.set_declared(Some(licenses.join(" AND ")));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn coords(spec: &str) -> Coordinates {
        spec.parse().unwrap()
    }

    fn summarize(spec: &str, data: Value) -> Definition {
        ClearlyDescribedSummarizer::new().summarize(&coords(spec), &data)
    }

    #[test]
    fn test_empty_document_for_every_type() {
        for spec in [
            "npm/npmjs/-/lodash/4.17.21",
            "crate/cratesio/-/serde/1.0.0",
            "maven/mavencentral/org.apache/commons/1.0",
            "sourcearchive/mavencentral/org.apache/commons/1.0",
            "nuget/nuget/-/Newtonsoft.Json/13.0.1",
            "gem/rubygems/-/rails/7.0.0",
            "pod/cocoapods/-/Alamofire/5.0.0",
            "pypi/pypi/-/requests/2.28.1",
            "debsrc/debian/-/curl/7.0",
        ] {
            let def = summarize(spec, json!({}));
            assert!(def.licensed.is_none(), "{} declared a license", spec);
            assert!(def.files.is_none(), "{} produced files", spec);
            let described = def.described.unwrap_or_default();
            assert_eq!(described.release_date, None, "{}", spec);
            assert_eq!(described.project_website, None, "{}", spec);
            assert_eq!(described.issue_tracker, None, "{}", spec);
        }
    }

    #[test]
    fn test_common_fields() {
        let def = summarize(
            "sourcearchive/mavencentral/org.apache/commons/1.0",
            json!({
                "facets": {"tests": ["src/test/**"]},
                "summaryInfo": {"count": 2, "hashes": {"sha1": "abc"}},
                "sourceInfo": {
                    "type": "maven", "provider": "mavencentral",
                    "namespace": "org.apache", "name": "commons", "revision": "1.0"
                },
                "files": [
                    {"path": "src/Main.java", "hashes": {"sha1": "1"}},
                    {"path": "LICENSE", "hashes": {"sha1": "2"}}
                ]
            }),
        );
        let described = def.described.unwrap();
        assert_eq!(described.files, Some(2));
        assert_eq!(described.hashes.unwrap()["sha1"], "abc");
        assert_eq!(described.facets.unwrap().get("tests").map(<[String]>::len), Some(1));
        let location = described.source_location.unwrap();
        assert_eq!(location.kind, "sourcearchive");
        assert!(location.url.unwrap().ends_with("commons-1.0-sources.jar"));
        let files = def.files.unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].path, "src/Main.java");
        assert_eq!(files[1].hashes.as_ref().unwrap()["sha1"], "2");
    }

    #[test]
    fn test_attachments_set_token_and_license_nature() {
        let def = summarize(
            "npm/npmjs/-/lodash/4.17.21",
            json!({
                "files": [{"path": "package/LICENSE"}, {"path": "package/index.js"}],
                "attachments": [
                    {"path": "package/LICENSE", "token": "t1"},
                    {"path": "package/index.js", "token": "t2"},
                    {"path": "missing", "token": "t3"}
                ]
            }),
        );
        let files = def.files.unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].token.as_deref(), Some("t1"));
        assert!(files[0].has_nature("license"));
        assert_eq!(files[1].token.as_deref(), Some("t2"));
        assert!(files[1].natures.is_none());
    }

    #[test]
    fn test_interesting_files_merge_and_declare() {
        let data = json!({
            "files": [{"path": "LICENSE"}, {"path": "src/lib.rs"}],
            "interestingFiles": [
                {"path": "LICENSE", "license": "MIT"},
                {"path": "NOTICE", "license": "unknown junk here"},
                {"path": "COPYING", "license": ""},
                {"path": "docs/LICENSE", "license": "Apache-2.0"}
            ]
        });
        let def = summarize("sourcearchive/github/owner/repo/abc", data.clone());

        let files = def.files.as_ref().unwrap();
        let paths: Vec<&str> = files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, vec!["LICENSE", "src/lib.rs", "NOTICE", "COPYING", "docs/LICENSE"]);
        assert_eq!(files[0].license.as_deref(), Some("MIT"));
        assert!(files[0].has_nature("license"));
        assert_eq!(files[2].license.as_deref(), Some("NOASSERTION"));
        assert_eq!(files[3].license, None);
        assert!(files[3].natures.is_none());
        assert!(!files[4].has_nature("license"));

        // only root license files with valid expressions are declared
        assert_eq!(def.declared(), Some("MIT"));
        // the raw document is left untouched
        assert_eq!(data["interestingFiles"][0]["license"], "MIT");
    }

    #[test]
    fn test_license_from_files_dedupes() {
        let def = summarize(
            "sourcearchive/github/owner/repo/abc",
            json!({
                "interestingFiles": [
                    {"path": "LICENSE", "license": "MIT"},
                    {"path": "LICENSE.md", "license": "MIT"},
                    {"path": "COPYING", "license": "GPL-2.0"}
                ]
            }),
        );
        assert_eq!(def.declared(), Some("MIT AND GPL-2.0"));
    }

    #[test]
    fn test_summarize_is_idempotent() {
        let data = json!({
            "files": [{"path": "LICENSE"}],
            "interestingFiles": [{"path": "LICENSE", "license": "MIT"}],
            "registryData": {"license": "MIT/Apache-2.0", "created_at": "2020-01-01T00:00:00Z"}
        });
        let first = summarize("crate/cratesio/-/serde/1.0.0", data.clone());
        let second = summarize("crate/cratesio/-/serde/1.0.0", data);
        assert_eq!(first, second);
    }

    #[test]
    fn test_deeply_nested_license_is_not_declarable() {
        let nested = format!("{}MIT{}", "(".repeat(200_000), ")".repeat(200_000));
        let def = summarize(
            "npm/npmjs/-/deep/1.0.0",
            json!({
                "files": [{"path": "package/LICENSE"}],
                "interestingFiles": [{"path": "package/LICENSE", "license": nested.clone()}],
                "registryData": {"manifest": {"license": nested}}
            }),
        );
        assert_eq!(def.declared(), Some("NOASSERTION"));
        let files = def.files.unwrap();
        assert_eq!(files[0].license.as_deref(), Some("NOASSERTION"));
    }

    #[test]
    fn test_source_location_without_url_shape_keeps_url() {
        let def = summarize(
            "sourcearchive/bitbucket/-/widget/abc",
            json!({"sourceInfo": {
                "type": "git", "provider": "Bitbucket", "namespace": "-",
                "name": "widget", "revision": "abc",
                "url": "https://bitbucket.org/acme/widget"
            }}),
        );
        let location = def.described.unwrap().source_location.unwrap();
        assert_eq!(location.provider, "bitbucket");
        assert_eq!(location.namespace, None);
        assert_eq!(location.url.as_deref(), Some("https://bitbucket.org/acme/widget"));
    }
}
