use std::collections::{BTreeMap, BTreeSet};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{Result, SummaryError};
use crate::models::{Attribution, Coordinates, Definition, Discovered, FacetSummary, Facets};

use super::facets::compute_file_buckets;
use super::{items, text};

/// Path fragments that mark a file as the package's own license text.
const LICENSE_FILE_MARKERS: &[&str] = &["license", "license.txt", "license.md", "license.html"];

/// Deserializes `T`, treating a value of any other shape as absent.
fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Deserializes a list, keeping the elements that read as `T`. Anything
/// other than an array is absent.
fn lenient_list<'de, D, T>(deserializer: D) -> std::result::Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Value::Array(values) = Value::deserialize(deserializer)? else {
        return Ok(None);
    };
    Ok(Some(
        values
            .into_iter()
            .filter_map(|value| serde_json::from_value(value).ok())
            .collect(),
    ))
}

/// First non-empty value of `candidates`.
fn first_non_empty<'a>(candidates: [&'a Option<String>; 2]) -> Option<&'a str> {
    candidates
        .into_iter()
        .filter_map(Option::as_deref)
        .find(|value| !value.is_empty())
}

/// A scanned file. Only `path` is required; malformed detections, copyrights
/// or packages are dropped individually and the file itself is kept.
#[derive(Debug, Deserialize)]
struct ScannedFile {
    path: String,
    #[serde(default, deserialize_with = "lenient_list")]
    licenses: Option<Vec<DetectedLicense>>,
    #[serde(default, deserialize_with = "lenient_list")]
    copyrights: Option<Vec<Copyright>>,
    #[serde(default, deserialize_with = "lenient_list")]
    packages: Option<Vec<Package>>,
}

#[derive(Debug, Deserialize)]
struct DetectedLicense {
    #[serde(default, deserialize_with = "lenient")]
    spdx_license_key: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    key: Option<String>,
}

impl DetectedLicense {
    /// ScanCode's identifier for the detection, as reported (not SPDX-normalized).
    fn identifier(&self) -> Option<&str> {
        first_non_empty([&self.spdx_license_key, &self.key])
    }
}

#[derive(Debug, Deserialize)]
struct Copyright {
    #[serde(default, deserialize_with = "lenient_list")]
    holders: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct Package {
    #[serde(default, deserialize_with = "lenient_list")]
    asserted_licenses: Option<Vec<AssertedLicense>>,
}

#[derive(Debug, Deserialize)]
struct AssertedLicense {
    #[serde(default, deserialize_with = "lenient")]
    license: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    spdx_license_key: Option<String>,
}

impl AssertedLicense {
    fn identifier(&self) -> Option<&str> {
        first_non_empty([&self.license, &self.spdx_license_key])
    }
}

impl ScannedFile {
    fn licenses(&self) -> &[DetectedLicense] {
        self.licenses.as_deref().unwrap_or_default()
    }

    /// Licenses asserted by the first package record. `Some` (even if empty)
    /// means the file's attribution is covered by the package metadata.
    fn asserted_licenses(&self) -> Option<&[AssertedLicense]> {
        self.packages
            .as_deref()?
            .first()?
            .asserted_licenses
            .as_deref()
    }

    fn is_license_file(&self) -> bool {
        let lowered = self.path.to_lowercase();
        LICENSE_FILE_MARKERS.iter().any(|marker| lowered.contains(marker))
    }

    /// Adds the copyright holders to `holders`; returns whether there were any.
    fn collect_holders(&self, holders: &mut BTreeSet<String>) -> bool {
        let mut found = false;
        for copyright in self.copyrights.as_deref().unwrap_or_default() {
            let names = copyright.holders.as_deref().unwrap_or_default();
            found |= !names.is_empty();
            holders.extend(names.iter().cloned());
        }
        found
    }
}

/// Sorted, non-empty entries of `set`, or `None` when nothing is left.
fn set_to_vec(set: BTreeSet<String>) -> Option<Vec<String>> {
    let values: Vec<String> = set.into_iter().filter(|v| !v.is_empty()).collect();
    (!values.is_empty()).then_some(values)
}

/// Summarizes ScanCode output, grouping files into facets.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScanCodeSummarizer;

impl ScanCodeSummarizer {
    pub fn new() -> Self {
        Self
    }

    /// Summarize a ScanCode scan of the package at `coordinates`.
    ///
    /// `facets` selects how files are grouped; `None` yields an empty
    /// definition since ScanCode output carries no facet information of its own.
    ///
    /// # Errors
    ///
    /// [`SummaryError::InvalidScanData`] when the document has no
    /// `content.scancode_version`.
    pub fn summarize(
        &self,
        coordinates: &Coordinates,
        harvested: &Value,
        facets: Option<&Facets>,
    ) -> Result<Definition> {
        if text(harvested.pointer("/content/scancode_version")).is_none() {
            return Err(SummaryError::InvalidScanData);
        }
        let Some(facets) = facets else {
            return Ok(Definition::default());
        };

        let mut result = Definition::default();
        add_described_info(&mut result, harvested);

        let files = scanned_files(harvested);
        debug!(coordinates = %coordinates, files = files.len(), "summarizing scan");
        let buckets = compute_file_buckets(files, facets, |file| file.path.as_str());

        let mut summaries = BTreeMap::new();
        let mut declared = BTreeSet::new();
        for (name, files) in &buckets {
            summaries.insert(name.clone(), summarize_license_info(files));
            collect_declared_licenses(files, &mut declared);
        }

        let licensed = result.licensed_mut();
        licensed.facets = Some(summaries);
        licensed.declared = set_to_vec(declared).map(|licenses| licenses.join(" and "));
        Ok(result)
    }
}

fn add_described_info(result: &mut Definition, harvested: &Value) {
    if let Some(date) = text(harvested.pointer("/_metadata/releaseDate")) {
        result.described_mut().release_date = Some(date.trim().to_string());
    }
}

fn scanned_files(harvested: &Value) -> Vec<ScannedFile> {
    items(harvested.pointer("/content/files"))
        .iter()
        .filter_map(|file| match ScannedFile::deserialize(file) {
            Ok(file) => Some(file),
            Err(err) => {
                warn!(error = %err, "skipping unreadable scan entry");
                None
            }
        })
        .collect()
}

fn summarize_license_info(files: &[ScannedFile]) -> FacetSummary {
    let mut holders = BTreeSet::new();
    let mut expressions = BTreeSet::new();
    let mut unknown_parties = 0;
    let mut unknown_licenses = 0;

    for file in files {
        let detections = file.licenses();
        expressions.extend(
            detections
                .iter()
                .filter_map(DetectedLicense::identifier)
                .map(str::to_string),
        );
        if detections.is_empty() {
            unknown_licenses += 1;
        }
        if file.asserted_licenses().is_none() && !file.collect_holders(&mut holders) {
            unknown_parties += 1;
        }
    }

    FacetSummary {
        attribution: Attribution {
            parties: set_to_vec(holders),
            unknown: unknown_parties,
        },
        discovered: Discovered {
            expressions: set_to_vec(expressions),
            unknown: unknown_licenses,
        },
        files: files.len() as u64,
    }
}

fn collect_declared_licenses(files: &[ScannedFile], declared: &mut BTreeSet<String>) {
    for file in files {
        if let Some(asserted) = file.asserted_licenses() {
            declared.extend(
                asserted
                    .iter()
                    .filter_map(AssertedLicense::identifier)
                    .map(str::to_string),
            );
        }
        if file.is_license_file() {
            declared.extend(
                file.licenses()
                    .iter()
                    .filter_map(DetectedLicense::identifier)
                    .map(str::to_string),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn coords() -> Coordinates {
        "npm/npmjs/-/redie/0.3.0".parse().unwrap()
    }

    fn scan(files: Value) -> Value {
        json!({
            "_metadata": {"releaseDate": " 2018-03-06 "},
            "content": {"scancode_version": "2.2.1", "files": files}
        })
    }

    fn tests_facet() -> Facets {
        [("tests", vec!["tests/**"])].into_iter().collect()
    }

    #[test]
    fn test_missing_version_marker_is_invalid() {
        let summarizer = ScanCodeSummarizer::new();
        let err = summarizer
            .summarize(&coords(), &json!({"content": {"files": []}}), Some(&Facets::new()))
            .unwrap_err();
        assert_eq!(err, SummaryError::InvalidScanData);
        assert!(summarizer.summarize(&coords(), &json!({}), None).is_err());
    }

    #[test]
    fn test_no_facets_returns_empty_definition() {
        let def = ScanCodeSummarizer::new()
            .summarize(&coords(), &scan(json!([{"path": "a.js"}])), None)
            .unwrap();
        assert!(def.is_empty());
    }

    #[test]
    fn test_facet_buckets() {
        let data = scan(json!([
            {"path": "tests/a.js", "licenses": [{"spdx_license_key": "MIT"}], "copyrights": [{"holders": ["Bob"]}]},
            {"path": "index.js", "licenses": [{"spdx_license_key": "Apache-2.0"}], "copyrights": [{"holders": ["Alice"]}]}
        ]));
        let def = ScanCodeSummarizer::new()
            .summarize(&coords(), &data, Some(&tests_facet()))
            .unwrap();

        assert_eq!(
            def.described.as_ref().unwrap().release_date.as_deref(),
            Some("2018-03-06")
        );
        let facets = def.licensed.as_ref().unwrap().facets.as_ref().unwrap();
        assert_eq!(facets["tests"].files, 1);
        assert_eq!(facets["core"].files, 1);
        assert_eq!(facets["tests"].discovered.expressions, Some(vec!["MIT".to_string()]));
        assert_eq!(facets["core"].attribution.parties, Some(vec!["Alice".to_string()]));
        assert_eq!(def.declared(), None);
    }

    #[test]
    fn test_unknowns_are_counted() {
        let data = scan(json!([
            {"path": "a.js", "licenses": [], "copyrights": []},
            {"path": "b.js"},
            {"path": "c.js", "licenses": [{"spdx_license_key": "MIT"}], "copyrights": [{"holders": []}]}
        ]));
        let def = ScanCodeSummarizer::new()
            .summarize(&coords(), &data, Some(&Facets::new()))
            .unwrap();
        let core = &def.licensed.unwrap().facets.unwrap()["core"];
        assert_eq!(core.files, 3);
        assert_eq!(core.discovered.unknown, 2);
        assert_eq!(core.attribution.unknown, 3);
        assert_eq!(core.attribution.parties, None);
        assert_eq!(core.discovered.expressions, Some(vec!["MIT".to_string()]));
    }

    #[test]
    fn test_asserted_licenses_cover_attribution() {
        let data = scan(json!([
            {
                "path": "package.json",
                "licenses": [],
                "copyrights": [{"holders": ["Ignored"]}],
                "packages": [{"asserted_licenses": [{"license": "mit", "spdx_license_key": "MIT"}]}]
            },
            {
                "path": "setup.py",
                "packages": [{"asserted_licenses": [{"spdx_license_key": "BSD-3-Clause"}]}]
            }
        ]));
        let def = ScanCodeSummarizer::new()
            .summarize(&coords(), &data, Some(&Facets::new()))
            .unwrap();
        assert_eq!(def.declared(), Some("BSD-3-Clause and mit"));
        let core = &def.licensed.unwrap().facets.unwrap()["core"];
        assert_eq!(core.attribution.unknown, 0);
        assert_eq!(core.attribution.parties, None);
        // not gated by the asserted licenses
        assert_eq!(core.discovered.unknown, 2);
    }

    #[test]
    fn test_license_files_feed_declared() {
        let data = scan(json!([
            {"path": "LICENSE", "licenses": [{"spdx_license_key": "MIT"}, {"spdx_license_key": "ISC"}]},
            {"path": "docs/License.md", "licenses": [{"spdx_license_key": "Apache-2.0"}]},
            {"path": "src/lib.js", "licenses": [{"spdx_license_key": "GPL-2.0"}]}
        ]));
        let def = ScanCodeSummarizer::new()
            .summarize(&coords(), &data, Some(&Facets::new()))
            .unwrap();
        assert_eq!(def.declared(), Some("Apache-2.0 and ISC and MIT"));
    }

    #[test]
    fn test_declared_is_independent_of_file_order() {
        let forward = scan(json!([
            {"path": "LICENSE", "licenses": [{"spdx_license_key": "MIT"}]},
            {"path": "sub/LICENSE.txt", "licenses": [{"spdx_license_key": "Apache-2.0"}]}
        ]));
        let reverse = scan(json!([
            {"path": "sub/LICENSE.txt", "licenses": [{"spdx_license_key": "Apache-2.0"}]},
            {"path": "LICENSE", "licenses": [{"spdx_license_key": "MIT"}]}
        ]));
        let summarizer = ScanCodeSummarizer::new();
        let a = summarizer.summarize(&coords(), &forward, Some(&tests_facet())).unwrap();
        let b = summarizer.summarize(&coords(), &reverse, Some(&tests_facet())).unwrap();
        assert_eq!(a.declared(), b.declared());
        assert_eq!(a.declared(), Some("Apache-2.0 and MIT"));
    }

    #[test]
    fn test_input_document_is_not_modified() {
        let data = scan(json!([{"path": "tests/a.js"}, {"path": "b.js"}]));
        let before = data.clone();
        ScanCodeSummarizer::new()
            .summarize(&coords(), &data, Some(&tests_facet()))
            .unwrap();
        assert_eq!(data, before);
    }

    #[test]
    fn test_malformed_entries_still_count() {
        let data = scan(json!([
            {
                "path": "index.js",
                "licenses": [{"spdx_license_key": "MIT"}, null, {"spdx_license_key": 7, "key": "isc"}],
                "copyrights": [{"holders": ["Alice", null]}, "(c) Bob"]
            },
            {"path": "lib.js", "licenses": "MIT", "copyrights": {"holders": ["Eve"]}},
            {"licenses": [{"spdx_license_key": "GPL-3.0"}]}
        ]));
        let def = ScanCodeSummarizer::new()
            .summarize(&coords(), &data, Some(&Facets::new()))
            .unwrap();
        let core = &def.licensed.unwrap().facets.unwrap()["core"];
        assert_eq!(core.files, 2);
        assert_eq!(
            core.discovered.expressions,
            Some(vec!["MIT".to_string(), "isc".to_string()])
        );
        assert_eq!(core.discovered.unknown, 1);
        assert_eq!(core.attribution.parties, Some(vec!["Alice".to_string()]));
        assert_eq!(core.attribution.unknown, 1);
    }

    #[test]
    fn test_empty_asserted_license_falls_back_to_key() {
        let data = scan(json!([{
            "path": "package.json",
            "packages": [{"asserted_licenses": [{"license": "", "spdx_license_key": "MIT"}]}]
        }]));
        let def = ScanCodeSummarizer::new()
            .summarize(&coords(), &data, Some(&Facets::new()))
            .unwrap();
        assert_eq!(def.declared(), Some("MIT"));
    }

    #[test]
    fn test_empty_facet_stops_later_facets() {
        let data = scan(json!([
            {"path": "tests/a.js"},
            {"path": "docs/guide.md"},
            {"path": "index.js"}
        ]));
        let facets: Facets = [
            ("tests", vec!["tests/**"]),
            ("data", vec![]),
            ("doc", vec!["docs/**"]),
        ]
        .into_iter()
        .collect();
        let def = ScanCodeSummarizer::new()
            .summarize(&coords(), &data, Some(&facets))
            .unwrap();
        let summaries = def.licensed.unwrap().facets.unwrap();
        let names: Vec<&str> = summaries.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["core", "tests"]);
        assert_eq!(summaries["tests"].files, 1);
        assert_eq!(summaries["core"].files, 2);
    }

    #[test]
    fn test_summarize_is_idempotent() {
        let data = scan(json!([
            {"path": "LICENSE", "licenses": [{"spdx_license_key": "MIT"}], "copyrights": [{"holders": ["Alice"]}]},
            {"path": "tests/a.js", "packages": [{"asserted_licenses": [{"license": "ISC"}]}]}
        ]));
        let summarizer = ScanCodeSummarizer::new();
        let first = summarizer.summarize(&coords(), &data, Some(&tests_facet())).unwrap();
        let second = summarizer.summarize(&coords(), &data, Some(&tests_facet())).unwrap();
        assert_eq!(first, second);
    }
}
